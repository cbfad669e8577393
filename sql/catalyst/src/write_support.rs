//! Write-mode validation against table capabilities.
//!
//! The write-planning layer calls [`check_write_mode`] before constructing
//! a plan; a mode the table's capability set does not license is rejected
//! here and no work is ever scheduled for it.

use crate::capability::{TableCapability, TableCapabilitySet};
use crate::error::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A requested batch write mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WriteMode {
    /// Append rows to the table.
    Append,
    /// Remove all existing rows, then append.
    Truncate,
    /// Replace rows matching a filter with the appended data.
    OverwriteByFilter,
    /// Dynamically replace the data partitions the appended data touches.
    OverwriteDynamic,
}

impl WriteMode {
    /// Capabilities the table must advertise for this mode, checked in
    /// order. `BatchWrite` is the precondition for every mode.
    fn required_capabilities(self) -> &'static [TableCapability] {
        match self {
            WriteMode::Append => &[TableCapability::BatchWrite],
            WriteMode::Truncate => &[TableCapability::BatchWrite, TableCapability::Truncate],
            WriteMode::OverwriteByFilter => &[
                TableCapability::BatchWrite,
                TableCapability::OverwriteByFilter,
            ],
            WriteMode::OverwriteDynamic => &[
                TableCapability::BatchWrite,
                TableCapability::OverwriteDynamic,
            ],
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WriteMode::Append => "append",
            WriteMode::Truncate => "truncate",
            WriteMode::OverwriteByFilter => "overwrite-by-filter",
            WriteMode::OverwriteDynamic => "overwrite-dynamic",
        };
        write!(f, "{name}")
    }
}

/// Check that `capabilities` licenses `mode`.
///
/// Fails with the first missing capability; on failure no part of a write
/// plan has been built.
pub fn check_write_mode(
    capabilities: &TableCapabilitySet,
    mode: WriteMode,
) -> AnalysisResult<()> {
    for &required in mode.required_capabilities() {
        if !capabilities.supports(required) {
            return Err(AnalysisError::UnsupportedWriteMode {
                mode,
                missing: required,
            });
        }
    }
    Ok(())
}
