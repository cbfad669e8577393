//! Error types for write-plan analysis.

use crate::capability::TableCapability;
use crate::write_support::WriteMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Analysis-time validation failures, surfaced to the job submitter before
/// any execution starts.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisError {
    /// The requested write mode is not licensed by the table's advertised
    /// capabilities. Never silently downgraded to a different mode.
    #[error("table does not support {mode} writes: missing capability {missing}")]
    UnsupportedWriteMode {
        mode: WriteMode,
        missing: TableCapability,
    },
}

/// Result type for analysis-time checks.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
