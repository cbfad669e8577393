//! Capabilities a table implementation can advertise.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A feature a table advertises to the engine.
///
/// Tables expose a set of capabilities; each one signals support for the
/// named feature. The vocabulary is closed and flat: there are no ordering
/// or dependency edges between capabilities beyond what write-mode
/// validation enforces externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableCapability {
    /// The table supports reads in batch execution mode.
    BatchRead,
    /// The table supports append writes in batch execution mode. Every
    /// other write mode requires this one as well.
    BatchWrite,
    /// The table can be truncated in a write operation, removing all
    /// existing rows.
    Truncate,
    /// The table can replace existing data matching a filter with appended
    /// data in a write operation.
    OverwriteByFilter,
    /// The table can dynamically replace existing data partitions with
    /// appended data in a write operation.
    OverwriteDynamic,
}

impl fmt::Display for TableCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableCapability::BatchRead => "BATCH_READ",
            TableCapability::BatchWrite => "BATCH_WRITE",
            TableCapability::Truncate => "TRUNCATE",
            TableCapability::OverwriteByFilter => "OVERWRITE_BY_FILTER",
            TableCapability::OverwriteDynamic => "OVERWRITE_DYNAMIC",
        };
        write!(f, "{name}")
    }
}

/// The flat, order-irrelevant capability set attached to one table
/// snapshot.
///
/// Supplied fresh by the table-metadata provider on each planning pass and
/// immutable afterwards; the only query is membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCapabilitySet {
    capabilities: HashSet<TableCapability>,
}

impl TableCapabilitySet {
    /// A table that advertises nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the table advertises the given capability.
    pub fn supports(&self, capability: TableCapability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

impl FromIterator<TableCapability> for TableCapabilitySet {
    fn from_iter<I: IntoIterator<Item = TableCapability>>(iter: I) -> Self {
        Self {
            capabilities: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[TableCapability; N]> for TableCapabilitySet {
    fn from(capabilities: [TableCapability; N]) -> Self {
        capabilities.into_iter().collect()
    }
}
