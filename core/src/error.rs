//! Error types for shuffle location tracking.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the shuffle location registry.
///
/// The registry never retries internally: it reports facts, callers decide
/// policy. `UnknownShuffle` and `UnknownMapTask` are recoverable for the
/// scheduler (treat as already lost, fetch elsewhere or re-run upstream);
/// `InvalidPartitionRange` is a caller bug and fails only the offending
/// registration call.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShuffleError {
    /// A registration referenced a reduce partition outside the range the
    /// call itself declared. Other entries are untouched.
    #[error(
        "reduce partition {reduce_id} is out of range for shuffle {shuffle_id} map task {map_id} ({num_partitions} partitions declared)"
    )]
    InvalidPartitionRange {
        shuffle_id: u32,
        map_id: u32,
        reduce_id: u32,
        num_partitions: u32,
    },

    /// The queried map task was never registered for this shuffle, or the
    /// shuffle's metadata has since been released.
    #[error("no map output registered for shuffle {shuffle_id} map task {map_id}")]
    UnknownMapTask { shuffle_id: u32, map_id: u32 },

    /// The shuffle itself is not (or no longer) registered.
    #[error("unknown shuffle {shuffle_id}")]
    UnknownShuffle { shuffle_id: u32 },
}

/// Result type for shuffle location tracking operations.
pub type ShuffleResult<T> = Result<T, ShuffleError>;
