//! Cinder Core - driver-side shuffle block location tracking
//!
//! This crate is the bookkeeping authority for the shuffle phase of a
//! distributed computation: it records, per map task, where each reduce
//! partition's output blocks physically live, answers fetch-location
//! queries from reduce tasks, and turns "this server is unreachable"
//! reports into an at-most-once data-loss signal for the scheduler.

pub mod error;
pub mod location;
pub mod map_output;
pub mod registry;

pub use error::{ShuffleError, ShuffleResult};
pub use location::ShuffleLocation;
pub use map_output::MapOutputLocations;
pub use registry::{ShuffleLocationRegistry, ShuffleLocationTracker};
