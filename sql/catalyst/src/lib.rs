//! Cinder SQL Catalyst - table capability vocabulary and write-mode
//! validation consumed by the write-planning layer before any plan is
//! built.

pub mod capability;
pub mod error;
pub mod write_support;

pub use capability::{TableCapability, TableCapabilitySet};
pub use error::{AnalysisError, AnalysisResult};
pub use write_support::{WriteMode, check_write_mode};
