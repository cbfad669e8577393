//! Physical locations of shuffle blocks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// One physical location holding a subset of a map task's output blocks.
///
/// `host` identifies the server; `port` is optional, with `None` meaning
/// the transport's default/implicit port. `metadata` is an opaque,
/// transport-specific payload (a path token, a database key) carried
/// through uninterpreted.
///
/// Equality and hashing are defined over `(host, port)` only, so that
/// unreachable-server removal matches records regardless of metadata. A
/// record without a port never matches a removal naming a concrete port,
/// and vice versa.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffleLocation {
    pub host: String,
    pub port: Option<u16>,
    pub metadata: Vec<u8>,
}

impl ShuffleLocation {
    /// Create a location with no attached metadata. `host` must be
    /// non-empty by caller contract; the registry treats it opaquely.
    pub fn new(host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            host: host.into(),
            port,
            metadata: Vec::new(),
        }
    }

    /// Attach a transport-specific metadata payload.
    pub fn with_metadata(mut self, metadata: Vec<u8>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Whether this record refers to the given server.
    pub fn is_at(&self, host: &str, port: Option<u16>) -> bool {
        self.host == host && self.port == port
    }
}

impl PartialEq for ShuffleLocation {
    fn eq(&self, other: &Self) -> bool {
        self.host == other.host && self.port == other.port
    }
}

impl Eq for ShuffleLocation {}

impl Hash for ShuffleLocation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.host.hash(state);
        self.port.hash(state);
    }
}

impl fmt::Display for ShuffleLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{}", self.host, port),
            None => write!(f, "{}", self.host),
        }
    }
}
