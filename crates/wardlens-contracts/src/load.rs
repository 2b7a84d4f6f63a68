//! Identity of a single fetch-and-derive invocation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for one load, carried in logs and in
/// `WardlensError::Cancelled` so a discarded result can be traced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadId(pub uuid::Uuid);

impl LoadId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for LoadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
