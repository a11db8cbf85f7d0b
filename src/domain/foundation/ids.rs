//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a debrief session.
///
/// Sessions are keyed externally by this id; the nil UUID is reserved for
/// the shared session used when a caller does not supply one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebriefSessionId(Uuid);

impl DebriefSessionId {
    /// Creates a new random DebriefSessionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the id of the shared single-user session.
    pub fn shared() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for DebriefSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DebriefSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DebriefSessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
