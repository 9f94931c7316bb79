use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for every scheduled thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimId(pub Uuid);

impl SimId {
    /// Generate a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SimId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Identity carried by every action and event.
///
/// Two objects are equal when both the id and the name match. Cloning keeps
/// the id, so a scheduled copy compares equal to the template it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimObject {
    /// Assigned once at construction, never reused.
    pub id: SimId,
    /// Display name.
    pub name: String,
}

impl SimObject {
    /// Create an object with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SimId::new(),
            name: name.into(),
        }
    }
}

impl fmt::Display for SimObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.id)
    }
}
