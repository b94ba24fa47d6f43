//! Coordinator identity.
//!
//! Every coordinator component owns a [`CoordinatorId`] generated at creation
//! time and never reused. The id doubles as the join key between the logical
//! coordinator tree and the host navigation control's path representation, so
//! its canonical string form must be stable for the lifetime of the process.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Process-unique opaque identity token for a coordinator component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoordinatorId(Uuid);

impl CoordinatorId {
    /// Generate a fresh identity. Ids are never reused within a process.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The canonical string form used to correlate against host path blobs.
    pub fn canonical(&self) -> String {
        self.0.to_string()
    }

    /// Parse an id back from its canonical string form.
    pub fn parse(text: &str) -> Option<Self> {
        Uuid::parse_str(text).ok().map(Self)
    }
}

impl fmt::Display for CoordinatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = CoordinatorId::generate();
        let b = CoordinatorId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn canonical_form_round_trips() {
        let id = CoordinatorId::generate();
        assert_eq!(CoordinatorId::parse(&id.canonical()), Some(id));
        assert_eq!(id.to_string(), id.canonical());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(CoordinatorId::parse("not-a-coordinator-id"), None);
    }
}
