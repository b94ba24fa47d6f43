//! Types exchanged with the host navigation control.
//!
//! The host consumes an ordered list of coordinator identities as its "path"
//! state ([`HostPath`]) and, on user-driven back navigation, reports the new
//! path back as an opaque encoded blob ([`PathEncoding`]). The canonical
//! encoding is a JSON array of canonical id strings; foreign blobs are
//! matched by substring containment, which the host guarantees to be a
//! strict superset of each visible identity's literal text.

use crate::error::{NavError, Result};
use crate::id::CoordinatorId;

/// The ordered list of visible screen identities published to the host.
///
/// Excludes the root-most entry, which the host renders as its implicit root
/// view outside of the path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostPath {
    ids: Vec<CoordinatorId>,
}

impl HostPath {
    pub fn new(ids: Vec<CoordinatorId>) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &[CoordinatorId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Serialize to the canonical blob form the host would report back.
    pub fn encode(&self) -> String {
        // Infallible: a Vec of ids always serializes.
        serde_json::to_string(&self.ids).unwrap_or_default()
    }
}

/// An opaque path blob reported by the host, prepared for identity matching.
///
/// Decodes the canonical JSON form structurally when possible; anything else
/// falls back to substring containment against the raw blob text.
#[derive(Debug, Clone)]
pub struct PathEncoding {
    blob: String,
    decoded: Option<Vec<CoordinatorId>>,
    /// Identities appended after the fact (the stack's implicit root, which
    /// the host excludes from its path).
    appended: Vec<CoordinatorId>,
}

impl PathEncoding {
    /// Wrap a host-reported blob, decoding it structurally when possible.
    pub fn new(blob: impl Into<String>) -> Self {
        let blob = blob.into();
        let decoded = match Self::decode(&blob) {
            Ok(ids) => Some(ids),
            Err(err) => {
                log::debug!("host path blob is not canonical, using substring matching: {err}");
                None
            }
        };
        Self {
            blob,
            decoded,
            appended: Vec::new(),
        }
    }

    /// Build an encoding directly from known identities (host simulation).
    pub fn from_ids(ids: &[CoordinatorId]) -> Self {
        Self::new(HostPath::new(ids.to_vec()).encode())
    }

    /// Append an identity excluded from the host's own path representation.
    pub fn with_root(mut self, id: CoordinatorId) -> Self {
        self.appended.push(id);
        self
    }

    /// Whether the given identity is visible according to this encoding.
    pub fn contains(&self, id: CoordinatorId) -> bool {
        if self.appended.contains(&id) {
            return true;
        }
        match &self.decoded {
            Some(ids) => ids.contains(&id),
            None => self.blob.contains(&id.canonical()),
        }
    }

    fn decode(blob: &str) -> Result<Vec<CoordinatorId>> {
        serde_json::from_str(blob).map_err(|err| NavError::path_encoding(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_round_trip_matches_structurally() {
        let ids = vec![CoordinatorId::generate(), CoordinatorId::generate()];
        let other = CoordinatorId::generate();

        let encoding = PathEncoding::new(HostPath::new(ids.clone()).encode());
        assert!(encoding.contains(ids[0]));
        assert!(encoding.contains(ids[1]));
        assert!(!encoding.contains(other));
    }

    #[test]
    fn foreign_blob_falls_back_to_substring_matching() {
        let id = CoordinatorId::generate();
        let other = CoordinatorId::generate();
        let blob = format!("<host-state item=\"{}\" depth=\"2\"/>", id.canonical());

        let encoding = PathEncoding::new(blob);
        assert!(encoding.contains(id));
        assert!(!encoding.contains(other));
    }

    #[test]
    fn with_root_extends_the_visible_set() {
        let root = CoordinatorId::generate();
        let encoding = PathEncoding::from_ids(&[]).with_root(root);
        assert!(encoding.contains(root));
    }

    #[test]
    fn empty_path_encodes_and_decodes() {
        let path = HostPath::default();
        assert!(path.is_empty());
        let encoding = PathEncoding::new(path.encode());
        assert!(!encoding.contains(CoordinatorId::generate()));
    }
}
