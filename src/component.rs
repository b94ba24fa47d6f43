//! The shared component capability.
//!
//! All three coordinator kinds (screen, sequence, stack) expose the same
//! minimal surface: a stable identity, a mutable display tag for later
//! lookup by name, and `current_routes`, the single polymorphic hook the
//! tree walker uses. `current_routes` reports a node's *outgoing structural
//! edges* only, never the whole subtree.

use crate::id::CoordinatorId;
use crate::tree::Route;

/// Base capability implemented by every coordinator handle.
pub trait Component {
    /// Stable, process-unique coordinator identity.
    fn navigation_id(&self) -> CoordinatorId;

    /// Free-form display tag for lookup by name.
    fn tag(&self) -> String;

    /// Replace the display tag.
    fn set_tag(&self, tag: &str);

    /// The node's outgoing structural edges, in display order.
    fn current_routes(&self) -> Vec<Route>;
}
