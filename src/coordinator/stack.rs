//! Stack coordinator: host path projection and pruning.
//!
//! The stack owns a single root sequence, derives the host navigation
//! control's path from the live tree, and reacts to host-driven removals
//! (back gesture, swipe). The path is a cached projection: recomputed
//! wholesale from the tree on every structural mutation, never patched
//! incrementally, and published to the host through a watch channel.
//! Recomputation is deferred by one tick so bursts of mutations collapse
//! into a single host update, and it always re-derives from live state at
//! wakeup; a stale wakeup can only produce a redundant recompute, never a
//! stale path.

use crate::component::Component;
use crate::coordinator::presentation::PresentationSlot;
use crate::coordinator::screen::ScreenCoordinator;
use crate::coordinator::sequence::SequenceCoordinator;
use crate::coordinator::{NavigationEvent, ParentLink, SequenceChild};
use crate::host::{HostPath, PathEncoding};
use crate::id::CoordinatorId;
use crate::runtime;
use crate::tree::{Route, Transition};
use log::{debug, trace};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tokio::sync::watch;

const DEFAULT_TAG: &str = "STACK";

struct StackComponent {
    id: CoordinatorId,
    tag: String,
    sequence: Option<SequenceCoordinator>,
    slot: PresentationSlot,
    path_tx: watch::Sender<HostPath>,
    /// Set once the host reports the stack's container finished mounting.
    /// Path publication is gated on it.
    was_initialized: bool,
    /// Dirty flag consulted by the deferred recompute task; redundant
    /// schedule requests collapse into one recompute.
    update_path_needed: bool,
}

/// Handle to a stack coordinator component.
#[derive(Clone)]
pub struct StackCoordinator {
    inner: Rc<RefCell<StackComponent>>,
}

/// Non-owning stack reference (parent and slot back-pointers).
#[derive(Debug, Clone)]
pub(crate) struct WeakStack(Weak<RefCell<StackComponent>>);

impl WeakStack {
    pub(crate) fn upgrade(&self) -> Option<StackCoordinator> {
        self.0.upgrade().map(|inner| StackCoordinator { inner })
    }
}

impl StackCoordinator {
    pub fn new() -> Self {
        let (path_tx, _path_rx) = watch::channel(HostPath::default());
        let stack = Self {
            inner: Rc::new(RefCell::new(StackComponent {
                id: CoordinatorId::generate(),
                tag: DEFAULT_TAG.to_string(),
                sequence: None,
                slot: PresentationSlot::new(),
                path_tx,
                was_initialized: false,
                update_path_needed: false,
            })),
        };
        let slot = stack.inner.borrow().slot.clone();
        slot.set_parent_stack(stack.downgrade());
        stack
    }

    /// Stack hosting the given root sequence.
    pub fn with_sequence(sequence: SequenceCoordinator) -> Self {
        let stack = Self::new();
        stack.set_sequence(sequence);
        stack
    }

    /// Replace the root sequence. The previous root (if any) is destroyed
    /// first; the new one is attached with this stack as its parent.
    pub fn set_sequence(&self, sequence: SequenceCoordinator) {
        self.pop();
        sequence.set_parent(ParentLink::Stack(self.downgrade()));
        self.inner.borrow_mut().sequence = Some(sequence);
        self.schedule_update_path();
    }

    /// Destroy and clear the root sequence; the path becomes empty.
    pub fn pop(&self) {
        let previous = self.inner.borrow_mut().sequence.take();
        if let Some(sequence) = previous {
            debug!(
                "stack {}: popping root sequence {}",
                self.navigation_id(),
                sequence.navigation_id()
            );
            sequence.destroy();
        }
        self.schedule_update_path();
    }

    /// The root sequence, if one is attached.
    pub fn sequence(&self) -> Option<SequenceCoordinator> {
        self.inner.borrow().sequence.clone()
    }

    /// Host signal: the native navigation container finished mounting.
    /// Releases any path update staged during construction.
    pub fn host_mounted(&self) {
        {
            let mut component = self.inner.borrow_mut();
            if component.was_initialized {
                return;
            }
            component.was_initialized = true;
        }
        self.schedule_update_path();
    }

    /// Mark the path dirty and schedule a deferred recompute.
    ///
    /// Before the host mounts, only the flag is recorded; the mount signal
    /// releases it. Afterwards a one-tick continuation re-derives the path
    /// from live state, skipping entirely when an earlier wakeup already
    /// satisfied the request.
    pub fn schedule_update_path(&self) {
        {
            let mut component = self.inner.borrow_mut();
            component.update_path_needed = true;
            if !component.was_initialized {
                return;
            }
        }
        let weak = self.downgrade();
        runtime::spawn_ui(async move {
            tokio::time::sleep(runtime::PATH_COALESCE_TICK).await;
            if let Some(stack) = weak.upgrade() {
                stack.update_path_if_needed();
            }
        });
    }

    /// Latest published host path.
    pub fn path(&self) -> HostPath {
        self.inner.borrow().path_tx.borrow().clone()
    }

    /// Subscribe to host path publications ("publish a change, host
    /// re-renders").
    pub fn path_updates(&self) -> watch::Receiver<HostPath> {
        self.inner.borrow().path_tx.subscribe()
    }

    /// The visible screens beneath the root sequence, in display order.
    /// The first entry is the host's implicit root view and is excluded
    /// from the published path.
    pub fn visible_screens(&self) -> Vec<ScreenCoordinator> {
        let mut screens = Vec::new();
        if let Some(sequence) = self.sequence() {
            collect_screens(&sequence, &mut screens);
        }
        screens
    }

    /// The presentation slot owned by this stack.
    pub fn presenting_slot(&self) -> PresentationSlot {
        self.inner.borrow().slot.clone()
    }

    /// Host-driven pruning: the host reported a new path after user back
    /// navigation. Every coordinator no longer visible is destroyed; when
    /// nothing remains visible the root sequence is dropped entirely.
    pub fn remove_unused_coordinators(&self, encoding: PathEncoding) {
        let sequence = match self.sequence() {
            Some(sequence) => sequence,
            None => return,
        };
        // The host path excludes the implicit root entry; put it back before
        // matching, or the root screen would always look removable.
        let encoding = match self.visible_screens().first() {
            Some(first) => encoding.with_root(first.navigation_id()),
            None => encoding,
        };
        let any_visible = sequence.remove_unused(&encoding);
        if !any_visible {
            debug!(
                "stack {}: nothing visible after host prune, dropping root",
                self.navigation_id()
            );
            self.inner.borrow_mut().sequence = None;
        }
        self.schedule_update_path();
    }

    /// Dispatch point for events bubbled up from descendant sequences.
    pub(crate) fn event_received(&self, event: NavigationEvent) {
        match event {
            NavigationEvent::PathUpdateNeeded => self.schedule_update_path(),
            NavigationEvent::RemoveCoordinatorsNeeded(ids) => self.remove_coordinators(&ids),
        }
    }

    pub(crate) fn destroy(&self) {
        self.pop();
    }

    pub(crate) fn downgrade(&self) -> WeakStack {
        WeakStack(Rc::downgrade(&self.inner))
    }

    fn remove_coordinators(&self, ids: &[CoordinatorId]) {
        let sequence = match self.sequence() {
            Some(sequence) => sequence,
            None => return,
        };
        if sequence.remove_coordinators(ids) {
            // Every child is gone; drop the root sequence with them.
            self.pop();
        }
    }

    fn update_path_if_needed(&self) {
        if !self.inner.borrow().update_path_needed {
            trace!("stack {}: path already current", self.navigation_id());
            return;
        }
        let path = self.derive_path();
        let mut component = self.inner.borrow_mut();
        component.update_path_needed = false;
        debug!(
            "stack {}: publishing path of {} entries",
            component.id,
            path.len()
        );
        component.path_tx.send_replace(path);
    }

    /// Re-derive the path from the live tree: every visible screen identity
    /// in display order, minus the first (the host's implicit root view).
    fn derive_path(&self) -> HostPath {
        let mut ids: Vec<CoordinatorId> = self
            .visible_screens()
            .iter()
            .map(|screen| screen.navigation_id())
            .collect();
        if !ids.is_empty() {
            ids.remove(0);
        }
        HostPath::new(ids)
    }
}

fn collect_screens(sequence: &SequenceCoordinator, out: &mut Vec<ScreenCoordinator>) {
    for child in sequence.children() {
        match child {
            SequenceChild::Screen(screen) => out.push(screen),
            SequenceChild::Sequence(nested) => collect_screens(&nested, out),
        }
    }
}

impl Default for StackCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StackCoordinator {
    fn navigation_id(&self) -> CoordinatorId {
        self.inner.borrow().id
    }

    fn tag(&self) -> String {
        self.inner.borrow().tag.clone()
    }

    fn set_tag(&self, tag: &str) {
        self.inner.borrow_mut().tag = tag.to_string();
    }

    fn current_routes(&self) -> Vec<Route> {
        let mut routes = Vec::new();
        let component = self.inner.borrow();
        if let Some(route) = component.slot.current_route() {
            routes.push(route);
        }
        if let Some(sequence) = &component.sequence {
            routes.push(Route {
                coordinator: crate::coordinator::Coordinator::Sequence(sequence.clone()),
                transition: Transition::StackRoot,
            });
        }
        routes
    }
}

impl PartialEq for StackCoordinator {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for StackCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(component) => f
                .debug_struct("StackCoordinator")
                .field("id", &component.id)
                .field("tag", &component.tag)
                .finish(),
            Err(_) => f.write_str("StackCoordinator(<borrowed>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_screens_flatten_nested_sequences_in_order() {
        let inner = SequenceCoordinator::new();
        let b = ScreenCoordinator::new();
        let c = ScreenCoordinator::new();
        inner.push_screens(vec![b.clone(), c.clone()]);

        let root = SequenceCoordinator::new();
        let a = ScreenCoordinator::new();
        root.push_screen(a.clone());
        root.push_sequence(inner);

        let stack = StackCoordinator::with_sequence(root);
        let ids: Vec<_> = stack
            .visible_screens()
            .iter()
            .map(|screen| screen.navigation_id())
            .collect();
        assert_eq!(
            ids,
            vec![a.navigation_id(), b.navigation_id(), c.navigation_id()]
        );
    }

    #[test]
    fn derive_path_excludes_the_implicit_root() {
        let root = SequenceCoordinator::new();
        let first = ScreenCoordinator::new();
        let second = ScreenCoordinator::new();
        root.push_screens(vec![first, second.clone()]);

        let stack = StackCoordinator::with_sequence(root);
        let path = stack.derive_path();
        assert_eq!(path.ids(), &[second.navigation_id()]);
    }

    #[test]
    fn pop_destroys_the_root_sequence() {
        let root = SequenceCoordinator::new();
        let screen = ScreenCoordinator::new();
        screen.set_view(crate::view::ViewValue::new("root"));
        root.push_screen(screen.clone());

        let stack = StackCoordinator::with_sequence(root.clone());
        stack.pop();

        assert!(stack.sequence().is_none());
        assert_eq!(root.count(), 0);
        assert!(screen.view().is_none());
    }

    #[test]
    fn stack_root_route_follows_the_presented_entity() {
        let stack = StackCoordinator::with_sequence(SequenceCoordinator::from_screen(
            ScreenCoordinator::new(),
        ));
        assert_eq!(stack.current_routes().len(), 1);
        assert_eq!(stack.current_routes()[0].transition, Transition::StackRoot);

        stack.presenting_slot().present_screen(
            ScreenCoordinator::new(),
            crate::coordinator::presentation::PresentationMode::Sheet,
        );
        let routes = stack.current_routes();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].transition, Transition::Sheet);
        assert_eq!(routes[1].transition, Transition::StackRoot);
    }
}
