//! Sequence coordinator: the child-list engine.
//!
//! A sequence owns an ordered list of screens and nested sequences
//! (insertion order = display order = back-stack order) and propagates
//! structural-change notifications up the parent chain to the nearest stack,
//! which is the only component able to recompute a host-visible path. A
//! sequence with no parent drops events silently; that is the expected state
//! during construction, before attachment.

use crate::component::Component;
use crate::coordinator::{NavigationEvent, ParentLink, SequenceChild};
use crate::host::PathEncoding;
use crate::id::CoordinatorId;
use crate::tree::{Route, Transition};
use log::{debug, trace};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

const DEFAULT_TAG: &str = "SEQUENCE";

struct SequenceComponent {
    id: CoordinatorId,
    tag: String,
    parent: Option<ParentLink>,
    children: Vec<SequenceChild>,
}

/// Handle to a sequence coordinator component.
#[derive(Clone)]
pub struct SequenceCoordinator {
    inner: Rc<RefCell<SequenceComponent>>,
}

/// Non-owning sequence reference (parent back-pointer).
#[derive(Debug, Clone)]
pub(crate) struct WeakSequence(Weak<RefCell<SequenceComponent>>);

impl WeakSequence {
    pub(crate) fn upgrade(&self) -> Option<SequenceCoordinator> {
        self.0.upgrade().map(|inner| SequenceCoordinator { inner })
    }
}

impl SequenceCoordinator {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SequenceComponent {
                id: CoordinatorId::generate(),
                tag: DEFAULT_TAG.to_string(),
                parent: None,
                children: Vec::new(),
            })),
        }
    }

    /// Sequence starting out with a single screen.
    pub fn from_screen(screen: super::screen::ScreenCoordinator) -> Self {
        let sequence = Self::new();
        sequence.set_screen(screen);
        sequence
    }

    /// Sequence starting out with the given screens, in order.
    pub fn from_screens(screens: Vec<super::screen::ScreenCoordinator>) -> Self {
        let sequence = Self::new();
        sequence.set_screens(screens);
        sequence
    }

    /// Sequence starting out with one nested sequence.
    pub fn from_sequence(nested: SequenceCoordinator) -> Self {
        let sequence = Self::new();
        sequence.set_sequence(nested);
        sequence
    }

    /// Append a screen to the back-stack.
    pub fn push_screen(&self, screen: super::screen::ScreenCoordinator) {
        self.inner
            .borrow_mut()
            .children
            .push(SequenceChild::Screen(screen));
        self.send_event(NavigationEvent::PathUpdateNeeded);
    }

    /// Append several screens, preserving order.
    pub fn push_screens(&self, screens: Vec<super::screen::ScreenCoordinator>) {
        {
            let mut component = self.inner.borrow_mut();
            for screen in screens {
                component.children.push(SequenceChild::Screen(screen));
            }
        }
        self.send_event(NavigationEvent::PathUpdateNeeded);
    }

    /// Append a nested sequence. The nested sequence's parent becomes this
    /// sequence (direct-parent only; event propagation walks the chain
    /// dynamically).
    pub fn push_sequence(&self, sequence: SequenceCoordinator) {
        sequence.set_parent(ParentLink::Sequence(self.downgrade()));
        self.inner
            .borrow_mut()
            .children
            .push(SequenceChild::Sequence(sequence));
        self.send_event(NavigationEvent::PathUpdateNeeded);
    }

    /// Append a mixed batch of children.
    pub fn push_children(&self, children: Vec<SequenceChild>) {
        {
            let mut component = self.inner.borrow_mut();
            for child in children {
                if let SequenceChild::Sequence(sequence) = &child {
                    sequence.set_parent(ParentLink::Sequence(self.downgrade()));
                }
                component.children.push(child);
            }
        }
        self.send_event(NavigationEvent::PathUpdateNeeded);
    }

    /// Remove the last child from the back-stack.
    pub fn pop(&self) {
        self.pop_count(1);
    }

    /// Remove the trailing `count` children. No-op when `count` is zero or
    /// would remove every child (guards against popping everything).
    pub fn pop_count(&self, count: usize) {
        let removed: Vec<CoordinatorId> = {
            let component = self.inner.borrow();
            if count == 0 || count >= component.children.len() {
                return;
            }
            let keep = component.children.len() - count;
            component.children[keep..]
                .iter()
                .map(SequenceChild::navigation_id)
                .collect()
        };
        trace!("sequence {}: pop {count} -> {removed:?}", self.navigation_id());
        self.send_event(NavigationEvent::RemoveCoordinatorsNeeded(removed));
        self.send_event(NavigationEvent::PathUpdateNeeded);
    }

    /// Collapse back to the first child.
    pub fn pop_to_first(&self) {
        let count = self.count().saturating_sub(1);
        self.pop_count(count);
    }

    /// Remove one specific child by identity, wherever it sits in the list.
    /// No-op when absent.
    pub fn pop_id(&self, id: CoordinatorId) {
        let present = self
            .inner
            .borrow()
            .children
            .iter()
            .any(|child| child.navigation_id() == id);
        if !present {
            return;
        }
        self.send_event(NavigationEvent::RemoveCoordinatorsNeeded(vec![id]));
        self.send_event(NavigationEvent::PathUpdateNeeded);
    }

    /// Remove one specific screen child.
    pub fn pop_screen(&self, screen: &super::screen::ScreenCoordinator) {
        self.pop_id(screen.navigation_id());
    }

    /// Remove one specific nested sequence.
    pub fn pop_sequence(&self, sequence: &SequenceCoordinator) {
        self.pop_id(sequence.navigation_id());
    }

    /// Replace the visible content with a single screen.
    pub fn set_screen(&self, screen: super::screen::ScreenCoordinator) {
        self.set_screens(vec![screen]);
    }

    /// Replace the visible content with the given screens.
    ///
    /// The new children are appended *before* the old ones are announced for
    /// removal, so the receiving stack can resolve both old and new
    /// identities in the same notification pass and compute a single host
    /// path transition. Load-bearing ordering; do not "simplify" to
    /// clear-then-append.
    pub fn set_screens(&self, screens: Vec<super::screen::ScreenCoordinator>) {
        let removed: Vec<CoordinatorId> = {
            let mut component = self.inner.borrow_mut();
            let removed = component
                .children
                .iter()
                .map(SequenceChild::navigation_id)
                .collect();
            for screen in screens {
                component.children.push(SequenceChild::Screen(screen));
            }
            removed
        };
        self.send_event(NavigationEvent::RemoveCoordinatorsNeeded(removed));
        self.send_event(NavigationEvent::PathUpdateNeeded);
    }

    /// Replace the visible content with a nested sequence.
    pub fn set_sequence(&self, sequence: SequenceCoordinator) {
        sequence.set_parent(ParentLink::Sequence(self.downgrade()));
        let removed: Vec<CoordinatorId> = {
            let mut component = self.inner.borrow_mut();
            let removed = component
                .children
                .iter()
                .map(SequenceChild::navigation_id)
                .collect();
            component.children.push(SequenceChild::Sequence(sequence));
            removed
        };
        self.send_event(NavigationEvent::RemoveCoordinatorsNeeded(removed));
        self.send_event(NavigationEvent::PathUpdateNeeded);
    }

    /// Replace the visible content with a mixed batch of children.
    pub fn set_children(&self, children: Vec<SequenceChild>) {
        let removed: Vec<CoordinatorId> = {
            let mut component = self.inner.borrow_mut();
            let removed = component
                .children
                .iter()
                .map(SequenceChild::navigation_id)
                .collect();
            for child in children {
                if let SequenceChild::Sequence(sequence) = &child {
                    sequence.set_parent(ParentLink::Sequence(self.downgrade()));
                }
                component.children.push(child);
            }
            removed
        };
        self.send_event(NavigationEvent::RemoveCoordinatorsNeeded(removed));
        self.send_event(NavigationEvent::PathUpdateNeeded);
    }

    /// Number of children.
    pub fn count(&self) -> usize {
        self.inner.borrow().children.len()
    }

    /// Snapshot of the children's identities, in display order.
    pub fn children_ids(&self) -> Vec<CoordinatorId> {
        self.inner
            .borrow()
            .children
            .iter()
            .map(SequenceChild::navigation_id)
            .collect()
    }

    /// Snapshot of the child list.
    pub fn children(&self) -> Vec<SequenceChild> {
        self.inner.borrow().children.clone()
    }

    pub(crate) fn set_parent(&self, parent: ParentLink) {
        self.inner.borrow_mut().parent = Some(parent);
    }

    pub(crate) fn downgrade(&self) -> WeakSequence {
        WeakSequence(Rc::downgrade(&self.inner))
    }

    /// Destroy and splice out every child not visible in the host path
    /// encoding, walking tail-to-head so indices stay valid as items are
    /// removed. Returns whether any child remains visible.
    pub(crate) fn remove_unused(&self, encoding: &PathEncoding) -> bool {
        let mut any_visible = false;
        let mut index = self.inner.borrow().children.len();
        while index > 0 {
            index -= 1;
            let child = self.inner.borrow().children[index].clone();
            match child {
                SequenceChild::Screen(screen) => {
                    if encoding.contains(screen.navigation_id()) {
                        any_visible = true;
                    } else {
                        self.remove_child(screen.navigation_id());
                        screen.destroy();
                    }
                }
                SequenceChild::Sequence(sequence) => {
                    if sequence.remove_unused(encoding) {
                        any_visible = true;
                    } else {
                        self.remove_child(sequence.navigation_id());
                        sequence.destroy();
                    }
                }
            }
        }
        any_visible
    }

    /// Destroy and splice out every child named in `ids`, plus any nested
    /// sequence that ends up fully drained. Returns whether every original
    /// child ended up destroyed.
    pub(crate) fn remove_coordinators(&self, ids: &[CoordinatorId]) -> bool {
        let mut all_destroyed = true;
        let mut index = self.inner.borrow().children.len();
        while index > 0 {
            index -= 1;
            let child = self.inner.borrow().children[index].clone();
            match child {
                SequenceChild::Screen(screen) => {
                    if ids.contains(&screen.navigation_id()) {
                        screen.destroy();
                        self.remove_child(screen.navigation_id());
                    } else {
                        all_destroyed = false;
                    }
                }
                SequenceChild::Sequence(sequence) => {
                    let named = ids.contains(&sequence.navigation_id());
                    let drained = sequence.remove_coordinators(ids);
                    if named || drained {
                        sequence.destroy();
                        self.remove_child(sequence.navigation_id());
                    } else {
                        all_destroyed = false;
                    }
                }
            }
        }
        all_destroyed
    }

    /// Detach from the parent and recursively destroy every child.
    /// Idempotent.
    pub(crate) fn destroy(&self) {
        let children = {
            let mut component = self.inner.borrow_mut();
            component.parent = None;
            std::mem::take(&mut component.children)
        };
        if !children.is_empty() {
            debug!(
                "sequence {}: destroying {} children",
                self.navigation_id(),
                children.len()
            );
        }
        for child in children {
            match child {
                SequenceChild::Screen(screen) => screen.destroy(),
                SequenceChild::Sequence(sequence) => sequence.destroy(),
            }
        }
    }

    /// Forward an event up the parent chain until it reaches a stack.
    /// Detached sequences drop events silently.
    fn send_event(&self, event: NavigationEvent) {
        let mut parent = self.inner.borrow().parent.clone();
        loop {
            match parent {
                Some(ParentLink::Stack(stack)) => {
                    if let Some(stack) = stack.upgrade() {
                        stack.event_received(event);
                    }
                    return;
                }
                Some(ParentLink::Sequence(sequence)) => match sequence.upgrade() {
                    Some(sequence) => parent = sequence.inner.borrow().parent.clone(),
                    None => return,
                },
                None => return,
            }
        }
    }

    fn remove_child(&self, id: CoordinatorId) {
        self.inner
            .borrow_mut()
            .children
            .retain(|child| child.navigation_id() != id);
    }

    #[cfg(test)]
    pub(crate) fn has_parent(&self) -> bool {
        self.inner.borrow().parent.is_some()
    }
}

impl Default for SequenceCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SequenceCoordinator {
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
        self.inner
            .borrow()
            .children
            .iter()
            .map(|child| Route {
                coordinator: child.coordinator(),
                transition: Transition::Push,
            })
            .collect()
    }
}

impl PartialEq for SequenceCoordinator {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for SequenceCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(component) => f
                .debug_struct("SequenceCoordinator")
                .field("id", &component.id)
                .field("tag", &component.tag)
                .field("children", &component.children.len())
                .finish(),
            Err(_) => f.write_str("SequenceCoordinator(<borrowed>)"),
        }
    }
}
