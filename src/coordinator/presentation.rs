//! Modal present/dismiss state machine.
//!
//! Shared by screen and stack hosts. The slot tracks what is presented and
//! whether the host should currently be showing it; before the owning view's
//! first appearance, intent is staged rather than applied, because the host
//! toolkit cannot reliably present against a container that has not finished
//! mounting. Once the host signals appearance, a fixed settling delay runs
//! out the mount/transition animation and the staged intent is applied
//! exactly once.

use crate::component::Component;
use crate::coordinator::screen::WeakScreen;
use crate::coordinator::stack::WeakStack;
use crate::coordinator::Presented;
use crate::id::CoordinatorId;
use crate::runtime;
use crate::tree::{Route, Transition};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// How the presented entity is shown by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationMode {
    Sheet,
    Fullscreen,
}

impl PresentationMode {
    pub(crate) fn transition(self) -> Transition {
        match self {
            PresentationMode::Sheet => Transition::Sheet,
            PresentationMode::Fullscreen => Transition::Fullscreen,
        }
    }
}

/// Non-owning reference back to the component that owns this slot.
#[derive(Debug, Clone)]
pub(crate) enum SlotParent {
    Screen(WeakScreen),
    Stack(WeakStack),
}

#[derive(Debug)]
struct SlotState {
    presented: Option<Presented>,
    is_presenting: bool,
    /// Intent staged while the owning view has not yet appeared.
    staged_is_presenting: bool,
    mode: PresentationMode,
    parent_has_appeared: bool,
    parent: Option<SlotParent>,
}

/// The modal presentation slot attached to a screen or stack.
#[derive(Debug, Clone)]
pub struct PresentationSlot {
    inner: Rc<RefCell<SlotState>>,
}

impl PresentationSlot {
    pub(crate) fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SlotState {
                presented: None,
                is_presenting: false,
                staged_is_presenting: false,
                mode: PresentationMode::Sheet,
                parent_has_appeared: false,
                parent: None,
            })),
        }
    }

    pub(crate) fn set_parent_screen(&self, screen: WeakScreen) {
        self.inner.borrow_mut().parent = Some(SlotParent::Screen(screen));
    }

    pub(crate) fn set_parent_stack(&self, stack: WeakStack) {
        self.inner.borrow_mut().parent = Some(SlotParent::Stack(stack));
    }

    /// Present a lone screen modally.
    pub fn present_screen(&self, screen: super::screen::ScreenCoordinator, mode: PresentationMode) {
        self.present(Presented::Screen(screen), mode);
    }

    /// Present a whole stack modally.
    pub fn present_stack(&self, stack: super::stack::StackCoordinator, mode: PresentationMode) {
        self.present(Presented::Stack(stack), mode);
    }

    /// Exactly one entity is presented at a time; presenting again before a
    /// dismiss replaces the previous entity outright (last write wins).
    fn present(&self, entity: Presented, mode: PresentationMode) {
        let entity_id = entity.navigation_id();
        let replaced = {
            let mut state = self.inner.borrow_mut();
            state.mode = mode;
            if state.parent_has_appeared {
                state.is_presenting = true;
            } else {
                state.staged_is_presenting = true;
            }
            state.presented.replace(entity)
        };
        debug!(
            "presentation slot of {:?}: presenting {entity_id} as {mode:?}",
            self.owner_id()
        );
        if let Some(previous) = replaced {
            if previous.navigation_id() != entity_id {
                previous.destroy();
            }
        }
    }

    /// Dismiss whatever is presented. Symmetric with `present`: flips the
    /// presenting flag immediately after first appearance, stages the negated
    /// intent before it.
    pub fn dismiss(&self) {
        let removed = {
            let mut state = self.inner.borrow_mut();
            if state.parent_has_appeared {
                state.is_presenting = false;
            } else {
                state.staged_is_presenting = false;
            }
            state.presented.take()
        };
        if let Some(entity) = removed {
            debug!("presentation slot: dismissed {}", entity.navigation_id());
            entity.destroy();
        }
    }

    /// Host signal: the owning view completed an appearance. After the
    /// settling delay any staged intent is applied, exactly once across
    /// repeated appearances.
    pub fn notify_appeared(&self) {
        let weak = Rc::downgrade(&self.inner);
        runtime::spawn_ui(async move {
            tokio::time::sleep(runtime::PRESENTATION_SETTLE).await;
            if let Some(inner) = weak.upgrade() {
                let mut state = inner.borrow_mut();
                if !state.parent_has_appeared {
                    state.parent_has_appeared = true;
                    state.is_presenting = state.staged_is_presenting;
                }
            }
        });
    }

    /// Host signal: the user dismissed the presentation (e.g. sheet swipe).
    /// Destroys the presented entity's subtree and clears the slot.
    pub fn notify_dismissed(&self) {
        let removed = {
            let mut state = self.inner.borrow_mut();
            state.is_presenting = false;
            state.staged_is_presenting = false;
            state.presented.take()
        };
        if let Some(entity) = removed {
            debug!(
                "presentation slot: host dismissed {}, destroying subtree",
                entity.navigation_id()
            );
            entity.destroy();
        }
    }

    /// Whether the host should currently be showing the presentation.
    pub fn is_presenting(&self) -> bool {
        self.inner.borrow().is_presenting
    }

    /// The currently presented entity, if any.
    pub fn presented(&self) -> Option<Presented> {
        self.inner.borrow().presented.clone()
    }

    pub fn mode(&self) -> PresentationMode {
        self.inner.borrow().mode
    }

    /// The structural edge this slot currently contributes, if any.
    pub(crate) fn current_route(&self) -> Option<Route> {
        let state = self.inner.borrow();
        state.presented.as_ref().map(|entity| Route {
            coordinator: entity.coordinator(),
            transition: state.mode.transition(),
        })
    }

    pub(crate) fn owner_id(&self) -> Option<CoordinatorId> {
        let parent = self.inner.borrow().parent.clone();
        match parent {
            Some(SlotParent::Screen(screen)) => {
                screen.upgrade().map(|screen| screen.navigation_id())
            }
            Some(SlotParent::Stack(stack)) => stack.upgrade().map(|stack| stack.navigation_id()),
            None => None,
        }
    }

    /// Structural teardown: the presented subtree goes with the owner.
    pub(crate) fn destroy(&self) {
        let removed = {
            let mut state = self.inner.borrow_mut();
            state.parent = None;
            state.is_presenting = false;
            state.staged_is_presenting = false;
            state.presented.take()
        };
        if let Some(entity) = removed {
            entity.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::screen::ScreenCoordinator;

    #[test]
    fn second_present_replaces_the_first_outright() {
        let slot = PresentationSlot::new();
        let first = ScreenCoordinator::new();
        let second = ScreenCoordinator::new();

        slot.present_screen(first.clone(), PresentationMode::Sheet);
        slot.present_screen(second.clone(), PresentationMode::Sheet);

        let presented = slot.presented().expect("entity presented");
        assert_eq!(presented.navigation_id(), second.navigation_id());
    }

    #[test]
    fn intent_is_staged_until_first_appearance() {
        let slot = PresentationSlot::new();
        let screen = ScreenCoordinator::new();

        slot.present_screen(screen, PresentationMode::Fullscreen);
        // The owning view has not appeared; the host must not present yet.
        assert!(!slot.is_presenting());
        assert!(slot.presented().is_some());
        assert_eq!(slot.mode(), PresentationMode::Fullscreen);
    }

    #[test]
    fn dismiss_before_appearance_cancels_staged_intent() {
        let slot = PresentationSlot::new();
        slot.present_screen(ScreenCoordinator::new(), PresentationMode::Sheet);
        slot.dismiss();

        assert!(!slot.is_presenting());
        assert!(slot.presented().is_none());
    }

    #[test]
    fn owner_id_resolves_through_the_back_pointer() {
        let screen = ScreenCoordinator::new();
        let slot = screen.presenting_slot();
        assert_eq!(slot.owner_id(), Some(screen.navigation_id()));

        // A detached slot has no owner to report.
        assert_eq!(PresentationSlot::new().owner_id(), None);
    }

    #[test]
    fn host_dismissal_clears_the_slot() {
        let slot = PresentationSlot::new();
        let screen = ScreenCoordinator::new();
        screen.set_view(crate::view::ViewValue::new("modal"));
        slot.present_screen(screen.clone(), PresentationMode::Sheet);

        slot.notify_dismissed();

        assert!(slot.presented().is_none());
        assert!(!slot.is_presenting());
        // The presented subtree was destroyed, not merely detached.
        assert!(screen.view().is_none());
    }
}
