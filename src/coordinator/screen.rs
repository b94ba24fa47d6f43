//! Screen coordinator: the leaf unit of the tree.
//!
//! Owns one opaque view value and, lazily, a presentation slot. Composite
//! screens may embed other coordinators as fixed substructure; those appear
//! as subview routes, unless a presentation is active, in which case the
//! presented entity masks the subviews entirely.

use crate::component::Component;
use crate::coordinator::presentation::PresentationSlot;
use crate::coordinator::Coordinator;
use crate::id::CoordinatorId;
use crate::runtime;
use crate::tree::{Route, Transition};
use crate::view::ViewValue;
use log::debug;
use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::rc::{Rc, Weak};

const DEFAULT_TAG: &str = "SCREEN";

struct ScreenComponent {
    id: CoordinatorId,
    tag: String,
    view: Option<ViewValue>,
    /// Created lazily on first use.
    slot: Option<PresentationSlot>,
    /// Embedded coordinators for composite screens. Application-owned:
    /// destroy releases the references without tearing the subtrees down.
    subviews: Vec<Coordinator>,
}

/// Handle to a screen coordinator component.
#[derive(Clone)]
pub struct ScreenCoordinator {
    inner: Rc<RefCell<ScreenComponent>>,
}

/// Non-owning screen reference (presentation-slot back-pointer).
#[derive(Debug, Clone)]
pub(crate) struct WeakScreen(Weak<RefCell<ScreenComponent>>);

impl WeakScreen {
    pub(crate) fn upgrade(&self) -> Option<ScreenCoordinator> {
        self.0.upgrade().map(|inner| ScreenCoordinator { inner })
    }
}

impl ScreenCoordinator {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ScreenComponent {
                id: CoordinatorId::generate(),
                tag: DEFAULT_TAG.to_string(),
                view: None,
                slot: None,
                subviews: Vec::new(),
            })),
        }
    }

    /// Screen displaying the given view value.
    pub fn with_view(view: ViewValue) -> Self {
        let screen = Self::new();
        screen.set_view(view);
        screen
    }

    /// Screen whose real content is produced asynchronously.
    ///
    /// Shows `loading_view` until `load` resolves on the UI context, then
    /// embeds the loaded coordinator and drops the loading view. The
    /// suspension happens before the loaded node joins the live tree.
    pub fn loaded_async<F>(loading_view: ViewValue, load: F) -> Self
    where
        F: Future<Output = Coordinator> + 'static,
    {
        let screen = Self::with_view(loading_view);
        let weak = screen.downgrade();
        runtime::spawn_ui(async move {
            let coordinator = load.await;
            if let Some(screen) = weak.upgrade() {
                debug!(
                    "screen {}: async content loaded ({})",
                    screen.navigation_id(),
                    coordinator.kind()
                );
                screen.set_embedded(coordinator);
            }
        });
        screen
    }

    /// Replace the displayed view wholesale.
    pub fn set_view(&self, view: ViewValue) {
        self.inner.borrow_mut().view = Some(view);
    }

    /// The currently held view value, if any. `None` after destruction.
    pub fn view(&self) -> Option<ViewValue> {
        self.inner.borrow().view.clone()
    }

    /// The presentation slot, created lazily on first access.
    pub fn presenting_slot(&self) -> PresentationSlot {
        let existing = self.inner.borrow().slot.clone();
        match existing {
            Some(slot) => slot,
            None => {
                let slot = PresentationSlot::new();
                slot.set_parent_screen(self.downgrade());
                self.inner.borrow_mut().slot = Some(slot.clone());
                slot
            }
        }
    }

    /// Embed another view-bearing coordinator as this screen's content
    /// (wrapper screens). Replaces any previous embedding; the screen's own
    /// view is cleared so the host renders the subview edge instead.
    pub fn set_embedded(&self, coordinator: Coordinator) {
        let mut component = self.inner.borrow_mut();
        component.subviews.clear();
        component.subviews.push(coordinator);
        component.view = None;
    }

    /// Drop any embedding and show a plain view again.
    pub fn set_plain_view(&self, view: ViewValue) {
        let mut component = self.inner.borrow_mut();
        component.subviews.clear();
        component.view = Some(view);
    }

    /// The embedded coordinator, when this screen wraps one.
    pub fn embedded(&self) -> Option<Coordinator> {
        self.inner.borrow().subviews.first().cloned()
    }

    /// Declare fixed substructure for a composite screen.
    pub fn set_subviews(&self, subviews: Vec<Coordinator>) {
        self.inner.borrow_mut().subviews = subviews;
    }

    pub fn subviews(&self) -> Vec<Coordinator> {
        self.inner.borrow().subviews.clone()
    }

    pub(crate) fn downgrade(&self) -> WeakScreen {
        WeakScreen(Rc::downgrade(&self.inner))
    }

    /// Clear display state and release subview references. Subview children
    /// are application-owned and are not destroyed structurally; the
    /// presentation slot is structural and goes down with the screen.
    pub(crate) fn destroy(&self) {
        let slot = {
            let mut component = self.inner.borrow_mut();
            component.view = None;
            component.subviews.clear();
            component.slot.take()
        };
        if let Some(slot) = slot {
            slot.destroy();
        }
    }
}

impl Default for ScreenCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ScreenCoordinator {
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
        // An active presentation masks the subview edges, never both.
        let component = self.inner.borrow();
        if let Some(slot) = &component.slot {
            if let Some(route) = slot.current_route() {
                return vec![route];
            }
        }
        component
            .subviews
            .iter()
            .map(|coordinator| Route {
                coordinator: coordinator.clone(),
                transition: Transition::Subview,
            })
            .collect()
    }
}

impl PartialEq for ScreenCoordinator {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ScreenCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(component) => f
                .debug_struct("ScreenCoordinator")
                .field("id", &component.id)
                .field("tag", &component.tag)
                .finish(),
            Err(_) => f.write_str("ScreenCoordinator(<borrowed>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::presentation::PresentationMode;

    #[test]
    fn presentation_masks_subviews() {
        let screen = ScreenCoordinator::new();
        let embedded = ScreenCoordinator::new();
        screen.set_subviews(vec![Coordinator::Screen(embedded.clone())]);

        assert_eq!(screen.current_routes().len(), 1);
        assert_eq!(screen.current_routes()[0].transition, Transition::Subview);

        let modal = ScreenCoordinator::new();
        screen
            .presenting_slot()
            .present_screen(modal.clone(), PresentationMode::Sheet);

        let routes = screen.current_routes();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].transition, Transition::Sheet);
        assert_eq!(routes[0].coordinator.navigation_id(), modal.navigation_id());

        screen.presenting_slot().dismiss();
        assert_eq!(screen.current_routes()[0].transition, Transition::Subview);
    }

    #[test]
    fn slot_is_created_once() {
        let screen = ScreenCoordinator::new();
        let first = screen.presenting_slot();
        first.present_screen(ScreenCoordinator::new(), PresentationMode::Sheet);
        // The second access must observe the same slot state.
        assert!(screen.presenting_slot().presented().is_some());
    }

    #[test]
    fn destroy_clears_view_and_subview_references() {
        let screen = ScreenCoordinator::new();
        screen.set_view(ViewValue::new("content"));
        let embedded = ScreenCoordinator::new();
        embedded.set_view(ViewValue::new("embedded"));
        screen.set_subviews(vec![Coordinator::Screen(embedded.clone())]);

        screen.destroy();

        assert!(screen.view().is_none());
        assert!(screen.subviews().is_empty());
        // Subview children are application-owned and survive.
        assert!(embedded.view().is_some());
    }

    #[test]
    fn wrapper_embedding_replaces_plain_view() {
        let screen = ScreenCoordinator::with_view(ViewValue::new("plain"));
        let wrapped = ScreenCoordinator::new();
        screen.set_embedded(Coordinator::Screen(wrapped.clone()));

        assert!(screen.view().is_none());
        assert_eq!(
            screen.embedded().map(|c| c.navigation_id()),
            Some(wrapped.navigation_id())
        );

        screen.set_plain_view(ViewValue::new("plain again"));
        assert!(screen.embedded().is_none());
        assert!(screen.view().is_some());
    }
}
