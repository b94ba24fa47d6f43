//! Coordinator kinds and the links between them.
//!
//! Three kinds compose recursively: a screen owns one view and an optional
//! modal slot, a sequence owns an ordered child list, and a stack hosts a
//! root sequence through the host's push-navigation control. Code that must
//! branch on kind does so over the [`Coordinator`] sum type; per-kind
//! behavior lives in the dedicated component modules.

pub mod presentation;
pub mod screen;
pub mod sequence;
pub mod stack;

use crate::component::Component;
use crate::id::CoordinatorId;
use crate::tree::Route;
use screen::ScreenCoordinator;
use sequence::{SequenceCoordinator, WeakSequence};
use stack::{StackCoordinator, WeakStack};

/// Any node of the coordinator tree.
#[derive(Debug, Clone)]
pub enum Coordinator {
    Screen(ScreenCoordinator),
    Sequence(SequenceCoordinator),
    Stack(StackCoordinator),
}

impl Coordinator {
    /// Short kind name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Coordinator::Screen(_) => "screen",
            Coordinator::Sequence(_) => "sequence",
            Coordinator::Stack(_) => "stack",
        }
    }

    pub fn as_screen(&self) -> Option<&ScreenCoordinator> {
        match self {
            Coordinator::Screen(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&SequenceCoordinator> {
        match self {
            Coordinator::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    pub fn as_stack(&self) -> Option<&StackCoordinator> {
        match self {
            Coordinator::Stack(stack) => Some(stack),
            _ => None,
        }
    }
}

impl Component for Coordinator {
    fn navigation_id(&self) -> CoordinatorId {
        match self {
            Coordinator::Screen(screen) => screen.navigation_id(),
            Coordinator::Sequence(sequence) => sequence.navigation_id(),
            Coordinator::Stack(stack) => stack.navigation_id(),
        }
    }

    fn tag(&self) -> String {
        match self {
            Coordinator::Screen(screen) => screen.tag(),
            Coordinator::Sequence(sequence) => sequence.tag(),
            Coordinator::Stack(stack) => stack.tag(),
        }
    }

    fn set_tag(&self, tag: &str) {
        match self {
            Coordinator::Screen(screen) => screen.set_tag(tag),
            Coordinator::Sequence(sequence) => sequence.set_tag(tag),
            Coordinator::Stack(stack) => stack.set_tag(tag),
        }
    }

    fn current_routes(&self) -> Vec<Route> {
        match self {
            Coordinator::Screen(screen) => screen.current_routes(),
            Coordinator::Sequence(sequence) => sequence.current_routes(),
            Coordinator::Stack(stack) => stack.current_routes(),
        }
    }
}

impl From<ScreenCoordinator> for Coordinator {
    fn from(screen: ScreenCoordinator) -> Self {
        Coordinator::Screen(screen)
    }
}

impl From<SequenceCoordinator> for Coordinator {
    fn from(sequence: SequenceCoordinator) -> Self {
        Coordinator::Sequence(sequence)
    }
}

impl From<StackCoordinator> for Coordinator {
    fn from(stack: StackCoordinator) -> Self {
        Coordinator::Stack(stack)
    }
}

/// A sequence's child slot: either a screen or a nested sequence.
#[derive(Debug, Clone)]
pub enum SequenceChild {
    Screen(ScreenCoordinator),
    Sequence(SequenceCoordinator),
}

impl SequenceChild {
    pub fn navigation_id(&self) -> CoordinatorId {
        match self {
            SequenceChild::Screen(screen) => screen.navigation_id(),
            SequenceChild::Sequence(sequence) => sequence.navigation_id(),
        }
    }

    pub fn coordinator(&self) -> Coordinator {
        match self {
            SequenceChild::Screen(screen) => Coordinator::Screen(screen.clone()),
            SequenceChild::Sequence(sequence) => Coordinator::Sequence(sequence.clone()),
        }
    }
}

impl From<ScreenCoordinator> for SequenceChild {
    fn from(screen: ScreenCoordinator) -> Self {
        SequenceChild::Screen(screen)
    }
}

impl From<SequenceCoordinator> for SequenceChild {
    fn from(sequence: SequenceCoordinator) -> Self {
        SequenceChild::Sequence(sequence)
    }
}

/// What a presentation slot can hold: a lone screen or a whole stack.
#[derive(Debug, Clone)]
pub enum Presented {
    Screen(ScreenCoordinator),
    Stack(StackCoordinator),
}

impl Presented {
    pub fn navigation_id(&self) -> CoordinatorId {
        match self {
            Presented::Screen(screen) => screen.navigation_id(),
            Presented::Stack(stack) => stack.navigation_id(),
        }
    }

    pub fn coordinator(&self) -> Coordinator {
        match self {
            Presented::Screen(screen) => Coordinator::Screen(screen.clone()),
            Presented::Stack(stack) => Coordinator::Stack(stack.clone()),
        }
    }

    pub(crate) fn destroy(&self) {
        match self {
            Presented::Screen(screen) => screen.destroy(),
            Presented::Stack(stack) => stack.destroy(),
        }
    }
}

/// Structural-change notifications bubbled from a sequence up the parent
/// chain to the nearest stack, the only component that can recompute a
/// host-visible path.
#[derive(Debug, Clone)]
pub(crate) enum NavigationEvent {
    /// The visible tree shape changed; the host path must be re-derived.
    PathUpdateNeeded,
    /// The named subtree roots must be destroyed and spliced out.
    RemoveCoordinatorsNeeded(Vec<CoordinatorId>),
}

/// Non-owning back-reference from a sequence to whichever parent holds it.
/// Weak by construction: parents own children, never the reverse.
#[derive(Debug, Clone)]
pub(crate) enum ParentLink {
    Stack(WeakStack),
    Sequence(WeakSequence),
}
