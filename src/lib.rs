//! # navflow - Coordinator-Tree Navigation Engine
//!
//! A navigation-coordination framework for declarative, single-window UI
//! toolkits. Applications express their screen hierarchy (push/pop stacks,
//! modal presentation, and logical screen groupings) as a tree of
//! cooperating coordinator objects, decoupled from the views they display.
//! The engine tracks parent/child relationships, translates structural
//! mutations into the flattened path the host's native stack-navigation
//! control consumes, and tears subtrees down safely on removal.
//!
//! ## Architecture
//!
//! The library is organized into focused modules:
//!
//! - [`component`] - the shared identity/tag/routes capability
//! - [`coordinator`] - the three coordinator kinds and the links between them
//! - [`tree`] - route tree walking, lookup, and diagnostics
//! - [`host`] - path types exchanged with the host navigation control
//! - [`runtime`] - the single-threaded UI context and its timing constants
//! - [`error`] - centralized error types
//!
//! ## Threading model
//!
//! Every tree mutation, event propagation, path recomputation, and
//! presentation state change runs on one logical thread (the UI context).
//! Coordinator handles are `Rc`-based and deliberately `!Send`; asynchronous
//! work rejoins the UI context before touching coordinator state.

// Core modules
pub mod component;
pub mod error;
pub mod host;
pub mod id;
pub mod runtime;
pub mod tree;
pub mod view;

// Coordinator components
pub mod coordinator;

// Re-export commonly used types for convenience
pub use component::Component;
pub use coordinator::presentation::{PresentationMode, PresentationSlot};
pub use coordinator::screen::ScreenCoordinator;
pub use coordinator::sequence::SequenceCoordinator;
pub use coordinator::stack::StackCoordinator;
pub use coordinator::{Coordinator, Presented, SequenceChild};
pub use error::{NavError, Result};
pub use host::{HostPath, PathEncoding};
pub use id::CoordinatorId;
pub use runtime::UiRuntime;
pub use tree::{Route, Transition};
pub use view::ViewValue;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
