//! Single-threaded UI context glue.
//!
//! All coordinator-tree mutation, event propagation, path recomputation, and
//! presentation state run on one logical thread. Hosts that already own a
//! single-threaded executor only need [`spawn_ui`]; standalone callers (and
//! the test suites) wrap a current-thread tokio runtime plus a `LocalSet` in
//! [`UiRuntime`]. Coordinator state is `Rc`/`RefCell` based and must never
//! leave this context.

use crate::error::{NavError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::task::LocalSet;

/// Delay before a scheduled path recomputation runs, coalescing bursts of
/// structural mutations into a single host update.
pub const PATH_COALESCE_TICK: Duration = Duration::from_millis(1);

/// Settling delay after an appearance signal before staged presentation
/// intent is applied. Must outlast the host's mount/transition animation;
/// presenting against a container that has not finished mounting is
/// unreliable in the host toolkit.
pub const PRESENTATION_SETTLE: Duration = Duration::from_millis(500);

/// Schedule a continuation on the UI context.
///
/// Must be called from within the UI context (inside [`UiRuntime::block_on`]
/// or the host's own `LocalSet`); the future is `!Send` by design.
pub fn spawn_ui<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    tokio::task::spawn_local(future);
}

/// A self-contained single-threaded UI context.
pub struct UiRuntime {
    runtime: tokio::runtime::Runtime,
}

impl UiRuntime {
    /// Build a current-thread runtime with timers enabled.
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(NavError::runtime)?;
        Ok(Self { runtime })
    }

    /// Run a future to completion on the UI context, driving any scheduled
    /// continuations (path recomputation, presentation settling) alongside.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        let local = LocalSet::new();
        self.runtime.block_on(local.run_until(future))
    }
}
