//! Health check trait for the rendering engine.
//!
//! The engine lifecycle manager keeps a single long-lived engine and reuses
//! it across many short-lived work sessions. Before handing the cached
//! instance to another operation it pings it; a dead engine (crashed
//! process, lost DevTools connection) is discarded and a fresh one is
//! launched instead of surfacing a confusing mid-session failure.

use crate::error::Result;

/// Trait for engine-like objects that support health checking.
///
/// Implementors must provide a [`ping()`](Self::ping) method that verifies
/// the underlying process is still functional and responsive.
///
/// # Thread Safety
///
/// Requires `Send + Sync`: the engine is shared by all concurrent
/// operations and may be pinged from any of them.
///
/// # How It's Used
///
/// The [`EngineManager`](crate::engine::EngineManager) pings the cached
/// engine on the reuse path. A failed ping retires the instance and
/// triggers a relaunch; it is never handed to a work session.
pub trait Healthcheck: Send + Sync {
    /// Perform a health check.
    ///
    /// Should be a lightweight operation, like opening and closing a
    /// scratch tab, that proves the engine process is alive and its
    /// DevTools connection works.
    ///
    /// # Implementation Guidelines
    ///
    /// - **Keep it fast**: the check sits on the hot path of every reuse
    /// - **Don't hold locks**: release any locks before performing I/O
    /// - **Clean up**: close any tabs or resources created by the check
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::EngineUnavailable`](crate::ScoutError::EngineUnavailable)
    /// if the engine is unresponsive or crashed.
    fn ping(&self) -> Result<()>;
}
