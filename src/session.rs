//! Per-request work sessions.
//!
//! This module provides [`WorkSession`], the disposable rendering context
//! one operation drives against one target. Sessions are created from the
//! shared engine, configured with a request-scoped identity (user-agent)
//! and viewport, and **always** closed before the operation returns:
//! explicitly on the normal path, and via `Drop` on every other path
//! (error, panic, operation deadline cancelling the future mid-flight).
//!
//! # Ownership
//!
//! A session is exclusively owned by one in-flight operation and never
//! shared. Creating sessions from a ready engine is safe to do
//! concurrently; only the engine *launch* is a critical section.
//!
//! # Usage Pattern
//!
//! ```rust,ignore
//! let session = WorkSession::open(engine.browser(), &config).await?;
//!
//! if let Err(e) = session.navigate(&url).await {
//!     // A timed-out navigation is a reported condition, not necessarily
//!     // fatal: the partially rendered document may still be extractable.
//!     log::warn!("navigation degraded: {}", e);
//! }
//!
//! let html = session.content().await?;
//! session.close().await; // Drop is the backstop if we never get here
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use headless_chrome::types::Bounds;
use headless_chrome::{Browser, Tab};

use crate::error::{Result, ScoutError};

/// Request-scoped session configuration.
///
/// Derived from [`ScoutConfig`](crate::ScoutConfig) by the facade; not
/// persisted state.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// User-agent string this session presents.
    pub user_agent: String,

    /// Viewport size (width, height).
    pub viewport: (u32, u32),

    /// Budget for a navigation to resolve its load signal.
    pub nav_timeout: Duration,
}

/// A disposable rendering context bound to one operation.
///
/// Wraps one browser tab. The tab is closed exactly once: by
/// [`close()`](Self::close) on the orderly path, or by `Drop` as the
/// unconditional backstop.
pub struct WorkSession {
    tab: Arc<Tab>,

    /// Session id for log correlation.
    id: u64,

    /// Set by whichever close path runs first.
    closed: Arc<AtomicBool>,
}

impl WorkSession {
    /// Open a new session from a ready engine.
    ///
    /// Creates a tab, sets the navigation default timeout, applies the
    /// identity string, and applies the viewport (best effort; a failed
    /// bounds call degrades rendering fidelity, not correctness).
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::EngineUnavailable`] if the tab cannot be
    /// created or configured; at that point the engine itself is suspect.
    pub(crate) async fn open(browser: &Arc<Browser>, config: &SessionConfig) -> Result<Self> {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);

        let browser = Arc::clone(browser);
        let config = config.clone();

        log::debug!("Opening work session {}...", id);

        let tab = tokio::task::spawn_blocking(move || -> Result<Arc<Tab>> {
            let tab = browser
                .new_tab()
                .map_err(|e| ScoutError::EngineUnavailable(format!("new_tab failed: {}", e)))?;

            tab.set_default_timeout(config.nav_timeout);

            tab.set_user_agent(&config.user_agent, None, None).map_err(|e| {
                let _ = tab.close(true); // Don't leak the half-configured tab
                ScoutError::EngineUnavailable(format!("set_user_agent failed: {}", e))
            })?;

            // Viewport is cosmetic for extraction; tolerate failure.
            let (width, height) = config.viewport;
            if let Err(e) = tab.set_bounds(Bounds::Normal {
                left: None,
                top: None,
                width: Some(width as f64),
                height: Some(height as f64),
            }) {
                log::debug!("Session viewport not applied: {}", e);
            }

            Ok(tab)
        })
        .await
        .map_err(|e| ScoutError::EngineUnavailable(format!("session open task panicked: {}", e)))??;

        log::debug!("✅ Work session {} open", id);

        Ok(Self {
            tab,
            id,
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Navigate to `target` and wait for the load signal.
    ///
    /// Resolves when navigation completes or the session's navigation
    /// budget elapses. A timeout here is reported as
    /// [`ScoutError::NavigationTimeout`] but is not necessarily fatal to
    /// the operation: callers are expected to attempt extraction against
    /// whatever partial document exists.
    pub async fn navigate(&self, target: &str) -> Result<()> {
        let tab = Arc::clone(&self.tab);
        let url = target.to_string();
        let id = self.id;

        log::debug!("Session {} navigating to {}", id, truncate_url(target, 120));

        let nav = tokio::task::spawn_blocking(move || {
            tab.navigate_to(&url)
                .and_then(|t| t.wait_until_navigated())
                .map(|_| ())
        })
        .await;

        match nav {
            Ok(Ok(())) => {
                log::debug!("Session {} navigation complete", id);
                Ok(())
            }
            Ok(Err(e)) => {
                log::warn!("⚠️ Session {} navigation did not complete: {}", id, e);
                Err(ScoutError::NavigationTimeout(e.to_string()))
            }
            Err(e) => Err(ScoutError::NavigationTimeout(format!(
                "navigation task panicked: {}",
                e
            ))),
        }
    }

    /// Fetch the rendered document as an HTML string.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::EngineUnavailable`] if the document cannot be
    /// read at all: the DevTools connection is gone, not merely slow.
    pub async fn content(&self) -> Result<String> {
        let tab = Arc::clone(&self.tab);

        tokio::task::spawn_blocking(move || tab.get_content())
            .await
            .map_err(|e| ScoutError::EngineUnavailable(format!("content task panicked: {}", e)))?
            .map_err(|e| ScoutError::EngineUnavailable(format!("content read failed: {}", e)))
    }

    /// Shared handle to the underlying tab, for the readiness probe.
    pub(crate) fn tab(&self) -> Arc<Tab> {
        Arc::clone(&self.tab)
    }

    /// Session id for log correlation.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Close the session.
    ///
    /// Closing is best effort (the tab's resources die with the engine in
    /// the worst case) and exactly-once: a later `Drop` becomes a no-op.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return; // Already closed
        }

        let tab = Arc::clone(&self.tab);
        let id = self.id;

        let result = tokio::task::spawn_blocking(move || tab.close(true)).await;

        match result {
            Ok(Ok(_)) => log::debug!("Session {} closed", id),
            Ok(Err(e)) => log::warn!(
                "⚠️ Session {} close failed (resources reclaimed with engine): {}",
                id,
                e
            ),
            Err(e) => log::warn!("⚠️ Session {} close task panicked: {}", id, e),
        }
    }
}

impl Drop for WorkSession {
    /// Unconditional backstop: if no close path ran (operation deadline
    /// cancelled the future, extraction panicked), release the tab now.
    fn drop(&mut self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            log::debug!("Session {} dropped without explicit close, closing now", self.id);
            if let Err(e) = self.tab.close(true) {
                log::warn!("⚠️ Session {} backstop close failed: {}", self.id, e);
            }
        }
    }
}

impl std::fmt::Debug for WorkSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkSession")
            .field("id", &self.id)
            .field("closed", &self.closed.load(Ordering::SeqCst))
            .finish()
    }
}

/// Truncate a URL for log output.
///
/// Search URLs carry percent-encoded user input and can get long.
fn truncate_url(url: &str, max_len: usize) -> String {
    if url.len() <= max_len {
        url.to_string()
    } else {
        format!("{}...", &url[..max_len])
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
