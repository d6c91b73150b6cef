//! Tracked engine instance with metadata for lifecycle management.
//!
//! This module provides [`TrackedEngine`], which wraps the shared
//! [`Browser`] instance with tracking information:
//!
//! - **Generation id**: monotonically increasing launch counter, so log
//!   lines can distinguish "the engine" across relaunches
//! - **Launch timestamp**: for uptime reporting
//!
//! Users never see this type directly; work sessions are opened against it
//! by the orchestration facade.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use headless_chrome::Browser;

use crate::error::{Result, ScoutError};
use crate::traits::Healthcheck;

/// The shared rendering engine with lifecycle metadata.
///
/// Clones share the underlying [`Browser`]; the engine process dies when
/// the last clone (held by the
/// [`EngineManager`](crate::engine::EngineManager) or by an in-flight
/// operation) is dropped.
#[derive(Clone)]
pub(crate) struct TrackedEngine {
    /// Launch generation, assigned sequentially across relaunches.
    generation: u64,

    /// The actual headless browser instance (ref-counted).
    browser: Arc<Browser>,

    /// Launch timestamp (immutable, used for uptime logging).
    launched_at: Instant,
}

impl TrackedEngine {
    /// Wrap a freshly launched browser with validation.
    ///
    /// Performs an immediate health check so a half-dead engine is rejected
    /// at launch time rather than failing the first real session.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::EngineUnavailable`] if the validation tab
    /// cannot be opened or navigated.
    pub(crate) fn new(browser: Browser) -> Result<Self> {
        // Monotonic generation counter across relaunches
        static NEXT_GENERATION: AtomicU64 = AtomicU64::new(0);

        let browser = Arc::new(browser);
        let launched_at = Instant::now();

        log::debug!("Validating freshly launched engine...");

        let tab = browser.new_tab().map_err(|e| {
            log::error!("❌ Engine validation failed at new_tab(): {}", e);
            ScoutError::EngineUnavailable(e.to_string())
        })?;

        tab.navigate_to("data:text/html,<html></html>").map_err(|e| {
            log::error!("❌ Engine validation failed at navigate_to(): {}", e);
            let _ = tab.close(true); // Best effort cleanup
            ScoutError::EngineUnavailable(e.to_string())
        })?;

        let _ = tab.close(true);

        log::debug!("✅ Engine validation passed");

        Ok(TrackedEngine {
            generation: NEXT_GENERATION.fetch_add(1, Ordering::SeqCst),
            browser,
            launched_at,
        })
    }

    /// Launch generation of this engine instance.
    #[inline]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Shared handle to the underlying browser.
    #[inline]
    pub(crate) fn browser(&self) -> &Arc<Browser> {
        &self.browser
    }

    /// Seconds since this engine was launched.
    pub(crate) fn uptime_secs(&self) -> u64 {
        self.launched_at.elapsed().as_secs()
    }
}

impl Healthcheck for TrackedEngine {
    /// Verify the engine is alive by opening and closing a scratch tab.
    ///
    /// This exercises the DevTools connection end to end without rendering
    /// anything. Failure means the process crashed or the connection is
    /// gone, and the instance must be retired.
    fn ping(&self) -> Result<()> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| ScoutError::EngineUnavailable(format!("ping new_tab() failed: {}", e)))?;

        let _ = tab.close(true);

        log::trace!(
            "Engine generation {} ping ok (uptime {}s)",
            self.generation,
            self.uptime_secs()
        );

        Ok(())
    }
}

impl std::fmt::Debug for TrackedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackedEngine")
            .field("generation", &self.generation)
            .field("uptime_secs", &self.uptime_secs())
            .finish()
    }
}
