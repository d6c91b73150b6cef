//! Engine lifecycle management.
//!
//! This module provides [`EngineManager`], the owner of the single shared
//! rendering engine. The engine is the expensive, slow-to-start resource
//! (a whole headless browser process); work sessions are the cheap,
//! disposable contexts created from it.
//!
//! # Lifecycle
//!
//! ```text
//! uninitialized ──ensure_ready()──▶ launching ──▶ ready
//!       ▲                                           │
//!       └───────────────── shutdown() ◀─────────────┘
//! ```
//!
//! The engine is launched lazily on first use. After `shutdown()` the
//! manager returns to `uninitialized`, and the **next use relaunches a
//! fresh engine**; a closed manager never refuses work by itself. Refusal
//! during process teardown is the facade's job
//! ([`Scout::shutdown()`](crate::Scout::shutdown)).
//!
//! # Single-flight launch
//!
//! Launching is a critical section. Callers that observe "no engine" while
//! another launch is in flight park on the launch lock and, once it
//! settles, pick up the launched instance via a double-check instead of
//! issuing a redundant launch. A launch failure is fatal only for the
//! operation that performed it; the singleton is not poisoned and the next
//! caller retries fresh.
//!
//! # Reuse health check
//!
//! A cached engine is pinged (scratch tab open/close) before being handed
//! out. A dead engine (crashed process, lost DevTools connection) is
//! retired and replaced transparently.

use std::sync::{Arc, Mutex};

use crate::error::{Result, ScoutError};
use crate::factory::BrowserFactory;
use crate::tracked::TrackedEngine;
use crate::traits::Healthcheck;

/// Owner of the single shared rendering engine.
///
/// Exposes exactly two lifecycle operations: `ensure_ready()` (used
/// internally by every scout operation) and [`shutdown()`](Self::shutdown).
///
/// # Thread Safety
///
/// All state is internally synchronized; share via [`Arc`].
pub struct EngineManager {
    /// Factory performing the actual (blocking, slow) launch.
    factory: Arc<dyn BrowserFactory>,

    /// The cached engine, if one is live. Plain mutex: only held for
    /// pointer-sized peeks and swaps, never across I/O.
    engine: Mutex<Option<TrackedEngine>>,

    /// Critical section for the launch transition. Held across the whole
    /// launch so concurrent callers await the in-flight attempt instead of
    /// launching redundantly.
    launch_lock: tokio::sync::Mutex<()>,
}

impl EngineManager {
    /// Create a manager that will launch engines with the given factory.
    ///
    /// No engine is launched yet; the first `ensure_ready()` pays that
    /// cost.
    pub fn new(factory: Box<dyn BrowserFactory>) -> Self {
        log::debug!("Initializing engine manager (lazy launch)");

        Self {
            factory: Arc::from(factory),
            engine: Mutex::new(None),
            launch_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Return a ready engine, launching one if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::EngineUnavailable`] if the launch fails. The
    /// failure does not poison the manager; a later call may succeed.
    pub(crate) async fn ensure_ready(&self) -> Result<TrackedEngine> {
        // Fast path: reuse the cached engine if it still answers.
        if let Some(cached) = self.cached_engine() {
            let probe = cached.clone();
            let ping = tokio::task::spawn_blocking(move || probe.ping()).await;

            match ping {
                Ok(Ok(())) => {
                    log::trace!(
                        "Reusing engine generation {} (uptime {}s)",
                        cached.generation(),
                        cached.uptime_secs()
                    );
                    return Ok(cached);
                }
                Ok(Err(e)) => {
                    log::warn!(
                        "⚠️ Cached engine generation {} failed health check ({}), retiring it",
                        cached.generation(),
                        e
                    );
                    self.retire(cached.generation());
                }
                Err(e) => {
                    log::warn!("⚠️ Engine ping task panicked ({}), retiring engine", e);
                    self.retire(cached.generation());
                }
            }
        }

        // Slow path: launch, single-flight. Whoever holds the lock launches;
        // everyone else parks here and picks up the result below.
        let _guard = self.launch_lock.lock().await;

        // Double-check: a launch that settled while we waited for the lock
        // already produced a validated engine.
        if let Some(cached) = self.cached_engine() {
            log::debug!(
                "Engine generation {} became ready while waiting for launch lock",
                cached.generation()
            );
            return Ok(cached);
        }

        log::info!("Launching rendering engine...");

        let factory = Arc::clone(&self.factory);
        let launched = tokio::task::spawn_blocking(move || {
            let browser = factory.create()?;
            TrackedEngine::new(browser)
        })
        .await
        .map_err(|e| ScoutError::EngineUnavailable(format!("launch task panicked: {}", e)))??;

        log::info!(
            "✅ Rendering engine ready (generation {})",
            launched.generation()
        );

        *self.engine.lock().unwrap() = Some(launched.clone());

        Ok(launched)
    }

    /// Close the engine if present and reset to uninitialized.
    ///
    /// Safe to call when no engine exists, and safe to call repeatedly.
    /// Operations already holding the engine keep it alive until they
    /// finish (the underlying process dies with the last reference); the
    /// next `ensure_ready()` launches a fresh engine.
    pub async fn shutdown(&self) {
        let taken = self.engine.lock().unwrap().take();

        match taken {
            Some(engine) => {
                log::info!(
                    "Shutting down engine generation {} (uptime {}s)",
                    engine.generation(),
                    engine.uptime_secs()
                );

                // Dropping the engine reaps the browser process, which
                // blocks; keep that off the async runtime.
                let join = tokio::task::spawn_blocking(move || drop(engine)).await;
                if let Err(e) = join {
                    log::warn!("⚠️ Engine teardown task panicked: {}", e);
                }

                log::info!("✅ Engine shut down");
            }
            None => {
                log::debug!("Engine shutdown requested but no engine is live");
            }
        }
    }

    /// Whether an engine is currently cached (not necessarily healthy).
    pub fn is_ready(&self) -> bool {
        self.engine.lock().unwrap().is_some()
    }

    /// Clone the cached engine handle, if any.
    fn cached_engine(&self) -> Option<TrackedEngine> {
        self.engine.lock().unwrap().clone()
    }

    /// Drop the cached engine, but only if it is still the given
    /// generation. A concurrent relaunch must not be clobbered by a stale
    /// retirement.
    fn retire(&self, generation: u64) {
        let mut slot = self.engine.lock().unwrap();
        if slot.as_ref().map(|e| e.generation()) == Some(generation) {
            *slot = None;
            log::debug!("Retired engine generation {}", generation);
        }
    }
}

impl std::fmt::Debug for EngineManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineManager")
            .field("ready", &self.is_ready())
            .finish()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
