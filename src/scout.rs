//! Orchestration facade.
//!
//! This module provides [`Scout`], the public entry point composing the
//! admission gate, engine lifecycle manager, work sessions, readiness
//! probe and extraction pipeline into the two public operations:
//! [`search`](Scout::search) and [`fetch_profile`](Scout::fetch_profile).
//!
//! # Request lifecycle
//!
//! ```text
//! Queued → SlotAcquired → EngineReady → SessionOpen → Navigated
//!        → Probed → Extracted → SessionClosed → SlotReleased → Completed
//! ```
//!
//! Any step may instead divert to a typed failure, and the release steps
//! owed up to that point (session close, slot release) still run before
//! the failure surfaces. The slot permit is RAII, the session close has a
//! `Drop` backstop, and the end-to-end deadline cancelling the whole
//! future mid-flight therefore cannot leak either resource.
//!
//! # Deadlines
//!
//! Every operation runs under `op_timeout`. A deadline that expires while
//! the request is still queued abandons the wait without ever consuming a
//! slot; one that expires mid-flight closes the session and releases the
//! slot before [`ScoutError::Exhausted`] is returned.
//!
//! # Shutdown
//!
//! On a termination signal, call [`Scout::shutdown()`]. It closes the
//! engine (bounded by however long the process reaper takes) and flips the
//! facade into a refusing state. Wire it to your runtime's signal handler:
//!
//! ```rust,ignore
//! tokio::signal::ctrl_c().await?;
//! scout.shutdown().await;
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::ScoutConfig;
use crate::engine::EngineManager;
use crate::error::{Result, ScoutError};
use crate::extract;
use crate::factory::{BrowserFactory, ChromeBrowserFactory};
use crate::gate::AdmissionGate;
use crate::probe::{ProbeOutcome, ReadinessProbe};
use crate::record::{ProfileRecord, SearchRecord};
use crate::session::{SessionConfig, WorkSession};
use crate::stats::GateStats;

/// Upper bound on the `limit` argument of [`Scout::search`].
pub const MAX_SEARCH_LIMIT: usize = 20;

/// Acceptance markers for search results pages. Any one of them rendering
/// means the page is ready enough to extract.
const SEARCH_MARKERS: &[&str] = &[
    "[data-e2e='search-user-container']",
    "a[href*='/@']",
    "[data-e2e='search-user-avatar']",
];

/// Acceptance markers for profile pages. Zero of them present after the
/// probe means a private or nonexistent target.
const PROFILE_MARKERS: &[&str] = &[
    "[data-e2e='user-title']",
    "[data-e2e='user-avatar']",
    "h1",
];

/// The scout: bounded-concurrency profile discovery over a shared headless
/// engine.
///
/// # Example
///
/// ```rust,ignore
/// use profile_scout::prelude::*;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scout = Scout::builder()
///         .config(ScoutConfigBuilder::new().capacity(2).build()?)
///         .build()?;
///
///     let records = scout.search("dance", 5).await?;
///     for record in &records {
///         println!("@{}: {}", record.handle, record.display_name);
///     }
///
///     if let Some(profile) = scout.fetch_profile(&records[0].handle).await? {
///         println!("{} followers", profile.follower_count);
///     }
///
///     scout.shutdown().await;
///     Ok(())
/// }
/// ```
///
/// # Thread Safety
///
/// All state is internally synchronized; share via `Arc`. The engine is
/// shared by all concurrent operations, each work session by exactly one.
pub struct Scout {
    config: ScoutConfig,
    gate: AdmissionGate,
    engine: EngineManager,
    shutting_down: AtomicBool,
}

impl Scout {
    /// Create a builder for constructing a [`Scout`].
    pub fn builder() -> ScoutBuilder {
        ScoutBuilder::new()
    }

    /// Search for entities matching `query`.
    ///
    /// Returns at most `limit` records in document order (the source's
    /// ranking), deduplicated by handle. An empty vector is a valid "no
    /// matches" outcome.
    ///
    /// # Errors
    ///
    /// | Error | Cause |
    /// |-------|-------|
    /// | [`InvalidArgument`] | `query` empty, or `limit` outside `[1, 20]` |
    /// | [`ShuttingDown`] | [`shutdown()`](Self::shutdown) was called |
    /// | [`EngineUnavailable`] | engine launch failed |
    /// | [`NavigationTimeout`] | target unreachable *and* nothing extractable |
    /// | [`Exhausted`] | `op_timeout` elapsed (resources released) |
    ///
    /// A navigation timeout against a partially rendered page that still
    /// yields records is **not** an error: the records are returned.
    ///
    /// [`InvalidArgument`]: ScoutError::InvalidArgument
    /// [`ShuttingDown`]: ScoutError::ShuttingDown
    /// [`EngineUnavailable`]: ScoutError::EngineUnavailable
    /// [`NavigationTimeout`]: ScoutError::NavigationTimeout
    /// [`Exhausted`]: ScoutError::Exhausted
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchRecord>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ScoutError::InvalidArgument(
                "query must not be empty".to_string(),
            ));
        }
        if limit == 0 || limit > MAX_SEARCH_LIMIT {
            return Err(ScoutError::InvalidArgument(format!(
                "limit must be in [1, {}], got {}",
                MAX_SEARCH_LIMIT, limit
            )));
        }
        self.check_accepting()?;

        let url = format!(
            "{}/search/user?q={}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(query)
        );

        log::info!("Searching '{}' (limit {})", query, limit);

        tokio::time::timeout(self.config.op_timeout, self.run_search(&url, limit))
            .await
            .map_err(|_| {
                log::warn!(
                    "⚠️ Search '{}' exceeded its {:?} deadline",
                    query,
                    self.config.op_timeout
                );
                ScoutError::Exhausted(format!(
                    "search did not complete within {:?}",
                    self.config.op_timeout
                ))
            })?
    }

    /// Fetch the extended record for `handle`.
    ///
    /// A leading `@` is accepted and stripped. Returns `Ok(None)`, not an
    /// error, when the page loaded but zero acceptance markers are
    /// present after the probe: a private or nonexistent target.
    ///
    /// # Errors
    ///
    /// Same kinds as [`search`](Self::search), with `InvalidArgument`
    /// covering an empty handle.
    pub async fn fetch_profile(&self, handle: &str) -> Result<Option<ProfileRecord>> {
        let handle = handle.trim().trim_start_matches('@');
        if handle.is_empty() {
            return Err(ScoutError::InvalidArgument(
                "handle must not be empty".to_string(),
            ));
        }
        self.check_accepting()?;

        let url = format!(
            "{}/@{}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(handle)
        );

        log::info!("Fetching profile @{}", handle);

        tokio::time::timeout(self.config.op_timeout, self.run_profile(&url, handle))
            .await
            .map_err(|_| {
                log::warn!(
                    "⚠️ Profile fetch @{} exceeded its {:?} deadline",
                    handle,
                    self.config.op_timeout
                );
                ScoutError::Exhausted(format!(
                    "profile fetch did not complete within {:?}",
                    self.config.op_timeout
                ))
            })?
    }

    /// Point-in-time occupancy snapshot.
    pub fn stats(&self) -> GateStats {
        GateStats {
            capacity: self.gate.capacity(),
            in_use: self.gate.in_use(),
            waiting: self.gate.waiting(),
            engine_ready: self.engine.is_ready(),
        }
    }

    /// Shut the scout down.
    ///
    /// Closes the engine if one is live (tolerates none), and refuses all
    /// subsequent operations with [`ScoutError::ShuttingDown`]. Operations
    /// already in flight keep their engine reference until they finish.
    /// Idempotent.
    pub async fn shutdown(&self) {
        if self.shutting_down.swap(true, Ordering::SeqCst) {
            log::debug!("Scout shutdown already in progress");
        } else {
            log::info!("Scout shutting down...");
        }

        self.engine.shutdown().await;
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn check_accepting(&self) -> Result<()> {
        if self.shutting_down.load(Ordering::SeqCst) {
            return Err(ScoutError::ShuttingDown);
        }
        Ok(())
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            user_agent: self.config.user_agent.clone(),
            viewport: self.config.viewport,
            nav_timeout: self.config.nav_timeout,
        }
    }

    /// Slot → engine → session → drive → close. The permit is released on
    /// every path by dropping at the end of this scope; the session close
    /// runs explicitly here and via `Drop` if this future is cancelled.
    async fn run_search(&self, url: &str, limit: usize) -> Result<Vec<SearchRecord>> {
        let _slot = self.gate.acquire().await;
        let engine = self.engine.ensure_ready().await?;

        let session = WorkSession::open(engine.browser(), &self.session_config()).await?;
        let outcome = self.drive_search(&session, url, limit).await;
        session.close().await;

        outcome
    }

    async fn run_profile(&self, url: &str, handle: &str) -> Result<Option<ProfileRecord>> {
        let _slot = self.gate.acquire().await;
        let engine = self.engine.ensure_ready().await?;

        let session = WorkSession::open(engine.browser(), &self.session_config()).await?;
        let outcome = self.drive_profile(&session, url, handle).await;
        session.close().await;

        outcome
    }

    /// Navigate, probe, extract. Navigation and probe faults are recorded,
    /// not fatal: extraction gets a best-effort pass against whatever
    /// rendered, and only a fruitless pass surfaces the navigation error.
    async fn drive_search(
        &self,
        session: &WorkSession,
        url: &str,
        limit: usize,
    ) -> Result<Vec<SearchRecord>> {
        let nav_result = session.navigate(url).await;
        if nav_result.is_err() {
            log::warn!("Search navigation degraded, extracting from partial document");
        }

        let probe = ReadinessProbe::new(SEARCH_MARKERS.iter().copied(), self.config.probe_budget);
        let readiness = probe.wait_any(session).await;

        let html = match session.content().await {
            Ok(html) => html,
            // An unreadable document after a failed navigation is the
            // navigation failure, not a separate engine fault.
            Err(content_err) => {
                return Err(nav_result.err().unwrap_or(content_err));
            }
        };

        let records = extract::extract_search_records(&html, limit);

        if records.is_empty() {
            if let Err(nav_err) = nav_result {
                return Err(nav_err);
            }
            if readiness == ProbeOutcome::Degraded {
                log::info!("Search found no acceptance markers and no candidates");
            }
        }

        Ok(records)
    }

    async fn drive_profile(
        &self,
        session: &WorkSession,
        url: &str,
        handle: &str,
    ) -> Result<Option<ProfileRecord>> {
        let nav_result = session.navigate(url).await;
        if nav_result.is_err() {
            log::warn!("Profile navigation degraded, extracting from partial document");
        }

        let probe = ReadinessProbe::new(PROFILE_MARKERS.iter().copied(), self.config.probe_budget);
        let readiness = probe.wait_any(session).await;

        // Confirmation step: zero acceptance markers after the probe means
        // a private or nonexistent target: an empty result, not an error.
        // Unless navigation also failed, in which case "unreachable" is the
        // honest answer.
        if readiness == ProbeOutcome::Degraded && !probe.confirm_any(session).await {
            return match nav_result {
                Ok(()) => {
                    log::info!("Profile @{} has no acceptance markers, treating as absent", handle);
                    Ok(None)
                }
                Err(nav_err) => Err(nav_err),
            };
        }

        let html = match session.content().await {
            Ok(html) => html,
            Err(content_err) => {
                return Err(nav_result.err().unwrap_or(content_err));
            }
        };

        Ok(Some(extract::extract_profile(&html, handle)))
    }
}

impl std::fmt::Debug for Scout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scout")
            .field("capacity", &self.gate.capacity())
            .field("stats", &self.stats())
            .finish()
    }
}

// ============================================================================
// ScoutBuilder
// ============================================================================

/// Builder for [`Scout`].
///
/// # Example
///
/// ```rust,ignore
/// let scout = Scout::builder()
///     .config(ScoutConfigBuilder::new().capacity(4).build()?)
///     .factory(Box::new(ChromeBrowserFactory::with_defaults()))
///     .build()?;
/// ```
pub struct ScoutBuilder {
    config: Option<ScoutConfig>,
    factory: Option<Box<dyn BrowserFactory>>,
}

impl ScoutBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            factory: None,
        }
    }

    /// Set the configuration. Defaults to [`ScoutConfig::default()`].
    pub fn config(mut self, config: ScoutConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the engine factory. Defaults to a [`ChromeBrowserFactory`]
    /// resolving the executable through the fallback chain.
    pub fn factory(mut self, factory: Box<dyn BrowserFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Build the scout.
    ///
    /// No engine is launched here; the first operation pays that cost.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Configuration`] if the configuration is
    /// invalid (only possible when bypassing
    /// [`ScoutConfigBuilder`](crate::ScoutConfigBuilder)).
    pub fn build(self) -> Result<Scout> {
        let config = self.config.unwrap_or_default();

        if config.capacity == 0 {
            return Err(ScoutError::Configuration(
                "capacity must be greater than 0".to_string(),
            ));
        }

        let factory = self.factory.unwrap_or_else(|| {
            Box::new(ChromeBrowserFactory::with_options(None, config.viewport))
        });

        log::info!(
            "Scout ready: capacity {}, op deadline {:?}, target {}",
            config.capacity,
            config.op_timeout,
            config.base_url
        );

        Ok(Scout {
            gate: AdmissionGate::new(config.capacity),
            engine: EngineManager::new(factory),
            shutting_down: AtomicBool::new(false),
            config,
        })
    }
}

impl Default for ScoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Environment bootstrap (feature-gated)
// ============================================================================

/// Build a shared [`Scout`] from the environment.
///
/// Loads configuration via [`config::env::from_env`](crate::config::env::from_env)
/// (including the optional `app.env` file) and honors the `CHROME_PATH`
/// executable override. The engine is still launched lazily on first use.
///
/// # Example
///
/// ```rust,no_run
/// use profile_scout::init_scout;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scout = init_scout()?;
///     // scout is Arc<Scout>, ready to clone into handlers
///     Ok(())
/// }
/// ```
#[cfg(feature = "env-config")]
pub fn init_scout() -> Result<std::sync::Arc<Scout>> {
    let config = crate::config::env::from_env()?;
    let chrome_path = crate::config::env::chrome_path_from_env();

    let factory = ChromeBrowserFactory::with_options(chrome_path, config.viewport);

    let scout = Scout::builder()
        .config(config)
        .factory(Box::new(factory))
        .build()?;

    Ok(std::sync::Arc::new(scout))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoutConfigBuilder;
    use crate::factory::mock::MockBrowserFactory;

    fn mock_scout() -> Scout {
        Scout::builder()
            .config(ScoutConfigBuilder::new().build().unwrap())
            .factory(Box::new(MockBrowserFactory::always_fails("test mode")))
            .build()
            .unwrap()
    }

    /// Argument contracts are checked before any resource is touched.
    #[tokio::test]
    async fn test_search_rejects_empty_query() {
        let scout = mock_scout();

        let result = scout.search("", 5).await;
        assert!(matches!(result, Err(ScoutError::InvalidArgument(_))));

        let result = scout.search("   ", 5).await;
        assert!(matches!(result, Err(ScoutError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_search_rejects_limit_out_of_range() {
        let scout = mock_scout();

        let result = scout.search("dance", 0).await;
        assert!(matches!(result, Err(ScoutError::InvalidArgument(_))));

        let result = scout.search("dance", MAX_SEARCH_LIMIT + 1).await;
        assert!(matches!(result, Err(ScoutError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_fetch_profile_rejects_empty_handle() {
        let scout = mock_scout();

        let result = scout.fetch_profile("").await;
        assert!(matches!(result, Err(ScoutError::InvalidArgument(_))));

        // A bare "@" strips down to nothing
        let result = scout.fetch_profile("@").await;
        assert!(matches!(result, Err(ScoutError::InvalidArgument(_))));
    }

    /// Invalid arguments never consume a slot.
    #[tokio::test]
    async fn test_invalid_arguments_touch_no_resources() {
        let scout = mock_scout();

        let _ = scout.search("", 5).await;
        let _ = scout.search("q", 99).await;

        let stats = scout.stats();
        assert_eq!(stats.in_use, 0);
        assert_eq!(stats.waiting, 0);
        assert!(!stats.engine_ready);
    }

    #[tokio::test]
    async fn test_builder_default_config() {
        let scout = Scout::builder()
            .factory(Box::new(MockBrowserFactory::always_fails("test mode")))
            .build()
            .unwrap();

        assert_eq!(scout.stats().capacity, 2);
    }
}
