//! # profile-scout
//!
//! Bounded-concurrency headless browser pool for resilient profile
//! discovery and extraction from hostile, JavaScript-rendered pages.
//!
//! The target pages render their content late, obfuscate their markup, and
//! actively resist automation. The hard problem is not parsing HTML; it
//! is managing a scarce, expensive, stateful resource (a rendering
//! session) under concurrent demand while tolerating unreliable,
//! partially-available content. This crate packages that problem:
//!
//! - **Admission Gate**: at most N rendering sessions run at once; excess
//!   requests queue FIFO and are handed slots directly (no starvation)
//! - **Engine Lifecycle**: one shared headless Chrome instance, launched
//!   lazily with a single-flight guard, health-checked on reuse, relaunched
//!   on demand after shutdown or crash
//! - **Work Sessions**: per-request disposable tabs with request-scoped
//!   identity and viewport, closed on every exit path (RAII backstop)
//! - **Readiness Probe**: races acceptance markers under a split budget;
//!   "not ready" degrades confidence instead of failing
//! - **Extraction Pipeline**: pure functions over the rendered document
//!   with ordered per-facet fallback chains, dedup, and defensive limits,
//!   unit-testable without a browser
//! - **Typed outcomes**: every operation returns a well-formed (possibly
//!   empty) result or a typed error; resources are provably released under
//!   timeout, crash and cancellation
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │         Your routing layer                  │
//! └─────────────────┬───────────────────────────┘
//!                   │ search() / fetch_profile()
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │                  Scout                      │
//! │ ┌─────────────────────────────────────────┐ │
//! │ │ AdmissionGate (FIFO, capacity-bounded)  │ │
//! │ └─────────────────────────────────────────┘ │
//! │ ┌─────────────────────────────────────────┐ │
//! │ │ EngineManager (shared, single-flight)   │ │
//! │ └─────────────────────────────────────────┘ │
//! │ ┌──────────────┐ ┌────────────────────────┐ │
//! │ │ WorkSession  │ │ ReadinessProbe         │ │
//! │ │ (per request)│ │ + extraction pipeline  │ │
//! │ └──────────────┘ └────────────────────────┘ │
//! └─────────────────┬───────────────────────────┘
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │        Headless Chrome (one process)        │
//! │     (managed by headless_chrome crate)      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use profile_scout::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scout = Scout::builder()
//!         .config(ScoutConfigBuilder::new().capacity(2).build()?)
//!         .build()?;
//!
//!     // Possibly-empty result; "no matches" is not an error
//!     let records = scout.search("dance", 5).await?;
//!     for record in &records {
//!         println!("@{} {} {}", record.handle, record.display_name,
//!                  if record.verified { "✔" } else { "" });
//!     }
//!
//!     // None (not an error) for private/nonexistent targets
//!     if let Some(profile) = scout.fetch_profile("some_handle").await? {
//!         println!("{} followers", profile.follower_count);
//!     }
//!
//!     // Run on your termination signal; bounded, idempotent
//!     scout.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Configuration
//!
//! With the `env-config` feature (default), build a shared scout from the
//! environment (loaded from an `app.env` file or system environment):
//!
//! ```rust,no_run
//! use profile_scout::init_scout;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scout = init_scout()?;
//!     // scout is Arc<Scout>, ready to clone into handlers
//!     Ok(())
//! }
//! ```
//!
//! | Variable | Type | Default | Description |
//! |----------|------|---------|-------------|
//! | `SCOUT_POOL_CAPACITY` | usize | 2 | Max concurrent sessions |
//! | `SCOUT_OP_TIMEOUT_SECONDS` | u64 | 45 | Per-operation deadline |
//! | `SCOUT_NAV_TIMEOUT_SECONDS` | u64 | 20 | Navigation budget |
//! | `SCOUT_PROBE_BUDGET_MS` | u64 | 6000 | Readiness-probe budget |
//! | `SCOUT_USER_AGENT` | String | desktop Chrome | Session identity |
//! | `SCOUT_BASE_URL` | String | tiktok.com | Target site origin |
//! | `CHROME_PATH` | String | auto | Browser executable override |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `env-config` | Enable environment-based configuration (default) |
//! | `test-utils` | Enable the mock factory for testing |
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, ScoutError>`](Result). Empty
//! results are successes: a search with no matches yields `Ok(vec![])`, a
//! profile with no acceptance markers yields `Ok(None)`.
//!
//! ```rust,ignore
//! match scout.search("dance", 5).await {
//!     Ok(records) => { /* possibly empty */ }
//!     Err(ScoutError::Exhausted(_)) => { /* deadline; slots released */ }
//!     Err(ScoutError::EngineUnavailable(msg)) => {
//!         eprintln!("engine launch failed: {}", msg); // retryable next call
//!     }
//!     Err(e) => eprintln!("error: {}", e),
//! }
//! ```
//!
//! ## Testing
//!
//! For testing without Chrome, enable the `test-utils` feature and use
//! [`MockBrowserFactory`](factory::mock::MockBrowserFactory):
//!
//! ```rust,ignore
//! use profile_scout::factory::mock::MockBrowserFactory;
//!
//! let scout = Scout::builder()
//!     .factory(Box::new(MockBrowserFactory::always_fails("test mode")))
//!     .build()?;
//! ```
//!
//! The extraction pipeline is pure; test it directly against synthetic
//! documents, no browser involved.

#![doc(html_root_url = "https://docs.rs/profile-scout/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// Modules
// ============================================================================

pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod factory;
pub mod gate;
pub mod prelude;
pub mod probe;
pub mod record;
pub mod scout;
pub mod session;
pub mod stats;
pub mod traits;

// Internal modules (not publicly exposed)
pub(crate) mod tracked;

// ============================================================================
// Re-exports (Public API)
// ============================================================================

// Core types
pub use config::{ScoutConfig, ScoutConfigBuilder};
pub use error::{Result, ScoutError};
pub use extract::{MAX_RECENT_MEDIA, extract_profile, extract_search_records};
pub use factory::{BrowserFactory, ChromeBrowserFactory};
pub use gate::{AdmissionGate, SlotPermit};
pub use probe::{ProbeOutcome, ReadinessProbe};
pub use record::{MediaRef, ProfileRecord, SearchRecord};
pub use scout::{MAX_SEARCH_LIMIT, Scout, ScoutBuilder};
pub use session::{SessionConfig, WorkSession};
pub use stats::GateStats;
pub use traits::Healthcheck;

// Feature-gated re-exports
#[cfg(feature = "env-config")]
pub use config::env::{chrome_path_from_env, from_env};

#[cfg(feature = "env-config")]
pub use scout::init_scout;

// ============================================================================
// Convenience type aliases
// ============================================================================

/// Shared scout type for web handlers.
///
/// The scout is internally synchronized, so a plain `Arc` is all the
/// sharing machinery a routing layer needs.
///
/// # Example
///
/// ```rust,ignore
/// use profile_scout::SharedScout;
///
/// let scout: SharedScout = std::sync::Arc::new(scout);
/// ```
pub type SharedScout = std::sync::Arc<Scout>;
