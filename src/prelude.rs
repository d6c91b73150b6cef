//! Convenient imports for common usage patterns.
//!
//! This module re-exports the most commonly used types from
//! `profile-scout`, allowing you to quickly get started with a single
//! import.
//!
//! # Usage
//!
//! ```rust,ignore
//! use profile_scout::prelude::*;
//! ```
//!
//! This imports:
//!
//! - [`Scout`] - Main facade type
//! - [`ScoutBuilder`] - Facade builder
//! - [`ScoutConfig`] - Configuration struct
//! - [`ScoutConfigBuilder`] - Configuration builder
//! - [`ScoutError`] - Error type
//! - [`Result`] - Result type alias
//! - [`SearchRecord`] / [`ProfileRecord`] / [`MediaRef`] - Record types
//! - [`GateStats`] - Occupancy snapshot
//! - [`BrowserFactory`] - Factory trait
//! - [`ChromeBrowserFactory`] - Chrome factory
//! - [`Healthcheck`] - Health check trait
//! - [`SharedScout`] - Type alias for a shared scout
//!
//! # Example
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
//!     let records = scout.search("dance", 5).await?;
//!     println!("{} records", records.len());
//!
//!     scout.shutdown().await;
//!     Ok(())
//! }
//! ```

// Core types
pub use crate::SharedScout;
pub use crate::config::{ScoutConfig, ScoutConfigBuilder};
pub use crate::error::{Result, ScoutError};
pub use crate::factory::{BrowserFactory, ChromeBrowserFactory};
pub use crate::probe::{ProbeOutcome, ReadinessProbe};
pub use crate::record::{MediaRef, ProfileRecord, SearchRecord};
pub use crate::scout::{MAX_SEARCH_LIMIT, Scout, ScoutBuilder};
pub use crate::stats::GateStats;
pub use crate::traits::Healthcheck;

// Feature-gated exports
#[cfg(feature = "env-config")]
pub use crate::config::env::{chrome_path_from_env, from_env};

#[cfg(feature = "env-config")]
pub use crate::scout::init_scout;

// Re-export Arc for convenience (commonly needed with SharedScout)
pub use std::sync::Arc;
