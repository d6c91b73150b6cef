//! Browser factory implementations.
//!
//! This module provides the [`BrowserFactory`] trait and implementations
//! for launching the rendering engine.
//!
//! # Overview
//!
//! The factory pattern abstracts engine launch, allowing:
//! - Different browser implementations (Chrome, Chromium, etc.)
//! - Custom launch configurations
//! - Mock factories for testing the pool without a real browser
//!
//! # Available Factories
//!
//! | Factory | Description |
//! |---------|-------------|
//! | [`ChromeBrowserFactory`] | Launches Chrome/Chromium |
//! | [`mock::MockBrowserFactory`] | For testing (feature-gated) |
//!
//! # Example
//!
//! ```rust,ignore
//! use profile_scout::{BrowserFactory, ChromeBrowserFactory};
//!
//! // Resolve the executable via the fallback chain and launch
//! let factory = ChromeBrowserFactory::with_defaults();
//! let browser = factory.create()?;
//! ```

mod chrome;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use chrome::{ChromeBrowserFactory, create_launch_options, resolve_executable};

use crate::error::Result;
use headless_chrome::Browser;

/// Trait for the browser factory pattern.
///
/// Abstracts engine launch to allow different implementations (Chrome,
/// mock engines for testing, etc.)
///
/// # Thread Safety
///
/// Requires `Send + Sync` because the factory is owned by the engine
/// lifecycle manager and invoked from whichever operation triggers a
/// (re)launch.
pub trait BrowserFactory: Send + Sync {
    /// Launch a new engine instance.
    ///
    /// This is a slow, blocking call (typically 0.5–3 s); the engine
    /// manager runs it on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// - [`ScoutError::Configuration`](crate::ScoutError::Configuration) -
    ///   invalid launch options
    /// - [`ScoutError::EngineUnavailable`](crate::ScoutError::EngineUnavailable) -
    ///   binary not found, launch fails, etc.
    fn create(&self) -> Result<Browser>;
}
