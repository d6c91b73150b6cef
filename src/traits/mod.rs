//! Traits for abstraction and extensibility.
//!
//! This module provides the core abstractions used by the engine lifecycle
//! manager:
//!
//! - **Health monitoring**: [`Healthcheck`] for verifying engine health
//!   before a cached instance is reused
//!
//! # Implementing Custom Health Checks
//!
//! [`TrackedEngine`](crate::tracked::TrackedEngine) implements
//! [`Healthcheck`] by default, but custom engine wrappers can provide their
//! own logic:
//!
//! ```rust,ignore
//! use profile_scout::{Healthcheck, Result, ScoutError};
//!
//! struct MyEngine {
//!     // your fields
//! }
//!
//! impl Healthcheck for MyEngine {
//!     fn ping(&self) -> Result<()> {
//!         // Your custom health check logic
//!         Ok(())
//!     }
//! }
//! ```

mod healthcheck;

pub use healthcheck::Healthcheck;
