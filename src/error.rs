//! Error types for the scout.
//!
//! This module provides [`ScoutError`], a unified error type for all
//! operations, and a convenient [`Result`] type alias.
//!
//! # Example
//!
//! ```rust
//! use profile_scout::{ScoutError, Result};
//!
//! fn lookup() -> Result<Vec<String>> {
//!     Err(ScoutError::InvalidArgument("query must not be empty".to_string()))
//! }
//!
//! match lookup() {
//!     Ok(records) => println!("found {} records", records.len()),
//!     Err(ScoutError::ShuttingDown) => println!("scout is shutting down"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! # What is *not* an error
//!
//! An empty search result and a profile fetch that finds no acceptance
//! markers (`Ok(None)`) are **successful** outcomes. "No matches" and
//! "extraction mechanism broken" must stay distinguishable to the caller,
//! so the former never travels through this enum. Likewise, a fault inside
//! a single facet-resolution fallback chain is swallowed and the facet
//! defaults to empty; it never aborts the whole record or request.

/// Errors that can occur during scout operations.
///
/// Each variant classifies a failure the caller can act on. Faults during
/// resource acquisition or release always propagate through one of these
/// variants; they are never swallowed, since a leaked rendering session is
/// worse than a failed request.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    /// Caller violated the operation contract (empty query, limit out of
    /// range, empty handle).
    ///
    /// Never worth retrying: the same input will fail the same way.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The rendering engine could not be launched.
    ///
    /// # Common Causes
    ///
    /// - Chrome/Chromium binary not found or not installed
    /// - Invalid executable path override
    /// - Insufficient permissions or system resource limits
    ///
    /// # Recovery
    ///
    /// The failure does not poison the engine singleton: the next call
    /// attempts a fresh launch. Retrying *within* the same call is not done.
    #[error("Rendering engine unavailable: {0}")]
    EngineUnavailable(String),

    /// Navigation did not complete within its budget.
    ///
    /// Extraction is still attempted against whatever partial document
    /// exists before this is surfaced; the error is only returned when the
    /// degraded document yielded nothing usable.
    #[error("Navigation timed out: {0}")]
    NavigationTimeout(String),

    /// The overall operation deadline elapsed, while queued for a slot or
    /// mid-flight.
    ///
    /// Resource release is guaranteed on this path: a waiter abandoned in
    /// the admission queue never consumed a slot, and a session opened
    /// before the deadline is closed before the error is returned.
    #[error("Operation deadline exceeded: {0}")]
    Exhausted(String),

    /// Operation attempted during scout shutdown.
    ///
    /// Returned once [`Scout::shutdown()`](crate::Scout::shutdown) has been
    /// called. Handle gracefully by stopping pending work rather than
    /// retrying.
    #[error("Scout is shutting down")]
    ShuttingDown,

    /// Invalid configuration provided.
    ///
    /// Produced by [`ScoutConfigBuilder`](crate::ScoutConfigBuilder)
    /// validation or malformed environment values.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Convenience conversion from [`String`] to [`ScoutError::Configuration`].
impl From<String> for ScoutError {
    fn from(msg: String) -> Self {
        ScoutError::Configuration(msg)
    }
}

/// Convenience conversion from `&str` to [`ScoutError::Configuration`].
impl From<&str> for ScoutError {
    fn from(msg: &str) -> Self {
        ScoutError::Configuration(msg.to_string())
    }
}

/// Result type alias using [`ScoutError`].
pub type Result<T> = std::result::Result<T, ScoutError>;

// ============================================================================
// Unit Tests
// ============================================================================
