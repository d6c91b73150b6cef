//! Mock browser factory for testing.
//!
//! This module provides a mock implementation of [`BrowserFactory`] that
//! can be configured to fail fast or slowly, useful for testing admission
//! and lifecycle behavior without requiring Chrome to be installed.
//!
//! # Feature Flag
//!
//! This module is only available when:
//! - The `test-utils` feature is enabled, OR
//! - During testing (`#[cfg(test)]`)
//!
//! # Example
//!
//! ```rust,ignore
//! use profile_scout::factory::mock::MockBrowserFactory;
//! use std::time::Duration;
//!
//! // Factory that always fails immediately
//! let factory = MockBrowserFactory::always_fails("Chrome not installed");
//!
//! // Factory that blocks for a while before failing; lets tests hold the
//! // engine launch critical section and exercise deadline paths
//! let factory = MockBrowserFactory::fails_slowly(Duration::from_millis(300), "slow launch");
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use headless_chrome::Browser;

use super::BrowserFactory;
use crate::error::{Result, ScoutError};

/// What the mock does when asked to launch.
enum MockBehavior {
    /// Attempt a real launch (requires Chrome; used for opt-in smoke tests).
    AttemptReal,

    /// Fail immediately with the message.
    FailFast(String),

    /// Sleep for the duration, then fail with the message.
    FailSlowly(Duration, String),
}

/// Mock browser factory for testing without Chrome.
///
/// # Thread Safety
///
/// `Send + Sync`; tracks state with atomics.
///
/// # Example
///
/// ```rust,ignore
/// let factory = MockBrowserFactory::always_fails("Test error");
/// assert!(factory.create().is_err());
/// assert_eq!(factory.creation_count(), 1);
/// ```
pub struct MockBrowserFactory {
    behavior: MockBehavior,

    /// Number of launch attempts (for verification in tests).
    creation_count: Arc<AtomicUsize>,
}

impl MockBrowserFactory {
    /// Create a mock factory that attempts real engine launches.
    ///
    /// Still requires Chrome to be installed; for pure mocking use
    /// [`always_fails`](Self::always_fails).
    pub fn new() -> Self {
        Self {
            behavior: MockBehavior::AttemptReal,
            creation_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock factory that always fails immediately with the given
    /// message.
    pub fn always_fails<S: Into<String>>(message: S) -> Self {
        Self {
            behavior: MockBehavior::FailFast(message.into()),
            creation_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock factory that blocks for `delay`, then fails.
    ///
    /// Useful for holding the launch critical section so tests can observe
    /// deadline expiry while queued or mid-launch. Keep the delay short:
    /// the blocking task runs to completion even if the awaiting operation
    /// is cancelled.
    pub fn fails_slowly<S: Into<String>>(delay: Duration, message: S) -> Self {
        Self {
            behavior: MockBehavior::FailSlowly(delay, message.into()),
            creation_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of launch attempts so far.
    pub fn creation_count(&self) -> usize {
        self.creation_count.load(Ordering::SeqCst)
    }

    /// Shared handle to the attempt counter, for asserting after the
    /// factory has been moved into an engine manager.
    pub fn creation_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.creation_count)
    }
}

impl Default for MockBrowserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserFactory for MockBrowserFactory {
    fn create(&self) -> Result<Browser> {
        self.creation_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::AttemptReal => {
                log::debug!("MockBrowserFactory attempting real launch");
                Browser::default().map_err(|e| ScoutError::EngineUnavailable(e.to_string()))
            }
            MockBehavior::FailFast(message) => {
                log::debug!("MockBrowserFactory failing fast: {}", message);
                Err(ScoutError::EngineUnavailable(message.clone()))
            }
            MockBehavior::FailSlowly(delay, message) => {
                log::debug!(
                    "MockBrowserFactory sleeping {:?} before failing: {}",
                    delay,
                    message
                );
                std::thread::sleep(*delay);
                Err(ScoutError::EngineUnavailable(message.clone()))
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Verifies that the failing mock fails and counts attempts.
    #[test]
    fn test_always_fails() {
        let factory = MockBrowserFactory::always_fails("no chrome here");

        let result = factory.create();
        assert!(matches!(result, Err(ScoutError::EngineUnavailable(_))));
        assert_eq!(factory.creation_count(), 1);

        let _ = factory.create();
        assert_eq!(factory.creation_count(), 2);
    }

    /// Verifies that the slow mock actually blocks before failing.
    #[test]
    fn test_fails_slowly_blocks() {
        let factory =
            MockBrowserFactory::fails_slowly(Duration::from_millis(50), "slow failure");

        let start = std::time::Instant::now();
        let result = factory.create();

        assert!(result.is_err());
        assert!(
            start.elapsed() >= Duration::from_millis(50),
            "slow mock should block for at least its delay"
        );
    }

    /// Verifies the shared counter handle observes attempts made through
    /// the trait object.
    #[test]
    fn test_creation_counter_is_shared() {
        let factory = MockBrowserFactory::always_fails("nope");
        let counter = factory.creation_counter();

        let boxed: Box<dyn BrowserFactory> = Box::new(factory);
        let _ = boxed.create();
        let _ = boxed.create();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
