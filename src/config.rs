//! Configuration for scout behavior and limits.
//!
//! This module provides [`ScoutConfig`] and [`ScoutConfigBuilder`] for
//! configuring pool capacity, operation deadlines, and the identity the
//! scout presents to the target site.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use profile_scout::ScoutConfigBuilder;
//!
//! let config = ScoutConfigBuilder::new()
//!     .capacity(4)
//!     .op_timeout(Duration::from_secs(60))
//!     .nav_timeout(Duration::from_secs(25))
//!     .build()
//!     .expect("Invalid configuration");
//!
//! assert_eq!(config.capacity, 4);
//! ```
//!
//! # Environment Configuration
//!
//! When the `env-config` feature is enabled, configuration can be loaded
//! from environment variables and an optional `app.env` file:
//!
//! ```rust,ignore
//! use profile_scout::config::env::from_env;
//!
//! let config = from_env()?;
//! ```
//!
//! See [`mod@env`] module for available environment variables.

use std::time::Duration;

/// Desktop Chrome user-agent presented by default.
///
/// The target site serves a stripped-down document (or a block page) to
/// clients that identify as automation, so sessions present a mainstream
/// desktop identity unless overridden.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default origin of the target site.
pub const DEFAULT_BASE_URL: &str = "https://www.tiktok.com";

/// Configuration for scout behavior and limits.
///
/// Controls admission capacity, per-operation deadlines, and the session
/// identity. Use [`ScoutConfigBuilder`] for validation and convenience.
///
/// # Fields Overview
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `capacity` | 2 | Max concurrent rendering sessions |
/// | `op_timeout` | 45s | End-to-end deadline per operation |
/// | `nav_timeout` | 20s | Navigation budget per session |
/// | `probe_budget` | 6s | Total readiness-probe budget |
/// | `user_agent` | desktop Chrome | Identity string per session |
/// | `viewport` | 1280x800 | Session viewport size |
/// | `base_url` | tiktok.com | Target site origin |
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    /// Maximum number of rendering sessions active simultaneously.
    ///
    /// Excess requests queue (FIFO) instead of being rejected. Each session
    /// is a full rendering context, so this is primarily a memory knob.
    pub capacity: usize,

    /// End-to-end deadline for one `search`/`fetch_profile` call.
    ///
    /// Covers queueing for a slot, engine launch, navigation, probing and
    /// extraction. Exceeding it yields
    /// [`ScoutError::Exhausted`](crate::ScoutError::Exhausted) with all
    /// resources released.
    pub op_timeout: Duration,

    /// Budget for a single navigation to resolve its load signal.
    ///
    /// A navigation that overruns this is a reported condition, not an
    /// immediate failure; partial content is still extracted.
    pub nav_timeout: Duration,

    /// Total budget for the content readiness probe.
    ///
    /// Split evenly across the acceptance markers raced by the probe, so a
    /// single slow marker cannot consume the whole budget.
    pub probe_budget: Duration,

    /// User-agent string applied to every work session.
    pub user_agent: String,

    /// Viewport size (width, height) applied to every work session.
    pub viewport: (u32, u32),

    /// Origin of the target site. Search and profile paths are joined onto
    /// this.
    pub base_url: String,
}

impl Default for ScoutConfig {
    /// Production-ready default configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use profile_scout::ScoutConfig;
    /// use std::time::Duration;
    ///
    /// let config = ScoutConfig::default();
    ///
    /// assert_eq!(config.capacity, 2);
    /// assert_eq!(config.op_timeout, Duration::from_secs(45));
    /// assert_eq!(config.nav_timeout, Duration::from_secs(20));
    /// assert_eq!(config.probe_budget, Duration::from_secs(6));
    /// assert_eq!(config.viewport, (1280, 800));
    /// ```
    fn default() -> Self {
        Self {
            capacity: 2,
            op_timeout: Duration::from_secs(45),
            nav_timeout: Duration::from_secs(20),
            probe_budget: Duration::from_secs(6),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            viewport: (1280, 800),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Builder for [`ScoutConfig`] with validation.
///
/// Provides a fluent API for constructing validated configurations.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use profile_scout::ScoutConfigBuilder;
///
/// let config = ScoutConfigBuilder::new()
///     .capacity(3)
///     .nav_timeout(Duration::from_secs(10))
///     .build()
///     .expect("Invalid configuration");
/// ```
///
/// # Validation
///
/// The [`build()`](Self::build) method validates:
/// - `capacity` must be greater than 0
/// - all durations must be non-zero
/// - `nav_timeout` must not exceed `op_timeout`
/// - `base_url` must parse as an absolute URL
pub struct ScoutConfigBuilder {
    config: ScoutConfig,
}

impl ScoutConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            config: ScoutConfig::default(),
        }
    }

    /// Set the maximum number of concurrent rendering sessions (must be > 0).
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Set the end-to-end per-operation deadline.
    pub fn op_timeout(mut self, timeout: Duration) -> Self {
        self.config.op_timeout = timeout;
        self
    }

    /// Set the per-navigation budget.
    pub fn nav_timeout(mut self, timeout: Duration) -> Self {
        self.config.nav_timeout = timeout;
        self
    }

    /// Set the total readiness-probe budget.
    pub fn probe_budget(mut self, budget: Duration) -> Self {
        self.config.probe_budget = budget;
        self
    }

    /// Set the user-agent string presented by every work session.
    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the session viewport size.
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport = (width, height);
        self
    }

    /// Set the target site origin.
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// - Returns error if `capacity` is 0
    /// - Returns error if any duration is zero
    /// - Returns error if `nav_timeout` exceeds `op_timeout`
    /// - Returns error if `base_url` is not an absolute URL
    ///
    /// # Example
    ///
    /// ```rust
    /// use profile_scout::ScoutConfigBuilder;
    ///
    /// // Invalid: capacity is 0
    /// let config = ScoutConfigBuilder::new().capacity(0).build();
    /// assert!(config.is_err());
    /// ```
    pub fn build(self) -> std::result::Result<ScoutConfig, String> {
        if self.config.capacity == 0 {
            return Err("capacity must be greater than 0".to_string());
        }

        if self.config.op_timeout.is_zero()
            || self.config.nav_timeout.is_zero()
            || self.config.probe_budget.is_zero()
        {
            return Err("timeouts must be non-zero".to_string());
        }

        // A navigation budget longer than the overall deadline can never be
        // spent; treat it as a configuration mistake.
        if self.config.nav_timeout > self.config.op_timeout {
            return Err("nav_timeout cannot exceed op_timeout".to_string());
        }

        if self.config.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        match url::Url::parse(&self.config.base_url) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
            Ok(parsed) => {
                return Err(format!(
                    "base_url must be http(s), got scheme '{}'",
                    parsed.scheme()
                ));
            }
            Err(e) => return Err(format!("base_url is not a valid URL: {}", e)),
        }

        Ok(self.config)
    }
}

impl Default for ScoutConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Environment Configuration (feature-gated)
// ============================================================================

/// Environment-based configuration loading.
///
/// This module is only available when the `env-config` feature is enabled.
///
/// # Environment File
///
/// Uses `dotenvy` to load environment variables from an `app.env` file in
/// the current directory. The file is optional; if not found, environment
/// variables and defaults are used.
///
/// # Environment Variables
///
/// | Variable | Type | Default | Description |
/// |----------|------|---------|-------------|
/// | `SCOUT_POOL_CAPACITY` | usize | 2 | Max concurrent sessions |
/// | `SCOUT_OP_TIMEOUT_SECONDS` | u64 | 45 | Per-operation deadline |
/// | `SCOUT_NAV_TIMEOUT_SECONDS` | u64 | 20 | Navigation budget |
/// | `SCOUT_PROBE_BUDGET_MS` | u64 | 6000 | Readiness-probe budget |
/// | `SCOUT_USER_AGENT` | String | desktop Chrome | Session identity |
/// | `SCOUT_BASE_URL` | String | tiktok.com | Target site origin |
/// | `CHROME_PATH` | String | auto | Browser executable override |
#[cfg(feature = "env-config")]
pub mod env {
    use super::*;
    use crate::error::ScoutError;

    /// Default environment file name.
    pub const ENV_FILE_NAME: &str = "app.env";

    /// Load environment variables from the `app.env` file.
    ///
    /// Automatically called by [`from_env`]; call it explicitly to load the
    /// file earlier or to check for errors.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)` if the file was found and loaded successfully
    /// - `Err(dotenvy::Error)` if the file was not found or couldn't be parsed
    pub fn load_env_file() -> Result<std::path::PathBuf, dotenvy::Error> {
        dotenvy::from_filename(ENV_FILE_NAME)
    }

    /// Load configuration from environment variables.
    ///
    /// Reads configuration with sensible defaults, loading `app.env` first
    /// if present. Values that fail to parse fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Configuration`] if the assembled configuration
    /// fails validation (e.g. `SCOUT_POOL_CAPACITY=0`).
    pub fn from_env() -> Result<ScoutConfig, ScoutError> {
        match load_env_file() {
            Ok(path) => {
                log::info!("Loaded configuration from: {:?}", path);
            }
            Err(e) => {
                log::debug!(
                    "No {} file found or failed to load: {} (using environment variables and defaults)",
                    ENV_FILE_NAME,
                    e
                );
            }
        }

        let capacity = std::env::var("SCOUT_POOL_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(2);

        let op_timeout_seconds = std::env::var("SCOUT_OP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(45u64);

        let nav_timeout_seconds = std::env::var("SCOUT_NAV_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(20u64);

        let probe_budget_ms = std::env::var("SCOUT_PROBE_BUDGET_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(6000u64);

        let user_agent =
            std::env::var("SCOUT_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        let base_url =
            std::env::var("SCOUT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        log::info!("Loading scout configuration from environment:");
        log::info!("   - Pool capacity: {}", capacity);
        log::info!("   - Operation timeout: {}s", op_timeout_seconds);
        log::info!("   - Navigation timeout: {}s", nav_timeout_seconds);
        log::info!("   - Probe budget: {}ms", probe_budget_ms);
        log::info!("   - Base URL: {}", base_url);

        ScoutConfigBuilder::new()
            .capacity(capacity)
            .op_timeout(Duration::from_secs(op_timeout_seconds))
            .nav_timeout(Duration::from_secs(nav_timeout_seconds))
            .probe_budget(Duration::from_millis(probe_budget_ms))
            .user_agent(user_agent)
            .base_url(base_url)
            .build()
            .map_err(ScoutError::Configuration)
    }

    /// Get the browser executable path from the environment.
    ///
    /// Reads the `CHROME_PATH` environment variable.
    ///
    /// **Note:** Call [`from_env`] or [`load_env_file`] first to ensure
    /// `app.env` is loaded if you're using a configuration file.
    ///
    /// # Returns
    ///
    /// - `Some(path)` if `CHROME_PATH` is set
    /// - `None` if not set (the fallback chain resolves the executable)
    pub fn chrome_path_from_env() -> Option<String> {
        std::env::var("CHROME_PATH").ok()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Verifies that ScoutConfigBuilder correctly sets all configuration
    /// values on the happy path.
    #[test]
    fn test_config_builder() {
        let config = ScoutConfigBuilder::new()
            .capacity(4)
            .op_timeout(Duration::from_secs(90))
            .nav_timeout(Duration::from_secs(30))
            .probe_budget(Duration::from_millis(4500))
            .user_agent("TestAgent/1.0")
            .viewport(1920, 1080)
            .base_url("https://example.com")
            .build()
            .unwrap();

        assert_eq!(config.capacity, 4);
        assert_eq!(config.op_timeout.as_secs(), 90);
        assert_eq!(config.nav_timeout.as_secs(), 30);
        assert_eq!(config.probe_budget.as_millis(), 4500);
        assert_eq!(config.user_agent, "TestAgent/1.0");
        assert_eq!(config.viewport, (1920, 1080));
        assert_eq!(config.base_url, "https://example.com");
    }

    /// Verifies that the builder rejects zero capacity.
    #[test]
    fn test_config_rejects_zero_capacity() {
        let result = ScoutConfigBuilder::new().capacity(0).build();

        assert!(result.is_err());
        let err_msg = result.unwrap_err();
        assert!(
            err_msg.contains("capacity must be greater than 0"),
            "Expected validation error message, got: {}",
            err_msg
        );
    }

    /// Verifies that a navigation budget longer than the operation deadline
    /// is rejected.
    #[test]
    fn test_config_rejects_nav_exceeding_op_timeout() {
        let result = ScoutConfigBuilder::new()
            .op_timeout(Duration::from_secs(10))
            .nav_timeout(Duration::from_secs(30))
            .build();

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("nav_timeout"));
    }

    /// Verifies that zero durations are rejected.
    #[test]
    fn test_config_rejects_zero_durations() {
        let result = ScoutConfigBuilder::new()
            .probe_budget(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }

    /// Verifies that a malformed or non-http base URL is rejected.
    #[test]
    fn test_config_rejects_bad_base_url() {
        let result = ScoutConfigBuilder::new().base_url("not-a-url").build();
        assert!(result.is_err());

        let result = ScoutConfigBuilder::new().base_url("ftp://files.example.com").build();
        assert!(result.is_err());
    }

    /// Verifies that default configuration values are production-ready.
    #[test]
    fn test_config_defaults() {
        let config = ScoutConfig::default();

        assert_eq!(config.capacity, 2, "Default capacity should be 2");
        assert_eq!(
            config.op_timeout,
            Duration::from_secs(45),
            "Default operation deadline should be 45s"
        );
        assert_eq!(
            config.nav_timeout,
            Duration::from_secs(20),
            "Default navigation budget should be 20s"
        );
        assert_eq!(
            config.probe_budget,
            Duration::from_secs(6),
            "Default probe budget should be 6s"
        );
        assert!(config.user_agent.contains("Chrome"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        // Defaults must pass their own validation.
        assert!(ScoutConfigBuilder::new().build().is_ok());
    }

    /// Verifies that ScoutConfigBuilder implements Default.
    #[test]
    fn test_builder_default() {
        let builder: ScoutConfigBuilder = Default::default();
        let config = builder.build().unwrap();

        assert_eq!(config.capacity, 2);
    }
}
