//! Chrome/Chromium browser factory implementation.
//!
//! This module provides [`ChromeBrowserFactory`] for launching headless
//! Chrome instances with a production-ready configuration, and the
//! executable resolution chain used when no explicit path is configured.
//!
//! # Executable Resolution
//!
//! The launch path is resolved through a fallback chain:
//!
//! 1. Explicitly configured path (`CHROME_PATH` / [`with_path`])
//! 2. Platform-default candidate locations
//! 3. `headless_chrome`'s own auto-detection
//!
//! [`with_path`]: ChromeBrowserFactory::with_path

use std::path::Path;

use headless_chrome::{Browser, LaunchOptions};

use super::BrowserFactory;
use crate::error::{Result, ScoutError};

/// Candidate executable locations tried when no explicit path is
/// configured. First existing entry wins.
const EXECUTABLE_CANDIDATES: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
];

/// Factory for launching Chrome/Chromium engine instances.
///
/// Handles Chrome-specific launch options and executable resolution.
///
/// # Thread Safety
///
/// This factory is `Send + Sync` and can be safely shared across threads.
///
/// # Example
///
/// ```rust,ignore
/// use profile_scout::ChromeBrowserFactory;
///
/// // Resolve via the fallback chain
/// let factory = ChromeBrowserFactory::with_defaults();
///
/// // Or pin an executable
/// let factory = ChromeBrowserFactory::with_path("/usr/bin/chromium".to_string());
/// ```
pub struct ChromeBrowserFactory {
    /// Function that generates launch options for each launch attempt.
    ///
    /// This allows dynamic configuration per launch (e.g. re-reading the
    /// environment after a config change).
    launch_options_fn: Box<dyn Fn() -> Result<LaunchOptions<'static>> + Send + Sync>,

    /// Viewport applied at the engine level; new contexts inherit it.
    window_size: (u32, u32),
}

impl ChromeBrowserFactory {
    /// Create a factory with a custom launch options function.
    pub fn new<F>(launch_options_fn: F) -> Self
    where
        F: Fn() -> Result<LaunchOptions<'static>> + Send + Sync + 'static,
    {
        Self {
            launch_options_fn: Box::new(launch_options_fn),
            window_size: (1280, 800),
        }
    }

    /// Create a factory that resolves the executable via the fallback
    /// chain. This is the recommended default.
    pub fn with_defaults() -> Self {
        log::debug!("Creating ChromeBrowserFactory with executable fallback chain");
        Self::new(|| create_launch_options(resolve_executable(None), (1280, 800)))
    }

    /// Create a factory pinned to a specific executable path.
    ///
    /// The path still goes through the fallback chain: if it does not
    /// exist, the platform candidates and auto-detection are tried instead
    /// of failing outright, with a warning logged.
    pub fn with_path(chrome_path: String) -> Self {
        log::debug!(
            "Creating ChromeBrowserFactory with configured path: {}",
            chrome_path
        );
        Self::new(move || {
            create_launch_options(resolve_executable(Some(&chrome_path)), (1280, 800))
        })
    }

    /// Create a factory with an optional pinned path and an explicit
    /// engine-level window size.
    pub fn with_options(chrome_path: Option<String>, window_size: (u32, u32)) -> Self {
        let mut factory = Self::new(move || {
            create_launch_options(resolve_executable(chrome_path.as_deref()), window_size)
        });
        factory.window_size = window_size;
        factory
    }
}

impl BrowserFactory for ChromeBrowserFactory {
    /// Launch a new Chrome engine instance.
    ///
    /// # Errors
    ///
    /// * Returns [`ScoutError::Configuration`] if launch options generation fails.
    /// * Returns [`ScoutError::EngineUnavailable`] if Chrome fails to launch.
    fn create(&self) -> Result<Browser> {
        log::trace!("ChromeBrowserFactory::create() called");

        let options = (self.launch_options_fn)()?;

        log::debug!("Launching headless Chrome...");
        Browser::new(options).map_err(|e| {
            log::error!("❌ Chrome launch failed: {}", e);
            ScoutError::EngineUnavailable(e.to_string())
        })
    }
}

/// Resolve the browser executable through the fallback chain.
///
/// 1. `configured`, used if set and the path exists (warns and falls
///    through otherwise)
/// 2. First existing entry of the platform candidate list
/// 3. `None`, letting `headless_chrome` self-resolve
pub fn resolve_executable(configured: Option<&str>) -> Option<std::path::PathBuf> {
    if let Some(path) = configured {
        if Path::new(path).exists() {
            log::debug!("Using configured browser executable: {}", path);
            return Some(path.into());
        }
        log::warn!(
            "⚠️ Configured browser executable '{}' does not exist, trying platform candidates",
            path
        );
    }

    for candidate in EXECUTABLE_CANDIDATES {
        if Path::new(candidate).exists() {
            log::debug!("Using platform browser executable: {}", candidate);
            return Some(candidate.into());
        }
    }

    log::debug!("No known browser executable found, deferring to auto-detection");
    None
}

/// Create launch options for stable headless operation.
///
/// # Parameters
///
/// * `path` - Resolved executable path, or `None` for auto-detection.
/// * `window_size` - Engine-level window size; contexts inherit it.
///
/// # Chrome Flags Applied
///
/// Headless mode with the sandbox disabled (required in containers), plus
/// the stability flags the pages this crate targets need: `/dev/shm` usage
/// disabled for container friendliness, GPU compositing off, background
/// throttling off so a backgrounded tab keeps rendering, and automation
/// banners suppressed.
pub fn create_launch_options(
    path: Option<std::path::PathBuf>,
    window_size: (u32, u32),
) -> Result<LaunchOptions<'static>> {
    match &path {
        Some(p) => log::debug!("Creating launch options with executable: {:?}", p),
        None => log::debug!("Creating launch options (auto-detect executable)"),
    }

    let mut builder = LaunchOptions::default_builder();

    if let Some(p) = path {
        builder.path(Some(p));
    }

    builder
        .headless(true) // Run in headless mode
        .sandbox(false) // Disable sandbox (required in containers)
        .window_size(Some(window_size))
        .args(vec![
            // ===== Memory and Stability =====
            "--disable-dev-shm-usage".as_ref(), // Use /tmp instead of /dev/shm (container-friendly)
            "--disable-crash-reporter".as_ref(),
            // ===== GPU and Rendering =====
            "--disable-gpu-compositing".as_ref(),
            "--disable-software-rasterizer".as_ref(),
            // ===== Disable Unnecessary Features =====
            "--disable-extensions".as_ref(),
            "--disable-sync".as_ref(),
            "--disable-default-apps".as_ref(),
            // ===== Keep background tabs rendering =====
            "--disable-background-timer-throttling".as_ref(),
            "--disable-backgrounding-occluded-windows".as_ref(),
            "--disable-renderer-backgrounding".as_ref(),
            // ===== Stability =====
            "--disable-hang-monitor".as_ref(),
            "--disable-ipc-flooding-protection".as_ref(),
            // ===== Automation =====
            "--disable-blink-features=AutomationControlled".as_ref(),
        ])
        .build()
        .map_err(|e| {
            log::error!("❌ Failed to build launch options: {}", e);
            ScoutError::Configuration(e.to_string())
        })
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Verifies that ChromeBrowserFactory can be instantiated in every
    /// mode. Does not launch browsers.
    #[test]
    fn test_chrome_factory_creation() {
        let _factory = ChromeBrowserFactory::with_defaults();
        let _factory_with_path =
            ChromeBrowserFactory::with_path("/custom/chrome/path".to_string());
        let _factory_with_options =
            ChromeBrowserFactory::with_options(None, (1920, 1080));
    }

    /// Verifies that launch options can be built for both resolution modes.
    #[test]
    fn test_create_launch_options() {
        let result = create_launch_options(None, (1280, 800));
        assert!(
            result.is_ok(),
            "Auto-detect launch options should build successfully: {:?}",
            result.err()
        );

        let result = create_launch_options(Some("/custom/chrome/path".into()), (1280, 800));
        assert!(
            result.is_ok(),
            "Pinned-path launch options should build successfully: {:?}",
            result.err()
        );
    }

    /// Verifies that a nonexistent configured path falls through the chain
    /// instead of being used verbatim.
    #[test]
    fn test_resolve_executable_ignores_missing_configured_path() {
        let resolved = resolve_executable(Some("/definitely/not/a/real/browser"));

        if let Some(path) = resolved {
            assert!(
                path.exists(),
                "fallback chain must only yield existing paths"
            );
        }
        // None is also correct: it defers to auto-detection.
    }
}
