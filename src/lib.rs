//! zlookup: a Zellij plugin for browsing server-side lookup tables.
//!
//! zlookup is a terminal overlay that lets the user open a named reference
//! table served by a backend, search it as they type, page through results
//! with server-supplied cursors, inspect an expandable per-row source detail,
//! and optionally hand a selected row's code and label back to whoever opened
//! the browser. A second, smaller overlay attaches a signed, lazily-fetched
//! set of contextual actions ("smart values") to an on-screen element as a
//! dismissible tooltip.
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Debounce, paging
//! │  - Action dispatching                               │  ← Stale discard
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │   │ Domain Layer  │
//! │ (ui/)         │   │ (api/)        │   │ (domain/)     │
//! │ - Rendering   │   │ - URLs        │   │ - Wire types  │
//! │ - Theming     │   │ - Contexts    │   │ - Errors      │
//! │ - Components  │   │ - Tracing     │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`api`]: Backend URL construction and fetch contexts
//! - [`domain`]: Wire types and errors
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`ui`]: Terminal rendering with theme support
//! - `observability`: OpenTelemetry tracing (internal)
//!
//! # Configuration
//!
//! The plugin is configured via Zellij's plugin configuration:
//!
//! ```kdl
//! // ~/.config/zellij/layouts/default.kdl
//! pane {
//!     plugin location="file:/path/to/zlookup.wasm" {
//!         base_url "http://localhost:9000"
//!         debounce_ms "100"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Interaction Flow
//!
//! 1. **Open pipe** (`zlookup:open`): a consumer names a table (and
//!    optionally an initial query, a label format, and a reply route). The
//!    plugin creates a fresh session, fetches the first page, and shows the
//!    overlay once it rendered.
//! 2. **Search-as-you-type**: keystrokes reset the cursor to the first page
//!    and schedule a debounced reload; only the last keystroke of a burst
//!    issues a fetch.
//! 3. **Pagination**: the controls carry server-supplied cursors; activating
//!    an enabled one reloads at exactly that offset.
//! 4. **Selection**: activating a row hides the overlay and delivers the
//!    row's code and label over the reply route.
//!
//! # Key Design Decisions
//!
//! ## Request Generations
//!
//! Fetches resolve asynchronously on the plugin's event loop. Every fetch is
//! issued under a monotonically increasing generation, and responses are
//! applied only when their generation is still current. A slow first page
//! can never overwrite a newer one, even across session replacement.
//!
//! ## Whole-Session Replacement
//!
//! Opening a table always builds a fresh session and discards the previous
//! one. There is no incremental reuse, so stale rows, pending debounces, or
//! in-flight fetches from the old table cannot survive into the new one.
//!
//! ## Immutable View Models
//!
//! UI rendering uses computed view models:
//! - Clear separation between state and display
//! - Enables testing the controller without a terminal
//! - Pre-computes expensive operations (query match highlighting)
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SelectionTarget, Session};
pub use domain::{LookupError, Result, TableEntry, TablePage};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Default quiet period for search-as-you-type, in milliseconds.
const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Default backend base URL.
const DEFAULT_BASE_URL: &str = "http://localhost:9000";

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Configuration values are provided via Zellij's KDL layout configuration
/// and passed to the plugin during initialization.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/zlookup.wasm" {
///     base_url "https://backend.example.com"
///     debounce_ms "150"
///     theme "catppuccin-latte"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL all fetches are built against.
    ///
    /// Scheme and authority only; the endpoint paths are fixed.
    /// Default: `http://localhost:9000`
    pub base_url: String,

    /// Quiet period for search-as-you-type, in milliseconds.
    ///
    /// A reload is issued once no keystroke arrived for this long.
    /// Default: 100
    pub debounce_ms: u64,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Zellij provides configuration as a `BTreeMap<String, String>` during
    /// plugin initialization. This function extracts and parses typed values
    /// with fallback defaults.
    ///
    /// # Parsing Rules
    ///
    /// - `base_url`: String, trailing slash trimmed (defaults to localhost)
    /// - `debounce_ms`: String → `u64` (falls back to 100 on parse error)
    /// - `theme`: String → `Option<String>`
    /// - `theme_file`: String → `Option<String>`
    /// - `trace_level`: String → `Option<String>`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zlookup::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "http://backend:9000/".to_string());
    /// map.insert("debounce_ms".to_string(), "150".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.base_url, "http://backend:9000");
    /// assert_eq!(config.debounce_ms, 150);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let base_url = config
            .get("base_url")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let debounce_ms = config
            .get("debounce_ms")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_DEBOUNCE_MS);

        Self {
            base_url,
            debounce_ms,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }
}

/// Initializes the plugin with configuration.
///
/// Creates a new `AppState` with:
/// - Loaded theme (from file, name, or default)
/// - The configured backend base URL and debounce period
/// - No open overlays (populated later by open pipes)
///
/// # Parameters
///
/// * `config` - Plugin configuration
///
/// # Returns
///
/// An initialized `AppState` ready for event processing.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing zlookup plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(
                Theme::default,
                |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "failed to load theme, using default");
                        Theme::default()
                    })
                },
            )
        },
        |theme_file| {
            Theme::from_file(theme_file.clone()).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(config.base_url.clone(), config.debounce_ms, theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_apply_for_empty_map() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert!(config.theme_name.is_none());
    }

    #[test]
    fn config_trims_trailing_slash_from_base_url() {
        let mut map = BTreeMap::new();
        map.insert("base_url".to_string(), "http://backend:9000/".to_string());

        let config = Config::from_zellij(&map);
        assert_eq!(config.base_url, "http://backend:9000");
    }

    #[test]
    fn config_falls_back_on_unparsable_debounce() {
        let mut map = BTreeMap::new();
        map.insert("debounce_ms".to_string(), "soon".to_string());

        let config = Config::from_zellij(&map);
        assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
    }

    #[test]
    fn initialize_uses_named_theme() {
        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            ..Default::default()
        };

        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-latte");
    }

    #[test]
    fn initialize_falls_back_to_default_theme_on_unknown_name() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Default::default()
        };

        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-mocha");
    }
}
