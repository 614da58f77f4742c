//! Error types for the zlookup plugin.
//!
//! This module defines the centralized error type [`LookupError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for zlookup plugin operations.
///
/// This enum consolidates all error conditions that can occur during plugin execution,
/// from backend fetches to theme loading and pipe protocol issues. Variants that wrap
/// underlying errors from external crates use `#[from]` for automatic conversion.
///
/// # Examples
///
/// ```
/// use zlookup::domain::LookupError;
///
/// fn validate_config() -> Result<(), LookupError> {
///     Err(LookupError::Config("missing base_url".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum LookupError {
    /// A backend fetch completed with a non-success status.
    ///
    /// Carries the HTTP status code reported by the Zellij web-request host.
    /// The previously rendered state is kept when this occurs.
    #[error("Fetch failed with status {0}")]
    Fetch(u16),

    /// A backend response body could not be decoded.
    ///
    /// Wraps errors from `serde_json` when the response shape does not match
    /// the expected wire format. Treated as an environment contract violation.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations (trace file writes,
    /// theme file reads). Automatically converts from `std::io::Error`.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    ///
    /// Occurs when the plugin cannot parse or apply the configured theme.
    /// The string contains a description of what went wrong.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A pipe message could not be interpreted.
    ///
    /// Occurs when an open pipe arrives without its required arguments or with
    /// a malformed reply route. The string describes the protocol violation.
    #[error("Pipe protocol error: {0}")]
    Pipe(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed.
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for zlookup operations.
///
/// This is a type alias for `std::result::Result<T, LookupError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, LookupError>;
