//! Path utilities for the Zellij sandbox environment.
//!
//! This module provides the plugin's data directory inside the Zellij plugin
//! sandbox, where the host filesystem is mounted under `/host`.

use std::path::PathBuf;

/// Returns the data directory for zlookup output.
///
/// The directory is located at `/host/.local/share/zellij/zlookup` in the
/// Zellij sandbox. In Zellij's plugin environment, `/host` points to the cwd
/// of the last focused terminal, or the folder where Zellij was started if
/// that's not available.
///
/// This typically resolves to the user's home directory when Zellij is
/// started from a home directory terminal, making the actual path
/// `~/.local/share/zellij/zlookup`. The rotating trace file
/// `zlookup-otlp.json` is located within this directory.
///
/// # Examples
///
/// ```
/// use zlookup::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/zlookup");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zlookup")
}
