//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module provides utilities for working with the Zellij plugin sandbox
//! environment, particularly the data directory where trace output lives.

pub mod paths;

pub use paths::get_data_dir;
