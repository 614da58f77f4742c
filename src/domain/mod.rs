//! Domain layer for the zlookup plugin.
//!
//! This module contains the core domain types for the plugin, independent of
//! Zellij-specific APIs or infrastructure concerns. It holds the wire types
//! decoded from backend responses and the shared error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`table`]: Lookup table page and entry wire types
//! - [`smart_values`]: Smart value set wire types
//!
//! # Examples
//!
//! ```
//! use zlookup::domain::{Result, TablePage};
//!
//! fn decode_page(body: &[u8]) -> Result<TablePage> {
//!     Ok(serde_json::from_slice(body)?)
//! }
//! ```

pub mod error;
pub mod smart_values;
pub mod table;

pub use error::{LookupError, Result};
pub use smart_values::{SmartValue, SmartValueSet};
pub use table::{TableEntry, TablePage};
