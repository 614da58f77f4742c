//! Backend request layer.
//!
//! This module builds the URLs and request contexts for the two backend
//! endpoints the plugin talks to. Fetches themselves are issued by the plugin
//! shim through Zellij's host-side web-request support; this layer stays pure
//! so it can be tested without a runtime.
//!
//! # Request contexts
//!
//! Zellij hands a fetch's context map back untouched when the response event
//! arrives. The plugin rides two things on it: the request *generation* used
//! to discard superseded responses, and the issuing span's trace identity so
//! response handling can be linked to the span that started the fetch.
//!
//! # Modules
//!
//! - [`request`]: Endpoint URL and query-string construction
//! - [`context`]: Fetch context encoding with trace propagation

pub mod context;
pub mod request;

pub use context::{FetchContext, FetchKind, TraceContext};
pub use request::{search_url, smart_values_url, SearchRequest};
