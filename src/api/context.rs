//! Fetch context encoding with trace propagation.
//!
//! Zellij returns a fetch's context map verbatim with the response event. The
//! plugin uses it to carry the request generation (for superseded-response
//! discard) and the issuing span's OpenTelemetry identity, so the span that
//! applies a response can be linked to the span that issued the fetch.

use std::collections::BTreeMap;

/// Context key holding the request kind.
const KEY_KIND: &str = "zlookup_kind";

/// Context key holding the request generation.
const KEY_GENERATION: &str = "zlookup_generation";

/// Context key holding the trace ID.
const KEY_TRACE_ID: &str = "zlookup_trace_id";

/// Context key holding the parent span ID.
const KEY_PARENT_SPAN_ID: &str = "zlookup_parent_span_id";

/// Distributed tracing context for cross-boundary span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity across the asynchronous web-request boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across the fetch boundary.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Extracts the OpenTelemetry trace ID and span ID from the active span.
    /// Returns `None` if the current span context is invalid or not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            Some(Self {
                trace_id: format!("{:032x}", span_context.trace_id()),
                parent_span_id: format!("{:016x}", span_context.span_id()),
            })
        } else {
            None
        }
    }

    /// Attaches this context as the remote parent of the current thread.
    ///
    /// Reconstructs the OpenTelemetry context from the serialized trace
    /// information, allowing spans created while handling a response to be
    /// linked to the span that issued the fetch. Returns `None` if the IDs
    /// do not parse; the guard must be held for the duration of handling.
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context =
            opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }
}

/// Which endpoint a fetch targets.
///
/// Routes a completed fetch to the right handler: table search responses go
/// to the browser session, smart value responses to the tooltip overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Lookup table search/page request.
    TableSearch,
    /// Smart values request.
    SmartValues,
}

impl FetchKind {
    /// Wire name used inside the context map.
    const fn as_str(self) -> &'static str {
        match self {
            Self::TableSearch => "table-search",
            Self::SmartValues => "smart-values",
        }
    }

    /// Parses the wire name back into a kind.
    fn from_str(value: &str) -> Option<Self> {
        match value {
            "table-search" => Some(Self::TableSearch),
            "smart-values" => Some(Self::SmartValues),
            _ => None,
        }
    }
}

/// Everything the plugin needs back when a fetch resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchContext {
    /// Endpoint the fetch targeted.
    pub kind: FetchKind,

    /// Generation the fetch was issued under.
    pub generation: u64,

    /// Trace identity of the issuing span, if one was sampled.
    pub trace: Option<TraceContext>,
}

impl FetchContext {
    /// Creates a context for a fetch issued now, capturing the current span.
    #[must_use]
    pub fn new(kind: FetchKind, generation: u64) -> Self {
        Self {
            kind,
            generation,
            trace: TraceContext::from_current(),
        }
    }

    /// Encodes the context into the map handed to `web_request`.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(KEY_KIND.to_string(), self.kind.as_str().to_string());
        map.insert(KEY_GENERATION.to_string(), self.generation.to_string());
        if let Some(trace) = &self.trace {
            map.insert(KEY_TRACE_ID.to_string(), trace.trace_id.clone());
            map.insert(
                KEY_PARENT_SPAN_ID.to_string(),
                trace.parent_span_id.clone(),
            );
        }
        map
    }

    /// Decodes a context from a response event's context map.
    ///
    /// Returns `None` for maps that were not produced by [`to_map`], so
    /// unrelated web-request results are ignored instead of misrouted.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        let kind = FetchKind::from_str(map.get(KEY_KIND)?)?;
        let generation = map.get(KEY_GENERATION)?.parse::<u64>().ok()?;

        let trace = match (map.get(KEY_TRACE_ID), map.get(KEY_PARENT_SPAN_ID)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Some(Self {
            kind,
            generation,
            trace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_round_trips_through_map() {
        let context = FetchContext {
            kind: FetchKind::TableSearch,
            generation: 17,
            trace: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
                parent_span_id: "b7ad6b7169203331".to_string(),
            }),
        };

        let decoded = FetchContext::from_map(&context.to_map()).unwrap();
        assert_eq!(decoded, context);
    }

    #[test]
    fn context_round_trips_without_trace() {
        let context = FetchContext {
            kind: FetchKind::SmartValues,
            generation: 3,
            trace: None,
        };

        let decoded = FetchContext::from_map(&context.to_map()).unwrap();
        assert_eq!(decoded, context);
    }

    #[test]
    fn unrelated_map_is_rejected() {
        let mut map = BTreeMap::new();
        map.insert("someone_elses_key".to_string(), "value".to_string());
        assert!(FetchContext::from_map(&map).is_none());
    }

    #[test]
    fn malformed_generation_is_rejected() {
        let mut map = FetchContext::new(FetchKind::TableSearch, 1).to_map();
        map.insert(KEY_GENERATION.to_string(), "not-a-number".to_string());
        assert!(FetchContext::from_map(&map).is_none());
    }
}
