//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input or fetch results.
//! Actions bridge pure state transformations and effectful operations like
//! issuing web requests, arming timers, or delivering a selection to the
//! consumer that opened the browser.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event,
//! allowing multiple side effects to be queued atomically (hide the overlay,
//! *then* deliver the selection). The plugin runtime executes them in order.

use crate::api::FetchContext;
use crate::app::session::SelectionTarget;

/// Commands representing side effects to be executed by the plugin runtime.
///
/// Actions are produced by the event handler and executed by the action
/// processor in `main.rs`. They represent the boundary between pure state
/// transformations and effectful Zellij API calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Closes the focused floating pane, ending the plugin UI entirely.
    ///
    /// Sent when the user explicitly quits (e.g. pressing 'q').
    CloseFocus,

    /// Makes the plugin pane visible.
    ///
    /// Emitted after the first page of a new session has been applied, so the
    /// overlay appears already populated, and immediately for the smart
    /// values overlay, which shows its own loading state.
    Show,

    /// Hides the plugin pane without destroying it.
    ///
    /// Emitted when an overlay is dismissed, and before a selection is
    /// delivered: the consumer's callback runs against a hidden overlay.
    Hide,

    /// Issues one asynchronous GET against the backend.
    ///
    /// The context rides along with the request and is echoed back with the
    /// response event, carrying the generation used to discard superseded
    /// responses.
    Fetch {
        /// Fully-built request URL including query string.
        url: String,
        /// Routing, ordering, and trace metadata for the response.
        context: FetchContext,
    },

    /// Arms one timer for the debounced reload.
    ///
    /// One timer per schedule call; expiry arrives back as a timer event.
    StartTimer {
        /// Delay until expiry, in seconds.
        seconds: f64,
    },

    /// Delivers a selected row to the consumer that opened the browser.
    ///
    /// Emitted at most once per activation, after [`Action::Hide`].
    DeliverSelection {
        /// Reply route supplied when the session was opened.
        target: SelectionTarget,
        /// Selected entry's code.
        code: String,
        /// Selected entry's label.
        label: String,
    },

    /// Releases a reply route without delivering a selection.
    ///
    /// Emitted when a session with a reply route dies unselected (dismissal,
    /// quit, or replacement by a new open), so a consumer blocked on a CLI
    /// pipe is not left hanging.
    ReleaseReply {
        /// Reply route of the abandoned session.
        target: SelectionTarget,
    },
}
