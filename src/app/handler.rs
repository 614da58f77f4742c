//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! timer expiries, and completed fetches, translating them into state changes
//! and action sequences. It is the browser controller: debounced search,
//! cursor pagination, selection delivery, and stale response discard all run
//! through [`handle_event`].
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime (keys, pipes, timers, fetches)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState`/`Session` methods
//! 4. Actions are collected and returned for execution
//!
//! # Ordering and teardown
//!
//! Fetch completions carry the generation they were issued under; only the
//! generation most recently issued for the owning session/overlay is applied,
//! so a slow response can never overwrite newer state, including across
//! session replacement, where the old session is gone entirely. Transport
//! failures and undecodable bodies return an error (surfaced by the runtime's
//! generic logging) and leave the previous rendered state untouched.
//!
//! # Transient overlay dismissal
//!
//! The smart-values overlay is dismissed by *any* user input. That rule lives
//! in one place, at the top of the handler, delegating to whichever transient
//! overlay currently occupies the slot in `AppState`. There are no
//! per-overlay dismissal listeners to attach or leak.

use crate::api::{FetchKind, TraceContext};
use crate::app::modes::InputMode;
use crate::app::session::{SelectionTarget, Session};
use crate::app::state::SmartValuesPhase;
use crate::app::{Action, AppState};
use crate::domain::error::{LookupError, Result};
use crate::domain::{SmartValueSet, TablePage};

/// Events triggered by user input, pipes, timers, or completed fetches.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Opens (or reopens) the browser for a table, superseding any session.
    OpenBrowser {
        /// Name of the table to browse.
        table_name: String,
        /// Opaque label format forwarded with every fetch.
        label_format: Option<String>,
        /// Initial query to seed the search field with.
        initial_query: Option<String>,
        /// Reply route for row activation; `None` makes the session browse-only.
        selection: Option<SelectionTarget>,
    },

    /// Opens the smart-values overlay for an on-screen element.
    OpenSmartValues {
        /// Element type the values are computed for.
        value_type: String,
        /// Opaque payload identifying the element.
        payload: String,
        /// Server-issued signature authenticating the request.
        signature: String,
    },

    /// Appends a character to the query (keystroke in the query field).
    Char(char),
    /// Removes the last character from the query.
    Backspace,

    /// Moves the row selection down by one position (wraps to top).
    KeyDown,
    /// Moves the row selection up by one position (wraps to bottom).
    KeyUp,
    /// Shifts focus from the query field to the result list.
    FocusResults,
    /// Returns focus to the query field.
    FocusQuery,

    /// Activates the previous-page control.
    PagePrev,
    /// Activates the next-page control.
    PageNext,

    /// Flips the selected row's source panel between shown and hidden.
    ToggleSource,

    /// Activates the selected row (selection delivery, if a route is set).
    Activate,

    /// Dismisses the open overlay.
    Escape,
    /// Closes the plugin pane entirely.
    CloseFocus,

    /// A debounce timer armed by a keystroke expired.
    DebounceElapsed,

    /// A fetch issued earlier resolved.
    FetchCompleted {
        /// Endpoint the fetch targeted.
        kind: FetchKind,
        /// Generation the fetch was issued under.
        generation: u64,
        /// HTTP status reported by the host.
        status: u16,
        /// Trace identity of the issuing span, re-attached while handling.
        trace: Option<TraceContext>,
        /// Raw response body.
        body: Vec<u8>,
    },
}

impl Event {
    /// Short name for tracing, avoiding Debug-printing response bodies.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenBrowser { .. } => "OpenBrowser",
            Self::OpenSmartValues { .. } => "OpenSmartValues",
            Self::Char(_) => "Char",
            Self::Backspace => "Backspace",
            Self::KeyDown => "KeyDown",
            Self::KeyUp => "KeyUp",
            Self::FocusResults => "FocusResults",
            Self::FocusQuery => "FocusQuery",
            Self::PagePrev => "PagePrev",
            Self::PageNext => "PageNext",
            Self::ToggleSource => "ToggleSource",
            Self::Activate => "Activate",
            Self::Escape => "Escape",
            Self::CloseFocus => "CloseFocus",
            Self::DebounceElapsed => "DebounceElapsed",
            Self::FetchCompleted { .. } => "FetchCompleted",
        }
    }

    /// Whether the event originates from direct user input.
    ///
    /// User input dismisses the transient smart-values overlay; timers,
    /// fetch completions, and open pipes do not.
    const fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::Char(_)
                | Self::Backspace
                | Self::KeyDown
                | Self::KeyUp
                | Self::FocusResults
                | Self::FocusQuery
                | Self::PagePrev
                | Self::PageNext
                | Self::ToggleSource
                | Self::Activate
                | Self::Escape
                | Self::CloseFocus
        )
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// This is the primary event handler coordinating all state transitions and
/// side effects.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// A tuple of (should re-render, actions to execute in order). The action
/// vector may be empty when the event has no side effects.
///
/// # Errors
///
/// Returns [`LookupError::Fetch`] for non-success fetch statuses and
/// [`LookupError::Decode`] for undecodable response bodies. In both cases
/// state is untouched: the previous render stays visible.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event = %event.name()).entered();

    // Single dismissal path for the transient overlay: any user input while
    // it is active dismisses it and is consumed.
    if state.smart_values.is_some() && event.is_user_input() {
        tracing::debug!("dismissing smart values overlay on user input");
        return Ok(dismiss_smart_values(state));
    }

    match event {
        Event::OpenBrowser {
            table_name,
            label_format,
            initial_query,
            selection,
        } => {
            tracing::debug!(table = %table_name, "opening lookup table browser");

            // The new session replaces everything: previous rows, pending
            // debounce, and any in-flight fetch (whose generation is now
            // stale and will be discarded on arrival).
            let mut actions = Vec::new();
            if let Some(old) = state.browser.take() {
                if let Some(target) = old.selection {
                    actions.push(Action::ReleaseReply { target });
                }
            }

            state.smart_values = None;
            state.debouncer.cancel();
            state.input_mode = InputMode::Typing;
            state.browser = Some(Session::new(
                table_name.clone(),
                label_format.clone(),
                selection.clone(),
                initial_query.clone(),
            ));

            actions.extend(state.issue_search());
            Ok((true, actions))
        }

        Event::OpenSmartValues {
            value_type,
            payload,
            signature,
        } => {
            let fetch = state.open_smart_values(value_type, payload, signature);
            Ok((true, vec![Action::Show, fetch]))
        }

        Event::Char(c) => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            let Some(session) = state.browser.as_mut() else {
                return Ok((false, vec![]));
            };

            session.query.push(*c);
            session.skip = 0;
            state.debouncer.schedule();

            tracing::trace!(query = %session.query, "query updated, reload scheduled");

            Ok((
                true,
                vec![Action::StartTimer {
                    seconds: state.debouncer.delay_seconds(),
                }],
            ))
        }

        Event::Backspace => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            let Some(session) = state.browser.as_mut() else {
                return Ok((false, vec![]));
            };

            session.query.pop();
            session.skip = 0;
            state.debouncer.schedule();

            Ok((
                true,
                vec![Action::StartTimer {
                    seconds: state.debouncer.delay_seconds(),
                }],
            ))
        }

        Event::KeyDown => {
            let Some(session) = state.browser.as_mut() else {
                return Ok((false, vec![]));
            };
            session.move_selection_down();
            Ok((true, vec![]))
        }

        Event::KeyUp => {
            let Some(session) = state.browser.as_mut() else {
                return Ok((false, vec![]));
            };
            session.move_selection_up();
            Ok((true, vec![]))
        }

        Event::FocusResults => {
            if state.browser.is_none() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Navigating;
            Ok((true, vec![]))
        }

        Event::FocusQuery => {
            state.input_mode = InputMode::Typing;
            Ok((true, vec![]))
        }

        Event::PagePrev => paginate(state, PageDirection::Prev),
        Event::PageNext => paginate(state, PageDirection::Next),

        Event::ToggleSource => {
            let Some(session) = state.browser.as_mut() else {
                return Ok((false, vec![]));
            };
            Ok((session.toggle_selected_source(), vec![]))
        }

        Event::Activate => {
            let Some(session) = state.browser.as_ref() else {
                return Ok((false, vec![]));
            };
            let Some(row) = session.selected_row() else {
                return Ok((false, vec![]));
            };
            let Some(target) = session.selection.clone() else {
                tracing::debug!("no reply route configured, session is browse-only");
                return Ok((false, vec![]));
            };

            let code = row.entry.code.clone();
            let label = row.entry.label.clone();

            tracing::debug!(code = %code, label = %label, "delivering selection");

            // The overlay is hidden before the consumer learns of the
            // selection, and the session dies with the activation.
            state.browser = None;
            state.debouncer.cancel();

            Ok((
                false,
                vec![
                    Action::Hide,
                    Action::DeliverSelection {
                        target,
                        code,
                        label,
                    },
                ],
            ))
        }

        Event::Escape => {
            tracing::debug!("dismissing browser overlay");
            let mut actions = vec![Action::Hide];
            actions.extend(teardown_session(state));
            state.input_mode = InputMode::Typing;
            Ok((false, actions))
        }

        Event::CloseFocus => {
            let mut actions = vec![Action::CloseFocus];
            actions.extend(teardown_session(state));
            Ok((false, actions))
        }

        Event::DebounceElapsed => {
            if !state.debouncer.timer_elapsed() {
                return Ok((false, vec![]));
            }
            let actions: Vec<Action> = state.issue_search().into_iter().collect();
            Ok((false, actions))
        }

        Event::FetchCompleted {
            kind,
            generation,
            status,
            trace,
            body,
        } => {
            let _trace_guard = trace.as_ref().and_then(TraceContext::attach);

            match kind {
                FetchKind::TableSearch => {
                    handle_search_response(state, *generation, *status, body)
                }
                FetchKind::SmartValues => {
                    handle_smart_values_response(state, *generation, *status, body)
                }
            }
        }
    }
}

/// Direction of a pagination activation.
#[derive(Debug, Clone, Copy)]
enum PageDirection {
    Prev,
    Next,
}

/// Handles a pagination control activation.
///
/// A disabled control carries no cursor and the activation is a silent no-op.
/// An enabled one moves the session cursor to exactly the server-supplied
/// value and reloads immediately, superseding any pending debounced reload.
fn paginate(state: &mut AppState, direction: PageDirection) -> Result<(bool, Vec<Action>)> {
    let cursor = state.browser.as_ref().and_then(|session| match direction {
        PageDirection::Prev => session.pagination.left.cursor(),
        PageDirection::Next => session.pagination.right.cursor(),
    });

    let Some(cursor) = cursor else {
        return Ok((false, vec![]));
    };

    state.debouncer.cancel();
    if let Some(session) = state.browser.as_mut() {
        session.skip = cursor;
    }

    let actions: Vec<Action> = state.issue_search().into_iter().collect();
    Ok((false, actions))
}

/// Applies a completed table search fetch.
///
/// Silently discards responses for a closed session or a superseded
/// generation; fails (state untouched) on non-success status or decode
/// errors; otherwise applies the page atomically and shows the overlay if
/// this was the session's first load.
fn handle_search_response(
    state: &mut AppState,
    generation: u64,
    status: u16,
    body: &[u8],
) -> Result<(bool, Vec<Action>)> {
    let Some(session) = state.browser.as_mut() else {
        tracing::debug!(generation, "search response with no open session, discarding");
        return Ok((false, vec![]));
    };

    if generation != session.generation {
        tracing::debug!(
            generation,
            current = session.generation,
            "superseded search response, discarding"
        );
        return Ok((false, vec![]));
    }

    if !(200..300).contains(&status) {
        return Err(LookupError::Fetch(status));
    }

    let page: TablePage = serde_json::from_slice(body)?;

    tracing::debug!(
        title = %page.title,
        entries = page.entries.len(),
        "applying search response"
    );

    session.apply_page(page);

    let mut actions = Vec::new();
    if !session.visible {
        session.visible = true;
        actions.push(Action::Show);
    }

    Ok((true, actions))
}

/// Applies a completed smart values fetch.
///
/// An empty value set dismisses the overlay outright; a non-empty one fills
/// the list. Discard and failure rules match the search response handler.
fn handle_smart_values_response(
    state: &mut AppState,
    generation: u64,
    status: u16,
    body: &[u8],
) -> Result<(bool, Vec<Action>)> {
    match state.smart_values.as_ref() {
        None => {
            tracing::debug!(generation, "smart values response with no overlay, discarding");
            return Ok((false, vec![]));
        }
        Some(overlay) if generation != overlay.generation => {
            tracing::debug!(
                generation,
                current = overlay.generation,
                "superseded smart values response, discarding"
            );
            return Ok((false, vec![]));
        }
        Some(_) => {}
    }

    if !(200..300).contains(&status) {
        return Err(LookupError::Fetch(status));
    }

    let set: SmartValueSet = serde_json::from_slice(body)?;

    if set.values.is_empty() {
        tracing::debug!("empty smart value set, dismissing overlay");
        return Ok(dismiss_smart_values(state));
    }

    if let Some(overlay) = state.smart_values.as_mut() {
        overlay.phase = SmartValuesPhase::Loaded(set.values);
    }

    Ok((true, vec![]))
}

/// Destroys the browser session, releasing an unused reply route if any.
fn teardown_session(state: &mut AppState) -> Option<Action> {
    state.debouncer.cancel();
    let target = state.browser.take().and_then(|session| session.selection);
    target.map(|target| Action::ReleaseReply { target })
}

/// Drops the transient overlay and restores whatever was underneath.
fn dismiss_smart_values(state: &mut AppState) -> (bool, Vec<Action>) {
    state.smart_values = None;

    if state.browser.as_ref().is_some_and(|session| session.visible) {
        (true, vec![])
    } else {
        (false, vec![Action::Hide])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::Theme;

    fn test_state() -> AppState {
        AppState::new("http://localhost:9000".to_string(), 100, Theme::default())
    }

    fn open(table: &str) -> Event {
        Event::OpenBrowser {
            table_name: table.to_string(),
            label_format: None,
            initial_query: None,
            selection: None,
        }
    }

    fn open_with_target(table: &str) -> Event {
        Event::OpenBrowser {
            table_name: table.to_string(),
            label_format: None,
            initial_query: None,
            selection: Some(SelectionTarget::CliPipe {
                pipe_name: "picker".to_string(),
            }),
        }
    }

    fn page_body(title: &str, prev: Option<u64>, next: Option<u64>) -> Vec<u8> {
        let mut page = serde_json::json!({
            "title": title,
            "description": "desc",
            "searchPlaceholder": "Search...",
            "paginationInfo": "1-2 of 240",
            "entries": [
                {"code": "de", "label": "Germany", "name": "Germany", "showCode": false,
                 "source": "code: de"},
                {"code": "fr", "label": "France", "name": "France", "showCode": false}
            ]
        });
        if let Some(prev) = prev {
            page["prevSkip"] = prev.into();
        }
        if let Some(next) = next {
            page["nextSkip"] = next.into();
        }
        serde_json::to_vec(&page).unwrap()
    }

    fn fetches(actions: &[Action]) -> Vec<(String, u64)> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::Fetch { url, context } => Some((url.clone(), context.generation)),
                _ => None,
            })
            .collect()
    }

    fn current_generation(state: &AppState) -> u64 {
        state.browser.as_ref().unwrap().generation
    }

    fn complete_search(
        state: &mut AppState,
        generation: u64,
        status: u16,
        body: Vec<u8>,
    ) -> Result<(bool, Vec<Action>)> {
        handle_event(
            state,
            &Event::FetchCompleted {
                kind: FetchKind::TableSearch,
                generation,
                status,
                trace: None,
                body,
            },
        )
    }

    fn complete_smart_values(
        state: &mut AppState,
        generation: u64,
        body: Vec<u8>,
    ) -> Result<(bool, Vec<Action>)> {
        handle_event(
            state,
            &Event::FetchCompleted {
                kind: FetchKind::SmartValues,
                generation,
                status: 200,
                trace: None,
                body,
            },
        )
    }

    /// Opens a table and applies its first page, returning to a settled state.
    fn open_and_load(state: &mut AppState, next: Option<u64>) {
        handle_event(state, &open("countries")).unwrap();
        let generation = current_generation(state);
        complete_search(state, generation, 200, page_body("Countries", None, next)).unwrap();
    }

    #[test]
    fn open_issues_initial_fetch_with_empty_query_and_zero_skip() {
        let mut state = test_state();
        let (render, actions) = handle_event(&mut state, &open("countries")).unwrap();

        assert!(render);
        let fetches = fetches(&actions);
        assert_eq!(fetches.len(), 1);
        assert!(fetches[0].0.ends_with("/countries?query=&skip=0"));

        let session = state.browser.as_ref().unwrap();
        assert_eq!(session.title, "countries");
        assert!(!session.visible);
    }

    #[test]
    fn first_load_applies_page_and_shows_overlay() {
        let mut state = test_state();
        handle_event(&mut state, &open("countries")).unwrap();
        let generation = current_generation(&state);

        let (render, actions) =
            complete_search(&mut state, generation, 200, page_body("Countries", None, Some(2)))
                .unwrap();

        assert!(render);
        assert_eq!(actions, vec![Action::Show]);

        let session = state.browser.as_ref().unwrap();
        assert!(session.visible);
        assert_eq!(session.title, "Countries");
        assert_eq!(session.placeholder, "Search...");
        assert_eq!(session.rows.len(), 2);
    }

    #[test]
    fn second_load_does_not_reemit_show() {
        let mut state = test_state();
        open_and_load(&mut state, Some(2));

        handle_event(&mut state, &Event::PageNext).unwrap();
        let generation = current_generation(&state);
        let (render, actions) =
            complete_search(&mut state, generation, 200, page_body("Countries", Some(0), None))
                .unwrap();

        assert!(render);
        assert!(actions.is_empty());
    }

    #[test]
    fn debounce_coalesces_burst_into_single_fetch() {
        let mut state = test_state();
        open_and_load(&mut state, None);

        let mut timer_count = 0;
        for c in ['g', 'e', 'r'] {
            let (_, actions) = handle_event(&mut state, &Event::Char(c)).unwrap();
            assert!(fetches(&actions).is_empty());
            timer_count += actions
                .iter()
                .filter(|a| matches!(a, Action::StartTimer { .. }))
                .count();
        }
        assert_eq!(timer_count, 3);

        // first two expiries are absorbed, the last one fires exactly one fetch
        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        assert!(fetches(&actions).is_empty());
        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        assert!(fetches(&actions).is_empty());
        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();

        let fetches = fetches(&actions);
        assert_eq!(fetches.len(), 1);
        assert!(fetches[0].0.contains("query=ger&skip=0"));
    }

    #[test]
    fn keystroke_resets_cursor_to_first_page() {
        let mut state = test_state();
        open_and_load(&mut state, Some(2));

        // page forward, then settle
        handle_event(&mut state, &Event::PageNext).unwrap();
        let generation = current_generation(&state);
        complete_search(
            &mut state,
            generation,
            200,
            page_body("Countries", Some(0), Some(4)),
        )
        .unwrap();
        assert_eq!(state.browser.as_ref().unwrap().skip, 2);

        handle_event(&mut state, &Event::Char('x')).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        assert!(fetches(&actions)[0].0.contains("skip=0"));
    }

    #[test]
    fn pagination_click_echoes_server_cursor_exactly() {
        let mut state = test_state();
        open_and_load(&mut state, Some(7));

        let (_, actions) = handle_event(&mut state, &Event::PageNext).unwrap();
        let fetches = fetches(&actions);
        assert_eq!(fetches.len(), 1);
        assert!(fetches[0].0.contains("skip=7"));
    }

    #[test]
    fn disabled_pagination_control_ignores_clicks() {
        let mut state = test_state();
        open_and_load(&mut state, Some(2));

        // first page: no prev cursor
        let (render, actions) = handle_event(&mut state, &Event::PagePrev).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn pagination_click_cancels_pending_debounce() {
        let mut state = test_state();
        open_and_load(&mut state, Some(2));

        handle_event(&mut state, &Event::Char('g')).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::PageNext).unwrap();
        assert_eq!(fetches(&actions).len(), 1);

        // the armed debounce was cancelled; its timer expiry is a no-op
        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        assert!(fetches(&actions).is_empty());
    }

    #[test]
    fn stale_response_is_discarded_for_all_interleavings() {
        let mut state = test_state();
        open_and_load(&mut state, Some(2));

        // fetch A (debounced reload), then fetch B (pagination) before A resolves
        handle_event(&mut state, &Event::Char('g')).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        let generation_a = fetches(&actions)[0].1;

        let (_, actions) = handle_event(&mut state, &Event::PageNext).unwrap();
        let generation_b = fetches(&actions)[0].1;

        // A resolves after B was issued: discarded
        let (render, actions) =
            complete_search(&mut state, generation_a, 200, page_body("Stale", None, None)).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.browser.as_ref().unwrap().title, "Countries");

        // B resolves: applied
        let (render, _) =
            complete_search(&mut state, generation_b, 200, page_body("Fresh", None, None)).unwrap();
        assert!(render);
        assert_eq!(state.browser.as_ref().unwrap().title, "Fresh");
    }

    #[test]
    fn opening_second_table_isolates_first_tables_response() {
        let mut state = test_state();

        handle_event(&mut state, &open("table-a")).unwrap();
        let generation_a = current_generation(&state);

        handle_event(&mut state, &open("table-b")).unwrap();
        let generation_b = current_generation(&state);

        // A's initial load resolves after B was opened: no effect at all
        let (render, actions) =
            complete_search(&mut state, generation_a, 200, page_body("Table A", None, None))
                .unwrap();
        assert!(!render);
        assert!(actions.is_empty());

        let session = state.browser.as_ref().unwrap();
        assert_eq!(session.table_name, "table-b");
        assert_eq!(session.title, "table-b");
        assert!(session.rows.is_empty());
        assert!(!session.visible);

        let (render, actions) =
            complete_search(&mut state, generation_b, 200, page_body("Table B", None, None))
                .unwrap();
        assert!(render);
        assert_eq!(actions, vec![Action::Show]);
        assert_eq!(state.browser.as_ref().unwrap().title, "Table B");
    }

    #[test]
    fn transport_failure_preserves_previous_render() {
        let mut state = test_state();
        open_and_load(&mut state, Some(2));

        handle_event(&mut state, &Event::PageNext).unwrap();
        let generation = current_generation(&state);

        let result = complete_search(&mut state, generation, 502, b"bad gateway".to_vec());
        assert!(matches!(result, Err(LookupError::Fetch(502))));

        let session = state.browser.as_ref().unwrap();
        assert_eq!(session.title, "Countries");
        assert_eq!(session.rows.len(), 2);
        assert!(session.visible);
    }

    #[test]
    fn undecodable_body_preserves_previous_render() {
        let mut state = test_state();
        open_and_load(&mut state, None);

        handle_event(&mut state, &Event::Char('g')).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        let generation = fetches(&actions)[0].1;

        let result = complete_search(&mut state, generation, 200, b"not json".to_vec());
        assert!(matches!(result, Err(LookupError::Decode(_))));
        assert_eq!(state.browser.as_ref().unwrap().title, "Countries");
    }

    #[test]
    fn failed_initial_load_keeps_overlay_hidden() {
        let mut state = test_state();
        handle_event(&mut state, &open("countries")).unwrap();
        let generation = current_generation(&state);

        let result = complete_search(&mut state, generation, 500, vec![]);
        assert!(result.is_err());
        assert!(!state.browser.as_ref().unwrap().visible);
    }

    #[test]
    fn activation_hides_overlay_before_delivering_selection() {
        let mut state = test_state();
        handle_event(&mut state, &open_with_target("countries")).unwrap();
        let generation = current_generation(&state);
        complete_search(&mut state, generation, 200, page_body("Countries", None, None)).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::Activate).unwrap();
        assert!(!render);
        assert_eq!(
            actions,
            vec![
                Action::Hide,
                Action::DeliverSelection {
                    target: SelectionTarget::CliPipe {
                        pipe_name: "picker".to_string()
                    },
                    code: "de".to_string(),
                    label: "Germany".to_string(),
                },
            ]
        );
        assert!(state.browser.is_none());
    }

    #[test]
    fn activation_without_reply_route_is_inert() {
        let mut state = test_state();
        open_and_load(&mut state, None);

        let (render, actions) = handle_event(&mut state, &Event::Activate).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.browser.is_some());
    }

    #[test]
    fn toggle_source_flips_only_rows_that_have_source() {
        let mut state = test_state();
        open_and_load(&mut state, None);

        // first row carries source text
        let (render, _) = handle_event(&mut state, &Event::ToggleSource).unwrap();
        assert!(render);
        assert!(state.browser.as_ref().unwrap().rows[0].source_expanded);

        // second row does not
        handle_event(&mut state, &Event::KeyDown).unwrap();
        let (render, _) = handle_event(&mut state, &Event::ToggleSource).unwrap();
        assert!(!render);
    }

    #[test]
    fn escape_destroys_session_and_hides() {
        let mut state = test_state();
        open_and_load(&mut state, None);

        let (render, actions) = handle_event(&mut state, &Event::Escape).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::Hide]);
        assert!(state.browser.is_none());
    }

    #[test]
    fn dismissal_releases_unused_reply_route() {
        let mut state = test_state();
        handle_event(&mut state, &open_with_target("countries")).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Hide,
                Action::ReleaseReply {
                    target: SelectionTarget::CliPipe {
                        pipe_name: "picker".to_string()
                    }
                },
            ]
        );
    }

    #[test]
    fn reopening_releases_previous_sessions_reply_route() {
        let mut state = test_state();
        handle_event(&mut state, &open_with_target("table-a")).unwrap();

        let (_, actions) = handle_event(&mut state, &open("table-b")).unwrap();
        assert!(actions.contains(&Action::ReleaseReply {
            target: SelectionTarget::CliPipe {
                pipe_name: "picker".to_string()
            }
        }));
    }

    #[test]
    fn smart_values_open_shows_then_fetches() {
        let mut state = test_state();
        let (render, actions) = handle_event(
            &mut state,
            &Event::OpenSmartValues {
                value_type: "order".to_string(),
                payload: "id=42".to_string(),
                signature: "sig".to_string(),
            },
        )
        .unwrap();

        assert!(render);
        assert_eq!(actions[0], Action::Show);
        assert_eq!(fetches(&actions).len(), 1);
        assert!(fetches(&actions)[0]
            .0
            .contains("/tycho/smartValues?type=order&payload=id%3D42&securityHash=sig"));
    }

    #[test]
    fn smart_values_load_fills_overlay() {
        let mut state = test_state();
        handle_event(
            &mut state,
            &Event::OpenSmartValues {
                value_type: "order".to_string(),
                payload: "id=42".to_string(),
                signature: "sig".to_string(),
            },
        )
        .unwrap();
        let generation = state.smart_values.as_ref().unwrap().generation;

        let body = br#"{"values": [{"action": "/order/42", "label": "Open order"}]}"#.to_vec();
        let (render, actions) = complete_smart_values(&mut state, generation, body).unwrap();

        assert!(render);
        assert!(actions.is_empty());
        assert!(matches!(
            state.smart_values.as_ref().unwrap().phase,
            SmartValuesPhase::Loaded(_)
        ));
    }

    #[test]
    fn empty_smart_value_set_dismisses_overlay() {
        let mut state = test_state();
        handle_event(
            &mut state,
            &Event::OpenSmartValues {
                value_type: "order".to_string(),
                payload: "id=42".to_string(),
                signature: "sig".to_string(),
            },
        )
        .unwrap();
        let generation = state.smart_values.as_ref().unwrap().generation;

        let (_, actions) =
            complete_smart_values(&mut state, generation, br#"{"values": []}"#.to_vec()).unwrap();
        assert!(state.smart_values.is_none());
        assert_eq!(actions, vec![Action::Hide]);
    }

    #[test]
    fn any_user_input_dismisses_smart_values() {
        let mut state = test_state();
        handle_event(
            &mut state,
            &Event::OpenSmartValues {
                value_type: "order".to_string(),
                payload: "id=42".to_string(),
                signature: "sig".to_string(),
            },
        )
        .unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(state.smart_values.is_none());
        assert_eq!(actions, vec![Action::Hide]);
    }

    #[test]
    fn stale_smart_values_response_is_discarded() {
        let mut state = test_state();
        let open_event = Event::OpenSmartValues {
            value_type: "order".to_string(),
            payload: "id=42".to_string(),
            signature: "sig".to_string(),
        };

        handle_event(&mut state, &open_event).unwrap();
        let first_generation = state.smart_values.as_ref().unwrap().generation;

        // reopen before the first fetch resolves
        handle_event(&mut state, &open_event).unwrap();

        let body = br#"{"values": [{"action": "/a", "label": "Stale"}]}"#.to_vec();
        let (render, _) = complete_smart_values(&mut state, first_generation, body).unwrap();
        assert!(!render);
        assert!(matches!(
            state.smart_values.as_ref().unwrap().phase,
            SmartValuesPhase::Loading
        ));
    }

    #[test]
    fn end_to_end_countries_walkthrough() {
        let mut state = test_state();

        // open("Countries") issues {query: "", skip: 0}
        let (_, actions) = handle_event(&mut state, &open("Countries")).unwrap();
        assert!(fetches(&actions)[0].0.ends_with("/Countries?query=&skip=0"));
        let generation = current_generation(&state);

        // response: 2 entries, nextSkip=2, no prevSkip
        complete_search(&mut state, generation, 200, page_body("Countries", None, Some(2)))
            .unwrap();
        {
            let session = state.browser.as_ref().unwrap();
            assert!(!session.pagination.left.is_enabled());
            assert!(session.pagination.right.is_enabled());
            assert_eq!(session.pagination.right.cursor(), Some(2));
        }

        // user types "ger"; after the quiet period: {query: "ger", skip: 0}
        for c in ['g', 'e', 'r'] {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        assert!(fetches(&actions)[0].0.contains("query=ger&skip=0"));
        let generation = current_generation(&state);
        complete_search(&mut state, generation, 200, page_body("Countries", None, Some(2)))
            .unwrap();

        // user clicks the right control (payload 2): {query: "ger", skip: 2}
        let (_, actions) = handle_event(&mut state, &Event::PageNext).unwrap();
        assert!(fetches(&actions)[0].0.contains("query=ger&skip=2"));
    }
}
