//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin,
//! along with the request generation counter, fetch issuing, and UI view model
//! generation. It serves as the single source of truth for all transient state.
//!
//! # Architecture
//!
//! `AppState` owns at most one browser [`Session`] and at most one transient
//! smart-values overlay. Both are replaced whole, never merged, which is what
//! guarantees that nothing from a superseded session (rows, selection, or
//! in-flight fetches) can affect its successor. View models are computed
//! on demand from state snapshots.
//!
//! # Request generations
//!
//! Every fetch is issued under a fresh generation drawn from a counter owned
//! here (not by the session, so it survives session replacement). A response
//! is applied only if its generation equals the owning session's/overlay's
//! current one; everything else is stale and discarded on arrival.

use crate::api::{self, FetchContext, FetchKind, SearchRequest};
use crate::app::debounce::Debouncer;
use crate::app::modes::InputMode;
use crate::app::session::Session;
use crate::app::Action;
use crate::domain::SmartValue;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, FooterInfo, HeaderInfo, PaginationView, RowItem, SearchBarInfo, SmartValueItem,
    SmartValuesView, SourcePanel, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Maximum rendered characters of a row name before truncation.
const NAME_DISPLAY_WIDTH: usize = 45;

/// Line estimate per unexpanded row (name line plus optional description).
const LINES_PER_ROW: usize = 2;

/// Loading/loaded phase of the smart-values overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmartValuesPhase {
    /// The fetch is in flight; a spinner row is rendered.
    Loading,

    /// Values arrived and are rendered as a list.
    Loaded(Vec<SmartValue>),
}

/// Transient smart-values overlay state.
///
/// There is at most one of these at a time; it occupies a single slot in
/// [`AppState`] and any user input dismisses it. The slot is the process-wide
/// "active transient overlay" registry: dismissal logic lives in one place in
/// the event handler instead of per-instance listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartValuesOverlay {
    /// Generation of the fetch this overlay is waiting for / was filled by.
    pub generation: u64,

    /// Current phase.
    pub phase: SmartValuesPhase,
}

/// Central application state container.
///
/// Mutated by the event handler in response to user input, timer expiries,
/// and fetch completions. View models are computed on demand.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The open browser session, if any.
    pub browser: Option<Session>,

    /// The active transient smart-values overlay, if any.
    pub smart_values: Option<SmartValuesOverlay>,

    /// Current input handling mode for the browser.
    pub input_mode: InputMode,

    /// Debouncer for search-as-you-type reloads.
    pub debouncer: Debouncer,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Backend base URL all fetches are built against.
    pub base_url: String,

    /// Monotonic fetch counter backing the generation scheme.
    request_seq: u64,
}

impl AppState {
    /// Creates a new application state with no open overlays.
    ///
    /// # Parameters
    ///
    /// * `base_url` - Backend base URL (scheme + authority, no trailing path)
    /// * `debounce_ms` - Quiet period for search-as-you-type, in milliseconds
    /// * `theme` - Color scheme for UI rendering
    #[must_use]
    pub fn new(base_url: String, debounce_ms: u64, theme: Theme) -> Self {
        Self {
            browser: None,
            smart_values: None,
            input_mode: InputMode::Typing,
            debouncer: Debouncer::new(debounce_ms),
            theme,
            base_url,
            request_seq: 0,
        }
    }

    /// Draws the next request generation.
    fn next_generation(&mut self) -> u64 {
        self.request_seq += 1;
        self.request_seq
    }

    /// Issues a search fetch for the browser session's current query and cursor.
    ///
    /// Stamps the session with a fresh generation so any earlier in-flight
    /// fetch becomes stale, then builds the request from session state alone.
    /// Returns `None` when no session is open.
    pub fn issue_search(&mut self) -> Option<Action> {
        let generation = self.next_generation();
        let base_url = self.base_url.clone();

        let session = self.browser.as_mut()?;
        session.generation = generation;

        let url = api::search_url(
            &base_url,
            &SearchRequest {
                table_name: &session.table_name,
                query: &session.query,
                skip: session.skip,
                label_format: session.label_format.as_deref(),
            },
        );

        tracing::debug!(
            table = %session.table_name,
            query = %session.query,
            skip = session.skip,
            generation = generation,
            "issuing search fetch"
        );

        Some(Action::Fetch {
            url,
            context: FetchContext::new(FetchKind::TableSearch, generation),
        })
    }

    /// Opens the smart-values overlay and issues its fetch.
    ///
    /// The overlay starts in the loading phase and is rendered immediately;
    /// the returned fetch fills or dismisses it later.
    pub fn open_smart_values(
        &mut self,
        value_type: &str,
        payload: &str,
        signature: &str,
    ) -> Action {
        let generation = self.next_generation();

        self.smart_values = Some(SmartValuesOverlay {
            generation,
            phase: SmartValuesPhase::Loading,
        });

        let url = api::smart_values_url(&self.base_url, value_type, payload, signature);

        tracing::debug!(value_type = %value_type, generation = generation, "issuing smart values fetch");

        Action::Fetch {
            url,
            context: FetchContext::new(FetchKind::SmartValues, generation),
        }
    }

    /// Computes a renderable UI view model from current state and dimensions.
    ///
    /// The smart-values overlay, when active, takes over the pane; otherwise
    /// the browser session is projected with row windowing around the
    /// selection and fuzzy-match highlighting of the current query.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in character cells
    /// * `cols` - Terminal width in character cells
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        if let Some(overlay) = &self.smart_values {
            return Self::compute_smart_values_viewmodel(overlay);
        }

        let Some(session) = &self.browser else {
            return UIViewModel {
                header: HeaderInfo {
                    title: String::new(),
                    description: String::new(),
                },
                search_bar: None,
                rows: vec![],
                selected_index: 0,
                pagination: None,
                footer: self.compute_footer(),
                empty_state: Some(EmptyState {
                    message: "No lookup table open".to_string(),
                    subtitle: "Open one with the zlookup:open pipe".to_string(),
                }),
                smart_values: None,
            };
        };

        let empty_state = if session.visible && session.rows.is_empty() {
            Some(EmptyState {
                message: "No matching entries".to_string(),
                subtitle: "Try a different query".to_string(),
            })
        } else {
            None
        };

        let (display_rows, selected_display_index) = self.compute_rows(session, rows, cols);

        UIViewModel {
            header: HeaderInfo {
                title: session.title.clone(),
                description: session.description.clone(),
            },
            search_bar: Some(SearchBarInfo {
                query: session.query.clone(),
                placeholder: session.placeholder.clone(),
                focused: self.input_mode == InputMode::Typing,
            }),
            rows: display_rows,
            selected_index: selected_display_index,
            pagination: Some(PaginationView {
                info: session.pagination.info.clone(),
                prev_enabled: session.pagination.left.is_enabled(),
                next_enabled: session.pagination.right.is_enabled(),
            }),
            footer: self.compute_footer(),
            empty_state,
            smart_values: None,
        }
    }

    /// Projects the smart-values overlay into a view model.
    fn compute_smart_values_viewmodel(overlay: &SmartValuesOverlay) -> UIViewModel {
        let view = match &overlay.phase {
            SmartValuesPhase::Loading => SmartValuesView {
                loading: true,
                items: vec![],
            },
            SmartValuesPhase::Loaded(values) => SmartValuesView {
                loading: false,
                items: values
                    .iter()
                    .map(|value| SmartValueItem {
                        icon: value.icon.clone().unwrap_or_default(),
                        label: value.label.clone(),
                        has_copy: value.copy_payload.is_some(),
                    })
                    .collect(),
            },
        };

        UIViewModel {
            header: HeaderInfo {
                title: "Smart values".to_string(),
                description: String::new(),
            },
            search_bar: None,
            rows: vec![],
            selected_index: 0,
            pagination: None,
            footer: FooterInfo {
                keybindings: "any key: dismiss".to_string(),
            },
            empty_state: None,
            smart_values: Some(view),
        }
    }

    /// Computes the visible row window and per-row display items.
    ///
    /// Centers the window on the selected row, widening towards the start or
    /// end when the selection sits near a boundary, mirroring the list the
    /// server paged rather than scrolling it client-side.
    fn compute_rows(
        &self,
        session: &Session,
        rows: usize,
        cols: usize,
    ) -> (Vec<RowItem>, usize) {
        if session.rows.is_empty() {
            return (vec![], 0);
        }

        let available_rows = Self::calculate_available_rows(rows);
        let max_items = (available_rows / LINES_PER_ROW).max(1);

        let mut visible_start = session.selected_index.saturating_sub(max_items / 2);
        let visible_end = (visible_start + max_items).min(session.rows.len());

        let actual_count = visible_end - visible_start;
        if actual_count < max_items && session.rows.len() >= max_items {
            visible_start = visible_end.saturating_sub(max_items);
        }

        let matcher = if session.query.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        let display_rows: Vec<RowItem> = session.rows[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, row)| {
                let absolute_idx = visible_start + relative_idx;
                let is_selected = absolute_idx == session.selected_index;

                let name = if row.entry.name.len() > NAME_DISPLAY_WIDTH {
                    format!("{}...", &row.entry.name[..NAME_DISPLAY_WIDTH - 3])
                } else {
                    row.entry.name.clone()
                };

                let code_suffix = if row.entry.show_code {
                    Some(format!(" ({})", row.entry.code))
                } else {
                    None
                };

                let source = row.entry.source.as_ref().map(|source| SourcePanel {
                    expanded: row.source_expanded,
                    toggle_visible: is_selected,
                    lines: if row.source_expanded {
                        source
                            .lines()
                            .map(|line| {
                                let mut line = line.to_string();
                                line.truncate(cols.saturating_sub(4));
                                line
                            })
                            .collect()
                    } else {
                        vec![]
                    },
                });

                // ranges are computed on the truncated display name so they
                // can never reach past what is rendered
                let highlight_ranges = matcher.as_ref().map_or_else(Vec::new, |m| {
                    compute_highlight_ranges(&name, &session.query, m)
                });

                RowItem {
                    name,
                    code_suffix,
                    description: row.entry.description.clone(),
                    source,
                    is_selected,
                    highlight_ranges,
                }
            })
            .collect();

        let selected_display_index = session.selected_index.saturating_sub(visible_start);

        (display_rows, selected_display_index)
    }

    /// Computes footer keybindings text based on the current input mode.
    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Typing => {
                "ESC: close  Enter: select  Tab: source  Ctrl+n/p: move  PgUp/PgDn: page  Type to search"
                    .to_string()
            }
            InputMode::Navigating => {
                "ESC: close  /: edit query  j/k: move  h/l: page  Enter: select  Tab: source  q: quit"
                    .to_string()
            }
        };

        FooterInfo { keybindings }
    }

    /// Calculates rows available for the result list after UI chrome.
    ///
    /// Chrome: blank line, header, description, border, search box (3 rows),
    /// border, pagination strip, footer.
    const fn calculate_available_rows(total_rows: usize) -> usize {
        total_rows.saturating_sub(11)
    }
}

/// Computes character index ranges to highlight for fuzzy match visualization.
///
/// Uses the Skim fuzzy matcher to find matching character positions, then
/// coalesces consecutive indices into ranges for efficient highlighting.
fn compute_highlight_ranges(
    text: &str,
    query: &str,
    matcher: &SkimMatcherV2,
) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    if let Some((_score, indices)) = matcher.fuzzy_indices(text, query) {
        let mut ranges = Vec::new();
        let mut start = None;
        let mut prev = None;

        for &idx in &indices {
            match (start, prev) {
                (None, _) => {
                    start = Some(idx);
                    prev = Some(idx);
                }
                (Some(_), Some(p)) if idx == p + 1 => {
                    prev = Some(idx);
                }
                (Some(s), Some(p)) => {
                    ranges.push((s, p + 1));
                    start = Some(idx);
                    prev = Some(idx);
                }
                _ => {}
            }
        }

        if let (Some(s), Some(p)) = (start, prev) {
            ranges.push((s, p + 1));
        }

        ranges
    } else {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TableEntry, TablePage};

    fn state_with_session() -> AppState {
        let mut state = AppState::new("http://localhost:9000".to_string(), 100, Theme::default());
        state.browser = Some(Session::new("countries".to_string(), None, None, None));
        state
    }

    fn page_with(names: &[&str]) -> TablePage {
        TablePage {
            title: "Countries".to_string(),
            description: String::new(),
            search_placeholder: String::new(),
            pagination_info: String::new(),
            prev_skip: None,
            next_skip: None,
            entries: names
                .iter()
                .map(|name| TableEntry {
                    code: name.to_lowercase(),
                    label: (*name).to_string(),
                    name: (*name).to_string(),
                    show_code: true,
                    description: None,
                    source: Some("raw".to_string()),
                })
                .collect(),
        }
    }

    #[test]
    fn issue_search_bumps_generation_each_time() {
        let mut state = state_with_session();

        state.issue_search().unwrap();
        let first = state.browser.as_ref().unwrap().generation;
        state.issue_search().unwrap();
        let second = state.browser.as_ref().unwrap().generation;

        assert!(second > first);
    }

    #[test]
    fn issue_search_without_session_is_none() {
        let mut state = AppState::new("http://localhost:9000".to_string(), 100, Theme::default());
        assert!(state.issue_search().is_none());
    }

    #[test]
    fn issue_search_builds_url_from_session_state() {
        let mut state = state_with_session();
        {
            let session = state.browser.as_mut().unwrap();
            session.query = "ger".to_string();
            session.skip = 2;
        }

        let Some(Action::Fetch { url, context }) = state.issue_search() else {
            panic!("expected fetch action");
        };
        assert_eq!(
            url,
            "http://localhost:9000/system/lookuptable/info/countries?query=ger&skip=2"
        );
        assert_eq!(context.kind, FetchKind::TableSearch);
        assert_eq!(context.generation, state.browser.as_ref().unwrap().generation);
    }

    #[test]
    fn viewmodel_marks_toggle_on_selected_row_only() {
        let mut state = state_with_session();
        state
            .browser
            .as_mut()
            .unwrap()
            .apply_page(page_with(&["Germany", "France"]));
        state.browser.as_mut().unwrap().visible = true;

        let vm = state.compute_viewmodel(30, 80);
        let toggles: Vec<bool> = vm
            .rows
            .iter()
            .map(|row| row.source.as_ref().unwrap().toggle_visible)
            .collect();
        assert_eq!(toggles, vec![true, false]);
    }

    #[test]
    fn viewmodel_shows_code_suffix_when_flagged() {
        let mut state = state_with_session();
        state
            .browser
            .as_mut()
            .unwrap()
            .apply_page(page_with(&["Germany"]));

        let vm = state.compute_viewmodel(30, 80);
        assert_eq!(vm.rows[0].code_suffix.as_deref(), Some(" (germany)"));
    }

    #[test]
    fn viewmodel_empty_state_only_after_first_load() {
        let mut state = state_with_session();

        // before the first page applies, no empty state (still loading)
        let vm = state.compute_viewmodel(30, 80);
        assert!(vm.empty_state.is_none());

        state.browser.as_mut().unwrap().visible = true;
        let vm = state.compute_viewmodel(30, 80);
        assert!(vm.empty_state.is_some());
    }

    #[test]
    fn smart_values_overlay_takes_over_viewmodel() {
        let mut state = state_with_session();
        state.open_smart_values("order", "id=42", "sig");

        let vm = state.compute_viewmodel(30, 80);
        assert!(vm.smart_values.as_ref().unwrap().loading);
        assert!(vm.search_bar.is_none());
    }

    #[test]
    fn highlight_ranges_coalesce_consecutive_indices() {
        let matcher = SkimMatcherV2::default();
        let ranges = compute_highlight_ranges("Germany", "ger", &matcher);
        assert_eq!(ranges, vec![(0, 3)]);
    }
}
