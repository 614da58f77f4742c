//! Browser session state: query, cursor, pagination strip, and rows.
//!
//! A [`Session`] is the live state of one open lookup table browser. It is
//! created whole when the open pipe arrives and replaced whole when another
//! table is opened, never merged, so nothing from a previous table can leak
//! into the next one. The pagination cursors inside it are always values the
//! server supplied (or 0 for the first page); the client never invents them.

use crate::domain::{TableEntry, TablePage};

/// Where a selected row's code and label are delivered.
///
/// Supplied by the consumer through the open pipe. A session without a target
/// is browse-only: activating a row does nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionTarget {
    /// Reply on a blocked CLI pipe, then unblock it.
    CliPipe {
        /// Name of the CLI pipe that opened the browser.
        pipe_name: String,
    },

    /// Broadcast a plugin message under the given name.
    PluginMessage {
        /// Message name the consumer listens for.
        message_name: String,
    },
}

/// One pagination control (the left or right arrow of the strip).
///
/// Carries the cursor it would jump to when enabled. State changes are
/// change-detected so repeated reloads at the same boundary leave the
/// control untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationControl {
    cursor: Option<u64>,
    enabled: bool,
}

impl PaginationControl {
    /// Creates a disabled control with no cursor payload.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cursor: None,
            enabled: false,
        }
    }

    /// Applies a response's cursor to this control.
    ///
    /// A present cursor enables the control and stores the payload; an absent
    /// one disables it and clears the payload. Returns whether anything
    /// actually changed, so callers (and tests) can observe that reloads at
    /// an unchanged boundary do not churn the control.
    pub fn apply(&mut self, cursor: Option<u64>) -> bool {
        match cursor {
            Some(value) => {
                if self.enabled && self.cursor == Some(value) {
                    return false;
                }
                self.cursor = Some(value);
                self.enabled = true;
                true
            }
            None => {
                if !self.enabled {
                    return false;
                }
                self.cursor = None;
                self.enabled = false;
                true
            }
        }
    }

    /// The carried cursor, `None` while disabled.
    #[must_use]
    pub const fn cursor(&self) -> Option<u64> {
        if self.enabled {
            self.cursor
        } else {
            None
        }
    }

    /// Whether the control currently accepts activation.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// The pagination strip under the result list.
///
/// Two controls plus the server-formatted range text, replaced verbatim on
/// every applied response (the client never computes "X-Y of Z" itself).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationStrip {
    /// Control jumping to the previous page.
    pub left: PaginationControl,

    /// Control jumping to the next page.
    pub right: PaginationControl,

    /// Server-formatted range text.
    pub info: String,
}

/// Render state of one result row.
///
/// `source_expanded` is local to the row's lifetime: rows are rebuilt from
/// scratch on every applied response, so the flag resets with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowState {
    /// The decoded entry.
    pub entry: TableEntry,

    /// Whether the source detail panel is currently shown.
    pub source_expanded: bool,
}

impl RowState {
    fn new(entry: TableEntry) -> Self {
        Self {
            entry,
            source_expanded: false,
        }
    }
}

/// Live state of one open lookup table browser.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Name of the table being browsed.
    pub table_name: String,

    /// Opaque label format forwarded with every fetch.
    pub label_format: Option<String>,

    /// Reply route for row activation, `None` for browse-only sessions.
    pub selection: Option<SelectionTarget>,

    /// Current query text.
    pub query: String,

    /// Pagination cursor for the next fetch. Always a server-supplied value
    /// (`prev`/`next` of the last response) or 0.
    pub skip: u64,

    /// Generation of the most recently issued fetch for this session.
    ///
    /// A completed fetch with any other generation is stale and discarded.
    pub generation: u64,

    /// Display title; the raw table name until the first page arrives.
    pub title: String,

    /// Server-provided description text.
    pub description: String,

    /// Server-provided placeholder for the query field.
    pub placeholder: String,

    /// Pagination strip state.
    pub pagination: PaginationStrip,

    /// Rows of the currently applied page.
    pub rows: Vec<RowState>,

    /// Zero-based index of the selected row.
    pub selected_index: usize,

    /// Whether the overlay has been shown. False until the first page of the
    /// session is applied, so the overlay appears already populated.
    pub visible: bool,
}

impl Session {
    /// Creates a fresh session for one table.
    ///
    /// The query is seeded with `initial_query` if given, the cursor starts
    /// at 0, and the table name serves as a provisional title until the
    /// first response replaces it.
    #[must_use]
    pub fn new(
        table_name: String,
        label_format: Option<String>,
        selection: Option<SelectionTarget>,
        initial_query: Option<String>,
    ) -> Self {
        let title = table_name.clone();
        Self {
            table_name,
            label_format,
            selection,
            query: initial_query.unwrap_or_default(),
            skip: 0,
            generation: 0,
            title,
            description: String::new(),
            placeholder: String::new(),
            pagination: PaginationStrip::default(),
            rows: Vec::new(),
            selected_index: 0,
            visible: false,
        }
    }

    /// Applies one fully-decoded page to the session.
    ///
    /// Replaces all header text verbatim, updates the pagination strip, and
    /// rebuilds the row list from scratch, discarding any per-row expansion
    /// state. Callers only invoke this with a complete successfully decoded
    /// page, so a failed fetch can never leave partial state behind.
    pub fn apply_page(&mut self, page: TablePage) {
        self.title = page.title;
        self.description = page.description;
        self.placeholder = page.search_placeholder;

        self.pagination.left.apply(page.prev_skip);
        self.pagination.right.apply(page.next_skip);
        self.pagination.info = page.pagination_info;

        self.rows = page.entries.into_iter().map(RowState::new).collect();

        if self.rows.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.rows.len() - 1);
        }
    }

    /// Moves the row selection down by one position, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.rows.len();
    }

    /// Moves the row selection up by one position, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.rows.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Returns the currently selected row, if any.
    #[must_use]
    pub fn selected_row(&self) -> Option<&RowState> {
        self.rows.get(self.selected_index)
    }

    /// Flips the selected row's source panel between shown and hidden.
    ///
    /// Returns `true` if a panel was toggled; rows without source text have
    /// no panel and report `false`.
    pub fn toggle_selected_source(&mut self) -> bool {
        let Some(row) = self.rows.get_mut(self.selected_index) else {
            return false;
        };
        if row.entry.source.is_none() {
            return false;
        }
        row.source_expanded = !row.source_expanded;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, source: Option<&str>) -> TableEntry {
        TableEntry {
            code: code.to_string(),
            label: code.to_uppercase(),
            name: code.to_uppercase(),
            show_code: false,
            description: None,
            source: source.map(str::to_string),
        }
    }

    fn page(prev: Option<u64>, next: Option<u64>, entries: Vec<TableEntry>) -> TablePage {
        TablePage {
            title: "Countries".to_string(),
            description: "All countries".to_string(),
            search_placeholder: "Search...".to_string(),
            pagination_info: "1-2 of 240".to_string(),
            prev_skip: prev,
            next_skip: next,
            entries,
        }
    }

    #[test]
    fn pagination_control_enables_with_payload() {
        let mut control = PaginationControl::new();
        assert!(control.apply(Some(25)));
        assert!(control.is_enabled());
        assert_eq!(control.cursor(), Some(25));
    }

    #[test]
    fn pagination_control_disable_is_change_detected() {
        let mut control = PaginationControl::new();

        // already disabled: applying absence again must not churn
        assert!(!control.apply(None));

        control.apply(Some(25));
        assert!(control.apply(None));
        assert!(!control.apply(None));
        assert_eq!(control.cursor(), None);
    }

    #[test]
    fn pagination_control_same_cursor_does_not_churn() {
        let mut control = PaginationControl::new();
        control.apply(Some(25));
        assert!(!control.apply(Some(25)));
        assert!(control.apply(Some(50)));
    }

    #[test]
    fn apply_page_rebuilds_rows_and_resets_expansion() {
        let mut session = Session::new("countries".to_string(), None, None, None);
        session.apply_page(page(None, Some(2), vec![entry("de", Some("src"))]));

        assert!(session.toggle_selected_source());
        assert!(session.rows[0].source_expanded);

        // a reload rebuilds the rows; expansion state dies with them
        session.apply_page(page(None, Some(2), vec![entry("de", Some("src"))]));
        assert!(!session.rows[0].source_expanded);
    }

    #[test]
    fn apply_page_clamps_selection() {
        let mut session = Session::new("countries".to_string(), None, None, None);
        session.apply_page(page(
            None,
            None,
            vec![entry("a", None), entry("b", None), entry("c", None)],
        ));
        session.selected_index = 2;

        session.apply_page(page(None, None, vec![entry("a", None)]));
        assert_eq!(session.selected_index, 0);
    }

    #[test]
    fn toggle_without_source_is_inert() {
        let mut session = Session::new("countries".to_string(), None, None, None);
        session.apply_page(page(None, None, vec![entry("de", None)]));
        assert!(!session.toggle_selected_source());
    }

    #[test]
    fn toggle_even_number_of_times_returns_to_hidden() {
        let mut session = Session::new("countries".to_string(), None, None, None);
        session.apply_page(page(None, None, vec![entry("de", Some("src"))]));

        for _ in 0..4 {
            session.toggle_selected_source();
        }
        assert!(!session.rows[0].source_expanded);

        session.toggle_selected_source();
        assert!(session.rows[0].source_expanded);
    }

    #[test]
    fn selection_wraps_in_both_directions() {
        let mut session = Session::new("countries".to_string(), None, None, None);
        session.apply_page(page(None, None, vec![entry("a", None), entry("b", None)]));

        session.move_selection_up();
        assert_eq!(session.selected_index, 1);
        session.move_selection_down();
        assert_eq!(session.selected_index, 0);
    }

    #[test]
    fn new_session_seeds_query_and_provisional_title() {
        let session = Session::new(
            "countries".to_string(),
            Some("{code}".to_string()),
            None,
            Some("ger".to_string()),
        );
        assert_eq!(session.query, "ger");
        assert_eq!(session.title, "countries");
        assert_eq!(session.skip, 0);
        assert!(!session.visible);
    }
}
