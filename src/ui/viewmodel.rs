//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state,
//! following the MVVM pattern. View models are optimized for rendering and
//! contain pre-computed display information like highlight ranges, code
//! suffixes, and expanded source lines. Renderers consume them without ever
//! touching session state; the UI is a pure projection.

/// Complete UI view model for rendering.
///
/// Contains all display information needed to render the plugin pane. When
/// `smart_values` is present the transient overlay owns the pane; otherwise
/// the browser layout (header, search bar, rows, pagination, footer) applies.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Header information (title and description).
    pub header: HeaderInfo,

    /// Search bar state; absent outside an open browser session.
    pub search_bar: Option<SearchBarInfo>,

    /// Rows of the visible window.
    pub rows: Vec<RowItem>,

    /// Index of the selected row within the visible window.
    pub selected_index: usize,

    /// Pagination strip state; absent outside an open browser session.
    pub pagination: Option<PaginationView>,

    /// Footer information (keybinding hints).
    pub footer: FooterInfo,

    /// Optional empty state message (no rows to show).
    pub empty_state: Option<EmptyState>,

    /// Transient smart-values overlay content, taking over the pane.
    pub smart_values: Option<SmartValuesView>,
}

/// Display information for a single result row.
///
/// Represents one row of the table. Contains pre-computed highlight ranges
/// for query match rendering and the optional expandable source panel.
#[derive(Debug, Clone)]
pub struct RowItem {
    /// Display name, truncated to fit.
    pub name: String,

    /// Code rendered after the name (" (de)" style), when flagged by the server.
    pub code_suffix: Option<String>,

    /// Optional secondary description line.
    pub description: Option<String>,

    /// Source panel; present only for rows carrying source text.
    pub source: Option<SourcePanel>,

    /// Whether this row is currently selected.
    pub is_selected: bool,

    /// Character ranges of the name to highlight (query matches).
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Expandable source detail panel of one row.
#[derive(Debug, Clone)]
pub struct SourcePanel {
    /// Whether the panel is currently expanded.
    pub expanded: bool,

    /// Whether the toggle affordance is visible (selected row only).
    pub toggle_visible: bool,

    /// Pre-truncated source lines; empty while collapsed.
    pub lines: Vec<String>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,

    /// Description line rendered under the title.
    pub description: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current query text.
    pub query: String,

    /// Placeholder shown dim while the query is empty.
    pub placeholder: String,

    /// Whether the query field has input focus.
    pub focused: bool,
}

/// Pagination strip display information.
#[derive(Debug, Clone)]
pub struct PaginationView {
    /// Server-formatted range text, rendered verbatim.
    pub info: String,

    /// Whether the previous-page control is enabled.
    pub prev_enabled: bool,

    /// Whether the next-page control is enabled.
    pub next_enabled: bool,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g. "No matching entries").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Smart-values overlay content.
#[derive(Debug, Clone)]
pub struct SmartValuesView {
    /// Whether the fetch is still in flight (spinner row).
    pub loading: bool,

    /// Loaded values, empty while loading.
    pub items: Vec<SmartValueItem>,
}

/// One smart value row.
#[derive(Debug, Clone)]
pub struct SmartValueItem {
    /// Icon hint, possibly empty.
    pub icon: String,

    /// Display label.
    pub label: String,

    /// Whether a copyable payload accompanies the action.
    pub has_copy: bool,
}
