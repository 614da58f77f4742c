//! Composable UI component renderers.
//!
//! This module provides specialized rendering components for different UI
//! elements, following a component-based architecture. Each component is
//! responsible for rendering a specific part of the interface.
//!
//! # Components
//!
//! - [`header`]: Title bar with table title and description
//! - [`search`]: Query input box (border, query or placeholder text)
//! - [`table`]: Result rows with code suffixes and expandable source panels
//! - [`pagination`]: Previous/next controls and the server range text
//! - [`footer`]: Help text and keybinding hints
//! - [`empty`]: Empty state message when no rows are available
//! - [`smart_values`]: Transient smart-values overlay content
//!
//! # Layout Modes
//!
//! Two high-level layout functions:
//!
//! - [`render_browser_mode`]: Header + SearchBar + Rows + Pagination + Footer
//! - [`render_smart_values_mode`]: Header + value list + Footer

mod empty;
mod footer;
mod header;
mod pagination;
mod search;
mod smart_values;
mod table;

pub use empty::render_empty_state;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SmartValuesView, UIViewModel};

use footer::render_footer;
use header::render_header;
use pagination::render_pagination;
use search::render_search_bar;
use smart_values::render_smart_values;
use table::render_rows;

/// Renders a horizontal border line at the specified row.
///
/// Used to separate UI sections (header/search, rows/pagination).
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the browser layout.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header - 2 lines (title, description)]
/// [Border]
/// [Search Box - 3 lines]
/// [Rows (variable height) or Empty State]
/// [Border]
/// [Pagination Strip]
/// [Footer]
/// ```
///
/// # Line Accounting
///
/// Reserves 11 lines for chrome; the remaining space holds result rows. Rows
/// near the bottom chrome are clipped rather than wrapped.
pub fn render_browser_mode(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let pagination_row = footer_start.saturating_sub(1);
    let border_row = pagination_row.saturating_sub(1);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(empty, theme, cols);
    } else {
        render_rows(current_row, border_row, &vm.rows, theme, cols);
    }

    render_border(border_row, &theme.colors.border, cols);
    if let Some(pagination) = &vm.pagination {
        render_pagination(pagination_row, pagination, theme, cols);
    }
    render_footer(footer_start, &vm.footer, theme, cols);
}

/// Renders the smart-values overlay layout.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header - 2 lines]
/// [Border]
/// [Spinner or value list]
/// [Footer]
/// ```
pub fn render_smart_values_mode(
    vm: &UIViewModel,
    values: &SmartValuesView,
    theme: &Theme,
    cols: usize,
    rows: usize,
) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    render_smart_values(current_row, values, theme, cols);

    let footer_start = rows.saturating_sub(1);
    render_footer(footer_start, &vm.footer, theme, cols);
}
