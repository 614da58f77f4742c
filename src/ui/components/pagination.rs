//! Pagination strip component renderer.
//!
//! This module renders the strip under the result list: the previous/next
//! controls and the server-formatted range text between them. Disabled
//! controls are rendered dim; the range text is printed verbatim, since the
//! client never computes "X-Y of Z" itself.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationView;

/// Label of the previous-page control.
const PREV_LABEL: &str = "‹ prev (PgUp)";

/// Label of the next-page control.
const NEXT_LABEL: &str = "next (PgDn) ›";

/// Renders the pagination strip at the specified row.
///
/// # Layout
///
/// ```text
/// ‹ prev (PgUp)        1-25 of 312        next (PgDn) ›
/// ```
///
/// # Parameters
///
/// * `row` - Row position to render the strip (1-indexed)
/// * `pagination` - Pagination display information
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_pagination(
    row: usize,
    pagination: &PaginationView,
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(row, 1);

    print!(" ");
    print_control(PREV_LABEL, pagination.prev_enabled, theme);

    let info_len = pagination.info.chars().count();
    let used = 2 + PREV_LABEL.chars().count() + NEXT_LABEL.chars().count();
    let space = cols.saturating_sub(used);
    let left_pad = space.saturating_sub(info_len) / 2;
    let right_pad = space.saturating_sub(info_len + left_pad);

    print!("{}", " ".repeat(left_pad));
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", pagination.info);
    print!("{}", Theme::reset());
    print!("{}", " ".repeat(right_pad));

    print_control(NEXT_LABEL, pagination.next_enabled, theme);
    print!(" ");
    print!("{}", Theme::reset());

    row + 1
}

/// Prints one control, dimmed when disabled.
fn print_control(label: &str, enabled: bool, theme: &Theme) {
    if enabled {
        print!("{}", Theme::fg(&theme.colors.link_fg));
    } else {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.pagination_disabled_fg));
    }
    print!("{label}");
    print!("{}", Theme::reset());
}
