//! Smart-values overlay component renderer.
//!
//! This module renders the transient smart-values list: a spinner row while
//! the fetch is in flight, then one line per value with its icon, label, and
//! a clipboard hint when a copyable payload accompanies the action.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SmartValuesView;

/// Renders the smart-values content starting at the specified row.
///
/// # Parameters
///
/// * `row` - Starting row position (1-indexed)
/// * `values` - Overlay content (loading flag and items)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position
pub fn render_smart_values(
    row: usize,
    values: &SmartValuesView,
    theme: &Theme,
    cols: usize,
) -> usize {
    if values.loading {
        position_cursor(row, 1);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("  ⟳ loading...");
        print!("{}", " ".repeat(cols.saturating_sub(15)));
        print!("{}", Theme::reset());
        return row + 1;
    }

    let mut current_row = row;
    for item in &values.items {
        position_cursor(current_row, 1);

        print!("{}", Theme::fg(&theme.colors.link_fg));
        if item.icon.is_empty() {
            print!("  ");
        } else {
            print!("  {} ", item.icon);
        }
        print!("{}", item.label);

        if item.has_copy {
            print!("{}", Theme::dim());
            print!("{}", Theme::fg(&theme.colors.text_dim));
            print!("  [copy]");
        }

        print!("{}", Theme::reset());
        current_row += 1;
    }

    current_row
}
