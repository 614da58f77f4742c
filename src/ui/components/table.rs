//! Result row component renderer.
//!
//! This module renders the result rows of the browser. A row is one to many
//! lines: the name line (with optional code suffix and the source toggle
//! affordance on the selected row), an optional dim description line, and
//! the expanded source panel lines when the row's source is shown.

use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::RowItem;

/// Renders all rows starting at the specified row, clipping at `max_row`.
///
/// Rows have variable height, so rendering stops before a row that would
/// cross into the bottom chrome.
///
/// # Parameters
///
/// * `row` - Starting row position (1-indexed)
/// * `max_row` - First row that must not be written to
/// * `items` - Display items for the visible window
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns (for padding)
///
/// # Returns
///
/// The next available row position
pub fn render_rows(
    row: usize,
    max_row: usize,
    items: &[RowItem],
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current_row = row;
    for item in items {
        let height = row_height(item);
        if current_row + height > max_row {
            break;
        }
        current_row = render_row(current_row, item, theme, cols);
    }
    current_row
}

/// Number of terminal lines one row occupies.
fn row_height(item: &RowItem) -> usize {
    let mut height = 1;
    if item.description.is_some() {
        height += 1;
    }
    if let Some(source) = &item.source {
        if source.expanded {
            height += source.lines.len();
        }
    }
    height
}

/// Renders a single row at the specified position.
///
/// # Layout
///
/// ```text
/// NAME (code)                         [+] source
///   description text
///   │ source line 1
///   │ source line 2
/// ```
///
/// # Styling Precedence
///
/// 1. Selection colors on the name line (if `is_selected`)
/// 2. Query match highlights (unless selected)
/// 3. Normal text color
fn render_row(row: usize, item: &RowItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.link_fg));
    }

    if item.highlight_ranges.is_empty() {
        print!("{}", item.name);
    } else {
        helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, item.is_selected);
    }

    let mut line_len = item.name.chars().count();

    if let Some(code_suffix) = &item.code_suffix {
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{code_suffix}");
        line_len += code_suffix.chars().count();
    }

    // toggle affordance, right-aligned, only while the row is selected
    let toggle = item.source.as_ref().and_then(|source| {
        if source.toggle_visible {
            Some(if source.expanded { "[-] source" } else { "[+] source" })
        } else {
            None
        }
    });

    if let Some(toggle) = toggle {
        let padding = cols.saturating_sub(line_len + toggle.len() + 1);
        print!("{}", " ".repeat(padding));
        print!("{toggle} ");
    } else {
        print!("{}", " ".repeat(cols.saturating_sub(line_len)));
    }
    print!("{}", Theme::reset());

    let mut current_row = row + 1;

    if let Some(description) = &item.description {
        position_cursor(current_row, 1);
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("  {description}");
        print!("{}", Theme::reset());
        current_row += 1;
    }

    if let Some(source) = &item.source {
        if source.expanded {
            for line in &source.lines {
                position_cursor(current_row, 1);
                print!("{}", Theme::fg(&theme.colors.source_fg));
                print!("  │ {line}");
                print!("{}", Theme::reset());
                current_row += 1;
            }
        }
    }

    current_row
}
