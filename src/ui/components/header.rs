//! Header component renderer.
//!
//! This module renders the overlay title bar with centered text and a dim
//! description line underneath. While the first page of a session is still
//! loading, the title is the raw table name; afterwards it is whatever the
//! server sent.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title and description at the specified row.
///
/// The title is centered horizontally with bold styling and theme colors;
/// the description is centered underneath with dim styling. Both lines are
/// padded to fill the entire terminal width.
///
/// # Parameters
///
/// * `row` - Row position to render the title (1-indexed)
/// * `header` - Header information (title and description text)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 2)
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = header.title.len().min(cols);
    let padding = (cols.saturating_sub(title_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));
    print!("{}", Theme::reset());

    let desc_len = header.description.len().min(cols);
    let desc_padding = (cols.saturating_sub(desc_len)) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(desc_padding));
    print!("{}", header.description);
    print!(
        "{}",
        " ".repeat(cols.saturating_sub(desc_padding + desc_len))
    );
    print!("{}", Theme::reset());

    row + 2
}
