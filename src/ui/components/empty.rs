//! Empty state component renderer.
//!
//! This module renders the empty state message displayed when the result
//! list has nothing to show.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state message.
///
/// Displays a centered two-line message when no rows are available.
/// Typically shown when:
/// - The query matched nothing on the server
/// - No table has been opened yet
///
/// # Parameters
///
/// * `empty` - Empty state information (message and subtitle)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Layout
///
/// Both lines are horizontally centered. The message uses the
/// `empty_state_fg` theme color, the subtitle `text_dim` with dim styling.
/// The message is positioned at row 9 (under the search box), the subtitle
/// at row 10.
pub fn render_empty_state(empty: &EmptyState, theme: &Theme, cols: usize) {
    let msg_len = empty.message.len();
    let msg_padding = (cols.saturating_sub(msg_len)) / 2;

    position_cursor(9, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(msg_padding));
    print!("{}", empty.message);
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let sub_len = empty.subtitle.len();
    let sub_padding = (cols.saturating_sub(sub_len)) / 2;

    position_cursor(10, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{}", empty.subtitle);
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());
}
