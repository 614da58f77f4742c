//! Input mode state types for the application.
//!
//! This module defines the state machine enum that controls how keyboard input
//! is interpreted while the browser overlay is open. The query field has focus
//! when a session is created (search-as-you-type is the primary interaction);
//! the user can shift focus to the result list and back.
//!
//! # State Machine
//!
//! - **Typing**: characters edit the query, navigation via Ctrl bindings
//! - **Navigating**: vim-style movement over rows and pages
//!
//! # Example
//!
//! ```rust
//! use zlookup::app::modes::InputMode;
//!
//! let mode = InputMode::Typing;
//! assert_ne!(mode, InputMode::Navigating);
//! ```

/// Current input handling mode for the browser overlay.
///
/// Controls which keybindings are active and how user input is processed.
/// Determines the displayed footer text and the search bar focus marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// The query field has focus.
    ///
    /// Printable characters and backspace edit the query (debounced reload),
    /// `Ctrl+n`/`Ctrl+p` move the row selection, `Down` shifts focus to the
    /// results, `Enter` activates the selected row, `Tab` toggles its source.
    Typing,

    /// The result list has focus.
    ///
    /// `j`/`k` move the selection, `h`/`l` page, `/` returns focus to the
    /// query field, `Enter` activates, `Tab` toggles source, `q` closes.
    Navigating,
}
