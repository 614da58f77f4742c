//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! plugin runtime (main.rs) and the domain/api layers. It implements the
//! event-driven architecture that powers the lookup table browser.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Fetch Completions ───────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Keystroke coalescing for search-as-you-type
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode state machine types
//! - [`session`]: Browser session state (query, cursor, pagination, rows)
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use zlookup::app::{handle_event, AppState, Event};
//! use zlookup::Theme;
//!
//! let mut state = AppState::new("http://localhost:9000".into(), 100, Theme::default());
//! let (_render, _actions) = handle_event(&mut state, &Event::FocusQuery)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod session;
pub mod state;

pub use actions::Action;
pub use debounce::Debouncer;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use session::{PaginationControl, PaginationStrip, RowState, SelectionTarget, Session};
pub use state::{AppState, SmartValuesOverlay, SmartValuesPhase};
