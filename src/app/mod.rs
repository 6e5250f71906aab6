//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain, query, storage
//! and worker layers.
//!
//! ```text
//! User Input → Events → handle_event → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──── Worker / Host Responses ─────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects emitted by the event handler
//! - [`handler`]: the reducer
//! - [`modes`]: input and layout modes
//! - [`state`]: the state container and view model computation
//! - [`images`]: session-scoped image load tracking
//! - [`suggest`]: debounced search suggestions
//! - [`scroll`]: list scroll offset and the flags derived from it
//! - [`preview`]: image preview state machine
//! - [`navigator`]: route history

pub mod actions;
pub mod handler;
pub mod images;
pub mod modes;
pub mod navigator;
pub mod preview;
pub mod scroll;
pub mod state;
pub mod suggest;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, LayoutMode, SearchFocus};
pub use state::AppState;
