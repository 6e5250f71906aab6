//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never touches the host
//! directly; it returns a `Vec<Action>` that the plugin runtime executes in
//! order after each event.
//!
//! # Example
//!
//! ```rust
//! use titlewiki::app::Action;
//! use titlewiki::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::load_catalog("/data/titles.json".to_string())),
//!     Action::ScheduleTimer { millis: 300 },
//! ];
//! # let _ = actions;
//! ```

use crate::worker::WorkerMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends a request to the background worker.
    PostToWorker(WorkerMessage),

    /// Arms a one-shot timer; the host answers with a timer event.
    ///
    /// One timer is armed per scheduled suggestion computation.
    ScheduleTimer { millis: u64 },

    /// Fetches a remote image through the host's web request API.
    FetchImage { url: String },
}
