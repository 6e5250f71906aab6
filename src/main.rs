//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the titlewiki library
//! and the Zellij plugin system. It implements `ZellijPlugin`, registers the
//! background worker, maps host events to library events and executes the
//! actions the library returns.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling, web requests
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │  TitleWikiWorker │   │  ← Catalog loading
//! │  │  (worker thread) │   │  ← Local image probing
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Event Mapping
//!
//! - `Key` → depends on the page, the preview and the search focus
//! - `Mouse` → wheel, or pointer events for the preview
//! - `Timer` → `Event::DebounceElapsed`
//! - `CustomMessage` → `Event::WorkerResponse`
//! - `WebRequestResult` → `Event::RemoteImageResult`
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! List, normal mode:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `Enter`: Open detail page
//! - `/`: Search
//! - `d`/`n`/`r`: Sort by date / name / random (`r` again reshuffles)
//! - `1`/`2`/`3`: Masonry / grid / list
//! - `g`/`Home`: Back to top
//! - `Esc`: Clear search
//! - `q`: Close plugin
//!
//! List, typing a query:
//! - Characters edit the query, `Backspace` deletes
//! - `Tab`: Cycle suggestions
//! - `Enter`: Accept suggestion, or move focus to results
//! - `Down`: Move focus to results
//! - `Esc`: Exit search, keeping the query
//!
//! Detail and not-found pages:
//! - `p`/`Enter`: Open image preview
//! - `b`/`Backspace`/`Esc`: Back
//! - `h`: Home
//!
//! Image preview:
//! - `+`/`-`: Zoom, arrows pan, `0` resets, `Esc`/`x` closes
//! - Drag pans, wheel zooms, clicking outside the image closes

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use titlewiki::app::images::remote_image_ok;
use titlewiki::app::state::Viewport;
use titlewiki::infrastructure::Route;
use titlewiki::worker::{TitleWikiWorker, WorkerMessage, WorkerResponse};
use titlewiki::{handle_event, Action, Config, Event, InputMode, LayoutMode, SearchFocus, SortMode};

// Register plugin and worker with Zellij
register_plugin!(State);
register_worker!(TitleWikiWorker, titlewiki_worker, TITLEWIKI_WORKER);

/// Context key carrying the image URL through a web request.
const URL_CONTEXT_KEY: &str = "url";

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns like worker
/// communication.
struct State {
    /// Core application state from library layer.
    app: titlewiki::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: titlewiki::initialize(&Config::default()),
            worker_name: "titlewiki".to_string(),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// Requests:
    /// - `ReadApplicationState`: Required for plugin-worker messaging
    /// - `FullHdAccess`: Read the catalog and local images under `/host`
    /// - `WebAccess`: Fetch remote images
    ///
    /// The catalog is requested from the worker once permissions are granted.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        titlewiki::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(catalog = %config.catalog_path, assets = %config.assets_dir, "parsed configuration");
        self.app = titlewiki::initialize(&config);

        request_permission(&[
            PermissionType::ReadApplicationState,
            PermissionType::FullHdAccess,
            PermissionType::WebAccess,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::Timer,
            EventType::CustomMessage,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => self.map_key_event(key),
            zellij_tile::prelude::Event::Mouse(mouse) => self.map_mouse_event(mouse),
            zellij_tile::prelude::Event::Timer(_) => Some(Event::DebounceElapsed),
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                self.map_custom_message_event(&message, &payload)
            }
            zellij_tile::prelude::Event::WebRequestResult(status, headers, _body, context) => {
                Self::map_web_request_event(status, &headers, &context)
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Some(Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            }),
            _ => None,
        };
        let Some(our_event) = our_event else {
            return false;
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Records the pane size, then delegates to the library's renderer.
    fn render(&mut self, rows: usize, cols: usize) {
        self.app.viewport = Viewport { rows, cols };
        titlewiki::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(mouse) => format!("Mouse({mouse:?})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        if self.app.preview.is_open() {
            return Self::map_preview_key(key.bare_key);
        }

        match self.app.navigator.current() {
            Route::List => self.map_list_key(key.bare_key),
            Route::Detail(_) | Route::Unknown(_) => Self::map_page_key(key.bare_key),
        }
    }

    fn map_preview_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Char('+' | '=') => Event::ZoomIn,
            BareKey::Char('-' | '_') => Event::ZoomOut,
            BareKey::Char('0') => Event::ResetPreview,
            BareKey::Left => Event::Pan { dx: -1, dy: 0 },
            BareKey::Right => Event::Pan { dx: 1, dy: 0 },
            BareKey::Up => Event::Pan { dx: 0, dy: -1 },
            BareKey::Down => Event::Pan { dx: 0, dy: 1 },
            BareKey::Esc | BareKey::Char('x') => Event::ClosePreview,
            _ => return None,
        })
    }

    fn map_page_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Char('p') | BareKey::Enter => Event::OpenPreview,
            BareKey::Char('b') | BareKey::Backspace | BareKey::Esc => Event::NavigateBack,
            BareKey::Char('h') => Event::NavigateHome,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_list_key(&self, key: BareKey) -> Option<Event> {
        if self.app.input_mode == InputMode::Search(SearchFocus::Typing) {
            return Some(match key {
                BareKey::Esc => Event::ExitSearch,
                BareKey::Enter => Event::AcceptSuggestion,
                BareKey::Tab => Event::CycleSuggestion,
                BareKey::Down => Event::FocusResults,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::OpenSelected,
            BareKey::Char('/') => match self.app.input_mode {
                InputMode::Normal => Event::SearchMode,
                InputMode::Search(_) => Event::FocusSearchBar,
            },
            BareKey::Esc => match self.app.input_mode {
                InputMode::Normal => Event::Escape,
                InputMode::Search(_) => Event::ExitSearch,
            },
            BareKey::Char('d') => Event::SetSort(SortMode::Date),
            BareKey::Char('n') => Event::SetSort(SortMode::Name),
            BareKey::Char('r') => Event::SetSort(SortMode::Random),
            BareKey::Char('1') => Event::SetLayout(LayoutMode::Masonry),
            BareKey::Char('2') => Event::SetLayout(LayoutMode::Grid),
            BareKey::Char('3') => Event::SetLayout(LayoutMode::List),
            BareKey::Char('g') | BareKey::Home => Event::BackToTop,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps mouse events to application events.
    ///
    /// Presses and drags only matter while the preview is open; the wheel
    /// either zooms the preview or scrolls the list.
    fn map_mouse_event(&self, mouse: Mouse) -> Option<Event> {
        let preview_open = self.app.preview.is_open();
        match mouse {
            Mouse::ScrollUp(_) => Some(Event::Wheel { up: true }),
            Mouse::ScrollDown(_) => Some(Event::Wheel { up: false }),
            Mouse::LeftClick(line, col) if preview_open => Some(Event::PointerDown { line, col: to_isize(col) }),
            Mouse::Hold(line, col) if preview_open => Some(Event::PointerDrag { line, col: to_isize(col) }),
            Mouse::Release(..) if preview_open => Some(Event::PointerUp),
            _ => None,
        }
    }

    /// Maps custom message events to application events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }
        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Maps a finished image fetch back to the URL that was requested.
    fn map_web_request_event(
        status: u16,
        headers: &BTreeMap<String, String>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(url) = context.get(URL_CONTEXT_KEY) else {
            tracing::debug!(status, "web request result without url context");
            return None;
        };
        let ok = remote_image_ok(status, headers);
        tracing::debug!(url = %url, status, ok, "remote image result");
        Some(Event::RemoteImageResult { url: url.clone(), ok })
    }

    /// Posts a message to the worker thread.
    ///
    /// Logs serialization errors but does not propagate them.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(&message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Executes an action returned from event handling.
    ///
    /// # Actions
    ///
    /// - `CloseFocus`: Hide the plugin pane
    /// - `PostToWorker`: Send IPC message to worker thread
    /// - `ScheduleTimer`: Arm a host timer
    /// - `FetchImage`: Issue a GET through the host's web request API
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::PostToWorker(message) => {
                self.post_worker_message(message);
            }
            Action::ScheduleTimer { millis } => {
                #[allow(clippy::cast_precision_loss)]
                set_timeout(*millis as f64 / 1000.0);
            }
            Action::FetchImage { url } => {
                let context = BTreeMap::from([(URL_CONTEXT_KEY.to_string(), url.clone())]);
                web_request(url, HttpVerb::Get, BTreeMap::new(), Vec::new(), context);
            }
        }
    }
}

fn to_isize(col: usize) -> isize {
    isize::try_from(col).unwrap_or(isize::MAX)
}
