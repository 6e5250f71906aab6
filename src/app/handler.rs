//! Event handling and state transition logic.
//!
//! [`handle_event`] is the reducer: it applies one [`Event`] to the
//! [`AppState`] and returns whether a re-render is needed plus the actions
//! the runtime must execute. Lookup misses, image failures and malformed
//! dates are states here, never errors.
//!
//! # Event Types
//!
//! - **List**: `KeyDown`, `KeyUp`, `OpenSelected`, `BackToTop`, `Wheel`
//! - **Search**: `SearchMode`, `Char`, `Backspace`, `CycleSuggestion`,
//!   `AcceptSuggestion`, `FocusResults`, `FocusSearchBar`, `ExitSearch`,
//!   `Escape`, `DebounceElapsed`
//! - **Controls**: `SetSort`, `SetLayout`
//! - **Routing**: `Navigate`, `NavigateBack`, `NavigateHome`
//! - **Preview**: `OpenPreview`, `ClosePreview`, `ZoomIn`, `ZoomOut`, `Pan`,
//!   `ResetPreview`, `PointerDown`, `PointerDrag`, `PointerUp`
//! - **System**: `PermissionsResult`, `WorkerResponse`, `RemoteImageResult`
//!
//! # Example
//!
//! ```rust
//! use titlewiki::app::{handle_event, AppState, Event};
//! use titlewiki::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(!should_render);
//! assert!(actions.is_empty());
//! # Ok::<(), titlewiki::TitleWikiError>(())
//! ```

use super::modes::{InputMode, LayoutMode, SearchFocus};
use super::preview::{PAN_STEP, ZOOM_IN, ZOOM_OUT};
use super::suggest::DEBOUNCE_MILLIS;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::infrastructure::Route;
use crate::query::SortMode;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Rows scrolled per mouse wheel notch in the list.
const WHEEL_ROWS: isize = 3;

/// Events triggered by user input, host callbacks or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Selects the next result (wraps to top).
    KeyDown,
    /// Selects the previous result (wraps to bottom).
    KeyUp,
    /// Opens the detail page of the selected result.
    OpenSelected,
    /// Scrolls the list back to the top and selects the first result.
    BackToTop,
    /// Mouse wheel: zooms an open preview, otherwise scrolls the list.
    Wheel { up: bool },
    /// Hides the plugin.
    CloseFocus,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Moves focus from the results back to the search box.
    FocusSearchBar,
    /// Moves focus from the search box to the results.
    FocusResults,
    /// Leaves search mode, keeping the query.
    ExitSearch,
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character of the query.
    Backspace,
    /// Clears the query and leaves search mode.
    Escape,
    CycleSuggestion,
    /// Accepts the highlighted suggestion, or focuses the results when
    /// none is shown.
    AcceptSuggestion,
    /// A suggestion debounce timer elapsed.
    DebounceElapsed,

    SetSort(SortMode),
    SetLayout(LayoutMode),

    /// Navigates to a path such as `/title/%E8%B7%AF%E7%97%B4%E5%93%A5`.
    Navigate(String),
    NavigateBack,
    NavigateHome,

    OpenPreview,
    ClosePreview,
    ZoomIn,
    ZoomOut,
    /// Pans the preview by whole steps.
    Pan { dx: isize, dy: isize },
    ResetPreview,
    /// Mouse press at a zero-based pane cell.
    PointerDown { line: isize, col: isize },
    /// Mouse move with the button held.
    PointerDrag { line: isize, col: isize },
    PointerUp,

    /// Outcome of the permission request made on load.
    PermissionsResult { granted: bool },

    /// Wraps a response from the background worker.
    WorkerResponse(WorkerResponse),

    /// Outcome of a remote image fetch.
    RemoteImageResult { url: String, ok: bool },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned `bool` is `true` when the visible state changed.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps room for reducers that touch
/// fallible state.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let outcome = match event {
        Event::KeyDown => {
            state.move_selection_down();
            (!state.results.is_empty(), vec![])
        }
        Event::KeyUp => {
            state.move_selection_up();
            (!state.results.is_empty(), vec![])
        }
        Event::OpenSelected => {
            let changed = state.open_selected();
            (changed, image_actions(state))
        }
        Event::BackToTop => {
            state.back_to_top();
            (true, vec![])
        }
        Event::Wheel { up } => {
            if state.preview.is_open() {
                state.preview.wheel(*up);
            } else {
                state.scroll_by(if *up { -WHEEL_ROWS } else { WHEEL_ROWS });
            }
            (true, vec![])
        }
        Event::CloseFocus => (false, vec![Action::CloseFocus]),

        Event::SearchMode | Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            (true, vec![])
        }
        Event::FocusResults => {
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            state.suggestions.clear();
            (true, vec![])
        }
        Event::ExitSearch => {
            state.input_mode = InputMode::Normal;
            state.suggestions.clear();
            (true, vec![])
        }
        Event::Char(c) => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            let mut query = std::mem::take(&mut state.search_query);
            query.push(*c);
            state.set_query(query);
            (true, typing_actions(state))
        }
        Event::Backspace => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            let mut query = std::mem::take(&mut state.search_query);
            query.pop();
            state.set_query(query);
            (true, typing_actions(state))
        }
        Event::Escape => {
            state.clear_search();
            (true, image_actions(state))
        }
        Event::CycleSuggestion => {
            state.suggestions.cycle();
            (state.suggestions.is_visible(), vec![])
        }
        Event::AcceptSuggestion => {
            if !state.accept_suggestion() {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
                state.suggestions.clear();
            }
            (true, image_actions(state))
        }
        Event::DebounceElapsed => {
            let refreshed = match &state.catalog {
                Some(catalog) if state.input_mode.is_typing() => {
                    state.suggestions.on_timer(catalog, &state.search_query)
                }
                _ => {
                    state.suggestions.discard_timer();
                    false
                }
            };
            (refreshed, vec![])
        }

        Event::SetSort(mode) => {
            state.set_sort(*mode);
            (true, vec![])
        }
        Event::SetLayout(mode) => {
            state.set_layout(*mode);
            (true, vec![])
        }

        Event::Navigate(path) => {
            let changed = state.navigate(Route::parse(path));
            (changed, image_actions(state))
        }
        Event::NavigateBack => {
            let changed = state.navigate_back();
            (changed, image_actions(state))
        }
        Event::NavigateHome => {
            let changed = state.navigate_home();
            (changed, image_actions(state))
        }

        Event::OpenPreview => (state.open_preview(), vec![]),
        Event::ClosePreview => {
            let was_open = state.preview.is_open();
            state.preview.close();
            (was_open, vec![])
        }
        Event::ZoomIn => {
            state.preview.zoom(ZOOM_IN);
            (state.preview.is_open(), vec![])
        }
        Event::ZoomOut => {
            state.preview.zoom(ZOOM_OUT);
            (state.preview.is_open(), vec![])
        }
        Event::Pan { dx, dy } => {
            state.preview.pan(dx * PAN_STEP.0, dy * PAN_STEP.1);
            (state.preview.is_open(), vec![])
        }
        Event::ResetPreview => {
            state.preview.reset();
            (state.preview.is_open(), vec![])
        }
        Event::PointerDown { line, col } => {
            let viewport = state.viewport;
            match state.preview.image_rect(viewport.rows, viewport.cols) {
                Some(rect) if rect.contains(*line, *col) => {
                    state.preview.drag_start(*line, *col);
                    (true, vec![])
                }
                Some(_) => {
                    tracing::debug!(line, col, "click outside preview image");
                    state.preview.close();
                    (true, vec![])
                }
                None => (false, vec![]),
            }
        }
        Event::PointerDrag { line, col } => {
            let dragging = state.preview.is_dragging();
            state.preview.drag_move(*line, *col);
            (dragging, vec![])
        }
        Event::PointerUp => {
            let dragging = state.preview.is_dragging();
            state.preview.drag_end();
            (dragging, vec![])
        }

        Event::PermissionsResult { granted } => {
            if *granted {
                tracing::info!(catalog = %state.location.catalog_path, "permissions granted, loading catalog");
                let message = WorkerMessage::load_catalog(state.location.catalog_path.clone());
                (false, vec![Action::PostToWorker(message)])
            } else {
                tracing::warn!("permissions denied");
                state.load_error = Some("需要文件读取权限才能加载称号库".to_string());
                (true, vec![])
            }
        }
        Event::WorkerResponse(response) => handle_worker_response(state, response),
        Event::RemoteImageResult { url, ok } => {
            if *ok {
                state.images.mark_loaded(url);
            } else {
                state.images.mark_failed(url);
            }
            (true, vec![])
        }
    };

    Ok(outcome)
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::CatalogLoaded { catalog, source } => {
            tracing::info!(title_count = catalog.len(), source = %source, "catalog received");
            state.load_catalog(catalog.clone());
            (true, image_actions(state))
        }
        WorkerResponse::ImagesProbed { report } => {
            for url in &report.loaded {
                state.images.mark_loaded(url);
            }
            for url in &report.failed {
                state.images.mark_failed(url);
            }
            (true, vec![])
        }
        WorkerResponse::Error { message } => {
            tracing::warn!(error = %message, "worker error");
            if state.catalog.is_none() {
                state.load_error = Some(message.clone());
                return (true, vec![]);
            }
            (false, vec![])
        }
    }
}

/// Timer for the suggestion debounce plus image requests for the new result.
fn typing_actions(state: &mut AppState) -> Vec<Action> {
    let mut actions = if state.search_query.trim().is_empty() {
        state.suggestions.clear();
        vec![]
    } else {
        state.suggestions.schedule();
        vec![Action::ScheduleTimer { millis: DEBOUNCE_MILLIS }]
    };
    actions.extend(image_actions(state));
    actions
}

/// Requests for images that became visible and were never requested.
fn image_actions(state: &mut AppState) -> Vec<Action> {
    let requests = state.image_requests();
    let mut actions = Vec::new();
    if !requests.local.is_empty() {
        actions.push(Action::PostToWorker(WorkerMessage::probe_images(
            state.location.assets_dir.clone(),
            requests.local,
        )));
    }
    actions.extend(requests.remote.into_iter().map(|url| Action::FetchImage { url }));
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Catalog, TitleEntry, TitleRecord};
    use crate::ui::Theme;

    fn catalog() -> Catalog {
        Catalog::from_entries(vec![
            TitleEntry::new("报备哥", TitleRecord::new("2024-03-01", "出门必报备").with_image("/images/a.jpg")),
            TitleEntry::new("路痴哥", TitleRecord::new("2024-01-01", "总是迷路").with_image("https://cdn.example/b.png")),
            TitleEntry::new("美食家", TitleRecord::new("2024-02-15", "吃遍全城")),
        ])
        .unwrap()
    }

    fn loaded() -> AppState {
        let mut state = AppState::new(Theme::default());
        state.location.assets_dir = "/assets".to_string();
        let response = WorkerResponse::CatalogLoaded { catalog: catalog(), source: "test".into() };
        handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        state
    }

    fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    #[test]
    fn permissions_trigger_catalog_load() {
        let mut state = AppState::new(Theme::default());
        state.location.catalog_path = "/data/titles.json".to_string();
        let (_, actions) = send(&mut state, Event::PermissionsResult { granted: true });
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::LoadCatalog { path, .. })] if path == "/data/titles.json"
        ));

        let (render, _) = send(&mut state, Event::PermissionsResult { granted: false });
        assert!(render);
        assert!(state.load_error.is_some());
    }

    #[test]
    fn catalog_load_requests_images_by_loader() {
        let mut state = AppState::new(Theme::default());
        let response = WorkerResponse::CatalogLoaded { catalog: catalog(), source: "test".into() };
        let (render, actions) = send(&mut state, Event::WorkerResponse(response));
        assert!(render);
        assert_eq!(actions.len(), 2);
        assert!(matches!(&actions[0], Action::PostToWorker(WorkerMessage::ProbeImages { urls, .. }) if urls == &["/images/a.jpg"]));
        assert_eq!(actions[1], Action::FetchImage { url: "https://cdn.example/b.png".into() });
    }

    #[test]
    fn load_error_before_catalog_is_shown() {
        let mut state = AppState::new(Theme::default());
        let (render, _) = send(&mut state, Event::WorkerResponse(WorkerResponse::Error { message: "boom".into() }));
        assert!(render);
        assert_eq!(state.load_error.as_deref(), Some("boom"));
    }

    #[test]
    fn typing_filters_and_debounces_suggestions() {
        let mut state = loaded();
        send(&mut state, Event::SearchMode);
        let (_, actions) = send(&mut state, Event::Char('路'));
        assert_eq!(actions, [Action::ScheduleTimer { millis: DEBOUNCE_MILLIS }]);
        send(&mut state, Event::Char('痴'));
        assert_eq!(state.results.len(), 1);

        let (first, _) = send(&mut state, Event::DebounceElapsed);
        assert!(!first);
        let (second, _) = send(&mut state, Event::DebounceElapsed);
        assert!(second);
        assert_eq!(state.suggestions.items(), ["路痴哥"]);

        send(&mut state, Event::AcceptSuggestion);
        assert_eq!(state.search_query, "路痴哥");
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));
    }

    #[test]
    fn chars_outside_typing_are_ignored() {
        let mut state = loaded();
        let (render, actions) = send(&mut state, Event::Char('x'));
        assert!(!render && actions.is_empty());
        assert!(state.search_query.is_empty());
    }

    #[test]
    fn backspace_to_empty_clears_suggestions() {
        let mut state = loaded();
        send(&mut state, Event::SearchMode);
        send(&mut state, Event::Char('哥'));
        send(&mut state, Event::DebounceElapsed);
        assert!(state.suggestions.is_visible());
        let (_, actions) = send(&mut state, Event::Backspace);
        assert!(actions.is_empty());
        assert!(!state.suggestions.is_visible());
        assert_eq!(state.results.len(), 3);
    }

    #[test]
    fn escape_clears_search() {
        let mut state = loaded();
        send(&mut state, Event::SearchMode);
        send(&mut state, Event::Char('美'));
        send(&mut state, Event::Escape);
        assert!(state.search_query.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.results.len(), 3);
    }

    #[test]
    fn detail_navigation_and_back() {
        let mut state = loaded();
        send(&mut state, Event::KeyDown);
        let (render, _) = send(&mut state, Event::OpenSelected);
        assert!(render);
        assert_eq!(state.navigator.current(), &Route::detail("美食家"));

        send(&mut state, Event::NavigateBack);
        assert_eq!(state.navigator.current(), &Route::List);
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn preview_gestures() {
        let mut state = loaded();
        send(&mut state, Event::Navigate("/title/%E6%8A%A5%E5%A4%87%E5%93%A5".into()));
        let (opened, _) = send(&mut state, Event::OpenPreview);
        assert!(opened);

        for _ in 0..10 {
            send(&mut state, Event::ZoomIn);
        }
        assert_eq!(state.preview.scale(), Some(3.0));
        send(&mut state, Event::Wheel { up: false });
        assert!(state.preview.scale().unwrap() < 3.0);

        send(&mut state, Event::ResetPreview);
        let rect = state.preview.image_rect(state.viewport.rows, state.viewport.cols).unwrap();
        send(&mut state, Event::PointerDown { line: rect.y, col: rect.x });
        send(&mut state, Event::PointerDrag { line: rect.y + 2, col: rect.x + 3 });
        send(&mut state, Event::PointerUp);
        assert_eq!(state.preview.offset().map(|o| (o.x, o.y)), Some((3, 2)));

        send(&mut state, Event::PointerDown { line: 0, col: 0 });
        assert!(!state.preview.is_open());
    }

    #[test]
    fn failed_images_block_preview() {
        let mut state = loaded();
        send(&mut state, Event::Navigate("/title/%E8%B7%AF%E7%97%B4%E5%93%A5".into()));
        send(&mut state, Event::RemoteImageResult { url: "https://cdn.example/b.png".into(), ok: false });
        let (opened, _) = send(&mut state, Event::OpenPreview);
        assert!(!opened);
        assert!(!state.preview.is_open());
    }

    #[test]
    fn wheel_scrolls_list_when_preview_closed() {
        let mut state = loaded();
        state.viewport = crate::app::state::Viewport { rows: 14, cols: 40 };
        send(&mut state, Event::Wheel { up: false });
        assert_eq!(state.scroll.offset(), 3);
        send(&mut state, Event::BackToTop);
        assert_eq!(state.scroll.offset(), 0);
    }

    #[test]
    fn random_sort_twice_reshuffles() {
        let mut state = loaded();
        send(&mut state, Event::SetSort(SortMode::Random));
        let seed = state.shuffle_seed;
        send(&mut state, Event::SetSort(SortMode::Random));
        assert_ne!(seed, state.shuffle_seed);
    }
}
