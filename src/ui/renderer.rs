//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the page's component renderers,
//!    then draw the footer and, when open, the image preview on top
//!
//! # Example
//!
//! ```rust,no_run
//! use titlewiki::app::AppState;
//! use titlewiki::ui::{render, Theme};
//!
//! let state = AppState::new(Theme::default());
//! render(&state, 24, 80); // Renders the loading screen to stdout
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Page, UIViewModel};

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output using `print!`. Does not clear the screen; the
/// host starts every frame blank.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    match &vm.page {
        Page::Loading => components::render_status_page(&vm.header, None, theme, cols),
        Page::LoadFailed(failure) => components::render_status_page(&vm.header, Some(failure), theme, cols),
        Page::List(page) => components::render_list_page(&vm.header, page, theme, rows, cols),
        Page::Detail(page) => components::render_detail_page(&vm.header, page, theme, rows, cols),
        Page::NotFound(page) => components::render_not_found_page(&vm.header, page, theme, cols),
    }

    components::render_footer_bar(&vm.footer, theme, rows, cols);

    if let Some(preview) = &vm.preview {
        components::preview::render_preview(preview, theme, rows, cols);
    }
}
