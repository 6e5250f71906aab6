//! Composable UI component renderers.
//!
//! Each component draws one part of the interface at a given row and, where
//! it makes sense, returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Site title and tagline, full or compact
//! - [`search`]: Search input and suggestion dropdown
//! - [`controls`]: Sort and layout toggles, result summary
//! - [`cards`]: Result cards for the masonry, grid and list layouts
//! - [`detail`]: Title detail and not-found pages
//! - [`empty`]: Empty, loading and load-failure messages
//! - [`preview`]: Image preview overlay
//! - [`footer`]: Key hints, back-to-top marker and catalog size
//!
//! # Page Layouts
//!
//! - [`render_list_page`]: Header + Search + Controls + Cards + Footer
//! - [`render_detail_page`]: Title bar + Detail + Footer
//! - [`render_not_found_page`]: Title bar + Not found + Footer
//! - [`render_status_page`]: Header + Loading or failure message + Footer

pub mod cards;
mod controls;
mod detail;
mod empty;
mod footer;
mod header;
pub mod preview;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::layout::FOOTER_ROWS;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailPage, EmptyState, FooterInfo, HeaderInfo, ListBody, ListPage, NotFoundPage};

use controls::{render_controls, render_summary};
use header::{render_header, render_title_bar};
use search::{render_search_bar, render_search_line, render_suggestions};

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the separator and footer on the last two rows.
pub fn render_footer_bar(footer: &FooterInfo, theme: &Theme, rows: usize, cols: usize) {
    let border_row = rows.saturating_sub(FOOTER_ROWS) + 1;
    render_border(border_row, &theme.colors.border, cols);
    footer::render_footer(border_row + 1, footer, theme, cols);
}

/// Last row available to page content above the footer.
const fn last_content_row(rows: usize) -> usize {
    rows.saturating_sub(FOOTER_ROWS)
}

/// Renders the title list.
///
/// Layout structure:
/// ```text
/// [Header - 2 lines, or 1 when compact]
/// [Search Bar - 3 lines, or 1 when compact]
/// [Controls]
/// [Summary]
/// [Border]
/// [Cards or empty state, scrolled]
/// [Suggestion dropdown, over the first body rows]
/// ```
pub fn render_list_page(header: &HeaderInfo, page: &ListPage, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = render_header(1, header, theme, cols);
    let suggestions_row;
    if header.compact {
        current_row = render_search_line(current_row, &page.search_bar, theme, cols);
        suggestions_row = current_row;
    } else {
        current_row = render_search_bar(current_row, &page.search_bar, theme, cols);
        suggestions_row = current_row - 1;
    }
    current_row = render_controls(current_row, &page.controls, theme, cols);
    current_row = render_summary(current_row, &page.summary, theme, cols);
    let body_top = render_border(current_row, &theme.colors.border, cols);

    match &page.body {
        ListBody::Empty(empty) => empty::render_empty_state(body_top, empty, theme, cols),
        ListBody::Cards(view) => cards::render_cards(body_top, view, theme),
    }

    render_suggestions(suggestions_row, last_content_row(rows), &page.search_bar, theme, cols);
}

/// Renders a title's detail page.
pub fn render_detail_page(header: &HeaderInfo, page: &DetailPage, theme: &Theme, rows: usize, cols: usize) {
    let current_row = render_title_bar(1, &header.title, theme, cols);
    let current_row = render_border(current_row, &theme.colors.border, cols);
    detail::render_detail(current_row, last_content_row(rows), page, theme, cols);
}

/// Renders the page for an unknown title or path.
pub fn render_not_found_page(header: &HeaderInfo, page: &NotFoundPage, theme: &Theme, cols: usize) {
    let current_row = render_title_bar(1, &header.title, theme, cols);
    let current_row = render_border(current_row, &theme.colors.border, cols);
    detail::render_not_found(current_row, page, theme, cols);
}

/// Renders the loading screen, or the load failure when `failure` is set.
pub fn render_status_page(header: &HeaderInfo, failure: Option<&EmptyState>, theme: &Theme, cols: usize) {
    let current_row = render_header(1, header, theme, cols);
    let current_row = render_border(current_row, &theme.colors.border, cols);
    match failure {
        Some(failure) => empty::render_load_failed(current_row, failure, theme, cols),
        None => empty::render_loading(current_row, theme, cols),
    }
}
