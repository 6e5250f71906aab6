//! Site header renderer.
//!
//! The full header carries the site title and tagline on two centered rows.
//! Once the result list has been scrolled a little, it collapses to a single
//! left-aligned title row to give the cards more room.

use crate::ui::helpers::{center, pad_to_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header starting at `row`.
///
/// # Returns
///
/// The next available row: `row + 2` for the full header, `row + 1` when
/// compact.
///
/// # Layout
///
/// ```text
/// Full:
///                       司马光Wiki
///       探索传奇人物的精彩称号宇宙 • 每个名字背后都有一个故事
///
/// Compact:
///  司马光Wiki
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let background = theme.colors.header_bg.as_deref().map(Theme::bg).unwrap_or_default();

    position_cursor(row, 1);
    print!("{background}{}{}", Theme::fg(&theme.colors.header_fg), Theme::bold());
    if header.compact {
        print!("{}", pad_to_width(&format!(" {}", header.title), cols));
        print!("{}", Theme::reset());
        return row + 1;
    }
    print!("{}", center(&header.title, cols));
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{background}{}", Theme::fg(&theme.colors.tagline_fg));
    print!("{}", center(&header.tagline, cols));
    print!("{}", Theme::reset());

    row + 2
}

/// Renders the single-row bar used above detail and not-found pages.
pub fn render_title_bar(row: usize, title: &str, theme: &Theme, cols: usize) -> usize {
    render_header(
        row,
        &HeaderInfo { title: title.to_string(), tagline: String::new(), compact: true },
        theme,
        cols,
    )
}
