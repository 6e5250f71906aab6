//! Empty, loading and load-failure states.

use crate::ui::helpers::{center, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Blank rows between the top of the body and the message.
const TOP_PADDING: usize = 2;

/// Renders a centered two-line message inside the body starting at `top_row`.
///
/// # Layout
///
/// ```text
/// [2 blank lines]
///                          🤔
///                   没有找到相关称号
///            试试其他关键词吧 (esc 查看全部称号)
/// ```
///
/// The message uses the `empty_state_fg` theme color, the subtitle is dimmed.
pub fn render_empty_state(top_row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    render_message(top_row, "🤔", empty, theme, cols);
}

/// Shown while the worker is still reading the catalog.
pub fn render_loading(top_row: usize, theme: &Theme, cols: usize) {
    let loading = EmptyState { message: "加载中...".to_string(), subtitle: "正在读取称号库".to_string() };
    render_message(top_row, "⏳", &loading, theme, cols);
}

pub fn render_load_failed(top_row: usize, failure: &EmptyState, theme: &Theme, cols: usize) {
    render_message(top_row, "⚠", failure, theme, cols);
}

fn render_message(top_row: usize, icon: &str, state: &EmptyState, theme: &Theme, cols: usize) {
    let row = top_row + TOP_PADDING;

    position_cursor(row, 1);
    print!("{}", center(icon, cols));

    position_cursor(row + 1, 1);
    print!("{}{}", Theme::fg(&theme.colors.empty_state_fg), Theme::bold());
    print!("{}", center(&state.message, cols));
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print!("{}", center(&state.subtitle, cols));
    print!("{}", Theme::reset());
}
