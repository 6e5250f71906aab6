//! Footer renderer: key hints on the left, catalog size on the right.
//!
//! When the list has been scrolled far enough, a back-to-top marker sits
//! between the two.

use crate::ui::helpers::{display_width, pad_to_width, position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

const BACK_TO_TOP_LABEL: &str = "↑ g 回到顶部";

/// Renders the footer at `row`.
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Layout
///
/// ```text
///  j/k: 移动 | enter: 查看 | ...      ↑ g 回到顶部  共收录 12 个称号
/// ```
///
/// The key hints are truncated first when the pane is too narrow for all
/// three parts.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let total = format!("{} ", footer.total);
    let marker = if footer.back_to_top { format!("{BACK_TO_TOP_LABEL}  ") } else { String::new() };
    let right_width = display_width(&total) + display_width(&marker);
    let hints_width = cols.saturating_sub(right_width);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", pad_to_width(&format!(" {}", footer.keybindings), hints_width));
    if !marker.is_empty() {
        print!("{}{}", Theme::fg(&theme.colors.accent), Theme::bold());
        print!("{}", truncate_to_width(&marker, cols.saturating_sub(hints_width)));
        print!("{}", Theme::reset());
    }
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", truncate_to_width(&total, cols.saturating_sub(hints_width + display_width(&marker))));
    print!("{}", Theme::reset());

    row + 1
}
