//! Sort and layout toggles, plus the result summary line.

use crate::ui::helpers::{center, display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ControlsInfo, ToggleItem};

fn toggle_group(label: &str, items: &[ToggleItem], theme: &Theme) -> (String, usize) {
    let mut styled = format!("{}{label}", Theme::fg(&theme.colors.text_dim));
    let mut width = display_width(label);
    for item in items {
        let text = format!(" [{}]{}", item.key, item.label);
        width += display_width(&text);
        if item.active {
            styled.push_str(&format!(
                "{}{}{}{text}{}",
                Theme::fg(&theme.colors.accent),
                Theme::bold(),
                Theme::underline(),
                Theme::reset()
            ));
        } else {
            styled.push_str(&format!("{}{text}", Theme::fg(&theme.colors.text_dim)));
        }
    }
    (styled, width)
}

/// Renders the toggles centered at `row`.
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Layout
///
/// ```text
///      排序: [d]时间 [n]名称 [r]随机    布局: [1]瀑布流 [2]网格 [3]列表
/// ```
///
/// The active option of each group is bold and underlined in the accent
/// color.
pub fn render_controls(row: usize, controls: &ControlsInfo, theme: &Theme, cols: usize) -> usize {
    let (sorts, sorts_width) = toggle_group("排序:", &controls.sorts, theme);
    let (layouts, layouts_width) = toggle_group("布局:", &controls.layouts, theme);
    let gap = "    ";
    let width = sorts_width + gap.len() + layouts_width;

    position_cursor(row, 1);
    if width > cols {
        // Too narrow for both groups; sorting matters more.
        print!("{sorts}{}", Theme::reset());
        return row + 1;
    }
    print!("{}", " ".repeat((cols - width) / 2));
    print!("{sorts}{gap}{layouts}{}", Theme::reset());

    row + 1
}

/// Renders the result count line centered at `row`.
pub fn render_summary(row: usize, summary: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", center(summary, cols));
    print!("{}", Theme::reset());
    row + 1
}
