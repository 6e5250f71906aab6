//! Title detail page and the not-found page.

use crate::app::images::ImageSlot;
use crate::ui::components::cards::file_name;
use crate::ui::helpers::{center, pad_to_width, position_cursor, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailPage, NotFoundPage};

/// Widest the image frame gets on the detail page.
const IMAGE_FRAME_WIDTH: usize = 48;

/// Rows of the image frame, borders included.
const IMAGE_FRAME_ROWS: usize = 7;

/// Renders a title's detail page between `row` and `last_row` (inclusive).
///
/// # Layout
///
/// ```text
///  ← b 返回上页   h 返回首页
///
///                          路痴哥
///                     📅 2024年1月1日
///                 ╭────────────────────╮
///                 │    🖼 ludi.jpg     │
///                 │   p 查看大图       │
///                 ╰────────────────────╯
///  详细描述
///  总是迷路……
/// ```
///
/// The image frame is omitted for titles without an image. Description lines
/// that do not fit above `last_row` are dropped.
pub fn render_detail(row: usize, last_row: usize, page: &DetailPage, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.accent));
    print!("{}", pad_to_width(" ← b 返回上页   h 返回首页", cols));
    print!("{}", Theme::reset());

    let mut current = row + 2;

    position_cursor(current, 1);
    print!("{}{}", Theme::fg(&theme.colors.header_fg), Theme::bold());
    print!("{}", center(&page.title, cols));
    print!("{}", Theme::reset());
    current += 1;

    position_cursor(current, 1);
    print!("{}", Theme::fg(&theme.colors.date_fg));
    print!("{}", center(&format!("📅 {}", page.date), cols));
    print!("{}", Theme::reset());
    current += 2;

    if page.image != ImageSlot::None && current + IMAGE_FRAME_ROWS <= last_row {
        current = render_image_frame(current, page, theme, cols);
        current += 1;
    }

    if current > last_row {
        return;
    }
    position_cursor(current, 1);
    print!("{}{} 详细描述{}", Theme::fg(&theme.colors.accent), Theme::bold(), Theme::reset());
    current += 1;

    let width = cols.saturating_sub(4);
    let available = (last_row + 1).saturating_sub(current);
    for line in wrap_text(&page.description, width, available) {
        position_cursor(current, 3);
        print!("{}{line}{}", Theme::fg(&theme.colors.text_normal), Theme::reset());
        current += 1;
    }
}

fn render_image_frame(row: usize, page: &DetailPage, theme: &Theme, cols: usize) -> usize {
    let width = IMAGE_FRAME_WIDTH.min(cols.saturating_sub(4));
    let inner = width.saturating_sub(2);
    let left = (cols.saturating_sub(width)) / 2 + 1;
    let border = Theme::fg(&theme.colors.card_border);

    let (color, label) = match &page.image {
        ImageSlot::Ready(url) => (&theme.colors.image_fg, format!("🖼 {}", file_name(url))),
        ImageSlot::Pending(_) => (&theme.colors.placeholder_fg, "图片加载中…".to_string()),
        ImageSlot::Placeholder | ImageSlot::None => (&theme.colors.placeholder_fg, "📸".to_string()),
    };
    let hint = if page.can_preview { "p 查看大图" } else { "" };

    position_cursor(row, left);
    print!("{border}╭{}╮{}", "─".repeat(inner), Theme::reset());
    for i in 1..IMAGE_FRAME_ROWS - 1 {
        let text = match i {
            2 => center(&label, inner),
            4 => center(hint, inner),
            _ => " ".repeat(inner),
        };
        position_cursor(row + i, left);
        print!("{border}│{}{text}{border}│{}", Theme::fg(color), Theme::reset());
    }
    position_cursor(row + IMAGE_FRAME_ROWS - 1, left);
    print!("{border}╰{}╯{}", "─".repeat(inner), Theme::reset());

    row + IMAGE_FRAME_ROWS
}

/// Renders the page for a route that names no catalog title.
///
/// # Layout
///
/// ```text
///                           🤔
///                     未找到该称号
///              这个称号暂时没有记录：路痴
///               你是不是要找：路痴哥 • 报备哥
///                   h 返回首页 • b 返回上页
/// ```
pub fn render_not_found(row: usize, page: &NotFoundPage, theme: &Theme, cols: usize) {
    let row = row + 2;

    position_cursor(row, 1);
    print!("{}", center("🤔", cols));

    position_cursor(row + 1, 1);
    print!("{}{}", Theme::fg(&theme.colors.empty_state_fg), Theme::bold());
    print!("{}", center("未找到该称号", cols));
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", center(&page.message, cols));
    print!("{}", Theme::reset());

    let mut next = row + 4;
    if !page.similar.is_empty() {
        position_cursor(next, 1);
        print!("{}", Theme::fg(&theme.colors.accent));
        print!("{}", center(&format!("你是不是要找：{}", page.similar.join(" • ")), cols));
        print!("{}", Theme::reset());
        next += 1;
    }

    position_cursor(next, 1);
    print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print!("{}", center("h 返回首页 • b 返回上页", cols));
    print!("{}", Theme::reset());
}
