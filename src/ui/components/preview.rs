//! Full-screen image preview overlay.
//!
//! Drawn last, over whatever page is underneath. The image frame follows the
//! zoom and pan state and may extend past the pane; only its visible part is
//! printed.

use crate::ui::components::cards::file_name;
use crate::ui::helpers::{center, display_width, pad_to_width, position_cursor, slice_cells};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PreviewInfo;

/// Plain text lines of the image frame, each `width` cells wide.
#[must_use]
pub fn frame_lines(preview: &PreviewInfo, width: usize, height: usize) -> Vec<String> {
    let inner = width.saturating_sub(2);
    let mut lines = Vec::with_capacity(height);
    lines.push(format!("┌{}┐", "─".repeat(inner)));

    let body = height.saturating_sub(2);
    let middle = body / 2;
    for i in 0..body {
        let text = if i == middle {
            center(&format!("🖼 {}", file_name(&preview.url)), inner)
        } else if i + 1 == middle {
            center(&preview.title, inner)
        } else {
            "▒".repeat(inner)
        };
        lines.push(format!("│{text}│"));
    }

    if height > 1 {
        lines.push(format!("└{}┘", "─".repeat(inner)));
    }
    lines
}

/// Renders the overlay across the whole pane.
///
/// # Layout
///
/// ```text
///  路痴哥                                                      120%
///
///               ┌──────────────────────────────────┐
///               │▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒│
///               │              路痴哥              │
///               │           🖼 ludi.jpg            │
///               └──────────────────────────────────┘
///
///       拖动移动 • 滚轮缩放 • +/- 缩放 • 0 重置 • ESC 关闭
/// ```
pub fn render_preview(preview: &PreviewInfo, theme: &Theme, rows: usize, cols: usize) {
    let backdrop = format!("{}{}", Theme::bg(&theme.colors.overlay_bg), Theme::fg(&theme.colors.text_normal));
    for row in 1..=rows {
        position_cursor(row, 1);
        print!("{backdrop}{}{}", " ".repeat(cols), Theme::reset());
    }

    let frame_color = if preview.dragging { &theme.colors.accent } else { &theme.colors.image_fg };
    let frame_style = format!("{}{}", Theme::bg(&theme.colors.overlay_bg), Theme::fg(frame_color));
    let rect = preview.rect;
    for (i, line) in frame_lines(preview, rect.width, rect.height).iter().enumerate() {
        let y = rect.y + i as isize;
        if y < 0 || y >= rows as isize {
            continue;
        }
        let skip = usize::try_from(-rect.x).unwrap_or(0);
        let left = usize::try_from(rect.x).unwrap_or(0);
        if left >= cols {
            continue;
        }
        let visible = slice_cells(line, skip, cols - left);
        if visible.is_empty() {
            continue;
        }
        position_cursor(y as usize + 1, left + 1);
        print!("{frame_style}{visible}{}", Theme::reset());
    }

    position_cursor(1, 1);
    print!("{backdrop}{}", Theme::bold());
    let label = preview.scale_label.as_deref().unwrap_or("");
    let title_width = cols.saturating_sub(display_width(label) + 1);
    print!("{}{label} {}", pad_to_width(&format!(" {}", preview.title), title_width), Theme::reset());

    position_cursor(rows, 1);
    print!("{backdrop}{}", Theme::fg(&theme.colors.text_dim));
    print!("{}{}", center(&preview.hint, cols), Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::preview::Rect;
    use crate::ui::helpers::display_width;

    fn preview() -> PreviewInfo {
        PreviewInfo {
            title: "路痴哥".to_string(),
            url: "/images/ludi.jpg".to_string(),
            rect: Rect { x: 20, y: 6, width: 40, height: 12 },
            scale_label: None,
            hint: String::new(),
            dragging: false,
        }
    }

    #[test]
    fn frame_fills_rect() {
        let lines = frame_lines(&preview(), 40, 12);
        assert_eq!(lines.len(), 12);
        assert!(lines.iter().all(|l| display_width(l) == 40));
        assert!(lines.iter().any(|l| l.contains("ludi.jpg")));
        assert!(lines.iter().any(|l| l.contains("路痴哥")));
    }

    #[test]
    fn tiny_frame_keeps_borders() {
        let lines = frame_lines(&preview(), 4, 2);
        assert_eq!(lines, ["┌──┐", "└──┘"]);
    }
}
