//! Result cards for the masonry, grid and list layouts.
//!
//! Each card is first built as a list of styled lines exactly
//! `column_width` cells wide, then printed at its projected position. Lines
//! that fall outside the scrolled viewport are skipped, so a card cut by the
//! top or bottom edge of the body shows only its visible part.

use crate::app::images::ImageSlot;
use crate::app::modes::LayoutMode;
use crate::ui::helpers::{display_width, highlight, pad_to_width, position_cursor, truncate_to_width};
use crate::ui::layout::{card_inner_width, column_x, IMAGE_ROWS};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardItem, CardsView, HighlightedLine};

/// Description rows reserved in a grid card, filled or not.
const GRID_DESCRIPTION_ROWS: usize = 3;

/// Description rows under a list item's title.
const LIST_DESCRIPTION_ROWS: usize = 2;

/// Prints every visible card line. `top_row` is the screen row of body row 0.
pub fn render_cards(top_row: usize, view: &CardsView, theme: &Theme) {
    let first = view.scroll_offset;
    let last = view.scroll_offset + view.viewport_rows;

    for card in &view.cards {
        let x = column_x(card.column, view.column_width) + 1;
        for (i, line) in card_lines(card, view.layout, view.column_width, theme).iter().enumerate() {
            let body_row = card.top + i;
            if body_row < first || body_row >= last {
                continue;
            }
            position_cursor(top_row + body_row - first, x);
            print!("{line}{}", Theme::reset());
        }
    }
}

/// Styled lines for one card, each `width` cells wide.
#[must_use]
pub fn card_lines(card: &CardItem, layout: LayoutMode, width: usize, theme: &Theme) -> Vec<String> {
    match layout {
        LayoutMode::Masonry | LayoutMode::Grid => boxed_card(card, layout, width, theme),
        LayoutMode::List => list_item(card, width, theme),
    }
}

fn title_style(card: &CardItem, theme: &Theme) -> String {
    let color = if card.is_selected { &theme.colors.accent } else { &theme.colors.text_normal };
    format!("{}{}", Theme::fg(color), Theme::bold())
}

fn styled_title(line: &HighlightedLine, width: usize, base: &str, theme: &Theme) -> String {
    let padded = pad_to_width(&line.text, width);
    format!("{base}{}{}", highlight(&padded, &line.highlights, theme, base), Theme::reset())
}

fn boxed_card(card: &CardItem, layout: LayoutMode, width: usize, theme: &Theme) -> Vec<String> {
    let inner = card_inner_width(width);
    let border_color = if card.is_selected { &theme.colors.accent } else { &theme.colors.card_border };
    let border = Theme::fg(border_color);
    let reset = Theme::reset();
    let edge = "─".repeat(width.saturating_sub(2));
    let framed = |content: String| format!("{border}│ {content}{reset}{border} │{reset}");

    let mut lines = vec![format!("{border}╭{edge}╮{reset}")];

    let show_image = layout == LayoutMode::Grid || card.image != ImageSlot::None;
    if show_image {
        lines.extend(image_block(&card.image, inner, theme).into_iter().map(&framed));
    }

    lines.push(framed(format!("{}{}", Theme::fg(&theme.colors.date_fg), pad_to_width(&card.date, inner))));

    let base = title_style(card, theme);
    if card.title_lines.is_empty() {
        lines.push(framed(" ".repeat(inner)));
    }
    for line in &card.title_lines {
        lines.push(framed(styled_title(line, inner, &base, theme)));
    }

    let dim = Theme::fg(&theme.colors.text_dim);
    for line in &card.description_lines {
        lines.push(framed(format!("{dim}{}", pad_to_width(line, inner))));
    }
    if layout == LayoutMode::Grid {
        for _ in card.description_lines.len()..GRID_DESCRIPTION_ROWS {
            lines.push(framed(" ".repeat(inner)));
        }
    }

    lines.push(format!("{border}╰{edge}╯{reset}"));
    lines
}

/// The image area: a label on the middle row, shaded when the image loaded.
fn image_block(slot: &ImageSlot, width: usize, theme: &Theme) -> Vec<String> {
    let (color, label, fill) = match slot {
        ImageSlot::Ready(url) => (&theme.colors.image_fg, format!("🖼 {}", file_name(url)), '░'),
        ImageSlot::Pending(_) => (&theme.colors.placeholder_fg, "加载中…".to_string(), ' '),
        ImageSlot::Placeholder | ImageSlot::None => (&theme.colors.placeholder_fg, "📸".to_string(), ' '),
    };
    let fg = Theme::fg(color);
    let filler = fill.to_string().repeat(width);

    (0..IMAGE_ROWS)
        .map(|row| {
            if row == IMAGE_ROWS / 2 {
                format!("{fg}{}", centered_over(&label, width, fill))
            } else {
                format!("{fg}{filler}")
            }
        })
        .collect()
}

/// Centers `label` within `width` cells, padding with `fill`.
fn centered_over(label: &str, width: usize, fill: char) -> String {
    let label = truncate_to_width(label, width);
    let room = width.saturating_sub(display_width(&label));
    let left = room / 2;
    let fill = fill.to_string();
    format!("{}{label}{}", fill.repeat(left), fill.repeat(room - left))
}

/// Last path segment of an image URL, for labels.
#[must_use]
pub fn file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').find(|segment| !segment.is_empty()).unwrap_or(url)
}

fn list_item(card: &CardItem, width: usize, theme: &Theme) -> Vec<String> {
    let marker = if card.is_selected {
        format!("{}▌ ", Theme::fg(&theme.colors.accent))
    } else {
        "  ".to_string()
    };
    let date = truncate_to_width(&card.date, width / 3);
    let title_width = width.saturating_sub(2 + display_width(&date) + 1);

    let base = title_style(card, theme);
    let title = card.title_lines.first().map_or_else(
        || " ".repeat(title_width),
        |line| styled_title(line, title_width, &base, theme),
    );

    let mut lines = vec![format!(
        "{marker}{title} {}{date}{}",
        Theme::fg(&theme.colors.date_fg),
        Theme::reset()
    )];

    let dim = Theme::fg(&theme.colors.text_dim);
    let text_width = width.saturating_sub(2);
    for i in 0..LIST_DESCRIPTION_ROWS {
        let text = card.description_lines.get(i).map_or("", String::as_str);
        lines.push(format!("  {dim}{}{}", pad_to_width(text, text_width), Theme::reset()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    fn card(image: ImageSlot, description: &[&str], selected: bool) -> CardItem {
        CardItem {
            title: "路痴哥".to_string(),
            title_lines: vec![HighlightedLine { text: "路痴哥".to_string(), highlights: vec![(1, 2)] }],
            date: "2024年1月1日".to_string(),
            description_lines: description.iter().map(ToString::to_string).collect(),
            image,
            is_selected: selected,
            column: 0,
            top: 0,
            height: 0,
        }
    }

    fn visible(lines: &[String]) -> Vec<String> {
        lines.iter().map(|l| strip_ansi(l)).collect()
    }

    fn assert_widths(lines: &[String], width: usize) {
        for line in visible(lines) {
            assert_eq!(display_width(&line), width, "line {line:?}");
        }
    }

    #[test]
    fn masonry_card_without_image_skips_image_rows() {
        let lines = card_lines(&card(ImageSlot::None, &["总是迷路"], false), LayoutMode::Masonry, 30, &Theme::default());
        assert_eq!(lines.len(), 2 + 1 + 1 + 1);
        assert_widths(&lines, 30);
        assert!(visible(&lines)[2].contains("路痴哥"));
    }

    #[test]
    fn grid_card_has_fixed_height_and_placeholder() {
        let lines = card_lines(&card(ImageSlot::None, &["总是迷路"], false), LayoutMode::Grid, 30, &Theme::default());
        assert_eq!(lines.len(), 2 + IMAGE_ROWS + 1 + 1 + GRID_DESCRIPTION_ROWS);
        assert_widths(&lines, 30);
        assert!(visible(&lines)[2].contains("📸"));
    }

    #[test]
    fn loaded_image_shows_file_name() {
        let slot = ImageSlot::Ready("/images/ludi.jpg".to_string());
        let lines = card_lines(&card(slot, &[], false), LayoutMode::Masonry, 30, &Theme::default());
        assert_eq!(lines.len(), 2 + IMAGE_ROWS + 1 + 1);
        assert!(visible(&lines)[2].contains("ludi.jpg"));
        assert_widths(&lines, 30);
    }

    #[test]
    fn list_item_marks_selection() {
        let lines = card_lines(&card(ImageSlot::None, &["总是迷路"], true), LayoutMode::List, 40, &Theme::default());
        let text = visible(&lines);
        assert_eq!(text.len(), 1 + LIST_DESCRIPTION_ROWS);
        assert!(text[0].starts_with("▌ 路痴哥"));
        assert!(text[0].ends_with("2024年1月1日"));
        assert_widths(&lines, 40);
    }

    #[test]
    fn file_names_ignore_query_and_trailing_slash() {
        assert_eq!(file_name("https://img.example.com/a/b.png?w=200"), "b.png");
        assert_eq!(file_name("/images/dir/"), "dir");
        assert_eq!(file_name("plain.jpg"), "plain.jpg");
    }
}
