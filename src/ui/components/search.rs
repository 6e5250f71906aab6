//! Search bar component renderer.
//!
//! Renders the search input as a bordered box under the full header, or as a
//! single prompt row when the header is compact. The suggestion dropdown is
//! drawn separately, after the body, so it overlays the first cards.

use crate::ui::helpers::{display_width, pad_to_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

const PROMPT: &str = " 🔍 ";
const CURSOR: &str = "▏";

/// Query text (or placeholder) styled for the input line, padded to `width`.
fn input_text(search: &SearchBarInfo, theme: &Theme, width: usize) -> String {
    let prompt_width = display_width(PROMPT);
    let text_width = width.saturating_sub(prompt_width);
    if search.query.is_empty() && !search.focused {
        return format!(
            "{PROMPT}{}{}",
            Theme::fg(&theme.colors.placeholder_fg),
            pad_to_width(&search.placeholder, text_width)
        );
    }

    let cursor = if search.focused { CURSOR } else { "" };
    let text = if search.query.is_empty() {
        format!("{cursor}{}", search.placeholder)
    } else {
        format!("{}{cursor}", search.query)
    };
    let color = if search.query.is_empty() { &theme.colors.placeholder_fg } else { &theme.colors.text_normal };
    format!("{PROMPT}{}{}", Theme::fg(color), pad_to_width(&text, text_width))
}

fn border_color<'a>(search: &SearchBarInfo, theme: &'a Theme) -> &'a str {
    if search.focused { &theme.colors.accent } else { &theme.colors.search_bar_border }
}

/// Renders the boxed search input at `row`.
///
/// # Returns
///
/// The next available row position (row + 3, since the box uses 3 lines)
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────┐ [margin]
/// [margin] │ 🔍 搜索称号或描述... │ [margin]
/// [margin] └──────────────────────┘ [margin]
/// ```
///
/// The border switches to the accent color while the query is being edited.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(border_color(search, theme));

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}│{}", input_text(search, theme, inner_width));
    print!("{border}│{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}└{}┘{}", "─".repeat(inner_width), Theme::reset());

    row + 3
}

/// Renders the one-row search prompt used with the compact header.
pub fn render_search_line(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", input_text(search, theme, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Draws the suggestion dropdown starting at `row`, never past `last_row`.
///
/// Does nothing when there are no suggestions. The highlighted entry (cycled
/// with tab) is shown in the selection colors.
pub fn render_suggestions(row: usize, last_row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) {
    if search.suggestions.is_empty() {
        return;
    }

    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(&theme.colors.search_bar_border);

    let mut current = row;
    for item in &search.suggestions {
        if current >= last_row {
            break;
        }
        position_cursor(current, SEARCH_BOX_MARGIN + 1);
        print!("{border}│");
        if item.highlighted {
            print!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{}", pad_to_width(&format!(" {}", item.text), inner_width));
        print!("{}{border}│{}", Theme::reset(), Theme::reset());
        current += 1;
    }

    if current <= last_row {
        position_cursor(current, SEARCH_BOX_MARGIN + 1);
        print!("{border}└{}┘{}", "─".repeat(inner_width), Theme::reset());
    }
}
