//! Shared rendering utilities.
//!
//! Terminal cells are not characters: CJK ideographs, fullwidth punctuation
//! and most emoji occupy two cells, combining marks none. Everything that
//! pads, truncates or wraps text goes through [`display_width`] so Chinese
//! titles line up in cards.
//!
//! # Example
//!
//! ```rust
//! use titlewiki::ui::helpers::{display_width, truncate_to_width, wrap_text};
//!
//! assert_eq!(display_width("路痴哥"), 6);
//! assert_eq!(truncate_to_width("路痴哥总是迷路", 7), "路痴哥…");
//! assert_eq!(wrap_text("总是迷路", 4, 1), ["总…"]);
//! ```

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

const ELLIPSIS: char = '…';

/// Number of terminal cells a character occupies.
#[must_use]
pub fn char_width(c: char) -> usize {
    let cp = c as u32;
    if cp == 0 || c.is_control() {
        return 0;
    }
    let zero_width = matches!(cp,
        0x0300..=0x036F | 0x200B..=0x200F | 0x20D0..=0x20FF | 0xFE00..=0xFE0F | 0xFE20..=0xFE2F
    );
    if zero_width {
        return 0;
    }
    let wide = matches!(cp,
        0x1100..=0x115F
            | 0x2E80..=0x303E
            | 0x3041..=0x33FF
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xA000..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
            | 0x1F300..=0x1F64F
            | 0x1F900..=0x1F9FF
            | 0x20000..=0x3FFFD
    );
    if wide { 2 } else { 1 }
}

#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Cuts `text` to at most `width` cells, ending in `…` when anything was cut.
#[must_use]
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let budget = width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = char_width(c);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    out
}

/// Pads `text` with spaces to exactly `width` cells, truncating if longer.
#[must_use]
pub fn pad_to_width(text: &str, width: usize) -> String {
    let text = truncate_to_width(text, width);
    let padding = width.saturating_sub(display_width(&text));
    format!("{text}{}", " ".repeat(padding))
}

/// Centers `text` within `width` cells.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let text = truncate_to_width(text, width);
    let left = width.saturating_sub(display_width(&text)) / 2;
    pad_to_width(&format!("{}{text}", " ".repeat(left)), width)
}

/// Wraps `text` to lines of at most `width` cells, keeping at most
/// `max_lines`. A clamped paragraph ends its last line with `…`.
///
/// Breaks prefer ASCII spaces; CJK text breaks between any two characters.
/// Embedded newlines start a new line.
#[must_use]
pub fn wrap_text(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;
        for word in split_words(paragraph) {
            if current_width + display_width(word.trim_end()) <= width {
                current.push_str(word);
                current_width += display_width(word);
                continue;
            }
            if !current.is_empty() {
                lines.push(current.trim_end().to_string());
                current = String::new();
                current_width = 0;
            }
            let word = if current.is_empty() { word.trim_start() } else { word };
            for c in word.chars() {
                let w = char_width(c);
                if current_width + w > width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(c);
                current_width += w;
            }
        }
        lines.push(current.trim_end().to_string());
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let mut clipped = truncate_to_width(last, width.saturating_sub(1));
            if clipped.ends_with(ELLIPSIS) {
                clipped.pop();
            }
            clipped.push(ELLIPSIS);
            *last = clipped;
        }
    }
    lines
}

/// The cells `skip..skip + take` of `text`.
///
/// A wide character cut by either edge becomes a space, so the result is
/// always exactly `take` cells when `text` is long enough.
#[must_use]
pub fn slice_cells(text: &str, skip: usize, take: usize) -> String {
    let end = skip + take;
    let mut out = String::new();
    let mut pos = 0;
    for c in text.chars() {
        let w = char_width(c);
        let next = pos + w;
        if next <= skip {
            pos = next;
            continue;
        }
        if pos >= end {
            break;
        }
        if pos < skip || next > end {
            let visible = next.min(end) - pos.max(skip);
            out.push_str(&" ".repeat(visible));
        } else {
            out.push(c);
        }
        pos = next;
    }
    out
}

/// Splits into breakable units: ASCII runs with their trailing space, and
/// single wide characters.
fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        let end = i + c.len_utf8();
        if char_width(c) == 2 {
            if start < i {
                words.push(&text[start..i]);
            }
            words.push(&text[i..end]);
            start = end;
        } else if c == ' ' {
            words.push(&text[start..end]);
            start = end;
        }
    }
    if start < text.len() {
        words.push(&text[start..]);
    }
    words
}

/// Removes ANSI escape sequences, leaving only visible text.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // CSI: ESC [ parameters final-byte
            if chars.next() == Some('[') {
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

/// Character ranges where `needle` occurs in `text`, case-insensitively.
///
/// Ranges are `(start, end)` character indices, end exclusive.
#[must_use]
pub fn match_ranges(text: &str, needle: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = needle.trim().to_lowercase().chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }
    let hay: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();
    if hay.len() != text.chars().count() {
        // Lowercasing changed the length; indices would not line up.
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + needle.len() <= hay.len() {
        if hay[i..i + needle.len()] == needle[..] {
            ranges.push((i, i + needle.len()));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

/// Splits whole-text highlight ranges into per-line ranges for wrapped text.
#[must_use]
pub fn ranges_per_line(lines: &[String], ranges: &[(usize, usize)]) -> Vec<Vec<(usize, usize)>> {
    let mut offset = 0;
    lines
        .iter()
        .map(|line| {
            let len = line.chars().count();
            let local = ranges
                .iter()
                .filter_map(|&(start, end)| {
                    let s = start.max(offset);
                    let e = end.min(offset + len);
                    (s < e).then(|| (s - offset, e - offset))
                })
                .collect();
            offset += len;
            local
        })
        .collect()
}

/// Renders text with highlighted character ranges.
///
/// `base` is the escape sequence restored after each highlight, so the
/// surrounding style (normal or selected) continues.
#[must_use]
pub fn highlight(text: &str, ranges: &[(usize, usize)], theme: &Theme, base: &str) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::new();
    let mut current = 0;
    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current {
            continue;
        }
        out.extend(&chars[current..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(base);
        current = end;
    }
    out.extend(&chars[current..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_count_cjk_as_two() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("司马光Wiki"), 10);
        assert_eq!(display_width("“路痴”"), 6);
        assert_eq!(display_width("📸"), 2);
    }

    #[test]
    fn truncation_respects_cells() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        assert_eq!(truncate_to_width("路痴哥", 4), "路…");
        assert_eq!(pad_to_width("路", 4), "路  ");
    }

    #[test]
    fn wraps_mixed_text() {
        assert_eq!(wrap_text("hello big world", 9, 5), ["hello big", "world"]);
        assert_eq!(wrap_text("总是迷路的人", 4, 5), ["总是", "迷路", "的人"]);
        assert_eq!(wrap_text("总是迷路的人", 4, 2), ["总是", "迷…"]);
        assert_eq!(wrap_text("a\nb", 4, 5), ["a", "b"]);
        assert!(wrap_text("anything", 0, 3).is_empty());
    }

    #[test]
    fn slices_by_cell() {
        assert_eq!(slice_cells("abcdef", 2, 3), "cde");
        assert_eq!(slice_cells("路痴哥", 1, 4), " 痴 ");
        assert_eq!(slice_cells("路痴哥", 2, 10), "痴哥");
        assert_eq!(slice_cells("ab", 5, 3), "");
    }

    #[test]
    fn strips_escape_sequences() {
        let styled = format!("{}路痴{}哥", Theme::fg("#ff0000"), Theme::reset());
        assert_eq!(strip_ansi(&styled), "路痴哥");
    }

    #[test]
    fn finds_case_insensitive_ranges() {
        assert_eq!(match_ranges("Wiki wiki", "WIKI"), [(0, 4), (5, 9)]);
        assert_eq!(match_ranges("路痴哥", "痴"), [(1, 2)]);
        assert!(match_ranges("路痴哥", " ").is_empty());
    }

    #[test]
    fn splits_ranges_across_lines() {
        let lines = vec!["路痴".to_string(), "哥哥".to_string()];
        assert_eq!(ranges_per_line(&lines, &[(1, 3)]), [vec![(1, 2)], vec![(0, 1)]]);
    }
}
