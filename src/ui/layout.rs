//! Card geometry for the three result layouts.
//!
//! Geometry is computed in rows and cells relative to the top of the
//! scrollable body, independent of image load state, so a card never changes
//! height when its image resolves or fails.
//!
//! | width (cells) | columns |
//! |---------------|---------|
//! | < 60          | 1       |
//! | < 100         | 2       |
//! | < 140         | 3       |
//! | otherwise     | 4       |

use crate::app::modes::LayoutMode;
use crate::domain::TitleEntry;
use crate::ui::helpers::wrap_text;

/// Blank cells between columns.
pub const COLUMN_GAP: usize = 2;

/// Blank cells on each side of the body.
pub const MARGIN: usize = 1;

/// Rows reserved for the image area in masonry and grid cards.
pub const IMAGE_ROWS: usize = 3;

/// Lines a title may wrap to in masonry cards.
pub const TITLE_LINES: usize = 2;

/// Chrome above the body with the full header: title, tagline, three-row
/// search box, controls, summary and a separator.
pub const FULL_HEADER_ROWS: usize = 8;

/// Chrome above the body with the compact header: title, one-row search,
/// controls, summary and a separator.
pub const COMPACT_HEADER_ROWS: usize = 5;

/// Separator plus key hints.
pub const FOOTER_ROWS: usize = 2;

/// Grid cards: borders, image, date, title, clamped description.
const GRID_CARD_ROWS: usize = 2 + IMAGE_ROWS + 1 + 1 + 3;

/// List items: title and date, clamped description.
const LIST_ITEM_ROWS: usize = 1 + 2;

#[must_use]
pub const fn column_count(cols: usize) -> usize {
    if cols < 60 {
        1
    } else if cols < 100 {
        2
    } else if cols < 140 {
        3
    } else {
        4
    }
}

#[must_use]
pub const fn column_width(cols: usize, columns: usize) -> usize {
    let usable = cols.saturating_sub(2 * MARGIN + COLUMN_GAP * (columns - 1));
    let width = usable / columns;
    if width < 8 { 8 } else { width }
}

/// Left edge (0-based cell) of column `column`.
#[must_use]
pub const fn column_x(column: usize, width: usize) -> usize {
    MARGIN + column * (width + COLUMN_GAP)
}

/// Width available for text inside a bordered card.
#[must_use]
pub const fn card_inner_width(width: usize) -> usize {
    width.saturating_sub(4)
}

/// Rows available for the scrollable body.
#[must_use]
pub const fn body_rows(rows: usize, compact_header: bool) -> usize {
    let chrome = if compact_header { COMPACT_HEADER_ROWS } else { FULL_HEADER_ROWS };
    rows.saturating_sub(chrome + FOOTER_ROWS)
}

/// Position of one result card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardGeometry {
    /// Index into the query result.
    pub index: usize,
    pub column: usize,
    pub top: usize,
    pub height: usize,
}

/// Placement of every result for one layout and width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub layout: LayoutMode,
    pub columns: usize,
    pub column_width: usize,
    pub cards: Vec<CardGeometry>,
    pub total_height: usize,
}

impl Projection {
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&CardGeometry> {
        self.cards.get(index)
    }

    /// Largest useful scroll offset for a body of `viewport` rows.
    #[must_use]
    pub const fn max_offset(&self, viewport: usize) -> usize {
        self.total_height.saturating_sub(viewport)
    }
}

/// Height of a masonry card for `entry` at column width `width`.
#[must_use]
pub fn masonry_card_height(entry: &TitleEntry, width: usize) -> usize {
    let inner = card_inner_width(width);
    let image = if entry.record.image.is_some() { IMAGE_ROWS } else { 0 };
    let title = wrap_text(&entry.title, inner, TITLE_LINES).len().max(1);
    let description = description_lines(entry, inner, LayoutMode::Masonry).len();
    2 + image + 1 + title + description
}

/// Clamped, wrapped description lines for a card in `layout`.
#[must_use]
pub fn description_lines(entry: &TitleEntry, width: usize, layout: LayoutMode) -> Vec<String> {
    if entry.record.description.trim().is_empty() {
        return Vec::new();
    }
    wrap_text(&entry.record.description, width, layout.description_lines())
}

/// Places `entries` according to `layout` in a body `cols` cells wide.
#[must_use]
pub fn project(entries: &[TitleEntry], layout: LayoutMode, cols: usize) -> Projection {
    let columns = match layout {
        LayoutMode::List => 1,
        LayoutMode::Masonry | LayoutMode::Grid => column_count(cols),
    };
    let width = column_width(cols, columns);

    let (cards, total_height) = match layout {
        LayoutMode::Masonry => place_masonry(entries, columns, width),
        LayoutMode::Grid => place_fixed(entries.len(), columns, GRID_CARD_ROWS),
        LayoutMode::List => place_fixed(entries.len(), 1, LIST_ITEM_ROWS),
    };

    Projection { layout, columns, column_width: width, cards, total_height }
}

/// Each card goes to the currently shortest column, leftmost on ties.
fn place_masonry(entries: &[TitleEntry], columns: usize, width: usize) -> (Vec<CardGeometry>, usize) {
    let mut heights = vec![0_usize; columns];
    let mut cards = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let column = heights
            .iter()
            .enumerate()
            .min_by_key(|&(i, h)| (*h, i))
            .map_or(0, |(i, _)| i);
        let height = masonry_card_height(entry, width);
        cards.push(CardGeometry { index, column, top: heights[column], height });
        heights[column] += height + 1;
    }

    let total = heights.into_iter().max().unwrap_or(0).saturating_sub(1);
    (cards, total)
}

fn place_fixed(count: usize, columns: usize, height: usize) -> (Vec<CardGeometry>, usize) {
    let cards: Vec<CardGeometry> = (0..count)
        .map(|index| CardGeometry {
            index,
            column: index % columns,
            top: (index / columns) * (height + 1),
            height,
        })
        .collect();
    let rows = count.div_ceil(columns);
    let total = (rows * (height + 1)).saturating_sub(1);
    (cards, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TitleRecord;

    fn entry(title: &str, description: &str, image: bool) -> TitleEntry {
        let record = TitleRecord::new("2024-01-01", description);
        TitleEntry::new(title, if image { record.with_image("/a.png") } else { record })
    }

    #[test]
    fn column_breakpoints() {
        assert_eq!(column_count(59), 1);
        assert_eq!(column_count(60), 2);
        assert_eq!(column_count(99), 2);
        assert_eq!(column_count(100), 3);
        assert_eq!(column_count(139), 3);
        assert_eq!(column_count(140), 4);
    }

    #[test]
    fn masonry_fills_shortest_column() {
        let entries = vec![
            entry("高", "一二三四五六七八九十一二三四五六七八九十一二三四五六七八九十", true),
            entry("矮", "短", false),
            entry("三", "短", false),
        ];
        let projection = project(&entries, LayoutMode::Masonry, 80);
        assert_eq!(projection.columns, 2);
        assert_eq!(projection.cards[0].column, 0);
        assert_eq!(projection.cards[1].column, 1);
        assert!(projection.cards[0].height > projection.cards[1].height);
        assert_eq!(projection.cards[2].column, 1);
        assert_eq!(projection.cards[2].top, projection.cards[1].height + 1);
    }

    #[test]
    fn grid_rows_are_uniform() {
        let entries: Vec<_> = (0..5).map(|i| entry(&format!("t{i}"), "d", i % 2 == 0)).collect();
        let projection = project(&entries, LayoutMode::Grid, 120);
        assert_eq!(projection.columns, 3);
        assert!(projection.cards.iter().all(|c| c.height == GRID_CARD_ROWS));
        assert_eq!(projection.cards[3].column, 0);
        assert_eq!(projection.cards[3].top, GRID_CARD_ROWS + 1);
        assert_eq!(projection.total_height, 2 * (GRID_CARD_ROWS + 1) - 1);
    }

    #[test]
    fn list_is_single_column() {
        let entries: Vec<_> = (0..3).map(|i| entry(&format!("t{i}"), "d", false)).collect();
        let projection = project(&entries, LayoutMode::List, 200);
        assert_eq!(projection.columns, 1);
        assert!(projection.cards.iter().all(|c| c.column == 0));
        assert_eq!(projection.cards[2].top, 2 * (LIST_ITEM_ROWS + 1));
    }

    #[test]
    fn empty_result_has_no_height() {
        let projection = project(&[], LayoutMode::Masonry, 80);
        assert!(projection.cards.is_empty());
        assert_eq!(projection.total_height, 0);
        assert_eq!(projection.max_offset(10), 0);
    }

    #[test]
    fn body_shrinks_with_full_header() {
        assert_eq!(body_rows(40, false), 40 - FULL_HEADER_ROWS - FOOTER_ROWS);
        assert_eq!(body_rows(40, true), 40 - COMPACT_HEADER_ROWS - FOOTER_ROWS);
        assert_eq!(body_rows(3, false), 0);
    }
}
