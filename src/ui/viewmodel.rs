//! View model types representing renderable UI state.
//!
//! Computed by `AppState::compute_viewmodel()` and consumed by the renderer.
//! They hold display-ready data only: wrapped lines, labels, highlight ranges
//! and absolute geometry. Nothing here reaches back into application state.

use crate::app::images::ImageSlot;
use crate::app::modes::LayoutMode;
use crate::app::preview::Rect;

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub page: Page,
    pub footer: FooterInfo,
    /// Drawn over the page when the image preview is open.
    pub preview: Option<PreviewInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub tagline: String,
    /// Collapsed form once the list is scrolled.
    pub compact: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
    /// Total catalog size, e.g. "共收录 12 个称号".
    pub total: String,
    pub back_to_top: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    /// The catalog has not arrived from the worker yet.
    Loading,
    /// The catalog could not be loaded.
    LoadFailed(EmptyState),
    List(ListPage),
    Detail(DetailPage),
    NotFound(NotFoundPage),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub search_bar: SearchBarInfo,
    pub controls: ControlsInfo,
    /// "找到 N 个称号 …" or "共有 N 个称号".
    pub summary: String,
    pub body: ListBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListBody {
    Empty(EmptyState),
    Cards(CardsView),
}

/// Visible slice of the projected result cards.
#[derive(Debug, Clone, PartialEq)]
pub struct CardsView {
    pub layout: LayoutMode,
    pub columns: usize,
    pub column_width: usize,
    pub scroll_offset: usize,
    pub viewport_rows: usize,
    /// Cards intersecting the viewport, in result order.
    pub cards: Vec<CardItem>,
}

/// One result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    pub title: String,
    /// Wrapped title lines with per-line highlight ranges (character indices).
    pub title_lines: Vec<HighlightedLine>,
    pub date: String,
    pub description_lines: Vec<String>,
    pub image: ImageSlot,
    pub is_selected: bool,
    pub column: usize,
    /// First row of the card within the scrollable body.
    pub top: usize,
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedLine {
    pub text: String,
    pub highlights: Vec<(usize, usize)>,
}

/// Empty-state message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    pub placeholder: String,
    pub focused: bool,
    pub suggestions: Vec<SuggestionItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionItem {
    pub text: String,
    pub highlighted: bool,
}

/// Sort and layout toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsInfo {
    pub sorts: Vec<ToggleItem>,
    pub layouts: Vec<ToggleItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleItem {
    pub key: char,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPage {
    pub title: String,
    pub date: String,
    pub description: String,
    pub image: ImageSlot,
    /// Whether `p` / enter opens the preview.
    pub can_preview: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundPage {
    pub name: String,
    pub message: String,
    /// Existing titles that look like `name`.
    pub similar: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewInfo {
    pub title: String,
    pub url: String,
    pub rect: Rect,
    /// Shown only when the scale differs from 1.
    pub scale_label: Option<String>,
    pub hint: String,
    pub dragging: bool,
}
