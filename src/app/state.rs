//! Application state management and view model computation.
//!
//! [`AppState`] is the single, serializable source of truth for everything on
//! screen: the loaded catalog, the current query and its result, selection,
//! layout, routing, image load state, suggestions, scroll and preview.
//!
//! # Architecture
//!
//! Core data (the catalog) is kept apart from derived data (the query
//! result, recomputed by [`AppState::apply_query`]). View models are computed
//! on demand from a state snapshot and never stored.
//!
//! # Example
//!
//! ```rust
//! use titlewiki::app::AppState;
//! use titlewiki::domain::{Catalog, TitleEntry, TitleRecord};
//! use titlewiki::ui::Theme;
//!
//! let catalog = Catalog::from_entries(vec![
//!     TitleEntry::new("路痴哥", TitleRecord::new("2024-01-01", "总是迷路")),
//!     TitleEntry::new("报备哥", TitleRecord::new("2024-03-01", "出门必报备")),
//! ])?;
//!
//! let mut state = AppState::new(Theme::default());
//! state.load_catalog(catalog);
//! state.search_query = "路痴".to_string();
//! state.apply_query();
//! assert_eq!(state.results.len(), 1);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! # let _ = viewmodel;
//! # Ok::<(), titlewiki::TitleWikiError>(())
//! ```

use super::images::{ImageRequests, ImageSlot, ImageTracker};
use super::modes::{InputMode, LayoutMode, SearchFocus};
use super::navigator::Navigator;
use super::preview::ImagePreview;
use super::scroll::ScrollState;
use super::suggest::Suggestions;
use crate::domain::{Catalog, TitleEntry};
use crate::infrastructure::{detail_path, Route};
use crate::query::{self, next_seed, QueryResult, SortMode};
use crate::ui::helpers::{match_ranges, ranges_per_line, wrap_text};
use crate::ui::layout::{self, card_inner_width, Projection};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardItem, CardsView, ControlsInfo, DetailPage, EmptyState, FooterInfo, HeaderInfo,
    HighlightedLine, ListBody, ListPage, NotFoundPage, Page, PreviewInfo, SearchBarInfo,
    SuggestionItem, ToggleItem, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Serialize;

pub const SITE_TITLE: &str = "司马光Wiki";
pub const TAGLINE: &str = "探索传奇人物的精彩称号宇宙 • 每个名字背后都有一个故事";

/// Similar titles offered on the not-found page.
const SIMILAR_LIMIT: usize = 3;

/// Pane size in cells, as last reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { rows: 24, cols: 80 }
    }
}

/// Where the worker finds the catalog and its local images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogLocation {
    pub catalog_path: String,
    pub assets_dir: String,
}

/// Central application state container.
///
/// Mutated by the event handler in response to input and worker responses.
#[derive(Debug, Clone, Serialize)]
pub struct AppState {
    /// Loaded catalog; `None` while the worker is still reading it.
    pub catalog: Option<Catalog>,

    /// Why the catalog could not be loaded, if it could not.
    pub load_error: Option<String>,

    /// Search and sort applied to the catalog. Recomputed by `apply_query()`.
    pub results: QueryResult,

    /// Zero-based index into `results`, clamped by `apply_query()`.
    pub selected_index: usize,

    pub input_mode: InputMode,
    pub search_query: String,
    pub sort_mode: SortMode,

    /// Seed for the random sort. Set from the catalog fingerprint on load and
    /// advanced only by an explicit reshuffle.
    pub shuffle_seed: u64,

    pub layout_mode: LayoutMode,
    pub images: ImageTracker,
    pub suggestions: Suggestions,
    pub scroll: ScrollState,
    pub navigator: Navigator,
    pub preview: ImagePreview,
    pub viewport: Viewport,
    pub location: CatalogLocation,
    pub theme: Theme,
}

impl AppState {
    /// Creates an empty state on the list route with default modes
    /// (masonry layout, date sort).
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            catalog: None,
            load_error: None,
            results: Vec::new(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            sort_mode: SortMode::default(),
            shuffle_seed: 0,
            layout_mode: LayoutMode::default(),
            images: ImageTracker::default(),
            suggestions: Suggestions::default(),
            scroll: ScrollState::default(),
            navigator: Navigator::default(),
            preview: ImagePreview::Closed,
            viewport: Viewport::default(),
            location: CatalogLocation::default(),
            theme,
        }
    }

    /// Installs a freshly loaded catalog and recomputes the result.
    pub fn load_catalog(&mut self, catalog: Catalog) {
        let _span = tracing::debug_span!("load_catalog", title_count = catalog.len()).entered();
        self.shuffle_seed = catalog.fingerprint();
        self.catalog = Some(catalog);
        self.load_error = None;
        self.apply_query();
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.catalog.is_none() && self.load_error.is_none()
    }

    /// Recomputes `results` from the catalog, query, sort mode and seed.
    ///
    /// Clamps the selection and scroll offset to the new result.
    pub fn apply_query(&mut self) {
        let _span = tracing::debug_span!(
            "apply_query",
            query_len = self.search_query.len(),
            sort = %self.sort_mode
        )
        .entered();

        self.results = match &self.catalog {
            Some(catalog) => query::run(catalog, &self.search_query, self.sort_mode, self.shuffle_seed),
            None => Vec::new(),
        };

        if self.selected_index >= self.results.len() {
            self.selected_index = self.results.len().saturating_sub(1);
        }
        let max = self.max_scroll();
        if self.scroll.offset() > max {
            self.scroll.scroll_by(0, max);
        }

        tracing::debug!(result_count = self.results.len(), "query applied");
    }

    #[must_use]
    pub fn selected_entry(&self) -> Option<&TitleEntry> {
        self.results.get(self.selected_index)
    }

    /// Moves the selection down one result, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.results.len();
        self.ensure_selection_visible();
    }

    /// Moves the selection up one result, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected_index = self
            .selected_index
            .checked_sub(1)
            .unwrap_or(self.results.len() - 1);
        self.ensure_selection_visible();
    }

    /// Switches sort mode. Choosing random while already random reshuffles.
    pub fn set_sort(&mut self, mode: SortMode) {
        if mode == SortMode::Random && self.sort_mode == SortMode::Random {
            self.shuffle_seed = next_seed(self.shuffle_seed);
            tracing::debug!(seed = self.shuffle_seed, "reshuffled");
        }
        self.sort_mode = mode;
        self.apply_query();
        self.back_to_top();
    }

    pub fn set_layout(&mut self, mode: LayoutMode) {
        self.layout_mode = mode;
        self.apply_query();
        self.ensure_selection_visible();
    }

    /// Replaces the query, recomputes the result and returns to the top.
    pub fn set_query(&mut self, query: String) {
        self.search_query = query;
        self.apply_query();
        self.back_to_top();
    }

    /// Clears the query, suggestions and search mode.
    pub fn clear_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.suggestions.clear();
        self.set_query(String::new());
    }

    /// Accepts the highlighted (or first) suggestion as the new query.
    ///
    /// Returns `false` when no suggestion was visible.
    pub fn accept_suggestion(&mut self) -> bool {
        let Some(title) = self.suggestions.accept() else {
            return false;
        };
        self.set_query(title);
        self.input_mode = InputMode::Search(SearchFocus::Navigating);
        true
    }

    /// Resets the scroll offset and the selection.
    pub fn back_to_top(&mut self) {
        self.scroll.reset();
        self.selected_index = 0;
    }

    /// Geometry of the current result in the current layout and width.
    #[must_use]
    pub fn projection(&self) -> Projection {
        layout::project(&self.results, self.layout_mode, self.viewport.cols)
    }

    #[must_use]
    pub fn body_rows(&self) -> usize {
        layout::body_rows(self.viewport.rows, self.scroll.header_compact())
    }

    fn max_scroll(&self) -> usize {
        self.projection().max_offset(self.body_rows())
    }

    /// Scrolls the list body by `delta` rows.
    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.max_scroll();
        self.scroll.scroll_by(delta, max);
    }

    /// Adjusts the scroll offset so the selected card is on screen.
    pub fn ensure_selection_visible(&mut self) {
        let projection = self.projection();
        let Some(card) = projection.card(self.selected_index) else {
            return;
        };
        let (top, height) = (card.top, card.height);
        self.scroll.ensure_visible(top, height, self.body_rows());
        // Collapsing the header grows the body; re-check with the new size.
        self.scroll.ensure_visible(top, height, self.body_rows());
    }

    /// The title shown by the current detail route, if the route is a detail
    /// route and the title exists.
    #[must_use]
    pub fn detail_entry(&self) -> Option<&TitleEntry> {
        match self.navigator.current() {
            Route::Detail(title) => self.catalog.as_ref()?.get(title),
            Route::List | Route::Unknown(_) => None,
        }
    }

    /// Navigates to `route`, leaving search mode and closing the preview.
    pub fn navigate(&mut self, route: Route) -> bool {
        self.leave_page();
        self.navigator.navigate(route)
    }

    pub fn navigate_back(&mut self) -> bool {
        self.leave_page();
        self.navigator.back()
    }

    pub fn navigate_home(&mut self) -> bool {
        self.leave_page();
        self.navigator.home()
    }

    fn leave_page(&mut self) {
        self.preview.close();
        self.suggestions.clear();
        if matches!(self.input_mode, InputMode::Search(_)) {
            self.input_mode = InputMode::Normal;
        }
    }

    /// Opens the detail page of the selected result.
    ///
    /// The route goes through its encoded path form so a title behaves the
    /// same whether it was clicked or typed as a path.
    pub fn open_selected(&mut self) -> bool {
        let Some(entry) = self.selected_entry() else {
            return false;
        };
        let route = Route::parse(&detail_path(&entry.title));
        self.navigate(route)
    }

    /// Opens the preview for the current detail page.
    ///
    /// Requires a found title with an image that has not failed to load.
    pub fn open_preview(&mut self) -> bool {
        let Some(entry) = self.detail_entry() else {
            return false;
        };
        let Some(url) = entry.record.image.as_deref() else {
            return false;
        };
        if self.images.slot(Some(url)) == ImageSlot::Placeholder {
            tracing::debug!(url = %url, "not previewing failed image");
            return false;
        }
        self.preview = ImagePreview::open(url, entry.title.clone());
        true
    }

    /// Marks every image visible in the current result or detail page as
    /// pending and returns the ones not requested before.
    pub fn image_requests(&mut self) -> ImageRequests {
        let mut urls: Vec<String> = self
            .results
            .iter()
            .filter_map(|entry| entry.record.image.clone())
            .collect();
        if let Some(url) = self.detail_entry().and_then(|e| e.record.image.clone()) {
            urls.push(url);
        }
        self.images.request(urls.iter().map(String::as_str))
    }

    /// Computes the renderable view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::debug_span!("compute_viewmodel", rows, cols).entered();

        let on_list = matches!(self.navigator.current(), Route::List);
        let header = HeaderInfo {
            title: SITE_TITLE.to_string(),
            tagline: TAGLINE.to_string(),
            compact: on_list && self.scroll.header_compact(),
        };

        let page = if self.is_loading() {
            Page::Loading
        } else if let Some(message) = &self.load_error {
            Page::LoadFailed(EmptyState {
                message: "称号库加载失败".to_string(),
                subtitle: message.clone(),
            })
        } else {
            match self.navigator.current() {
                Route::List => Page::List(self.list_page(rows, cols)),
                Route::Detail(title) => match self.detail_entry() {
                    Some(entry) => Page::Detail(self.detail_page(entry)),
                    None => Page::NotFound(self.not_found_page(title)),
                },
                Route::Unknown(path) => Page::NotFound(self.not_found_page(path)),
            }
        };

        let total = self.catalog.as_ref().map_or(0, Catalog::len);
        let footer = FooterInfo {
            keybindings: self.keybinding_hint().to_string(),
            total: format!("共收录 {total} 个称号"),
            back_to_top: on_list && self.scroll.show_back_to_top(),
        };

        let preview = match &self.preview {
            ImagePreview::Open { url, title, .. } => self.preview.image_rect(rows, cols).map(|rect| PreviewInfo {
                title: title.clone(),
                url: url.clone(),
                rect,
                scale_label: self.preview.scale_percent().map(|p| format!("{p}%")),
                hint: "拖动移动 • 滚轮缩放 • +/- 缩放 • 0 重置 • ESC 关闭".to_string(),
                dragging: self.preview.is_dragging(),
            }),
            ImagePreview::Closed => None,
        };

        UIViewModel { header, page, footer, preview }
    }

    fn keybinding_hint(&self) -> &'static str {
        if self.preview.is_open() {
            return "+/-: 缩放 | 方向键: 移动 | 0: 重置 | esc: 关闭";
        }
        match (self.navigator.current(), self.input_mode) {
            (Route::List, InputMode::Search(SearchFocus::Typing)) => {
                "tab: 切换建议 | enter: 确认 | esc: 退出搜索"
            }
            (Route::List, InputMode::Search(SearchFocus::Navigating)) => {
                "j/k: 移动 | enter: 查看 | /: 编辑搜索 | esc: 退出搜索"
            }
            (Route::List, InputMode::Normal) => {
                "j/k: 移动 | enter: 查看 | /: 搜索 | d/n/r: 排序 | 1/2/3: 布局 | q: 关闭"
            }
            (Route::Detail(_), _) if self.detail_entry().is_some() => {
                "p: 预览图片 | b: 返回上页 | h: 返回首页 | q: 关闭"
            }
            _ => "b: 返回上页 | h: 返回首页 | q: 关闭",
        }
    }

    fn list_page(&self, rows: usize, cols: usize) -> ListPage {
        let search_bar = SearchBarInfo {
            query: self.search_query.clone(),
            placeholder: "搜索称号或描述...".to_string(),
            focused: self.input_mode.is_typing(),
            suggestions: self
                .suggestions
                .items()
                .iter()
                .enumerate()
                .map(|(i, text)| SuggestionItem {
                    text: text.clone(),
                    highlighted: self.suggestions.highlighted() == Some(i),
                })
                .collect(),
        };

        let controls = ControlsInfo {
            sorts: SortMode::ALL
                .iter()
                .zip(['d', 'n', 'r'])
                .map(|(mode, key)| ToggleItem {
                    key,
                    label: mode.label().to_string(),
                    active: *mode == self.sort_mode,
                })
                .collect(),
            layouts: LayoutMode::ALL
                .iter()
                .zip(['1', '2', '3'])
                .map(|(mode, key)| ToggleItem {
                    key,
                    label: mode.label().to_string(),
                    active: *mode == self.layout_mode,
                })
                .collect(),
        };

        let summary = if self.search_query.is_empty() {
            format!("共有 {} 个称号", self.results.len())
        } else {
            format!("找到 {} 个称号 关键词: “{}”", self.results.len(), self.search_query)
        };

        let body = if self.results.is_empty() {
            ListBody::Empty(EmptyState {
                message: "没有找到相关称号".to_string(),
                subtitle: "试试其他关键词吧 (esc 查看全部称号)".to_string(),
            })
        } else {
            ListBody::Cards(self.cards_view(rows, cols))
        };

        ListPage { search_bar, controls, summary, body }
    }

    fn cards_view(&self, rows: usize, cols: usize) -> CardsView {
        let projection = layout::project(&self.results, self.layout_mode, cols);
        let viewport_rows = layout::body_rows(rows, self.scroll.header_compact());
        let offset = self.scroll.offset();

        let text_width = match self.layout_mode {
            LayoutMode::List => projection.column_width.saturating_sub(2),
            LayoutMode::Masonry | LayoutMode::Grid => card_inner_width(projection.column_width),
        };
        let title_lines = match self.layout_mode {
            LayoutMode::Masonry => layout::TITLE_LINES,
            LayoutMode::Grid | LayoutMode::List => 1,
        };

        let cards = projection
            .cards
            .iter()
            .filter(|g| g.top + g.height > offset && g.top < offset + viewport_rows)
            .filter_map(|g| {
                let entry = self.results.get(g.index)?;
                let wrapped = wrap_text(&entry.title, text_width, title_lines);
                let ranges = match_ranges(&entry.title, &self.search_query);
                let title_lines = wrapped
                    .iter()
                    .zip(ranges_per_line(&wrapped, &ranges))
                    .map(|(text, highlights)| HighlightedLine { text: text.clone(), highlights })
                    .collect();
                Some(CardItem {
                    title: entry.title.clone(),
                    title_lines,
                    date: entry.record.display_date(),
                    description_lines: layout::description_lines(entry, text_width, self.layout_mode),
                    image: self.images.slot(entry.record.image.as_deref()),
                    is_selected: g.index == self.selected_index,
                    column: g.column,
                    top: g.top,
                    height: g.height,
                })
            })
            .collect();

        CardsView {
            layout: self.layout_mode,
            columns: projection.columns,
            column_width: projection.column_width,
            scroll_offset: offset,
            viewport_rows,
            cards,
        }
    }

    fn detail_page(&self, entry: &TitleEntry) -> DetailPage {
        let image = self.images.slot(entry.record.image.as_deref());
        let can_preview = matches!(image, ImageSlot::Pending(_) | ImageSlot::Ready(_));
        DetailPage {
            title: entry.title.clone(),
            date: entry.record.display_date(),
            description: entry.record.description.clone(),
            image,
            can_preview,
        }
    }

    fn not_found_page(&self, name: &str) -> NotFoundPage {
        NotFoundPage {
            name: name.to_string(),
            message: format!("这个称号暂时没有记录：{name}"),
            similar: self.similar_titles(name),
        }
    }

    /// Catalog titles that fuzzily resemble `name`, best first.
    fn similar_titles(&self, name: &str) -> Vec<String> {
        let Some(catalog) = &self.catalog else {
            return Vec::new();
        };
        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &str)> = catalog
            .get_all()
            .iter()
            .filter_map(|entry| {
                matcher
                    .fuzzy_match(&entry.title, name)
                    .map(|score| (score, entry.title.as_str()))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(SIMILAR_LIMIT)
            .map(|(_, title)| title.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TitleRecord;

    fn sample_catalog() -> Catalog {
        Catalog::from_entries(vec![
            TitleEntry::new(
                "报备哥",
                TitleRecord::new("2024-03-01", "出门必报备").with_image("/images/baobei.jpg"),
            ),
            TitleEntry::new("路痴哥", TitleRecord::new("2024-01-01", "总是迷路")),
            TitleEntry::new("美食家", TitleRecord::new("2024-02-15", "吃遍全城")),
        ])
        .unwrap()
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::new(Theme::default());
        state.load_catalog(sample_catalog());
        state
    }

    fn titles(state: &AppState) -> Vec<&str> {
        state.results.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn new_state_is_loading() {
        let state = AppState::new(Theme::default());
        assert!(state.is_loading());
        assert_eq!(state.compute_viewmodel(24, 80).page, Page::Loading);
    }

    #[test]
    fn loading_sorts_by_date_and_seeds_shuffle() {
        let state = loaded_state();
        assert_eq!(titles(&state), ["报备哥", "路痴哥", "美食家"]);
        assert_eq!(state.shuffle_seed, sample_catalog().fingerprint());
    }

    #[test]
    fn query_filters_and_clamps_selection() {
        let mut state = loaded_state();
        state.selected_index = 2;
        state.set_query("迷路".to_string());
        assert_eq!(titles(&state), ["路痴哥"]);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn random_twice_reshuffles_seed() {
        let mut state = loaded_state();
        state.set_sort(SortMode::Random);
        let seed = state.shuffle_seed;
        state.set_sort(SortMode::Random);
        assert_ne!(state.shuffle_seed, seed);
        state.set_sort(SortMode::Name);
        assert_eq!(titles(&state), ["报备哥", "路痴哥", "美食家"]);
    }

    #[test]
    fn selection_wraps() {
        let mut state = loaded_state();
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn open_selected_resolves_detail() {
        let mut state = loaded_state();
        assert!(state.open_selected());
        assert_eq!(state.detail_entry().map(|e| e.title.as_str()), Some("报备哥"));
        match state.compute_viewmodel(24, 80).page {
            Page::Detail(detail) => {
                assert_eq!(detail.date, "2024年3月1日");
                assert!(detail.can_preview);
            }
            other => panic!("expected detail page, got {other:?}"),
        }
    }

    #[test]
    fn unknown_title_is_not_found_with_decoded_name() {
        let mut state = loaded_state();
        state.navigate(Route::parse("/title/%E4%B8%8D%E5%AD%98%E5%9C%A8%E7%9A%84%E7%A7%B0%E5%8F%B7"));
        match state.compute_viewmodel(24, 80).page {
            Page::NotFound(page) => assert_eq!(page.name, "不存在的称号"),
            other => panic!("expected not found, got {other:?}"),
        }
        assert!(!state.open_preview());
    }

    #[test]
    fn preview_requires_unfailed_image() {
        let mut state = loaded_state();
        state.navigate(Route::detail("路痴哥"));
        assert!(!state.open_preview());

        state.navigate(Route::detail("报备哥"));
        state.images.mark_failed("/images/baobei.jpg");
        assert!(!state.open_preview());
        match state.compute_viewmodel(24, 80).page {
            Page::Detail(detail) => {
                assert_eq!(detail.image, ImageSlot::Placeholder);
                assert!(!detail.can_preview);
            }
            other => panic!("expected detail page, got {other:?}"),
        }
    }

    #[test]
    fn image_requests_are_issued_once() {
        let mut state = loaded_state();
        let first = state.image_requests();
        assert_eq!(first.local, ["/images/baobei.jpg"]);
        assert!(state.image_requests().is_empty());
    }

    #[test]
    fn summary_and_empty_state() {
        let mut state = loaded_state();
        let Page::List(page) = state.compute_viewmodel(24, 80).page else {
            panic!("expected list page");
        };
        assert_eq!(page.summary, "共有 3 个称号");

        state.set_query("不存在".to_string());
        let Page::List(page) = state.compute_viewmodel(24, 80).page else {
            panic!("expected list page");
        };
        assert_eq!(page.summary, "找到 0 个称号 关键词: “不存在”");
        assert!(matches!(page.body, ListBody::Empty(ref empty) if empty.message == "没有找到相关称号"));
    }

    #[test]
    fn footer_counts_whole_catalog() {
        let mut state = loaded_state();
        state.set_query("路痴".to_string());
        assert_eq!(state.compute_viewmodel(24, 80).footer.total, "共收录 3 个称号");
    }

    #[test]
    fn state_serializes() {
        let state = loaded_state();
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["layout_mode"], "masonry");
        assert_eq!(value["sort_mode"], "date");
    }
}
