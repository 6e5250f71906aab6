//! Search suggestions with token-based debouncing.
//!
//! Each keystroke schedules a suggestion computation and receives a fresh
//! token. Timers fire in the order they were set, so the oldest outstanding
//! token is popped on every elapsed timer; only the token matching the latest
//! scheduled one may update the dropdown. Stale computations are dropped
//! without touching visible state.
//!
//! # Example
//!
//! ```rust
//! use titlewiki::app::suggest::Suggestions;
//! use titlewiki::domain::{Catalog, TitleEntry, TitleRecord};
//!
//! let catalog = Catalog::from_entries(vec![
//!     TitleEntry::new("路痴哥", TitleRecord::new("2024-01-01", "总是迷路")),
//! ])?;
//!
//! let mut suggestions = Suggestions::default();
//! suggestions.schedule();
//! suggestions.schedule();
//! assert!(!suggestions.on_timer(&catalog, "路"));
//! assert!(suggestions.on_timer(&catalog, "路"));
//! assert_eq!(suggestions.items(), ["路痴哥"]);
//! # Ok::<(), titlewiki::TitleWikiError>(())
//! ```

use crate::domain::Catalog;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of suggestions shown under the search box.
pub const SUGGESTION_LIMIT: usize = 5;

/// Delay between the last keystroke and the suggestion update.
pub const DEBOUNCE_MILLIS: u64 = 300;

/// Titles containing `query`, case-insensitively, in catalog order.
///
/// Only titles are matched; descriptions never produce suggestions. An empty
/// or whitespace-only query yields nothing.
#[must_use]
pub fn compute(catalog: &Catalog, query: &str, limit: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    catalog
        .get_all()
        .iter()
        .filter(|entry| entry.title.to_lowercase().contains(&needle))
        .take(limit)
        .map(|entry| entry.title.clone())
        .collect()
}

/// Suggestion dropdown state plus the debounce bookkeeping behind it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Suggestions {
    items: Vec<String>,
    highlighted: Option<usize>,
    latest_token: u64,
    outstanding: VecDeque<u64>,
}

impl Suggestions {
    /// Registers a new computation and returns its token.
    ///
    /// The caller must arm exactly one timer per scheduled token.
    pub fn schedule(&mut self) -> u64 {
        self.latest_token += 1;
        self.outstanding.push_back(self.latest_token);
        self.latest_token
    }

    /// Handles one elapsed debounce timer.
    ///
    /// Returns `true` when the dropdown was refreshed from `query`.
    pub fn on_timer(&mut self, catalog: &Catalog, query: &str) -> bool {
        let Some(token) = self.outstanding.pop_front() else {
            tracing::debug!("debounce timer with nothing outstanding");
            return false;
        };
        if token != self.latest_token {
            tracing::trace!(token, latest = self.latest_token, "stale suggestion computation dropped");
            return false;
        }
        self.items = compute(catalog, query, SUGGESTION_LIMIT);
        self.highlighted = None;
        true
    }

    /// Consumes one elapsed timer without computing anything.
    pub fn discard_timer(&mut self) {
        self.outstanding.pop_front();
    }

    /// Hides the dropdown and invalidates every outstanding computation.
    pub fn clear(&mut self) {
        self.items.clear();
        self.highlighted = None;
        self.latest_token += 1;
    }

    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.items.is_empty()
    }

    #[must_use]
    pub const fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Moves the highlight to the next suggestion, wrapping around.
    pub fn cycle(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.highlighted = Some(self.highlighted.map_or(0, |i| (i + 1) % self.items.len()));
    }

    /// Takes the highlighted suggestion (or the first one) and closes the dropdown.
    pub fn accept(&mut self) -> Option<String> {
        let chosen = self.items.get(self.highlighted.unwrap_or(0)).cloned()?;
        self.clear();
        Some(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TitleEntry, TitleRecord};

    fn catalog(titles: &[&str]) -> Catalog {
        Catalog::from_entries(
            titles
                .iter()
                .map(|t| TitleEntry::new(*t, TitleRecord::new("2024-01-01", "描述里有哥")))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn matches_titles_only_and_caps_at_limit() {
        let catalog = catalog(&["a哥", "b哥", "c哥", "d哥", "e哥", "f哥", "独行侠"]);
        let items = compute(&catalog, "哥", SUGGESTION_LIMIT);
        assert_eq!(items, ["a哥", "b哥", "c哥", "d哥", "e哥"]);
        assert!(compute(&catalog, "描述", SUGGESTION_LIMIT).is_empty());
        assert!(compute(&catalog, "   ", SUGGESTION_LIMIT).is_empty());
    }

    #[test]
    fn only_latest_token_applies() {
        let catalog = catalog(&["路痴哥", "报备哥"]);
        let mut s = Suggestions::default();
        s.schedule();
        s.schedule();
        s.schedule();
        assert!(!s.on_timer(&catalog, "哥"));
        assert!(!s.on_timer(&catalog, "哥"));
        assert!(s.on_timer(&catalog, "哥"));
        assert_eq!(s.items(), ["路痴哥", "报备哥"]);
        assert!(!s.on_timer(&catalog, "哥"));
    }

    #[test]
    fn clear_invalidates_pending_work() {
        let catalog = catalog(&["路痴哥"]);
        let mut s = Suggestions::default();
        s.schedule();
        s.clear();
        assert!(!s.on_timer(&catalog, "路"));
        assert!(!s.is_visible());
    }

    #[test]
    fn cycle_and_accept() {
        let catalog = catalog(&["a哥", "b哥"]);
        let mut s = Suggestions::default();
        s.schedule();
        s.on_timer(&catalog, "哥");
        s.cycle();
        s.cycle();
        assert_eq!(s.highlighted(), Some(1));
        s.cycle();
        assert_eq!(s.highlighted(), Some(0));
        assert_eq!(s.accept().as_deref(), Some("a哥"));
        assert!(!s.is_visible());
        assert_eq!(s.accept(), None);
    }
}
