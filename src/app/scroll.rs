//! Vertical scroll position of the result list.
//!
//! The header collapse and the back-to-top indicator are derived from the
//! offset on demand, so they can never disagree with it.

use serde::{Deserialize, Serialize};

/// Offset (in rows) past which the header switches to its compact form.
pub const COMPACT_HEADER_AFTER: usize = 4;

/// Offset (in rows) past which the back-to-top indicator appears.
pub const BACK_TO_TOP_AFTER: usize = 12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollState {
    offset: usize,
}

impl ScrollState {
    #[must_use]
    pub const fn offset(self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn header_compact(self) -> bool {
        self.offset > COMPACT_HEADER_AFTER
    }

    #[must_use]
    pub const fn show_back_to_top(self) -> bool {
        self.offset > BACK_TO_TOP_AFTER
    }

    /// Scrolls by `delta` rows, clamped to `0..=max_offset`.
    pub fn scroll_by(&mut self, delta: isize, max_offset: usize) {
        self.offset = self.offset.saturating_add_signed(delta).min(max_offset);
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Adjusts the offset so rows `top..top + height` fit in a viewport of
    /// `viewport` rows. Items taller than the viewport align to their top.
    pub fn ensure_visible(&mut self, top: usize, height: usize, viewport: usize) {
        if viewport == 0 {
            return;
        }
        if top < self.offset {
            self.offset = top;
        } else if top + height > self.offset + viewport {
            self.offset = if height >= viewport { top } else { top + height - viewport };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_flags_track_offset() {
        let mut scroll = ScrollState::default();
        assert!(!scroll.header_compact());
        scroll.scroll_by(5, 100);
        assert!(scroll.header_compact());
        assert!(!scroll.show_back_to_top());
        scroll.scroll_by(8, 100);
        assert!(scroll.show_back_to_top());
        scroll.reset();
        assert!(!scroll.header_compact() && !scroll.show_back_to_top());
    }

    #[test]
    fn scroll_is_clamped() {
        let mut scroll = ScrollState::default();
        scroll.scroll_by(-3, 10);
        assert_eq!(scroll.offset(), 0);
        scroll.scroll_by(50, 10);
        assert_eq!(scroll.offset(), 10);
    }

    #[test]
    fn ensure_visible_moves_minimally() {
        let mut scroll = ScrollState::default();
        scroll.ensure_visible(20, 5, 10);
        assert_eq!(scroll.offset(), 15);
        scroll.ensure_visible(16, 3, 10);
        assert_eq!(scroll.offset(), 15);
        scroll.ensure_visible(2, 3, 10);
        assert_eq!(scroll.offset(), 2);
        scroll.ensure_visible(40, 30, 10);
        assert_eq!(scroll.offset(), 40);
    }
}
