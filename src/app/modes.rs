//! Input and layout mode types.
//!
//! These small state machine enums decide which keybindings are active and
//! which renderer draws the result list.
//!
//! - **Input**: `Normal` navigation, or `Search` with typing / navigating focus
//! - **Layout**: masonry, grid or list, a pure rendering choice over the same
//!   query result
//!
//! # Example
//!
//! ```rust
//! use titlewiki::app::modes::{InputMode, LayoutMode, SearchFocus};
//!
//! let input_mode = InputMode::Search(SearchFocus::Typing);
//! let layout: LayoutMode = "grid".parse().unwrap();
//! assert_eq!(layout, LayoutMode::Grid);
//! assert_eq!(LayoutMode::default(), LayoutMode::Masonry);
//! # let _ = input_mode;
//! ```

use crate::domain::TitleWikiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchFocus {
    /// Keystrokes edit the query; the suggestion dropdown is live.
    Typing,

    /// Keystrokes move through the filtered results.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    /// Default navigation and command mode.
    ///
    /// Available keybindings: j/k (navigate), / (search), enter (open),
    /// d/n/r (sort), 1/2/3 (layout), g (top), q (quit).
    Normal,

    /// Active search with a [`SearchFocus`].
    Search(SearchFocus),
}

impl InputMode {
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Search(SearchFocus::Typing))
    }
}

/// Arrangement of result cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Variable-height cards flowing into the shortest column.
    #[default]
    Masonry,
    /// Fixed-height cards in rows.
    Grid,
    /// One block per title, full width.
    List,
}

impl LayoutMode {
    pub const ALL: [Self; 3] = [Self::Masonry, Self::Grid, Self::List];

    /// Label shown on the control bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Masonry => "瀑布流",
            Self::Grid => "网格",
            Self::List => "列表",
        }
    }

    /// Lines of description a card shows before clamping.
    #[must_use]
    pub const fn description_lines(self) -> usize {
        match self {
            Self::Masonry => 4,
            Self::Grid => 3,
            Self::List => 2,
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Masonry => "masonry",
            Self::Grid => "grid",
            Self::List => "list",
        })
    }
}

impl FromStr for LayoutMode {
    type Err = TitleWikiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "masonry" => Ok(Self::Masonry),
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            other => Err(TitleWikiError::Config(format!("unknown layout mode: {other}"))),
        }
    }
}
