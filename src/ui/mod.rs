//! User interface rendering layer with component-based architecture.
//!
//! This module turns application state into ANSI-styled terminal output:
//! responsive card layouts, CJK-aware text measurement, match highlighting
//! and themes.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`layout`]: Card geometry for the masonry, grid and list layouts
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (widths, wrapping, highlighting)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod layout;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    CardItem, CardsView, DetailPage, EmptyState, FooterInfo, HeaderInfo, ListBody, ListPage, NotFoundPage, Page,
    PreviewInfo, UIViewModel,
};
