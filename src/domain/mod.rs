//! Domain layer for the titlewiki plugin.
//!
//! Core types independent of Zellij and of the storage format:
//!
//! - [`error`]: Error types and result aliases
//! - [`title`]: Title records, entries and date handling
//! - [`catalog`]: The ordered, read-only title catalog
//!
//! # Examples
//!
//! ```
//! use titlewiki::domain::{Catalog, Result, TitleEntry, TitleRecord};
//!
//! fn sample() -> Result<Catalog> {
//!     Catalog::from_entries(vec![TitleEntry::new(
//!         "路痴哥",
//!         TitleRecord::new("2024-01-01", "总是迷路"),
//!     )])
//! }
//! assert_eq!(sample().unwrap().len(), 1);
//! ```

pub mod catalog;
pub mod error;
pub mod title;

pub use catalog::Catalog;
pub use error::{Result, TitleWikiError};
pub use title::{TitleEntry, TitleRecord};
