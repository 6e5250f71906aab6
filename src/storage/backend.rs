//! Catalog source abstraction.
//!
//! The catalog is the sole source of truth and is strictly read-only at
//! runtime, so the trait only exposes reads. Each method maps to a use case in
//! the worker thread.

use crate::domain::error::Result;
use crate::domain::{Catalog, TitleEntry};

/// Read-only access to a title catalog.
///
/// # Implementations
///
/// - [`JsonCatalog`](crate::storage::JsonCatalog): JSON file on disk (default)
/// - [`MemoryCatalog`]: in-memory entries, used by tests and embedders
///
/// # Examples
///
/// ```no_run
/// use titlewiki::storage::{CatalogSource, JsonCatalog};
/// use std::path::PathBuf;
///
/// let source = JsonCatalog::new(PathBuf::from("/tmp/titles.json"));
/// let catalog = source.get_all()?;
/// println!("{} titles", catalog.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait CatalogSource: Send {
    /// Loads the whole catalog in source order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying data cannot be read or is not a
    /// valid catalog.
    fn get_all(&self) -> Result<Catalog>;

    /// Human-readable description of where the catalog comes from.
    fn describe(&self) -> String;
}

/// Catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    entries: Vec<TitleEntry>,
}

impl MemoryCatalog {
    #[must_use]
    pub const fn new(entries: Vec<TitleEntry>) -> Self {
        Self { entries }
    }
}

impl CatalogSource for MemoryCatalog {
    fn get_all(&self) -> Result<Catalog> {
        Catalog::from_entries(self.entries.clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} entries)", self.entries.len())
    }
}
