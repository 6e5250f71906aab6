//! JSON file catalog source.
//!
//! The file is a single JSON object whose keys are titles, in display order:
//!
//! ```json
//! {
//!   "报备哥": {
//!     "date": "2024-03-01",
//!     "description": "出门必报备",
//!     "image": "/images/baobei.jpg"
//!   },
//!   "路痴哥": {
//!     "date": "2024-01-01",
//!     "description": "总是迷路"
//!   }
//! }
//! ```
//!
//! The file is read on every [`CatalogSource::get_all`] call and never written.

use crate::domain::error::{Result, TitleWikiError};
use crate::domain::Catalog;
use crate::storage::backend::CatalogSource;
use std::path::{Path, PathBuf};

/// Catalog stored in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    file_path: PathBuf,
}

impl JsonCatalog {
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Parses catalog JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`TitleWikiError::Catalog`] with the line and column of the
    /// first problem.
    ///
    /// ```
    /// use titlewiki::storage::JsonCatalog;
    ///
    /// let catalog = JsonCatalog::parse(r#"{"路痴哥": {"date": "2024-01-01", "description": "总是迷路"}}"#)?;
    /// assert_eq!(catalog.len(), 1);
    /// assert!(JsonCatalog::parse("[1, 2]").is_err());
    /// # Ok::<(), titlewiki::TitleWikiError>(())
    /// ```
    pub fn parse(contents: &str) -> Result<Catalog> {
        serde_json::from_str(contents).map_err(|e| {
            TitleWikiError::Catalog(format!(
                "invalid catalog at line {} column {}: {e}",
                e.line(),
                e.column()
            ))
        })
    }
}

impl CatalogSource for JsonCatalog {
    fn get_all(&self) -> Result<Catalog> {
        let _span = tracing::debug_span!("json_catalog_get_all", path = ?self.file_path).entered();

        let contents = std::fs::read_to_string(&self.file_path)?;
        let catalog = Self::parse(contents.trim_start_matches('\u{feff}'))?;

        tracing::debug!(title_count = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    fn describe(&self) -> String {
        crate::infrastructure::strip_host_prefix(&self.file_path.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_file_with_bom() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "\u{feff}{{\"b\": {{\"date\": \"2024-01-01\", \"description\": \"x\"}}, \"a\": {{\"date\": \"2024-01-02\", \"description\": \"y\", \"image\": null}}}}"
        )
        .unwrap();

        let catalog = JsonCatalog::new(file.path().to_path_buf()).get_all().unwrap();
        let titles: Vec<_> = catalog.get_all().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["b", "a"]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonCatalog::new(dir.path().join("absent.json"));
        assert!(matches!(source.get_all(), Err(TitleWikiError::Io(_))));
    }

    #[test]
    fn malformed_json_reports_position() {
        let err = JsonCatalog::parse("{\n  \"a\": {\"date\": 1}\n}").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }
}
