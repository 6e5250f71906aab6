//! Error types for the titlewiki plugin.
//!
//! This module defines the centralized error type [`TitleWikiError`] and a type alias
//! [`Result`] used throughout the crate. Note that the interactive surface never
//! produces these errors for ordinary user input: a title that is not in the
//! catalog, an image that fails to load, or a malformed date are all rendered as
//! states. Errors are reserved for loading the catalog, themes and configuration.

use thiserror::Error;

/// The main error type for titlewiki operations.
///
/// # Examples
///
/// ```
/// use titlewiki::domain::TitleWikiError;
///
/// fn validate_layout(value: &str) -> Result<(), TitleWikiError> {
///     Err(TitleWikiError::Config(format!("unknown layout: {value}")))
/// }
///
/// assert!(validate_layout("carousel").is_err());
/// ```
#[derive(Debug, Error)]
pub enum TitleWikiError {
    /// The catalog source could not be turned into a [`Catalog`](crate::domain::Catalog).
    ///
    /// Raised for structural problems such as an empty title key or a top-level
    /// value that is not a JSON object.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed, either for the catalog file or for
    /// worker messages.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// A configuration value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for titlewiki operations.
pub type Result<T> = std::result::Result<T, TitleWikiError>;
