//! Route paths for the list and detail views.
//!
//! The list lives at `/` and each title at `/title/{encoded}`. Encoding follows
//! `encodeURIComponent`: every byte of the UTF-8 title except ASCII
//! alphanumerics and `-_.~` is percent-encoded, so the title survives as a
//! single path segment and decodes back byte-for-byte.

use serde::{Deserialize, Serialize};
use std::fmt;

const DETAIL_PREFIX: &str = "/title/";

/// A location inside the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Route {
    /// The searchable list.
    #[default]
    List,
    /// The detail page for a decoded title, which may or may not exist.
    Detail(String),
    /// A path no view handles; rendered as "not found".
    Unknown(String),
}

impl Route {
    /// Parses a path into a route.
    ///
    /// Never fails: a detail segment that is not valid percent-encoded UTF-8 is
    /// kept verbatim, which then simply misses the catalog.
    ///
    /// ```
    /// use titlewiki::infrastructure::Route;
    ///
    /// assert_eq!(Route::parse("/"), Route::List);
    /// assert_eq!(
    ///     Route::parse("/title/%E8%B7%AF%E7%97%B4%E5%93%A5"),
    ///     Route::Detail("路痴哥".to_string())
    /// );
    /// assert_eq!(Route::parse("/about"), Route::Unknown("/about".to_string()));
    /// ```
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        let path = path.split(['?', '#']).next().unwrap_or(path);

        if path.is_empty() || path == "/" {
            return Self::List;
        }

        match path.strip_prefix(DETAIL_PREFIX) {
            Some(segment) if !segment.is_empty() && !segment.contains('/') => {
                Self::Detail(decode_segment(segment))
            }
            _ => Self::Unknown(path.to_string()),
        }
    }

    /// Builds the detail route for a title.
    #[must_use]
    pub fn detail(title: impl Into<String>) -> Self {
        Self::Detail(title.into())
    }

    /// Returns the canonical path of this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::List => "/".to_string(),
            Self::Detail(title) => detail_path(title),
            Self::Unknown(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Path of the detail page for `title`.
///
/// ```
/// use titlewiki::infrastructure::detail_path;
///
/// assert_eq!(detail_path("a b/c"), "/title/a%20b%2Fc");
/// ```
#[must_use]
pub fn detail_path(title: &str) -> String {
    format!("{DETAIL_PREFIX}{}", urlencoding::encode(title))
}

/// Percent-decodes a path segment, falling back to the raw text.
#[must_use]
pub fn decode_segment(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            tracing::debug!(segment = %segment, error = %e, "segment is not valid UTF-8 after decoding");
            segment.to_string()
        }
    }
}
