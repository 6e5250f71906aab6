//! Title record model and date handling.
//!
//! A title (称号) is a named catalog entry with a date, a description and an
//! optional image. Records are loaded once and never mutated. Dates are kept
//! verbatim and parsed on demand so that a malformed value degrades the sort
//! position and the displayed text, never the load.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Immutable payload stored under a title key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRecord {
    /// ISO date string, usually `YYYY-MM-DD`.
    pub date: String,

    /// Free-form description text.
    pub description: String,

    /// Optional image URL or site-relative path.
    ///
    /// Empty strings are normalized to `None` on load.
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

fn non_empty<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

impl TitleRecord {
    /// Creates a record without an image.
    pub fn new(date: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            image: None,
        }
    }

    /// Returns the record with `image` set.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Parses the record date.
    ///
    /// Accepts `YYYY-MM-DD` and, as a fallback, RFC 3339 date-times (the date
    /// part in the timestamp's own offset). Returns `None` for anything else.
    ///
    /// ```
    /// use titlewiki::domain::TitleRecord;
    ///
    /// let record = TitleRecord::new("2024-03-01", "");
    /// assert_eq!(record.parsed_date().map(|d| d.to_string()), Some("2024-03-01".to_string()));
    /// assert!(TitleRecord::new("someday", "").parsed_date().is_none());
    /// ```
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Formats the date the way the list cards show it (`2024年3月1日`).
    ///
    /// Malformed dates are shown verbatim.
    #[must_use]
    pub fn display_date(&self) -> String {
        self.parsed_date()
            .map_or_else(|| self.date.clone(), format_zh_date)
    }
}

/// Parses a catalog date string.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Formats a date in the fixed zh-CN long form.
#[must_use]
pub fn format_zh_date(date: NaiveDate) -> String {
    format!("{}年{}月{}日", date.year(), date.month(), date.day())
}

/// One catalog row: a title and its record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleEntry {
    pub title: String,
    pub record: TitleRecord,
}

impl TitleEntry {
    pub fn new(title: impl Into<String>, record: TitleRecord) -> Self {
        Self {
            title: title.into(),
            record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_rfc3339_dates() {
        assert_eq!(parse_date("2024-01-05"), NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(
            parse_date("2024-01-05T23:10:00+08:00"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(parse_date(" 2024-01-05 "), NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(parse_date("2024-13-40"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn display_date_uses_zh_long_form() {
        assert_eq!(TitleRecord::new("2024-03-01", "").display_date(), "2024年3月1日");
        assert_eq!(TitleRecord::new("去年夏天", "").display_date(), "去年夏天");
    }

    #[test]
    fn empty_image_deserializes_as_none() {
        let record: TitleRecord =
            serde_json::from_str(r#"{"date":"2024-01-01","description":"d","image":""}"#).unwrap();
        assert!(record.image.is_none());

        let record: TitleRecord =
            serde_json::from_str(r#"{"date":"2024-01-01","description":"d"}"#).unwrap();
        assert!(record.image.is_none());

        let record: TitleRecord = serde_json::from_str(
            r#"{"date":"2024-01-01","description":"d","image":"/images/a.jpg"}"#,
        )
        .unwrap();
        assert_eq!(record.image.as_deref(), Some("/images/a.jpg"));
    }
}
