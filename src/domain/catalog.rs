//! The read-only title catalog.
//!
//! [`Catalog`] is an ordered mapping from title to [`TitleRecord`]. The order is
//! the order of the source file and serves as the "original catalog order" that
//! stable sorts fall back on. Lookups by title are exact and case-sensitive.

use super::error::{Result, TitleWikiError};
use super::title::{TitleEntry, TitleRecord};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a over `bytes`, continuing from `state`.
pub(crate) fn fnv1a(state: u64, bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(state, |hash, byte| (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME))
}

/// Ordered, immutable mapping from title to record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<TitleEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from entries in source order.
    ///
    /// Duplicate titles keep their first occurrence. An empty title is
    /// rejected because titles double as URL path segments.
    ///
    /// # Errors
    ///
    /// Returns [`TitleWikiError::Catalog`] if any title is empty.
    ///
    /// ```
    /// use titlewiki::domain::{Catalog, TitleEntry, TitleRecord};
    ///
    /// let catalog = Catalog::from_entries(vec![
    ///     TitleEntry::new("报备哥", TitleRecord::new("2024-03-01", "...")),
    ///     TitleEntry::new("路痴哥", TitleRecord::new("2024-01-01", "...")),
    /// ])?;
    /// assert_eq!(catalog.len(), 2);
    /// assert!(catalog.get("路痴哥").is_some());
    /// # Ok::<(), titlewiki::TitleWikiError>(())
    /// ```
    pub fn from_entries(entries: Vec<TitleEntry>) -> Result<Self> {
        let mut kept = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());

        for entry in entries {
            if entry.title.is_empty() {
                return Err(TitleWikiError::Catalog("title keys must not be empty".to_string()));
            }
            if index.contains_key(&entry.title) {
                tracing::warn!(title = %entry.title, "duplicate title in catalog, keeping first");
                continue;
            }
            index.insert(entry.title.clone(), kept.len());
            kept.push(entry);
        }

        Ok(Self {
            entries: kept,
            index,
        })
    }

    /// Returns every entry in catalog order.
    #[must_use]
    pub fn get_all(&self) -> &[TitleEntry] {
        &self.entries
    }

    /// Looks up a title exactly.
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&TitleEntry> {
        self.index.get(title).map(|&i| &self.entries[i])
    }

    /// Position of `title` in catalog order.
    #[must_use]
    pub fn position(&self, title: &str) -> Option<usize> {
        self.index.get(title).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring search over titles and descriptions.
    ///
    /// See [`crate::query::search`].
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&TitleEntry> {
        crate::query::search(self, query)
    }

    /// Stable hash of the title set, in order.
    ///
    /// Changes whenever a title is added, removed or reordered; used to seed
    /// the pseudo-random sort so its order only moves when the data does.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        self.entries.iter().fold(FNV_OFFSET, |hash, entry| {
            fnv1a(fnv1a(hash, entry.title.as_bytes()), &[0xff])
        })
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Vec<TitleEntry>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping titles to records")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((title, record)) = map.next_entry::<String, TitleRecord>()? {
                    entries.push(TitleEntry { title, record });
                }
                Ok(entries)
            }
        }

        let entries = deserializer.deserialize_map(CatalogVisitor)?;
        Self::from_entries(entries).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Catalog {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.entries.iter().map(|e| (&e.title, &e.record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_keeps_source_order() {
        let json = r#"{
            "z-last-alphabetically": {"date": "2024-01-01", "description": "a"},
            "报备哥": {"date": "2024-03-01", "description": "b"},
            "a-first": {"date": "2023-01-01", "description": "c"}
        }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        let titles: Vec<_> = catalog.get_all().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["z-last-alphabetically", "报备哥", "a-first"]);
        assert_eq!(catalog.position("报备哥"), Some(1));
    }

    #[test]
    fn duplicate_titles_keep_first() {
        let json = r#"{
            "dup": {"date": "2024-01-01", "description": "first"},
            "dup": {"date": "2024-02-01", "description": "second"}
        }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("dup").unwrap().record.description, "first");
    }

    #[test]
    fn rejects_empty_titles_and_non_objects() {
        assert!(serde_json::from_str::<Catalog>(r#"{"": {"date": "", "description": ""}}"#).is_err());
        assert!(serde_json::from_str::<Catalog>("[]").is_err());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let catalog = Catalog::from_entries(vec![TitleEntry::new(
            "Alpha",
            TitleRecord::new("2024-01-01", ""),
        )])
        .unwrap();
        assert!(catalog.get("Alpha").is_some());
        assert!(catalog.get("alpha").is_none());
    }

    #[test]
    fn fingerprint_tracks_the_title_set() {
        let a = Catalog::from_entries(vec![
            TitleEntry::new("a", TitleRecord::new("2024-01-01", "")),
            TitleEntry::new("b", TitleRecord::new("2024-01-01", "")),
        ])
        .unwrap();
        let same = a.clone();
        let reordered = Catalog::from_entries(vec![
            TitleEntry::new("b", TitleRecord::new("2024-01-01", "")),
            TitleEntry::new("a", TitleRecord::new("2024-01-01", "")),
        ])
        .unwrap();
        assert_eq!(a.fingerprint(), same.fingerprint());
        assert_ne!(a.fingerprint(), reordered.fingerprint());
    }

    #[test]
    fn serializes_back_in_order() {
        let catalog = Catalog::from_entries(vec![
            TitleEntry::new("b", TitleRecord::new("2024-01-01", "x")),
            TitleEntry::new("a", TitleRecord::new("2024-01-02", "y")),
        ])
        .unwrap();
        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.find("\"b\"").unwrap() < json.find("\"a\"").unwrap());
    }
}
