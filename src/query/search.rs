//! Substring search over the catalog.

use crate::domain::{Catalog, TitleEntry};

/// Returns every entry whose title or description contains `query`,
/// case-insensitively, in catalog order.
///
/// An empty query matches everything. The function is pure and total: a query
/// that matches nothing yields an empty vector.
///
/// ```
/// use titlewiki::domain::{Catalog, TitleEntry, TitleRecord};
/// use titlewiki::query::search;
///
/// let catalog = Catalog::from_entries(vec![
///     TitleEntry::new("报备哥", TitleRecord::new("2024-03-01", "出门必报备")),
///     TitleEntry::new("路痴哥", TitleRecord::new("2024-01-01", "总是迷路")),
/// ])?;
/// let titles: Vec<_> = search(&catalog, "路痴").iter().map(|e| e.title.as_str()).collect();
/// assert_eq!(titles, ["路痴哥"]);
/// assert_eq!(search(&catalog, "").len(), 2);
/// # Ok::<(), titlewiki::TitleWikiError>(())
/// ```
#[must_use]
pub fn search<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a TitleEntry> {
    let _span = tracing::debug_span!("search", total = catalog.len(), query_len = query.len()).entered();

    if query.is_empty() {
        return catalog.get_all().iter().collect();
    }

    let needle = query.to_lowercase();
    let results: Vec<&TitleEntry> = catalog
        .get_all()
        .iter()
        .filter(|entry| matches(entry, &needle))
        .collect();

    tracing::debug!(matched = results.len(), "search complete");
    results
}

/// Whether `entry` contains the already-lowercased `needle`.
pub(crate) fn matches(entry: &TitleEntry, needle: &str) -> bool {
    entry.title.to_lowercase().contains(needle)
        || entry.record.description.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TitleRecord;

    fn catalog() -> Catalog {
        Catalog::from_entries(vec![
            TitleEntry::new("报备哥", TitleRecord::new("2024-03-01", "Always Reports in")),
            TitleEntry::new("路痴哥", TitleRecord::new("2024-01-01", "总是迷路")),
            TitleEntry::new("Night Owl", TitleRecord::new("2023-06-01", "熬夜冠军")),
        ])
        .unwrap()
    }

    fn titles(results: &[&TitleEntry]) -> Vec<String> {
        results.iter().map(|e| e.title.clone()).collect()
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let catalog = catalog();
        assert_eq!(titles(&search(&catalog, "")), ["报备哥", "路痴哥", "Night Owl"]);
    }

    #[test]
    fn matches_title_or_description_case_insensitively() {
        let catalog = catalog();
        assert_eq!(titles(&search(&catalog, "night")), ["Night Owl"]);
        assert_eq!(titles(&search(&catalog, "REPORTS")), ["报备哥"]);
        assert_eq!(titles(&search(&catalog, "迷路")), ["路痴哥"]);
        assert_eq!(titles(&search(&catalog, "哥")), ["报备哥", "路痴哥"]);
    }

    #[test]
    fn every_result_contains_the_query() {
        let catalog = catalog();
        for query in ["o", "哥", "in", "冠", "zzz", " "] {
            let needle = query.to_lowercase();
            for entry in search(&catalog, query) {
                assert!(
                    entry.title.to_lowercase().contains(&needle)
                        || entry.record.description.to_lowercase().contains(&needle)
                );
            }
        }
    }

    #[test]
    fn unmatched_query_is_empty_not_an_error() {
        assert!(search(&catalog(), "不存在").is_empty());
    }
}
