//! Result ordering.
//!
//! Sorting is copy-on-sort: the caller's slice is never reordered. All three
//! modes are stable with respect to the input order.

use crate::domain::catalog::fnv1a;
use crate::domain::{TitleEntry, TitleWikiError};
use chrono::NaiveDate;
use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;

/// Ordering applied to a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Newest first. Entries with malformed dates go last.
    #[default]
    Date,
    /// Ascending by title in zh-CN collation (pinyin order for Han).
    Name,
    /// Deterministic shuffle keyed by title and seed.
    Random,
}

impl SortMode {
    pub const ALL: [Self; 3] = [Self::Date, Self::Name, Self::Random];

    /// Label shown on the control bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Date => "时间",
            Self::Name => "名称",
            Self::Random => "随机",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Date => "date",
            Self::Name => "name",
            Self::Random => "random",
        })
    }
}

impl FromStr for SortMode {
    type Err = TitleWikiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "name" => Ok(Self::Name),
            "random" => Ok(Self::Random),
            other => Err(TitleWikiError::Config(format!("unknown sort mode: {other}"))),
        }
    }
}

/// Returns `results` ordered by `mode`.
///
/// `seed` only affects [`SortMode::Random`]; callers normally pass
/// [`Catalog::fingerprint`](crate::domain::Catalog::fingerprint) so that the
/// shuffled order holds still until the data changes.
///
/// ```
/// use titlewiki::domain::{Catalog, TitleEntry, TitleRecord};
/// use titlewiki::query::{search, sort, SortMode};
///
/// let catalog = Catalog::from_entries(vec![
///     TitleEntry::new("路痴哥", TitleRecord::new("2024-01-01", "...")),
///     TitleEntry::new("报备哥", TitleRecord::new("2024-03-01", "...")),
/// ])?;
/// let sorted = sort(&search(&catalog, ""), SortMode::Date, catalog.fingerprint());
/// let titles: Vec<_> = sorted.iter().map(|e| e.title.as_str()).collect();
/// assert_eq!(titles, ["报备哥", "路痴哥"]);
/// # Ok::<(), titlewiki::TitleWikiError>(())
/// ```
#[must_use]
pub fn sort<'a>(results: &[&'a TitleEntry], mode: SortMode, seed: u64) -> Vec<&'a TitleEntry> {
    let _span = tracing::debug_span!("sort", count = results.len(), mode = %mode).entered();

    let mut sorted = results.to_vec();
    match mode {
        SortMode::Date => sorted.sort_by_cached_key(|entry| date_key(entry.record.parsed_date())),
        SortMode::Name => sorted.sort_by(|a, b| compare_names(&a.title, &b.title)),
        SortMode::Random => sorted.sort_by_cached_key(|entry| shuffle_key(seed, &entry.title)),
    }
    sorted
}

/// Descending by date with unparsable dates after every valid one.
fn date_key(date: Option<NaiveDate>) -> (bool, Reverse<Option<NaiveDate>>) {
    (date.is_none(), Reverse(date))
}

thread_local! {
    static ZH_COLLATOR: Option<Collator> = zh_collator();
}

fn zh_collator() -> Option<Collator> {
    match Collator::try_new(&locale!("zh").into(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            tracing::warn!(error = %e, "zh collator unavailable, names compare by code point");
            None
        }
    }
}

/// zh-CN collation: Han characters by pinyin, Latin before Han, lowercase
/// before uppercase. Collation ties fall back to the raw strings so the order
/// stays total.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    ZH_COLLATOR
        .with(|collator| collator.as_ref().map_or(Ordering::Equal, |c| c.compare(a, b)))
        .then_with(|| a.cmp(b))
}

fn shuffle_key(seed: u64, title: &str) -> u64 {
    let hash = fnv1a(fnv1a(0xcbf2_9ce4_8422_2325, &seed.to_le_bytes()), title.as_bytes());
    // final avalanche so that titles sharing a prefix still scatter
    let mut x = hash ^ (hash >> 33);
    x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
    x ^ (x >> 33)
}

/// Derives the seed for an explicit reshuffle.
#[must_use]
pub fn next_seed(seed: u64) -> u64 {
    shuffle_key(seed, "reshuffle")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Catalog, TitleRecord};
    use crate::query::search;

    fn entry(title: &str, date: &str) -> TitleEntry {
        TitleEntry::new(title, TitleRecord::new(date, ""))
    }

    fn titles(entries: &[&TitleEntry]) -> Vec<String> {
        entries.iter().map(|e| e.title.clone()).collect()
    }

    #[test]
    fn date_is_descending_and_stable_on_ties() {
        let entries = [
            entry("a", "2024-01-01"),
            entry("b", "2024-03-01"),
            entry("c", "2024-01-01"),
            entry("d", "2024-03-01"),
        ];
        let refs: Vec<&TitleEntry> = entries.iter().collect();
        assert_eq!(titles(&sort(&refs, SortMode::Date, 0)), ["b", "d", "a", "c"]);
    }

    #[test]
    fn malformed_dates_sort_last_in_input_order() {
        let entries = [
            entry("bad1", "not a date"),
            entry("old", "2020-01-01"),
            entry("bad2", ""),
            entry("new", "2024-01-01"),
        ];
        let refs: Vec<&TitleEntry> = entries.iter().collect();
        assert_eq!(
            titles(&sort(&refs, SortMode::Date, 0)),
            ["new", "old", "bad1", "bad2"]
        );
    }

    #[test]
    fn name_sort_is_idempotent_and_lowercase_first() {
        let entries = [
            entry("beta", "2024-01-01"),
            entry("Alpha", "2024-01-01"),
            entry("alpha", "2024-01-01"),
            entry("路痴哥", "2024-01-01"),
            entry("Gamma", "2024-01-01"),
        ];
        let refs: Vec<&TitleEntry> = entries.iter().collect();
        let once = sort(&refs, SortMode::Name, 0);
        assert_eq!(titles(&once), ["alpha", "Alpha", "beta", "Gamma", "路痴哥"]);
        let twice = sort(&once, SortMode::Name, 0);
        assert_eq!(titles(&once), titles(&twice));
    }

    #[test]
    fn name_sort_orders_han_titles_by_pinyin() {
        let entries = [
            entry("报备哥", "2024-01-01"),
            entry("路痴哥", "2024-01-01"),
            entry("美食家", "2024-01-01"),
            entry("阿姨哥", "2024-01-01"),
        ];
        let refs: Vec<&TitleEntry> = entries.iter().collect();
        assert_eq!(
            titles(&sort(&refs, SortMode::Name, 0)),
            ["阿姨哥", "报备哥", "路痴哥", "美食家"]
        );
        assert_eq!(compare_names("路痴哥", "美食家"), Ordering::Less);
    }

    #[test]
    fn random_is_deterministic_for_a_seed_and_a_permutation() {
        let entries: Vec<TitleEntry> = (0..20).map(|i| entry(&format!("t{i}"), "2024-01-01")).collect();
        let refs: Vec<&TitleEntry> = entries.iter().collect();

        let first = sort(&refs, SortMode::Random, 42);
        let again = sort(&refs, SortMode::Random, 42);
        assert_eq!(titles(&first), titles(&again));

        let mut shuffled = titles(&first);
        shuffled.sort();
        let mut original = titles(&refs);
        original.sort();
        assert_eq!(shuffled, original);

        let other = sort(&refs, SortMode::Random, next_seed(42));
        assert_ne!(titles(&first), titles(&other));
    }

    #[test]
    fn random_relative_order_survives_filtering() {
        let entries: Vec<TitleEntry> = (0..12).map(|i| entry(&format!("t{i}"), "2024-01-01")).collect();
        let all: Vec<&TitleEntry> = entries.iter().collect();
        let subset: Vec<&TitleEntry> = entries.iter().step_by(2).collect();

        let full_order = titles(&sort(&all, SortMode::Random, 7));
        let subset_order = titles(&sort(&subset, SortMode::Random, 7));
        let projected: Vec<String> = full_order
            .into_iter()
            .filter(|t| subset_order.contains(t))
            .collect();
        assert_eq!(projected, subset_order);
    }

    #[test]
    fn sort_does_not_touch_the_input() {
        let entries = [entry("a", "2020-01-01"), entry("b", "2024-01-01")];
        let refs: Vec<&TitleEntry> = entries.iter().collect();
        let _ = sort(&refs, SortMode::Date, 0);
        assert_eq!(titles(&refs), ["a", "b"]);
    }

    #[test]
    fn scenario_search_then_sort_by_date() {
        let catalog = Catalog::from_entries(vec![
            TitleEntry::new("路痴哥", TitleRecord::new("2024-01-01", "...")),
            TitleEntry::new("报备哥", TitleRecord::new("2024-03-01", "...")),
        ])
        .unwrap();
        let sorted = sort(&search(&catalog, ""), SortMode::Date, catalog.fingerprint());
        assert_eq!(titles(&sorted), ["报备哥", "路痴哥"]);
    }

    #[test]
    fn parses_and_prints_modes() {
        for mode in SortMode::ALL {
            assert_eq!(mode.to_string().parse::<SortMode>().unwrap(), mode);
        }
        assert_eq!(" Name ".parse::<SortMode>().unwrap(), SortMode::Name);
        assert!("popularity".parse::<SortMode>().is_err());
    }
}
