//! Query engine: search then sort.
//!
//! ```text
//! Catalog ──search(query)──▶ matches (catalog order) ──sort(mode, seed)──▶ QueryResult
//! ```
//!
//! Both steps are pure. The application recomputes the whole pipeline whenever
//! the query, the sort mode, the shuffle seed or the catalog changes.

pub mod search;
pub mod sort;

pub use search::search;
pub use sort::{compare_names, next_seed, sort, SortMode};

use crate::domain::{Catalog, TitleEntry};

/// Ordered result of a query; derived, never stored beyond the current view.
pub type QueryResult = Vec<TitleEntry>;

/// Runs search and sort and returns owned entries.
#[must_use]
pub fn run(catalog: &Catalog, query: &str, mode: SortMode, seed: u64) -> QueryResult {
    sort(&search(catalog, query), mode, seed)
        .into_iter()
        .cloned()
        .collect()
}
