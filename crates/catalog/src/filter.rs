//! Title search over catalog entries.

use crate::entry::GameEntry;

/// Returns the entries whose title contains `query`, ignoring case.
///
/// Surrounding whitespace in the query is ignored and an empty query
/// matches everything. Order follows `entries`.
pub fn visible<'a>(entries: &'a [GameEntry], query: &str) -> Vec<&'a GameEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries.iter().collect();
    }

    entries
        .iter()
        .filter(|e| e.title.to_lowercase().contains(&needle))
        .collect()
}
