//! Order-preserving deduplication.

use std::collections::HashSet;

/// Deduplicate in first-seen order, dropping empty entries.
///
/// This is the single place where "same device, once" is enforced, so both
/// the owner-id path and the dispatch token set go through it.
pub fn dedup_preserving_order<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for item in items {
        let item = item.into();
        if item.is_empty() {
            continue;
        }
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }

    out
}
