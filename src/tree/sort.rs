//! Per-directory ordering of entries

use std::cmp::Ordering;

use feruca::Collator;

use super::config::SortBy;
use super::traversal::Entry;

/// Sort the entries of one directory in place.
///
/// Size and date orders are stable over name order, so ties always come
/// out the same way.
pub fn sort_entries(entries: &mut [Entry], sort_by: SortBy) {
    let mut collator = Collator::default();
    entries.sort_by(|a, b| collator.collate(a.name.as_str(), b.name.as_str()));

    match sort_by {
        SortBy::Name => {}
        SortBy::Size => entries.sort_by(|a, b| b.meta.size.cmp(&a.meta.size)),
        SortBy::Date => entries.sort_by(|a, b| b.meta.modified.cmp(&a.meta.modified)),
    }
}

/// Locale-aware name comparison (Unicode collation, CLDR root order).
///
/// Accents and case only break ties between otherwise equal names, and
/// punctuation is ignored at the first level, so `é.txt` sorts between
/// `a.txt` and `f.txt` and `a` comes before `A`.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}
