//! Header collision repair

use rustc_hash::{FxHashMap, FxHashSet};

use super::column::Column;

/// Increment a trailing `-N` suffix, or start one at `-1`
///
/// `name` becomes `name-1`, `name-1` becomes `name-2`. A trailing segment
/// that is not a number is left alone: `first-name` becomes `first-name-1`.
/// So is a suffix too large to increment.
pub fn bump_suffix(header: &str) -> String {
    if let Some((stem, suffix)) = header.rsplit_once('-') {
        if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
            if let Some(n) = suffix.parse::<u64>().ok().and_then(|n| n.checked_add(1)) {
                return format!("{}-{}", stem, n);
            }
        }
    }
    format!("{}-1", header)
}

/// Bump `header` until it is not in `taken`
pub fn unique_against(header: &str, taken: &FxHashSet<String>) -> String {
    let mut candidate = header.to_string();
    while taken.contains(&candidate) {
        candidate = bump_suffix(&candidate);
    }
    candidate
}

/// Rename colliding headers in place until every header is distinct
///
/// Columns are visited left to right. A visited column keeps bumping its
/// suffix while any other column still carries the same header, so the last
/// column holding a repeated name is the one that keeps it unsuffixed.
/// Returns whether anything was renamed.
pub fn dedupe_headers(columns: &mut [Column]) -> bool {
    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    for column in columns.iter() {
        *counts.entry(column.header.clone()).or_insert(0) += 1;
    }
    if counts.len() == columns.len() {
        return false;
    }

    for column in columns.iter_mut() {
        while counts.get(&column.header).copied().unwrap_or(0) > 1 {
            if let Some(count) = counts.get_mut(&column.header) {
                *count -= 1;
            }
            column.header = bump_suffix(&column.header);
            *counts.entry(column.header.clone()).or_insert(0) += 1;
        }
    }
    true
}
