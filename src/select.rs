//! Filtering, ordering, and limiting of the release list.

use crate::release::Release;

/// Keep releases whose original title contains the needle, case-insensitively.
/// A blank needle keeps everything.
pub fn filter_by_title(releases: Vec<Release>, contains: &str) -> Vec<Release> {
    let needle = contains.trim().to_lowercase();
    if needle.is_empty() {
        return releases;
    }
    releases
        .into_iter()
        .filter(|release| release.title.to_lowercase().contains(&needle))
        .collect()
}

/// Order newest first. Ties keep their feed order.
pub fn sort_newest_first(releases: &mut [Release]) {
    releases.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

/// Truncate to the first `limit` releases. Zero or negative keeps everything.
pub fn truncate_to_limit(releases: &mut Vec<Release>, limit: i64) {
    if limit > 0 {
        releases.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }
}
