//! Merging direct and imputed quarters.

use crate::point::QuarterlyPoint;

/// Combine direct and imputed quarters into the canonical series.
///
/// Points are sorted newest first with direct points ahead of imputed ones on
/// an exact tie, deduplicated by `period_end` keeping the first, truncated to
/// `max_quarters`, and returned oldest first.
pub fn merge_series(
    direct: Vec<QuarterlyPoint>,
    imputed: Vec<QuarterlyPoint>,
    max_quarters: usize,
) -> Vec<QuarterlyPoint> {
    let mut merged = direct;
    merged.extend(imputed);

    // Stable sort keeps direct ahead of imputed for equal period ends.
    merged.sort_by(|a, b| b.period_end.cmp(&a.period_end));
    merged.dedup_by_key(|p| p.period_end);
    merged.truncate(max_quarters);
    merged.reverse();
    merged
}
