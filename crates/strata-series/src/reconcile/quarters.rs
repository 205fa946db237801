//! Same-period deduplication.
//!
//! A quarter is typically reported several times: in its own 10-Q, as the
//! prior-year comparative in next year's 10-Q, and again in any amendment.
//! Each rule below is a comparator where `Ordering::Greater` means the left
//! record is preferred. Rules are composed with [`Ordering::then_with`].

use crate::point::QuarterlyPoint;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use strata_data::FactRecord;

/// Prefer a record whose frame confirms single-quarter granularity.
pub fn by_frame_match(a: &FactRecord, b: &FactRecord) -> Ordering {
    a.has_quarter_frame().cmp(&b.has_quarter_frame())
}

/// Prefer amended forms (`10-Q/A`, `10-K/A`) over originals.
pub fn by_amendment(a: &FactRecord, b: &FactRecord) -> Ordering {
    a.is_amendment().cmp(&b.is_amendment())
}

/// Prefer the later filing. A missing filed date loses to any date.
pub fn by_filed_date(a: &FactRecord, b: &FactRecord) -> Ordering {
    a.filed_date.cmp(&b.filed_date)
}

/// Quarterly tie-break: frame match, then amendment, then filed date.
pub fn filing_preference(a: &FactRecord, b: &FactRecord) -> Ordering {
    by_frame_match(a, b)
        .then_with(|| by_amendment(a, b))
        .then_with(|| by_filed_date(a, b))
}

/// Cumulative (nine-month, annual) tie-break: amendment, then filed date.
///
/// Frames are not used here; cumulative facts never carry quarter frames.
pub fn cumulative_preference(a: &FactRecord, b: &FactRecord) -> Ordering {
    by_amendment(a, b).then_with(|| by_filed_date(a, b))
}

/// Pick the preferred record. On a full tie the later record in feed order
/// wins, since `Iterator::max_by` returns the last maximum.
pub fn preferred<'a, I, F>(records: I, compare: F) -> Option<&'a FactRecord>
where
    I: IntoIterator<Item = &'a FactRecord>,
    F: Fn(&FactRecord, &FactRecord) -> Ordering,
{
    records.into_iter().max_by(|a, b| compare(*a, *b))
}

/// Collapse quarterly facts to one direct point per period end.
///
/// Output is ascending by `period_end`.
pub fn reconcile_quarters(records: &[FactRecord]) -> Vec<QuarterlyPoint> {
    let mut groups: BTreeMap<NaiveDate, Vec<&FactRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.period_end).or_default().push(record);
    }

    groups
        .into_iter()
        .filter_map(|(period_end, group)| {
            let chosen = preferred(group.iter().copied(), filing_preference)?;
            if group.len() > 1 {
                tracing::debug!(
                    %period_end,
                    candidates = group.len(),
                    source = %chosen.source(),
                    value = chosen.value,
                    "resolved duplicate quarter"
                );
            }
            Some(QuarterlyPoint::direct(period_end, chosen.value))
        })
        .collect()
}

/// Collapse cumulative facts to one record per `(period_start, period_end)`.
///
/// Output is ascending by `(period_start, period_end)`.
pub fn dedupe_cumulative(records: &[FactRecord]) -> Vec<&FactRecord> {
    let mut groups: BTreeMap<(NaiveDate, NaiveDate), Vec<&FactRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.period_start, record.period_end))
            .or_default()
            .push(record);
    }

    groups
        .into_values()
        .filter_map(|group| preferred(group, cumulative_preference))
        .collect()
}
