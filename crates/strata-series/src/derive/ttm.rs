//! Trailing-twelve-month sums.

use super::keep_latest;
use crate::config::EngineConfig;
use crate::point::{Derivation, QuarterlyPoint, TtmPoint};

/// Rolling four-quarter sums over an ascending quarterly series.
///
/// A window is only summed if every step between its consecutive period ends
/// lies in `config.quarter_spacing`. Windows spanning a missing quarter are
/// skipped and counted, never summed short. The newest `config.max_ttm`
/// points are kept.
pub fn trailing_twelve_months(
    quarters: &[QuarterlyPoint],
    config: &EngineConfig,
) -> Derivation<TtmPoint> {
    let mut points = Vec::with_capacity(quarters.len().saturating_sub(3));
    let mut skipped = 0;

    for window in quarters.windows(4) {
        let contiguous = window.windows(2).all(|pair| {
            let step = (pair[1].period_end - pair[0].period_end).num_days();
            config.quarter_spacing.contains(step)
        });

        let period_end = window[3].period_end;
        if !contiguous {
            tracing::debug!(%period_end, "quarter gap in TTM window");
            skipped += 1;
            continue;
        }

        points.push(TtmPoint {
            period_end,
            value: window.iter().map(|q| q.value).sum(),
        });
    }

    keep_latest(&mut points, config.max_ttm);
    Derivation { points, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Months, NaiveDate};

    fn quarter_end(i: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, 3, 31).unwrap() + Months::new(3 * i)
    }

    fn series(values: &[f64]) -> Vec<QuarterlyPoint> {
        values
            .iter()
            .zip(0..)
            .map(|(v, i)| QuarterlyPoint::direct(quarter_end(i), *v))
            .collect()
    }

    #[test]
    fn test_constant_quarters() {
        let quarters = series(&[100.0; 8]);
        let ttm = trailing_twelve_months(&quarters, &EngineConfig::default());

        assert_eq!(ttm.points.len(), 5);
        assert_eq!(ttm.skipped, 0);
        assert!(ttm.points.iter().all(|p| p.value == 400.0));
        assert_eq!(ttm.points[0].period_end, quarter_end(3));
        assert_eq!(ttm.points[4].period_end, quarter_end(7));
    }

    #[test]
    fn test_sums_exact_window() {
        let quarters = series(&[100.0, 120.0, 90.0, 190.0, 110.0]);
        let ttm = trailing_twelve_months(&quarters, &EngineConfig::default());

        assert_eq!(ttm.points.len(), 2);
        assert_eq!(ttm.points[0].value, 500.0);
        assert_eq!(ttm.points[1].value, 510.0);
    }

    #[test]
    fn test_insufficient_history() {
        let quarters = series(&[1.0, 2.0, 3.0]);
        let ttm = trailing_twelve_months(&quarters, &EngineConfig::default());
        assert!(ttm.points.is_empty());
        assert_eq!(ttm.skipped, 0);
    }

    #[test]
    fn test_gap_invalidates_window() {
        // Quarters 0..=7 with quarter 4 missing.
        let quarters: Vec<QuarterlyPoint> = [0, 1, 2, 3, 5, 6, 7, 8]
            .into_iter()
            .map(|i| QuarterlyPoint::direct(quarter_end(i), 10.0))
            .collect();

        let ttm = trailing_twelve_months(&quarters, &EngineConfig::default());

        let ends: Vec<NaiveDate> = ttm.points.iter().map(|p| p.period_end).collect();
        assert_eq!(ends, vec![quarter_end(3), quarter_end(8)]);
        assert_eq!(ttm.skipped, 3);
        assert!(ttm.points.iter().all(|p| p.value == 40.0));
    }

    #[test]
    fn test_capped_to_latest() {
        let quarters = series(&[1.0; 45]);
        let ttm = trailing_twelve_months(&quarters, &EngineConfig::default());

        assert_eq!(ttm.points.len(), 37);
        assert_eq!(ttm.points.last().unwrap().period_end, quarter_end(44));
    }
}
