//! Year-over-year growth.

use super::keep_latest;
use crate::config::EngineConfig;
use crate::point::{Derivation, GrowthPoint, Observation};

/// Percentage change between each period and the period four steps earlier.
///
/// Works on any ascending series of [`Observation`]s (quarters or TTM sums).
/// The prior point must lie within `config.yoy_lookback` of the current one,
/// so a gap in the series never pairs a quarter with the wrong year. Periods
/// with a zero prior, a prior outside the lookback band, or a non-finite
/// result are omitted. The newest `config.max_growth` points are kept.
pub fn yoy_growth<P: Observation>(series: &[P], config: &EngineConfig) -> Derivation<GrowthPoint> {
    let mut points = Vec::with_capacity(series.len().saturating_sub(4));
    let mut skipped = 0;

    for pair in series.windows(5) {
        let (prior, current) = (&pair[0], &pair[4]);
        let period_end = current.period_end();
        let lag = (period_end - prior.period_end()).num_days();

        if !config.yoy_lookback.contains(lag) {
            tracing::debug!(%period_end, lag, "prior-year period not aligned");
            skipped += 1;
            continue;
        }

        let base = prior.value();
        if base == 0.0 {
            tracing::debug!(%period_end, "zero prior-year value");
            skipped += 1;
            continue;
        }

        let growth_percent = (current.value() - base) / base * 100.0;
        if !growth_percent.is_finite() {
            skipped += 1;
            continue;
        }

        points.push(GrowthPoint {
            period_end,
            growth_percent,
        });
    }

    keep_latest(&mut points, config.max_growth);
    Derivation { points, skipped }
}
