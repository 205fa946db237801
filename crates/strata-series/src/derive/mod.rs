//! Series derived from the canonical quarterly series.

pub mod ttm;
pub mod yoy;

pub use ttm::trailing_twelve_months;
pub use yoy::yoy_growth;

/// Keep only the newest `max` points of an ascending series.
pub(crate) fn keep_latest<T>(points: &mut Vec<T>, max: usize) {
    if points.len() > max {
        points.drain(..points.len() - max);
    }
}
