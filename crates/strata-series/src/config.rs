//! Engine configuration.

use serde::{Deserialize, Serialize};
use strata_data::{DataError, Result};

/// Inclusive range of day counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBand {
    /// Smallest accepted day count
    pub min: i64,
    /// Largest accepted day count
    pub max: i64,
}

impl DayBand {
    /// Create a new band.
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Band of `target ± tolerance`.
    pub const fn around(target: i64, tolerance: i64) -> Self {
        Self::new(target - tolerance, target + tolerance)
    }

    /// Returns true if `days` lies inside the band.
    pub const fn contains(&self, days: i64) -> bool {
        self.min <= days && days <= self.max
    }

    const fn is_valid(&self) -> bool {
        0 < self.min && self.min <= self.max
    }
}

/// Configuration for the [`SeriesEngine`](crate::SeriesEngine).
///
/// Filers never report exact day counts, so every period test is a band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Duration band for single-quarter facts (default: 70..=120 days)
    pub quarterly_band: DayBand,
    /// Duration band for nine-month cumulative facts (default: 240..=300 days)
    pub nine_month_band: DayBand,
    /// Duration band for annual facts (default: 330..=380 days)
    pub annual_band: DayBand,
    /// Expected gap between nine-month end and annual end (default: 90 days)
    pub q4_offset_days: i64,
    /// Allowed deviation from `q4_offset_days` (default: 30 days)
    pub q4_offset_tolerance: i64,
    /// Accepted gap between consecutive quarter ends (default: 60..=120 days)
    pub quarter_spacing: DayBand,
    /// Accepted gap between a period and its prior-year period (default: 335..=395 days)
    pub yoy_lookback: DayBand,
    /// Quarters kept in the merged series (default: 40, ten years)
    pub max_quarters: usize,
    /// TTM points kept (default: 37)
    pub max_ttm: usize,
    /// Growth points kept (default: 36)
    pub max_growth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quarterly_band: DayBand::new(70, 120),
            nine_month_band: DayBand::new(240, 300),
            annual_band: DayBand::new(330, 380),
            q4_offset_days: 90,
            q4_offset_tolerance: 30,
            quarter_spacing: DayBand::new(60, 120),
            yoy_lookback: DayBand::new(335, 395),
            max_quarters: 40,
            max_ttm: 37,
            max_growth: 36,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON configuration and validate it.
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Band that a nine-month end must fall in, counted back from the annual end.
    pub const fn q4_offset_band(&self) -> DayBand {
        DayBand::around(self.q4_offset_days, self.q4_offset_tolerance)
    }

    /// Check that bands are well formed, ordered and disjoint, and caps are non-zero.
    pub fn validate(&self) -> Result<()> {
        let bands = [
            ("quarterly_band", self.quarterly_band),
            ("nine_month_band", self.nine_month_band),
            ("annual_band", self.annual_band),
            ("quarter_spacing", self.quarter_spacing),
            ("yoy_lookback", self.yoy_lookback),
        ];
        for (name, band) in bands {
            if !band.is_valid() {
                return Err(DataError::InvalidConfig(format!(
                    "{name} must satisfy 0 < min <= max, got {}..={}",
                    band.min, band.max
                )));
            }
        }

        if self.quarterly_band.max >= self.nine_month_band.min
            || self.nine_month_band.max >= self.annual_band.min
        {
            return Err(DataError::InvalidConfig(
                "classification bands must be ascending and disjoint".to_string(),
            ));
        }

        if self.q4_offset_tolerance < 0 || self.q4_offset_tolerance >= self.q4_offset_days {
            return Err(DataError::InvalidConfig(format!(
                "q4_offset_tolerance must be in 0..{}, got {}",
                self.q4_offset_days, self.q4_offset_tolerance
            )));
        }

        if self.max_quarters == 0 || self.max_ttm == 0 || self.max_growth == 0 {
            return Err(DataError::InvalidConfig(
                "series caps must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.q4_offset_band(), DayBand::new(60, 120));
    }

    #[test]
    fn test_band_contains_is_inclusive() {
        let band = DayBand::new(70, 120);
        assert!(band.contains(70));
        assert!(band.contains(120));
        assert!(!band.contains(69));
        assert!(!band.contains(121));
    }

    #[test]
    fn test_overlapping_bands_rejected() {
        let config = EngineConfig {
            nine_month_band: DayBand::new(100, 300),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DataError::InvalidConfig(_))));
    }

    #[test]
    fn test_inverted_band_rejected() {
        let config = EngineConfig {
            yoy_lookback: DayBand::new(400, 300),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_cap_rejected() {
        let config = EngineConfig {
            max_ttm: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = EngineConfig::from_json(
            r#"{"max_quarters": 20, "annual_band": {"min": 340, "max": 375}}"#,
        )
        .unwrap();

        assert_eq!(config.max_quarters, 20);
        assert_eq!(config.annual_band, DayBand::new(340, 375));
        assert_eq!(config.quarterly_band, DayBand::new(70, 120));
        assert_eq!(config.max_growth, 36);
    }

    #[test]
    fn test_from_json_malformed() {
        let result = EngineConfig::from_json(r#"{"max_quarters": "forty"}"#);
        let err = result.unwrap_err();
        assert!(matches!(err, DataError::Serialization(_)));
    }

    #[test]
    fn test_from_json_validates() {
        let err = EngineConfig::from_json(r#"{"max_growth": 0}"#).unwrap_err();
        assert!(matches!(err, DataError::InvalidConfig(_)));
    }
}
