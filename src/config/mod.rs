#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::GainBandBasis;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive, validate_range, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WEEKS_PER_MONTH: f64 = 4.3;
pub const DEFAULT_GAIN_BAND_TOLERANCE: f64 = 0.15;
pub const DEFAULT_WEIGHT_RANGE_TOLERANCE: f64 = 0.10;
pub const DEFAULT_LENGTH_RANGE_TOLERANCE: f64 = 0.05;

/// Calculation tunables, passed explicitly to every engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationSettings {
    pub weeks_per_month: f64,
    pub gain_band_tolerance: f64,
    pub weight_range_tolerance: f64,
    pub length_range_tolerance: f64,
    pub gain_band_basis: GainBandBasis,
}

impl Default for CalculationSettings {
    fn default() -> Self {
        Self {
            weeks_per_month: DEFAULT_WEEKS_PER_MONTH,
            gain_band_tolerance: DEFAULT_GAIN_BAND_TOLERANCE,
            weight_range_tolerance: DEFAULT_WEIGHT_RANGE_TOLERANCE,
            length_range_tolerance: DEFAULT_LENGTH_RANGE_TOLERANCE,
            gain_band_basis: GainBandBasis::Legacy,
        }
    }
}

impl ConfigProvider for CalculationSettings {
    fn weeks_per_month(&self) -> f64 {
        self.weeks_per_month
    }

    fn gain_band_tolerance(&self) -> f64 {
        self.gain_band_tolerance
    }

    fn weight_range_tolerance(&self) -> f64 {
        self.weight_range_tolerance
    }

    fn length_range_tolerance(&self) -> f64 {
        self.length_range_tolerance
    }

    fn gain_band_basis(&self) -> GainBandBasis {
        self.gain_band_basis
    }
}

impl Validate for CalculationSettings {
    fn validate(&self) -> Result<()> {
        validate_positive("calculation.weeks_per_month", self.weeks_per_month)?;
        validate_range("calculation.weeks_per_month", self.weeks_per_month, 0.0, 10.0)?;
        validate_range("calculation.gain_band_tolerance", self.gain_band_tolerance, 0.0, 1.0)?;
        validate_range(
            "calculation.weight_range_tolerance",
            self.weight_range_tolerance,
            0.0,
            1.0,
        )?;
        validate_range(
            "calculation.length_range_tolerance",
            self.length_range_tolerance,
            0.0,
            1.0,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = CalculationSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.weeks_per_month(), 4.3);
        assert_eq!(settings.gain_band_basis(), GainBandBasis::Legacy);
    }

    #[test]
    fn test_out_of_range_settings() {
        let settings = CalculationSettings {
            weeks_per_month: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = CalculationSettings {
            gain_band_tolerance: 1.5,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
