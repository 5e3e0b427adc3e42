#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::{toml_config::TomlConfig, CalculationSettings};
pub use core::engine::GrowthEngine;
pub use core::standards::{TableStandards, WhoStandards};
pub use domain::model::{
    ExpectedGrowth, GainBandBasis, GrowthAssessment, GrowthRecord, GrowthStandardRow,
    GrowthStatus, Measurement, Metric, ProgressResult, RecommendationBundle, Sex, Unit,
};
pub use utils::error::{GrowthError, Result};

use chrono::NaiveDate;

/// WHO standard row for an age in months.
pub fn lookup(age_months: f64, sex: Sex) -> GrowthStandardRow {
    core::lookup::lookup(&WhoStandards, age_months, sex)
}

/// Expected gain over the month ending at `age_months`, WHO table.
pub fn expected_monthly_growth(age_months: f64, sex: Sex) -> ExpectedGrowth {
    core::expected::expected_monthly_growth(&WhoStandards, age_months, sex)
}

/// Percentage of `target_gain` achieved since birth, `0..=100`.
pub fn progress_toward_target(birth: f64, current: f64, target_gain: f64) -> u8 {
    core::progress::progress_toward_target(birth, current, target_gain)
}

/// `current` as a percentage of the WHO value at `age_months`, `0..=100`.
pub fn progress_relative_to_standard(
    current: Measurement,
    age_months: f64,
    sex: Sex,
    metric: Metric,
) -> u8 {
    core::progress::progress_relative_to_standard(&WhoStandards, current, age_months, sex, metric)
}

/// Gain bands and measurement ranges for a child of `age_months`.
pub fn build_recommendations(age_months: f64, sex: Sex) -> RecommendationBundle {
    core::recommendation::build_recommendations(
        &WhoStandards,
        &CalculationSettings::default(),
        age_months,
        sex,
    )
}

/// Grades `record` as of `on` against the WHO tables.
pub fn assess_record(record: &GrowthRecord, on: NaiveDate) -> GrowthAssessment {
    core::assessment::assess_record(&WhoStandards, &CalculationSettings::default(), record, on)
}
