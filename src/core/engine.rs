use crate::config::CalculationSettings;
use crate::core::standards::WhoStandards;
use crate::core::{assessment, expected, lookup, progress, recommendation};
use crate::domain::model::{
    ExpectedGrowth, GrowthAssessment, GrowthRecord, GrowthStandardRow, Measurement, Metric,
    ProgressResult, RecommendationBundle, Sex,
};
use crate::domain::ports::{ConfigProvider, StandardsSource};
use chrono::NaiveDate;

/// Binds a standards table and calculation settings together.
pub struct GrowthEngine<S: StandardsSource, C: ConfigProvider> {
    standards: S,
    config: C,
}

impl GrowthEngine<WhoStandards, CalculationSettings> {
    pub fn who() -> Self {
        Self::new(WhoStandards, CalculationSettings::default())
    }
}

impl<S: StandardsSource, C: ConfigProvider> GrowthEngine<S, C> {
    pub fn new(standards: S, config: C) -> Self {
        Self { standards, config }
    }

    pub fn standards(&self) -> &S {
        &self.standards
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn table(&self, sex: Sex) -> &[GrowthStandardRow] {
        self.standards.rows(sex)
    }

    pub fn lookup(&self, age_months: f64, sex: Sex) -> GrowthStandardRow {
        let row = lookup::lookup(&self.standards, age_months, sex);
        tracing::debug!("lookup({}, {}) -> {:?}", age_months, sex, row);
        row
    }

    pub fn expected_monthly_growth(&self, age_months: f64, sex: Sex) -> ExpectedGrowth {
        let growth = expected::expected_monthly_growth(&self.standards, age_months, sex);
        tracing::debug!("expected_monthly_growth({}, {}) -> {:?}", age_months, sex, growth);
        growth
    }

    pub fn progress_toward_target(&self, birth: f64, current: f64, target_gain: f64) -> u8 {
        progress::progress_toward_target(birth, current, target_gain)
    }

    pub fn progress_result(&self, birth: f64, current: f64, target_gain: f64) -> ProgressResult {
        progress::progress_result(birth, current, target_gain)
    }

    pub fn progress_relative_to_standard(
        &self,
        current: Measurement,
        age_months: f64,
        sex: Sex,
        metric: Metric,
    ) -> u8 {
        progress::progress_relative_to_standard(&self.standards, current, age_months, sex, metric)
    }

    pub fn build_recommendations(&self, age_months: f64, sex: Sex) -> RecommendationBundle {
        recommendation::build_recommendations(&self.standards, &self.config, age_months, sex)
    }

    pub fn assess_record(&self, record: &GrowthRecord, on: NaiveDate) -> GrowthAssessment {
        let assessment = assessment::assess_record(&self.standards, &self.config, record, on);
        tracing::debug!(
            "Assessed {} record at {:.2} months: {}",
            record.sex,
            assessment.age_months,
            assessment.overall
        );
        assessment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::standards::TableStandards;
    use crate::domain::model::GainBandBasis;

    #[test]
    fn test_who_engine_matches_free_functions() {
        let engine = GrowthEngine::who();
        assert_eq!(engine.lookup(6.0, Sex::Male).weight_kg, 7.9);
        assert_eq!(engine.expected_monthly_growth(2.0, Sex::Male).weight_g, 1100);
        assert_eq!(engine.progress_toward_target(3300.0, 4300.0, 1200.0), 83);
        assert_eq!(engine.table(Sex::Female).len(), 13);
    }

    #[test]
    fn test_engine_with_custom_table_and_settings() {
        let rows = vec![
            GrowthStandardRow::new(0.0, 3.0, 50.0, 35.0),
            GrowthStandardRow::new(12.0, 9.0, 74.0, 45.0),
        ];
        let table = TableStandards::new(rows.clone(), rows).unwrap();
        let settings = CalculationSettings {
            gain_band_basis: GainBandBasis::Weekly,
            weeks_per_month: 4.0,
            ..Default::default()
        };
        let engine = GrowthEngine::new(table, settings);

        // 0.5 kg a month anywhere on the line
        assert_eq!(engine.expected_monthly_growth(6.0, Sex::Male).weight_g, 500);
        let bundle = engine.build_recommendations(6.0, Sex::Male);
        assert_eq!(bundle.weight_gain.expected, 125);
        // 2 cm a month -> 20 mm / 4 weeks
        assert_eq!(bundle.height_gain.expected, 5);
    }

    #[test]
    fn test_boxed_source() {
        let boxed: Box<dyn StandardsSource> = Box::new(WhoStandards);
        let engine = GrowthEngine::new(boxed, CalculationSettings::default());
        assert_eq!(engine.lookup(12.0, Sex::Female).height_cm, 74.0);
    }
}
