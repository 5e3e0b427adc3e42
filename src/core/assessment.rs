use crate::core::expected::expected_gain_since_birth;
use crate::core::progress::progress_result;
use crate::core::recommendation::build_recommendations;
use crate::domain::model::{
    GrowthAssessment, GrowthRecord, GrowthStatus, Measurement, Metric, MetricAssessment,
};
use crate::domain::ports::{ConfigProvider, StandardsSource};
use crate::utils::numeric::or_zero;
use chrono::NaiveDate;

/// Grades a measurement history as of `on`.
///
/// Measurements dated after `on` are ignored.
///
/// Progress compares the latest value with the cumulative WHO gain since
/// birth. Status compares the gain over the last interval, scaled to the
/// band's period, with the recommended band. Anything missing degrades to
/// [`GrowthStatus::Unknown`] instead of failing.
pub fn assess_record<S, C>(
    source: &S,
    config: &C,
    record: &GrowthRecord,
    on: NaiveDate,
) -> GrowthAssessment
where
    S: StandardsSource + ?Sized,
    C: ConfigProvider + ?Sized,
{
    let age_months = record.age_in_months(on);
    let bundle = build_recommendations(source, config, age_months, record.sex);

    let metrics: Vec<MetricAssessment> = Metric::ALL
        .iter()
        .map(|&metric| {
            let band = bundle.gain_band(metric);
            let birth = gain_units(record.birth_value(metric), metric);
            let latest = record.latest(metric, on);
            let current = gain_units(latest.map(|(_, m)| m), metric);
            let target_gain = expected_gain_since_birth(source, age_months, record.sex, metric);
            let progress = progress_result(or_zero(birth), or_zero(current), target_gain);

            let observed_gain = match (record.previous(metric, on), latest) {
                (Some((from, previous)), Some((to, latest))) => {
                    let days = (to - from).num_days();
                    match (gain_units(Some(previous), metric), gain_units(Some(latest), metric)) {
                        (Some(a), Some(b)) if days > 0 => {
                            let period_days = band.period.days(config.weeks_per_month());
                            Some((b - a) * period_days / days as f64)
                        }
                        _ => None,
                    }
                }
                _ => None,
            };

            let status = match observed_gain {
                Some(_) if band.expected <= 0 => GrowthStatus::Unknown,
                Some(gain) => band.classify(gain),
                None => GrowthStatus::Unknown,
            };

            tracing::debug!(
                "{}: progress {}%, observed {:?} per {:?}, status {}",
                metric,
                progress.percentage,
                observed_gain,
                band.period,
                status
            );

            MetricAssessment {
                metric,
                progress,
                observed_gain,
                band,
                status,
            }
        })
        .collect();

    let overall = GrowthStatus::worst(metrics.iter().map(|m| m.status));

    GrowthAssessment {
        sex: record.sex,
        age_months,
        age_group: bundle.age_group,
        metrics,
        overall,
    }
}

fn gain_units(measurement: Option<Measurement>, metric: Metric) -> Option<f64> {
    let measurement = measurement?;
    if !measurement.unit.fits(metric) {
        tracing::warn!("Ignoring {} recorded in {}", metric, measurement.unit);
        return None;
    }
    let value = measurement.in_gain_units();
    value.is_finite().then_some(value)
}
