use crate::core::expected::expected_monthly_growth;
use crate::core::lookup::lookup;
use crate::domain::model::{
    AgeGroup, GainBand, GainBandBasis, GainPeriod, Metric, RecommendationBundle, Sex, ValueRange,
};
use crate::domain::ports::{ConfigProvider, StandardsSource};
use crate::utils::numeric::{round_half_up, sanitize};

/// Recommendation ranges for a child of `age_months`.
pub fn build_recommendations<S, C>(
    source: &S,
    config: &C,
    age_months: f64,
    sex: Sex,
) -> RecommendationBundle
where
    S: StandardsSource + ?Sized,
    C: ConfigProvider + ?Sized,
{
    let age = sanitize(age_months);
    let who_standard = lookup(source, age, sex);
    let expected = expected_monthly_growth(source, age, sex);

    let weeks_per_month = config.weeks_per_month();
    let tolerance = config.gain_band_tolerance();
    let basis = config.gain_band_basis();

    let band = |metric: Metric| {
        let monthly = expected.get(metric);
        let weekly = weekly_gain(monthly, weeks_per_month);
        let period = band_period(basis, metric);
        let expected = match period {
            GainPeriod::Weekly => weekly,
            GainPeriod::Monthly => monthly,
        };
        GainBand {
            period,
            expected,
            min: round_half_up(expected as f64 * (1.0 - tolerance)) as i64,
            max: round_half_up(expected as f64 * (1.0 + tolerance)) as i64,
        }
    };

    let weight_tolerance = config.weight_range_tolerance();
    let length_tolerance = config.length_range_tolerance();

    let bundle = RecommendationBundle {
        age_group: AgeGroup::for_age(age),
        who_standard,
        expected_monthly: expected,
        weight_gain: band(Metric::Weight),
        height_gain: band(Metric::Height),
        head_circ_gain: band(Metric::HeadCircumference),
        weight_range: ValueRange::around(who_standard.weight_kg, weight_tolerance),
        height_range: ValueRange::around(who_standard.height_cm, length_tolerance),
        head_circ_range: ValueRange::around(who_standard.head_circ_cm, length_tolerance),
    };

    tracing::debug!(
        "Recommendations for {} at {} months ({}): weight {}-{} g/{:?}",
        sex,
        age,
        bundle.age_group_label(),
        bundle.weight_gain.min,
        bundle.weight_gain.max,
        bundle.weight_gain.period
    );

    bundle
}

pub fn weekly_gain(monthly: i64, weeks_per_month: f64) -> i64 {
    if !(weeks_per_month.is_finite() && weeks_per_month > 0.0) {
        return monthly;
    }
    round_half_up(monthly as f64 / weeks_per_month) as i64
}

/// Weight bands are always weekly; lengths follow the configured basis.
pub fn band_period(basis: GainBandBasis, metric: Metric) -> GainPeriod {
    match (basis, metric) {
        (_, Metric::Weight) => GainPeriod::Weekly,
        (GainBandBasis::Legacy, _) => GainPeriod::Monthly,
        (GainBandBasis::Weekly, _) => GainPeriod::Weekly,
    }
}
