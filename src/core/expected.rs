use crate::core::lookup::lookup;
use crate::domain::model::{ExpectedGrowth, Metric, Sex};
use crate::domain::ports::StandardsSource;
use crate::utils::numeric::{round_half_up, sanitize};

/// Expected gain over the month ending at `age_months`, in g and mm.
pub fn expected_monthly_growth<S: StandardsSource + ?Sized>(
    source: &S,
    age_months: f64,
    sex: Sex,
) -> ExpectedGrowth {
    let age = sanitize(age_months);
    let current = lookup(source, age, sex);
    let previous = lookup(source, (age - 1.0).max(0.0), sex);

    let delta = |metric: Metric| {
        let raw = (current.value(metric) - previous.value(metric)) * metric.gain_factor();
        round_half_up(raw) as i64
    };

    ExpectedGrowth {
        weight_g: delta(Metric::Weight),
        height_mm: delta(Metric::Height),
        head_circ_mm: delta(Metric::HeadCircumference),
    }
}

/// Cumulative expected gain since birth, in g or mm. Not rounded.
pub fn expected_gain_since_birth<S: StandardsSource + ?Sized>(
    source: &S,
    age_months: f64,
    sex: Sex,
    metric: Metric,
) -> f64 {
    let at_birth = lookup(source, 0.0, sex).value(metric);
    let now = lookup(source, age_months, sex).value(metric);
    (now - at_birth) * metric.gain_factor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::standards::WhoStandards;
    use approx::assert_relative_eq;

    #[test]
    fn test_expected_growth_at_two_months() {
        let growth = expected_monthly_growth(&WhoStandards, 2.0, Sex::Male);
        assert_eq!(
            growth,
            ExpectedGrowth {
                weight_g: 1100,
                height_mm: 37,
                head_circ_mm: 20,
            }
        );
    }

    #[test]
    fn test_expected_growth_at_birth_is_zero() {
        let growth = expected_monthly_growth(&WhoStandards, 0.0, Sex::Female);
        assert_eq!(growth.weight_g, 0);
        assert_eq!(growth.height_mm, 0);
        assert_eq!(growth.head_circ_mm, 0);
    }

    #[test]
    fn test_expected_growth_at_half_month() {
        // compares the interpolated half-month row with the birth row
        let growth = expected_monthly_growth(&WhoStandards, 0.5, Sex::Male);
        assert_eq!(growth.weight_g, 600);
        assert_eq!(growth.height_mm, 24);
        assert_eq!(growth.head_circ_mm, 13);
    }

    #[test]
    fn test_expected_growth_beyond_table_is_zero() {
        // both ages clamp to the 12-month row
        let growth = expected_monthly_growth(&WhoStandards, 20.0, Sex::Male);
        assert_eq!(growth.weight_g, 0);
    }

    #[test]
    fn test_gain_since_birth() {
        let gain = expected_gain_since_birth(&WhoStandards, 6.0, Sex::Male, Metric::Weight);
        assert_relative_eq!(gain, 4600.0, epsilon = 1e-6);
        let gain = expected_gain_since_birth(&WhoStandards, 6.0, Sex::Male, Metric::Height);
        assert_relative_eq!(gain, 177.0, epsilon = 1e-6);
    }
}
