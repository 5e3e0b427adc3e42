//! Progress percentages.
//!
//! Two conventions coexist and are kept separate:
//! - progress toward a gain target, measured from the birth value;
//! - progress relative to the WHO average at the child's current age.
//!
//! Both return a whole percentage in `0..=100` and never fail. Non-finite
//! inputs are treated as zero.

use crate::core::lookup::lookup;
use crate::domain::model::{Measurement, Metric, ProgressResult, Sex};
use crate::domain::ports::StandardsSource;
use crate::utils::numeric::{clamp_percentage, sanitize};

/// How far `current` has moved from `birth` toward `birth + target_gain`.
///
/// A non-positive target gain counts as already met and yields 100.
pub fn progress_toward_target(birth: f64, current: f64, target_gain: f64) -> u8 {
    let birth = sanitize(birth);
    let current = sanitize(current);
    let target_gain = sanitize(target_gain);

    let total_target = birth + target_gain;
    if birth >= total_target {
        return 100;
    }

    clamp_percentage(100.0 * (current - birth) / (total_target - birth))
}

/// Same as [`progress_toward_target`], with the inputs and deltas attached.
pub fn progress_result(birth: f64, current: f64, target_gain: f64) -> ProgressResult {
    let birth_value = sanitize(birth);
    let current_total = sanitize(current);
    let expected_growth = sanitize(target_gain);

    ProgressResult {
        percentage: progress_toward_target(birth_value, current_total, expected_growth),
        current_total,
        target: birth_value + expected_growth,
        birth_value,
        expected_growth,
        actual_growth: current_total - birth_value,
    }
}

/// `current` as a share of the standard value for `metric` at `age_months`.
///
/// A measurement whose unit does not fit the metric counts as zero. A
/// non-positive standard value (only possible with custom tables) yields 100.
pub fn progress_relative_to_standard<S: StandardsSource + ?Sized>(
    source: &S,
    current: Measurement,
    age_months: f64,
    sex: Sex,
    metric: Metric,
) -> u8 {
    let current_value = if current.unit.fits(metric) {
        sanitize(current.in_standard_units())
    } else {
        tracing::warn!(
            "{} given in {}, which does not fit; treating as 0",
            metric,
            current.unit
        );
        0.0
    };

    let standard = lookup(source, age_months, sex).value(metric);
    if standard <= 0.0 {
        return 100;
    }

    clamp_percentage(100.0 * current_value / standard)
}
