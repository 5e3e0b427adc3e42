use crate::domain::model::{GrowthStandardRow, Sex};
use crate::domain::ports::StandardsSource;
use crate::utils::numeric::sanitize;

pub const MAX_TABLE_AGE_MONTHS: f64 = 12.0;

/// Standard row for `age_months`, exact or linearly interpolated.
///
/// Ages are clamped to `0..=12`; anything older reuses the 12-month row.
/// Never panics, even on an empty or malformed table.
pub fn lookup<S: StandardsSource + ?Sized>(
    source: &S,
    age_months: f64,
    sex: Sex,
) -> GrowthStandardRow {
    let rows = source.rows(sex);
    let age = clamp_age(age_months);

    if let Some(exact) = rows.iter().find(|r| r.age_months == age) {
        return *exact;
    }

    let lower = rows
        .iter()
        .filter(|r| r.age_months < age)
        .max_by(|a, b| a.age_months.total_cmp(&b.age_months));
    let upper = rows
        .iter()
        .filter(|r| r.age_months > age)
        .min_by(|a, b| a.age_months.total_cmp(&b.age_months));

    match (lower, upper) {
        (Some(lower), Some(upper)) => interpolate(lower, upper, age),
        (Some(only), None) | (None, Some(only)) => {
            tracing::debug!(
                "No bracketing pair for age {} ({}), using row at {}",
                age,
                sex,
                only.age_months
            );
            *only
        }
        (None, None) => match rows.first() {
            Some(first) => *first,
            None => {
                tracing::warn!("Empty standards table for {}, returning zero row", sex);
                GrowthStandardRow::new(0.0, 0.0, 0.0, 0.0)
            }
        },
    }
}

fn clamp_age(age_months: f64) -> f64 {
    let age = sanitize(age_months);
    if age > MAX_TABLE_AGE_MONTHS {
        tracing::debug!("Age {} beyond table range, using {} months", age, MAX_TABLE_AGE_MONTHS);
    }
    age.clamp(0.0, MAX_TABLE_AGE_MONTHS)
}

fn interpolate(lower: &GrowthStandardRow, upper: &GrowthStandardRow, age: f64) -> GrowthStandardRow {
    let span = upper.age_months - lower.age_months;
    let ratio = if span > 0.0 {
        (age - lower.age_months) / span
    } else {
        0.0
    };
    let lerp = |a: f64, b: f64| a + (b - a) * ratio;

    GrowthStandardRow {
        age_months: age,
        weight_kg: lerp(lower.weight_kg, upper.weight_kg),
        height_cm: lerp(lower.height_cm, upper.height_cm),
        head_circ_cm: lerp(lower.head_circ_cm, upper.head_circ_cm),
    }
}
