//! Parse-or-zero helpers shared by every calculation.
//!
//! The calculation core never fails on bad numbers: anything missing,
//! non-numeric or non-finite becomes `0.0` before arithmetic.

/// Replaces NaN and infinities with zero.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        tracing::warn!("Non-finite input {} coerced to 0", value);
        0.0
    }
}

/// Missing values count as zero.
pub fn or_zero(value: Option<f64>) -> f64 {
    value.map(sanitize).unwrap_or(0.0)
}

/// Parses user text as a number, falling back to zero.
pub fn parse_or_zero(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) => sanitize(value),
        Err(_) => {
            if !text.trim().is_empty() {
                tracing::warn!("Unparseable number '{}' coerced to 0", text);
            }
            0.0
        }
    }
}

/// Rounds to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounds a raw percentage and clamps it into `0..=100`. NaN maps to 0.
pub fn clamp_percentage(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    round_half_up(raw).clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize(3.5), 3.5);
        assert_eq!(sanitize(f64::NAN), 0.0);
        assert_eq!(sanitize(f64::INFINITY), 0.0);
        assert_eq!(sanitize(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_parse_or_zero() {
        assert_eq!(parse_or_zero("4300"), 4300.0);
        assert_eq!(parse_or_zero(" 3.25 "), 3.25);
        assert_eq!(parse_or_zero(""), 0.0);
        assert_eq!(parse_or_zero("abc"), 0.0);
        assert_eq!(parse_or_zero("NaN"), 0.0);
        assert_eq!(parse_or_zero("inf"), 0.0);
        assert_eq!(or_zero(None), 0.0);
        assert_eq!(or_zero(Some(2.0)), 2.0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(82.5), 83.0);
        assert_eq!(round_half_up(82.49), 82.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-1.5), -1.0);
        assert_eq!(round_half_up(1099.9999999999995), 1100.0);
    }

    #[test]
    fn test_clamp_percentage() {
        assert_eq!(clamp_percentage(-12.0), 0);
        assert_eq!(clamp_percentage(250.0), 100);
        assert_eq!(clamp_percentage(83.33), 83);
        assert_eq!(clamp_percentage(f64::NAN), 0);
        assert_eq!(clamp_percentage(f64::INFINITY), 100);
    }
}
