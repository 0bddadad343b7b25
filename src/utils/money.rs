//! Decimal helpers for monetary amounts and rates

use bigdecimal::{BigDecimal, RoundingMode};

pub fn zero() -> BigDecimal {
    BigDecimal::from(0)
}

/// Round to cents, half away from zero
pub fn round2(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(2, RoundingMode::HalfUp)
}

/// Convert an extracted float into a decimal, treating absent and
/// non-finite values as zero.
///
/// Goes through the shortest decimal representation of the float, so
/// `0.1` becomes exactly `0.1` rather than its binary expansion.
pub fn from_f64(value: Option<f64>) -> BigDecimal {
    match value {
        Some(v) if v.is_finite() => v.to_string().parse().unwrap_or_else(|_| zero()),
        _ => zero(),
    }
}

/// `base * rate_percent / 100`, unrounded
pub fn percent_of(base: &BigDecimal, rate_percent: &BigDecimal) -> BigDecimal {
    (base * rate_percent) / BigDecimal::from(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round2_half_up() {
        assert_eq!(round2(&dec("0.125")), dec("0.13"));
        assert_eq!(round2(&dec("-0.125")), dec("-0.13"));
        assert_eq!(round2(&dec("150000.003")), dec("150000.00"));
        assert_eq!(round2(&dec("7")).to_string(), "7.00");
    }

    #[test]
    fn test_from_f64_defaults() {
        assert_eq!(from_f64(None), zero());
        assert_eq!(from_f64(Some(f64::NAN)), zero());
        assert_eq!(from_f64(Some(f64::INFINITY)), zero());
        assert_eq!(from_f64(Some(0.1)), dec("0.1"));
        assert_eq!(from_f64(Some(121.0)), dec("121"));
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(&dec("200"), &dec("3.5")), dec("7"));
        assert_eq!(percent_of(&dec("200"), &dec("1.75")), dec("3.5"));
    }
}
