//! Monetary rounding shared by every statement field

use rust_decimal::{Decimal, RoundingStrategy};

/// Fraction digits carried by every amount and balance
pub const MONEY_SCALE: u32 = 2;

/// Round to [`MONEY_SCALE`] fraction digits with round-half-even and pad
/// shorter values, so `12.3` becomes `12.30` and `12.345` becomes `12.34`.
///
/// Values with more than 26 integer digits have no room for the padding and
/// keep a smaller scale; use [`try_quantize`] where that must be rejected.
pub fn quantize(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// [`quantize`], or `None` when the result cannot carry exactly
/// [`MONEY_SCALE`] fraction digits.
pub fn try_quantize(value: Decimal) -> Option<Decimal> {
    let rounded = quantize(value);
    (rounded.scale() == MONEY_SCALE).then_some(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pads_short_values() {
        assert_eq!(quantize(dec!(12.3)).to_string(), "12.30");
        assert_eq!(quantize(dec!(7)).to_string(), "7.00");
        assert_eq!(quantize(dec!(-50)).to_string(), "-50.00");
    }

    #[test]
    fn test_rounds_half_to_even() {
        assert_eq!(quantize(dec!(12.345)).to_string(), "12.34");
        assert_eq!(quantize(dec!(12.355)).to_string(), "12.36");
        assert_eq!(quantize(dec!(-0.125)).to_string(), "-0.12");
        assert_eq!(quantize(dec!(12.3451)).to_string(), "12.35");
    }

    #[test]
    fn test_try_quantize_rejects_values_without_room() {
        assert_eq!(try_quantize(Decimal::MAX), None);
        assert_eq!(try_quantize(Decimal::MIN), None);
        assert_eq!(try_quantize(dec!(12.3)).map(|d| d.to_string()), Some("12.30".to_string()));
    }

    #[test]
    fn test_keeps_two_digit_values() {
        assert_eq!(quantize(dec!(950.00)).to_string(), "950.00");
        assert_eq!(quantize(dec!(-1234.56)).to_string(), "-1234.56");
    }
}
