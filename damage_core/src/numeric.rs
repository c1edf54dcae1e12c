//! Exact decimal conversion and rounding
//!
//! Every quantity that can reach final damage is a [`StatValue`]. Floating
//! point is only accepted at this boundary, where it is converted through its
//! shortest round-trip text so `0.1` becomes exactly `0.1`.

use crate::error::{CalcError, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Exact decimal number used for every stat and damage value
pub type StatValue = Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A raw numeric input before conversion
#[derive(Debug, Clone, PartialEq)]
pub enum NumericInput {
    Integer(i64),
    Float(f64),
    Text(String),
    Exact(Decimal),
}

impl From<i64> for NumericInput {
    fn from(v: i64) -> Self {
        NumericInput::Integer(v)
    }
}

impl From<i32> for NumericInput {
    fn from(v: i32) -> Self {
        NumericInput::Integer(v as i64)
    }
}

impl From<u32> for NumericInput {
    fn from(v: u32) -> Self {
        NumericInput::Integer(v as i64)
    }
}

impl From<f64> for NumericInput {
    fn from(v: f64) -> Self {
        NumericInput::Float(v)
    }
}

impl From<&str> for NumericInput {
    fn from(v: &str) -> Self {
        NumericInput::Text(v.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(v: String) -> Self {
        NumericInput::Text(v)
    }
}

impl From<Decimal> for NumericInput {
    fn from(v: Decimal) -> Self {
        NumericInput::Exact(v)
    }
}

/// Convert an integer, float, numeric string or decimal into an exact value
pub fn to_exact(value: impl Into<NumericInput>) -> Result<StatValue> {
    match value.into() {
        NumericInput::Exact(d) => Ok(d),
        NumericInput::Integer(i) => Ok(Decimal::from(i)),
        NumericInput::Float(f) => {
            if !f.is_finite() {
                return Err(CalcError::InvalidNumericInput(f.to_string()));
            }
            parse_text(&f.to_string())
        }
        NumericInput::Text(s) => parse_text(&s),
    }
}

fn parse_text(text: &str) -> Result<StatValue> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CalcError::InvalidNumericInput(text.to_string()));
    }

    if trimmed.contains(['e', 'E']) {
        return Decimal::from_scientific(trimmed)
            .map_err(|_| CalcError::InvalidNumericInput(text.to_string()));
    }

    Decimal::from_str(trimmed).map_err(|_| CalcError::InvalidNumericInput(text.to_string()))
}

/// Truncate toward zero to a whole unit
///
/// This is the final-damage rounding rule: `100.5 → 100`, `0.5 → 0`,
/// `-2.7 → -2`.
pub fn round_down(value: StatValue) -> StatValue {
    value.trunc()
}

/// Convert a percent-unit value into a fraction (`42 → 0.42`)
pub fn percent(value: StatValue) -> StatValue {
    value / HUNDRED
}

/// Sum of `terms`, failing with [`CalcError::Overflow`] for `label`
pub fn sum(label: &str, terms: &[StatValue]) -> Result<StatValue> {
    terms
        .iter()
        .try_fold(Decimal::ZERO, |acc, term| acc.checked_add(*term))
        .ok_or_else(|| CalcError::Overflow(label.to_string()))
}

/// Product of `factors`, failing with [`CalcError::Overflow`] for `label`
pub fn product(label: &str, factors: &[StatValue]) -> Result<StatValue> {
    factors
        .iter()
        .try_fold(Decimal::ONE, |acc, factor| acc.checked_mul(*factor))
        .ok_or_else(|| CalcError::Overflow(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_integer_to_exact() {
        assert_eq!(to_exact(100).unwrap(), dec!(100));
        assert_eq!(to_exact(-100i64).unwrap(), dec!(-100));
        assert_eq!(to_exact(0).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_float_goes_through_text() {
        assert_eq!(to_exact(3.14).unwrap(), dec!(3.14));
        assert_eq!(to_exact(0.1).unwrap(), dec!(0.1));
    }

    #[test]
    fn test_string_to_exact() {
        assert_eq!(to_exact("42.5").unwrap(), dec!(42.5));
        assert_eq!(to_exact(" 7 ").unwrap(), dec!(7));
        assert_eq!(
            to_exact("1234.567890123456789").unwrap(),
            dec!(1234.567890123456789)
        );
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(to_exact("1.5E+3").unwrap(), dec!(1500));
        assert_eq!(to_exact("2e2").unwrap(), dec!(200));
    }

    #[test]
    fn test_decimal_passthrough() {
        let original = dec!(123.456);
        assert_eq!(to_exact(original).unwrap(), original);
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert!(matches!(
            to_exact("abc"),
            Err(CalcError::InvalidNumericInput(_))
        ));
        assert!(matches!(to_exact(""), Err(CalcError::InvalidNumericInput(_))));
        assert!(matches!(
            to_exact(f64::NAN),
            Err(CalcError::InvalidNumericInput(_))
        ));
        assert!(matches!(
            to_exact(f64::INFINITY),
            Err(CalcError::InvalidNumericInput(_))
        ));
    }

    #[test]
    fn test_round_down_truncates() {
        assert_eq!(round_down(dec!(100.5)), dec!(100));
        assert_eq!(round_down(dec!(0.5)), Decimal::ZERO);
        assert_eq!(round_down(dec!(5000.9)), dec!(5000));
        assert_eq!(round_down(dec!(-2.7)), dec!(-2));
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(dec!(42)), dec!(0.42));
        assert_eq!(percent(dec!(3.5)), dec!(0.035));
    }

    #[test]
    fn test_sum_and_product() {
        assert_eq!(sum("x", &[dec!(1.5), dec!(2), dec!(-0.5)]).unwrap(), dec!(3));
        assert_eq!(sum("x", &[]).unwrap(), Decimal::ZERO);
        assert_eq!(product("x", &[dec!(1.5), dec!(2), dec!(-3)]).unwrap(), dec!(-9));
        assert_eq!(product("x", &[]).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert_eq!(
            sum("Total", &[Decimal::MAX, Decimal::ONE]),
            Err(CalcError::Overflow("Total".to_string()))
        );
        assert_eq!(
            product("Total", &[Decimal::MAX, dec!(2)]),
            Err(CalcError::Overflow("Total".to_string()))
        );
        assert_eq!(sum("Total", &[Decimal::MAX, Decimal::MIN]).unwrap(), Decimal::ZERO);
    }

    proptest! {
        #[test]
        fn round_down_is_idempotent(units in -1_000_000_000i64..1_000_000_000, scale in 0u32..6) {
            let value = Decimal::new(units, scale);
            let once = round_down(value);
            prop_assert_eq!(round_down(once), once);
            prop_assert!(once.abs() <= value.abs());
        }
    }
}
