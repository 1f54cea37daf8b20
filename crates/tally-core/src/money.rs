//! Exact money arithmetic
//!
//! Monetary values are `rust_decimal::Decimal` everywhere. Inputs are parsed
//! via their string representation so binary floating point never touches an
//! amount, and every figure that leaves the library passes through
//! [`quantize_cents`] for stable, reproducible totals.

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Parse a string into an exact decimal.
pub fn to_decimal(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| Error::NumericConversion(raw.to_string()))
}

/// Convert a JSON value into an exact decimal.
///
/// Numbers go through their decimal string rendering, never through their
/// f64 bit pattern; strings parse directly. Anything else is an error.
pub fn decimal_from_value(value: &Value) -> Result<Decimal> {
    match value {
        Value::Number(n) => to_decimal(&n.to_string()),
        Value::String(s) => to_decimal(s),
        other => Err(Error::NumericConversion(other.to_string())),
    }
}

/// Round to two decimal places (cents) using half-up rounding.
///
/// Ties round away from zero: 0.125 becomes 0.13, not 0.12. The result
/// always carries scale 2, so its string form is two-decimal.
pub fn quantize_cents(value: Decimal) -> Decimal {
    let mut cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    cents
}

/// Add two monetary amounts and return the sum quantized to cents.
pub fn add(a: Decimal, b: Decimal) -> Decimal {
    quantize_cents(a + b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_to_decimal() {
        assert_eq!(to_decimal("123.45").unwrap(), dec!(123.45));
        assert_eq!(to_decimal("-0.01").unwrap(), dec!(-0.01));
        assert_eq!(to_decimal(" 19.999 ").unwrap(), dec!(19.999));
        assert!(to_decimal("twelve").is_err());
    }

    #[test]
    fn test_to_decimal_scientific() {
        assert_eq!(to_decimal("1.5e2").unwrap(), dec!(150));
    }

    #[test]
    fn test_decimal_from_value() {
        assert_eq!(decimal_from_value(&json!(15.49)).unwrap(), dec!(15.49));
        assert_eq!(decimal_from_value(&json!("15.49")).unwrap(), dec!(15.49));
        assert_eq!(decimal_from_value(&json!(-3)).unwrap(), dec!(-3));
        assert!(decimal_from_value(&json!(["15.49"])).is_err());
    }

    #[test]
    fn test_quantize_half_up_not_bankers() {
        // Bankers rounding would give 0.12 here
        assert_eq!(quantize_cents(dec!(0.125)).to_string(), "0.13");
        assert_eq!(quantize_cents(dec!(-0.125)).to_string(), "-0.13");
        assert_eq!(quantize_cents(dec!(0.124)).to_string(), "0.12");
    }

    #[test]
    fn test_quantize_forces_two_decimal_string() {
        assert_eq!(quantize_cents(dec!(100)).to_string(), "100.00");
        assert_eq!(quantize_cents(dec!(0)).to_string(), "0.00");
        assert_eq!(quantize_cents(dec!(19.999)).to_string(), "20.00");
    }

    #[test]
    fn test_add_quantizes() {
        assert_eq!(add(dec!(0.1), dec!(0.025)).to_string(), "0.13");
    }
}
