//! Numeric coercion at the input boundary
//!
//! Partially-filled forms must never crash the projection. The lenient helpers
//! map anything unusable to `0.0`; the strict helpers report why a value was
//! rejected so an editor can flag the field instead.

use crate::error::ParseError;
use serde::{Deserialize, Deserializer};

/// Replace NaN and infinities with zero
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Lenient parse: empty, malformed or non-finite input becomes `0.0`
pub fn coerce_amount(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .map(finite_or_zero)
        .unwrap_or(0.0)
}

/// Strict parse of a finite number (negative values allowed, e.g. growth rates)
pub fn parse_rate(input: &str) -> Result<f64, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| ParseError::NotANumber(trimmed.to_string()))?;

    if !value.is_finite() {
        return Err(ParseError::NotFinite(trimmed.to_string()));
    }

    Ok(value)
}

/// Strict parse of a finite, non-negative number (monthly amounts)
pub fn parse_non_negative(input: &str) -> Result<f64, ParseError> {
    let value = parse_rate(input)?;
    if value < 0.0 {
        return Err(ParseError::Negative(value));
    }
    Ok(value)
}

/// Clamp a monthly amount: non-finite and negative values become `0.0`
pub fn non_negative_or_zero(value: f64) -> f64 {
    let value = finite_or_zero(value);
    if value < 0.0 {
        log::warn!("Negative amount {} treated as 0", value);
        return 0.0;
    }
    value
}

/// Lenient parse of a monthly amount: blank, malformed, non-finite and
/// negative input all become `0.0`
pub fn coerce_non_negative(input: &str) -> f64 {
    match parse_non_negative(input) {
        Ok(value) => value,
        Err(ParseError::Empty) => 0.0,
        Err(err) => {
            log::warn!("Amount treated as 0: {}", err);
            0.0
        }
    }
}

/// Raw JSON shapes a stored numeric field may take
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
    Missing(Option<()>),
}

/// Serde adapter for numeric fields written by loosely-typed editors.
///
/// Accepts numbers, numeric strings and `null`. Blank or malformed strings and
/// `null` become `0.0`; other JSON types are rejected.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match LooseNumber::deserialize(deserializer)? {
        LooseNumber::Number(n) => finite_or_zero(n),
        LooseNumber::Text(s) => coerce_amount(&s),
        LooseNumber::Missing(_) => 0.0,
    };
    Ok(value)
}

/// Serde adapter for monthly amounts: as [`lenient_number`], with negative
/// values clamped to `0.0`
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_number(deserializer).map(non_negative_or_zero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_amount() {
        assert_eq!(coerce_amount("1500"), 1500.0);
        assert_eq!(coerce_amount("  12.5 "), 12.5);
        assert_eq!(coerce_amount(""), 0.0);
        assert_eq!(coerce_amount("abc"), 0.0);
        assert_eq!(coerce_amount("NaN"), 0.0);
        assert_eq!(coerce_amount("inf"), 0.0);
        assert_eq!(coerce_amount("-3"), -3.0);
    }

    #[test]
    fn test_parse_non_negative() {
        assert_eq!(parse_non_negative("250"), Ok(250.0));
        assert_eq!(parse_non_negative("0"), Ok(0.0));
        assert_eq!(parse_non_negative(""), Err(ParseError::Empty));
        assert_eq!(parse_non_negative("-1"), Err(ParseError::Negative(-1.0)));
        assert!(matches!(parse_non_negative("ten"), Err(ParseError::NotANumber(_))));
        assert!(matches!(parse_non_negative("NaN"), Err(ParseError::NotFinite(_))));
    }

    #[test]
    fn test_coerce_non_negative() {
        assert_eq!(coerce_non_negative("800"), 800.0);
        assert_eq!(coerce_non_negative(" 0.5 "), 0.5);
        assert_eq!(coerce_non_negative("-500"), 0.0);
        assert_eq!(coerce_non_negative(""), 0.0);
        assert_eq!(coerce_non_negative("n/a"), 0.0);
        assert_eq!(coerce_non_negative("inf"), 0.0);
    }

    #[test]
    fn test_non_negative_or_zero() {
        assert_eq!(non_negative_or_zero(42.0), 42.0);
        assert_eq!(non_negative_or_zero(-700.0), 0.0);
        assert_eq!(non_negative_or_zero(f64::NEG_INFINITY), 0.0);
        assert_eq!(non_negative_or_zero(f64::NAN), 0.0);
    }

    #[test]
    fn test_parse_rate_allows_negative() {
        assert_eq!(parse_rate("-2.5"), Ok(-2.5));
        assert_eq!(parse_rate(" 5 "), Ok(5.0));
    }

    #[test]
    fn test_lenient_number_shapes() {
        #[derive(Deserialize)]
        struct Field {
            #[serde(default, deserialize_with = "lenient_number")]
            value: f64,
        }

        let parse = |json: &str| serde_json::from_str::<Field>(json).unwrap().value;

        assert_eq!(parse(r#"{"value": 42}"#), 42.0);
        assert_eq!(parse(r#"{"value": "42.5"}"#), 42.5);
        assert_eq!(parse(r#"{"value": ""}"#), 0.0);
        assert_eq!(parse(r#"{"value": null}"#), 0.0);
        assert_eq!(parse(r#"{}"#), 0.0);
    }

    #[test]
    fn test_lenient_amount_clamps_negatives() {
        #[derive(Deserialize)]
        struct Field {
            #[serde(default, deserialize_with = "lenient_amount")]
            amount: f64,
        }

        let parse = |json: &str| serde_json::from_str::<Field>(json).unwrap().amount;

        assert_eq!(parse(r#"{"amount": -250}"#), 0.0);
        assert_eq!(parse(r#"{"amount": "-3"}"#), 0.0);
        assert_eq!(parse(r#"{"amount": "75"}"#), 75.0);
        assert_eq!(parse(r#"{}"#), 0.0);
    }
}
