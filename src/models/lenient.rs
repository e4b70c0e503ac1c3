//! Lenient decoding of values stored inside daily entries.
//!
//! Entries written by older versions lack fields added later, and some were
//! edited by hand, so a number may be missing, `null`, a string, or garbage.
//! Every decoder here degrades to the default instead of failing.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Largest quantity taken at face value; anything beyond reads as missing.
pub const MAX_QUANTITY: i64 = 1_000_000_000;

/// Largest absolute amount taken at face value (R$ 10 trillion).
pub fn max_amount() -> Decimal {
    Decimal::from(10_000_000_000_000_i64)
}

pub fn quantity_in_range(q: i64) -> bool {
    (-MAX_QUANTITY..=MAX_QUANTITY).contains(&q)
}

pub fn amount_in_range(d: Decimal) -> bool {
    d.abs() <= max_amount()
}

/// Parse a decimal from free text: `"250.5"`, `"1e3"`, or `"250,50"`.
/// Amounts beyond [`max_amount`] are rejected.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    parse_decimal_text(raw).filter(|d| amount_in_range(*d))
}

fn parse_decimal_text(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(d) = Decimal::from_str(s) {
        return Some(d);
    }
    if let Ok(d) = Decimal::from_scientific(s) {
        return Some(d);
    }

    // Brazilian decimal comma
    if s.contains(',') && !s.contains('.') {
        return Decimal::from_str(&s.replace(',', ".")).ok();
    }

    None
}

/// Decimal from a JSON value. Numbers are read from their textual form so
/// `0.1` stays exactly `0.1`.
pub fn decimal_from_value(v: &Value) -> Option<Decimal> {
    match v {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Integer quantity from a JSON value, truncating fractional parts.
/// Quantities beyond [`MAX_QUANTITY`] are rejected.
pub fn qty_from_value(v: &Value) -> Option<i64> {
    let q = match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() <= MAX_QUANTITY as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_decimal(s).and_then(|d| d.trunc().to_i64()),
        _ => None,
    }?;
    quantity_in_range(q).then_some(q)
}

pub fn lenient_decimal<'de, D>(d: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(decimal_from_value(&v).unwrap_or(Decimal::ZERO))
}

pub fn lenient_qty<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(qty_from_value(&v).unwrap_or(0))
}

/// Strings, numbers and booleans become text; everything else is empty.
pub fn lenient_string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// A list where undecodable elements are skipped; a non-list is empty.
pub fn lenient_vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Value::deserialize(d)?;
    let Value::Array(items) = v else {
        return Ok(Vec::new());
    };

    Ok(items
        .iter()
        .filter_map(|item| T::deserialize(item).ok())
        .collect())
}

/// A string-keyed map where undecodable values are skipped; a non-object is empty.
pub fn lenient_map<'de, D, T>(d: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Value::deserialize(d)?;
    let Value::Object(obj) = v else {
        return Ok(BTreeMap::new());
    };

    Ok(obj
        .iter()
        .filter_map(|(k, item)| T::deserialize(item).ok().map(|t| (k.clone(), t)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn numbers_keep_their_decimal_text() {
        assert_eq!(
            decimal_from_value(&json!(0.1)),
            Some(Decimal::new(1, 1))
        );
        assert_eq!(decimal_from_value(&json!(250)), Some(Decimal::from(250)));
    }

    #[test]
    fn strings_with_comma_or_exponent_are_parsed() {
        assert_eq!(parse_decimal("250,50"), Some(Decimal::new(25050, 2)));
        assert_eq!(parse_decimal("1e3"), Some(Decimal::from(1000)));
        assert_eq!(parse_decimal("79228162514264337593543950335"), None);
        assert_eq!(parse_decimal(" 12.5 "), Some(Decimal::new(125, 1)));
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(decimal_from_value(&json!(null)), None);
        assert_eq!(decimal_from_value(&json!({"a": 1})), None);
        assert_eq!(qty_from_value(&json!(true)), None);
    }

    #[test]
    fn quantities_truncate() {
        assert_eq!(qty_from_value(&json!(3.9)), Some(3));
        assert_eq!(qty_from_value(&json!("7")), Some(7));
        assert_eq!(qty_from_value(&json!(-2)), Some(-2));
    }
}
