//! Scalar shapes shared by every sevdesk payload.
//!
//! # Design
//! The remote API predates strict typing: amounts arrive either as JSON
//! numbers or numeric strings, booleans as the strings `"0"`/`"1"`, and ids
//! as strings in responses but numbers in request payloads. These wrappers
//! keep the wire shape intact and normalize at the call site, so "absent"
//! stays distinguishable from "zero"/"false" — absence is an `Option` at the
//! field level, never a sentinel value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity id. Responses carry string ids, request payloads accept numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Number(u64),
    Text(String),
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Id::Number(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id::Text(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id::Text(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{n}"),
            Id::Text(s) => f.write_str(s),
        }
    }
}

/// A number that may arrive as a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MixedNumber {
    Number(f64),
    Text(String),
}

impl MixedNumber {
    /// Normalize to `f64`. Total: numeric strings parse like `parseFloat`
    /// (longest leading float prefix wins), anything else becomes NaN.
    /// NaN therefore means "present but not numeric" — absent fields are
    /// `Option::None` and never reach this method.
    pub fn to_f64(&self) -> f64 {
        match self {
            MixedNumber::Number(n) => *n,
            MixedNumber::Text(s) => float_prefix(s),
        }
    }
}

impl From<f64> for MixedNumber {
    fn from(value: f64) -> Self {
        MixedNumber::Number(value)
    }
}

impl From<&str> for MixedNumber {
    fn from(value: &str) -> Self {
        MixedNumber::Text(value.to_string())
    }
}

/// Parse the longest leading float prefix of `s`, NaN if there is none.
fn float_prefix(s: &str) -> f64 {
    let t = s.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in t.char_indices() {
        match c {
            '+' | '-' if i == 0 => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return f64::NAN;
    }
    t[..end].parse().unwrap_or(f64::NAN)
}

/// Boolean encoded as the string `"1"` or `"0"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericBoolean {
    #[serde(rename = "1")]
    True,
    #[serde(rename = "0")]
    False,
}

impl NumericBoolean {
    pub fn as_bool(self) -> bool {
        matches!(self, NumericBoolean::True)
    }
}

impl From<bool> for NumericBoolean {
    fn from(value: bool) -> Self {
        if value {
            NumericBoolean::True
        } else {
            NumericBoolean::False
        }
    }
}

/// Discriminant tag carried in `objectName` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectName {
    Voucher,
    VoucherPos,
    Document,
    SevClient,
    SevUser,
    Contact,
    TaxRule,
    TaxSet,
    CostCentre,
    AccountingChart,
    AccountingSystem,
    AccountDatev,
    AccountingType,
    StaticCountry,
}

/// Foreign-key style pointer to another remote entity:
/// `{ "id": ..., "objectName": ... }`. Used throughout instead of embedding
/// the referenced object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    pub id: Id,
    pub object_name: ObjectName,
}

impl ObjectReference {
    pub fn new(id: impl Into<Id>, object_name: ObjectName) -> Self {
        Self {
            id: id.into(),
            object_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_deserializes_from_string_and_number() {
        let text: Id = serde_json::from_str(r#""12345""#).unwrap();
        assert_eq!(text, Id::Text("12345".to_string()));
        let number: Id = serde_json::from_str("12345").unwrap();
        assert_eq!(number, Id::Number(12345));
    }

    #[test]
    fn mixed_number_normalizes_both_shapes() {
        let n: MixedNumber = serde_json::from_str("19.0").unwrap();
        assert_eq!(n.to_f64(), 19.0);
        let s: MixedNumber = serde_json::from_str(r#""19.00""#).unwrap();
        assert_eq!(s.to_f64(), 19.0);
    }

    #[test]
    fn mixed_number_parses_leading_prefix() {
        assert_eq!(MixedNumber::from("12.5 EUR").to_f64(), 12.5);
        assert_eq!(MixedNumber::from("-3").to_f64(), -3.0);
        assert_eq!(MixedNumber::from(" 7").to_f64(), 7.0);
    }

    #[test]
    fn mixed_number_non_numeric_is_nan_not_error() {
        assert!(MixedNumber::from("n/a").to_f64().is_nan());
        assert!(MixedNumber::from("").to_f64().is_nan());
    }

    #[test]
    fn numeric_boolean_round_trips() {
        let b: NumericBoolean = serde_json::from_str(r#""1""#).unwrap();
        assert!(b.as_bool());
        assert_eq!(serde_json::to_string(&NumericBoolean::False).unwrap(), r#""0""#);
    }

    #[test]
    fn numeric_boolean_rejects_other_strings() {
        let result: Result<NumericBoolean, _> = serde_json::from_str(r#""true""#);
        assert!(result.is_err());
    }

    #[test]
    fn object_reference_wire_shape() {
        let reference = ObjectReference::new(42u64, ObjectName::TaxRule);
        let json = serde_json::to_value(&reference).unwrap();
        assert_eq!(json, serde_json::json!({"id": 42, "objectName": "TaxRule"}));
    }

    #[test]
    fn object_reference_accepts_string_ids() {
        let reference: ObjectReference =
            serde_json::from_str(r#"{"id":"987","objectName":"Contact"}"#).unwrap();
        assert_eq!(reference.id, Id::Text("987".to_string()));
        assert_eq!(reference.object_name, ObjectName::Contact);
    }
}
