//! Raw booking records as returned by the Bookster API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw booking record: a string-keyed JSON object exactly as the vendor
/// returned it. Nothing about its shape is trusted; every read goes through
/// an ordered fallback key list (see [`crate::fields`]) and yields `None`
/// rather than failing on missing or mistyped values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawBooking(Map<String, Value>);

impl RawBooking {
    pub fn new(record: Map<String, Value>) -> Self {
        RawBooking(record)
    }

    /// Wrap a JSON value, accepting only objects.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(record) => Some(RawBooking(record)),
            _ => None,
        }
    }

    /// First non-null value under any of the candidate keys.
    pub fn get(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| !value.is_null())
    }

    /// First non-empty text value. Strings are trimmed; bare numbers are
    /// accepted too, since ids and phone numbers arrive as either.
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find_map(|value| match value {
                Value::String(s) => {
                    let s = s.trim();
                    (!s.is_empty()).then(|| s.to_string())
                }
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    /// First value that parses as a number (JSON number or numeric string).
    pub fn number(&self, keys: &[&str]) -> Option<f64> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find_map(to_number)
    }

    /// First value that parses as an integer.
    pub fn integer(&self, keys: &[&str]) -> Option<i64> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find_map(|value| match value {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
    }

    /// First value that is a list.
    pub fn list(&self, keys: &[&str]) -> Option<&Vec<Value>> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find_map(Value::as_array)
    }
}

fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawBooking {
        RawBooking::from_value(value).expect("test record must be an object")
    }

    #[test]
    fn text_skips_empty_and_null_candidates() {
        let raw = record(json!({
            "customer_mobile": "   ",
            "customer_phone_day": null,
            "customer_phone": "01234 567890",
        }));

        assert_eq!(
            raw.text(crate::fields::PHONE),
            Some("01234 567890".to_string())
        );
    }

    #[test]
    fn text_stringifies_numeric_ids() {
        let raw = record(json!({"id": 48211}));
        assert_eq!(raw.text(crate::fields::REFERENCE), Some("48211".to_string()));
    }

    #[test]
    fn number_accepts_numeric_strings() {
        let raw = record(json!({"value": "950.50"}));
        assert_eq!(raw.number(crate::fields::VALUE), Some(950.50));
    }

    #[test]
    fn integer_rejects_garbage() {
        let raw = record(json!({"party_size": "lots"}));
        assert_eq!(raw.integer(crate::fields::PARTY_SIZE), None);
    }

    #[test]
    fn from_value_rejects_non_objects() {
        assert!(RawBooking::from_value(json!("not a record")).is_none());
        assert!(RawBooking::from_value(json!([1, 2])).is_none());
    }
}
