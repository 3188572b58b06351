//! The tagged-variant JSON value model.

use indexmap::IndexMap;
use serde_json::Number;

/// A parsed JSON document.
///
/// Objects preserve insertion order, which is significant for output
/// fidelity; inserting an existing key overwrites the value in place without
/// moving the entry. Numbers keep serde_json's integer/float distinction so
/// `1` and `1.0` survive a round-trip unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Object(IndexMap<String, JsonValue>),
    Array(Vec<JsonValue>),
}

impl JsonValue {
    pub fn is_scalar(&self) -> bool {
        !matches!(self, JsonValue::Object(_) | JsonValue::Array(_))
    }

    /// Canonical display text for scalar values: raw strings, `true`/`false`,
    /// serde_json's locale-free number display, `null`. Composites have no
    /// scalar text.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            JsonValue::Null => Some("null".to_string()),
            JsonValue::Bool(b) => Some(b.to_string()),
            JsonValue::Number(n) => Some(n.to_string()),
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Object(_) | JsonValue::Array(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, JsonValue>> {
        match self {
            JsonValue::Object(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(b) => JsonValue::Bool(b),
            serde_json::Value::Number(n) => JsonValue::Number(n),
            serde_json::Value::String(s) => JsonValue::String(s),
            serde_json::Value::Array(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
            }
            serde_json::Value::Object(entries) => JsonValue::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, JsonValue::from(value)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_text_forms() {
        assert_eq!(JsonValue::Null.scalar_text().as_deref(), Some("null"));
        assert_eq!(JsonValue::Bool(true).scalar_text().as_deref(), Some("true"));
        assert_eq!(
            JsonValue::String("a b".into()).scalar_text().as_deref(),
            Some("a b")
        );
        assert_eq!(
            JsonValue::Object(IndexMap::new()).scalar_text(),
            None
        );
    }

    #[test]
    fn number_text_keeps_float_form() {
        let int: serde_json::Value = serde_json::from_str("1").unwrap();
        let float: serde_json::Value = serde_json::from_str("1.0").unwrap();
        assert_eq!(JsonValue::from(int).scalar_text().as_deref(), Some("1"));
        assert_eq!(JsonValue::from(float).scalar_text().as_deref(), Some("1.0"));
    }

    #[test]
    fn object_order_survives_conversion() {
        let value: serde_json::Value = serde_json::from_str(r#"{"z":1,"a":2,"m":3}"#).unwrap();
        let converted = JsonValue::from(value);
        let keys: Vec<&String> = converted.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }
}
