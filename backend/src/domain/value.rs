//! Untyped record shapes shared by both mapping directions.
//!
//! A [`Record`] is an ordered, duplicate-free list of named [`FieldValue`]s.
//! Storage rows use snake_case keys and application objects use camelCase
//! keys; the type is the same for both.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use super::error::{MappingError, MappingResult};

/// A single field value on either side of the mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// The field exists on the shape but carries no value at all. Dropped by
    /// both mapping directions.
    Absent,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    DateTime(DateTime<Utc>),
    /// A parsed JSON structure (object or array).
    Json(Value),
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, FieldValue::Bool(_))
    }

    /// Truthiness as the storage client sees it: absent, null, `false`, zero
    /// and the empty string are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Absent | FieldValue::Null => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
            FieldValue::String(s) => !s.is_empty(),
            FieldValue::DateTime(_) => true,
            FieldValue::Json(value) => json_is_truthy(value),
        }
    }

    /// Short name of the variant, used in error messages and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Absent => "absent",
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Number(_) => "number",
            FieldValue::String(_) => "string",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::Json(_) => "json",
        }
    }

    /// Lift a JSON value. Scalars keep their own variant; arrays and objects
    /// become [`FieldValue::Json`].
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => FieldValue::Number(n),
            Value::String(s) => FieldValue::String(s),
            structured => FieldValue::Json(structured),
        }
    }

    /// Lower to a JSON value. Datetimes render as RFC 3339 with a `Z` suffix.
    /// Returns `None` for [`FieldValue::Absent`].
    pub fn to_json(&self) -> Option<Value> {
        let value = match self {
            FieldValue::Absent => return None,
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Number(n) => Value::Number(n.clone()),
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::DateTime(dt) => {
                Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            FieldValue::Json(value) => value.clone(),
        };
        Some(value)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

fn json_is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<f64> for FieldValue {
    /// Non-finite numbers have no JSON form and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(FieldValue::Null, FieldValue::Number)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::from_json(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Ordered key/value record. Keys are unique; inserting an existing key
/// replaces the value in place and keeps its position.
///
/// Equality compares entries regardless of order; use [`Record::keys`] to
/// check the order itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: IndexMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert a field, returning the previous value if the key was present.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.get(key)
    }

    /// Remove a field, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Build a record from a JSON object, keeping its key order.
    pub fn from_json(value: Value) -> MappingResult<Self> {
        match value {
            Value::Object(map) => Ok(map
                .into_iter()
                .map(|(key, value)| (key, FieldValue::from_json(value)))
                .collect()),
            other => Err(MappingError::NotAnObject(json_kind(&other))),
        }
    }

    /// Render as a JSON object. Absent fields are left out.
    pub fn to_json(&self) -> Value {
        let mut map = Map::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            if let Some(json) = value.to_json() {
                map.insert(key.clone(), json);
            }
        }
        Value::Object(map)
    }

    /// Build a record from any value that serializes to a JSON object.
    pub fn from_serialize<T: Serialize>(value: &T) -> MappingResult<Self> {
        Self::from_json(serde_json::to_value(value)?)
    }

    /// Deserialize the record into a typed shape.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> MappingResult<T> {
        Ok(serde_json::from_value(self.to_json())?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, FieldValue);
    type IntoIter = indexmap::map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!FieldValue::Absent.is_truthy());
        assert!(!FieldValue::Null.is_truthy());
        assert!(!FieldValue::Bool(false).is_truthy());
        assert!(!FieldValue::from(0).is_truthy());
        assert!(!FieldValue::from(0.0).is_truthy());
        assert!(!FieldValue::from("").is_truthy());

        assert!(FieldValue::Bool(true).is_truthy());
        assert!(FieldValue::from(-1).is_truthy());
        assert!(FieldValue::from("0").is_truthy());
        assert!(FieldValue::Json(json!({})).is_truthy());
        assert!(FieldValue::Json(json!([])).is_truthy());
        assert!(FieldValue::DateTime(Utc::now()).is_truthy());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut record = Record::new();
        assert_eq!(record.insert("a", 1), None);
        record.insert("b", 2);
        assert_eq!(record.insert("a", 3), Some(FieldValue::from(1)));

        assert_eq!(record.len(), 2);
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&FieldValue::from(3)));
    }

    #[test]
    fn test_remove_and_contains() {
        let mut record: Record = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert!(record.contains_key("a"));
        assert_eq!(record.remove("a"), Some(FieldValue::from(1)));
        assert!(!record.contains_key("a"));
        assert_eq!(record.remove("missing"), None);
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut record: Record = vec![("a", 1), ("b", 2), ("c", 3), ("d", 4)]
            .into_iter()
            .collect();
        record.remove("b");
        record.insert("e", 5);
        record.insert("c", 30);

        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "c", "d", "e"]);
        assert_eq!(record.get("c"), Some(&FieldValue::from(30)));
        assert_eq!(
            record.into_iter().map(|(key, _)| key).collect::<Vec<_>>(),
            vec!["a", "c", "d", "e"]
        );
    }

    #[test]
    fn test_many_fields_keep_insertion_order() {
        let record: Record = (0..5_000).map(|i| (format!("field_{i}"), i)).collect();

        assert_eq!(record.len(), 5_000);
        assert_eq!(record.keys().next(), Some("field_0"));
        assert_eq!(record.keys().last(), Some("field_4999"));
        assert_eq!(record.get("field_2500"), Some(&FieldValue::from(2500)));
    }

    #[test]
    fn test_from_json_keeps_order_and_lifts_structures() {
        let record = Record::from_json(json!({
            "zeta": 1,
            "alpha": "x",
            "nested": {"k": [1, 2]},
            "list": [true],
            "nothing": null
        }))
        .unwrap();

        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec!["zeta", "alpha", "nested", "list", "nothing"]
        );
        assert_eq!(record.get("nested"), Some(&FieldValue::Json(json!({"k": [1, 2]}))));
        assert_eq!(record.get("list"), Some(&FieldValue::Json(json!([true]))));
        assert_eq!(record.get("nothing"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        let err = Record::from_json(json!([1, 2])).unwrap_err();
        assert!(matches!(err, MappingError::NotAnObject("array")));
    }

    #[test]
    fn test_to_json_skips_absent_and_renders_datetimes() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut record = Record::new();
        record.insert("id", "1");
        record.insert("gone", FieldValue::Absent);
        record.insert("createdAt", created);

        assert_eq!(
            record.to_json(),
            json!({"id": "1", "createdAt": "2024-01-01T00:00:00Z"})
        );
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(FieldValue::from(None::<String>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some("x")), FieldValue::from("x"));
        assert_eq!(FieldValue::from(f64::NAN), FieldValue::Null);
    }
}
