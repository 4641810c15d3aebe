//! Per-call mapping configuration and the built-in field lists.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use super::value::FieldValue;

/// Field names that are treated as dates unless a mapper is built without them.
pub const STANDARD_DATE_FIELDS: [&str; 10] = [
    "createdAt",
    "updatedAt",
    "publishedAt",
    "completedAt",
    "enrolledAt",
    "issuedAt",
    "startDate",
    "endDate",
    "date",
    "generatedAt",
];

/// Field names that are treated as JSON text unless a mapper is built without them.
pub const STANDARD_JSON_FIELDS: [&str; 2] = ["metadata", "data"];

/// Transform applied to a single raw field value. Takes precedence over the
/// date and JSON rules for the field it is registered under.
pub type CustomMapping = Arc<dyn Fn(&FieldValue) -> FieldValue + Send + Sync>;

/// Field declarations for one mapping call. All names are application-side
/// (camelCase), in both directions.
#[derive(Clone, Default)]
pub struct MapperConfig {
    pub date_fields: BTreeSet<String>,
    pub json_fields: BTreeSet<String>,
    pub custom_mappings: BTreeMap<String, CustomMapping>,
}

impl MapperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn with_json_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.json_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn with_custom_mapping<F>(mut self, field: impl Into<String>, mapping: F) -> Self
    where
        F: Fn(&FieldValue) -> FieldValue + Send + Sync + 'static,
    {
        self.custom_mappings.insert(field.into(), Arc::new(mapping));
        self
    }

    pub fn custom_mapping(&self, field: &str) -> Option<&CustomMapping> {
        self.custom_mappings.get(field)
    }

    /// Add every declaration from `other`. Custom mappings in `other` win.
    pub fn merge(mut self, other: MapperConfig) -> Self {
        self.date_fields.extend(other.date_fields);
        self.json_fields.extend(other.json_fields);
        self.custom_mappings.extend(other.custom_mappings);
        self
    }
}

impl fmt::Debug for MapperConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperConfig")
            .field("date_fields", &self.date_fields)
            .field("json_fields", &self.json_fields)
            .field("custom_mappings", &self.custom_mappings.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Field names a mapper treats as dates or JSON on every call, on top of
/// whatever the call's [`MapperConfig`] declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinFields {
    pub date_fields: BTreeSet<String>,
    pub json_fields: BTreeSet<String>,
}

impl BuiltinFields {
    /// The standard lists: [`STANDARD_DATE_FIELDS`] and [`STANDARD_JSON_FIELDS`].
    pub fn standard() -> Self {
        Self {
            date_fields: STANDARD_DATE_FIELDS.iter().map(|s| s.to_string()).collect(),
            json_fields: STANDARD_JSON_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// No implicit fields at all.
    pub fn none() -> Self {
        Self {
            date_fields: BTreeSet::new(),
            json_fields: BTreeSet::new(),
        }
    }

    pub fn without_date_field(mut self, field: &str) -> Self {
        self.date_fields.remove(field);
        self
    }

    pub fn without_json_field(mut self, field: &str) -> Self {
        self.json_fields.remove(field);
        self
    }

    pub fn with_date_field(mut self, field: impl Into<String>) -> Self {
        self.date_fields.insert(field.into());
        self
    }

    pub fn with_json_field(mut self, field: impl Into<String>) -> Self {
        self.json_fields.insert(field.into());
        self
    }
}

impl Default for BuiltinFields {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_fields() {
        let config = MapperConfig::new()
            .with_date_fields(["createdAt", "votingEndsAt"])
            .with_json_fields(vec!["options".to_string()])
            .with_custom_mapping("amount", |value| value.clone());

        assert!(config.date_fields.contains("votingEndsAt"));
        assert!(config.json_fields.contains("options"));
        assert!(config.custom_mapping("amount").is_some());
        assert!(config.custom_mapping("price").is_none());
    }

    #[test]
    fn test_merge_prefers_other_custom_mapping() {
        let base = MapperConfig::new()
            .with_date_fields(["createdAt"])
            .with_custom_mapping("amount", |_| FieldValue::from("base"));
        let other = MapperConfig::new()
            .with_json_fields(["tags"])
            .with_custom_mapping("amount", |_| FieldValue::from("other"));

        let merged = base.merge(other);
        assert!(merged.date_fields.contains("createdAt"));
        assert!(merged.json_fields.contains("tags"));
        let mapping = merged.custom_mapping("amount").unwrap();
        assert_eq!(mapping(&FieldValue::Null), FieldValue::from("other"));
    }

    #[test]
    fn test_standard_builtins() {
        let builtins = BuiltinFields::default();
        assert_eq!(builtins.date_fields.len(), STANDARD_DATE_FIELDS.len());
        assert!(builtins.date_fields.contains("generatedAt"));
        assert!(builtins.json_fields.contains("data"));
    }

    #[test]
    fn test_builtins_can_be_trimmed() {
        let builtins = BuiltinFields::standard()
            .without_json_field("data")
            .without_date_field("date")
            .with_date_field("respondedAt");

        assert!(!builtins.json_fields.contains("data"));
        assert!(builtins.json_fields.contains("metadata"));
        assert!(!builtins.date_fields.contains("date"));
        assert!(builtins.date_fields.contains("respondedAt"));
        assert_eq!(BuiltinFields::none().date_fields.len(), 0);
    }

    #[test]
    fn test_debug_lists_custom_mapping_names() {
        let config = MapperConfig::new().with_custom_mapping("price", |v| v.clone());
        assert!(format!("{:?}", config).contains("price"));
    }
}
