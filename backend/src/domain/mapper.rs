//! The generic record mapper.
//!
//! Forward mapping turns a storage row into an application object: keys go
//! snake_case -> camelCase, date fields are parsed into UTC datetimes and
//! JSON fields are parsed from text. Reverse mapping turns an application
//! object into a write payload: keys go camelCase -> snake_case and JSON
//! fields are serialized back to text. Datetimes are not serialized on the
//! way back; callers pass them through as they are.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::{debug, trace, warn};

use super::case::{to_camel_case, to_snake_case};
use super::config::{BuiltinFields, CustomMapping, MapperConfig};
use super::error::{MappingError, MappingResult};
use super::value::{FieldValue, Record};

/// How a single forward field is handled, in precedence order.
enum FieldRule<'a> {
    Custom(&'a CustomMapping),
    Date,
    Json,
    Flag,
    Passthrough,
}

impl FieldRule<'_> {
    fn label(&self) -> &'static str {
        match self {
            FieldRule::Custom(_) => "custom",
            FieldRule::Date => "date",
            FieldRule::Json => "json",
            FieldRule::Flag => "flag",
            FieldRule::Passthrough => "passthrough",
        }
    }
}

/// Maps records in both directions. Holds only the implicit field lists, so
/// one mapper can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct RecordMapper {
    builtins: BuiltinFields,
}

impl RecordMapper {
    pub fn new(builtins: BuiltinFields) -> Self {
        Self { builtins }
    }

    /// A mapper that only honours what each call's config declares.
    pub fn without_builtins() -> Self {
        Self::new(BuiltinFields::none())
    }

    pub fn builtins(&self) -> &BuiltinFields {
        &self.builtins
    }

    pub fn is_date_field(&self, field: &str, config: &MapperConfig) -> bool {
        config.date_fields.contains(field) || self.builtins.date_fields.contains(field)
    }

    pub fn is_json_field(&self, field: &str, config: &MapperConfig) -> bool {
        config.json_fields.contains(field) || self.builtins.json_fields.contains(field)
    }

    fn forward_rule<'a>(
        &self,
        field: &str,
        raw: &FieldValue,
        config: &'a MapperConfig,
    ) -> FieldRule<'a> {
        if let Some(mapping) = config.custom_mapping(field) {
            FieldRule::Custom(mapping)
        } else if self.is_date_field(field, config) {
            FieldRule::Date
        } else if self.is_json_field(field, config) {
            FieldRule::Json
        } else if field.starts_with("is") && raw.is_bool() {
            FieldRule::Flag
        } else {
            FieldRule::Passthrough
        }
    }

    /// Map a storage record to an application record.
    ///
    /// Absent values are dropped. Fails only if a JSON field holds text that
    /// is not JSON; a date field that will not parse keeps its raw value.
    pub fn to_application(&self, record: &Record, config: &MapperConfig) -> MappingResult<Record> {
        let mut mapped = Record::with_capacity(record.len());

        for (key, raw) in record.iter() {
            if raw.is_absent() {
                continue;
            }

            let field = to_camel_case(key);
            let rule = self.forward_rule(&field, raw, config);
            trace!(storage_key = key, field = %field, rule = rule.label(), "mapping field");

            let value = match rule {
                FieldRule::Custom(mapping) => mapping(raw),
                FieldRule::Date => parse_date_field(&field, raw),
                FieldRule::Json => parse_json_field(&field, raw)?,
                FieldRule::Flag | FieldRule::Passthrough => raw.clone(),
            };
            mapped.insert(field, value);
        }

        debug!(
            input_fields = record.len(),
            output_fields = mapped.len(),
            "Mapped storage record to application record"
        );
        Ok(mapped)
    }

    /// Map an application record to a storage record.
    ///
    /// Custom mappings are looked up by the application-side name. Only the
    /// config's JSON fields are rendered to text; the built-in lists apply to
    /// forward mapping alone. Datetimes are left untouched.
    pub fn to_storage(&self, record: &Record, config: &MapperConfig) -> MappingResult<Record> {
        let mut mapped = Record::with_capacity(record.len());

        for (field, value) in record.iter() {
            if value.is_absent() {
                continue;
            }

            let storage_key = to_snake_case(field);
            let value = if let Some(mapping) = config.custom_mapping(field) {
                trace!(field, storage_key = %storage_key, rule = "custom", "mapping field");
                mapping(value)
            } else if config.json_fields.contains(field) {
                trace!(field, storage_key = %storage_key, rule = "json", "mapping field");
                serialize_json_field(field, value)?
            } else {
                value.clone()
            };
            mapped.insert(storage_key, value);
        }

        debug!(
            input_fields = record.len(),
            output_fields = mapped.len(),
            "Mapped application record to storage record"
        );
        Ok(mapped)
    }

    /// Forward-map every record, stopping at the first failure.
    pub fn to_application_all(
        &self,
        records: &[Record],
        config: &MapperConfig,
    ) -> MappingResult<Vec<Record>> {
        records
            .iter()
            .map(|record| self.to_application(record, config))
            .collect()
    }
}

/// Forward-map with the standard built-in field lists.
pub fn map_to_application(record: &Record, config: Option<&MapperConfig>) -> MappingResult<Record> {
    let default_config = MapperConfig::default();
    RecordMapper::default().to_application(record, config.unwrap_or(&default_config))
}

/// Reverse-map with the standard built-in field lists.
pub fn map_to_storage(record: &Record, config: Option<&MapperConfig>) -> MappingResult<Record> {
    let default_config = MapperConfig::default();
    RecordMapper::default().to_storage(record, config.unwrap_or(&default_config))
}

fn parse_date_field(field: &str, raw: &FieldValue) -> FieldValue {
    if !raw.is_truthy() {
        return FieldValue::Null;
    }

    let parsed = match raw {
        FieldValue::DateTime(dt) => Some(*dt),
        FieldValue::String(text) => parse_datetime(text),
        FieldValue::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    };

    match parsed {
        Some(dt) => FieldValue::DateTime(dt),
        None => {
            warn!(
                field,
                kind = raw.kind(),
                "Date field is not a recognised date, keeping raw value"
            );
            raw.clone()
        }
    }
}

/// Parse the date formats the hosted database and its clients emit.
///
/// Accepts RFC 3339, Postgres `timestamptz` text (`2024-01-01 00:00:00+00`),
/// naive date-times (read as UTC) and plain dates (UTC midnight).
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn parse_json_field(field: &str, raw: &FieldValue) -> MappingResult<FieldValue> {
    if !raw.is_truthy() {
        return Ok(FieldValue::Null);
    }

    match raw {
        FieldValue::String(text) => serde_json::from_str(text)
            .map(FieldValue::from_json)
            .map_err(|source| MappingError::MalformedJson {
                field: field.to_string(),
                source,
            }),
        // Already structured (jsonb columns come back parsed).
        other => Ok(other.clone()),
    }
}

fn serialize_json_field(field: &str, value: &FieldValue) -> MappingResult<FieldValue> {
    if !value.is_truthy() {
        return Ok(FieldValue::Null);
    }

    let json = match value {
        FieldValue::DateTime(dt) => serde_json::Value::String(
            dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        ),
        other => other.to_json().unwrap_or(serde_json::Value::Null),
    };

    serde_json::to_string(&json)
        .map(FieldValue::String)
        .map_err(|source| MappingError::Serialize {
            field: field.to_string(),
            source,
        })
}
