//! # Mapping Domain
//!
//! Converts records between the storage convention used by the hosted
//! database (snake_case keys, dates and JSON as text) and the application
//! convention used by the rest of the app (camelCase keys, parsed datetimes
//! and JSON structures).
//!
//! - [`case`]: field name conversion
//! - [`value`]: the untyped [`Record`] and [`FieldValue`] shapes
//! - [`config`]: per-call [`MapperConfig`] and the injectable [`BuiltinFields`]
//! - [`mapper`]: the forward and reverse [`RecordMapper`]
//!
//! Everything here is synchronous and free of shared state.

pub mod case;
pub mod config;
pub mod error;
pub mod mapper;
pub mod value;

pub use case::{to_camel_case, to_snake_case};
pub use config::{
    BuiltinFields, CustomMapping, MapperConfig, STANDARD_DATE_FIELDS, STANDARD_JSON_FIELDS,
};
pub use error::{MappingError, MappingResult};
pub use mapper::{map_to_application, map_to_storage, parse_datetime, RecordMapper};
pub use value::{FieldValue, Record};
