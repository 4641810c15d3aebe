//! # SBB DAO Record Mapper
//!
//! Converts rows returned by the hosted database into the objects the
//! community app works with, and back again for writes.
//!
//! ## Architecture
//!
//! ```text
//! Application models (shared crate, camelCase)
//!     ↑↓
//! IO Layer (entity mappers, one per entity)
//!     ↑↓
//! Domain Layer (case conversion, generic record mapper)
//!     ↑↓
//! Storage rows (shared crate, snake_case)
//! ```
//!
//! The `settings` module lets the built-in field lists and per-entity
//! declarations be overridden from a YAML file.

pub mod domain;
pub mod io;
pub mod settings;

pub use domain::{
    map_to_application, map_to_storage, to_camel_case, to_snake_case, BuiltinFields,
    FieldValue, MapperConfig, MappingError, MappingResult, Record, RecordMapper,
};
pub use io::{EntityKind, EntityMapper, EntityProfile};
pub use settings::MappingSettings;
