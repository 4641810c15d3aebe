//! Errors raised while mapping records between storage and application shapes.

use thiserror::Error;

pub type MappingResult<T> = Result<T, MappingError>;

#[derive(Debug, Error)]
pub enum MappingError {
    /// A field declared (or built in) as JSON held text that does not parse.
    #[error("Field '{field}' does not contain valid JSON: {source}")]
    MalformedJson {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize field '{field}' as JSON: {source}")]
    Serialize {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// The mapped record does not fit the typed entity shape.
    #[error("Record does not match the entity shape: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("Expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}
