//! Error types for the mapper.

use mongolia_content::StoreError;
use thiserror::Error;

use crate::outcome::MapIssue;

/// Result type for mapper operations.
pub type Result<T> = std::result::Result<T, MapError>;

/// Problems found while building or registering schemas.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Two fields of one record type share a name.
    #[error("record type '{record}' declares field '{field}' twice")]
    DuplicateField { record: String, field: String },

    /// Only scalar fields can carry per-locale overrides.
    #[error("field '{record}.{field}' is a child collection and cannot be translatable")]
    InvalidTranslatable { record: String, field: String },

    /// A child collection names an element type nobody registered.
    #[error("field '{record}.{field}' holds unknown element type '{element}'")]
    UnknownElementType {
        record: String,
        field: String,
        element: String,
    },

    /// A child collection's element type is abstract, so no element could be read.
    #[error("field '{record}.{field}' holds abstract element type '{element}'")]
    AbstractElementType {
        record: String,
        field: String,
        element: String,
    },

    /// A record type extends a type that is not registered.
    #[error("record type '{record}' extends unknown type '{base}'")]
    UnknownBaseType { record: String, base: String },

    /// Record types extend each other in a loop.
    #[error("record types {0:?} extend each other in a cycle")]
    CyclicBase(Vec<String>),

    /// A record type was registered twice.
    #[error("record type '{0}' is already registered")]
    DuplicateType(String),

    /// Schema JSON could not be parsed.
    #[error("schema JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that abort a mapper operation.
#[derive(Debug, Error)]
pub enum MapError {
    /// The record type is abstract and has no zero-valued instance.
    #[error("record type '{0}' cannot be instantiated")]
    NotConstructible(String),

    /// No schema is registered under this name.
    #[error("unknown record type '{0}'")]
    UnknownType(String),

    /// A field name that the record type does not declare.
    #[error("record type '{record}' has no field '{field}'")]
    UnknownField { record: String, field: String },

    /// A value of the wrong kind for its field.
    #[error("field '{field}' expects {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },

    /// A bean needs a field the record left unset.
    #[error("record type '{record}' is missing required field '{field}'")]
    MissingField { record: String, field: String },

    /// The content store failed on the node being mapped.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Schema problem.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Strict mode rejected an outcome that carried issues.
    #[error("mapping finished with {} issue(s)", .0.len())]
    Incomplete(Vec<MapIssue>),
}
