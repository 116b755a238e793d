//! Error types for the content store.

use crate::NodeId;
use thiserror::Error;

/// Result type for content store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while accessing a content store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// No node with this identifier exists in the store.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// A relative path did not resolve to an existing node.
    #[error("path not found: {0}")]
    PathNotFound(String),

    /// A path could not be parsed.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// A node or property name is not acceptable.
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    /// The root node cannot be renamed, retyped or removed.
    #[error("the root node cannot be modified this way")]
    RootImmutable,

    /// The storage backend failed.
    #[error("backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}
