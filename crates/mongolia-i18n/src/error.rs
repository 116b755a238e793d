//! Error types for locale handling.

use thiserror::Error;

/// Result type for locale operations.
pub type Result<T> = std::result::Result<T, LocaleError>;

/// Errors that can occur while handling locales.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// The tag does not start with a two-letter language code.
    #[error("invalid locale tag: {0:?}")]
    Invalid(String),
}
