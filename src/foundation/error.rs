/// Convenience result type used across storycam.
pub type StorycamResult<T> = Result<T, StorycamError>;

/// Top-level error taxonomy.
///
/// Only hard failures surface here. Malformed-but-present authored values are defaulted at the
/// parsing boundary and missing structure is modeled with `Option`, so neither reaches this type.
#[derive(thiserror::Error, Debug)]
pub enum StorycamError {
    /// Invalid caller-provided arguments or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A story payload that cannot be interpreted at all (not JSON, not an object).
    #[error("parse error: {0}")]
    Parse(String),

    /// A requested story document or projection does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Reading a story source failed.
    #[error("io error: {0}")]
    Io(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StorycamError {
    /// Build a [`StorycamError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StorycamError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`StorycamError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`StorycamError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`StorycamError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
