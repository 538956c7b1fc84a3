//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is fatal to the refresh cycle that raised it: a dashboard
/// built from partially valid numbers is worse than no dashboard.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The raw fetch failed or returned no rows.
    #[error("inventory data unavailable: {0}")]
    DataUnavailable(String),

    /// A record carries zero, negative or non-finite daily usage.
    #[error("invalid daily usage for ({location}, {item})")]
    InvalidUsage { location: String, item: String },

    /// A usage strategy expected usage on the row but found none.
    #[error("missing daily usage for ({location}, {item})")]
    MissingUsage { location: String, item: String },

    /// Any other field of a record is out of range.
    #[error("malformed record ({location}, {item}): {reason}")]
    MalformedRecord {
        location: String,
        item: String,
        reason: String,
    },

    /// A value failed validation (e.g. malformed configuration or name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Writing an export (file or stream) failed.
    #[error("export failed: {0}")]
    Export(String),
}

impl DomainError {
    pub fn data_unavailable(msg: impl Into<String>) -> Self {
        Self::DataUnavailable(msg.into())
    }

    pub fn invalid_usage(location: impl Into<String>, item: impl Into<String>) -> Self {
        Self::InvalidUsage {
            location: location.into(),
            item: item.into(),
        }
    }

    pub fn missing_usage(location: impl Into<String>, item: impl Into<String>) -> Self {
        Self::MissingUsage {
            location: location.into(),
            item: item.into(),
        }
    }

    pub fn malformed(
        location: impl Into<String>,
        item: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            location: location.into(),
            item: item.into(),
            reason: reason.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}
