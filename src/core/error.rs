//! Crate-wide error taxonomy
//!
//! Three conditions propagate to callers: a missing entity file, an entity
//! that fails a schema constraint after decode or programmatic construction,
//! and an ID string that does not follow the `PREFIX-digits` shape. The
//! markdown codec itself is tolerant and substitutes defaults rather than
//! failing, so decode errors are limited to unrecognized enum values.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the entity store, codec, and identity scheme
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The entity file does not exist
    #[error("entity file not found: {}", path.display())]
    #[diagnostic(code(pmspec::store::not_found))]
    NotFound { path: PathBuf },

    /// A decoded or constructed entity violates a schema constraint
    #[error("schema violation in '{field}' (value '{value}'): {message}")]
    #[diagnostic(code(pmspec::model::schema_violation))]
    SchemaViolation {
        field: String,
        value: String,
        message: String,
    },

    /// An ID string does not match `PREFIX-digits`
    #[error("malformed entity ID '{id}': expected PREFIX-digits")]
    #[diagnostic(code(pmspec::identity::malformed_id))]
    MalformedId { id: String },

    /// An I/O failure other than a missing file
    #[error("I/O error on {}: {source}", path.display())]
    #[diagnostic(code(pmspec::store::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Shorthand for a schema violation naming the offending field and value
    pub fn schema(
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::SchemaViolation {
            field: field.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
