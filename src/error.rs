//! Error types for ISON.
//!
//! The crate has two distinct error regimes:
//!
//! - **Parsing is fail-soft**: malformed lines, unknown block kinds, and
//!   out-of-range row tokens are skipped or truncated, never raised. Parsing
//!   therefore returns [`crate::Document`] directly, not a `Result`.
//! - **Validation is fail-aggregate**: composite validators collect every
//!   violation before returning, each with a field path, a message, and the
//!   offending value. See [`ValidationErrors`].
//!
//! The only genuinely fallible surfaces are the file I/O boundary
//! (`load`/`dump`) and the JSON text boundary (`from_json`/`to_json`), both
//! covered by [`Error`].
//!
//! ## Examples
//!
//! ```rust
//! use ison::{load, Error};
//!
//! match load("missing.ison") {
//!     Ok(doc) => println!("{} blocks", doc.len()),
//!     Err(Error::Io(e)) => eprintln!("cannot read file: {}", e),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use serde_json::Value as JsonValue;
use std::fmt;
use thiserror::Error;

/// Errors from the crate's fallible boundaries.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error while reading or writing an `.ison`/`.isonl` file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode error at the generic-map boundary
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A single validation failure, qualified with the path of the offending
/// field.
///
/// Paths are dotted and bracketed as failures bubble up through composite
/// validators: `email`, `[2]`, `row[1].email`, `users.row[0].id`.
#[derive(Debug, Clone, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Path of the field that failed
    pub field: String,
    /// Human-readable description of the violation
    pub message: String,
    /// The offending value (`null` when the field was absent)
    pub value: JsonValue,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        value: JsonValue,
    ) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
            value,
        }
    }
}

/// The complete set of failures found in one validation pass.
///
/// Composite validators never stop at the first failure; every violation is
/// collected here before the validator returns.
///
/// # Examples
///
/// ```rust
/// use ison::schema::{self, SchemaExt};
/// use ison::Schema;
/// use serde_json::json;
///
/// let user = schema::object([
///     ("name", schema::string().min(1).boxed()),
///     ("email", schema::string().email().boxed()),
/// ]);
///
/// let err = user.validate(Some(&json!({"name": "", "email": "invalid"}))).unwrap();
/// let errs = err.as_aggregate().unwrap();
/// assert_eq!(errs.errors.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        ValidationErrors::default()
    }

    pub fn push(&mut self, err: ValidationError) {
        self.errors.push(err);
    }

    /// Returns `true` if any validation errors were collected.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}", err)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Outcome of a single validator call: leaf validators report at most one
/// message, composite validators report an aggregated collection.
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    /// A single violation from a leaf validator
    #[error("{0}")]
    Invalid(String),

    /// Aggregated violations from a composite validator
    #[error(transparent)]
    Aggregate(ValidationErrors),
}

impl SchemaError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        SchemaError::Invalid(msg.into())
    }

    /// Returns the aggregated error collection, if this is a composite
    /// failure.
    #[must_use]
    pub fn as_aggregate(&self) -> Option<&ValidationErrors> {
        match self {
            SchemaError::Aggregate(errs) => Some(errs),
            SchemaError::Invalid(_) => None,
        }
    }
}

impl From<ValidationErrors> for SchemaError {
    fn from(errs: ValidationErrors) -> Self {
        SchemaError::Aggregate(errs)
    }
}
