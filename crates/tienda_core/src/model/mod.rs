//! Domain models for the store entities.
//!
//! # Responsibility
//! - Define read models matching the persisted tables and draft models for
//!   write paths.
//! - Enforce required-field validation before any persistence call.
//!
//! # Invariants
//! - Draft `validate()` must pass before a repository transaction is opened.
//! - `url_imagen` on read models is owned by the lifecycle layer; drafts
//!   never carry an asset path.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod categoria;
pub mod compra;
pub mod producto;
pub mod upload;
pub mod usuario;

/// Validation error for required scalar fields on draft models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValidationError {
    /// Required text field is missing or blank after trimming.
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    /// Required numeric field is zero or negative.
    NonPositiveField {
        entity: &'static str,
        field: &'static str,
    },
}

impl Display for FieldValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { entity, field } => {
                write!(f, "missing required field `{field}` for {entity}")
            }
            Self::NonPositiveField { entity, field } => {
                write!(f, "field `{field}` for {entity} must be positive")
            }
        }
    }
}

impl Error for FieldValidationError {}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), FieldValidationError> {
    if value.trim().is_empty() {
        return Err(FieldValidationError::MissingField { entity, field });
    }
    Ok(())
}

pub(crate) fn require_positive_id(
    entity: &'static str,
    field: &'static str,
    value: i64,
) -> Result<(), FieldValidationError> {
    if value <= 0 {
        return Err(FieldValidationError::NonPositiveField { entity, field });
    }
    Ok(())
}
