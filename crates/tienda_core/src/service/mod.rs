//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and asset-store calls into entity-level APIs.
//! - Carry the client/internal error split for the boundary layer.
//!
//! # Invariants
//! - Draft validation happens before any transaction or file write.
//! - Storage failure detail never reaches `public_message()`; it stays
//!   available through `Display`/`source()` for diagnostics.

use crate::asset::store::AssetError;
use crate::model::FieldValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod categoria_service;
pub mod compra_service;
pub mod lifecycle;
pub mod producto_service;
pub mod usuario_service;

/// Service error shared by all entity use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Missing or invalid required scalar field; nothing was mutated.
    Validation(FieldValidationError),
    /// File rejected by policy or asset I/O failure before the row mutation.
    Asset(AssetError),
    /// Target entity does not exist.
    NotFound { entity: &'static str, id: i64 },
    /// Persistence failure; the transaction was rolled back.
    Storage(RepoError),
}

impl ServiceError {
    /// Returns whether the caller is at fault (4xx-equivalent) rather than
    /// the store.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Validation(_) | Self::NotFound { .. } => true,
            Self::Asset(err) => err.is_rejection(),
            Self::Storage(_) => false,
        }
    }

    /// Message safe to return to clients. Persistence failures collapse to
    /// a generic phrase so storage detail does not leak; asset errors stay
    /// descriptive because they only ever surface before any row mutation.
    pub fn public_message(&self) -> String {
        match self {
            Self::Storage(_) => "internal storage failure".to_string(),
            other => other.to_string(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Asset(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "no {entity} row with id {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Asset(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<FieldValidationError> for ServiceError {
    fn from(value: FieldValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<AssetError> for ServiceError {
    fn from(value: AssetError) -> Self {
        Self::Asset(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { table, id } => Self::NotFound { entity: table, id },
            other => Self::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceError;
    use crate::db::DbError;
    use crate::repo::RepoError;

    #[test]
    fn storage_errors_collapse_to_generic_public_message() {
        let err = ServiceError::Storage(RepoError::Db(DbError::Sqlite(
            rusqlite::Error::InvalidQuery,
        )));
        assert!(!err.is_client_error());
        assert_eq!(err.public_message(), "internal storage failure");
    }

    #[test]
    fn not_found_is_client_facing() {
        let err = ServiceError::from(RepoError::NotFound {
            table: "productos",
            id: 9,
        });
        assert!(err.is_client_error());
        assert!(err.public_message().contains("productos"));
    }
}
