//! Category domain model.
//!
//! # Invariants
//! - `nombre_categoria` is never blank on a validated draft.

use super::{require_text, FieldValidationError};
use serde::{Deserialize, Serialize};

/// Read model for one `categorias` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Categoria {
    /// Surrogate key assigned by the store on insert.
    #[serde(rename = "idCategoria")]
    pub id_categoria: i64,
    #[serde(rename = "nombreCategoria")]
    pub nombre_categoria: String,
}

/// Write model for category create/update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoriaDraft {
    #[serde(rename = "nombreCategoria")]
    pub nombre_categoria: String,
}

impl CategoriaDraft {
    pub fn new(nombre_categoria: impl Into<String>) -> Self {
        Self {
            nombre_categoria: nombre_categoria.into(),
        }
    }

    /// Checks required fields without touching storage.
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        require_text("categoria", "nombreCategoria", &self.nombre_categoria)
    }
}

#[cfg(test)]
mod tests {
    use super::CategoriaDraft;
    use crate::model::FieldValidationError;

    #[test]
    fn blank_name_is_rejected() {
        let err = CategoriaDraft::new("   ").validate().unwrap_err();
        assert!(matches!(err, FieldValidationError::MissingField { .. }));
    }

    #[test]
    fn named_draft_is_valid() {
        assert!(CategoriaDraft::new("bebidas").validate().is_ok());
    }
}
