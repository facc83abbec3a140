//! Shopping line domain model.
//!
//! # Invariants
//! - Both foreign keys must be positive on a validated draft; referential
//!   integrity is enforced by the store.

use super::{require_positive_id, FieldValidationError};
use serde::{Deserialize, Serialize};

/// Read model for one `compras` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compra {
    /// Surrogate key assigned by the store on insert.
    #[serde(rename = "idCompra")]
    pub id_compra: i64,
    #[serde(rename = "idUsuario")]
    pub id_usuario: i64,
    #[serde(rename = "idProducto")]
    pub id_producto: i64,
}

/// Write model for shopping line create/update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompraDraft {
    #[serde(rename = "idUsuario")]
    pub id_usuario: i64,
    #[serde(rename = "idProducto")]
    pub id_producto: i64,
}

impl CompraDraft {
    pub fn new(id_usuario: i64, id_producto: i64) -> Self {
        Self {
            id_usuario,
            id_producto,
        }
    }

    /// Checks required fields without touching storage.
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        require_positive_id("compra", "idUsuario", self.id_usuario)?;
        require_positive_id("compra", "idProducto", self.id_producto)
    }
}

#[cfg(test)]
mod tests {
    use super::CompraDraft;

    #[test]
    fn draft_requires_both_references() {
        assert!(CompraDraft::new(1, 2).validate().is_ok());
        assert!(CompraDraft::new(0, 2).validate().is_err());
        assert!(CompraDraft::new(1, -1).validate().is_err());
    }
}
