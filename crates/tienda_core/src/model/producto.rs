//! Product domain model.
//!
//! # Responsibility
//! - Define the `productos` read model and its asset-free write draft.
//!
//! # Invariants
//! - `url_imagen` empty string means "no asset"; a non-empty value must
//!   reference a file under the product asset root after every committed
//!   operation.
//! - Drafts never carry an asset path; the lifecycle layer decides it.

use super::{require_positive_id, require_text, FieldValidationError};
use serde::{Deserialize, Serialize};

/// Read model for one `productos` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producto {
    /// Surrogate key assigned by the store on insert.
    #[serde(rename = "idProducto")]
    pub id_producto: i64,
    pub cantidad: i64,
    pub descripcion: String,
    pub precio: f64,
    pub unidad: String,
    /// Relative asset path under the product root; empty = no asset.
    #[serde(rename = "urlImagen")]
    pub url_imagen: String,
    #[serde(rename = "idCategoria")]
    pub id_categoria: i64,
}

impl Producto {
    /// Returns whether this row currently owns an asset.
    pub fn has_asset(&self) -> bool {
        !self.url_imagen.is_empty()
    }
}

/// Write model for product create/update.
///
/// `cantidad` defaults to 0 when the inbound request omits it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductoDraft {
    #[serde(default)]
    pub cantidad: i64,
    pub descripcion: String,
    pub precio: f64,
    pub unidad: String,
    #[serde(rename = "idCategoria")]
    pub id_categoria: i64,
}

impl ProductoDraft {
    /// Checks required fields without touching storage.
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        require_text("producto", "descripcion", &self.descripcion)?;
        require_text("producto", "unidad", &self.unidad)?;
        if self.precio <= 0.0 {
            return Err(FieldValidationError::NonPositiveField {
                entity: "producto",
                field: "precio",
            });
        }
        require_positive_id("producto", "idCategoria", self.id_categoria)
    }
}

#[cfg(test)]
mod tests {
    use super::ProductoDraft;
    use crate::model::FieldValidationError;

    fn draft() -> ProductoDraft {
        ProductoDraft {
            cantidad: 10,
            descripcion: "widget".to_string(),
            precio: 9.99,
            unidad: "pcs".to_string(),
            id_categoria: 1,
        }
    }

    #[test]
    fn complete_draft_is_valid() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn blank_descripcion_is_rejected() {
        let mut invalid = draft();
        invalid.descripcion = " ".to_string();
        assert!(matches!(
            invalid.validate(),
            Err(FieldValidationError::MissingField {
                field: "descripcion",
                ..
            })
        ));
    }

    #[test]
    fn zero_precio_is_rejected() {
        let mut invalid = draft();
        invalid.precio = 0.0;
        assert!(matches!(
            invalid.validate(),
            Err(FieldValidationError::NonPositiveField { field: "precio", .. })
        ));
    }

    #[test]
    fn missing_categoria_is_rejected() {
        let mut invalid = draft();
        invalid.id_categoria = 0;
        assert!(invalid.validate().is_err());
    }
}
