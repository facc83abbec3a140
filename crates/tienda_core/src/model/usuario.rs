//! User domain model.
//!
//! # Invariants
//! - `url_imagen` empty string means "no asset"; a non-empty value must
//!   reference a file under the user asset root after every committed
//!   operation.
//! - `contrasena` is stored as supplied; credential policy belongs to the
//!   boundary layer.

use super::{require_text, FieldValidationError};
use serde::{Deserialize, Serialize};

/// Read model for one `usuarios` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usuario {
    /// Surrogate key assigned by the store on insert.
    #[serde(rename = "idUsuario")]
    pub id_usuario: i64,
    pub nombre: String,
    pub apellido: String,
    /// Relative asset path under the user root; empty = no asset.
    #[serde(rename = "urlImagen")]
    pub url_imagen: String,
    pub documento: String,
    pub contrasena: String,
}

impl Usuario {
    /// Returns whether this row currently owns an asset.
    pub fn has_asset(&self) -> bool {
        !self.url_imagen.is_empty()
    }
}

/// Write model for user create/update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsuarioDraft {
    pub nombre: String,
    pub apellido: String,
    pub documento: String,
    pub contrasena: String,
}

impl UsuarioDraft {
    /// Checks required fields without touching storage.
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        require_text("usuario", "nombre", &self.nombre)?;
        require_text("usuario", "apellido", &self.apellido)?;
        require_text("usuario", "documento", &self.documento)?;
        require_text("usuario", "contrasena", &self.contrasena)
    }
}
