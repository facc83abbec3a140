//! Core domain logic for the tienda entity store.
//! This crate is the single source of truth for the coupled row/asset
//! lifecycle invariants.

pub mod asset;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use asset::store::{AssetError, AssetPolicy, AssetStore, IMAGE_EXTENSIONS};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging};
pub use model::categoria::{Categoria, CategoriaDraft};
pub use model::compra::{Compra, CompraDraft};
pub use model::producto::{Producto, ProductoDraft};
pub use model::upload::UploadedFile;
pub use model::usuario::{Usuario, UsuarioDraft};
pub use model::FieldValidationError;
pub use repo::categoria_repo::{CategoriaRepository, SqliteCategoriaRepository};
pub use repo::compra_repo::{CompraRepository, SqliteCompraRepository};
pub use repo::producto_repo::{ProductoRepository, SqliteProductoRepository};
pub use repo::usuario_repo::{SqliteUsuarioRepository, UsuarioRepository};
pub use repo::{RepoError, RepoResult};
pub use service::categoria_service::CategoriaService;
pub use service::compra_service::CompraService;
pub use service::producto_service::ProductoService;
pub use service::usuario_service::UsuarioService;
pub use service::ServiceError;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
