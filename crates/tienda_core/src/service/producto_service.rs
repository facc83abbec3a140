//! Product use-case service.
//!
//! # Responsibility
//! - Provide product CRUD entry points with coupled image lifecycle.
//!
//! # Invariants
//! - Update/Delete hold the row's advisory lock across the whole
//!   fetch/save/mutate/cleanup sequence.
//! - The row read under the lock is the authority on which file is current.

use super::lifecycle::{row_lock, AssetLifecycle};
use super::ServiceError;
use crate::asset::store::AssetStore;
use crate::model::producto::{Producto, ProductoDraft};
use crate::model::upload::UploadedFile;
use crate::repo::producto_repo::ProductoRepository;
use std::sync::PoisonError;

const TABLE: &str = "productos";

/// Product service facade over repository and asset store.
pub struct ProductoService<R: ProductoRepository> {
    repo: R,
    lifecycle: AssetLifecycle,
}

impl<R: ProductoRepository> ProductoService<R> {
    /// Creates a service over the given repository and product image root.
    pub fn new(repo: R, assets: AssetStore) -> Self {
        Self {
            repo,
            lifecycle: AssetLifecycle::new(assets),
        }
    }

    pub fn list(&self) -> Result<Vec<Producto>, ServiceError> {
        Ok(self.repo.list()?)
    }

    pub fn get(&self, id: i64) -> Result<Option<Producto>, ServiceError> {
        Ok(self.repo.get(id)?)
    }

    /// Creates a product, optionally with an image.
    ///
    /// No side effects when field or file validation fails; a saved image is
    /// removed again when the insert fails.
    pub fn create(
        &mut self,
        draft: &ProductoDraft,
        upload: Option<&UploadedFile>,
    ) -> Result<Producto, ServiceError> {
        draft.validate()?;

        let repo = &mut self.repo;
        self.lifecycle
            .create("producto", upload, |asset_path| repo.insert(draft, asset_path))
    }

    /// Updates a product, optionally replacing its image.
    ///
    /// Without a new file the existing image reference is kept unchanged.
    /// With one, the old file survives until the row update has committed.
    pub fn update(
        &mut self,
        id: i64,
        draft: &ProductoDraft,
        upload: Option<&UploadedFile>,
    ) -> Result<Producto, ServiceError> {
        draft.validate()?;

        let cell = row_lock(TABLE, id);
        let _guard = cell.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self
            .repo
            .get(id)?
            .ok_or(ServiceError::NotFound { entity: TABLE, id })?;

        let repo = &mut self.repo;
        self.lifecycle
            .update("producto", &current.url_imagen, upload, |asset_path| {
                repo.update(id, draft, asset_path)
            })
    }

    /// Deletes a product and, only after the row delete committed, its
    /// image.
    pub fn delete(&mut self, id: i64) -> Result<(), ServiceError> {
        let cell = row_lock(TABLE, id);
        let _guard = cell.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self
            .repo
            .get(id)?
            .ok_or(ServiceError::NotFound { entity: TABLE, id })?;

        let repo = &mut self.repo;
        self.lifecycle
            .delete("producto", &current.url_imagen, || repo.delete(id))
    }
}
