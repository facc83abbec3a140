//! User use-case service.
//!
//! # Responsibility
//! - Provide user CRUD entry points with coupled avatar lifecycle.
//!
//! # Invariants
//! - Same ordering discipline as the product service; the two differ only
//!   in entity shape and asset root.

use super::lifecycle::{row_lock, AssetLifecycle};
use super::ServiceError;
use crate::asset::store::AssetStore;
use crate::model::upload::UploadedFile;
use crate::model::usuario::{Usuario, UsuarioDraft};
use crate::repo::usuario_repo::UsuarioRepository;
use std::sync::PoisonError;

const TABLE: &str = "usuarios";

/// User service facade over repository and asset store.
pub struct UsuarioService<R: UsuarioRepository> {
    repo: R,
    lifecycle: AssetLifecycle,
}

impl<R: UsuarioRepository> UsuarioService<R> {
    /// Creates a service over the given repository and user image root.
    pub fn new(repo: R, assets: AssetStore) -> Self {
        Self {
            repo,
            lifecycle: AssetLifecycle::new(assets),
        }
    }

    pub fn list(&self) -> Result<Vec<Usuario>, ServiceError> {
        Ok(self.repo.list()?)
    }

    pub fn get(&self, id: i64) -> Result<Option<Usuario>, ServiceError> {
        Ok(self.repo.get(id)?)
    }

    /// Creates a user, optionally with an avatar image.
    pub fn create(
        &mut self,
        draft: &UsuarioDraft,
        upload: Option<&UploadedFile>,
    ) -> Result<Usuario, ServiceError> {
        draft.validate()?;

        let repo = &mut self.repo;
        self.lifecycle
            .create("usuario", upload, |asset_path| repo.insert(draft, asset_path))
    }

    /// Updates a user, optionally replacing the avatar.
    pub fn update(
        &mut self,
        id: i64,
        draft: &UsuarioDraft,
        upload: Option<&UploadedFile>,
    ) -> Result<Usuario, ServiceError> {
        draft.validate()?;

        let cell = row_lock(TABLE, id);
        let _guard = cell.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self
            .repo
            .get(id)?
            .ok_or(ServiceError::NotFound { entity: TABLE, id })?;

        let repo = &mut self.repo;
        self.lifecycle
            .update("usuario", &current.url_imagen, upload, |asset_path| {
                repo.update(id, draft, asset_path)
            })
    }

    /// Deletes a user and, only after the row delete committed, the avatar.
    pub fn delete(&mut self, id: i64) -> Result<(), ServiceError> {
        let cell = row_lock(TABLE, id);
        let _guard = cell.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self
            .repo
            .get(id)?
            .ok_or(ServiceError::NotFound { entity: TABLE, id })?;

        let repo = &mut self.repo;
        self.lifecycle
            .delete("usuario", &current.url_imagen, || repo.delete(id))
    }
}
