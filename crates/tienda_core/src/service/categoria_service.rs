//! Category use-case service.
//!
//! Plain CRUD: same validation and transaction discipline as the
//! asset-carrying services, without the asset step.

use super::ServiceError;
use crate::model::categoria::{Categoria, CategoriaDraft};
use crate::repo::categoria_repo::CategoriaRepository;

/// Category service facade over repository implementations.
pub struct CategoriaService<R: CategoriaRepository> {
    repo: R,
}

impl<R: CategoriaRepository> CategoriaService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list(&self) -> Result<Vec<Categoria>, ServiceError> {
        Ok(self.repo.list()?)
    }

    pub fn get(&self, id: i64) -> Result<Option<Categoria>, ServiceError> {
        Ok(self.repo.get(id)?)
    }

    pub fn create(&mut self, draft: &CategoriaDraft) -> Result<Categoria, ServiceError> {
        draft.validate()?;
        Ok(self.repo.insert(draft)?)
    }

    pub fn update(&mut self, id: i64, draft: &CategoriaDraft) -> Result<Categoria, ServiceError> {
        draft.validate()?;
        Ok(self.repo.update(id, draft)?)
    }

    pub fn delete(&mut self, id: i64) -> Result<(), ServiceError> {
        Ok(self.repo.delete(id)?)
    }
}
