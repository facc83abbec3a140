//! Shopping line use-case service.
//!
//! Plain CRUD over `compras`; referential failures from the store surface
//! as internal storage errors.

use super::ServiceError;
use crate::model::compra::{Compra, CompraDraft};
use crate::repo::compra_repo::CompraRepository;

/// Shopping line service facade over repository implementations.
pub struct CompraService<R: CompraRepository> {
    repo: R,
}

impl<R: CompraRepository> CompraService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list(&self) -> Result<Vec<Compra>, ServiceError> {
        Ok(self.repo.list()?)
    }

    pub fn get(&self, id: i64) -> Result<Option<Compra>, ServiceError> {
        Ok(self.repo.get(id)?)
    }

    pub fn create(&mut self, draft: &CompraDraft) -> Result<Compra, ServiceError> {
        draft.validate()?;
        Ok(self.repo.insert(draft)?)
    }

    pub fn update(&mut self, id: i64, draft: &CompraDraft) -> Result<Compra, ServiceError> {
        draft.validate()?;
        Ok(self.repo.update(id, draft)?)
    }

    pub fn delete(&mut self, id: i64) -> Result<(), ServiceError> {
        Ok(self.repo.delete(id)?)
    }
}
