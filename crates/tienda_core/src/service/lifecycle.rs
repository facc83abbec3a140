//! Coupled row/asset lifecycle coordination.
//!
//! # Responsibility
//! - Order row mutations and asset writes so the composite operation looks
//!   atomic to callers even though the two systems share no transaction.
//! - Perform compensating cleanup when one side fails after the other has
//!   already written.
//! - Serialize concurrent mutations of the same row with advisory locks.
//!
//! # Invariants
//! - A new file is saved BEFORE the row mutation; the row transaction never
//!   spans asset I/O.
//! - A stale file is deleted only AFTER the row mutation has committed.
//! - A failed row mutation deletes the file saved for it and leaves the
//!   previously referenced file untouched.
//! - Committed state never references a nonexistent file. Orphan files may
//!   transiently exist if the process dies between save and cleanup; that
//!   residual is accepted, not guaranteed against.

use super::ServiceError;
use crate::asset::store::AssetStore;
use crate::model::upload::UploadedFile;
use crate::repo::RepoResult;
use log::{info, warn};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Advisory lock cells keyed by `(table, id)`.
///
/// Cells are retained for process lifetime; the map is bounded by the live
/// id space of the store.
static ROW_LOCKS: Lazy<Mutex<HashMap<(&'static str, i64), Arc<Mutex<()>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Returns the lock cell serializing mutations of one entity row.
///
/// Callers hold the cell's guard across the whole fetch/save/mutate/cleanup
/// sequence so a losing concurrent update cannot strand its saved file.
pub(crate) fn row_lock(table: &'static str, id: i64) -> Arc<Mutex<()>> {
    let mut cells = ROW_LOCKS.lock().unwrap_or_else(PoisonError::into_inner);
    cells
        .entry((table, id))
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}

/// Coordinator for entities owning one optional asset.
///
/// The repository side is passed in as a closure over the caller's
/// repository so this component stays generic over entity type.
pub struct AssetLifecycle {
    store: AssetStore,
}

impl AssetLifecycle {
    pub fn new(store: AssetStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    /// Create protocol: validate/save the file first, then insert the row;
    /// compensate by deleting the saved file when the insert fails.
    pub fn create<T>(
        &self,
        entity: &'static str,
        upload: Option<&UploadedFile>,
        insert: impl FnOnce(&str) -> RepoResult<T>,
    ) -> Result<T, ServiceError> {
        let saved = self.save_validated(upload)?;
        let asset_path = saved.as_deref().unwrap_or("");

        match insert(asset_path) {
            Ok(row) => {
                info!(
                    "event=lifecycle_create module=lifecycle status=ok entity={entity} asset={}",
                    display_path(asset_path)
                );
                Ok(row)
            }
            Err(err) => {
                if let Some(path) = saved.as_deref() {
                    warn!(
                        "event=lifecycle_create module=lifecycle status=compensate entity={entity} asset={path}"
                    );
                    self.store.delete(path);
                }
                Err(err.into())
            }
        }
    }

    /// Update protocol: save the new file (if any) before touching the row,
    /// delete the old file only after the row update committed, and delete
    /// the new file when the row update fails.
    ///
    /// The caller must hold the row lock for the full sequence and pass the
    /// currently referenced path.
    pub fn update<T>(
        &self,
        entity: &'static str,
        current_path: &str,
        upload: Option<&UploadedFile>,
        update: impl FnOnce(&str) -> RepoResult<T>,
    ) -> Result<T, ServiceError> {
        let saved = self.save_validated(upload)?;
        let next_path = saved.as_deref().unwrap_or(current_path);

        match update(next_path) {
            Ok(row) => {
                if let Some(new_path) = saved.as_deref() {
                    if !current_path.is_empty() && current_path != new_path {
                        self.store.delete(current_path);
                    }
                }
                info!(
                    "event=lifecycle_update module=lifecycle status=ok entity={entity} asset={}",
                    display_path(next_path)
                );
                Ok(row)
            }
            Err(err) => {
                if let Some(new_path) = saved.as_deref() {
                    warn!(
                        "event=lifecycle_update module=lifecycle status=compensate entity={entity} asset={new_path}"
                    );
                    self.store.delete(new_path);
                }
                Err(err.into())
            }
        }
    }

    /// Delete protocol: remove the row first; only a committed row delete
    /// may trigger removal of the referenced asset.
    pub fn delete(
        &self,
        entity: &'static str,
        current_path: &str,
        remove: impl FnOnce() -> RepoResult<()>,
    ) -> Result<(), ServiceError> {
        remove()?;
        self.store.delete(current_path);
        info!(
            "event=lifecycle_delete module=lifecycle status=ok entity={entity} asset={}",
            display_path(current_path)
        );
        Ok(())
    }

    /// Validates and persists an optional upload, returning the stored
    /// relative path. Rejection or save failure happens before any row
    /// mutation, so the caller can abort with nothing to clean up.
    fn save_validated(&self, upload: Option<&UploadedFile>) -> Result<Option<String>, ServiceError> {
        let Some(file) = upload else {
            return Ok(None);
        };

        self.store.validate(file)?;
        let name = AssetStore::generate_name(&file.filename);
        let path = self.store.save(file, &name)?;
        Ok(Some(path))
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "none"
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::row_lock;

    #[test]
    fn row_lock_returns_same_cell_for_same_key() {
        let first = row_lock("productos", 41);
        let second = row_lock("productos", 41);
        assert!(std::sync::Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn row_lock_distinguishes_tables_and_ids() {
        let base = row_lock("productos", 42);
        assert!(!std::sync::Arc::ptr_eq(&base, &row_lock("usuarios", 42)));
        assert!(!std::sync::Arc::ptr_eq(&base, &row_lock("productos", 43)));
    }
}
