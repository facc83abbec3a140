use rusqlite::Connection;
use std::path::Path;
use tienda_core::db::open_db_in_memory;
use tienda_core::{
    AssetPolicy, AssetStore, Producto, ProductoDraft, ProductoRepository, ProductoService,
    RepoError, RepoResult, ServiceError, SqliteProductoRepository, UploadedFile,
};

fn seeded_conn() -> Connection {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO categorias (nombreCategoria) VALUES ('general');",
        [],
    )
    .unwrap();
    conn
}

fn widget_draft() -> ProductoDraft {
    ProductoDraft {
        cantidad: 4,
        descripcion: "widget".to_string(),
        precio: 9.99,
        unidad: "pcs".to_string(),
        id_categoria: 1,
    }
}

fn png_upload(name: &str, bytes: usize) -> UploadedFile {
    UploadedFile::new(name, vec![3u8; bytes], "image/png")
}

fn image_store(root: &Path) -> AssetStore {
    AssetStore::new(root, AssetPolicy::images())
}

fn stored_files(root: &Path) -> Vec<String> {
    match std::fs::read_dir(root) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn create_with_image_persists_row_and_file() {
    let mut conn = seeded_conn();
    let root = tempfile::tempdir().unwrap();
    let mut service = ProductoService::new(
        SqliteProductoRepository::new(&mut conn),
        image_store(root.path()),
    );

    // 2 MiB png under the 5 MiB image policy
    let upload = png_upload("widget.png", 2 * 1024 * 1024);
    let created = service.create(&widget_draft(), Some(&upload)).unwrap();

    assert!(created.id_producto > 0);
    assert!(created.url_imagen.ends_with(".png"));
    assert!(root.path().join(&created.url_imagen).exists());
}

#[test]
fn create_without_image_stores_empty_path() {
    let mut conn = seeded_conn();
    let root = tempfile::tempdir().unwrap();
    let mut service = ProductoService::new(
        SqliteProductoRepository::new(&mut conn),
        image_store(root.path()),
    );

    let created = service.create(&widget_draft(), None).unwrap();
    assert_eq!(created.url_imagen, "");
    assert!(stored_files(root.path()).is_empty());
}

#[test]
fn create_with_disallowed_extension_writes_nothing() {
    let mut conn = seeded_conn();
    let root = tempfile::tempdir().unwrap();
    let mut service = ProductoService::new(
        SqliteProductoRepository::new(&mut conn),
        image_store(root.path()),
    );

    let upload = UploadedFile::new("widget.exe", vec![1u8; 64], "application/octet-stream");
    let err = service.create(&widget_draft(), Some(&upload)).unwrap_err();

    assert!(err.is_client_error());
    assert!(matches!(err, ServiceError::Asset(_)));
    assert!(service.list().unwrap().is_empty());
    assert!(stored_files(root.path()).is_empty());
}

#[test]
fn failed_insert_compensates_by_deleting_saved_file() {
    let mut conn = seeded_conn();
    let root = tempfile::tempdir().unwrap();
    let mut service = ProductoService::new(
        SqliteProductoRepository::new(&mut conn),
        image_store(root.path()),
    );

    // dangling idCategoria makes the insert fail after the file was saved
    let mut draft = widget_draft();
    draft.id_categoria = 999;
    let err = service
        .create(&draft, Some(&png_upload("huerfano.png", 64)))
        .unwrap_err();

    assert!(matches!(err, ServiceError::Storage(_)));
    assert!(service.list().unwrap().is_empty());
    assert!(stored_files(root.path()).is_empty());
}

#[test]
fn update_with_new_image_replaces_file_after_commit() {
    let mut conn = seeded_conn();
    let root = tempfile::tempdir().unwrap();
    let mut service = ProductoService::new(
        SqliteProductoRepository::new(&mut conn),
        image_store(root.path()),
    );

    let created = service
        .create(&widget_draft(), Some(&png_upload("antes.png", 64)))
        .unwrap();
    let old_path = created.url_imagen.clone();

    let updated = service
        .update(
            created.id_producto,
            &widget_draft(),
            Some(&png_upload("despues.png", 64)),
        )
        .unwrap();

    assert_ne!(updated.url_imagen, old_path);
    assert!(!root.path().join(&old_path).exists());
    assert!(root.path().join(&updated.url_imagen).exists());
    assert_eq!(stored_files(root.path()).len(), 1);
}

#[test]
fn update_without_image_keeps_existing_asset() {
    let mut conn = seeded_conn();
    let root = tempfile::tempdir().unwrap();
    let mut service = ProductoService::new(
        SqliteProductoRepository::new(&mut conn),
        image_store(root.path()),
    );

    let created = service
        .create(&widget_draft(), Some(&png_upload("estable.png", 64)))
        .unwrap();

    // price-only change, no new file
    let mut draft = widget_draft();
    draft.precio = 12.5;
    let updated = service.update(created.id_producto, &draft, None).unwrap();

    assert_eq!(updated.url_imagen, created.url_imagen);
    assert_eq!(updated.precio, 12.5);
    assert!(root.path().join(&updated.url_imagen).exists());
}

#[test]
fn update_with_invalid_image_mutates_nothing() {
    let mut conn = seeded_conn();
    let root = tempfile::tempdir().unwrap();
    let mut service = ProductoService::new(
        SqliteProductoRepository::new(&mut conn),
        image_store(root.path()),
    );

    let created = service
        .create(&widget_draft(), Some(&png_upload("intacto.png", 64)))
        .unwrap();

    let bad_upload = UploadedFile::new("virus.exe", vec![1u8; 64], "application/octet-stream");
    let mut draft = widget_draft();
    draft.precio = 99.0;
    let err = service
        .update(created.id_producto, &draft, Some(&bad_upload))
        .unwrap_err();

    assert!(err.is_client_error());
    let row = service.get(created.id_producto).unwrap().unwrap();
    assert_eq!(row, created);
    assert_eq!(stored_files(root.path()).len(), 1);
    assert!(root.path().join(&created.url_imagen).exists());
}

#[test]
fn failed_row_update_keeps_old_file_and_removes_new_one() {
    let mut conn = seeded_conn();
    let root = tempfile::tempdir().unwrap();

    let created = {
        let mut service = ProductoService::new(
            SqliteProductoRepository::new(&mut conn),
            image_store(root.path()),
        );
        service
            .create(&widget_draft(), Some(&png_upload("original.png", 64)))
            .unwrap()
    };

    let mut service = ProductoService::new(
        UpdateFailsRepo(SqliteProductoRepository::new(&mut conn)),
        image_store(root.path()),
    );
    let err = service
        .update(
            created.id_producto,
            &widget_draft(),
            Some(&png_upload("reemplazo.png", 64)),
        )
        .unwrap_err();

    assert!(matches!(err, ServiceError::Storage(_)));
    assert!(root.path().join(&created.url_imagen).exists());
    assert_eq!(stored_files(root.path()).len(), 1);

    let row = service.get(created.id_producto).unwrap().unwrap();
    assert_eq!(row.url_imagen, created.url_imagen);
}

#[test]
fn delete_removes_row_then_asset() {
    let mut conn = seeded_conn();
    let root = tempfile::tempdir().unwrap();
    let mut service = ProductoService::new(
        SqliteProductoRepository::new(&mut conn),
        image_store(root.path()),
    );

    let created = service
        .create(&widget_draft(), Some(&png_upload("borrar.png", 64)))
        .unwrap();

    service.delete(created.id_producto).unwrap();
    assert!(service.get(created.id_producto).unwrap().is_none());
    assert!(!root.path().join(&created.url_imagen).exists());
}

#[test]
fn delete_of_missing_id_touches_no_files() {
    let mut conn = seeded_conn();
    let root = tempfile::tempdir().unwrap();
    let mut service = ProductoService::new(
        SqliteProductoRepository::new(&mut conn),
        image_store(root.path()),
    );

    let created = service
        .create(&widget_draft(), Some(&png_upload("queda.png", 64)))
        .unwrap();

    let err = service.delete(999).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { id: 999, .. }));
    assert!(root.path().join(&created.url_imagen).exists());
    assert_eq!(stored_files(root.path()).len(), 1);
}

/// Delegating double whose `update` always reports a persistence failure,
/// exercising the coordinator's compensation branch.
struct UpdateFailsRepo<'conn>(SqliteProductoRepository<'conn>);

impl ProductoRepository for UpdateFailsRepo<'_> {
    fn list(&self) -> RepoResult<Vec<Producto>> {
        self.0.list()
    }

    fn get(&self, id: i64) -> RepoResult<Option<Producto>> {
        self.0.get(id)
    }

    fn insert(&mut self, draft: &ProductoDraft, asset_path: &str) -> RepoResult<Producto> {
        self.0.insert(draft, asset_path)
    }

    fn update(
        &mut self,
        _id: i64,
        _draft: &ProductoDraft,
        _asset_path: &str,
    ) -> RepoResult<Producto> {
        Err(RepoError::NoRowsAffected {
            table: "productos",
            operation: "update",
        })
    }

    fn delete(&mut self, id: i64) -> RepoResult<()> {
        self.0.delete(id)
    }
}
