use rusqlite::Connection;
use std::path::Path;
use tienda_core::db::open_db_in_memory;
use tienda_core::{
    AssetPolicy, AssetStore, ServiceError, SqliteUsuarioRepository, UploadedFile, UsuarioDraft,
    UsuarioService,
};

fn ana_draft() -> UsuarioDraft {
    UsuarioDraft {
        nombre: "ana".to_string(),
        apellido: "reyes".to_string(),
        documento: "1002003004".to_string(),
        contrasena: "secreta".to_string(),
    }
}

fn avatar_upload(name: &str) -> UploadedFile {
    UploadedFile::new(name, vec![5u8; 256], "image/jpeg")
}

fn usuario_service<'conn>(
    conn: &'conn mut Connection,
    root: &Path,
) -> UsuarioService<SqliteUsuarioRepository<'conn>> {
    UsuarioService::new(
        SqliteUsuarioRepository::new(conn),
        AssetStore::new(root, AssetPolicy::images()),
    )
}

#[test]
fn create_with_avatar_persists_row_and_file() {
    let mut conn = open_db_in_memory().unwrap();
    let root = tempfile::tempdir().unwrap();
    let mut service = usuario_service(&mut conn, root.path());

    let created = service
        .create(&ana_draft(), Some(&avatar_upload("ana.jpg")))
        .unwrap();

    assert!(created.id_usuario > 0);
    assert!(created.url_imagen.ends_with(".jpg"));
    assert!(root.path().join(&created.url_imagen).exists());
    assert_eq!(created.nombre, "ana");
}

#[test]
fn create_with_missing_field_is_rejected_before_any_write() {
    let mut conn = open_db_in_memory().unwrap();
    let root = tempfile::tempdir().unwrap();
    let mut service = usuario_service(&mut conn, root.path());

    let mut draft = ana_draft();
    draft.documento = String::new();
    let err = service
        .create(&draft, Some(&avatar_upload("nunca.jpg")))
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(service.list().unwrap().is_empty());
    assert!(std::fs::read_dir(root.path())
        .map(|entries| entries.count() == 0)
        .unwrap_or(true));
}

#[test]
fn update_replaces_avatar_and_keeps_it_without_new_file() {
    let mut conn = open_db_in_memory().unwrap();
    let root = tempfile::tempdir().unwrap();
    let mut service = usuario_service(&mut conn, root.path());

    let created = service
        .create(&ana_draft(), Some(&avatar_upload("antes.jpg")))
        .unwrap();
    let old_path = created.url_imagen.clone();

    let replaced = service
        .update(
            created.id_usuario,
            &ana_draft(),
            Some(&avatar_upload("despues.jpg")),
        )
        .unwrap();
    assert_ne!(replaced.url_imagen, old_path);
    assert!(!root.path().join(&old_path).exists());
    assert!(root.path().join(&replaced.url_imagen).exists());

    let mut draft = ana_draft();
    draft.apellido = "reyes gomez".to_string();
    let renamed = service.update(created.id_usuario, &draft, None).unwrap();
    assert_eq!(renamed.url_imagen, replaced.url_imagen);
    assert_eq!(renamed.apellido, "reyes gomez");
    assert!(root.path().join(&renamed.url_imagen).exists());
}

#[test]
fn delete_removes_row_then_avatar() {
    let mut conn = open_db_in_memory().unwrap();
    let root = tempfile::tempdir().unwrap();
    let mut service = usuario_service(&mut conn, root.path());

    let created = service
        .create(&ana_draft(), Some(&avatar_upload("borrar.jpg")))
        .unwrap();

    service.delete(created.id_usuario).unwrap();
    assert!(service.get(created.id_usuario).unwrap().is_none());
    assert!(!root.path().join(&created.url_imagen).exists());
}

#[test]
fn update_of_missing_id_returns_not_found_without_saving_file() {
    let mut conn = open_db_in_memory().unwrap();
    let root = tempfile::tempdir().unwrap();
    let mut service = usuario_service(&mut conn, root.path());

    let err = service
        .update(404, &ana_draft(), Some(&avatar_upload("perdida.jpg")))
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound { id: 404, .. }));
    assert!(std::fs::read_dir(root.path())
        .map(|entries| entries.count() == 0)
        .unwrap_or(true));
}
