//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `usuarios` storage.
//!
//! # Invariants
//! - The asset path column is written verbatim from the caller; deciding
//!   which file is current belongs to the lifecycle layer, not here.

use super::{delete_row, insert_row, read_back_missing, update_row, RepoResult};
use crate::model::usuario::{Usuario, UsuarioDraft};
use rusqlite::{params, Connection, Row};

const USUARIO_SELECT_SQL: &str = "SELECT
    idUsuario,
    nombre,
    apellido,
    urlImagen,
    documento,
    contrasena
FROM usuarios";

/// Repository interface for user CRUD operations.
pub trait UsuarioRepository {
    fn list(&self) -> RepoResult<Vec<Usuario>>;
    fn get(&self, id: i64) -> RepoResult<Option<Usuario>>;
    fn insert(&mut self, draft: &UsuarioDraft, asset_path: &str) -> RepoResult<Usuario>;
    fn update(&mut self, id: i64, draft: &UsuarioDraft, asset_path: &str) -> RepoResult<Usuario>;
    fn delete(&mut self, id: i64) -> RepoResult<()>;
}

/// SQLite-backed user repository.
pub struct SqliteUsuarioRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteUsuarioRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl UsuarioRepository for SqliteUsuarioRepository<'_> {
    fn list(&self) -> RepoResult<Vec<Usuario>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USUARIO_SELECT_SQL} ORDER BY idUsuario ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_usuario_row(row)?);
        }
        Ok(items)
    }

    fn get(&self, id: i64) -> RepoResult<Option<Usuario>> {
        query_usuario(self.conn, id)
    }

    fn insert(&mut self, draft: &UsuarioDraft, asset_path: &str) -> RepoResult<Usuario> {
        insert_row(
            self.conn,
            "usuarios",
            "INSERT INTO usuarios (nombre, apellido, urlImagen, documento, contrasena)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                draft.nombre.trim(),
                draft.apellido.trim(),
                asset_path,
                draft.documento.trim(),
                draft.contrasena,
            ],
            |tx, id| query_usuario(tx, id)?.ok_or_else(|| read_back_missing("usuarios", id)),
        )
    }

    fn update(&mut self, id: i64, draft: &UsuarioDraft, asset_path: &str) -> RepoResult<Usuario> {
        update_row(
            self.conn,
            "usuarios",
            id,
            "UPDATE usuarios
             SET nombre = ?1,
                 apellido = ?2,
                 urlImagen = ?3,
                 documento = ?4,
                 contrasena = ?5
             WHERE idUsuario = ?6;",
            params![
                draft.nombre.trim(),
                draft.apellido.trim(),
                asset_path,
                draft.documento.trim(),
                draft.contrasena,
                id,
            ],
            |tx, id| query_usuario(tx, id)?.ok_or_else(|| read_back_missing("usuarios", id)),
        )
    }

    fn delete(&mut self, id: i64) -> RepoResult<()> {
        delete_row(
            self.conn,
            "usuarios",
            id,
            "DELETE FROM usuarios WHERE idUsuario = ?1;",
            params![id],
        )
    }
}

fn query_usuario(conn: &Connection, id: i64) -> RepoResult<Option<Usuario>> {
    let mut stmt = conn.prepare(&format!("{USUARIO_SELECT_SQL} WHERE idUsuario = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_usuario_row(row)?));
    }
    Ok(None)
}

fn parse_usuario_row(row: &Row<'_>) -> RepoResult<Usuario> {
    Ok(Usuario {
        id_usuario: row.get("idUsuario")?,
        nombre: row.get("nombre")?,
        apellido: row.get("apellido")?,
        url_imagen: row.get("urlImagen")?,
        documento: row.get("documento")?,
        contrasena: row.get("contrasena")?,
    })
}
