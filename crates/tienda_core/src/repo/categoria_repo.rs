//! Category repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `categorias` storage.
//! - Keep SQL details inside the persistence boundary.

use super::{delete_row, insert_row, read_back_missing, update_row, RepoResult};
use crate::model::categoria::{Categoria, CategoriaDraft};
use rusqlite::{params, Connection, Row};

const CATEGORIA_SELECT_SQL: &str = "SELECT idCategoria, nombreCategoria FROM categorias";

/// Repository interface for category CRUD operations.
pub trait CategoriaRepository {
    fn list(&self) -> RepoResult<Vec<Categoria>>;
    fn get(&self, id: i64) -> RepoResult<Option<Categoria>>;
    fn insert(&mut self, draft: &CategoriaDraft) -> RepoResult<Categoria>;
    fn update(&mut self, id: i64, draft: &CategoriaDraft) -> RepoResult<Categoria>;
    fn delete(&mut self, id: i64) -> RepoResult<()>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoriaRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteCategoriaRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl CategoriaRepository for SqliteCategoriaRepository<'_> {
    fn list(&self) -> RepoResult<Vec<Categoria>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORIA_SELECT_SQL} ORDER BY idCategoria ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_categoria_row(row)?);
        }
        Ok(items)
    }

    fn get(&self, id: i64) -> RepoResult<Option<Categoria>> {
        query_categoria(self.conn, id)
    }

    fn insert(&mut self, draft: &CategoriaDraft) -> RepoResult<Categoria> {
        insert_row(
            self.conn,
            "categorias",
            "INSERT INTO categorias (nombreCategoria) VALUES (?1);",
            params![draft.nombre_categoria.trim()],
            |tx, id| query_categoria(tx, id)?.ok_or_else(|| read_back_missing("categorias", id)),
        )
    }

    fn update(&mut self, id: i64, draft: &CategoriaDraft) -> RepoResult<Categoria> {
        update_row(
            self.conn,
            "categorias",
            id,
            "UPDATE categorias SET nombreCategoria = ?1 WHERE idCategoria = ?2;",
            params![draft.nombre_categoria.trim(), id],
            |tx, id| query_categoria(tx, id)?.ok_or_else(|| read_back_missing("categorias", id)),
        )
    }

    fn delete(&mut self, id: i64) -> RepoResult<()> {
        delete_row(
            self.conn,
            "categorias",
            id,
            "DELETE FROM categorias WHERE idCategoria = ?1;",
            params![id],
        )
    }
}

fn query_categoria(conn: &Connection, id: i64) -> RepoResult<Option<Categoria>> {
    let mut stmt = conn.prepare(&format!("{CATEGORIA_SELECT_SQL} WHERE idCategoria = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_categoria_row(row)?));
    }
    Ok(None)
}

fn parse_categoria_row(row: &Row<'_>) -> RepoResult<Categoria> {
    Ok(Categoria {
        id_categoria: row.get("idCategoria")?,
        nombre_categoria: row.get("nombreCategoria")?,
    })
}
