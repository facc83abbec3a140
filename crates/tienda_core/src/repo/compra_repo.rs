//! Shopping line repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `compras` storage.
//!
//! # Invariants
//! - Referential integrity to `usuarios`/`productos` is enforced by the
//!   store; violations surface as `RepoError::Db` and roll back.

use super::{delete_row, insert_row, read_back_missing, update_row, RepoResult};
use crate::model::compra::{Compra, CompraDraft};
use rusqlite::{params, Connection, Row};

const COMPRA_SELECT_SQL: &str = "SELECT idCompra, idUsuario, idProducto FROM compras";

/// Repository interface for shopping line CRUD operations.
pub trait CompraRepository {
    fn list(&self) -> RepoResult<Vec<Compra>>;
    fn get(&self, id: i64) -> RepoResult<Option<Compra>>;
    fn insert(&mut self, draft: &CompraDraft) -> RepoResult<Compra>;
    fn update(&mut self, id: i64, draft: &CompraDraft) -> RepoResult<Compra>;
    fn delete(&mut self, id: i64) -> RepoResult<()>;
}

/// SQLite-backed shopping line repository.
pub struct SqliteCompraRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteCompraRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl CompraRepository for SqliteCompraRepository<'_> {
    fn list(&self) -> RepoResult<Vec<Compra>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMPRA_SELECT_SQL} ORDER BY idCompra ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_compra_row(row)?);
        }
        Ok(items)
    }

    fn get(&self, id: i64) -> RepoResult<Option<Compra>> {
        query_compra(self.conn, id)
    }

    fn insert(&mut self, draft: &CompraDraft) -> RepoResult<Compra> {
        insert_row(
            self.conn,
            "compras",
            "INSERT INTO compras (idUsuario, idProducto) VALUES (?1, ?2);",
            params![draft.id_usuario, draft.id_producto],
            |tx, id| query_compra(tx, id)?.ok_or_else(|| read_back_missing("compras", id)),
        )
    }

    fn update(&mut self, id: i64, draft: &CompraDraft) -> RepoResult<Compra> {
        update_row(
            self.conn,
            "compras",
            id,
            "UPDATE compras SET idUsuario = ?1, idProducto = ?2 WHERE idCompra = ?3;",
            params![draft.id_usuario, draft.id_producto, id],
            |tx, id| query_compra(tx, id)?.ok_or_else(|| read_back_missing("compras", id)),
        )
    }

    fn delete(&mut self, id: i64) -> RepoResult<()> {
        delete_row(
            self.conn,
            "compras",
            id,
            "DELETE FROM compras WHERE idCompra = ?1;",
            params![id],
        )
    }
}

fn query_compra(conn: &Connection, id: i64) -> RepoResult<Option<Compra>> {
    let mut stmt = conn.prepare(&format!("{COMPRA_SELECT_SQL} WHERE idCompra = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_compra_row(row)?));
    }
    Ok(None)
}

fn parse_compra_row(row: &Row<'_>) -> RepoResult<Compra> {
    Ok(Compra {
        id_compra: row.get("idCompra")?,
        id_usuario: row.get("idUsuario")?,
        id_producto: row.get("idProducto")?,
    })
}
