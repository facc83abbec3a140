//! Product repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `productos` storage.
//!
//! # Invariants
//! - The asset path column is written verbatim from the caller; deciding
//!   which file is current belongs to the lifecycle layer, not here.
//! - Text fields are trimmed before persistence.

use super::{delete_row, insert_row, read_back_missing, update_row, RepoResult};
use crate::model::producto::{Producto, ProductoDraft};
use rusqlite::{params, Connection, Row};

const PRODUCTO_SELECT_SQL: &str = "SELECT
    idProducto,
    cantidad,
    descripcion,
    precio,
    unidad,
    urlImagen,
    idCategoria
FROM productos";

/// Repository interface for product CRUD operations.
pub trait ProductoRepository {
    fn list(&self) -> RepoResult<Vec<Producto>>;
    fn get(&self, id: i64) -> RepoResult<Option<Producto>>;
    fn insert(&mut self, draft: &ProductoDraft, asset_path: &str) -> RepoResult<Producto>;
    fn update(&mut self, id: i64, draft: &ProductoDraft, asset_path: &str)
        -> RepoResult<Producto>;
    fn delete(&mut self, id: i64) -> RepoResult<()>;
}

/// SQLite-backed product repository.
pub struct SqliteProductoRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteProductoRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl ProductoRepository for SqliteProductoRepository<'_> {
    fn list(&self) -> RepoResult<Vec<Producto>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCTO_SELECT_SQL} ORDER BY idProducto ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_producto_row(row)?);
        }
        Ok(items)
    }

    fn get(&self, id: i64) -> RepoResult<Option<Producto>> {
        query_producto(self.conn, id)
    }

    fn insert(&mut self, draft: &ProductoDraft, asset_path: &str) -> RepoResult<Producto> {
        insert_row(
            self.conn,
            "productos",
            "INSERT INTO productos (cantidad, descripcion, precio, unidad, urlImagen, idCategoria)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                draft.cantidad,
                draft.descripcion.trim(),
                draft.precio,
                draft.unidad.trim(),
                asset_path,
                draft.id_categoria,
            ],
            |tx, id| query_producto(tx, id)?.ok_or_else(|| read_back_missing("productos", id)),
        )
    }

    fn update(
        &mut self,
        id: i64,
        draft: &ProductoDraft,
        asset_path: &str,
    ) -> RepoResult<Producto> {
        update_row(
            self.conn,
            "productos",
            id,
            "UPDATE productos
             SET cantidad = ?1,
                 descripcion = ?2,
                 precio = ?3,
                 unidad = ?4,
                 urlImagen = ?5,
                 idCategoria = ?6
             WHERE idProducto = ?7;",
            params![
                draft.cantidad,
                draft.descripcion.trim(),
                draft.precio,
                draft.unidad.trim(),
                asset_path,
                draft.id_categoria,
                id,
            ],
            |tx, id| query_producto(tx, id)?.ok_or_else(|| read_back_missing("productos", id)),
        )
    }

    fn delete(&mut self, id: i64) -> RepoResult<()> {
        delete_row(
            self.conn,
            "productos",
            id,
            "DELETE FROM productos WHERE idProducto = ?1;",
            params![id],
        )
    }
}

fn query_producto(conn: &Connection, id: i64) -> RepoResult<Option<Producto>> {
    let mut stmt = conn.prepare(&format!("{PRODUCTO_SELECT_SQL} WHERE idProducto = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_producto_row(row)?));
    }
    Ok(None)
}

fn parse_producto_row(row: &Row<'_>) -> RepoResult<Producto> {
    Ok(Producto {
        id_producto: row.get("idProducto")?,
        cantidad: row.get("cantidad")?,
        descripcion: row.get("descripcion")?,
        precio: row.get("precio")?,
        unidad: row.get("unidad")?,
        url_imagen: row.get("urlImagen")?,
        id_categoria: row.get("idCategoria")?,
    })
}
