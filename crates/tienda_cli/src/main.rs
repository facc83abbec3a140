//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tienda_core` wiring: config,
//!   logging, database bootstrap.
//! - Keep output deterministic for quick local sanity checks.

use tienda_core::{init_logging, AppConfig};

fn main() {
    let config = match AppConfig::load("tienda.json") {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("logging error: {err}");
        std::process::exit(1);
    }

    let conn = match tienda_core::db::open_db(&config.database_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("database error: {err}");
            std::process::exit(1);
        }
    };

    println!("tienda_core version={}", tienda_core::core_version());
    for table in ["categorias", "productos", "usuarios", "compras"] {
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
                row.get(0)
            })
            .unwrap_or(0);
        println!("{table} rows={count}");
    }
}
