//! # SQLite database methods
//!
//! This module contains the "low-level" SQLite interactions. They are all plain functions (rather than
//! stateful structs) taking a `&mut SqliteConnection` argument, so callers can obtain a connection from a
//! pool, or open a transaction and pass `&mut *tx`, and compose several calls atomically without any other
//! changes.
use std::env;

use log::info;
use sqlx::{sqlite::SqlitePoolOptions, Error as SqlxError, SqlitePool};

pub mod dashboard;
pub mod orders;
pub mod products;
pub mod roles;
pub mod settings;
pub mod stock_history;
pub mod transactions;
pub mod user_info;
pub mod users;

const SQLITE_DB_URL: &str = "sqlite://data/kaamdhenu.db";

pub fn db_url() -> String {
    let result = env::var("KD_DATABASE_URL").unwrap_or_else(|_| {
        info!("KD_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./src/sqlite/db/migrations").run(pool).await
}
