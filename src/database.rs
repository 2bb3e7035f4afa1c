// src/database.rs
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const SCHEMA: [&str; 2] = [
    r#"CREATE TABLE IF NOT EXISTS suppliers (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        name       TEXT NOT NULL,
        company    TEXT NOT NULL DEFAULT '',
        email      TEXT NOT NULL,
        phone      TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS products (
        id                INTEGER PRIMARY KEY AUTOINCREMENT,
        name              TEXT NOT NULL,
        quantity_in_stock INTEGER NOT NULL DEFAULT 0,
        quantity_sold     INTEGER NOT NULL DEFAULT 0,
        unit_price        REAL NOT NULL DEFAULT 0,
        revenue           REAL NOT NULL DEFAULT 0,
        supplied_by_id    INTEGER NOT NULL REFERENCES suppliers(id) ON DELETE CASCADE,
        created_at        TEXT NOT NULL
    )"#,
];

pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Creates the tables if they are not there yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!("database schema ready");
    Ok(())
}
