// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable store on SQLite.
//!
//! rusqlite is blocking, so every call runs on the blocking pool through
//! `spawn_blocking` with a connection from an r2d2 pool.

use super::{KeyValueStore, StoreError};
use chrono::Utc;
use futures_util::future::{BoxFuture, FutureExt};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OptionalExtension;
use std::path::Path;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Create a connection pool from a `sqlite:` URL or a bare path.
pub fn create_pool(database_url: &str) -> Result<DbPool, r2d2::Error> {
    let path = database_url
        .strip_prefix("sqlite:")
        .unwrap_or(database_url);
    // Drop query parameters such as ?mode=rwc
    let path = path.split('?').next().unwrap_or(path);

    let manager = if path == ":memory:" {
        SqliteConnectionManager::memory()
    } else {
        SqliteConnectionManager::file(Path::new(path))
    };

    Pool::builder().max_size(5).build(manager)
}

/// Single-connection pool over a private in-memory database.
pub fn create_memory_pool() -> Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::memory();
    Pool::builder().max_size(1).build(manager)
}

/// [`KeyValueStore`] persisted in the `key_value` table.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Wrap a pool whose migrations have already run.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Fresh in-memory database with the schema applied.
    pub fn in_memory() -> Result<Self, StoreError> {
        let pool = create_memory_pool()?;
        super::migrations::run_migrations_for_tests(&pool)?;
        Ok(Self::new(pool))
    }
}

impl KeyValueStore for SqliteStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StoreError>> {
        let pool = self.pool.clone();
        let key = key.to_string();
        async move {
            tokio::task::spawn_blocking(move || -> Result<Option<String>, StoreError> {
                let conn = pool.get()?;
                let value = conn
                    .query_row(
                        "SELECT value FROM key_value WHERE key = ?",
                        [&key],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(value)
            })
            .await
            .map_err(|e| StoreError::Task(e.to_string()))?
        }
        .boxed()
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        let pool = self.pool.clone();
        let key = key.to_string();
        let value = value.to_string();
        async move {
            tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
                let conn = pool.get()?;
                conn.execute(
                    "INSERT INTO key_value (key, value, updated_at) VALUES (?, ?, ?)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                    rusqlite::params![key, value, Utc::now()],
                )?;
                Ok(())
            })
            .await
            .map_err(|e| StoreError::Task(e.to_string()))?
        }
        .boxed()
    }

    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        let pool = self.pool.clone();
        let key = key.to_string();
        async move {
            tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
                let conn = pool.get()?;
                conn.execute("DELETE FROM key_value WHERE key = ?", [&key])?;
                Ok(())
            })
            .await
            .map_err(|e| StoreError::Task(e.to_string()))?
        }
        .boxed()
    }
}
