// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Embedded SQL migrations for the local store.

use super::sqlite::DbPool;
use super::StoreError;

/// All migrations in order, each as (filename, sql_content)
pub const MIGRATIONS: &[(&str, &str)] = &[(
    "001_create_key_value.sql",
    include_str!("../../migrations/001_create_key_value.sql"),
)];

/// Run pending migrations, recording applied ones in `_migrations`.
pub fn run_migrations(pool: &DbPool) -> Result<(), StoreError> {
    tracing::info!("Running migrations");

    let conn = pool.get()?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    for (filename, sql) in MIGRATIONS {
        let already_applied: bool = conn.query_row(
            "SELECT COUNT(*) > 0 FROM _migrations WHERE name = ?",
            [filename],
            |row| row.get(0),
        )?;

        if already_applied {
            tracing::debug!(migration = filename, "Skipping applied migration");
            continue;
        }

        tracing::info!(migration = filename, "Applying migration");
        conn.execute_batch(sql)?;
        conn.execute("INSERT INTO _migrations (name) VALUES (?)", [filename])?;
    }

    Ok(())
}

/// Apply every migration without tracking, for fresh in-memory databases.
pub fn run_migrations_for_tests(pool: &DbPool) -> Result<(), StoreError> {
    let conn = pool.get()?;
    for (_filename, sql) in MIGRATIONS {
        conn.execute_batch(sql)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::create_memory_pool;

    #[test]
    fn test_run_migrations_is_repeatable() {
        let pool = create_memory_pool().unwrap();
        run_migrations(&pool).unwrap();
        run_migrations(&pool).unwrap();

        let conn = pool.get().unwrap();
        let applied: i64 = conn
            .query_row("SELECT COUNT(*) FROM _migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(applied, MIGRATIONS.len() as i64);
    }
}
