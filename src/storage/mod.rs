// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! On-device key-value storage.
//!
//! Every controller receives its store as an `Arc<dyn KeyValueStore>`, so the
//! durable SQLite store used by the binary can be swapped for the in-memory
//! store in tests. Values are plain strings; structured values (the
//! appointment list) are JSON-encoded by the helpers in this module.

pub mod memory;
pub mod migrations;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use dashmap::DashMap;
use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Keys persisted by the app.
pub mod keys {
    /// `"true"` while the session is authenticated, absent otherwise.
    pub const AUTH: &str = "auth";
    /// Current plan identifier, absent when there is no subscription.
    pub const SUBSCRIPTION: &str = "subscription";
    /// JSON array of booked appointments.
    pub const APPOINTMENTS: &str = "appointments";
    /// Remote user document ID, recorded by a remote login or registration.
    pub const USER_ID: &str = "userId";
}

/// Value stored under [`keys::AUTH`] for an authenticated session.
pub const AUTH_TRUE: &str = "true";

/// Errors from the local store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage task failed: {0}")]
    Task(String),
}

/// Asynchronous string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key was never written or was removed.
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StoreError>>;

    /// Write a value, replacing any previous one.
    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxFuture<'a, Result<(), StoreError>>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StoreError>>;
}

/// Per-key single-writer locks for read-modify-write updates.
///
/// Clones share the same lock table.
#[derive(Clone, Default)]
pub struct KeyLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    /// Get (or create) the lock guarding `key`.
    pub fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Read a JSON-encoded list. A missing or blank value is an empty list.
pub async fn read_json_list<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<T>, StoreError> {
    match store.get(key).await? {
        Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
        _ => Ok(Vec::new()),
    }
}

/// Read, modify and write back a JSON-encoded list under the key's lock.
///
/// Existing elements are handled as raw JSON so records written by other
/// versions of the app survive the rewrite unchanged. Nothing is written
/// if `apply` fails.
pub async fn modify_json_list<R, F>(
    store: &dyn KeyValueStore,
    locks: &KeyLocks,
    key: &str,
    apply: F,
) -> Result<R, StoreError>
where
    F: FnOnce(&mut Vec<Value>) -> Result<R, StoreError>,
{
    let lock = locks.lock_for(key);
    let _guard = lock.lock().await;

    let mut items: Vec<Value> = read_json_list(store, key).await?;
    let result = apply(&mut items)?;
    let encoded = serde_json::to_string(&items)?;
    store.set(key, &encoded).await?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_read_json_list_missing_and_blank_are_empty() {
        let store = MemoryStore::new();
        let items: Vec<Value> = read_json_list(&store, "list").await.unwrap();
        assert!(items.is_empty());

        store.set("list", "  ").await.unwrap();
        let items: Vec<Value> = read_json_list(&store, "list").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_read_json_list_rejects_corrupt_value() {
        let store = MemoryStore::new();
        store.set("list", "{not json").await.unwrap();

        let result: Result<Vec<Value>, _> = read_json_list(&store, "list").await;
        assert!(matches!(result, Err(StoreError::Encoding(_))));
    }

    #[tokio::test]
    async fn test_modify_json_list_keeps_unknown_fields() {
        let store = MemoryStore::new();
        store
            .set("list", r#"[{"id":1,"legacy":"kept"}]"#)
            .await
            .unwrap();
        let locks = KeyLocks::default();

        let len = modify_json_list(&store, &locks, "list", |items| {
            items.push(json!({"id": "new"}));
            Ok(items.len())
        })
        .await
        .unwrap();
        assert_eq!(len, 2);

        let items: Vec<Value> = read_json_list(&store, "list").await.unwrap();
        assert_eq!(items[0], json!({"id": 1, "legacy": "kept"}));
        assert_eq!(items[1], json!({"id": "new"}));
    }

    #[tokio::test]
    async fn test_modify_json_list_failure_writes_nothing() {
        let store = MemoryStore::new();
        store.set("list", "[1]").await.unwrap();
        let locks = KeyLocks::default();

        let result: Result<(), _> = modify_json_list(&store, &locks, "list", |items| {
            items.push(json!(2));
            Err(StoreError::Unavailable("rejected".to_string()))
        })
        .await;
        assert!(result.is_err());
        assert_eq!(store.peek("list").as_deref(), Some("[1]"));
    }

    #[test]
    fn test_key_locks_share_lock_per_key() {
        let locks = KeyLocks::default();
        let a = locks.lock_for("appointments");
        let b = locks.clone().lock_for("appointments");
        let c = locks.lock_for("subscription");

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
    }
}
