// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store for tests and offline runs.

use super::{KeyValueStore, StoreError};
use dashmap::DashMap;
use futures_util::future::{BoxFuture, FutureExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Volatile [`KeyValueStore`] backed by a `DashMap`.
///
/// Reads and writes can be switched to fail, to exercise the error paths of
/// the controllers. Clones share the same contents and switches.
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<DashMap<String, String>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value before handing the store out.
    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Make every subsequent read fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write and removal fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Inspect a value without going through the async interface.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|v| v.value().clone())
    }

    fn check(&self, flag: &AtomicBool, op: &str) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("{} disabled", op)));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StoreError>> {
        async move {
            self.check(&self.fail_reads, "reads")?;
            Ok(self.peek(key))
        }
        .boxed()
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        async move {
            self.check(&self.fail_writes, "writes")?;
            self.values.insert(key.to_string(), value.to_string());
            Ok(())
        }
        .boxed()
    }

    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        async move {
            self.check(&self.fail_writes, "writes")?;
            self.values.remove(key);
            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("auth").await.unwrap(), None);

        store.set("auth", "true").await.unwrap();
        assert_eq!(store.get("auth").await.unwrap().as_deref(), Some("true"));

        store.remove("auth").await.unwrap();
        assert_eq!(store.get("auth").await.unwrap(), None);

        // Removing twice is fine
        store.remove("auth").await.unwrap();
    }

    #[tokio::test]
    async fn test_failure_switches() {
        let store = MemoryStore::new().with_value("subscription", "basic");

        store.set_fail_reads(true);
        assert!(matches!(
            store.get("subscription").await,
            Err(StoreError::Unavailable(_))
        ));

        store.set_fail_reads(false);
        store.set_fail_writes(true);
        assert!(store.set("subscription", "premium").await.is_err());
        assert!(store.remove("subscription").await.is_err());
        assert_eq!(store.peek("subscription").as_deref(), Some("basic"));
    }

    #[tokio::test]
    async fn test_clones_share_contents() {
        let store = MemoryStore::new();
        let clone = store.clone();
        clone.set("userId", "u-1").await.unwrap();
        assert_eq!(store.peek("userId").as_deref(), Some("u-1"));
    }
}
