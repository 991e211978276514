//! Common testing utilities: document-store doubles and generic contract
//! tests reusable across backends.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use docstore::UserStore;
use docstore_core::{DocumentStore, Record, StoreError, StoreResult};
use serde_json::json;

/// Build a [`Record`] from a `json!` object literal.
pub fn record(value: serde_json::Value) -> Record {
    value
        .as_object()
        .expect("record literals must be JSON objects")
        .clone()
}

/// Wraps any store and counts the calls reaching it. Lets tests prove that a
/// locally rejected operation performed no I/O at all.
pub struct CountingStore<S> {
    inner: S,
    gets: AtomicUsize,
    sets: AtomicUsize,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            gets: AtomicUsize::new(0),
            sets: AtomicUsize::new(0),
        }
    }

    pub fn get_calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn set_calls(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.get_calls() + self.set_calls()
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for CountingStore<S> {
    async fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Record>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(collection, key).await
    }

    async fn set(
        &self,
        collection: &str,
        key: &str,
        data: &Record,
        merge: bool,
    ) -> StoreResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(collection, key, data, merge).await
    }
}

/// A store whose every call fails with a configurable I/O error, for
/// asserting that client failures surface with their identity intact.
pub struct FailingStore {
    kind: std::io::ErrorKind,
    message: &'static str,
}

impl FailingStore {
    pub fn new(kind: std::io::ErrorKind, message: &'static str) -> Self {
        Self { kind, message }
    }

    fn error(&self) -> StoreError {
        StoreError::backend(std::io::Error::new(self.kind, self.message))
    }
}

impl Default for FailingStore {
    fn default() -> Self {
        Self::new(
            std::io::ErrorKind::ConnectionRefused,
            "simulated connectivity failure",
        )
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn get(&self, _collection: &str, _key: &str) -> StoreResult<Option<Record>> {
        Err(self.error())
    }

    async fn set(
        &self,
        _collection: &str,
        _key: &str,
        _data: &Record,
        _merge: bool,
    ) -> StoreResult<()> {
        Err(self.error())
    }
}

/// Generic merge-upsert roundtrip test: two upserts with disjoint fields end
/// up as one record carrying the union.
pub async fn test_merge_roundtrip<S: DocumentStore>(store: Arc<S>) -> StoreResult<()> {
    let users = UserStore::new(store);

    users
        .upsert(&record(json!({"email": "a@example.com", "name": "X"})))
        .await?;
    users
        .upsert(&record(json!({"email": "a@example.com", "age": 30})))
        .await?;

    let found = users.fetch("a@example.com").await?;
    assert_eq!(
        found,
        Some(record(
            json!({"email": "a@example.com", "name": "X", "age": 30})
        ))
    );
    Ok(())
}

/// Generic absent-read test: fetching a never-written key is `Ok(None)`.
pub async fn test_absent_fetch<S: DocumentStore>(store: Arc<S>) -> StoreResult<()> {
    let users = UserStore::new(store);
    assert!(users.fetch("nobody@example.com").await?.is_none());
    Ok(())
}
