#![forbid(unsafe_code)]
//! Facade crate for the `docstore` record-store adapter.
//!
//! This crate provides the main public API: the [`UserStore`] adapter plus
//! re-exports of the core types, so applications only need to add this single
//! crate as a dependency and pick a backend implementing [`DocumentStore`].
//!
//! ```ignore
//! use std::sync::Arc;
//! use docstore::{Record, UserStore};
//! use docstore_memory::MemoryStore;
//!
//! let users = UserStore::new(Arc::new(MemoryStore::new()));
//! let mut data = Record::new();
//! data.insert("email".into(), "a@example.com".into());
//! data.insert("name".into(), "X".into());
//! users.upsert(&data).await?;
//! let found = users.fetch("a@example.com").await?;
//! ```

use std::sync::Arc;

// Re-export the core surface.
pub use docstore_core::{async_trait, DocumentStore, Record, StoreError, StoreResult};

/// The collection all user records live in, keyed by email.
pub const USERS_COLLECTION: &str = "users";

#[inline]
#[allow(unused_variables)]
fn obs_record(op: &str, success: bool) {
    #[cfg(feature = "tracing")]
    {
        tracing::info!(
            op = op,
            collection = USERS_COLLECTION,
            success = success,
            "adapter op"
        );
    }
}

/// Extract the storage key from a record. A missing field, JSON null, a
/// non-string value, or the empty string all count as absent.
fn record_email(data: &Record) -> Option<&str> {
    data.get("email")
        .and_then(serde_json::Value::as_str)
        .filter(|email| !email.is_empty())
}

/// Adapter exposing email-keyed access to user records over an injected
/// document-store client. The client handle is shared, never owned or
/// reconfigured here.
pub struct UserStore<S> {
    store: Arc<S>,
}

impl<S: DocumentStore> UserStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Look up the record stored under `email`. Returns `Ok(None)` when no
    /// record exists; client failures propagate unmodified.
    pub async fn fetch(&self, email: &str) -> StoreResult<Option<Record>> {
        let result = self.store.get(USERS_COLLECTION, email).await;
        obs_record("fetch", result.is_ok());
        result
    }

    /// Merge `data` into the record keyed by its `email` field, creating the
    /// record if none exists. Fields absent from `data` are left untouched.
    ///
    /// Rejects with [`StoreError::EmailRequired`] before any client call when
    /// `data` carries no usable `email`.
    pub async fn upsert(&self, data: &Record) -> StoreResult<()> {
        let Some(email) = record_email(data) else {
            return Err(StoreError::EmailRequired);
        };
        let result = self.store.set(USERS_COLLECTION, email, data, true).await;
        obs_record("upsert", result.is_ok());
        result
    }
}

// Manual impl: `S` itself need not be `Clone` behind the shared handle.
impl<S> Clone for UserStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}
