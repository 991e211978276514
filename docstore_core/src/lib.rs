#![forbid(unsafe_code)]
//! Core types for the docstore record-store adapter.
//! This crate is backend-agnostic and should not contain any backend-specific logic.

// Re-export so downstream crates share a single async-trait version.
pub use async_trait::async_trait;

/// A stored document: a mapping from field name to value. Keys are unique and
/// insertion order carries no meaning.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Lightweight error type for record-store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An upsert was attempted without a usable `email` field. Raised before
    /// any collaborator call.
    #[error("Email is required")]
    EmailRequired,
    /// Opaque failure from the underlying document-store client. The original
    /// error is reachable unmodified through `source()`.
    #[error("backend error")]
    Backend {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StoreError {
    /// Wrap a client/driver error.
    pub fn backend<E>(e: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Backend {
            source: Box::new(e),
        }
    }
}

/// Convenience alias for results returned by store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The narrow capability a document-store client must offer. Concrete clients
/// (and test doubles) implement this; the adapter only ever invokes it.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the document under `key` in `collection`. Returns `Ok(None)` when
    /// no document exists; absence is not an error.
    async fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Record>>;

    /// Write `data` under `key` in `collection`. With `merge` set, fields are
    /// folded into any existing document; otherwise the document is replaced.
    async fn set(&self, collection: &str, key: &str, data: &Record, merge: bool)
        -> StoreResult<()>;
}
