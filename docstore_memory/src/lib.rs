#![forbid(unsafe_code)]
//! An in-process [`DocumentStore`] with document-database merge-write
//! semantics. Useful for prototyping and as the reference implementation of
//! the capability seam in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use docstore_core::{DocumentStore, Record, StoreResult};

#[inline]
#[allow(unused_variables)]
fn obs_record(op: &str, collection: &str, found: bool) {
    #[cfg(feature = "tracing")]
    {
        tracing::info!(op = op, collection = collection, found = found, "store op");
    }
}

#[derive(Default)]
struct State {
    // collection name -> document key -> document
    collections: HashMap<String, HashMap<String, Record>>,
}

/// A `DocumentStore` backed by process memory. Cloning yields a handle to the
/// same underlying data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Record>> {
        let g = self.state.lock().expect("store mutex poisoned");
        let doc = g
            .collections
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned();
        obs_record("get", collection, doc.is_some());
        Ok(doc)
    }

    async fn set(
        &self,
        collection: &str,
        key: &str,
        data: &Record,
        merge: bool,
    ) -> StoreResult<()> {
        let mut g = self.state.lock().expect("store mutex poisoned");
        let docs = g.collections.entry(collection.to_string()).or_default();
        if merge {
            let doc = docs.entry(key.to_string()).or_default();
            for (field, value) in data {
                doc.insert(field.clone(), value.clone());
            }
        } else {
            docs.insert(key.to_string(), data.clone());
        }
        obs_record("set", collection, true);
        Ok(())
    }
}
