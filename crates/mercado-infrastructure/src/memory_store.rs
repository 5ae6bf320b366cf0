//! In-memory document store.
//!
//! Implements both store traits over a map of collections. Used by tests
//! and for dry runs against a seeded copy of production data. Every commit
//! is recorded so callers can assert how writes were grouped.

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use mercado_core::document::{
    BatchCommitter, Document, DocumentStream, Fields, RecordSource, WriteKind, WriteOperation,
};
use mercado_core::error::{MercadoError, Result};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

type CollectionMap = HashMap<String, BTreeMap<String, Fields>>;

#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<CollectionMap>,
    commit_log: RwLock<Vec<usize>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces documents without going through a commit.
    pub async fn seed(&self, collection: &str, documents: impl IntoIterator<Item = Document>) {
        let mut collections = self.collections.write().await;
        let target = collections.entry(collection.to_string()).or_default();
        for doc in documents {
            target.insert(doc.id, doc.fields);
        }
    }

    pub async fn get(&self, collection: &str, id: &str) -> Option<Document> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document::new(id, fields.clone()))
    }

    /// Documents of `collection` ordered by id.
    pub async fn documents(&self, collection: &str) -> Vec<Document> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub async fn count(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections.get(collection).map_or(0, BTreeMap::len)
    }

    /// Number of operations in each successful commit, oldest first.
    pub async fn commit_sizes(&self) -> Vec<usize> {
        self.commit_log.read().await.clone()
    }
}

/// Applies one operation to a working copy.
fn apply_operation(collections: &mut CollectionMap, op: &WriteOperation) -> Result<()> {
    let docs = collections.entry(op.collection.clone()).or_default();
    match op.kind {
        WriteKind::Set => {
            docs.insert(op.id.clone(), op.fields.clone());
        }
        WriteKind::Update => {
            let existing = docs.get_mut(&op.id).ok_or_else(|| {
                MercadoError::not_found("document", format!("{}/{}", op.collection, op.id))
            })?;
            for (key, value) in &op.fields {
                existing.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(())
}

#[async_trait]
impl RecordSource for InMemoryDocumentStore {
    async fn read_collection(&self, collection: &str) -> Result<DocumentStream> {
        let snapshot = self.documents(collection).await;
        Ok(stream::iter(snapshot.into_iter().map(Ok)).boxed())
    }
}

#[async_trait]
impl BatchCommitter for InMemoryDocumentStore {
    async fn commit(&self, operations: Vec<WriteOperation>) -> Result<()> {
        let mut collections = self.collections.write().await;

        let mut working = collections.clone();
        for op in &operations {
            apply_operation(&mut working, op).map_err(|e| {
                MercadoError::data_access(format!("Batch rejected, nothing written: {}", e))
            })?;
        }
        *collections = working;

        self.commit_log.write().await.push(operations.len());
        tracing::debug!("[MemoryStore] Committed {} operations", operations.len());
        Ok(())
    }
}
