//! Directory-backed JSON document store.
//!
//! Directory structure:
//! ```text
//! root/
//! ├── .store.lock          # locked while a batch is being committed
//! ├── clientes/
//! │   ├── <id>.json
//! │   └── ...
//! └── pedidos/
//!     └── <id>.json
//! ```
//!
//! Reads stream one file at a time. Commits resolve every operation first,
//! stage all resulting files, and only then rename them into place. A group
//! rejected while resolving or staging writes nothing. A rename failing
//! partway through publishing leaves the earlier files renamed and discards
//! the rest of the temp files.

use crate::storage::{StagedFile, StoreLock, publish_all};
use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use mercado_core::document::{
    BatchCommitter, Document, DocumentStream, Fields, RecordSource, WriteKind, WriteOperation,
};
use mercado_core::error::{MercadoError, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct JsonDirDocumentStore {
    root: PathBuf,
}

impl JsonDirDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf> {
        check_segment("collection", collection)?;
        Ok(self.root.join(collection))
    }
}

fn check_segment(kind: &str, segment: &str) -> Result<()> {
    if segment.is_empty()
        || segment.starts_with('.')
        || segment.contains('/')
        || segment.contains('\\')
    {
        return Err(MercadoError::data_access(format!(
            "invalid {} name '{}'",
            kind, segment
        )));
    }
    Ok(())
}

fn document_path(root: &Path, collection: &str, id: &str) -> Result<PathBuf> {
    check_segment("collection", collection)?;
    check_segment("document", id)?;
    Ok(root.join(collection).join(format!("{}.{}", id, EXTENSION)))
}

fn parse_fields(path: &Path, content: &str) -> Result<Fields> {
    match serde_json::from_str::<Value>(content)? {
        Value::Object(fields) => Ok(fields),
        _ => Err(MercadoError::Serialization {
            format: "JSON".to_string(),
            message: format!("{} does not contain a JSON object", path.display()),
        }),
    }
}

async fn read_document(path: PathBuf) -> Result<Document> {
    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| MercadoError::io(format!("{} has no file name", path.display())))?;

    let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
        MercadoError::data_access(format!("Failed to read {}: {}", path.display(), e))
    })?;

    Ok(Document::new(id, parse_fields(&path, &content)?))
}

fn is_document_file(path: &Path) -> bool {
    let visible = path
        .file_name()
        .is_some_and(|name| !name.to_string_lossy().starts_with('.'));
    visible && path.extension().is_some_and(|ext| ext == EXTENSION)
}

fn load_existing(path: &Path) -> Result<Option<Fields>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    parse_fields(path, &content).map(Some)
}

fn commit_blocking(root: &Path, operations: Vec<WriteOperation>) -> Result<()> {
    let _lock = StoreLock::acquire(root)?;

    let mut resolved: BTreeMap<PathBuf, Fields> = BTreeMap::new();
    for op in &operations {
        let path = document_path(root, &op.collection, &op.id)?;
        let next = match op.kind {
            WriteKind::Set => op.fields.clone(),
            WriteKind::Update => {
                let current = match resolved.remove(&path) {
                    Some(fields) => Some(fields),
                    None => load_existing(&path)?,
                };
                let mut fields = current.ok_or_else(|| {
                    MercadoError::data_access(format!(
                        "Batch rejected, nothing written: no document {}/{} to update",
                        op.collection, op.id
                    ))
                })?;
                for (key, value) in &op.fields {
                    fields.insert(key.clone(), value.clone());
                }
                fields
            }
        };
        resolved.insert(path, next);
    }

    let mut staged = Vec::with_capacity(resolved.len());
    for (path, fields) in resolved {
        match StagedFile::stage(&path, &Value::Object(fields)) {
            Ok(file) => staged.push(file),
            Err(e) => {
                staged.into_iter().for_each(StagedFile::discard);
                return Err(MercadoError::data_access(format!(
                    "Batch rejected, nothing written: {}",
                    e
                )));
            }
        }
    }

    publish_all(staged)
}

#[async_trait]
impl RecordSource for JsonDirDocumentStore {
    async fn read_collection(&self, collection: &str) -> Result<DocumentStream> {
        let dir = self.collection_dir(collection)?;
        if !tokio::fs::try_exists(&dir).await.unwrap_or(false) {
            tracing::debug!("[JsonStore] Collection '{}' does not exist yet", collection);
            return Ok(stream::empty().boxed());
        }

        let mut entries = tokio::fs::read_dir(&dir).await.map_err(|e| {
            MercadoError::data_access(format!("Failed to list {}: {}", dir.display(), e))
        })?;

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            MercadoError::data_access(format!("Failed to list {}: {}", dir.display(), e))
        })? {
            let path = entry.path();
            if is_document_file(&path) {
                paths.push(path);
            }
        }

        Ok(stream::iter(paths).then(read_document).boxed())
    }
}

#[async_trait]
impl BatchCommitter for JsonDirDocumentStore {
    async fn commit(&self, operations: Vec<WriteOperation>) -> Result<()> {
        let root = self.root.clone();
        let count = operations.len();

        tokio::task::spawn_blocking(move || commit_blocking(&root, operations))
            .await
            .map_err(|e| MercadoError::internal(format!("Commit task panicked: {}", e)))??;

        tracing::debug!("[JsonStore] Committed {} operations", count);
        Ok(())
    }
}
