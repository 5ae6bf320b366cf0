//! Fixed-size write batching.

use mercado_core::document::{BatchCommitter, WriteOperation};
use mercado_core::error::{MercadoError, Result};
use std::sync::Arc;

/// Buffers staged writes and commits them as one group.
///
/// The writer only enforces the size limit; deciding when to commit is the
/// caller's job. After every commit attempt the buffer starts empty again,
/// successful or not. Writes that are never committed are lost.
pub struct BatchWriter {
    committer: Arc<dyn BatchCommitter>,
    pending: Vec<WriteOperation>,
    max_size: usize,
    commits: usize,
}

impl BatchWriter {
    /// A `max_size` of zero is treated as one.
    pub fn new(committer: Arc<dyn BatchCommitter>, max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            committer,
            pending: Vec::with_capacity(max_size),
            max_size,
            commits: 0,
        }
    }

    /// Appends an operation to the pending batch.
    ///
    /// # Errors
    ///
    /// Fails without staging anything when the operation is malformed or
    /// the batch already holds `max_size` operations.
    pub fn stage(&mut self, operation: WriteOperation) -> Result<()> {
        operation.validate()?;
        if self.is_full() {
            return Err(MercadoError::migration(format!(
                "batch is full ({} operations), commit before staging more",
                self.max_size
            )));
        }
        self.pending.push(operation);
        Ok(())
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_full(&self) -> bool {
        self.pending.len() >= self.max_size
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Number of successful commits so far.
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Applies every pending operation as one group and resets the buffer.
    pub async fn commit(&mut self) -> Result<()> {
        let operations = std::mem::replace(&mut self.pending, Vec::with_capacity(self.max_size));
        let count = operations.len();

        self.committer.commit(operations).await?;
        self.commits += 1;
        tracing::debug!("[BatchWriter] Committed batch of {} operations", count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercado_core::document::Fields;
    use mercado_infrastructure::InMemoryDocumentStore;

    fn op(id: &str) -> WriteOperation {
        WriteOperation::set("users", id, Fields::new())
    }

    #[tokio::test]
    async fn test_stage_until_full() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let mut writer = BatchWriter::new(store.clone(), 2);

        writer.stage(op("a")).unwrap();
        assert!(!writer.is_full());
        writer.stage(op("b")).unwrap();
        assert!(writer.is_full());

        let err = writer.stage(op("c")).unwrap_err();
        assert!(err.to_string().contains("batch is full"));
        assert_eq!(writer.pending(), 2);
    }

    #[tokio::test]
    async fn test_commit_resets_buffer() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let mut writer = BatchWriter::new(store.clone(), 10);

        writer.stage(op("a")).unwrap();
        writer.stage(op("b")).unwrap();
        writer.commit().await.unwrap();

        assert_eq!(writer.pending(), 0);
        assert_eq!(writer.commits(), 1);
        assert_eq!(store.commit_sizes().await, vec![2]);
        assert_eq!(store.count("users").await, 2);
    }

    #[tokio::test]
    async fn test_malformed_operation_is_not_staged() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let mut writer = BatchWriter::new(store, 10);

        assert!(writer.stage(op("")).is_err());
        assert_eq!(writer.pending(), 0);
    }

    #[tokio::test]
    async fn test_zero_max_size_means_one() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let writer = BatchWriter::new(store, 0);
        assert_eq!(writer.max_size(), 1);
    }
}
