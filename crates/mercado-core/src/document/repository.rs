//! Document store traits.
//!
//! Reading and writing are split so that a pass can be driven against any
//! pair of adapters: the production file store, the in-memory store, or a
//! test fake that fails on purpose.

use super::model::{Document, WriteOperation};
use crate::error::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Lazy, finite sequence of documents of one collection.
///
/// An `Err` item ends the read; consumers treat it like a failed query.
pub type DocumentStream = BoxStream<'static, Result<Document>>;

/// Read-only access to whole collections.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Starts reading every document currently in `collection`.
    ///
    /// Calling it again re-reads the current state. No ordering is
    /// guaranteed. A collection that does not exist reads as empty.
    ///
    /// # Returns
    ///
    /// - `Ok(DocumentStream)`: The query was accepted
    /// - `Err(_)`: The collection could not be queried at all
    async fn read_collection(&self, collection: &str) -> Result<DocumentStream>;
}

/// Grouped, all-or-nothing application of staged writes.
#[async_trait]
pub trait BatchCommitter: Send + Sync {
    /// Applies every operation as one group.
    ///
    /// Either all operations become visible or none do. An `Update` on a
    /// document that does not exist fails the whole group.
    async fn commit(&self, operations: Vec<WriteOperation>) -> Result<()>;
}
