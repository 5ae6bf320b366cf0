//! Document store domain module.
//!
//! A document is an opaque id plus a schema-less JSON field map. The store
//! enforces no schema; shapes are a convention of the application layer.
//!
//! # Module Structure
//!
//! - `model`: `Document`, `Collection` and staged `WriteOperation`s
//! - `repository`: `RecordSource` / `BatchCommitter` traits

mod model;
mod repository;

pub use model::{Collection, Document, Fields, WriteKind, WriteOperation, is_present};
pub use repository::{BatchCommitter, DocumentStream, RecordSource};
