//! Low-level file storage helpers for the JSON document store.

pub mod atomic_json;

pub use atomic_json::{StagedFile, StoreLock, publish_all};
