//! Data migration use case.
//!
//! ```text
//! DataMigration ──read──▶ RecordSource
//!      │
//!      ├─ normalize (mercado_core::migration)
//!      │
//!      └─stage/commit──▶ BatchWriter ──▶ BatchCommitter
//! ```

mod batch_writer;
mod orchestrator;
mod report;

pub use batch_writer::BatchWriter;
pub use orchestrator::{Clock, DataMigration};
pub use report::MigrationReport;
