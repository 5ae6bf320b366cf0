//! Runs migration passes against an injected store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::StreamExt;
use mercado_core::document::{BatchCommitter, RecordSource};
use mercado_core::error::Result;
use mercado_core::migration::{
    DEFAULT_BATCH_SIZE, MigrationPass, MigrationResult, NormalizeOutcome, normalize,
};
use tracing::{debug, error, info, warn};

use super::batch_writer::BatchWriter;
use super::report::MigrationReport;

/// Source of the `updatedAt` timestamp stamped on every write.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Moves legacy records into the canonical user-keyed layout.
///
/// Every pass reads its whole source collection as a stream, normalizes
/// each record and commits the resulting writes in batches of at most
/// `batch_size`. Record-level problems are collected in the pass result;
/// a failing read or commit aborts the pass.
///
/// Writes are not applied in one transaction across batches. A pass that
/// aborts after its first commit leaves the earlier batches in place, and
/// running the migration again is safe.
pub struct DataMigration {
    source: Arc<dyn RecordSource>,
    committer: Arc<dyn BatchCommitter>,
    batch_size: usize,
    clock: Clock,
}

impl DataMigration {
    pub fn new(source: Arc<dyn RecordSource>, committer: Arc<dyn BatchCommitter>) -> Self {
        Self {
            source,
            committer,
            batch_size: DEFAULT_BATCH_SIZE,
            clock: Arc::new(Utc::now),
        }
    }

    /// Overrides the commit threshold. Zero is treated as one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub async fn migrate_clientes_to_users(&self) -> MigrationResult {
        self.run_pass(MigrationPass::ClientesToUsers).await
    }

    pub async fn migrate_pedidos_to_user_id(&self) -> MigrationResult {
        self.run_pass(MigrationPass::PedidosToUserId).await
    }

    pub async fn migrate_enderecos_to_user_id(&self) -> MigrationResult {
        self.run_pass(MigrationPass::EnderecosToUserId).await
    }

    /// Runs every pass in order. A failed pass does not stop the next one.
    pub async fn run_all(&self) -> MigrationReport {
        info!("[Migration] Starting full migration");
        let mut report = MigrationReport::new();

        for &pass in MigrationPass::all() {
            let result = self.run_pass(pass).await;
            report.push(pass, result);
        }

        info!(
            "[Migration] Full migration finished: {} records updated, all passes succeeded: {}",
            report.total_records_updated(),
            report.all_succeeded()
        );
        report
    }

    /// Runs one pass and reports its outcome. Never returns an error; fatal
    /// problems end up in the result.
    pub async fn run_pass(&self, pass: MigrationPass) -> MigrationResult {
        info!("[Migration] Starting pass {}", pass);
        let mut result = MigrationResult::new();

        match self.drive_pass(pass, &mut result).await {
            Ok(()) => {
                result.succeed(pass.completion_message(result.records_updated));
                info!("[Migration] {}", result.message);
            }
            Err(e) => {
                error!("[Migration] Pass {} aborted: {}", pass, e);
                result.fail(e);
            }
        }

        result
    }

    async fn drive_pass(&self, pass: MigrationPass, result: &mut MigrationResult) -> Result<()> {
        let mut records = self.source.read_collection(pass.source().as_str()).await?;
        let mut writer = BatchWriter::new(self.committer.clone(), self.batch_size);

        while let Some(document) = records.next().await {
            let document = document?;

            match normalize(pass, &document, (self.clock)()) {
                NormalizeOutcome::Write(operation) => {
                    if let Err(e) = writer.stage(operation) {
                        let message = format!(
                            "Failed to migrate {} {}: {}",
                            pass.record_label(),
                            document.id,
                            e
                        );
                        warn!("[Migration] {}", message);
                        result.record_error(message);
                        continue;
                    }

                    let committed = if writer.is_full() {
                        writer.commit().await?;
                        true
                    } else {
                        false
                    };
                    result.records_updated += 1;

                    if committed {
                        info!("[Migration] Migrated {} records...", result.records_updated);
                    }
                }
                NormalizeOutcome::Skip(reason) => {
                    debug!(
                        "[Migration] Skipping {} {}: {:?}",
                        pass.record_label(),
                        document.id,
                        reason
                    );
                }
                NormalizeOutcome::Invalid(message) => {
                    warn!("[Migration] {}", message);
                    result.record_error(message);
                }
            }
        }

        if writer.pending() > 0 {
            writer.commit().await?;
        }

        Ok(())
    }
}
