use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use mercado_application::DataMigration;
use mercado_core::config::MercadoConfig;
use mercado_infrastructure::JsonDirDocumentStore;

/// Runs all passes and prints the report.
///
/// Pass failures are part of the report; only setup problems are errors.
pub async fn run(
    config: &MercadoConfig,
    store: Option<PathBuf>,
    batch_size: Option<usize>,
) -> Result<()> {
    let store_dir = store
        .or_else(|| config.migration.store_dir.clone())
        .context("No store directory configured; pass --store <DIR>")?;
    if !store_dir.is_dir() {
        anyhow::bail!(
            "Store directory {} does not exist or is not a directory",
            store_dir.display()
        );
    }
    let batch_size = batch_size.unwrap_or(config.migration.batch_size);
    if batch_size == 0 {
        anyhow::bail!("--batch-size must be at least 1");
    }

    println!("🚀 Starting data migration...");
    println!("📂 Store: {}", store_dir.display());

    let store = Arc::new(JsonDirDocumentStore::new(store_dir));
    let report = DataMigration::new(store.clone(), store)
        .with_batch_size(batch_size)
        .run_all()
        .await;

    println!();
    print!("{}", report);

    if report.all_succeeded() {
        println!("\n✅ Migration completed");
    } else {
        println!("\n⚠️  Migration completed with failed passes");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_for(store_dir: PathBuf) -> MercadoConfig {
        let mut config = MercadoConfig::default();
        config.migration.store_dir = Some(store_dir);
        config
    }

    #[tokio::test]
    async fn test_missing_store_dir_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("no-such-store");

        let err = run(&config_for(missing), None, None).await.unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_store_flag_overrides_config() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("no-such-store");

        run(&config_for(missing), Some(temp_dir.path().to_path_buf()), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_zero_batch_size_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let err = run(&config_for(temp_dir.path().to_path_buf()), None, Some(0))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("--batch-size"));
    }
}
