//! Configuration loading.
//!
//! Reads `config.toml` (see [`MercadoPaths::config_file`]) and layers
//! environment overrides on top:
//!
//! | Variable                 | Field                         |
//! |--------------------------|-------------------------------|
//! | `MERCADO_STORE_DIR`      | `migration.store_dir`         |
//! | `MERCADO_BATCH_SIZE`     | `migration.batch_size`        |
//! | `MERCADO_FCM_SERVER_KEY` | `notifications.server_key`    |
//! | `MERCADO_FCM_ENDPOINT`   | `notifications.endpoint`      |

use crate::paths::MercadoPaths;
use mercado_core::config::MercadoConfig;
use mercado_core::error::{MercadoError, Result};
use std::path::{Path, PathBuf};

pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses `path` when given, else the platform config file.
    pub fn new(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => MercadoPaths::config_file()?,
        };
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file, applies process environment overrides and validates.
    pub fn load(&self) -> Result<MercadoConfig> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with an injectable environment lookup.
    pub fn load_with_env<F>(&self, env: F) -> Result<MercadoConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self.load_file()?;
        apply_env_overrides(&mut config, env)?;

        if config.migration.store_dir.is_none() {
            config.migration.store_dir = MercadoPaths::default_store_dir().ok();
        }

        config.validate()?;
        Ok(config)
    }

    fn load_file(&self) -> Result<MercadoConfig> {
        if !self.path.exists() {
            tracing::debug!("[Config] {} not found, using defaults", self.path.display());
            return Ok(MercadoConfig::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(MercadoConfig::default());
        }

        let config: MercadoConfig = toml::from_str(&content).map_err(|e| {
            MercadoError::config(format!("Failed to parse {}: {}", self.path.display(), e))
        })?;
        tracing::debug!("[Config] Loaded {}", self.path.display());
        Ok(config)
    }
}

fn apply_env_overrides<F>(config: &mut MercadoConfig, env: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = env("MERCADO_STORE_DIR").filter(|v| !v.trim().is_empty()) {
        config.migration.store_dir = Some(PathBuf::from(dir));
    }

    if let Some(size) = env("MERCADO_BATCH_SIZE") {
        config.migration.batch_size = size.trim().parse().map_err(|_| {
            MercadoError::config(format!("MERCADO_BATCH_SIZE is not a number: '{}'", size))
        })?;
    }

    if let Some(key) = env("MERCADO_FCM_SERVER_KEY") {
        config.notifications.server_key = Some(key);
    }

    if let Some(endpoint) = env("MERCADO_FCM_ENDPOINT") {
        config.notifications.endpoint = endpoint;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(Some(&temp_dir.path().join("config.toml"))).unwrap();

        let config = service.load_with_env(env_from(&[])).unwrap();
        assert_eq!(config.migration.batch_size, 500);
        assert!(config.notifications.server_key.is_none());
    }

    #[test]
    fn test_file_values_are_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[migration]\nbatch_size = 100\nstore_dir = \"/srv/store\"\n\n[notifications]\nserver_key = \"abc\"\n",
        )
        .unwrap();

        let config = ConfigService::new(Some(&path))
            .unwrap()
            .load_with_env(env_from(&[]))
            .unwrap();
        assert_eq!(config.migration.batch_size, 100);
        assert_eq!(config.migration.store_dir, Some(PathBuf::from("/srv/store")));
        assert_eq!(config.notifications.usable_server_key(), Some("abc"));
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[migration]\nbatch_size = 100\n").unwrap();

        let config = ConfigService::new(Some(&path))
            .unwrap()
            .load_with_env(env_from(&[
                ("MERCADO_BATCH_SIZE", "7"),
                ("MERCADO_STORE_DIR", "/tmp/mf"),
                ("MERCADO_FCM_SERVER_KEY", "key-from-env"),
            ]))
            .unwrap();

        assert_eq!(config.migration.batch_size, 7);
        assert_eq!(config.migration.store_dir, Some(PathBuf::from("/tmp/mf")));
        assert_eq!(config.notifications.server_key.as_deref(), Some("key-from-env"));
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::new(Some(&path)).unwrap();

        let err = service
            .load_with_env(env_from(&[("MERCADO_BATCH_SIZE", "lots")]))
            .unwrap_err();
        assert!(err.is_config());

        let err = service
            .load_with_env(env_from(&[("MERCADO_BATCH_SIZE", "0")]))
            .unwrap_err();
        assert!(err.is_config());

        std::fs::write(&path, "[migration\n").unwrap();
        assert!(service.load_with_env(env_from(&[])).unwrap_err().is_config());
    }
}
