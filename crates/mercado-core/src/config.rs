//! Configuration model.
//!
//! Every field has a default so a missing or partial `config.toml` still
//! yields a usable configuration. Loading and environment overrides live in
//! `mercado-infrastructure::config_service`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{MercadoError, Result};
use crate::migration::DEFAULT_BATCH_SIZE;

/// Placeholder shipped in the sample configuration; never a real key.
pub const SERVER_KEY_PLACEHOLDER: &str = "SUBSTITUA_PELA_SERVER_KEY_DO_FIREBASE_CONSOLE";

pub const DEFAULT_PUSH_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MercadoConfig {
    pub migration: MigrationSettings,
    pub notifications: NotificationSettings,
    pub logging: LoggingSettings,
}

impl MercadoConfig {
    pub fn validate(&self) -> Result<()> {
        if self.migration.batch_size == 0 {
            return Err(MercadoError::config("migration.batch_size must be at least 1"));
        }
        if self.notifications.endpoint.trim().is_empty() {
            return Err(MercadoError::config("notifications.endpoint must not be empty"));
        }
        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MigrationSettings {
    /// Writes per committed batch
    pub batch_size: usize,
    /// Root of the JSON document store; `None` means the platform data dir
    pub store_dir: Option<PathBuf>,
}

impl Default for MigrationSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            store_dir: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NotificationSettings {
    pub endpoint: String,
    pub server_key: Option<String>,
}

impl NotificationSettings {
    /// The server key, unless it is unset, blank or still the placeholder.
    pub fn usable_server_key(&self) -> Option<&str> {
        self.server_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != SERVER_KEY_PLACEHOLDER)
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PUSH_ENDPOINT.to_string(),
            server_key: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
