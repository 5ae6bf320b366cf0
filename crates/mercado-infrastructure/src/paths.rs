//! Platform path resolution.
//!
//! ```text
//! ~/.config/mercado-facil/        # Config directory
//! └── config.toml
//!
//! ~/.local/share/mercado-facil/   # Data directory
//! └── store/                      # JSON document store root
//!     ├── clientes/<id>.json
//!     ├── users/<id>.json
//!     ├── pedidos/<id>.json
//!     └── enderecos/<id>.json
//! ```

use mercado_core::error::{MercadoError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "mercado-facil";

pub struct MercadoPaths;

impl MercadoPaths {
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| MercadoError::config("Cannot determine the config directory"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| MercadoError::config("Cannot determine the data directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn default_store_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("store"))
    }
}
