// src/config/app.rs
use super::defaults::*;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_vault")]
    pub vault: Vault,
    #[serde(default = "default_store")]
    pub store: Store,
    #[serde(default = "default_features")]
    pub features: Features,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vault {
    /// Refuse to derive a key when the profile has no salt
    pub require_salt: bool,
    pub fallback_salt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Store {
    pub notes_db: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Features {
    pub skip_kdf_slowdown: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            vault: default_vault(),
            store: default_store(),
            features: default_features(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Apply `SHADOW_NOTES_DB`
    fn apply_env(mut self) -> Self {
        if let Ok(db) = std::env::var("SHADOW_NOTES_DB") {
            self.store.notes_db = db;
        }
        self
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config once per process — falls back to defaults if missing or invalid
pub fn load() -> &'static Config {
    CONFIG.get_or_init(|| {
        let config_path = std::env::var("SHADOW_VAULT_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let conf = if Path::new(&config_path).exists() {
            Config::from_path(&config_path).unwrap_or_else(|err| {
                tracing::warn!(path = %config_path, error = %err, "unusable config, using built-in defaults");
                Config::default()
            })
        } else {
            tracing::warn!(path = %config_path, "config not found, using built-in defaults");
            Config::default()
        };

        conf.apply_env()
    })
}
