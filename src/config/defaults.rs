// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::{Features, Store, Vault};
use crate::consts::FALLBACK_SALT;

pub const DEFAULT_CONFIG_PATH: &str = "vault-config.toml";
pub const DEFAULT_NOTES_DB: &str = "notes.db";

pub fn default_vault() -> Vault {
    Vault {
        require_salt: true,
        fallback_salt: FALLBACK_SALT.into(),
    }
}

pub fn default_store() -> Store {
    Store {
        notes_db: default_notes_db(),
    }
}

pub fn default_features() -> Features {
    Features {
        skip_kdf_slowdown: false,
    }
}

/// `<data dir>/shadow-vault/notes.db`, or `./notes.db` when no data dir exists
pub fn default_notes_db() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("shadow-vault").join(DEFAULT_NOTES_DB))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_NOTES_DB))
        .to_string_lossy()
        .into_owned()
}
