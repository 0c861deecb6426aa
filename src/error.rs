// src/error.rs
//! Public error type for the entire crate
//!
//! A failed decrypt is deliberately *not* an error: it is reported through
//! [`crate::core::DecryptOutcome::Undecryptable`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Key derivation unavailable: {0}")]
    KeyDerivation(String),

    #[error("Profile has no vault salt and the fallback salt is disabled")]
    MissingSalt,

    #[error("Vault password must not be empty")]
    EmptyPassword,

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Vault is locked")]
    VaultLocked,

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
