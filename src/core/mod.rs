// src/core/mod.rs
//! Vault core — key derivation, the note cipher and the session state machine
//!
//! Pure in-memory operations: no I/O, no storage.

pub mod cipher;
pub mod kdf;
pub mod session;

pub use cipher::{decrypt, decrypt_or_placeholder, encrypt, CipherBlob, DecryptOutcome};
pub use kdf::{generate_salt, KeyDeriver};
pub use session::VaultSession;
