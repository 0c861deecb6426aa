// src/lib.rs
//! shadow-vault — zero-knowledge "Secret Notes" for a plaintext note store
//!
//! Features:
//! - PBKDF2-HMAC-SHA256 (600k iterations) password → AES-256-GCM vault key
//! - Self-contained base64 note blobs (nonce ‖ ciphertext ‖ tag)
//! - Locked/Unlocked session with verify-before-trust unlock
//! - Vault-aware note controller over any [`NoteStore`]
//! - Full secure-gate integration: keys zeroize on drop and never serialize
//!
//! There is no key escrow and no recovery: a lost vault password makes the
//! encrypted notes permanently unreadable.

pub mod aliases;
pub mod config;
pub mod consts;
pub mod controller;
pub mod core;
pub mod error;
pub mod note;
pub mod store;

// Re-export everything users need at the crate root
pub use aliases::{VaultKey32, VaultPassword};
pub use config::{load as load_config, Config};
pub use controller::{OpenOutcome, SaveOutcome, UnlockPrompt, Unlocked, VaultAwareNoteController};
pub use core::{generate_salt, CipherBlob, DecryptOutcome, KeyDeriver, VaultSession};
pub use error::{CoreError, Result};
pub use note::{NewNote, Note, NoteOptions, NoteUpdate, UserProfile};
pub use store::{MemoryNoteStore, NoteStore, SqliteNoteStore};
