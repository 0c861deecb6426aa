// tests/support.rs
//! Test fixtures — fast key derivation, profiles and stores

use shadow_vault::{
    KeyDeriver, MemoryNoteStore, SqliteNoteStore, UserProfile, VaultAwareNoteController,
    VaultKey32, VaultSession,
};
use std::path::PathBuf;
use tempfile::TempDir;

/// Full-strength PBKDF2 is far too slow for a debug test build
pub const TEST_KDF_ITERATIONS: u32 = 1_000;

pub const TEST_USER: &str = "user-1";
pub const TEST_SALT: &str = "9f86d081884c7d659a2feaa0c55ad015";

#[allow(dead_code)]
pub fn fast_deriver() -> KeyDeriver {
    KeyDeriver::default().with_iterations(TEST_KDF_ITERATIONS)
}

#[allow(dead_code)]
pub fn fast_session() -> VaultSession {
    VaultSession::new(fast_deriver())
}

#[allow(dead_code)]
pub fn key_for(password: &str) -> VaultKey32 {
    fast_deriver()
        .derive(password, Some(TEST_SALT))
        .expect("derive test key")
}

#[allow(dead_code)]
pub fn profile() -> UserProfile {
    UserProfile::new(TEST_USER, Some(TEST_SALT.to_string()))
}

#[allow(dead_code)]
pub fn memory_vault() -> VaultAwareNoteController<MemoryNoteStore> {
    VaultAwareNoteController::new(MemoryNoteStore::new(), fast_session(), profile())
}

/// Fresh (Locked) controller over an existing store — a page reload
#[allow(dead_code)]
pub fn reload<S: shadow_vault::NoteStore>(store: S) -> VaultAwareNoteController<S> {
    let mut vault = VaultAwareNoteController::new(store, fast_session(), profile());
    vault.refresh().expect("refresh after reload");
    vault
}

/// SQLite notes database inside a temp dir that lives as long as this value
#[allow(dead_code)]
pub struct TempNotesDb {
    dir: TempDir,
}

#[allow(dead_code)]
impl TempNotesDb {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("data").join("notes.db")
    }

    pub fn open(&self) -> SqliteNoteStore {
        SqliteNoteStore::open(self.path()).expect("open notes db")
    }
}
