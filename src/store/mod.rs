// src/store/mod.rs
//! Note persistence seam
//!
//! The vault treats the store as an opaque string bucket: encrypted content
//! arrives as a [`crate::core::CipherBlob`] string plus `is_encrypted = true`,
//! and key material never crosses this boundary.

use rand::RngCore;

use crate::error::Result;
use crate::note::{NewNote, Note, NoteUpdate};

mod memory;
mod sqlite;

pub use memory::MemoryNoteStore;
pub use sqlite::{open_notes_db, SqliteNoteStore};

pub trait NoteStore {
    /// The user's notes, most recently updated first, capped at
    /// [`crate::consts::NOTE_LIST_LIMIT`]
    fn list(&self, user_id: &str) -> Result<Vec<Note>>;

    fn create(&mut self, note: &NewNote) -> Result<Note>;

    /// Apply the present fields of `patch`; fails with `NoteNotFound`
    fn update(&mut self, id: &str, patch: &NoteUpdate) -> Result<Note>;

    /// Deleting an unknown id is not an error
    fn delete(&mut self, id: &str) -> Result<()>;
}

/// 24 hex chars, shaped like the backend's object ids
pub(crate) fn new_note_id() -> String {
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
