// src/store/memory.rs
//! In-process note store

use chrono::Utc;

use crate::consts::{DEFAULT_WORKSPACE, NOTE_LIST_LIMIT};
use crate::error::{CoreError, Result};
use crate::note::{NewNote, Note, NoteUpdate};
use crate::store::{new_note_id, NoteStore};

#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    // (write sequence, note); the sequence breaks updated_at ties
    notes: Vec<(u64, Note)>,
    seq: u64,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored record, exactly as persisted
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().map(|(_, n)| n).find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }
}

impl NoteStore for MemoryNoteStore {
    fn list(&self, user_id: &str) -> Result<Vec<Note>> {
        let mut owned: Vec<&(u64, Note)> = self
            .notes
            .iter()
            .filter(|(_, n)| n.user_id == user_id)
            .collect();
        owned.sort_by(|(sa, a), (sb, b)| b.updated_at.cmp(&a.updated_at).then(sb.cmp(sa)));

        Ok(owned
            .into_iter()
            .take(NOTE_LIST_LIMIT)
            .map(|(_, n)| n.clone())
            .collect())
    }

    fn create(&mut self, note: &NewNote) -> Result<Note> {
        let stored = Note {
            id: new_note_id(),
            user_id: note.user_id.clone(),
            content: note.content.clone(),
            priority: note.priority.clone(),
            workspace: Some(
                note.workspace
                    .clone()
                    .unwrap_or_else(|| DEFAULT_WORKSPACE.to_string()),
            ),
            is_encrypted: note.is_encrypted,
            updated_at: Some(Utc::now()),
            decrypted: false,
        };
        let seq = self.next_seq();
        self.notes.push((seq, stored.clone()));
        Ok(stored)
    }

    fn update(&mut self, id: &str, patch: &NoteUpdate) -> Result<Note> {
        let seq = self.next_seq();
        let (slot_seq, note) = self
            .notes
            .iter_mut()
            .find(|(_, n)| n.id == id)
            .ok_or_else(|| CoreError::NoteNotFound(id.to_string()))?;

        if let Some(content) = &patch.content {
            note.content = content.clone();
        }
        if let Some(priority) = &patch.priority {
            note.priority = Some(priority.clone());
        }
        if let Some(workspace) = &patch.workspace {
            note.workspace = Some(workspace.clone());
        }
        if let Some(is_encrypted) = patch.is_encrypted {
            note.is_encrypted = is_encrypted;
        }
        note.updated_at = Some(Utc::now());
        *slot_seq = seq;

        Ok(note.clone())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.notes.retain(|(_, n)| n.id != id);
        Ok(())
    }
}
