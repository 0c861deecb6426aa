// src/store/sqlite.rs
use std::{fs, path::Path};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::consts::{DEFAULT_WORKSPACE, NOTE_LIST_LIMIT};
use crate::core::generate_salt;
use crate::error::{CoreError, Result};
use crate::note::{NewNote, Note, NoteUpdate, UserProfile};
use crate::store::{new_note_id, NoteStore};

/// Open (and create if needed) the local notes database at `db_path`
pub fn open_notes_db<P: AsRef<Path>>(db_path: P) -> Result<Connection> {
    if let Some(parent) = db_path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(db_path.as_ref())?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS notes (
            id           TEXT PRIMARY KEY,
            user_id      TEXT NOT NULL,
            content      TEXT NOT NULL,
            priority     TEXT,
            workspace    TEXT NOT NULL DEFAULT 'Main',
            is_encrypted INTEGER NOT NULL DEFAULT 0,
            updated_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_notes_user_updated ON notes(user_id, updated_at);

        CREATE TABLE IF NOT EXISTS profiles (
            user_id    TEXT PRIMARY KEY,
            vault_salt TEXT
        );
        "#,
    )?;

    Ok(conn)
}

/// Note store backed by a local SQLite file.
///
/// Holds exactly what the notes API would receive: encrypted notes are
/// stored as their blob string with `is_encrypted = 1`.
pub struct SqliteNoteStore {
    conn: Connection,
}

impl SqliteNoteStore {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        Ok(Self {
            conn: open_notes_db(db_path)?,
        })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open the database named by the global config
    pub fn open_default() -> Result<Self> {
        Self::open(&crate::config::load().store.notes_db)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn load_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self
            .conn
            .query_row(
                "SELECT user_id, vault_salt FROM profiles WHERE user_id = ?1",
                [user_id],
                |row| Ok(UserProfile::new(row.get::<_, String>(0)?, row.get(1)?)),
            )
            .optional()?)
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO profiles (user_id, vault_salt) VALUES (?1, ?2)",
            params![&profile.user_id, &profile.vault_salt],
        )?;
        Ok(())
    }

    /// Load the profile, assigning a fresh vault salt when it has none
    pub fn ensure_profile(&self, user_id: &str) -> Result<UserProfile> {
        let mut profile = self
            .load_profile(user_id)?
            .unwrap_or_else(|| UserProfile::new(user_id, None));

        if profile.vault_salt.as_deref().map_or(true, str::is_empty) {
            profile.vault_salt = Some(generate_salt());
            self.save_profile(&profile)?;
            tracing::info!(user_id, "assigned new vault salt");
        }
        Ok(profile)
    }

    fn get(&self, id: &str) -> Result<Option<Note>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, user_id, content, priority, workspace, is_encrypted, updated_at
                 FROM notes WHERE id = ?1",
                [id],
                note_from_row,
            )
            .optional()?)
    }
}

// Fixed-width timestamps keep lexical order == chronological order
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    let updated_at: String = row.get(6)?;
    Ok(Note {
        id: row.get(0)?,
        user_id: row.get(1)?,
        content: row.get(2)?,
        priority: row.get(3)?,
        workspace: row.get(4)?,
        is_encrypted: row.get(5)?,
        updated_at: DateTime::parse_from_rfc3339(&updated_at)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        decrypted: false,
    })
}

impl NoteStore for SqliteNoteStore {
    fn list(&self, user_id: &str) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, content, priority, workspace, is_encrypted, updated_at
             FROM notes
             WHERE user_id = ?1
             ORDER BY updated_at DESC, rowid DESC
             LIMIT ?2",
        )?;

        let notes = stmt
            .query_map(params![user_id, NOTE_LIST_LIMIT as i64], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    fn create(&mut self, note: &NewNote) -> Result<Note> {
        let id = new_note_id();
        let workspace = note.workspace.as_deref().unwrap_or(DEFAULT_WORKSPACE);

        self.conn.execute(
            "INSERT INTO notes (id, user_id, content, priority, workspace, is_encrypted, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &id,
                &note.user_id,
                &note.content,
                &note.priority,
                workspace,
                note.is_encrypted,
                timestamp(Utc::now()),
            ],
        )?;
        tracing::debug!(note_id = %id, encrypted = note.is_encrypted, "note created");

        self.get(&id)?.ok_or(CoreError::NoteNotFound(id))
    }

    fn update(&mut self, id: &str, patch: &NoteUpdate) -> Result<Note> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE notes SET
                content      = COALESCE(?2, content),
                priority     = COALESCE(?3, priority),
                workspace    = COALESCE(?4, workspace),
                is_encrypted = COALESCE(?5, is_encrypted),
                updated_at   = ?6
             WHERE id = ?1",
            params![
                id,
                &patch.content,
                &patch.priority,
                &patch.workspace,
                patch.is_encrypted,
                timestamp(Utc::now()),
            ],
        )?;
        tx.commit()?;

        if changed == 0 {
            return Err(CoreError::NoteNotFound(id.to_string()));
        }
        tracing::debug!(note_id = %id, "note updated");

        self.get(id)?
            .ok_or_else(|| CoreError::NoteNotFound(id.to_string()))
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.conn.execute("DELETE FROM notes WHERE id = ?1", [id])?;
        Ok(())
    }
}
