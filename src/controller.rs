// src/controller.rs
//! Vault-aware note controller
//!
//! Binds note CRUD to the vault session. Per save, the Secret toggle decides
//! whether content is encrypted before it reaches the store; per fetch,
//! encrypted notes stay opaque until the session is unlocked.

use crate::core::VaultSession;
use crate::error::{CoreError, Result};
use crate::note::{NewNote, Note, NoteOptions, NoteUpdate, UserProfile};
use crate::store::NoteStore;

/// Result of a create or update request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Persisted; the returned copy holds plaintext
    Saved(Note),
    /// Secret Mode is on but the vault is locked. The save is parked and
    /// replayed by the next successful [`VaultAwareNoteController::unlock`].
    UnlockRequired,
    /// Blank content, nothing to save
    Empty,
}

/// Result of opening a note for editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Editor contents plus the initial Secret toggle
    Editable { content: String, secret: bool },
    UnlockRequired,
}

/// Which unlock dialog to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockPrompt {
    /// No encrypted note exists yet: the password entered now becomes the
    /// vault password and cannot be recovered if lost
    Setup,
    Unlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unlocked {
    /// Notes decrypted by this unlock
    pub decrypted: usize,
    /// The parked save, replayed after unlocking
    pub resumed: Option<SaveOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingSave {
    Create {
        content: String,
        options: NoteOptions,
    },
    Update {
        id: String,
        content: String,
        options: NoteOptions,
    },
}

pub struct VaultAwareNoteController<S> {
    store: S,
    session: VaultSession,
    profile: UserProfile,
    notes: Vec<Note>,
    pending: Option<PendingSave>,
}

impl<S: NoteStore> VaultAwareNoteController<S> {
    /// The session is taken as-is; pass a fresh one for a Locked start
    pub fn new(store: S, session: VaultSession, profile: UserProfile) -> Self {
        Self {
            store,
            session,
            profile,
            notes: Vec::new(),
            pending: None,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn session(&self) -> &VaultSession {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tear down the client state, keeping only the store
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn is_unlocked(&self) -> bool {
        self.session.is_unlocked()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Re-fetch the user's notes, decrypting them if the vault is open
    pub fn refresh(&mut self) -> Result<&[Note]> {
        self.notes = self.store.list(&self.profile.user_id)?;
        if self.session.is_unlocked() && self.notes.iter().any(Note::is_locked) {
            self.session.decrypt_all_known(&mut self.notes);
        }
        Ok(&self.notes)
    }

    pub fn unlock_prompt(&self) -> UnlockPrompt {
        if self.notes.iter().any(|n| n.is_encrypted) {
            UnlockPrompt::Unlock
        } else {
            UnlockPrompt::Setup
        }
    }

    /// Unlock the vault against the first still-locked note in the loaded
    /// list, decrypt what can be decrypted, then replay any parked save.
    ///
    /// Verification only sees notes already loaded, so call
    /// [`refresh`](Self::refresh) first. An already unlocked vault accepts
    /// only its own password again. On `IncorrectPassword` nothing
    /// changes and the parked save stays parked. If the replayed save itself
    /// fails, the vault stays unlocked and that error is returned.
    pub fn unlock(&mut self, password: &str) -> Result<Unlocked> {
        let verification = self.notes.iter().find_map(Note::cipher_blob);
        self.session.unlock(
            password,
            self.profile.vault_salt.as_deref(),
            verification.as_ref(),
        )?;

        let decrypted = self.session.decrypt_all_known(&mut self.notes);

        let resumed = match self.pending.take() {
            Some(pending) => Some(self.replay(pending)?),
            None => None,
        };

        Ok(Unlocked { decrypted, resumed })
    }

    /// Drop the parked save, if any
    pub fn cancel_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Discard the key and reload notes so no decrypted content stays in memory
    pub fn lock(&mut self) -> Result<()> {
        self.session.lock();
        self.pending = None;
        self.refresh()?;
        Ok(())
    }

    /// Discard the key and all client-side note state
    pub fn logout(&mut self) {
        self.session.lock();
        self.notes.clear();
        self.pending = None;
    }

    pub fn create(
        &mut self,
        content: &str,
        secret: bool,
        options: NoteOptions,
    ) -> Result<SaveOutcome> {
        if content.trim().is_empty() {
            return Ok(SaveOutcome::Empty);
        }

        let stored_content = match self.seal(content, secret)? {
            Some(sealed) => sealed,
            None => {
                self.pending = Some(PendingSave::Create {
                    content: content.to_string(),
                    options,
                });
                return Ok(SaveOutcome::UnlockRequired);
            }
        };

        let created = self.store.create(&NewNote {
            content: stored_content,
            priority: options.priority,
            user_id: self.profile.user_id.clone(),
            workspace: options.workspace,
            is_encrypted: secret,
        })?;
        tracing::info!(note_id = %created.id, encrypted = secret, "note saved");

        let local = with_plaintext(created, content, secret);
        self.notes.insert(0, local.clone());
        Ok(SaveOutcome::Saved(local))
    }

    /// Save `content` over note `id`. The persisted `is_encrypted` follows
    /// `secret` for this save only, whatever the note was before.
    pub fn update(
        &mut self,
        id: &str,
        content: &str,
        secret: bool,
        options: NoteOptions,
    ) -> Result<SaveOutcome> {
        if content.trim().is_empty() {
            return Ok(SaveOutcome::Empty);
        }

        let stored_content = match self.seal(content, secret)? {
            Some(sealed) => sealed,
            None => {
                self.pending = Some(PendingSave::Update {
                    id: id.to_string(),
                    content: content.to_string(),
                    options,
                });
                return Ok(SaveOutcome::UnlockRequired);
            }
        };

        let updated = self.store.update(
            id,
            &NoteUpdate {
                content: Some(stored_content),
                priority: options.priority,
                workspace: options.workspace,
                is_encrypted: Some(secret),
            },
        )?;
        tracing::info!(note_id = %id, encrypted = secret, "note updated");

        let local = with_plaintext(updated, content, secret);
        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(slot) => *slot = local.clone(),
            None => self.notes.insert(0, local.clone()),
        }
        Ok(SaveOutcome::Saved(local))
    }

    /// Editor contents for note `id`; a locked note cannot be opened
    pub fn open_for_edit(&self, id: &str) -> Result<OpenOutcome> {
        let note = self
            .note(id)
            .ok_or_else(|| CoreError::NoteNotFound(id.to_string()))?;

        if note.is_locked() {
            return Ok(OpenOutcome::UnlockRequired);
        }
        Ok(OpenOutcome::Editable {
            content: note.content.clone(),
            secret: note.is_encrypted,
        })
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.store.delete(id)?;
        self.notes.retain(|n| n.id != id);
        Ok(())
    }

    /// Content to persist: plaintext, a blob, or `None` when a secret save
    /// hits a locked vault
    fn seal(&self, content: &str, secret: bool) -> Result<Option<String>> {
        if !secret {
            return Ok(Some(content.to_string()));
        }
        match self.session.encrypt_if_unlocked(content) {
            Ok(blob) => Ok(Some(blob.into_string())),
            Err(CoreError::VaultLocked) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn replay(&mut self, pending: PendingSave) -> Result<SaveOutcome> {
        tracing::info!("replaying save parked while the vault was locked");
        match pending {
            PendingSave::Create { content, options } => self.create(&content, true, options),
            PendingSave::Update { id, content, options } => {
                self.update(&id, &content, true, options)
            }
        }
    }
}

fn with_plaintext(mut note: Note, plaintext: &str, secret: bool) -> Note {
    note.content = plaintext.to_string();
    note.decrypted = secret;
    note
}
