// src/core/session.rs
//! Vault session: Locked / Unlocked state machine
//!
//! Holds at most one verified [`VaultKey32`]. A session always starts Locked
//! and the key is never persisted, so dropping the session is equivalent to
//! locking it. The surrounding application owns the session and decides when
//! to create, lock and drop it.

use std::fmt;

use crate::aliases::{VaultKey32, VaultPassword};
use crate::core::cipher::{self, CipherBlob, DecryptOutcome};
use crate::core::kdf::KeyDeriver;
use crate::error::{CoreError, Result};
use crate::note::Note;

pub struct VaultSession {
    deriver: KeyDeriver,
    key: Option<VaultKey32>,
}

impl VaultSession {
    pub fn new(deriver: KeyDeriver) -> Self {
        Self { deriver, key: None }
    }

    pub fn deriver(&self) -> &KeyDeriver {
        &self.deriver
    }

    pub fn is_unlocked(&self) -> bool {
        self.key.is_some()
    }

    /// Derive a candidate key and, if `verification_blob` is given, accept it
    /// only if it decrypts that blob.
    ///
    /// With no blob to check against (first use of the vault) any password is
    /// accepted and becomes the vault password from then on. An unlocked
    /// session only accepts the password that produced its current key. On
    /// rejection the session state is unchanged, including an already-held key.
    pub fn unlock(
        &mut self,
        password: &str,
        salt: Option<&str>,
        verification_blob: Option<&CipherBlob>,
    ) -> Result<()> {
        if password.is_empty() {
            return Err(CoreError::EmptyPassword);
        }

        let password = VaultPassword::new(password.to_string());
        let candidate = self.deriver.derive(password.expose_secret(), salt)?;

        // Already unlocked: the held key is the reference, never replaced
        if let Some(held) = &self.key {
            if held.expose_secret() != candidate.expose_secret() {
                tracing::warn!("vault unlock rejected: password does not match the open vault");
                return Err(CoreError::IncorrectPassword);
            }
            return Ok(());
        }

        match verification_blob {
            Some(blob) => {
                if !cipher::decrypt(blob, &candidate).is_plaintext() {
                    tracing::warn!("vault unlock rejected: candidate key failed verification");
                    return Err(CoreError::IncorrectPassword);
                }
                tracing::info!("vault unlocked");
            }
            None => tracing::info!("vault unlocked without verification (no encrypted notes yet)"),
        }

        self.key = Some(candidate);
        Ok(())
    }

    /// Discard the key
    pub fn lock(&mut self) {
        if self.key.take().is_some() {
            tracing::info!("vault locked");
        }
    }

    pub fn encrypt_if_unlocked(&self, plaintext: &str) -> Result<CipherBlob> {
        let key = self.key.as_ref().ok_or(CoreError::VaultLocked)?;
        cipher::encrypt(plaintext, key)
    }

    pub fn decrypt(&self, blob: &CipherBlob) -> Result<DecryptOutcome> {
        let key = self.key.as_ref().ok_or(CoreError::VaultLocked)?;
        Ok(cipher::decrypt(blob, key))
    }

    /// Decrypt every locked note in place; returns how many were opened.
    ///
    /// A note that fails to decrypt keeps its stored ciphertext and stays
    /// locked. A locked session leaves every note untouched.
    pub fn decrypt_all_known(&self, notes: &mut [Note]) -> usize {
        let Some(key) = self.key.as_ref() else {
            return 0;
        };

        let mut opened = 0;
        for note in notes.iter_mut().filter(|n| n.is_locked()) {
            let blob = CipherBlob::from_stored(note.content.as_str());
            match cipher::decrypt(&blob, key) {
                DecryptOutcome::Plaintext(text) => {
                    note.content = text;
                    note.decrypted = true;
                    opened += 1;
                }
                DecryptOutcome::Undecryptable => {
                    tracing::warn!(note_id = %note.id, "encrypted note could not be decrypted");
                }
            }
        }

        tracing::debug!(opened, "decrypted known notes");
        opened
    }
}

impl Default for VaultSession {
    fn default() -> Self {
        Self::new(KeyDeriver::default())
    }
}

impl fmt::Debug for VaultSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_unlocked() { "Unlocked" } else { "Locked" };
        f.debug_struct("VaultSession")
            .field("state", &state)
            .field("deriver", &self.deriver)
            .finish()
    }
}
