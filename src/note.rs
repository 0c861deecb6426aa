// src/note.rs
//! Client-side mirror of the note store's wire format
//!
//! Field names match the JSON the notes API speaks. `decrypted` is a
//! client-only flag and is never serialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::consts::ENCRYPTED_PLACEHOLDER;
use crate::core::CipherBlob;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub user_id: String,
    /// Plaintext, or a [`CipherBlob`] string when `is_encrypted && !decrypted`
    pub content: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub workspace: Option<String>,
    #[serde(default)]
    pub is_encrypted: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// `content` holds plaintext recovered in this session
    #[serde(skip)]
    pub decrypted: bool,
}

impl Note {
    /// Encrypted and not yet opened with the session key
    pub fn is_locked(&self) -> bool {
        self.is_encrypted && !self.decrypted
    }

    /// Stored ciphertext, while the note is still locked
    pub fn cipher_blob(&self) -> Option<CipherBlob> {
        self.is_locked()
            .then(|| CipherBlob::from_stored(self.content.clone()))
    }

    /// What a UI may render: never raw ciphertext
    pub fn display_content(&self) -> &str {
        if self.is_locked() {
            ENCRYPTED_PLACEHOLDER
        } else {
            &self.content
        }
    }
}

/// Create payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub content: String,
    #[serde(default)]
    pub priority: Option<String>,
    pub user_id: String,
    #[serde(default)]
    pub workspace: Option<String>,
    #[serde(default)]
    pub is_encrypted: bool,
}

/// Partial update payload; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_encrypted: Option<bool>,
}

/// Pass-through note metadata the vault does not interpret
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteOptions {
    pub priority: Option<String>,
    pub workspace: Option<String>,
}

/// The slice of the user profile the vault needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub vault_salt: Option<String>,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>, vault_salt: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            vault_salt,
        }
    }
}
