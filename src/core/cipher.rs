// src/core/cipher.rs
//! AES-256-GCM codec for note content
//!
//! A [`CipherBlob`] is `base64(nonce ‖ ciphertext ‖ tag)` using the standard
//! padded alphabet. Decryption never errors: every failure mode collapses into
//! [`DecryptOutcome::Undecryptable`], which callers treat as "wrong password".

use std::fmt;

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::aliases::VaultKey32;
use crate::consts::{ENCRYPTED_PLACEHOLDER, NONCE_LEN};
use crate::error::{CoreError, Result};

/// Printable, self-contained encrypted note content
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CipherBlob(String);

impl CipherBlob {
    /// Wrap content read back from storage. No validation happens here;
    /// a malformed blob simply fails to decrypt.
    pub fn from_stored(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Split into `(nonce, ciphertext‖tag)`, or `None` if not decodable
    pub fn decode(&self) -> Option<([u8; NONCE_LEN], Vec<u8>)> {
        let raw = STANDARD.decode(self.0.as_bytes()).ok()?;
        if raw.len() < NONCE_LEN {
            return None;
        }
        let (nonce, ciphertext) = raw.split_at(NONCE_LEN);
        let nonce: [u8; NONCE_LEN] = nonce.try_into().ok()?;
        Some((nonce, ciphertext.to_vec()))
    }
}

impl fmt::Display for CipherBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for CipherBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CipherBlob({} chars)", self.0.len())
    }
}

/// Result of a decrypt attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecryptOutcome {
    Plaintext(String),
    /// Wrong key, tampered tag, truncated or non-base64 input: indistinguishable
    Undecryptable,
}

impl DecryptOutcome {
    pub fn is_plaintext(&self) -> bool {
        matches!(self, DecryptOutcome::Plaintext(_))
    }

    pub fn into_plaintext(self) -> Option<String> {
        match self {
            DecryptOutcome::Plaintext(text) => Some(text),
            DecryptOutcome::Undecryptable => None,
        }
    }
}

fn cipher_for(key: &VaultKey32) -> Aes256Gcm {
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.expose_secret()))
}

/// Encrypt `plaintext` under `key` with a fresh random 96-bit nonce
pub fn encrypt(plaintext: &str, key: &VaultKey32) -> Result<CipherBlob> {
    let cipher = cipher_for(key);
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|e| CoreError::Encryption(e.to_string()))?;

    let mut packed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    packed.extend_from_slice(nonce.as_slice());
    packed.extend_from_slice(&ciphertext);

    Ok(CipherBlob(STANDARD.encode(&packed)))
}

/// Decrypt `blob` under `key`
pub fn decrypt(blob: &CipherBlob, key: &VaultKey32) -> DecryptOutcome {
    let Some((nonce, ciphertext)) = blob.decode() else {
        return DecryptOutcome::Undecryptable;
    };

    let plaintext = match cipher_for(key).decrypt(Nonce::from_slice(&nonce), ciphertext.as_slice()) {
        Ok(plaintext) => plaintext,
        Err(_) => return DecryptOutcome::Undecryptable,
    };

    match String::from_utf8(plaintext) {
        Ok(text) => DecryptOutcome::Plaintext(text),
        Err(_) => DecryptOutcome::Undecryptable,
    }
}

/// String-shaped decrypt: the plaintext, or [`ENCRYPTED_PLACEHOLDER`]
pub fn decrypt_or_placeholder(blob: &CipherBlob, key: &VaultKey32) -> String {
    decrypt(blob, key)
        .into_plaintext()
        .unwrap_or_else(|| ENCRYPTED_PLACEHOLDER.to_string())
}
