// src/consts.rs
//! Shared constants — security parameters and wire-format defaults
//!
//! Everything in here is part of the persisted blob contract. Changing any
//! value makes previously stored notes undecryptable.

/// PBKDF2-HMAC-SHA256 iterations for the vault key (OWASP 2023 guidance)
pub const KDF_ITERATIONS: u32 = 600_000;

/// Dev-only iteration count used when `skip_kdf_slowdown` is set.
// Keys derived this way cannot open blobs written with KDF_ITERATIONS.
pub const DEV_KDF_ITERATIONS: u32 = 1_000;

/// Salt used when the profile carries none (legacy accounts)
pub const FALLBACK_SALT: &str = "shadow-salt-v1";

/// Random bytes in a freshly generated per-user salt (hex-encoded → 32 chars)
pub const SALT_LEN_BYTES: usize = 16;

/// AES-256 key length
pub const KEY_LEN: usize = 32;

/// AES-GCM nonce length (96-bit), always the first bytes of a blob
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length, appended to the ciphertext
pub const TAG_LEN: usize = 16;

/// Sentinel text shown in place of content that could not be decrypted
pub const ENCRYPTED_PLACEHOLDER: &str = "🔒 [Encrypted Content]";

/// Workspace assigned by the store when a note is created without one
pub const DEFAULT_WORKSPACE: &str = "Main";

/// Maximum number of notes returned by a single list call
pub const NOTE_LIST_LIMIT: usize = 50;
