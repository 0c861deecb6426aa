// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! These are the canonical secret types used throughout shadow-vault.
//! None of them implement `Serialize`: key material never leaves the process.

use secure_gate::{dynamic_alias, fixed_alias};

// Fixed-size secrets
fixed_alias!(VaultKey32, 32); // 256-bit AES-GCM vault key derived from the password

// Dynamic secrets
dynamic_alias!(VaultPassword, String); // Held only for the duration of an unlock
