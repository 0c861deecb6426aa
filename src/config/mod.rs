// src/config/mod.rs
//! Configuration system for shadow-vault
//!
//! Central, lazy-loaded global config with TOML + env overrides.
//! Library code that needs explicit control (tests, embedding) builds a
//! [`Config`] directly instead of going through [`load`].

pub use app::{load, Config, Features, Store, Vault};

mod app;
mod defaults;
