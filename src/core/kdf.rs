// src/core/kdf.rs
//! Password → vault key derivation
//!
//! PBKDF2-HMAC-SHA256 over the UTF-8 bytes of the password and the salt
//! *string*. Pure and deterministic: the only state is the parameter set.

use hmac::Hmac;
use rand::RngCore;
use sha2::Sha256;

use crate::aliases::VaultKey32;
use crate::config::Config;
use crate::consts::{DEV_KDF_ITERATIONS, FALLBACK_SALT, KDF_ITERATIONS, KEY_LEN, SALT_LEN_BYTES};
use crate::error::{CoreError, Result};

/// Key derivation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDeriver {
    iterations: u32,
    require_salt: bool,
    fallback_salt: String,
}

impl Default for KeyDeriver {
    /// Production parameters with the hardened salt policy
    fn default() -> Self {
        Self {
            iterations: KDF_ITERATIONS,
            require_salt: true,
            fallback_salt: FALLBACK_SALT.to_string(),
        }
    }
}

impl KeyDeriver {
    /// Parameters compatible with legacy profiles: a missing salt silently
    /// falls back to the public constant.
    pub fn legacy() -> Self {
        Self {
            require_salt: false,
            ..Self::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let iterations = if config.features.skip_kdf_slowdown {
            DEV_KDF_ITERATIONS
        } else {
            KDF_ITERATIONS
        };
        Self {
            iterations,
            require_salt: config.vault.require_salt,
            fallback_salt: config.vault.fallback_salt.clone(),
        }
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_require_salt(mut self, require_salt: bool) -> Self {
        self.require_salt = require_salt;
        self
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn requires_salt(&self) -> bool {
        self.require_salt
    }

    /// Derive the vault key for `password` bound to `salt`.
    ///
    /// An absent or empty salt is replaced by the fallback constant unless
    /// the deriver requires a salt, in which case this fails with
    /// [`CoreError::MissingSalt`].
    pub fn derive(&self, password: &str, salt: Option<&str>) -> Result<VaultKey32> {
        let salt = match salt.filter(|s| !s.is_empty()) {
            Some(salt) => salt,
            None if self.require_salt => return Err(CoreError::MissingSalt),
            None => {
                tracing::warn!("profile has no vault salt, deriving with the fallback constant");
                self.fallback_salt.as_str()
            }
        };

        if self.iterations == 0 {
            return Err(CoreError::KeyDerivation(
                "iteration count must be non-zero".into(),
            ));
        }

        let mut okm = [0u8; KEY_LEN];
        pbkdf2::pbkdf2::<Hmac<Sha256>>(
            password.as_bytes(),
            salt.as_bytes(),
            self.iterations,
            &mut okm,
        )
        .map_err(|e| CoreError::KeyDerivation(e.to_string()))?;

        tracing::debug!(iterations = self.iterations, "derived vault key");
        let key = VaultKey32::new(okm);
        okm.fill(0);
        Ok(key)
    }
}

/// Fresh per-user salt: 16 random bytes as 32 lowercase hex chars
pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_LEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
