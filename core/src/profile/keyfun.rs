//! profile/keyfun.rs
//! Key-derivation functions and the name → implementation registry.

use std::sync::Arc;

use sha2::{Digest as _, Sha256};
use tracing::debug;

use crate::constants::KEY_LEN_32;
use crate::crypto::types::DerivedKey;
use crate::profile::types::{KeyDerivation, ProfileError};

/// Names accepted by [`key_function`].
pub const KEY_FUNCTIONS: &[&str] = &["sequential", "sha256", "padded"];

/// Fixed key 0x00, 0x01, .. 0x1f. The password is not used.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialKey;

impl KeyDerivation for SequentialKey {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn derive_key(&self, _password: &str) -> Result<DerivedKey, ProfileError> {
        let mut key = [0u8; KEY_LEN_32];
        for (i, b) in key.iter_mut().enumerate() {
            *b = i as u8;
        }
        Ok(DerivedKey::from_bytes(key))
    }
}

/// SHA-256 of the password bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Key;

impl KeyDerivation for Sha256Key {
    fn name(&self) -> &'static str {
        "sha256"
    }

    fn derive_key(&self, password: &str) -> Result<DerivedKey, ProfileError> {
        if password.is_empty() {
            return Err(ProfileError::KeyDerivation {
                function: self.name(),
                reason: "empty password".into(),
            });
        }
        let digest = Sha256::digest(password.as_bytes());
        let mut key = [0u8; KEY_LEN_32];
        key.copy_from_slice(&digest);
        Ok(DerivedKey::from_bytes(key))
    }
}

/// Password bytes, zero-padded to 32. Accepts 1..=32 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddedPasswordKey;

impl KeyDerivation for PaddedPasswordKey {
    fn name(&self) -> &'static str {
        "padded"
    }

    fn derive_key(&self, password: &str) -> Result<DerivedKey, ProfileError> {
        let bytes = password.as_bytes();
        if bytes.is_empty() || bytes.len() > KEY_LEN_32 {
            return Err(ProfileError::KeyDerivation {
                function: self.name(),
                reason: format!("password must be 1..={} bytes, got {}", KEY_LEN_32, bytes.len()),
            });
        }
        let mut key = [0u8; KEY_LEN_32];
        key[..bytes.len()].copy_from_slice(bytes);
        Ok(DerivedKey::from_bytes(key))
    }
}

/// Resolve a key-derivation function by name (case-insensitive).
pub fn key_function(name: &str) -> Result<Arc<dyn KeyDerivation>, ProfileError> {
    let f: Arc<dyn KeyDerivation> = match name.to_ascii_lowercase().as_str() {
        "sequential" => Arc::new(SequentialKey),
        "sha256" => Arc::new(Sha256Key),
        "padded" => Arc::new(PaddedPasswordKey),
        _ => return Err(ProfileError::UnknownKeyFunction { name: name.to_string() }),
    };
    debug!(keyfun = f.name(), "resolved key derivation function");
    Ok(f)
}
