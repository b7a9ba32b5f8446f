// ## 📂 File: `src/crypto/types.rs`

use std::fmt;

use serde::Serialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{DIGEST_LEN, KEY_LEN_32};
use crate::profile::ProfileError;

/// 128-bit checksum (MD5 output).
pub type Digest128 = [u8; DIGEST_LEN];

/// Cipher direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encrypt => write!(f, "encrypt"),
            Direction::Decrypt => write!(f, "decrypt"),
        }
    }
}

/// 256-bit key derived for a single cipher operation.
///
/// - Zeroized on drop.
/// - Never logged: `Debug` prints a placeholder.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN_32]);

impl DerivedKey {
    pub const fn from_bytes(bytes: [u8; KEY_LEN_32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; KEY_LEN_32] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}

/// Result of comparing the stored digest with a recomputed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verification {
    pub ok: bool,
    #[serde(serialize_with = "crate::utils::serialize_hex")]
    pub actual: Digest128,
    #[serde(serialize_with = "crate::utils::serialize_hex")]
    pub expected: Digest128,
}

impl Verification {
    pub fn new(actual: Digest128, expected: Digest128) -> Self {
        Self { ok: actual == expected, actual, expected }
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ok {
            write!(f, "checksum ok : {}", hex::encode(self.actual))
        } else {
            write!(f, "bad checksum: {}, expected {}",
                   hex::encode(self.actual), hex::encode(self.expected))
        }
    }
}

#[derive(Debug)]
pub enum CryptoError {
    /// Input shorter than the leading digest.
    FileTooSmall { have: usize, need: usize },

    /// Key derivation or checksum secret failure from the profile.
    Profile(ProfileError),
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::FileTooSmall { have, need } =>
                write!(f, "file too small: {} < {} bytes", have, need),
            CryptoError::Profile(e) =>
                write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CryptoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CryptoError::Profile(e) => Some(e),
            CryptoError::FileTooSmall { .. } => None,
        }
    }
}

impl From<ProfileError> for CryptoError {
    fn from(e: ProfileError) -> Self {
        CryptoError::Profile(e)
    }
}
