// ## 📂 File: `src/crypto/digest.rs`

//! crypto/digest.rs
//! Keyed / unkeyed MD5 checksum over everything after the leading digest.
//!
//! Design notes:
//! - Keyed by concatenation: `md5(payload || secret)`. Not HMAC; firmware
//!   computes it this way and the construction must match bit-for-bit.
//! - Unkeyed when the profile declares no secret (or an empty one).

use md5::{Digest as _, Md5};
use tracing::trace;

use crate::constants::DIGEST_LEN;
use crate::crypto::types::{CryptoError, Digest128, Verification};
use crate::profile::{Profile, ProfileError};

/// Compute the 128-bit digest of `payload` under `profile`'s secret rule.
///
/// Fails only when the secret cannot be hex-decoded.
pub fn compute_digest(payload: &[u8], profile: &Profile) -> Result<Digest128, ProfileError> {
    let secret = profile.secret_bytes()?;

    let mut hasher = Md5::new();
    hasher.update(payload);
    if let Some(key) = secret.as_deref() {
        hasher.update(key);
    }

    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&hasher.finalize());
    trace!(len = payload.len(), keyed = secret.is_some(), "computed digest");
    Ok(out)
}

/// Compare the stored leading digest with one recomputed over the rest.
///
/// A mismatch is reported in the result, not as an error.
pub fn verify(file: &[u8], profile: &Profile) -> Result<Verification, CryptoError> {
    if file.len() < DIGEST_LEN {
        return Err(CryptoError::FileTooSmall { have: file.len(), need: DIGEST_LEN });
    }

    let mut actual = [0u8; DIGEST_LEN];
    actual.copy_from_slice(&file[..DIGEST_LEN]);
    let expected = compute_digest(&file[DIGEST_LEN..], profile)?;

    Ok(Verification::new(actual, expected))
}
