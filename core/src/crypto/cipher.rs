// ## 📂 File: `src/crypto/cipher.rs`

//! crypto/cipher.rs
//! AES-256 block transform of the region after the leading digest.
//!
//! Design notes:
//! - Every full 16-byte block is transformed independently (no chaining, no padding).
//! - A trailing partial block is copied through unmodified. Existing files
//!   depend on this; it must not be "fixed".
//! - The digest is recomputed over the transformed region with the profile's
//!   keyed/unkeyed rule, whatever the direction.
//! - Without a password the region passes through unchanged: a pure re-checksum.

use aes::Aes256;
use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use tracing::debug;

use crate::constants::{BLOCK_LEN, DIGEST_LEN};
use crate::crypto::digest::compute_digest;
use crate::crypto::types::{CryptoError, DerivedKey, Direction};
use crate::profile::Profile;

/// Transform `region` block-wise under `key`.
///
/// Output has the same length as the input; the last `region.len() % 16`
/// bytes are identical to the input.
pub fn process_blocks(region: &[u8], key: &DerivedKey, direction: Direction) -> Vec<u8> {
    let cipher = Aes256::new(GenericArray::from_slice(key.as_bytes()));
    let mut out = region.to_vec();

    let mut blocks = 0usize;
    for chunk in out.chunks_exact_mut(BLOCK_LEN) {
        let block = GenericArray::from_mut_slice(chunk);
        match direction {
            Direction::Encrypt => cipher.encrypt_block(block),
            Direction::Decrypt => cipher.decrypt_block(block),
        }
        blocks += 1;
    }

    debug!(%direction, blocks, tail = region.len() % BLOCK_LEN, "processed cipher blocks");
    out
}

/// Produce `digest || region'` from a whole config file.
///
/// - `password = Some(_)`: derive the key through the profile and run
///   [`process_blocks`] over `file[16..]`.
/// - `password = None`: `file[16..]` is kept as is and only re-checksummed.
///
/// Errors:
/// - `FileTooSmall` when the file cannot hold a digest.
/// - `Profile(NoKeyFunction | KeyDerivation)` when the key cannot be derived.
/// - `Profile(MalformedSecret)` when the checksum secret is bad.
pub fn transform(
    file: &[u8],
    profile: &Profile,
    password: Option<&str>,
    direction: Direction,
) -> Result<Vec<u8>, CryptoError> {
    if file.len() < DIGEST_LEN {
        return Err(CryptoError::FileTooSmall { have: file.len(), need: DIGEST_LEN });
    }
    let region = &file[DIGEST_LEN..];

    let transformed = match password {
        Some(pw) => {
            let key = profile.derive_key(pw)?;
            debug!(profile = %profile.name, "derived cipher key");
            process_blocks(region, &key, direction)
            // key dropped (and zeroized) here
        }
        None => region.to_vec(),
    };

    let digest = compute_digest(&transformed, profile)?;

    let mut out = Vec::with_capacity(file.len());
    out.extend_from_slice(&digest);
    out.extend_from_slice(&transformed);
    Ok(out)
}
