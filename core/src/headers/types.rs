// ## 📂 File: `src/headers/types.rs`

//! headers/types.rs
//! Fixed 96-byte prefix of a config backup.
//!
//! Notes:
//! - Big-endian multi-byte fields.
//! - `size` is advisory: it is compared against the real file length and
//!   rewritten by repair, never trusted for slicing.

use std::fmt;

use crate::constants::{DIGEST_LEN, HEADER_LEN, MAGIC_LEN};
use crate::crypto::types::Digest128;
use crate::utils::fmt_bytes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigHeader {
    pub digest: Digest128,      // 0..16   MD5 over bytes 16..
    pub magic: [u8; MAGIC_LEN], // 16..90  identification text, NUL padded
    pub version_major: u16,     // 90..92
    pub version_minor: u16,     // 92..94
    pub size: u16,              // 94..96  total file length
}

impl ConfigHeader {
    pub const LEN: usize = HEADER_LEN;

    /// Identification text up to the first NUL.
    pub fn magic_text(&self) -> String {
        let end = self.magic.iter().position(|&b| b == 0).unwrap_or(MAGIC_LEN);
        String::from_utf8_lossy(&self.magic[..end]).into_owned()
    }

    /// `major.minor`
    pub fn version_string(&self) -> String {
        format!("{}.{}", self.version_major, self.version_minor)
    }

    #[inline]
    pub fn size_matches(&self, file_len: usize) -> bool {
        self.size as usize == file_len
    }
}

impl Default for ConfigHeader {
    fn default() -> Self {
        Self {
            digest: [0u8; DIGEST_LEN],
            magic: [0u8; MAGIC_LEN],
            version_major: 0,
            version_minor: 0,
            size: HEADER_LEN as u16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// Buffer too short to contain the fixed header.
    BufferTooShort { have: usize, need: usize },

    /// Identification text does not fit the 74-byte field.
    MagicTooLong { have: usize, max: usize },
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use HeaderError::*;
        match self {
            BufferTooShort { have, need } =>
                write!(f, "file too short to be config file: {} < {}", have, need),
            MagicTooLong { have, max } =>
                write!(f, "magic text too long: {} > {}", have, max),
        }
    }
}

impl std::error::Error for HeaderError {}

impl fmt::Display for ConfigHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{} size={} digest={}",
               fmt_bytes(self.magic_text().as_bytes()), self.version_string(),
               self.size, hex::encode(self.digest))
    }
}
