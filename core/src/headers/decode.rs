// ## 📂 File: `src/headers/decode.rs`
//! src/headers/decode.rs
//!
//! Header decoding utilities.
//!
//! Design notes:
//! - Reads the fixed 96-byte prefix; trailing bytes are ignored.
//! - No validation beyond length: a size mismatch or a bad digest is a
//!   finding for the caller, not a decode failure.

use byteorder::{BigEndian, ByteOrder};

use crate::constants::{DIGEST_LEN, MAGIC_LEN, SIZE_OFFSET};
use crate::headers::types::{ConfigHeader, HeaderError};

/// Decode the fixed header from the start of `buf`.
#[inline]
pub fn decode_header(buf: &[u8]) -> Result<ConfigHeader, HeaderError> {
    if buf.len() < ConfigHeader::LEN {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: ConfigHeader::LEN });
    }

    let mut h = ConfigHeader::default();
    let mut off = 0usize;

    h.digest.copy_from_slice(&buf[off..off + DIGEST_LEN]);  // 0..16
    off += DIGEST_LEN;

    h.magic.copy_from_slice(&buf[off..off + MAGIC_LEN]);    // 16..90
    off += MAGIC_LEN;

    h.version_major = BigEndian::read_u16(&buf[off..off + 2]); // 90..92
    off += 2;

    h.version_minor = BigEndian::read_u16(&buf[off..off + 2]); // 92..94
    off += 2;

    h.size = BigEndian::read_u16(&buf[off..off + 2]);          // 94..96
    off += 2;

    debug_assert_eq!(off, ConfigHeader::LEN, "decoding consumed incorrect length");

    Ok(h)
}

/// Read only the size field.
#[inline]
pub fn read_size_field(buf: &[u8]) -> Result<u16, HeaderError> {
    if buf.len() < ConfigHeader::LEN {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: ConfigHeader::LEN });
    }
    Ok(BigEndian::read_u16(&buf[SIZE_OFFSET..SIZE_OFFSET + 2]))
}
