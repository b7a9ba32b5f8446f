// ## 📂 File: `src/headers/encode.rs`
//! src/headers/encode.rs
//!
//! Header encoding utilities.
//!
//! Design notes:
//! - Field order mirrors `decode.rs` exactly.
//! - `write_size_field` patches an existing buffer in place; callers own the
//!   buffer and must re-checksum afterwards.

use byteorder::{BigEndian, ByteOrder};

use crate::constants::{DIGEST_LEN, MAGIC_LEN, SIZE_OFFSET};
use crate::headers::types::{ConfigHeader, HeaderError};

/// Serialize a header into its 96-byte wire form.
#[inline]
pub fn encode_header(h: &ConfigHeader) -> [u8; ConfigHeader::LEN] {
    let mut out = [0u8; ConfigHeader::LEN];
    let mut i = 0usize;

    fn put_u16(out: &mut [u8], i: &mut usize, v: u16) {
        BigEndian::write_u16(&mut out[*i..*i + 2], v);
        *i += 2;
    }
    fn put_bytes(out: &mut [u8], i: &mut usize, b: &[u8]) {
        out[*i..*i + b.len()].copy_from_slice(b);
        *i += b.len();
    }

    put_bytes(&mut out, &mut i, &h.digest);     // 0..16   digest
    put_bytes(&mut out, &mut i, &h.magic);      // 16..90  magic text
    put_u16(&mut out, &mut i, h.version_major); // 90..92  version major
    put_u16(&mut out, &mut i, h.version_minor); // 92..94  version minor
    put_u16(&mut out, &mut i, h.size);          // 94..96  file size

    debug_assert_eq!(i, ConfigHeader::LEN, "encoding wrote incorrect length");
    debug_assert_eq!(DIGEST_LEN + MAGIC_LEN + 6, ConfigHeader::LEN);

    out
}

/// Build the 74-byte magic field from text, NUL padded.
pub fn magic_field(text: &str) -> Result<[u8; MAGIC_LEN], HeaderError> {
    let bytes = text.as_bytes();
    if bytes.len() > MAGIC_LEN {
        return Err(HeaderError::MagicTooLong { have: bytes.len(), max: MAGIC_LEN });
    }
    let mut out = [0u8; MAGIC_LEN];
    out[..bytes.len()].copy_from_slice(bytes);
    Ok(out)
}

/// Overwrite the size field of `buf`.
#[inline]
pub fn write_size_field(buf: &mut [u8], size: u16) -> Result<(), HeaderError> {
    if buf.len() < ConfigHeader::LEN {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: ConfigHeader::LEN });
    }
    BigEndian::write_u16(&mut buf[SIZE_OFFSET..SIZE_OFFSET + 2], size);
    Ok(())
}
