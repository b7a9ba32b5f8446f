//! Fixed layout of a Broadcom configuration backup.
//!
//! ```text
//! 0   : 16B  digest
//! 16  : 74B  magic / identification text
//! 90  : 4B   version (u16 major, u16 minor)
//! 94  : 2B   size (u16) == total file length
//! 96  : NB   record area
//! ```
//!
//! All multi-byte fields are big-endian.

/// Leading digest length (MD5).
pub const DIGEST_LEN: usize = 16;

/// Identification text following the digest.
pub const MAGIC_LEN: usize = 74;
pub const MAGIC_OFFSET: usize = DIGEST_LEN;

/// Version field: two big-endian u16 (major, minor).
pub const VERSION_OFFSET: usize = MAGIC_OFFSET + MAGIC_LEN; // 90
pub const VERSION_LEN: usize = 4;

/// Size field: big-endian u16, equals the total file length.
pub const SIZE_OFFSET: usize = VERSION_OFFSET + VERSION_LEN; // 94
pub const SIZE_LEN: usize = 2;

/// First byte of the record area.
pub const HEADER_LEN: usize = SIZE_OFFSET + SIZE_LEN; // 96

/// Largest file the 16-bit size field can describe.
pub const MAX_FILE_SIZE: usize = u16::MAX as usize;

/// Cipher block size; trailing bytes short of a block are passed through.
pub const BLOCK_LEN: usize = 16;

/// Derived key length (AES-256).
pub const KEY_LEN_32: usize = 32;

/// Longest checksum secret accepted, in decoded bytes.
pub const MAX_SECRET_LEN: usize = 64;

/// Profile used when none is selected.
pub const GENERIC_PROFILE: &str = "generic";

/// Record header field widths.
pub mod record {
    /// 4 raw id bytes followed by 4 printable tag bytes.
    pub const MAGIC_LEN: usize = 8;
    pub const MAGIC_ID_LEN: usize = 4;
    /// Version major + minor, u16 each.
    pub const VERSION_LEN: usize = 4;
}
