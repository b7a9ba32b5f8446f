//! records/decode.rs
//!
//! Record-area walker.
//!
//! Resync policy:
//! - a record whose magic fails the profile check is kept (`invalid`) and
//!   skipped by its declared length, as long as that length is plausible;
//! - an implausible length (zero, or past the end of the buffer) stops the
//!   walk, and everything from that offset is reported as remainder.

use byteorder::{BigEndian, ByteOrder};
use tracing::debug;

use crate::constants::record::{MAGIC_LEN, VERSION_LEN};
use crate::profile::{LengthWidth, Profile, RecordRules};
use crate::records::types::{Record, RecordError, RecordHeader, RecordList, RecordMagic};

/// Parse the fixed part of one record header from the start of `wire`.
#[inline]
pub fn parse_record_header(wire: &[u8], rules: &RecordRules) -> Result<RecordHeader, RecordError> {
    let need = rules.header_len();
    if wire.len() < need {
        return Err(RecordError::Truncated { have: wire.len(), need });
    }

    let mut off = 0;

    let mut magic = [0u8; MAGIC_LEN];
    magic.copy_from_slice(&wire[off..off + MAGIC_LEN]);
    off += MAGIC_LEN;

    let version_major = BigEndian::read_u16(&wire[off..off + 2]);
    off += 2;

    let version_minor = BigEndian::read_u16(&wire[off..off + 2]);
    off += 2;

    let length = match rules.length_width {
        LengthWidth::U16 => BigEndian::read_u16(&wire[off..off + 2]) as u32,
        LengthWidth::U32 => BigEndian::read_u32(&wire[off..off + 4]),
    };
    off += rules.length_width.bytes();

    debug_assert_eq!(off, MAGIC_LEN + VERSION_LEN + rules.length_width.bytes());

    Ok(RecordHeader {
        magic: RecordMagic(magic),
        version_major,
        version_minor,
        length,
    })
}

/// Walk the record area. Never fails; see the module docs for the resync policy.
///
/// `area` is the file content after the 96-byte header; offsets in the
/// result are relative to it.
pub fn parse_records(area: &[u8], profile: &Profile) -> RecordList {
    let rules = &profile.record_rules;
    let header_len = rules.header_len();

    let mut records = Vec::new();
    let mut off = 0usize;

    while off < area.len() {
        let rest = &area[off..];

        let header = match parse_record_header(rest, rules) {
            Ok(h) => h,
            Err(e) => {
                debug!(offset = off, error = %e, "stopping record walk");
                break;
            }
        };

        let total = usize::try_from(header.length)
            .ok()
            .and_then(|len| header_len.checked_add(len));
        let total = match total {
            Some(t) if header.length != 0 && t <= rest.len() => t,
            _ => {
                debug!(offset = off, length = header.length, remaining = rest.len(),
                       "implausible record length, stopping record walk");
                break;
            }
        };

        let check = rules.magic.check(&header.magic);
        let invalid = !check.is_valid();
        if invalid {
            debug!(offset = off, magic = %header.magic, ?check, "invalid record, skipping by declared length");
        }

        let name = rules
            .magic
            .name_of(&header.magic)
            .map(str::to_string)
            .unwrap_or_else(|| header.magic.tag_text());

        records.push(Record {
            offset: off,
            magic: header.magic,
            name,
            version_major: header.version_major,
            version_minor: header.version_minor,
            length: header.length,
            header_len,
            check,
            invalid,
        });

        off += total;
    }

    RecordList {
        records,
        consumed: off,
        remainder: area.len() - off,
    }
}
