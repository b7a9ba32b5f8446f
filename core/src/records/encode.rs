//! records/encode.rs
//!
//! Record serialization, the inverse of `decode.rs`. Used to build record
//! areas (fixtures, re-assembly after edits).

use byteorder::{BigEndian, WriteBytesExt};

use crate::profile::{LengthWidth, RecordRules};
use crate::records::types::{RecordError, RecordHeader};

/// Encode `header.magic | version | body.len() | body`.
///
/// `header.length` is ignored; the body length is written instead.
/// The parser never calls this; it builds record areas for
/// [`ConfigFile::assemble`](crate::pipeline::ConfigFile::assemble) and fixtures.
pub fn encode_record(header: &RecordHeader, body: &[u8], rules: &RecordRules) -> Result<Vec<u8>, RecordError> {
    let mut out = Vec::with_capacity(rules.header_len() + body.len());

    out.extend_from_slice(&header.magic.0);
    // Writes into a Vec cannot fail.
    let _ = out.write_u16::<BigEndian>(header.version_major);
    let _ = out.write_u16::<BigEndian>(header.version_minor);

    match rules.length_width {
        LengthWidth::U16 => {
            let len = u16::try_from(body.len())
                .map_err(|_| RecordError::BodyTooLong { have: body.len(), max: u16::MAX as usize })?;
            let _ = out.write_u16::<BigEndian>(len);
        }
        LengthWidth::U32 => {
            let len = u32::try_from(body.len())
                .map_err(|_| RecordError::BodyTooLong { have: body.len(), max: u32::MAX as usize })?;
            let _ = out.write_u32::<BigEndian>(len);
        }
    }

    out.extend_from_slice(body);
    Ok(out)
}
