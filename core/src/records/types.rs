use std::fmt;
use std::ops::Range;

use serde::{Serialize, Serializer};

use crate::constants::record::MAGIC_ID_LEN;
use crate::profile::MagicCheck;

/// 8-byte record magic: 4 raw id bytes, then 4 printable tag bytes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct RecordMagic(pub [u8; 8]);

impl RecordMagic {
    #[inline]
    pub fn id(&self) -> &[u8] {
        &self.0[..MAGIC_ID_LEN]
    }

    #[inline]
    pub fn tag(&self) -> &[u8] {
        &self.0[MAGIC_ID_LEN..]
    }

    pub fn tag_is_printable(&self) -> bool {
        self.tag().iter().all(|&b| b.is_ascii_graphic() || b == b' ')
    }

    /// Tag bytes as text; non-printable bytes become spaces.
    pub fn tag_text(&self) -> String {
        self.tag()
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { ' ' })
            .collect()
    }
}

/// `<id hex> <tag text>`, e.g. `0000a1b2 CMAP`.
impl fmt::Display for RecordMagic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", hex::encode(self.id()), self.tag_text())
    }
}

impl fmt::Debug for RecordMagic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordMagic({})", hex::encode(self.0))
    }
}

impl Serialize for RecordMagic {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(self.0))
    }
}

/// Decoded record header (fixed part).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub magic: RecordMagic,
    pub version_major: u16,
    pub version_minor: u16,
    /// Declared body length.
    pub length: u32,
}

/// One record in the record area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Byte offset relative to the start of the record area.
    pub offset: usize,
    pub magic: RecordMagic,
    pub name: String,
    pub version_major: u16,
    pub version_minor: u16,
    /// Declared body length (header excluded).
    pub length: u32,
    pub header_len: usize,
    pub check: MagicCheck,
    /// Failed the structural check but was consumed by its declared length.
    pub invalid: bool,
}

impl Record {
    /// Header plus body.
    #[inline]
    pub fn total_len(&self) -> usize {
        self.header_len + self.length as usize
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.total_len()
    }

    /// Body bytes, relative to the record area.
    #[inline]
    pub fn body_range(&self) -> Range<usize> {
        (self.offset + self.header_len)..self.end()
    }
}

/// Ordered records plus what could not be parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordList {
    pub records: Vec<Record>,
    /// Bytes covered by `records`.
    pub consumed: usize,
    /// Trailing bytes not interpreted as a record.
    pub remainder: usize,
}

impl RecordList {
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn invalid_count(&self) -> usize {
        self.records.iter().filter(|r| r.invalid).count()
    }

    pub fn fully_parsed(&self) -> bool {
        self.remainder == 0
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Fewer bytes left than a record header.
    Truncated { have: usize, need: usize },

    /// Body does not fit the profile's length field.
    BodyTooLong { have: usize, max: usize },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Truncated { have, need } =>
                write!(f, "truncated record header: {} < {}", have, need),
            RecordError::BodyTooLong { have, max } =>
                write!(f, "record body too long: {} > {}", have, max),
        }
    }
}

impl std::error::Error for RecordError {}
