//! pipeline/report.rs
//! User-facing results of fix and list, printable as text or JSON.

use std::fmt;

use serde::Serialize;

use crate::crypto::Digest128;
use crate::headers::ConfigHeader;
use crate::records::RecordList;

/// What `fix` changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixReport {
    pub size_changed: bool,
    pub size_before: u16,
    pub size_after: u16,
    pub checksum_changed: bool,
    /// Digest written when `checksum_changed`.
    #[serde(serialize_with = "serialize_opt_hex")]
    pub new_digest: Option<Digest128>,
}

impl FixReport {
    pub fn nothing_to_fix(&self) -> bool {
        !self.size_changed && !self.checksum_changed
    }
}

fn serialize_opt_hex<S: serde::Serializer>(v: &Option<Digest128>, s: S) -> Result<S::Ok, S::Error> {
    match v {
        Some(d) => s.serialize_some(&hex::encode(d)),
        None => s.serialize_none(),
    }
}

impl fmt::Display for FixReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nothing_to_fix() {
            return write!(f, "nothing to fix :-)");
        }
        let mut first = true;
        if self.size_changed {
            write!(f, "updated size: {} -> {}", self.size_before, self.size_after)?;
            first = false;
        }
        if let (true, Some(d)) = (self.checksum_changed, self.new_digest) {
            if !first {
                writeln!(f)?;
            }
            write!(f, "new checksum: {}", hex::encode(d))?;
        }
        Ok(())
    }
}

/// Header summary plus decoded records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListReport {
    pub magic: String,
    pub version_major: u16,
    pub version_minor: u16,
    pub size: u16,
    pub file_len: usize,
    pub size_matches: bool,
    pub records: RecordList,
}

impl ListReport {
    pub fn new(header: &ConfigHeader, file_len: usize, records: RecordList) -> Self {
        Self {
            magic: header.magic_text(),
            version_major: header.version_major,
            version_minor: header.version_minor,
            size: header.size,
            file_len,
            size_matches: header.size_matches(file_len),
            records,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ListReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  magic: {}", self.magic)?;
        writeln!(f, "version: {}.{}", self.version_major, self.version_minor)?;
        writeln!(f, "   size: {} b {}", self.size,
                 if self.size_matches { "" } else { "(does not match filesize)" })?;

        for r in &self.records {
            write!(f, "  {:>5x}:  {}   {:<40} ({}.{}) ({} bytes)",
                   r.offset, r.magic, r.name, r.version_major, r.version_minor, r.length)?;
            if r.invalid {
                write!(f, " (invalid)")?;
            }
            writeln!(f)?;
        }

        if self.records.remainder != 0 {
            writeln!(f, "  (failed to parse last {} bytes)", self.records.remainder)?;
        }
        Ok(())
    }
}
