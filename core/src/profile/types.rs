//! profile/types.rs
//! Device profile and the capabilities it hands to the engines.
//!
//! Design notes:
//! - A profile is immutable once resolved; overrides produce a new owned value.
//! - Key derivation and record validity are capabilities (traits), so each
//!   device family plugs its own rule without the engines knowing which.
//! - The checksum secret stays hex-encoded until the checksum engine asks
//!   for it; malformed hex only fails that call.

use std::fmt;
use std::sync::Arc;

use num_enum::TryFromPrimitive;
use serde::Serialize;

use crate::constants::{GENERIC_PROFILE, MAX_SECRET_LEN};
use crate::crypto::types::DerivedKey;
use crate::records::types::RecordMagic;

/// Width of the big-endian length field in each record header.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, Serialize)]
pub enum LengthWidth {
    U16 = 2,
    U32 = 4,
}

impl LengthWidth {
    #[inline]
    pub const fn bytes(self) -> usize {
        self as usize
    }
}

/// Password → 256-bit key, one implementation per device family.
pub trait KeyDerivation: Send + Sync + fmt::Debug {
    /// Registry name (`sequential`, `sha256`, ...).
    fn name(&self) -> &'static str;

    fn derive_key(&self, password: &str) -> Result<DerivedKey, ProfileError>;
}

/// Outcome of the structural magic check on one record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum MagicCheck {
    Valid,
    /// Tag bytes (4..8) contain a non-printable byte.
    NonPrintableTag,
    /// Magic is not in the profile's table.
    UnknownMagic,
}

impl MagicCheck {
    #[inline]
    pub fn is_valid(self) -> bool {
        self == MagicCheck::Valid
    }
}

/// Record validity predicate supplied by the profile.
pub trait MagicRules: Send + Sync + fmt::Debug {
    fn check(&self, magic: &RecordMagic) -> MagicCheck;

    /// Display name for a known magic.
    fn name_of(&self, magic: &RecordMagic) -> Option<&str>;
}

/// One known record magic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnownMagic {
    pub magic: [u8; 8],
    pub name: String,
}

/// Default rule set: printable tag, and membership in `entries` when the
/// table is non-empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MagicTable {
    pub entries: Vec<KnownMagic>,
}

impl MagicTable {
    pub fn new(entries: Vec<KnownMagic>) -> Self {
        Self { entries }
    }

    fn lookup(&self, magic: &RecordMagic) -> Option<&KnownMagic> {
        self.entries.iter().find(|e| e.magic == magic.0)
    }
}

impl MagicRules for MagicTable {
    fn check(&self, magic: &RecordMagic) -> MagicCheck {
        if !magic.tag_is_printable() {
            return MagicCheck::NonPrintableTag;
        }
        if !self.entries.is_empty() && self.lookup(magic).is_none() {
            return MagicCheck::UnknownMagic;
        }
        MagicCheck::Valid
    }

    fn name_of(&self, magic: &RecordMagic) -> Option<&str> {
        self.lookup(magic).map(|e| e.name.as_str())
    }
}

/// Structural parameters of the record area.
#[derive(Clone, Debug)]
pub struct RecordRules {
    pub length_width: LengthWidth,
    pub magic: Arc<dyn MagicRules>,
}

impl RecordRules {
    /// magic(8) + version(4) + length(2|4)
    #[inline]
    pub fn header_len(&self) -> usize {
        crate::constants::record::MAGIC_LEN
            + crate::constants::record::VERSION_LEN
            + self.length_width.bytes()
    }
}

impl Default for RecordRules {
    fn default() -> Self {
        Self {
            length_width: LengthWidth::U16,
            magic: Arc::new(MagicTable::default()),
        }
    }
}

/// Named parameter set for one device family.
#[derive(Clone, Debug)]
pub struct Profile {
    pub name: String,
    pub description: String,
    /// Hex-encoded secret appended to the checksum input.
    pub checksum_secret: Option<String>,
    pub key_function: Option<Arc<dyn KeyDerivation>>,
    pub record_rules: RecordRules,
}

impl Profile {
    pub fn is_generic(&self) -> bool {
        self.name.eq_ignore_ascii_case(GENERIC_PROFILE)
    }

    /// Decoded checksum secret. An empty string counts as no secret.
    pub fn secret_bytes(&self) -> Result<Option<Vec<u8>>, ProfileError> {
        let Some(hexstr) = self.checksum_secret.as_deref() else {
            return Ok(None);
        };
        if hexstr.is_empty() {
            return Ok(None);
        }
        if hexstr.len() > MAX_SECRET_LEN * 2 {
            return Err(ProfileError::MalformedSecret {
                profile: self.name.clone(),
                reason: format!("longer than {} bytes", MAX_SECRET_LEN),
            });
        }
        hex::decode(hexstr)
            .map(Some)
            .map_err(|e| ProfileError::MalformedSecret {
                profile: self.name.clone(),
                reason: e.to_string(),
            })
    }

    pub fn has_key_function(&self) -> bool {
        self.key_function.is_some()
    }

    /// Run the profile's key derivation.
    pub fn derive_key(&self, password: &str) -> Result<DerivedKey, ProfileError> {
        let keyfun = self
            .key_function
            .as_ref()
            .ok_or_else(|| ProfileError::NoKeyFunction { profile: self.name.clone() })?;
        keyfun.derive_key(password)
    }
}

/// Short one-line summary used by profile listings.
impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<12} {}", self.name, self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// No profile registered under that name.
    UnknownProfile { name: String },

    /// No key-derivation function registered under that name.
    UnknownKeyFunction { name: String },

    /// Checksum secret is not valid hex (or too long).
    MalformedSecret { profile: String, reason: String },

    /// Profile has no key-derivation function; crypto is unavailable.
    NoKeyFunction { profile: String },

    /// Key-derivation function rejected the password.
    KeyDerivation { function: &'static str, reason: String },

    /// Override string could not be applied.
    InvalidOverride { spec: String, reason: String },
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ProfileError::*;
        match self {
            UnknownProfile { name } =>
                write!(f, "unknown profile: '{}'", name),
            UnknownKeyFunction { name } =>
                write!(f, "unknown key derivation function: '{}'", name),
            MalformedSecret { profile, reason } =>
                write!(f, "failed to parse md5key of profile '{}': {}", profile, reason),
            NoKeyFunction { profile } =>
                write!(f, "no key derivation function in profile '{}'", profile),
            KeyDerivation { function, reason } =>
                write!(f, "key derivation function '{}' failed: {}", function, reason),
            InvalidOverride { spec, reason } =>
                write!(f, "invalid profile override '{}': {}", spec, reason),
        }
    }
}

impl std::error::Error for ProfileError {}
