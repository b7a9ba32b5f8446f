//! profile/overrides.rs
//! `var=arg` overrides applied on top of a resolved profile.
//!
//! Supported variables:
//! - `md5key=<hex>`     checksum secret (empty clears it)
//! - `keyfun=<name>`    key derivation (`none` clears it)
//! - `lenwidth=<2|4>`   record length field width
//! - `magics=<list>`    known record magics, `hex16[:name]` comma separated (`none` clears)

use std::str::FromStr;
use std::sync::Arc;

use num_enum::TryFromPrimitive;
use tracing::debug;

use crate::profile::keyfun::key_function;
use crate::profile::types::{KnownMagic, LengthWidth, MagicTable, Profile, ProfileError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOverride {
    pub var: String,
    pub value: String,
}

impl FromStr for ProfileOverride {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (var, value) = s.split_once('=').ok_or_else(|| ProfileError::InvalidOverride {
            spec: s.to_string(),
            reason: "expected <var>=<arg>".into(),
        })?;
        let var = var.trim();
        if var.is_empty() {
            return Err(ProfileError::InvalidOverride {
                spec: s.to_string(),
                reason: "empty variable name".into(),
            });
        }
        Ok(Self { var: var.to_ascii_lowercase(), value: value.trim().to_string() })
    }
}

impl ProfileOverride {
    fn invalid(&self, reason: impl Into<String>) -> ProfileError {
        ProfileError::InvalidOverride {
            spec: format!("{}={}", self.var, self.value),
            reason: reason.into(),
        }
    }

    fn apply(&self, profile: &mut Profile) -> Result<(), ProfileError> {
        match self.var.as_str() {
            "md5key" => {
                if !self.value.is_empty() && hex::decode(&self.value).is_err() {
                    return Err(self.invalid("not a hex string"));
                }
                profile.checksum_secret =
                    (!self.value.is_empty()).then(|| self.value.to_ascii_lowercase());
            }
            "keyfun" => {
                profile.key_function = if self.value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(key_function(&self.value)?)
                };
            }
            "lenwidth" => {
                let raw: u8 = self.value.parse().map_err(|_| self.invalid("expected 2 or 4"))?;
                profile.record_rules.length_width =
                    LengthWidth::try_from_primitive(raw).map_err(|_| self.invalid("expected 2 or 4"))?;
            }
            "magics" => {
                let entries = if self.value.eq_ignore_ascii_case("none") || self.value.is_empty() {
                    Vec::new()
                } else {
                    self.value
                        .split(',')
                        .map(|item| self.parse_magic(item.trim()))
                        .collect::<Result<Vec<_>, _>>()?
                };
                profile.record_rules.magic = Arc::new(MagicTable::new(entries));
            }
            other => return Err(self.invalid(format!("unknown variable '{}'", other))),
        }
        Ok(())
    }

    fn parse_magic(&self, item: &str) -> Result<KnownMagic, ProfileError> {
        let (hexpart, name) = match item.split_once(':') {
            Some((h, n)) => (h, Some(n)),
            None => (item, None),
        };
        let raw = hex::decode(hexpart).map_err(|e| self.invalid(e.to_string()))?;
        let magic: [u8; 8] = raw
            .as_slice()
            .try_into()
            .map_err(|_| self.invalid(format!("magic must be 8 bytes, got {}", raw.len())))?;
        let name = match name {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => String::from_utf8_lossy(&magic[4..]).into_owned(),
        };
        Ok(KnownMagic { magic, name })
    }
}

/// Clone `base` and apply every override in order.
pub fn apply_overrides(base: &Profile, overrides: &[ProfileOverride]) -> Result<Profile, ProfileError> {
    let mut profile = base.clone();
    for o in overrides {
        o.apply(&mut profile)?;
        debug!(profile = %profile.name, var = %o.var, "applied profile override");
    }
    Ok(profile)
}
