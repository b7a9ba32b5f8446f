// ## 📂 File: `src/pipeline/core.rs`
//! pipeline/core.rs
//! Whole-file operations and the single-command orchestrator.
//!
//! Design notes:
//! - `ConfigFile` owns the raw bytes; every operation works on the full buffer.
//! - Component errors surface through `ConfigError`; only [`run`] decides
//!   whether a bad checksum is fatal.
//! - Nothing is written unless the command produced new bytes.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::constants::{DIGEST_LEN, HEADER_LEN, MAX_FILE_SIZE};
use crate::crypto::{transform, verify, Digest128, Direction, Verification};
use crate::headers::{decode_header, encode_header, read_size_field, write_size_field, ConfigHeader};
use crate::pipeline::config::{Command, RunConfig};
use crate::pipeline::io::{read_file, write_file};
use crate::pipeline::report::{FixReport, ListReport};
use crate::profile::Profile;
use crate::records::{parse_records, RecordList};
use crate::types::{ConfigError, FormatError};

/// A config backup held in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct ConfigFile {
    bytes: Vec<u8>,
}

impl ConfigFile {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into() }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self { bytes: read_file(path)? })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        write_file(path, &self.bytes)
    }

    /// Build a file from a header and a record area. The size field and the
    /// digest are filled in.
    ///
    /// Not used by [`run`]; it exists to build fixtures and new files from
    /// [`encode_record`](crate::records::encode_record) output.
    pub fn assemble(header: &ConfigHeader, area: &[u8], profile: &Profile) -> Result<Self, ConfigError> {
        let len = HEADER_LEN + area.len();
        let size = u16::try_from(len)
            .map_err(|_| FormatError::FileTooLarge { have: len, max: MAX_FILE_SIZE })?;

        let mut header = header.clone();
        header.size = size;

        let mut bytes = Vec::with_capacity(len);
        bytes.extend_from_slice(&encode_header(&header));
        bytes.extend_from_slice(area);

        Self::from_bytes(bytes).recompute_checksum(profile)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Stored leading digest.
    pub fn digest(&self) -> Result<Digest128, ConfigError> {
        if self.bytes.len() < DIGEST_LEN {
            return Err(FormatError::FileTooSmall { have: self.bytes.len(), need: DIGEST_LEN }.into());
        }
        let mut d = [0u8; DIGEST_LEN];
        d.copy_from_slice(&self.bytes[..DIGEST_LEN]);
        Ok(d)
    }

    pub fn header(&self) -> Result<ConfigHeader, ConfigError> {
        Ok(decode_header(&self.bytes)?)
    }

    /// Everything after the fixed header.
    pub fn record_area(&self) -> Result<&[u8], ConfigError> {
        if self.bytes.len() < HEADER_LEN {
            return Err(FormatError::FileTooSmall { have: self.bytes.len(), need: HEADER_LEN }.into());
        }
        Ok(&self.bytes[HEADER_LEN..])
    }

    /// `Err(SizeMismatch)` when the size field disagrees with the length.
    pub fn check_size(&self) -> Result<(), ConfigError> {
        let declared = read_size_field(&self.bytes)?;
        if declared as usize != self.bytes.len() {
            return Err(FormatError::SizeMismatch { declared, actual: self.bytes.len() }.into());
        }
        Ok(())
    }

    pub fn verify(&self, profile: &Profile) -> Result<Verification, ConfigError> {
        Ok(verify(&self.bytes, profile)?)
    }

    /// Encrypt or decrypt the region after the digest, then re-checksum.
    pub fn crypt(&self, profile: &Profile, password: &str, direction: Direction) -> Result<Self, ConfigError> {
        let bytes = transform(&self.bytes, profile, Some(password), direction)?;
        Ok(Self { bytes })
    }

    /// Rewrite the leading digest; the rest is untouched.
    pub fn recompute_checksum(self, profile: &Profile) -> Result<Self, ConfigError> {
        let bytes = transform(&self.bytes, profile, None, Direction::Encrypt)?;
        Ok(Self { bytes })
    }

    /// Repair the size field and the digest. Running it on its own output
    /// reports nothing to fix.
    pub fn fix(mut self, profile: &Profile) -> Result<(Self, FixReport), ConfigError> {
        let len = self.bytes.len();
        if len < HEADER_LEN {
            return Err(FormatError::FileTooSmall { have: len, need: HEADER_LEN }.into());
        }

        let size_before = read_size_field(&self.bytes)?;
        let mut report = FixReport {
            size_changed: false,
            size_before,
            size_after: size_before,
            checksum_changed: false,
            new_digest: None,
        };

        match self.check_size() {
            Ok(()) => {}
            Err(ConfigError::Format(FormatError::SizeMismatch { declared, actual })) => {
                let size = u16::try_from(actual)
                    .map_err(|_| FormatError::FileTooLarge { have: actual, max: MAX_FILE_SIZE })?;
                write_size_field(&mut self.bytes, size)?;
                info!(from = declared, to = size, "updated size field");
                report.size_changed = true;
                report.size_after = size;
            }
            Err(e) => return Err(e),
        }

        let v = self.verify(profile)?;
        if !v.ok {
            self = self.recompute_checksum(profile)?;
            info!(digest = %hex::encode(v.expected), "updated checksum");
            report.checksum_changed = true;
            report.new_digest = Some(v.expected);
        }

        Ok((self, report))
    }

    pub fn records(&self, profile: &Profile) -> Result<RecordList, ConfigError> {
        Ok(parse_records(self.record_area()?, profile))
    }

    pub fn list(&self, profile: &Profile) -> Result<ListReport, ConfigError> {
        let header = self.header()?;
        let records = self.records(profile)?;
        Ok(ListReport::new(&header, self.bytes.len(), records))
    }
}

impl fmt::Debug for ConfigFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigFile").field("len", &self.bytes.len()).finish()
    }
}

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Outcome {
    Verified(Verification),
    Fixed(FixReport),
    Transformed { direction: Direction, output: PathBuf, len: usize },
    Listed(ListReport),
}

impl Outcome {
    /// `false` only for a failed verify.
    pub fn success(&self) -> bool {
        match self {
            Outcome::Verified(v) => v.ok,
            _ => true,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Verified(v) => write!(f, "{}", v),
            Outcome::Fixed(r) => write!(f, "{}", r),
            Outcome::Transformed { direction, output, len } =>
                write!(f, "{}: wrote {} b to {}", direction, len, output.display()),
            Outcome::Listed(r) => write!(f, "{}", r.to_string().trim_end()),
        }
    }
}

/// Execute one command end to end: validate, resolve the profile, load,
/// optionally pre-verify, dispatch, write.
pub fn run(cfg: &RunConfig) -> Result<Outcome, ConfigError> {
    cfg.validate()?;
    let profile = cfg.resolve_profile()?;
    debug!(command = %cfg.command, profile = %profile.name, input = %cfg.input.display(), "starting");

    if profile.is_generic() {
        match cfg.command {
            Command::Verify => warn!("using generic profile; checksum verification will probably fail"),
            Command::Fix => {}
            _ if !cfg.ignore_bad_checksum => warn!("using generic profile; checksum verification disabled"),
            _ => {}
        }
    }

    let file = ConfigFile::load(&cfg.input)?;

    if cfg.command != Command::Verify && cfg.pre_verify(&profile) {
        let v = file.verify(&profile)?;
        if !v.ok {
            warn!(actual = %hex::encode(v.actual), expected = %hex::encode(v.expected), "bad checksum, aborting");
            return Err(FormatError::ChecksumMismatch(v).into());
        }
        debug!(digest = %hex::encode(v.actual), "pre-verification passed");
    }

    match cfg.command {
        Command::Verify => Ok(Outcome::Verified(file.verify(&profile)?)),

        Command::Fix => {
            let (fixed, report) = file.fix(&profile)?;
            if !report.nothing_to_fix() {
                let out = cfg.output.as_deref().unwrap_or(&cfg.input);
                fixed.save(out)?;
            }
            Ok(Outcome::Fixed(report))
        }

        Command::Encrypt | Command::Decrypt => {
            let direction = if cfg.command == Command::Encrypt {
                Direction::Encrypt
            } else {
                Direction::Decrypt
            };
            let password = cfg
                .password
                .as_deref()
                .ok_or_else(|| ConfigError::usage("no password specified"))?;
            let output = cfg
                .output
                .as_deref()
                .ok_or_else(|| ConfigError::usage("no output file specified"))?;

            let out = file.crypt(&profile, password, direction)?;
            out.save(output)?;
            Ok(Outcome::Transformed { direction, output: output.to_path_buf(), len: out.len() })
        }

        Command::List => Ok(Outcome::Listed(file.list(&profile)?)),
    }
}
