//! pipeline/config.rs
//! One invocation's settings, validated before any file is touched.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::constants::GENERIC_PROFILE;
use crate::profile::{apply_overrides, resolve, Profile, ProfileOverride};
use crate::types::ConfigError;

/// Mutually exclusive commands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Command {
    Verify,
    Fix,
    Decrypt,
    Encrypt,
    List,
}

impl Command {
    #[inline]
    pub fn is_crypt(self) -> bool {
        matches!(self, Command::Encrypt | Command::Decrypt)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Command::Verify => "verify",
            Command::Fix => "fix",
            Command::Decrypt => "decrypt",
            Command::Encrypt => "encrypt",
            Command::List => "list",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub command: Command,
    pub input: PathBuf,
    /// Required for encrypt/decrypt; fix falls back to `input`.
    pub output: Option<PathBuf>,
    pub password: Option<String>,
    /// Skip the checksum pre-check before encrypt/decrypt/list.
    pub ignore_bad_checksum: bool,
    pub profile: String,
    pub overrides: Vec<ProfileOverride>,
}

impl RunConfig {
    pub fn new(command: Command, input: impl Into<PathBuf>) -> Self {
        Self {
            command,
            input: input.into(),
            output: None,
            password: None,
            ignore_bad_checksum: false,
            profile: GENERIC_PROFILE.to_string(),
            overrides: Vec::new(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    pub fn with_override(mut self, o: ProfileOverride) -> Self {
        self.overrides.push(o);
        self
    }

    pub fn ignoring_bad_checksum(mut self) -> Self {
        self.ignore_bad_checksum = true;
        self
    }

    /// Usage rules that do not depend on file contents.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.command == Command::Verify && self.ignore_bad_checksum {
            return Err(ConfigError::usage("do not use -n with -V"));
        }
        if self.command.is_crypt() {
            if self.password.is_none() {
                return Err(ConfigError::usage("no password specified"));
            }
            if self.output.is_none() {
                return Err(ConfigError::usage("no output file specified"));
            }
        }
        Ok(())
    }

    /// Registry lookup plus overrides.
    pub fn resolve_profile(&self) -> Result<Profile, ConfigError> {
        let base = resolve(&self.profile)?;
        Ok(apply_overrides(base, &self.overrides)?)
    }

    /// Whether the checksum is checked before the command runs.
    ///
    /// Fix never pre-checks; the generic profile disables the pre-check for
    /// everything but verify.
    pub fn pre_verify(&self, profile: &Profile) -> bool {
        match self.command {
            Command::Verify => true,
            Command::Fix => false,
            _ => !self.ignore_bad_checksum && !profile.is_generic(),
        }
    }
}
