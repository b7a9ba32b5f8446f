use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::crypto::{CryptoError, Verification};
use crate::headers::HeaderError;
use crate::profile::ProfileError;

/// Structural problems with a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// File shorter than the structure the operation needs.
    FileTooSmall { have: usize, need: usize },

    /// File length does not fit the 16-bit size field.
    FileTooLarge { have: usize, max: usize },

    /// Stored digest differs from the recomputed one (strict mode only).
    ChecksumMismatch(Verification),

    /// Size field differs from the file length.
    SizeMismatch { declared: u16, actual: usize },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FormatError::*;
        match self {
            FileTooSmall { have, need } =>
                write!(f, "file too small: {} < {} bytes", have, need),
            FileTooLarge { have, max } =>
                write!(f, "input file exceeds maximum file size: {} > {}", have, max),
            ChecksumMismatch(v) =>
                write!(f, "{}", v),
            SizeMismatch { declared, actual } =>
                write!(f, "size field {} does not match file size {}", declared, actual),
        }
    }
}

impl std::error::Error for FormatError {}

/// Unified error for the orchestration layer.
/// - `From` impls let `?` cross component boundaries.
/// - Component errors keep their own messages.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Bad invocation.
    #[error("{0}")]
    Usage(String),

    /// Open/read/write failure, with the path involved.
    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

impl ConfigError {
    pub fn usage(msg: impl Into<String>) -> Self {
        ConfigError::Usage(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConfigError::Io { path: path.into(), source }
    }
}

impl From<CryptoError> for ConfigError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::FileTooSmall { have, need } =>
                ConfigError::Format(FormatError::FileTooSmall { have, need }),
            CryptoError::Profile(p) => ConfigError::Profile(p),
        }
    }
}

impl From<HeaderError> for ConfigError {
    fn from(e: HeaderError) -> Self {
        match e {
            HeaderError::BufferTooShort { have, need } =>
                ConfigError::Format(FormatError::FileTooSmall { have, need }),
            HeaderError::MagicTooLong { .. } => ConfigError::Usage(e.to_string()),
        }
    }
}
