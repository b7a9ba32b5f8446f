//! bcm2cfg-core
//!
//! Checksum, cipher and record engine for Broadcom cable-modem
//! configuration backups. Pure Rust, no FFI, no I/O outside `pipeline`.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Building blocks
pub mod profile;
pub mod crypto;
pub mod headers;
pub mod records;

// Orchestration
pub mod pipeline;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::crypto::{Digest128, Direction, Verification};
    pub use crate::headers::ConfigHeader;
    pub use crate::pipeline::{run, Command, ConfigFile, FixReport, ListReport, Outcome, RunConfig};
    pub use crate::profile::{Profile, ProfileOverride};
    pub use crate::records::{Record, RecordList};
    pub use crate::types::{ConfigError, FormatError};
}
