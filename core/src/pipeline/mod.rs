//! pipeline/mod.rs
//! Command orchestration over whole config files.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | `RunConfig`, usage rules, profile resolution |
//! | [`io`] | whole-file read/write with path-carrying errors |
//! | [`core`] | `ConfigFile` operations and [`run`] |
//! | [`report`] | fix and list results |

pub mod config;
pub mod io;
pub mod core;
pub mod report;

pub use config::*;
pub use io::*;
pub use self::core::*;
pub use report::*;
