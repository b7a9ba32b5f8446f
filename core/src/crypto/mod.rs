//! crypto/mod.rs
//! Checksum and cipher engines.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`digest`] | keyed/unkeyed MD5 over the file after its leading digest |
//! | [`cipher`] | AES-256 block transform with legacy tail pass-through |

pub mod types;
pub mod digest;
pub mod cipher;

pub use types::*;
pub use digest::*;
pub use cipher::*;
