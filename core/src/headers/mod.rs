//! headers/mod.rs
//! The fixed 96-byte config file prefix: digest, magic text, version, size.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
