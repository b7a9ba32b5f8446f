//! records/mod.rs
//! Variable-length records following the fixed header.
//!
//! Record layout (big-endian):
//!
//! ```text
//! magic(8) | version major(2) | version minor(2) | length(2|4) | body(length)
//! ```
//!
//! The length field width and the magic validity rule come from the profile.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
