//! profile/mod.rs
//! Device profiles: checksum secret, key derivation, record rules.
//!
//! Notes:
//! - Built-in profiles live in a static registry, resolved once.
//! - `var=arg` overrides derive a new owned profile; the registry is never mutated.

pub mod types;
pub mod keyfun;
pub mod registry;
pub mod overrides;

pub use types::*;
pub use keyfun::*;
pub use registry::*;
pub use overrides::*;
