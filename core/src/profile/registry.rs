//! profile/registry.rs
//! Built-in device profiles, resolved once and shared read-only.

use std::sync::{Arc, LazyLock};

use crate::constants::GENERIC_PROFILE;
use crate::profile::keyfun::SequentialKey;
use crate::profile::types::{Profile, ProfileError, RecordRules};

static REGISTRY: LazyLock<Vec<Profile>> = LazyLock::new(|| {
    vec![
        Profile {
            name: GENERIC_PROFILE.to_string(),
            description: "Generic profile (no checksum key, no crypto)".to_string(),
            checksum_secret: None,
            key_function: None,
            record_rules: RecordRules::default(),
        },
        Profile {
            name: "tc7200".to_string(),
            description: "Technicolor TC7200".to_string(),
            // "TMM_TC7200", NUL padded
            checksum_secret: Some("544d4d5f544337323030000000000000".to_string()),
            key_function: Some(Arc::new(SequentialKey)),
            record_rules: RecordRules::default(),
        },
    ]
});

/// All built-in profiles, registry order.
pub fn profiles() -> &'static [Profile] {
    REGISTRY.as_slice()
}

/// Look a profile up by name (case-insensitive).
pub fn resolve(name: &str) -> Result<&'static Profile, ProfileError> {
    profiles()
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ProfileError::UnknownProfile { name: name.to_string() })
}

/// The profile used when none is selected.
pub fn generic() -> &'static Profile {
    // The registry always carries the generic entry first.
    &profiles()[0]
}
