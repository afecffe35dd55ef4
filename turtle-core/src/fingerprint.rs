//! Config fingerprinting — deterministic identification of an engine setup.
//!
//! Two engines built from equal configs share a fingerprint, so log lines
//! from different runs can be grouped by the parameters that produced them.

use crate::config::TurtleConfig;
use crate::domain::ConfigHash;

/// Hash of the canonical JSON serialization of the config.
///
/// Struct field order is fixed, so serde_json output is deterministic.
pub fn config_hash(config: &TurtleConfig) -> ConfigHash {
    match serde_json::to_vec(config) {
        Ok(bytes) => ConfigHash::from_bytes(&bytes),
        // Non-finite floats still serialize (as null); the Debug form is a stable fallback.
        Err(_) => ConfigHash::from_bytes(format!("{config:?}").as_bytes()),
    }
}
