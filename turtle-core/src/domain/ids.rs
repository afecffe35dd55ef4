use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle for a registered instrument (index into the engine registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstrumentId(pub usize);

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Order ID assigned by the execution venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deterministic configuration hash (BLAKE3 hex digest).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigHash(pub String);

impl ConfigHash {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).to_hex().to_string())
    }

    /// First 12 hex chars, enough to tell configs apart in log lines.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl fmt::Display for ConfigHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_hash_deterministic() {
        assert_eq!(ConfigHash::from_bytes(b"abc"), ConfigHash::from_bytes(b"abc"));
        assert_ne!(ConfigHash::from_bytes(b"abc"), ConfigHash::from_bytes(b"abd"));
    }

    #[test]
    fn config_hash_short_prefix() {
        let hash = ConfigHash::from_bytes(b"abc");
        assert_eq!(hash.short().len(), 12);
        assert!(hash.0.starts_with(hash.short()));
    }

    #[test]
    fn ids_display() {
        assert_eq!(OrderId(42).to_string(), "42");
        assert_eq!(InstrumentId(3).to_string(), "#3");
    }
}
