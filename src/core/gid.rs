//! Opaque identifiers for expanded surfaces and items.
//!
//! A `Gid` is eight pseudo-random bytes drawn from the round's `Random`.
//! Its textual form is the standard base64 encoding of those bytes, which is
//! what action logs and snapshots carry on the wire.
//!
//! ```
//! use rust_tabletop::core::Gid;
//!
//! let id: Gid = "AAECAwQFBgc=".parse().unwrap();
//! assert_eq!(id.bytes(), [0, 1, 2, 3, 4, 5, 6, 7]);
//! assert_eq!(id.to_string(), "AAECAwQFBgc=");
//! ```

use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Globally unique id of a surface or item within one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gid([u8; 8]);

impl Gid {
    /// Length of the raw id in bytes.
    pub const LEN: usize = 8;

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn bytes(self) -> [u8; 8] {
        self.0
    }
}

/// Returned when a string is not the base64 form of an 8-byte id.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid id '{0}'")]
pub struct ParseGidError(pub String);

impl FromStr for Gid {
    type Err = ParseGidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = STANDARD
            .decode(s)
            .map_err(|_| ParseGidError(s.to_string()))?;
        let bytes: [u8; 8] = decoded
            .try_into()
            .map_err(|_| ParseGidError(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for Gid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&STANDARD.encode(self.0))
    }
}

impl Serialize for Gid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Gid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_padded_base64() {
        let id = Gid::from_bytes([65, 66, 67, 68, 69, 70, 71, 72]);
        assert_eq!(id.to_string(), "QUJDREVGR0g=");
        assert_eq!(id.to_string().len(), 12);
    }

    #[test]
    fn test_parse() {
        let id: Gid = "QUJDREVGR0g=".parse().unwrap();
        assert_eq!(id.bytes(), *b"ABCDEFGH");

        assert!("not base64!".parse::<Gid>().is_err());
        // valid base64, wrong length
        assert!("QUJD".parse::<Gid>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let id = Gid::from_bytes([1, 2, 3, 4, 5, 6, 7, 8]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));

        let back: Gid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
