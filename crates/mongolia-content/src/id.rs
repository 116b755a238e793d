//! Node identifiers.
//!
//! Ids are blake3 digests of the workspace name and a per-store creation
//! counter, so a store rebuilt the same way hands out the same ids.
//! `{:x}` prints all 64 hex digits and is what serde and [`FromStr`] use;
//! `{}` prints a short prefix for logs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const DIGEST_LEN: usize = 32;
const SHORT_LEN: usize = 4;

/// Identity of a node within one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId([u8; DIGEST_LEN]);

impl NodeId {
    pub const fn from_bytes(digest: [u8; DIGEST_LEN]) -> Self {
        Self(digest)
    }

    /// Id of the node created `sequence`-th in `workspace`. The root is sequence 0.
    pub fn derive(workspace: &str, sequence: u64) -> Self {
        let digest = blake3::Hasher::new()
            .update(workspace.as_bytes())
            .update(b":")
            .update(&sequence.to_be_bytes())
            .finalize();
        Self(*digest.as_bytes())
    }
}

impl fmt::LowerHex for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode(&self.0[..SHORT_LEN]))
    }
}

impl FromStr for NodeId {
    type Err = hex::FromHexError;

    fn from_str(digits: &str) -> Result<Self, Self::Err> {
        let mut digest = [0u8; DIGEST_LEN];
        hex::decode_to_slice(digits, &mut digest)?;
        Ok(Self(digest))
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{:x}", self))
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let digits = String::deserialize(deserializer)?;
        digits.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_hex_parses_back() {
        let id = NodeId::derive("website", 9);
        let digits = format!("{:x}", id);
        assert_eq!(digits.len(), 64);
        assert_eq!(digits.parse::<NodeId>().unwrap(), id);
    }

    #[test]
    fn ids_depend_on_workspace_and_sequence() {
        assert_eq!(NodeId::derive("website", 3), NodeId::derive("website", 3));
        assert_ne!(NodeId::derive("website", 3), NodeId::derive("website", 4));
        assert_ne!(NodeId::derive("website", 3), NodeId::derive("dam", 3));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!("abcd".parse::<NodeId>().is_err());
        assert!("zz".repeat(32).parse::<NodeId>().is_err());
    }

    #[test]
    fn log_form_is_a_short_prefix() {
        let id = NodeId::from_bytes([0xab; 32]);
        assert_eq!(id.to_string(), "#abababab");
    }

    #[test]
    fn serializes_as_full_hex() {
        let id = NodeId::from_bytes([1; 32]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", "01".repeat(32)));
        assert_eq!(serde_json::from_str::<NodeId>(&json).unwrap(), id);
    }
}
