//! Transaction identity hashes.
//!
//! Hashes are held in internal (wire) byte order. Their string form is the
//! byte-reversed hex encoding used by wallet and node RPC interfaces, so a
//! hash parsed from an RPC `txid` and a hash read out of a serialized outpoint
//! compare equal.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// Length in bytes of every transaction and block hash.
pub const HASH_SIZE: usize = 32;

/// A 32-byte transaction hash.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TxHash([u8; HASH_SIZE]);

impl TxHash {
    pub const ZERO: Self = Self([0u8; HASH_SIZE]);

    /// Wrap bytes already in internal byte order.
    pub fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// The display form of the first `bytes` bytes of the display order,
    /// i.e. the first `2 * bytes` hex characters of the display string.
    pub fn short(&self, bytes: usize) -> String {
        let mut s = self.to_string();
        s.truncate(bytes.saturating_mul(2));
        s
    }
}

/// Parse a byte-reversed hex string into internal byte order.
pub(crate) fn decode_reversed_hex(s: &str) -> Result<[u8; HASH_SIZE], TypesError> {
    if s.len() != HASH_SIZE * 2 {
        return Err(TypesError::InvalidHash {
            input: s.to_string(),
            reason: format!("expected {} hex characters, got {}", HASH_SIZE * 2, s.len()),
        });
    }
    let mut bytes = [0u8; HASH_SIZE];
    hex::decode_to_slice(s, &mut bytes).map_err(|e| TypesError::InvalidHash {
        input: s.to_string(),
        reason: e.to_string(),
    })?;
    bytes.reverse();
    Ok(bytes)
}

pub(crate) fn encode_reversed_hex(bytes: &[u8; HASH_SIZE]) -> String {
    let mut reversed = *bytes;
    reversed.reverse();
    hex::encode(reversed)
}

impl FromStr for TxHash {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_reversed_hex(s).map(Self)
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({}\u{2026})", self.short(4))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_reversed_hex(&self.0))
    }
}

impl Serialize for TxHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
