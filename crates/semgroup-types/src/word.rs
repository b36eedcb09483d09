use crate::error::{SemgroupError, SemgroupResult};
use crate::WORD_SIZE;
use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Unsigned 256-bit value, the width of an EVM word.
///
/// Commitments, roots, nullifiers, messages, scopes and proof points all
/// cross the crate boundaries as `Word`s so that neither side has to know
/// about the other's big-integer type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Word(U256);

impl Word {
    pub const ZERO: Word = Word(U256::ZERO);

    pub fn from_be_bytes(bytes: [u8; WORD_SIZE]) -> Self {
        Self(U256::from_be_bytes(bytes))
    }

    pub fn from_u64(value: u64) -> Self {
        Self(U256::from(value))
    }

    /// Left-pads a big-endian slice of at most 32 bytes.
    pub fn from_be_slice(slice: &[u8]) -> SemgroupResult<Self> {
        U256::try_from_be_slice(slice).map(Self).ok_or_else(|| {
            SemgroupError::Serialization(format!("Word overflow: {} bytes", slice.len()))
        })
    }

    pub fn to_be_bytes(&self) -> [u8; WORD_SIZE] {
        self.0.to_be_bytes::<WORD_SIZE>()
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_be_bytes()))
    }

    pub fn from_hex(s: &str) -> SemgroupResult<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.is_empty() || s.len() > WORD_SIZE * 2 {
            return Err(SemgroupError::Serialization(format!(
                "Invalid word length: {} hex digits",
                s.len()
            )));
        }
        U256::from_str_radix(s, 16)
            .map(Self)
            .map_err(|e| SemgroupError::Serialization(format!("Invalid hex word: {}", e)))
    }

    /// Parses a base-10 string, failing on overflow past 2^256 - 1.
    pub fn from_decimal(s: &str) -> SemgroupResult<Self> {
        if s.is_empty() {
            return Err(SemgroupError::Serialization("Empty decimal word".into()));
        }
        U256::from_str_radix(s, 10)
            .map(Self)
            .map_err(|e| SemgroupError::Serialization(format!("Invalid decimal word {}: {}", s, e)))
    }

    pub fn to_decimal(&self) -> String {
        self.0.to_string()
    }
}

impl FromStr for Word {
    type Err = SemgroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("0x") || s.starts_with("0X") {
            Self::from_hex(&s[2..])
        } else {
            Self::from_decimal(s)
        }
    }
}

impl From<u64> for Word {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<U256> for Word {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({})", self.to_hex())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl Serialize for Word {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Word {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
