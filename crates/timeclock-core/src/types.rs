//! Core newtypes for check-in records

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::Num;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{Encode, WORD_SIZE};
use crate::error::{Error, Result};

/// Longest nonce whose decimal value always fits a single word
pub const MAX_NONCE_DIGITS: usize = 77;

/// Size of a signing message in bytes
pub const MESSAGE_SIZE: usize = 2 * WORD_SIZE;

/// Employee or entity identifier (non-negative integer)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(BigUint);

impl Identifier {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    pub fn from_u64(value: u64) -> Self {
        Self(BigUint::from(value))
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    /// Parse hexadecimal digits, with or without a `0x` prefix
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        BigUint::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|e| Error::InvalidValue(format!("identifier {:?}: {}", s, e)))
    }
}

impl FromStr for Identifier {
    type Err = Error;

    /// Decimal, or hexadecimal when prefixed with `0x`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with("0x") || s.starts_with("0X") {
            return Self::from_hex(s);
        }
        BigUint::from_str_radix(s, 10)
            .map(Self)
            .map_err(|e| Error::InvalidValue(format!("identifier {:?}: {}", s, e)))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Encode for Identifier {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        self.0.encode_into(out)
    }
}

impl Serialize for Identifier {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Decimal nonce string. The string keeps its leading zeros; the encoded
/// value is its integer value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nonce(String);

impl Nonce {
    pub fn new(digits: impl Into<String>) -> Result<Self> {
        let digits = digits.into();
        if digits.is_empty() {
            return Err(Error::InvalidValue("nonce is empty".to_string()));
        }
        if digits.len() > MAX_NONCE_DIGITS {
            return Err(Error::InvalidValue(format!(
                "nonce has {} digits, maximum is {}",
                digits.len(),
                MAX_NONCE_DIGITS
            )));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidValue(format!(
                "nonce {:?} is not a decimal string",
                digits
            )));
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer value of the digit string
    pub fn value(&self) -> BigUint {
        // Validated as ASCII digits in `new`
        BigUint::parse_bytes(self.0.as_bytes(), 10).unwrap_or_default()
    }
}

impl TryFrom<String> for Nonce {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Nonce> for String {
    fn from(nonce: Nonce) -> Self {
        nonce.0
    }
}

impl FromStr for Nonce {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.trim())
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Encode for Nonce {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        self.value().encode_into(out)
    }
}

/// Pseudo-identity digest, SHA-256(identifier ‖ nonce)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PseudoIdentity(#[serde(with = "hex_bytes_32")] pub [u8; 32]);

impl PseudoIdentity {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> std::result::Result<Self, hex::FromHexError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for PseudoIdentity {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Encode for PseudoIdentity {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        self.0.encode_into(out)
    }
}

/// Unix epoch seconds, encoded as a full 32-byte word
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Encode for Timestamp {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        self.0.encode_into(out)
    }
}

/// 64-byte signing message: SHA-256(identity ‖ timestamp) ‖ 32 zero bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningMessage(#[serde(with = "hex_bytes_64")] pub [u8; MESSAGE_SIZE]);

impl SigningMessage {
    pub fn new(bytes: [u8; MESSAGE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Wrap a buffer that must be exactly [`MESSAGE_SIZE`] bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; MESSAGE_SIZE] = bytes.try_into().map_err(|_| Error::InvalidInput {
            stage: "message",
            expected: MESSAGE_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; MESSAGE_SIZE] {
        &self.0
    }

    /// The hashed half of the message
    pub fn digest(&self) -> &[u8] {
        &self.0[..WORD_SIZE]
    }

    /// The zero padding half of the message
    pub fn padding(&self) -> &[u8] {
        &self.0[WORD_SIZE..]
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> std::result::Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; MESSAGE_SIZE];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for SigningMessage {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Serde helper for 32-byte arrays as hex strings
pub mod hex_bytes_32 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(&s, &mut bytes).map_err(serde::de::Error::custom)?;
        Ok(bytes)
    }
}

/// Serde helper for 64-byte arrays as hex strings
pub mod hex_bytes_64 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8; 64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 64], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let mut bytes = [0u8; 64];
        hex::decode_to_slice(&s, &mut bytes).map_err(serde::de::Error::custom)?;
        Ok(bytes)
    }
}
