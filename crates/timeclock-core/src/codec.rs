//! Fixed-width big-endian encoding shared by every pipeline stage
//!
//! All integers are encoded as [`WORD_SIZE`]-byte big-endian words. Curve
//! points contribute only their x-coordinate; the verifier recovers y by
//! point decompression. Nothing is ever truncated: a value that does not fit
//! the word is an [`Error::Encoding`].

use std::fmt;

use num_bigint::BigUint;
use timeclock_jubjub::{fq_to_bytes_be, Fq, Point};

use crate::error::{Error, Result};

/// Width of every encoded integer, in bytes
pub const WORD_SIZE: usize = 32;

/// Width of every encoded integer, in bits
pub const WORD_BITS: usize = WORD_SIZE * 8;

/// Canonical byte encoding for pipeline values
pub trait Encode {
    /// Append the encoding of `self` to `out`
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()>;

    fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_into(&mut out)?;
        Ok(out)
    }
}

/// Encode a heterogeneous sequence by concatenating element encodings
pub fn encode_all(items: &[&dyn Encode]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for item in items {
        item.encode_into(&mut out)?;
    }
    Ok(out)
}

/// Encode an integer as a single word
pub fn encode_uint(value: &BigUint) -> Result<[u8; WORD_SIZE]> {
    let bits = value.bits();
    if bits > WORD_BITS as u64 {
        return Err(Error::Encoding(format!(
            "integer needs {} bits, exceeds {}-byte width",
            bits, WORD_SIZE
        )));
    }
    let raw = value.to_bytes_be();
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - raw.len()..].copy_from_slice(&raw);
    Ok(word)
}

/// Decode a single word back into an integer
pub fn decode_uint(bytes: &[u8]) -> Result<BigUint> {
    if bytes.len() != WORD_SIZE {
        return Err(Error::Encoding(format!(
            "expected {}-byte word, got {} bytes",
            WORD_SIZE,
            bytes.len()
        )));
    }
    Ok(BigUint::from_bytes_be(bytes))
}

impl Encode for BigUint {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&encode_uint(self)?);
        Ok(())
    }
}

impl Encode for u64 {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&[0u8; WORD_SIZE - 8]);
        out.extend_from_slice(&self.to_be_bytes());
        Ok(())
    }
}

impl Encode for Fq {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&fq_to_bytes_be(self));
        Ok(())
    }
}

impl Encode for Point {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&self.x_bytes());
        Ok(())
    }
}

impl Encode for &[u8] {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(self);
        Ok(())
    }
}

impl Encode for Vec<u8> {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(self);
        Ok(())
    }
}

impl<const N: usize> Encode for [u8; N] {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(self);
        Ok(())
    }
}

/// Bit vector in most-significant-bit-first order
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BitString(Vec<bool>);

impl BitString {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Unpack bytes, most significant bit of each byte first
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bits = Vec::with_capacity(bytes.len() * 8);
        for byte in bytes {
            for shift in (0..8).rev() {
                bits.push((byte >> shift) & 1 == 1);
            }
        }
        Self(bits)
    }

    /// Parse a string of '0' and '1' characters
    pub fn parse(s: &str) -> Result<Self> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(Error::Serialization(format!(
                    "invalid bit character {:?}",
                    other
                ))),
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// Pack into bytes, zero padding the final byte on the right
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, bit)| acc | ((*bit as u8) << (7 - i)))
            })
            .collect()
    }

    pub fn push(&mut self, bit: bool) {
        self.0.push(bit);
    }

    pub fn extend(&mut self, other: &BitString) {
        self.0.extend_from_slice(&other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// Render each bit as an ASCII '0' or '1'
    pub fn to_bit_chars(&self) -> String {
        self.iter().map(|b| if b { '1' } else { '0' }).collect()
    }
}

impl Encode for BitString {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&self.to_bytes());
        Ok(())
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString({})", self.to_bit_chars())
    }
}
