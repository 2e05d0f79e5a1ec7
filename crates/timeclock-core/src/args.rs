//! Argument line for the proof system CLI
//!
//! Layout (all tokens separated by a single space):
//!
//! ```text
//! R.x R.y S A.x A.y  b0 b1 ... b511  timestamp [identifier nonce]
//! ```
//!
//! Scalars are decimal; message bits are '0'/'1', most significant bit of
//! the first message byte first. The token order is a wire contract with the
//! verifier circuit.

use std::fmt;

use num_bigint::BigUint;
use timeclock_jubjub::{Point, PublicKey, Signature, CURVE_ORDER};

use crate::codec::{encode_uint, BitString, WORD_SIZE};
use crate::error::{Error, Result};
use crate::types::{Identifier, Nonce, SigningMessage, Timestamp, MESSAGE_SIZE};

/// Decimal scalars preceding the message bits: R.x, R.y, S, A.x, A.y
pub const SIGNATURE_SCALARS: usize = 5;

/// Number of message bit tokens
pub const MESSAGE_BITS: usize = MESSAGE_SIZE * 8;

/// Which trailing scalars follow the message bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentLayout {
    /// timestamp, identifier, nonce (520 tokens)
    Attendance,
    /// timestamp only, for terminals that never see the identifier (518 tokens)
    Terminal,
}

impl ArgumentLayout {
    pub fn trailing_scalars(&self) -> usize {
        match self {
            Self::Attendance => 3,
            Self::Terminal => 1,
        }
    }

    pub fn token_count(&self) -> usize {
        SIGNATURE_SCALARS + MESSAGE_BITS + self.trailing_scalars()
    }
}

/// Serialized, space-separated argument line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentLine {
    layout: ArgumentLayout,
    tokens: Vec<String>,
}

impl ArgumentLine {
    pub fn layout(&self) -> ArgumentLayout {
        self.layout
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Parse a line previously produced by [`serialize`] or
    /// [`serialize_terminal`]
    pub fn parse(line: &str, layout: ArgumentLayout) -> Result<CheckInArguments> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != layout.token_count() {
            return Err(Error::Serialization(format!(
                "expected {} tokens, got {}",
                layout.token_count(),
                tokens.len()
            )));
        }

        let scalars = tokens[..SIGNATURE_SCALARS]
            .iter()
            .map(|t| parse_scalar(t))
            .collect::<Result<Vec<_>>>()?;
        let [rx, ry, s, ax, ay]: [BigUint; SIGNATURE_SCALARS] = scalars
            .try_into()
            .map_err(|_| Error::Serialization("malformed signature scalars".to_string()))?;

        if s >= *CURVE_ORDER {
            return Err(Error::Serialization(
                "signature scalar S is not below the curve order".to_string(),
            ));
        }
        let r = Point::from_coordinates(rx, ry)?;
        let public_key = PublicKey::from_point(Point::from_coordinates(ax, ay)?)?;

        let bit_tokens = &tokens[SIGNATURE_SCALARS..SIGNATURE_SCALARS + MESSAGE_BITS];
        if let Some(bad) = bit_tokens.iter().find(|t| **t != "0" && **t != "1") {
            return Err(Error::Serialization(format!("invalid bit token {:?}", bad)));
        }
        let bits = BitString::parse(&bit_tokens.concat())?;
        let message = SigningMessage::from_slice(&bits.to_bytes())?;

        let trailing = &tokens[SIGNATURE_SCALARS + MESSAGE_BITS..];
        let timestamp = trailing[0]
            .parse::<u64>()
            .map(Timestamp::new)
            .map_err(|_| Error::Serialization(format!("invalid timestamp {:?}", trailing[0])))?;

        let (identifier, nonce) = match layout {
            ArgumentLayout::Attendance => (
                Some(Identifier::new(parse_scalar(trailing[1])?)),
                Some(parse_scalar(trailing[2])?),
            ),
            ArgumentLayout::Terminal => (None, None),
        };

        Ok(CheckInArguments {
            signature: Signature::new(r, s),
            public_key,
            message,
            timestamp,
            identifier,
            nonce,
        })
    }
}

impl fmt::Display for ArgumentLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

/// Typed contents of a parsed argument line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInArguments {
    pub signature: Signature,
    pub public_key: PublicKey,
    pub message: SigningMessage,
    pub timestamp: Timestamp,
    pub identifier: Option<Identifier>,
    /// Nonce value; the original digit width is not recoverable
    pub nonce: Option<BigUint>,
}

impl CheckInArguments {
    /// Check the signature over the recovered message
    pub fn verify(&self) -> Result<()> {
        crate::signer::verify(self.message.as_bytes(), &self.public_key, &self.signature)
    }
}

/// Decimal digits of 2^256 - 1
const MAX_SCALAR_DIGITS: usize = 78;

fn parse_scalar(token: &str) -> Result<BigUint> {
    if token.is_empty()
        || token.len() > MAX_SCALAR_DIGITS
        || !token.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(Error::Serialization(format!(
            "invalid decimal scalar {:?}",
            token
        )));
    }
    BigUint::parse_bytes(token.as_bytes(), 10)
        .ok_or_else(|| Error::Serialization(format!("invalid decimal scalar {:?}", token)))
}

/// Message bits as the circuit reads them: the message's hex form is split
/// into two 256-bit halves, each re-encoded as a 32-byte word.
fn message_bits(message: &[u8]) -> Result<BitString> {
    let hex = hex::encode(message);
    if hex.len() * 4 != MESSAGE_BITS {
        return Err(Error::Serialization(format!(
            "message must be {} bits, got {}",
            MESSAGE_BITS,
            hex.len() * 4
        )));
    }

    let mut bits = BitString::new();
    for half in [&hex[..WORD_SIZE * 2], &hex[WORD_SIZE * 2..]] {
        let value = BigUint::parse_bytes(half.as_bytes(), 16)
            .ok_or_else(|| Error::Serialization("message half is not hex".to_string()))?;
        bits.extend(&BitString::from_bytes(&encode_uint(&value)?));
    }
    Ok(bits)
}

fn leading_tokens(
    public_key: &PublicKey,
    signature: &Signature,
    message: &[u8],
) -> Result<Vec<String>> {
    let bits = message_bits(message)?;
    let point = public_key.point();

    let mut tokens = Vec::with_capacity(SIGNATURE_SCALARS + MESSAGE_BITS + 3);
    tokens.push(signature.r.x().to_string());
    tokens.push(signature.r.y().to_string());
    tokens.push(signature.s.to_string());
    tokens.push(point.x().to_string());
    tokens.push(point.y().to_string());
    tokens.extend(bits.iter().map(|b| String::from(if b { "1" } else { "0" })));
    Ok(tokens)
}

/// Serialize a check-in in the attendance layout (520 tokens)
pub fn serialize(
    public_key: &PublicKey,
    signature: &Signature,
    message: &[u8],
    timestamp: Timestamp,
    identifier: &Identifier,
    nonce: &Nonce,
) -> Result<ArgumentLine> {
    let mut tokens = leading_tokens(public_key, signature, message)?;
    tokens.push(timestamp.to_string());
    tokens.push(identifier.to_string());
    tokens.push(nonce.value().to_string());

    Ok(ArgumentLine {
        layout: ArgumentLayout::Attendance,
        tokens,
    })
}

/// Serialize a terminal-only signature (518 tokens)
pub fn serialize_terminal(
    public_key: &PublicKey,
    signature: &Signature,
    message: &[u8],
    timestamp: Timestamp,
) -> Result<ArgumentLine> {
    let mut tokens = leading_tokens(public_key, signature, message)?;
    tokens.push(timestamp.to_string());

    Ok(ArgumentLine {
        layout: ArgumentLayout::Terminal,
        tokens,
    })
}
