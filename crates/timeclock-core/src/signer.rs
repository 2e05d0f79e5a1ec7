//! Terminal signing key and EdDSA signing of check-in messages
//!
//! Key material is always supplied by the caller. The signer never logs or
//! serializes the private scalar.

use num_bigint::BigUint;
use num_traits::Num;
use timeclock_jubjub::{PrivateKey, PublicKey, Signature};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{SigningMessage, MESSAGE_SIZE};

/// Well-known scalar used by the terminal's debug build. Anyone can sign
/// with it; it must never back a production terminal.
#[cfg(any(test, feature = "debug-key"))]
pub const DEBUG_PRIVATE_KEY: &str =
    "1997011358982923168928344992199991480689546837621580239342656433234255379025";

/// Parse a private scalar written as decimal or `0x`-prefixed hex
pub fn parse_private_key(text: &str) -> Result<PrivateKey> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::Key("private key is empty".to_string()));
    }
    let scalar = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => BigUint::from_str_radix(hex, 16),
        None => BigUint::from_str_radix(text, 10),
    }
    .map_err(|_| Error::Key("private key is not a decimal or 0x-hex scalar".to_string()))?;

    PrivateKey::from_scalar(&scalar).map_err(|e| Error::Key(e.to_string()))
}

/// A signed check-in message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    pub message: SigningMessage,
    pub public_key: PublicKey,
    pub signature: Signature,
}

/// Holds the terminal key pair for one signing session
#[derive(Debug)]
pub struct Signer {
    key: PrivateKey,
    public_key: PublicKey,
}

impl Signer {
    pub fn new(key: PrivateKey) -> Self {
        let public_key = key.public_key();
        Self { key, public_key }
    }

    /// Signer backed by [`DEBUG_PRIVATE_KEY`]
    #[cfg(any(test, feature = "debug-key"))]
    pub fn debug() -> Self {
        tracing::warn!("using the well-known debug signing key");
        // The constant is a valid in-range scalar
        Self::new(parse_private_key(DEBUG_PRIVATE_KEY).expect("debug key is valid"))
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Sign a 64-byte check-in message
    pub fn sign(&self, message: &[u8]) -> Result<SignedMessage> {
        let message = SigningMessage::from_slice(message).map_err(|_| Error::InvalidInput {
            stage: "signature",
            expected: MESSAGE_SIZE,
            actual: message.len(),
        })?;

        let signature = self.key.sign(message.as_bytes());
        debug!("signed check-in message");

        Ok(SignedMessage {
            message,
            public_key: self.public_key.clone(),
            signature,
        })
    }
}

/// Sign `message` with `key`, returning the derived public key and signature
pub fn sign(message: &[u8], key: &PrivateKey) -> Result<(PublicKey, Signature)> {
    let signed = Signer::new(key.clone()).sign(message)?;
    Ok((signed.public_key, signed.signature))
}

/// Verify a signature over a 64-byte check-in message
pub fn verify(message: &[u8], public_key: &PublicKey, signature: &Signature) -> Result<()> {
    if message.len() != MESSAGE_SIZE {
        return Err(Error::InvalidInput {
            stage: "verification",
            expected: MESSAGE_SIZE,
            actual: message.len(),
        });
    }
    public_key.verify(message, signature)?;
    Ok(())
}
