//! Pseudo-identity derivation
//!
//! An employee identifier is blinded with a fresh decimal nonce:
//! `identity = SHA256(encode(id) ‖ encode(nonce))`. The nonce is kept in the
//! returned record so it can be disclosed alongside the proof later.

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::codec::{encode_all, encode_uint};
use crate::error::{Error, Result};
use crate::types::{Identifier, Nonce, PseudoIdentity, MAX_NONCE_DIGITS};

/// Default number of decimal digits in a generated nonce
pub const DEFAULT_NONCE_DIGITS: usize = 8;

/// Source of fresh nonces
pub trait NonceSource {
    /// Produce a nonce of exactly `digits` decimal digits
    fn next_nonce(&mut self, digits: usize) -> Result<Nonce>;
}

/// Nonce source backed by a cryptographically secure RNG
#[derive(Debug)]
pub struct RngNonceSource<R> {
    rng: R,
}

impl RngNonceSource<OsRng> {
    /// Operating system CSPRNG, used for production nonces
    pub fn os() -> Self {
        Self { rng: OsRng }
    }
}

impl<R: RngCore + CryptoRng> RngNonceSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore + CryptoRng> NonceSource for RngNonceSource<R> {
    fn next_nonce(&mut self, digits: usize) -> Result<Nonce> {
        let s: String = (0..digits)
            .map(|_| char::from(b'0' + self.rng.gen_range(0..10u8)))
            .collect();
        Nonce::new(s)
    }
}

/// Result of identity generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub identifier: Identifier,
    pub nonce: Nonce,
    pub identity: PseudoIdentity,
}

/// Hash an identifier and nonce into a pseudo-identity
pub fn hash_identity(identifier: &Identifier, nonce: &Nonce) -> Result<PseudoIdentity> {
    let preimage = encode_all(&[identifier, nonce])?;
    let digest: [u8; 32] = Sha256::digest(&preimage).into();
    Ok(PseudoIdentity::new(digest))
}

/// Derives pseudo-identities with a configured nonce width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityHasher {
    nonce_digits: usize,
}

impl Default for IdentityHasher {
    fn default() -> Self {
        Self {
            nonce_digits: DEFAULT_NONCE_DIGITS,
        }
    }
}

impl IdentityHasher {
    pub fn new(nonce_digits: usize) -> Result<Self> {
        if nonce_digits == 0 || nonce_digits > MAX_NONCE_DIGITS {
            return Err(Error::InvalidValue(format!(
                "nonce width must be 1..={} digits, got {}",
                MAX_NONCE_DIGITS, nonce_digits
            )));
        }
        Ok(Self { nonce_digits })
    }

    pub fn nonce_digits(&self) -> usize {
        self.nonce_digits
    }

    /// Generate a pseudo-identity. A nonce is drawn from `source` only when
    /// none is supplied.
    pub fn generate_identity(
        &self,
        identifier: &Identifier,
        nonce: Option<Nonce>,
        source: &mut dyn NonceSource,
    ) -> Result<IdentityRecord> {
        // Width check first so oversized identifiers never reach the hash
        encode_uint(identifier.value())?;

        let nonce = match nonce {
            Some(nonce) => nonce,
            None => source.next_nonce(self.nonce_digits)?,
        };
        let identity = hash_identity(identifier, &nonce)?;
        debug!(identity = %identity.to_hex(), "derived pseudo-identity");

        Ok(IdentityRecord {
            identifier: identifier.clone(),
            nonce,
            identity,
        })
    }
}
