//! EdDSA over Baby Jubjub with SHA-256 challenges

use std::fmt;

use ark_ff::{BigInteger, PrimeField};
use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::curve::Fr;
use crate::error::{JubjubError, Result};
use crate::field::{fq_to_bytes_be, Fq, FIELD_BYTES};
use crate::point::Point;
use crate::{COFACTOR, SUBGROUP_ORDER};

fn sha256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Hash the concatenation of `parts` with SHA-256 and read the digest as a
/// big-endian integer. The result is not reduced.
pub fn hash_to_scalar(parts: &[&[u8]]) -> BigUint {
    BigUint::from_bytes_be(&sha256(parts))
}

/// Residue mod 8 of a big-endian integer
fn low_bits(bytes: &[u8; 32]) -> u8 {
    bytes[31] & 7
}

/// Private signing scalar `0 < k < p`, held as 32 big-endian bytes
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; FIELD_BYTES]);

impl PrivateKey {
    /// Create a key from an integer scalar
    pub fn from_scalar(scalar: &BigUint) -> Result<Self> {
        let raw = Zeroizing::new(scalar.to_bytes_be());
        if raw.len() > FIELD_BYTES {
            return Err(JubjubError::InvalidScalar(
                "private key exceeds field modulus".to_string(),
            ));
        }
        let mut bytes = Zeroizing::new([0u8; FIELD_BYTES]);
        bytes[FIELD_BYTES - raw.len()..].copy_from_slice(&raw);
        Self::from_bytes_be(&bytes)
    }

    /// Create a key from 32 big-endian bytes
    pub fn from_bytes_be(bytes: &[u8; FIELD_BYTES]) -> Result<Self> {
        if bytes.iter().all(|b| *b == 0) {
            return Err(JubjubError::InvalidScalar("private key is zero".to_string()));
        }
        let modulus = Fq::MODULUS.to_bytes_be();
        if bytes[..] >= modulus[..] {
            return Err(JubjubError::InvalidScalar(
                "private key exceeds field modulus".to_string(),
            ));
        }
        Ok(Self(*bytes))
    }

    /// Sample a key: 33 random bytes read little-endian, reduced mod p.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        loop {
            let mut wide = Zeroizing::new([0u8; FIELD_BYTES + 1]);
            rng.fill_bytes(&mut *wide);
            let reduced = Zeroizing::new(Fq::from_le_bytes_mod_order(&*wide));
            let bytes = Zeroizing::new(fq_to_bytes_be(&reduced));
            if let Ok(key) = Self::from_bytes_be(&bytes) {
                return key;
            }
        }
    }

    /// The secret scalar as 32 big-endian bytes
    pub fn to_bytes_be(&self) -> Zeroizing<[u8; FIELD_BYTES]> {
        Zeroizing::new(self.0)
    }

    /// `k mod L`; the generator has order L, so this scales it like `k`
    fn reduced(&self) -> Zeroizing<Fr> {
        Zeroizing::new(Fr::from_be_bytes_mod_order(&self.0))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_private(self)
    }

    /// Deterministically sign `message`.
    ///
    /// `S` is assembled from its residues mod L and mod 8 so the secret
    /// never leaves zeroizing storage.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let base = Point::generator();
        let k = self.reduced();
        let public = base.mul_scalar(&k);

        let r_digest = Zeroizing::new(sha256(&[&self.0, message]));
        let r = Zeroizing::new(Fr::from_be_bytes_mod_order(&*r_digest));
        let r_point = base.mul_scalar(&r);

        let h_digest = sha256(&[&r_point.x_bytes(), &public.x_bytes(), message]);
        let h = Fr::from_be_bytes_mod_order(&h_digest);

        let kh = Zeroizing::new(&*k * &h);
        let s_mod_l = &*r + &*kh;
        let s_mod_8 = (low_bits(&r_digest) + low_bits(&self.0) * low_bits(&h_digest)) & 7;

        Signature {
            r: r_point,
            s: combine_residues(&s_mod_l, s_mod_8),
        }
    }
}

/// The unique `S < 8·L` with the given residues. L ≡ 1 (mod 8), so
/// `S = s + t·L` where `t ≡ s8 - s (mod 8)`.
fn combine_residues(s_mod_l: &Fr, s_mod_8: u8) -> BigUint {
    let s = s_mod_l.into_bigint();
    let t = (s_mod_8 + COFACTOR as u8 - (s.0[0] & 7) as u8) & 7;
    BigUint::from(s) + &*SUBGROUP_ORDER * t
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Public key `A = k·B`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey(Point);

impl PublicKey {
    pub fn from_private(key: &PrivateKey) -> Self {
        Self(Point::generator().mul_scalar(&key.reduced()))
    }

    /// Wrap a point received from elsewhere; the point must be on the curve
    pub fn from_point(point: Point) -> Result<Self> {
        if !point.is_on_curve() {
            return Err(JubjubError::InvalidPoint {
                x: point.x().to_string(),
                y: point.y().to_string(),
            });
        }
        Ok(Self(point))
    }

    pub fn point(&self) -> &Point {
        &self.0
    }

    /// Check `S·B == R + h·A`
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<()> {
        let h = hash_to_scalar(&[&signature.r.x_bytes(), &self.0.x_bytes(), message]);
        let lhs = Point::generator().mul(&signature.s);
        let rhs = signature.r.add(&self.0.mul(&h));
        if lhs == rhs {
            Ok(())
        } else {
            Err(JubjubError::VerificationFailed)
        }
    }
}

/// Signature `(R, S)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub r: Point,
    pub s: BigUint,
}

impl Signature {
    pub fn new(r: Point, s: BigUint) -> Self {
        Self { r, s }
    }
}
