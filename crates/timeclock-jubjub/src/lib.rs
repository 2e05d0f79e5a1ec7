//! # Timeclock Jubjub
//!
//! The SHA-256 EdDSA variant checked by ZoKrates-style signature
//! verification circuits, over Baby Jubjub as modelled by arkworks.
//!
//! ## Curve
//!
//! Twisted Edwards curve over the BN254 scalar field:
//!
//! ```text
//! a·x² + y² = 1 + d·x²·y²      a = 168700, d = 168696
//! ```
//!
//! ## Signing
//!
//! ```text
//! r = SHA256(k ‖ M)             (32-byte k, unreduced)
//! R = r·B
//! h = SHA256(R.x ‖ A.x ‖ M)
//! S = (r + k·h) mod #E
//! ```
//!
//! Verification checks `S·B == R + h·A`. All integers are hashed as 32-byte
//! big-endian words and points contribute only their x-coordinate.

use ark_ff::PrimeField;
use num_bigint::BigUint;
use once_cell::sync::Lazy;

pub mod curve;
pub mod eddsa;
pub mod error;
pub mod field;
pub mod point;

pub use curve::{BabyJubjubConfig, EdwardsAffine, Fr};
pub use eddsa::{hash_to_scalar, PrivateKey, PublicKey, Signature};
pub use error::{JubjubError, Result};
pub use field::{fq_to_bytes_be, Fq, FIELD_BYTES};
pub use point::Point;

/// Cofactor of the full curve group
pub const COFACTOR: u64 = 8;

/// Base field modulus p (the BN254 scalar field)
pub static MODULUS: Lazy<BigUint> = Lazy::new(|| Fq::MODULUS.into());

/// Order L of the prime subgroup generated by the base point
pub static SUBGROUP_ORDER: Lazy<BigUint> = Lazy::new(|| Fr::MODULUS.into());

/// Order of the full curve group, #E = 8·L
pub static CURVE_ORDER: Lazy<BigUint> = Lazy::new(|| &*SUBGROUP_ORDER * COFACTOR);
