//! Integer views of BN254 field elements

use ark_ff::PrimeField;
use num_bigint::BigUint;

use crate::error::{JubjubError, Result};
use crate::MODULUS;

pub use crate::curve::Fq;

/// Width of a serialized field element in bytes
pub const FIELD_BYTES: usize = 32;

/// Big-endian encoding, left padded to [`FIELD_BYTES`]
pub fn fq_to_bytes_be(value: &Fq) -> [u8; FIELD_BYTES] {
    let limbs = value.into_bigint().0;
    let mut out = [0u8; FIELD_BYTES];
    for (chunk, limb) in out.chunks_exact_mut(8).zip(limbs.iter().rev()) {
        chunk.copy_from_slice(&limb.to_be_bytes());
    }
    out
}

/// Canonical integer value
pub fn fq_to_biguint(value: &Fq) -> BigUint {
    (*value).into()
}

/// Accept only canonical representatives `0 <= n < p`
pub fn fq_from_canonical(value: &BigUint) -> Result<Fq> {
    if *value >= *MODULUS {
        return Err(JubjubError::NonCanonicalField(value.to_string()));
    }
    Ok(Fq::from(value.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bytes_pads_left() {
        let bytes = fq_to_bytes_be(&Fq::from(0x0102u64));
        assert_eq!(&bytes[..30], &[0u8; 30]);
        assert_eq!(&bytes[30..], &[1, 2]);
    }

    #[test]
    fn test_bytes_match_integer() {
        let value = &*MODULUS - 1u32;
        let fq = fq_from_canonical(&value).unwrap();
        assert_eq!(BigUint::from_bytes_be(&fq_to_bytes_be(&fq)), value);
        assert_eq!(fq_to_biguint(&fq), value);
    }

    #[test]
    fn test_from_canonical_rejects_modulus() {
        assert!(matches!(
            fq_from_canonical(&MODULUS),
            Err(JubjubError::NonCanonicalField(_))
        ));
        assert_eq!(fq_from_canonical(&BigUint::from(0u8)).unwrap(), Fq::from(0u64));
    }
}
