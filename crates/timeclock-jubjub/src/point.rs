//! Affine points on Baby Jubjub
//!
//! Thin wrapper over the arkworks affine type that speaks in integers at
//! the boundary: coordinates in and out are canonical `BigUint`s and
//! scalars may exceed the group order.

use std::fmt;

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use num_bigint::BigUint;

use crate::curve::{EdwardsAffine, Fr};
use crate::error::{JubjubError, Result};
use crate::field::{fq_from_canonical, fq_to_biguint, fq_to_bytes_be, FIELD_BYTES};

/// Point `(x, y)` on the curve
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point(EdwardsAffine);

impl Point {
    /// Create a point from canonical coordinates, checking the curve equation
    pub fn from_coordinates(x: BigUint, y: BigUint) -> Result<Self> {
        let point = EdwardsAffine::new_unchecked(fq_from_canonical(&x)?, fq_from_canonical(&y)?);
        if !point.is_on_curve() {
            return Err(JubjubError::InvalidPoint {
                x: x.to_string(),
                y: y.to_string(),
            });
        }
        Ok(Self(point))
    }

    /// Neutral element `(0, 1)`
    pub fn identity() -> Self {
        Self(EdwardsAffine::zero())
    }

    /// ZoKrates base point, of prime order L
    pub fn generator() -> Self {
        Self(EdwardsAffine::generator())
    }

    pub fn is_identity(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_on_curve(&self) -> bool {
        self.0.is_on_curve()
    }

    pub fn x(&self) -> BigUint {
        fq_to_biguint(&self.0.x)
    }

    pub fn y(&self) -> BigUint {
        fq_to_biguint(&self.0.y)
    }

    /// x-coordinate as 32 big-endian bytes
    pub fn x_bytes(&self) -> [u8; FIELD_BYTES] {
        fq_to_bytes_be(&self.0.x)
    }

    pub fn add(&self, other: &Point) -> Point {
        Self((self.0.into_group() + other.0).into_affine())
    }

    pub fn double(&self) -> Point {
        self.add(self)
    }

    /// Multiply by an arbitrary non-negative integer. The scalar is not
    /// reduced, so points outside the prime subgroup keep their torsion part.
    pub fn mul(&self, scalar: &BigUint) -> Point {
        Self(self.0.mul_bigint(scalar.to_u64_digits()).into_affine())
    }

    /// Multiply by an element of the scalar field
    pub(crate) fn mul_scalar(&self, scalar: &Fr) -> Point {
        let limbs = zeroize::Zeroizing::new(scalar.into_bigint());
        Self(self.0.mul_bigint(&*limbs).into_affine())
    }

    pub fn neg(&self) -> Point {
        Self(-self.0)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.x(), self.y())
    }
}
