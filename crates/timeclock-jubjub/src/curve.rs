//! Baby Jubjub parameters for arkworks
//!
//! ```text
//! a·x² + y² = 1 + d·x²·y²      over the BN254 scalar field
//! a = 168700, d = 168696
//! ```
//!
//! The generator is the ZoKrates base point, which has prime order L.

use ark_ec::{
    models::CurveConfig,
    twisted_edwards::{Affine, MontCurveConfig, Projective, TECurveConfig},
};
use ark_ff::fields::{Fp256, MontBackend, MontConfig};
use ark_ff::MontFp;

/// Base field: the BN254 scalar field
pub type Fq = ark_bn254::Fr;

#[derive(MontConfig)]
#[modulus = "2736030358979909402780800718157159386076813972158567259200215660948447373041"]
#[generator = "31"]
pub struct FrConfig;

/// Scalar field of the prime-order subgroup, modulo L
pub type Fr = Fp256<MontBackend<FrConfig, 4>>;

pub type EdwardsAffine = Affine<BabyJubjubConfig>;
pub type EdwardsProjective = Projective<BabyJubjubConfig>;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct BabyJubjubConfig;

impl CurveConfig for BabyJubjubConfig {
    type BaseField = Fq;
    type ScalarField = Fr;

    /// COFACTOR = 8
    const COFACTOR: &'static [u64] = &[8];

    /// COFACTOR^(-1) mod L
    const COFACTOR_INV: Fr =
        MontFp!("2394026564107420727433200628387514462817212225638746351800188703329891451411");
}

impl TECurveConfig for BabyJubjubConfig {
    const COEFF_A: Fq = MontFp!("168700");

    const COEFF_D: Fq = MontFp!("168696");

    const GENERATOR: EdwardsAffine = EdwardsAffine::new_unchecked(GENERATOR_X, GENERATOR_Y);

    type MontCurveConfig = BabyJubjubConfig;
}

impl MontCurveConfig for BabyJubjubConfig {
    /// A = 2(a + d) / (a - d)
    const COEFF_A: Fq = MontFp!("168698");

    /// B = 4 / (a - d)
    const COEFF_B: Fq = MontFp!("1");

    type TECurveConfig = BabyJubjubConfig;
}

const GENERATOR_X: Fq =
    MontFp!("16540640123574156134436876038791482806971768689494387082833631921987005038935");

const GENERATOR_Y: Fq =
    MontFp!("20819045374670962167435360035096875258406992893633759881276124905556507972311");
