//! Error types for curve and signature operations

use thiserror::Error;

/// Result type for curve operations
pub type Result<T> = std::result::Result<T, JubjubError>;

/// Errors raised by the Baby Jubjub primitive
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JubjubError {
    /// Scalar outside the accepted range
    #[error("Invalid scalar: {0}")]
    InvalidScalar(String),

    /// Coordinates do not satisfy the curve equation
    #[error("Invalid point: ({x}, {y}) is not on the curve")]
    InvalidPoint { x: String, y: String },

    /// Field element is not a canonical representative
    #[error("Non-canonical field element: {0}")]
    NonCanonicalField(String),

    /// S·B != R + h·A
    #[error("Signature verification failed")]
    VerificationFailed,
}
