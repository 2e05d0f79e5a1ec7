//! Error types for the check-in pipeline

use thiserror::Error;
use timeclock_jubjub::JubjubError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Invalid input at {stage} stage: expected {expected} bytes, got {actual}")]
    InvalidInput {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Key error: {0}")]
    Key(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Cryptographic error: {0}")]
    Crypto(#[from] JubjubError),
}
