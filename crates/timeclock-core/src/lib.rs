//! Timeclock Core - check-in records for zero-knowledge attendance proofs
//!
//! A terminal turns an employee check-in into a signed message and the
//! exact argument line consumed by the attendance proof circuit:
//!
//! ```text
//! identifier, nonce ──► identity ──► message ──► signature ──► argument line
//!                       SHA-256      SHA-256     EdDSA         520 tokens
//!                                    + padding   Baby Jubjub
//! ```
//!
//! Every integer crossing a stage boundary is a 32-byte big-endian word
//! (see [`codec`]).

pub mod args;
pub mod codec;
pub mod error;
pub mod identity;
pub mod message;
pub mod pipeline;
pub mod signer;
pub mod types;

pub use args::{
    serialize, serialize_terminal, ArgumentLayout, ArgumentLine, CheckInArguments, MESSAGE_BITS,
    SIGNATURE_SCALARS,
};
pub use codec::{decode_uint, encode_all, encode_uint, BitString, Encode, WORD_SIZE};
pub use error::{Error, Result};
pub use identity::{
    hash_identity, IdentityHasher, IdentityRecord, NonceSource, RngNonceSource,
    DEFAULT_NONCE_DIGITS,
};
pub use message::build_message;
pub use pipeline::{CheckIn, CheckInRecord, TerminalRecord};
pub use signer::{parse_private_key, sign, verify, SignedMessage, Signer};
pub use types::{
    Identifier, Nonce, PseudoIdentity, SigningMessage, Timestamp, MAX_NONCE_DIGITS, MESSAGE_SIZE,
};

#[cfg(any(test, feature = "debug-key"))]
pub use signer::DEBUG_PRIVATE_KEY;

pub use timeclock_jubjub::{Point, PrivateKey, PublicKey, Signature};
