//! Signing message construction

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::codec::{encode_all, WORD_SIZE};
use crate::error::{Error, Result};
use crate::types::{SigningMessage, Timestamp, MESSAGE_SIZE};

/// Build the 64-byte message signed by the terminal.
///
/// `SHA256(identity ‖ encode(timestamp))` followed by 32 zero bytes, since
/// the signature circuit consumes a 512-bit message.
pub fn build_message(identity: &[u8], timestamp: Timestamp) -> Result<SigningMessage> {
    if identity.len() != WORD_SIZE {
        return Err(Error::InvalidInput {
            stage: "message",
            expected: WORD_SIZE,
            actual: identity.len(),
        });
    }

    let preimage = encode_all(&[&identity, &timestamp])?;
    let digest = Sha256::digest(&preimage);

    let mut message = [0u8; MESSAGE_SIZE];
    message[..WORD_SIZE].copy_from_slice(&digest);
    debug!(timestamp = timestamp.as_u64(), "built signing message");

    Ok(SigningMessage::new(message))
}
