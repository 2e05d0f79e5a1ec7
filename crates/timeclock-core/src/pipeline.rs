//! Linear check-in pipeline: identity → message → signature → arguments
//!
//! Each stage is a pure transformation. The first failing stage aborts the
//! run and nothing downstream is produced.

use tracing::{debug, info, info_span};

use crate::args::{serialize, serialize_terminal, ArgumentLine};
use crate::codec::WORD_SIZE;
use crate::error::{Error, Result};
use crate::identity::{IdentityHasher, IdentityRecord, NonceSource};
use crate::message::build_message;
use crate::signer::{SignedMessage, Signer};
use crate::types::{Identifier, Nonce, PseudoIdentity, Timestamp};

/// Output of a full attendance check-in
#[derive(Debug, Clone)]
pub struct CheckInRecord {
    pub identity: IdentityRecord,
    pub timestamp: Timestamp,
    pub signed: SignedMessage,
    pub arguments: ArgumentLine,
}

/// Output of signing an externally derived pseudo-identity
#[derive(Debug, Clone)]
pub struct TerminalRecord {
    pub identity: PseudoIdentity,
    pub timestamp: Timestamp,
    pub signed: SignedMessage,
    pub arguments: ArgumentLine,
}

/// Runs check-ins against one terminal signer
#[derive(Debug)]
pub struct CheckIn<'a> {
    signer: &'a Signer,
    hasher: IdentityHasher,
}

impl<'a> CheckIn<'a> {
    pub fn new(signer: &'a Signer) -> Self {
        Self::with_hasher(signer, IdentityHasher::default())
    }

    pub fn with_hasher(signer: &'a Signer, hasher: IdentityHasher) -> Self {
        Self { signer, hasher }
    }

    /// Run the full pipeline for one employee check-in
    pub fn run(
        &self,
        identifier: &Identifier,
        nonce: Option<Nonce>,
        nonce_source: &mut dyn NonceSource,
        timestamp: Timestamp,
    ) -> Result<CheckInRecord> {
        let span = info_span!("check_in", timestamp = timestamp.as_u64());
        let _guard = span.enter();

        debug!(stage = "identity", "deriving pseudo-identity");
        let identity = self
            .hasher
            .generate_identity(identifier, nonce, nonce_source)?;

        debug!(stage = "message", "building signing message");
        let message = build_message(identity.identity.as_bytes(), timestamp)?;

        debug!(stage = "signature", "signing message");
        let signed = self.signer.sign(message.as_bytes())?;

        debug!(stage = "serialize", "serializing circuit arguments");
        let arguments = serialize(
            &signed.public_key,
            &signed.signature,
            signed.message.as_bytes(),
            timestamp,
            &identity.identifier,
            &identity.nonce,
        )?;

        info!(tokens = arguments.len(), "check-in signed");
        Ok(CheckInRecord {
            identity,
            timestamp,
            signed,
            arguments,
        })
    }

    /// Sign a pseudo-identity computed elsewhere (e.g. on the employee's
    /// device). Produces the terminal layout, which omits identifier and
    /// nonce.
    pub fn sign_identity(&self, identity: &[u8], timestamp: Timestamp) -> Result<TerminalRecord> {
        let span = info_span!("sign_identity", timestamp = timestamp.as_u64());
        let _guard = span.enter();

        let identity = PseudoIdentity::new(identity.try_into().map_err(|_| Error::InvalidInput {
            stage: "message",
            expected: WORD_SIZE,
            actual: identity.len(),
        })?);

        debug!(stage = "message", "building signing message");
        let message = build_message(identity.as_bytes(), timestamp)?;

        debug!(stage = "signature", "signing message");
        let signed = self.signer.sign(message.as_bytes())?;

        debug!(stage = "serialize", "serializing circuit arguments");
        let arguments = serialize_terminal(
            &signed.public_key,
            &signed.signature,
            signed.message.as_bytes(),
            timestamp,
        )?;

        info!(tokens = arguments.len(), "terminal signature produced");
        Ok(TerminalRecord {
            identity,
            timestamp,
            signed,
            arguments,
        })
    }
}
