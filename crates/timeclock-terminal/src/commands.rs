//! Terminal operations behind the `timeclock` subcommands
//!
//! Each operation runs the whole pipeline first and touches the sink last.

use serde::Serialize;
use timeclock_core::{
    ArgumentLayout, ArgumentLine, CheckIn, CheckInArguments, CheckInRecord, Identifier,
    IdentityRecord, Nonce, NonceSource, RngNonceSource, Signer, TerminalRecord, Timestamp,
};
use tracing::info;

use crate::config::TerminalConfig;
use crate::error::{Result, TerminalError};
use crate::sink::OutputSink;

/// Parse an employee identifier; `hex` forces hexadecimal digits
pub fn parse_identifier(text: &str, hex: bool) -> Result<Identifier> {
    let identifier = if hex {
        Identifier::from_hex(text.trim())?
    } else {
        text.parse()?
    };
    Ok(identifier)
}

/// Full attendance check-in, written to `sink` as a 520-token line
pub fn check_in(
    signer: &Signer,
    config: &TerminalConfig,
    identifier: &Identifier,
    nonce: Option<Nonce>,
    timestamp: Timestamp,
    sink: &OutputSink,
) -> Result<CheckInRecord> {
    let mut source = RngNonceSource::os();
    check_in_with(signer, config, identifier, nonce, &mut source, timestamp, sink)
}

/// [`check_in`] with an explicit nonce source
pub fn check_in_with(
    signer: &Signer,
    config: &TerminalConfig,
    identifier: &Identifier,
    nonce: Option<Nonce>,
    source: &mut dyn NonceSource,
    timestamp: Timestamp,
    sink: &OutputSink,
) -> Result<CheckInRecord> {
    let pipeline = CheckIn::with_hasher(signer, config.hasher()?);
    let record = pipeline.run(identifier, nonce, source, timestamp)?;

    sink.write_line(&record.arguments.to_string())?;
    info!(
        identity = %record.identity.identity.to_hex(),
        timestamp = timestamp.as_u64(),
        "check-in recorded"
    );
    Ok(record)
}

/// Sign a pseudo-identity digest computed on the employee's side
pub fn sign_identity(
    signer: &Signer,
    digest_hex: &str,
    timestamp: Timestamp,
    sink: &OutputSink,
) -> Result<TerminalRecord> {
    let digest = hex::decode(digest_hex.trim().trim_start_matches("0x"))
        .map_err(|e| TerminalError::Config(format!("digest is not hex: {}", e)))?;
    let record = CheckIn::new(signer).sign_identity(&digest, timestamp)?;

    sink.write_line(&record.arguments.to_string())?;
    Ok(record)
}

/// Employee-side identity derivation; no key involved
pub fn identity(
    config: &TerminalConfig,
    identifier: &Identifier,
    nonce: Option<Nonce>,
) -> Result<IdentityRecord> {
    let mut source = RngNonceSource::os();
    let record = config
        .hasher()?
        .generate_identity(identifier, nonce, &mut source)?;
    Ok(record)
}

/// Public key coordinates as printed by `timeclock pubkey`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicKeyInfo {
    pub x: String,
    pub y: String,
}

pub fn public_key(signer: &Signer) -> PublicKeyInfo {
    let point = signer.public_key().point();
    PublicKeyInfo {
        x: point.x().to_string(),
        y: point.y().to_string(),
    }
}

/// Outcome of `timeclock verify`
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub valid: bool,
    pub timestamp: Timestamp,
    /// First half of the signed message, hex
    pub message_digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Identifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

/// Parse an argument line and check its signature. A malformed line is an
/// error; a well-formed line with a bad signature yields `valid: false`.
pub fn verify_line(line: &str, layout: ArgumentLayout) -> Result<VerifyReport> {
    let arguments: CheckInArguments = ArgumentLine::parse(line, layout)?;
    let valid = arguments.verify().is_ok();

    Ok(VerifyReport {
        valid,
        timestamp: arguments.timestamp,
        message_digest: hex::encode(arguments.message.digest()),
        identifier: arguments.identifier,
        nonce: arguments.nonce.map(|n| n.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeclock_core::parse_private_key;

    const SCALAR: &str =
        "1997011358982923168928344992199991480689546837621580239342656433234255379025";

    fn signer() -> Signer {
        Signer::new(parse_private_key(SCALAR).unwrap())
    }

    #[test]
    fn test_parse_identifier() {
        assert_eq!(
            parse_identifier("19221733", false).unwrap(),
            Identifier::from_u64(19221733)
        );
        assert_eq!(
            parse_identifier("ff", true).unwrap(),
            Identifier::from_u64(255)
        );
        assert_eq!(
            parse_identifier("0xff", false).unwrap(),
            Identifier::from_u64(255)
        );
        assert!(parse_identifier("ff", false).is_err());
    }

    #[test]
    fn test_public_key_coordinates() {
        let info = public_key(&signer());
        assert_eq!(
            info.x,
            "14897476871502190904409029696666322856887678969656209656241038339251270171395"
        );
        assert_eq!(
            info.y,
            "16668832459046858928951622951481252834155254151733002984053501254009901876174"
        );
    }

    #[test]
    fn test_identity_uses_configured_width() {
        let config = TerminalConfig {
            nonce_digits: 5,
            ..TerminalConfig::default()
        };
        let record = identity(&config, &Identifier::from_u64(7), None).unwrap();
        assert_eq!(record.nonce.as_str().len(), 5);
    }

    #[test]
    fn test_verify_reports_bad_signature() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("line.txt");
        let record = check_in(
            &signer(),
            &TerminalConfig::default(),
            &Identifier::from_u64(1),
            Some(Nonce::new("00000000").unwrap()),
            Timestamp::new(1_700_000_000),
            &OutputSink::File(path.clone()),
        )
        .unwrap();

        let line = std::fs::read_to_string(&path).unwrap();
        let report = verify_line(&line, ArgumentLayout::Attendance).unwrap();
        assert!(report.valid);
        assert_eq!(
            report.message_digest,
            hex::encode(record.signed.message.digest())
        );
        assert_eq!(report.nonce.as_deref(), Some("0"));

        // nudge the last digit of S
        let mut tokens: Vec<String> = line.split_whitespace().map(String::from).collect();
        let last = tokens[2].pop().unwrap();
        tokens[2].push(if last == '9' { '8' } else { '9' });
        let report = verify_line(&tokens.join(" "), ArgumentLayout::Attendance).unwrap();
        assert!(!report.valid);
    }

    #[test]
    fn test_sign_identity_rejects_bad_digest() {
        let sink = OutputSink::Stdout;
        assert!(matches!(
            sign_identity(&signer(), "zz", Timestamp::new(0), &sink),
            Err(TerminalError::Config(_))
        ));
        assert!(matches!(
            sign_identity(&signer(), "abcd", Timestamp::new(0), &sink),
            Err(TerminalError::Core(timeclock_core::Error::InvalidInput { .. }))
        ));
    }
}
