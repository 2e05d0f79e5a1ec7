//! End-to-end check-in tests for the Timeclock system
//!
//! These tests drive the terminal from key provisioning through check-in,
//! argument line output and verification.

use sha2::{Digest, Sha256};
use tempfile::tempdir;

use timeclock_core::{
    ArgumentLayout, ArgumentLine, Identifier, Nonce, PublicKey, Signer, Timestamp,
    DEBUG_PRIVATE_KEY,
};
use timeclock_terminal::{
    commands, generate_key_file, KeySource, OutputSink, TerminalConfig, TerminalError,
};

const KNOWN_LINE_SHA256: &str = "874111192455345d21d58ccc8ec307b78962b44c3f6d541df9fee03f0ca63f15";
const KNOWN_TIMESTAMP: u64 = 1_700_000_000;

fn debug_signer() -> Signer {
    KeySource::Debug.signer().unwrap()
}

/// Known vector: identifier 1, nonce "00000000", debug key
#[test]
fn test_known_check_in_line() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("args.txt");

    // ==========================================
    // STEP 1: Provision the debug key
    // ==========================================
    let signer = debug_signer();
    let config = TerminalConfig::default();

    // ==========================================
    // STEP 2: Check in to a file sink
    // ==========================================
    let record = commands::check_in(
        &signer,
        &config,
        &Identifier::from_u64(1),
        Some(Nonce::new("00000000").unwrap()),
        Timestamp::new(KNOWN_TIMESTAMP),
        &OutputSink::File(output.clone()),
    )
    .unwrap();

    // ==========================================
    // STEP 3: Check the written line
    // ==========================================
    let written = std::fs::read_to_string(&output).unwrap();
    let line = written.strip_suffix('\n').unwrap();
    assert!(!line.contains('\n'));
    assert_eq!(line, record.arguments.to_string());
    assert_eq!(line.split(' ').count(), 520);
    assert!(line.ends_with(" 1700000000 1 0"));
    assert_eq!(hex::encode(Sha256::digest(line.as_bytes())), KNOWN_LINE_SHA256);

    // ==========================================
    // STEP 4: Verify the line as the circuit would
    // ==========================================
    let report = commands::verify_line(line, ArgumentLayout::Attendance).unwrap();
    assert!(report.valid);
    assert_eq!(report.identifier, Some(Identifier::from_u64(1)));
}

#[test]
fn test_rerun_produces_identical_file() {
    let dir = tempdir().unwrap();
    let signer = debug_signer();
    let config = TerminalConfig::default();

    let mut lines = Vec::new();
    for name in ["first.txt", "second.txt"] {
        let path = dir.path().join(name);
        commands::check_in(
            &signer,
            &config,
            &Identifier::from_u64(1),
            Some(Nonce::new("00000000").unwrap()),
            Timestamp::new(KNOWN_TIMESTAMP),
            &OutputSink::File(path.clone()),
        )
        .unwrap();
        lines.push(std::fs::read(&path).unwrap());
    }

    assert_eq!(lines[0], lines[1]);
}

#[test]
fn test_failed_check_in_leaves_no_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("args.txt");
    let oversized = Identifier::new(num_bigint::BigUint::from(1u8) << 256);

    let err = commands::check_in(
        &debug_signer(),
        &TerminalConfig::default(),
        &oversized,
        Some(Nonce::new("1").unwrap()),
        Timestamp::new(KNOWN_TIMESTAMP),
        &OutputSink::File(output.clone()),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        TerminalError::Core(timeclock_core::Error::Encoding(_))
    ));
    assert!(!output.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

/// Employee derives the identity; the terminal signs only the digest
#[test]
fn test_split_identity_and_terminal_signature() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("terminal.txt");
    let config = TerminalConfig::default();

    // ==========================================
    // STEP 1: Employee side, no key
    // ==========================================
    let identity = commands::identity(&config, &Identifier::from_u64(19221733), None).unwrap();
    assert_eq!(identity.nonce.as_str().len(), config.nonce_digits);

    let json = serde_json::to_value(&identity).unwrap();
    assert_eq!(json["identifier"], "19221733");

    // ==========================================
    // STEP 2: Terminal signs the digest
    // ==========================================
    let signer = debug_signer();
    let record = commands::sign_identity(
        &signer,
        &identity.identity.to_hex(),
        Timestamp::new(KNOWN_TIMESTAMP),
        &OutputSink::File(output.clone()),
    )
    .unwrap();
    assert_eq!(record.identity, identity.identity);

    // ==========================================
    // STEP 3: Terminal line verifies and matches a full check-in
    // ==========================================
    let line = std::fs::read_to_string(&output).unwrap();
    let report = commands::verify_line(&line, ArgumentLayout::Terminal).unwrap();
    assert!(report.valid);
    assert_eq!(report.identifier, None);

    let full = commands::check_in(
        &signer,
        &config,
        &identity.identifier,
        Some(identity.nonce.clone()),
        Timestamp::new(KNOWN_TIMESTAMP),
        &OutputSink::File(dir.path().join("full.txt")),
    )
    .unwrap();
    assert_eq!(full.signed, record.signed);
    assert_eq!(full.arguments.tokens()[..518], record.arguments.tokens()[..518]);
}

#[test]
fn test_tampered_signature_rejected() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("args.txt");
    commands::check_in(
        &debug_signer(),
        &TerminalConfig::default(),
        &Identifier::from_u64(7),
        Some(Nonce::new("12345678").unwrap()),
        Timestamp::new(KNOWN_TIMESTAMP),
        &OutputSink::File(output.clone()),
    )
    .unwrap();

    let line = std::fs::read_to_string(&output).unwrap();
    let mut tokens: Vec<String> = line.split_whitespace().map(String::from).collect();

    // flip the low bit of S
    let last = tokens[2].pop().unwrap();
    tokens[2].push(char::from(last as u8 ^ 1));

    let parsed = ArgumentLine::parse(&tokens.join(" "), ArgumentLayout::Attendance).unwrap();
    assert!(parsed.verify().is_err());

    let report = commands::verify_line(&tokens.join(" "), ArgumentLayout::Attendance).unwrap();
    assert!(!report.valid);
}

/// Generated key replaces the debug key end to end
#[test]
fn test_generated_key_signs_verifiable_lines() {
    let dir = tempdir().unwrap();
    let key_path = dir.path().join("terminal.key");
    let config_path = dir.path().join("terminal.json");
    let output = dir.path().join("args.txt");

    // ==========================================
    // STEP 1: Generate key and persist config
    // ==========================================
    generate_key_file(&key_path).unwrap();
    let config = TerminalConfig {
        key_path: Some(key_path.clone()),
        output_path: Some(output.clone()),
        nonce_digits: 10,
    };
    config.save(&config_path).unwrap();

    // ==========================================
    // STEP 2: Reload and resolve the key like the CLI does
    // ==========================================
    let config = TerminalConfig::load(&config_path).unwrap();
    let source = KeySource::resolve(None, None, false, &config).unwrap();
    let signer = source.signer().unwrap();

    let debug_pk = PublicKey::from_private(
        &timeclock_core::parse_private_key(DEBUG_PRIVATE_KEY).unwrap(),
    );
    assert_ne!(signer.public_key(), &debug_pk);

    // ==========================================
    // STEP 3: Check in with a generated nonce
    // ==========================================
    let sink = OutputSink::from_path(config.output_path.clone());
    let record = commands::check_in(
        &signer,
        &config,
        &Identifier::from_u64(42),
        None,
        Timestamp::new(KNOWN_TIMESTAMP + 60),
        &sink,
    )
    .unwrap();
    assert_eq!(record.identity.nonce.as_str().len(), 10);

    let line = std::fs::read_to_string(&output).unwrap();
    let report = commands::verify_line(&line, ArgumentLayout::Attendance).unwrap();
    assert!(report.valid);
    assert_eq!(report.nonce, Some(record.identity.nonce.value().to_string()));
}
