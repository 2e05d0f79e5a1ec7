//! Property-based tests for timeclock-core using proptest
//!
//! These tests verify invariants that should hold for all valid inputs.

use num_bigint::BigUint;
use proptest::prelude::*;
use timeclock_core::{
    build_message, decode_uint, encode_uint, hash_identity, parse_private_key, ArgumentLayout,
    ArgumentLine, BitString, Encode, Error, Identifier, Nonce, Signer, Timestamp, MAX_NONCE_DIGITS,
    MESSAGE_BITS, SIGNATURE_SCALARS, WORD_SIZE,
};

const TEST_KEY: &str =
    "1997011358982923168928344992199991480689546837621580239342656433234255379025";

// ============================================
// Arbitrary Implementations
// ============================================

fn arb_word_value() -> impl Strategy<Value = BigUint> {
    any::<[u8; 32]>().prop_map(|bytes| BigUint::from_bytes_be(&bytes))
}

fn arb_identifier() -> impl Strategy<Value = Identifier> {
    arb_word_value().prop_map(Identifier::new)
}

fn arb_nonce() -> impl Strategy<Value = Nonce> {
    "[0-9]{1,20}".prop_map(|s| Nonce::new(s).unwrap())
}

fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
    any::<u64>().prop_map(Timestamp::new)
}

fn test_signer() -> Signer {
    Signer::new(parse_private_key(TEST_KEY).unwrap())
}

// ============================================
// Property Tests
// ============================================

proptest! {
    // ----------------------------------------
    // Codec Properties
    // ----------------------------------------

    #[test]
    fn uint_encode_decode_roundtrip(value in arb_word_value()) {
        let word = encode_uint(&value).unwrap();
        prop_assert_eq!(word.len(), WORD_SIZE);
        prop_assert_eq!(decode_uint(&word).unwrap(), value);
    }

    #[test]
    fn uint_encoding_is_stable(value in arb_word_value()) {
        prop_assert_eq!(value.encode().unwrap(), value.encode().unwrap());
    }

    #[test]
    fn uint_encoding_is_injective(a in arb_word_value(), b in arb_word_value()) {
        prop_assume!(a != b);
        prop_assert_ne!(encode_uint(&a).unwrap(), encode_uint(&b).unwrap());
    }

    #[test]
    fn oversized_uint_rejected(extra_bits in 1u32..64, low in arb_word_value()) {
        let value = (BigUint::from(1u8) << (255 + extra_bits)) + low;
        prop_assert!(matches!(encode_uint(&value), Err(Error::Encoding(_))));
    }

    #[test]
    fn bits_roundtrip_bytes(bytes in prop::collection::vec(any::<u8>(), 0..96)) {
        let bits = BitString::from_bytes(&bytes);
        prop_assert_eq!(bits.len(), bytes.len() * 8);
        prop_assert_eq!(bits.to_bytes(), bytes);
    }

    // ----------------------------------------
    // Identity Properties
    // ----------------------------------------

    #[test]
    fn distinct_nonces_give_distinct_identities(
        id in arb_identifier(),
        a in 0u64..100_000_000,
        b in 0u64..100_000_000,
    ) {
        prop_assume!(a != b);
        let na = Nonce::new(format!("{:08}", a)).unwrap();
        let nb = Nonce::new(format!("{:08}", b)).unwrap();
        prop_assert_ne!(hash_identity(&id, &na).unwrap(), hash_identity(&id, &nb).unwrap());
    }

    #[test]
    fn leading_zeros_do_not_change_identity(id in arb_identifier(), n in 0u32..1000) {
        let short = Nonce::new(n.to_string()).unwrap();
        let padded = Nonce::new(format!("{:0width$}", n, width = MAX_NONCE_DIGITS)).unwrap();
        prop_assert_eq!(hash_identity(&id, &short).unwrap(), hash_identity(&id, &padded).unwrap());
    }

    // ----------------------------------------
    // Message Properties
    // ----------------------------------------

    #[test]
    fn message_is_deterministic_and_padded(identity in any::<[u8; 32]>(), ts in arb_timestamp()) {
        let a = build_message(&identity, ts).unwrap();
        let b = build_message(&identity, ts).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(a.padding(), &[0u8; 32][..]);
    }

    #[test]
    fn message_rejects_wrong_identity_width(len in 0usize..96, ts in arb_timestamp()) {
        prop_assume!(len != 32);
        let identity = vec![0u8; len];
        let is_invalid_input = matches!(
            build_message(&identity, ts),
            Err(Error::InvalidInput { .. })
        );
        prop_assert!(is_invalid_input);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    // ----------------------------------------
    // Signing and Serialization Properties
    // ----------------------------------------

    #[test]
    fn signed_messages_verify(identity in any::<[u8; 32]>(), ts in arb_timestamp()) {
        let signer = test_signer();
        let message = build_message(&identity, ts).unwrap();
        let signed = signer.sign(message.as_bytes()).unwrap();
        prop_assert!(timeclock_core::verify(
            message.as_bytes(),
            &signed.public_key,
            &signed.signature
        )
        .is_ok());
    }

    #[test]
    fn argument_line_has_fixed_shape(
        id in arb_identifier(),
        nonce in arb_nonce(),
        ts in arb_timestamp(),
    ) {
        let signer = test_signer();
        let identity = hash_identity(&id, &nonce).unwrap();
        let message = build_message(identity.as_bytes(), ts).unwrap();
        let signed = signer.sign(message.as_bytes()).unwrap();
        let line = timeclock_core::serialize(
            &signed.public_key,
            &signed.signature,
            message.as_bytes(),
            ts,
            &id,
            &nonce,
        )
        .unwrap();

        let rendered = line.to_string();
        let tokens: Vec<&str> = rendered.split(' ').collect();
        prop_assert_eq!(tokens.len(), 520);
        let bits = &tokens[SIGNATURE_SCALARS..SIGNATURE_SCALARS + MESSAGE_BITS];
        prop_assert!(bits.iter().all(|t| *t == "0" || *t == "1"));
        for scalar in tokens[..SIGNATURE_SCALARS].iter().chain(&tokens[517..]) {
            prop_assert!(scalar.bytes().all(|b| b.is_ascii_digit()));
        }

        let parsed = ArgumentLine::parse(&rendered, ArgumentLayout::Attendance).unwrap();
        prop_assert!(parsed.verify().is_ok());
        prop_assert_eq!(&parsed.identifier, &Some(id));
        prop_assert_eq!(&parsed.nonce, &Some(nonce.value()));
    }
}
