#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;
use timeclock_core::{build_message, hash_identity, Identifier, Nonce, Timestamp, MESSAGE_SIZE};

#[derive(Debug, Arbitrary)]
struct CheckInInput {
    identifier: Vec<u8>,
    nonce: String,
    timestamp: u64,
}

fuzz_target!(|input: CheckInInput| {
    let identifier = Identifier::new(BigUint::from_bytes_be(&input.identifier));

    let Ok(nonce) = Nonce::new(input.nonce.clone()) else {
        return;
    };
    assert_eq!(nonce.as_str(), input.nonce);

    match hash_identity(&identifier, &nonce) {
        Ok(identity) => {
            let message = build_message(identity.as_bytes(), Timestamp::new(input.timestamp))
                .unwrap();
            assert_eq!(message.as_bytes().len(), MESSAGE_SIZE);
            assert!(message.padding().iter().all(|b| *b == 0));
        }
        // Only identifiers wider than a word are rejected
        Err(_) => assert!(identifier.value().bits() > 256),
    }
});
