#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;
use timeclock_core::{decode_uint, encode_uint, BitString, WORD_SIZE};

fuzz_target!(|data: &[u8]| {
    // Words decode and re-encode to the same bytes
    if data.len() >= WORD_SIZE {
        let word = &data[..WORD_SIZE];
        let value = decode_uint(word).unwrap();
        assert_eq!(&encode_uint(&value).unwrap()[..], word);
    }

    // Arbitrary-width values encode only when they fit a word
    let value = BigUint::from_bytes_be(data);
    match encode_uint(&value) {
        Ok(word) => assert_eq!(decode_uint(&word).unwrap(), value),
        Err(_) => assert!(value.bits() > (WORD_SIZE * 8) as u64),
    }

    // Bit strings parsed from text re-render identically
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(bits) = BitString::parse(text) {
            assert_eq!(bits.to_bit_chars(), text);
            assert_eq!(bits.to_bytes().len(), (bits.len() + 7) / 8);
        }
    }
});
