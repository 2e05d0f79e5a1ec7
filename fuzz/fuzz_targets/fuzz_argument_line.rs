#![no_main]

use libfuzzer_sys::fuzz_target;
use timeclock_core::{ArgumentLayout, ArgumentLine};

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    for layout in [ArgumentLayout::Attendance, ArgumentLayout::Terminal] {
        // Parsing must never panic; accepted lines carry on-curve points
        if let Ok(args) = ArgumentLine::parse(line, layout) {
            assert!(args.signature.r.is_on_curve());
            assert!(args.public_key.point().is_on_curve());
            assert_eq!(args.identifier.is_some(), layout == ArgumentLayout::Attendance);
            let _ = args.verify();
        }
    }
});
