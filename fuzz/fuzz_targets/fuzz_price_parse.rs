#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic; accepted prices must format and parse back.
        if let Ok(price) = invoicegen::core::parse_price(s) {
            let neutral = invoicegen::core::Locale::neutral();
            let rounded = price.round_dp(2);
            let again = invoicegen::core::parse_price(&neutral.format_amount(price)).unwrap();
            assert_eq!(again, rounded);
        }
    }
});
