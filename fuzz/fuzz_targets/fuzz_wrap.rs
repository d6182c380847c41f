#![no_main]

use invoicegen::pdf::{Font, FontSet, wrap};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let fonts = FontSet::load().unwrap();
        let face = fonts.get(Font::Regular);
        let lines = wrap(s, face, 10.0, 200.0);
        assert!(!lines.is_empty());
        for line in &lines {
            assert_eq!(face.encode(line).len(), line.chars().count() * 2);
        }
    }
});
