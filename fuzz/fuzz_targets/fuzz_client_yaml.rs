#![no_main]

use invoicegen::core::{ClientProfile, InvoiceTotals};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic: errors are fine, panics are bugs.
        if let Ok(client) = invoicegen::config::from_yaml_str::<ClientProfile>(s) {
            let _ = InvoiceTotals::calculate(&client.items, client.vat_percentage);
        }
    }
});
