//! Fuzz target for labels JSON parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use imgaug::labels::io_json::from_json_str;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = from_json_str(text);
    }
});
