//! Fuzz target for YAML pipeline parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the pipeline parser,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use imgaug::pipeline::from_yaml_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_yaml_slice(data);
});
