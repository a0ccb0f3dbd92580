//! Fuzz target for pipeline validation and tree rendering.
//!
//! Goes one step past parsing: validates the label policy and renders the
//! transform tree of every document that parses.

#![no_main]

use libfuzzer_sys::fuzz_target;
use imgaug::pipeline::fuzz_check_pipeline;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = fuzz_check_pipeline(data);
});
