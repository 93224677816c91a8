//! Fuzz target for trace descriptor parsing.
//!
//! Goal: neither descriptor format should **ever panic**, whatever the input.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_trace_descriptor
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(descriptor) = tracereq_trace::parse_trace_toml(text) {
            let _ = descriptor.event_types();
        }
        if let Ok(descriptor) = tracereq_trace::parse_trace_json(text) {
            let _ = descriptor.event_types();
        }
    }
});
