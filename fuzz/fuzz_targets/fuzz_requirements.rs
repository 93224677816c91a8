//! Fuzz target for requirement definition parsing and resolution.
//!
//! Goal: parsing, resolving and evaluating a definition should **never panic** (cycles
//! included). Errors are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_requirements
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use tracereq_settings::{Overrides, ResolvedRequirements};
use tracereq_trace::Trace;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(cfg) = tracereq_settings::parse_requirements_toml(text) else {
        return;
    };
    let resolved: anyhow::Result<ResolvedRequirements<Trace>> =
        tracereq_settings::resolve_requirements(cfg, Overrides::default());
    if let Ok(resolved) = resolved {
        for trace in [Trace::new("undeclared", None), Trace::new("empty", Some(Vec::new()))] {
            let _ = tracereq_domain::evaluate_detailed(resolved.requirement.as_ref(), &trace);
        }
    }
});
