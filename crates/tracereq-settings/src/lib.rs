//! Requirement definition parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves definitions provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{RequirementConfig, RequirementsConfigV1};
pub use resolve::{MAX_NESTING_DEPTH, Overrides, ResolvedRequirements, parse_level};

use tracereq_domain::EventCatalog;

/// Parse `tracereq.toml` (or equivalent) into a typed model.
pub fn parse_requirements_toml(input: &str) -> anyhow::Result<RequirementsConfigV1> {
    let cfg: RequirementsConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve a parsed definition into the requirement graph rooted at the selected requirement.
pub fn resolve_requirements<C>(
    cfg: RequirementsConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedRequirements<C>>
where
    C: EventCatalog + ?Sized,
{
    resolve::resolve_requirements(cfg, overrides)
}
