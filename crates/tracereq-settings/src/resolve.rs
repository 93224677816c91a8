use crate::model::{RequirementConfig, RequirementsConfigV1};
use anyhow::Context;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracereq_domain::catalog::{event_fields_requirement, events_requirement};
use tracereq_domain::{EventCatalog, PriorityLevel, Requirement};
use tracereq_types::ids;

/// Deepest requirement tree a definition may describe, counting the root and its leaves.
///
/// Each level adds two nesting levels to the emitted report JSON, which has to stay readable
/// by `serde_json` (recursion limit 128) when `tracereq md` loads it back.
pub const MAX_NESTING_DEPTH: usize = 32;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub root: Option<String>,
}

pub struct ResolvedRequirements<C: ?Sized> {
    /// Name of the selected root requirement.
    pub root: String,
    pub requirement: Arc<Requirement<C>>,
    /// Number of requirements in the definition, reachable from `root` or not.
    pub defined: usize,
}

impl<C: ?Sized> Clone for ResolvedRequirements<C> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            requirement: Arc::clone(&self.requirement),
            defined: self.defined,
        }
    }
}

impl<C: ?Sized> fmt::Debug for ResolvedRequirements<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedRequirements")
            .field("root", &self.root)
            .field("requirement", &self.requirement)
            .field("defined", &self.defined)
            .finish()
    }
}

pub fn resolve_requirements<C>(
    cfg: RequirementsConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedRequirements<C>>
where
    C: EventCatalog + ?Sized,
{
    if let Some(schema) = cfg.schema.as_deref()
        && schema != ids::SCHEMA_REQUIREMENTS_V1
    {
        anyhow::bail!(
            "unsupported schema: {schema} (expected {})",
            ids::SCHEMA_REQUIREMENTS_V1
        );
    }

    if cfg.requirements.is_empty() {
        anyhow::bail!("no requirements defined");
    }

    let root = overrides
        .root
        .clone()
        .or(cfg.root.clone())
        .unwrap_or_else(|| ids::DEFAULT_ROOT.to_string());

    if !cfg.requirements.contains_key(&root) {
        let defined: Vec<&str> = cfg.requirements.keys().map(String::as_str).collect();
        anyhow::bail!(
            "unknown root requirement: {root} (defined: {})",
            defined.join(", ")
        );
    }

    // Build every definition, not only the root's subtree, so that bad levels, dangling
    // references and cycles are reported even where the current root does not reach.
    let mut builder = GraphBuilder::new(&cfg.requirements);
    for name in cfg.requirements.keys() {
        builder.build(name)?;
    }

    let (requirement, _) = builder
        .built
        .remove(root.as_str())
        .context("root requirement was not built")?;

    tracing::debug!(
        root = %root,
        defined = cfg.requirements.len(),
        "requirements resolved"
    );

    Ok(ResolvedRequirements {
        root,
        requirement,
        defined: cfg.requirements.len(),
    })
}

struct GraphBuilder<'a, C: ?Sized> {
    defs: &'a BTreeMap<String, RequirementConfig>,
    /// Built requirements with the depth of the tree below them (a leaf has depth 1).
    built: BTreeMap<&'a str, (Arc<Requirement<C>>, usize)>,
    /// Names currently being built, outermost first.
    in_progress: Vec<&'a str>,
}

impl<'a, C> GraphBuilder<'a, C>
where
    C: EventCatalog + ?Sized,
{
    fn new(defs: &'a BTreeMap<String, RequirementConfig>) -> Self {
        Self {
            defs,
            built: BTreeMap::new(),
            in_progress: Vec::new(),
        }
    }

    fn build(&mut self, name: &'a str) -> anyhow::Result<(Arc<Requirement<C>>, usize)> {
        if let Some((done, depth)) = self.built.get(name) {
            return Ok((Arc::clone(done), *depth));
        }

        if let Some(start) = self.in_progress.iter().position(|n| *n == name) {
            let mut cycle = self.in_progress[start..].to_vec();
            cycle.push(name);
            anyhow::bail!("requirement cycle: {}", cycle.join(" -> "));
        }

        if let Some(outermost) = self.in_progress.first()
            && self.in_progress.len() >= MAX_NESTING_DEPTH
        {
            anyhow::bail!("requirement {outermost} nests deeper than {MAX_NESTING_DEPTH} levels");
        }

        let defs = self.defs;
        let def = defs
            .get(name)
            .with_context(|| format!("unknown requirement: {name}"))?;

        let level = def
            .level()
            .with_context(|| format!("requirement {name} has no level"))
            .and_then(parse_level)
            .with_context(|| format!("invalid level for requirement {name}"))?;

        self.in_progress.push(name);
        let (requirement, depth) = match def {
            RequirementConfig::Events { values, .. } => (
                events_requirement(name, level, values.iter().cloned()),
                1,
            ),
            RequirementConfig::EventFields { event, values, .. } => (
                event_fields_requirement(name, event.clone(), level, values.iter().cloned()),
                1,
            ),
            RequirementConfig::Composite { children, .. } => {
                let mut resolved = Vec::with_capacity(children.len());
                let mut deepest = 0;
                for child in children {
                    if !defs.contains_key(child) {
                        anyhow::bail!("requirement {name} references unknown child: {child}");
                    }
                    let (built, depth) = self.build(child.as_str())?;
                    deepest = deepest.max(depth);
                    resolved.push(built);
                }
                (Requirement::composite(name, level, resolved), deepest + 1)
            }
        };
        self.in_progress.pop();

        if depth > MAX_NESTING_DEPTH {
            anyhow::bail!("requirement {name} nests deeper than {MAX_NESTING_DEPTH} levels");
        }

        let requirement = Arc::new(requirement.with_information(def.information().iter().cloned()));
        self.built.insert(name, (Arc::clone(&requirement), depth));
        tracing::trace!(requirement = name, %level, depth, "requirement built");
        Ok((requirement, depth))
    }
}

/// Parse a priority level. Case-insensitive; `-` and `_` are interchangeable.
pub fn parse_level(v: &str) -> anyhow::Result<PriorityLevel> {
    let normalized = v.trim().to_ascii_lowercase().replace('-', "_");
    PriorityLevel::ALL
        .into_iter()
        .find(|level| level.as_str() == normalized)
        .with_context(|| {
            format!("unknown priority level: {v} (expected mandatory|at_least_one|all_or_nothing|optional)")
        })
}
