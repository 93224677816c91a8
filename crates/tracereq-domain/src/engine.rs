use crate::error::EvaluationError;
use crate::model::{LeafRequirement, Requirement};
use crate::policy;
use crate::report::{DomainReport, count_outcomes};
use tracereq_types::{OutcomeStatus, RequirementOutcome, Verdict};

/// Decide whether `requirement` holds for `ctx`.
///
/// Leaves run their predicate; composites fold their children with [`policy::combine`],
/// stopping as soon as the verdict is decided. Nothing is cached between calls.
pub fn evaluate<C: ?Sized>(
    requirement: &Requirement<C>,
    ctx: &C,
) -> Result<bool, EvaluationError> {
    let _span = tracing::debug_span!("evaluate", requirement = requirement.name()).entered();
    let verdict = eval_node(requirement, ctx)?;
    tracing::debug!(verdict, "requirement evaluated");
    Ok(verdict)
}

/// Like [`evaluate`], but also records what happened at every node.
///
/// Nodes left unvisited (short-circuit, or below an optional composite) are reported as
/// skipped, together with their whole subtree.
pub fn evaluate_detailed<C: ?Sized>(
    requirement: &Requirement<C>,
    ctx: &C,
) -> Result<DomainReport, EvaluationError> {
    let _span =
        tracing::debug_span!("evaluate_detailed", requirement = requirement.name()).entered();
    let outcome = outcome_of(requirement, ctx)?;
    let counts = count_outcomes(&outcome);
    let verdict = Verdict::from_satisfied(outcome.status == OutcomeStatus::Satisfied);
    tracing::debug!(?verdict, "requirement evaluated");
    Ok(DomainReport {
        verdict,
        outcome,
        counts,
    })
}

fn eval_node<C: ?Sized>(requirement: &Requirement<C>, ctx: &C) -> Result<bool, EvaluationError> {
    match requirement {
        Requirement::Leaf(leaf) => run_leaf(leaf, ctx),
        Requirement::Composite(composite) => {
            let verdicts = composite.children.iter().map(|child| eval_node(child.as_ref(), ctx));
            let verdict = policy::combine(composite.level, verdicts)
                .map_err(|err| err.within(&composite.name))?;
            tracing::trace!(
                requirement = %composite.name,
                level = %composite.level,
                verdict,
                "composite folded"
            );
            Ok(verdict)
        }
    }
}

fn run_leaf<C: ?Sized>(leaf: &LeafRequirement<C>, ctx: &C) -> Result<bool, EvaluationError> {
    let verdict = (leaf.predicate)(ctx).map_err(|source| EvaluationError::Predicate {
        path: leaf.name.clone(),
        source,
    })?;
    tracing::trace!(requirement = %leaf.name, verdict, "leaf tested");
    Ok(verdict)
}

fn outcome_of<C: ?Sized>(
    requirement: &Requirement<C>,
    ctx: &C,
) -> Result<RequirementOutcome, EvaluationError> {
    match requirement {
        Requirement::Leaf(leaf) => {
            let verdict = run_leaf(leaf, ctx)?;
            Ok(node(requirement, OutcomeStatus::from_satisfied(verdict), Vec::new()))
        }
        Requirement::Composite(composite) => {
            let mut visited = Vec::with_capacity(composite.children.len());
            let verdicts = composite.children.iter().map(|child| {
                let outcome = outcome_of(child.as_ref(), ctx)?;
                let verdict = outcome.status == OutcomeStatus::Satisfied;
                visited.push(outcome);
                Ok::<bool, EvaluationError>(verdict)
            });
            let verdict = policy::combine(composite.level, verdicts)
                .map_err(|err| err.within(&composite.name))?;

            let mut children = visited;
            for child in &composite.children[children.len()..] {
                children.push(skipped(child.as_ref()));
            }
            Ok(node(requirement, OutcomeStatus::from_satisfied(verdict), children))
        }
    }
}

fn skipped<C: ?Sized>(requirement: &Requirement<C>) -> RequirementOutcome {
    let children = requirement.children().iter().map(|c| skipped(c.as_ref())).collect();
    node(requirement, OutcomeStatus::Skipped, children)
}

fn node<C: ?Sized>(
    requirement: &Requirement<C>,
    status: OutcomeStatus,
    children: Vec<RequirementOutcome>,
) -> RequirementOutcome {
    RequirementOutcome {
        name: requirement.name().to_string(),
        kind: requirement.kind(),
        level: requirement.level(),
        status,
        information: requirement.information().iter().cloned().collect(),
        children,
    }
}
