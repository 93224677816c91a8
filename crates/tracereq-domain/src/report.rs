use tracereq_types::{OutcomeCounts, OutcomeStatus, RequirementOutcome, Verdict};

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub outcome: RequirementOutcome,
    pub counts: OutcomeCounts,
}

/// Count every node of an outcome tree by status.
pub fn count_outcomes(outcome: &RequirementOutcome) -> OutcomeCounts {
    let mut counts = OutcomeCounts::default();
    let mut stack = vec![outcome];
    while let Some(node) = stack.pop() {
        match node.status {
            OutcomeStatus::Satisfied => counts.satisfied += 1,
            OutcomeStatus::Unsatisfied => counts.unsatisfied += 1,
            OutcomeStatus::Skipped => counts.skipped += 1,
        }
        stack.extend(node.children.iter());
    }
    counts
}
