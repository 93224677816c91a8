//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - The fold of each priority level against its boolean definition
//! - Agreement between plain and detailed evaluation on arbitrary trees
//! - Outcome accounting

use crate::engine::{evaluate, evaluate_detailed};
use crate::model::Requirement;
use crate::report::count_outcomes;
use crate::test_support::{f, t};
use proptest::prelude::*;
use tracereq_types::{OutcomeStatus, PriorityLevel, Verdict};

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_level() -> impl Strategy<Value = PriorityLevel> {
    prop_oneof![
        Just(PriorityLevel::Mandatory),
        Just(PriorityLevel::AtLeastOne),
        Just(PriorityLevel::AllOrNothing),
        Just(PriorityLevel::Optional),
    ]
}

fn arb_verdicts() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..8)
}

/// Requirement tree shape with constant leaves.
#[derive(Clone, Debug)]
enum Shape {
    Leaf(bool),
    Node(PriorityLevel, Vec<Shape>),
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    let leaf = any::<bool>().prop_map(Shape::Leaf);
    leaf.prop_recursive(4, 32, 5, |inner| {
        (arb_level(), prop::collection::vec(inner, 0..5))
            .prop_map(|(level, children)| Shape::Node(level, children))
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn constant_children(verdicts: &[bool]) -> Vec<Requirement<()>> {
    verdicts
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let name = format!("c{i}");
            if *v { t(&name) } else { f(&name) }
        })
        .collect()
}

fn fold(level: PriorityLevel, verdicts: &[bool]) -> bool {
    let req = Requirement::composite("root", level, constant_children(verdicts));
    evaluate(&req, &()).expect("constant children never fail")
}

fn build(shape: &Shape, path: &str) -> Requirement<()> {
    match shape {
        Shape::Leaf(true) => t(path),
        Shape::Leaf(false) => f(path),
        Shape::Node(level, children) => Requirement::composite(
            path,
            *level,
            children
                .iter()
                .enumerate()
                .map(|(i, child)| build(child, &format!("{path}.{i}")))
                .collect::<Vec<_>>(),
        ),
    }
}

/// Evaluates every child, no short-circuit: the boolean definition of each level.
fn reference(shape: &Shape) -> bool {
    match shape {
        Shape::Leaf(v) => *v,
        Shape::Node(level, children) => {
            let verdicts: Vec<bool> = children.iter().map(reference).collect();
            match level {
                PriorityLevel::Mandatory => verdicts.iter().all(|v| *v),
                PriorityLevel::AtLeastOne => verdicts.iter().any(|v| *v),
                PriorityLevel::AllOrNothing => verdicts.windows(2).all(|w| w[0] == w[1]),
                PriorityLevel::Optional => true,
            }
        }
    }
}

fn node_count(shape: &Shape) -> u32 {
    match shape {
        Shape::Leaf(_) => 1,
        Shape::Node(_, children) => 1 + children.iter().map(node_count).sum::<u32>(),
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn mandatory_is_logical_and(verdicts in arb_verdicts()) {
        prop_assert_eq!(fold(PriorityLevel::Mandatory, &verdicts), verdicts.iter().all(|v| *v));
    }

    #[test]
    fn at_least_one_is_logical_or(verdicts in arb_verdicts()) {
        prop_assert_eq!(fold(PriorityLevel::AtLeastOne, &verdicts), verdicts.iter().any(|v| *v));
    }

    #[test]
    fn all_or_nothing_is_uniformity(verdicts in arb_verdicts()) {
        let uniform = verdicts.iter().all(|v| *v) || verdicts.iter().all(|v| !*v);
        prop_assert_eq!(fold(PriorityLevel::AllOrNothing, &verdicts), uniform);
    }

    #[test]
    fn optional_is_always_satisfied(verdicts in arb_verdicts()) {
        prop_assert!(fold(PriorityLevel::Optional, &verdicts));
    }

    #[test]
    fn duplicated_children_do_not_change_the_verdict(
        level in arb_level(),
        verdicts in arb_verdicts(),
    ) {
        let mut doubled = verdicts.clone();
        doubled.extend(verdicts.iter().copied());
        prop_assert_eq!(fold(level, &doubled), fold(level, &verdicts));
    }

    #[test]
    fn short_circuit_matches_full_evaluation(shape in arb_shape()) {
        let req = build(&shape, "root");
        prop_assert_eq!(evaluate(&req, &()).unwrap(), reference(&shape));
    }

    #[test]
    fn detailed_agrees_with_plain_evaluation(shape in arb_shape()) {
        let req = build(&shape, "root");
        let verdict = evaluate(&req, &()).unwrap();
        let report = evaluate_detailed(&req, &()).unwrap();

        prop_assert_eq!(report.verdict, Verdict::from_satisfied(verdict));
        prop_assert_ne!(report.outcome.status, OutcomeStatus::Skipped);
        prop_assert_eq!(report.counts, count_outcomes(&report.outcome));

        let total = report.counts.satisfied + report.counts.unsatisfied + report.counts.skipped;
        prop_assert_eq!(total, node_count(&shape));
    }
}
