//! Pure requirement evaluation (no IO).
//!
//! Input: a requirement graph built elsewhere and an opaque trace context.
//! Output: a verdict, optionally with the per-node outcome tree.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod model;
pub mod policy;
pub mod report;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use catalog::{EventCatalog, EventType};
pub use engine::{evaluate, evaluate_detailed};
pub use error::{EvaluationError, PredicateError};
pub use model::{CompositeRequirement, LeafRequirement, Predicate, PredicateResult, Requirement};
pub use tracereq_types::PriorityLevel;
