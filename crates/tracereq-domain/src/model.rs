use crate::engine;
use crate::error::{EvaluationError, PredicateError};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracereq_types::{NodeKind, PriorityLevel};

pub type PredicateResult = Result<bool, PredicateError>;

/// A leaf test over the trace context `C`. Must be pure: no side effects, same answer for the
/// same context.
pub type Predicate<C> = Arc<dyn Fn(&C) -> PredicateResult + Send + Sync>;

/// A precondition an analysis places on a trace.
///
/// Requirements are immutable once built and carry no evaluation state, so one graph can be
/// evaluated any number of times, against any number of contexts, from any number of threads.
pub enum Requirement<C: ?Sized> {
    Leaf(LeafRequirement<C>),
    Composite(CompositeRequirement<C>),
}

pub struct LeafRequirement<C: ?Sized> {
    pub(crate) name: String,
    pub(crate) information: BTreeSet<String>,
    pub(crate) predicate: Predicate<C>,
}

pub struct CompositeRequirement<C: ?Sized> {
    pub(crate) name: String,
    pub(crate) information: BTreeSet<String>,
    pub(crate) level: PriorityLevel,
    pub(crate) children: Vec<Arc<Requirement<C>>>,
}

impl<C: ?Sized> Requirement<C> {
    /// Leaf requirement backed by an infallible predicate.
    pub fn leaf<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self::try_leaf(name, move |ctx: &C| Ok(predicate(ctx)))
    }

    /// Leaf requirement whose predicate may fail. A failure aborts evaluation of the whole
    /// graph and surfaces as [`EvaluationError`].
    pub fn try_leaf<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&C) -> PredicateResult + Send + Sync + 'static,
    {
        Requirement::Leaf(LeafRequirement {
            name: name.into(),
            information: BTreeSet::new(),
            predicate: Arc::new(predicate),
        })
    }

    /// Composite requirement folding `children` under `level`.
    ///
    /// Children are evaluated in the order given. Accepts owned requirements or shared
    /// `Arc`s, so the same child can sit under several composites.
    pub fn composite<I>(name: impl Into<String>, level: PriorityLevel, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Arc<Requirement<C>>>,
    {
        Requirement::Composite(CompositeRequirement {
            name: name.into(),
            information: BTreeSet::new(),
            level,
            children: children.into_iter().map(Into::into).collect(),
        })
    }

    /// Attach information tags. Builder-style: only usable before the requirement is shared.
    pub fn with_information<I, S>(mut self, information: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = match &mut self {
            Requirement::Leaf(leaf) => &mut leaf.information,
            Requirement::Composite(composite) => &mut composite.information,
        };
        tags.extend(information.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        match self {
            Requirement::Leaf(leaf) => &leaf.name,
            Requirement::Composite(composite) => &composite.name,
        }
    }

    pub fn information(&self) -> &BTreeSet<String> {
        match self {
            Requirement::Leaf(leaf) => &leaf.information,
            Requirement::Composite(composite) => &composite.information,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Requirement::Leaf(_) => NodeKind::Leaf,
            Requirement::Composite(_) => NodeKind::Composite,
        }
    }

    /// Combination policy; `None` for leaves.
    pub fn level(&self) -> Option<PriorityLevel> {
        match self {
            Requirement::Leaf(_) => None,
            Requirement::Composite(composite) => Some(composite.level),
        }
    }

    /// Direct children; empty for leaves.
    pub fn children(&self) -> &[Arc<Requirement<C>>] {
        match self {
            Requirement::Leaf(_) => &[],
            Requirement::Composite(composite) => &composite.children,
        }
    }

    /// Shorthand for [`crate::evaluate`].
    pub fn test(&self, ctx: &C) -> Result<bool, EvaluationError> {
        engine::evaluate(self, ctx)
    }
}

impl<C: ?Sized> Clone for Requirement<C> {
    fn clone(&self) -> Self {
        match self {
            Requirement::Leaf(leaf) => Requirement::Leaf(LeafRequirement {
                name: leaf.name.clone(),
                information: leaf.information.clone(),
                predicate: Arc::clone(&leaf.predicate),
            }),
            Requirement::Composite(composite) => Requirement::Composite(CompositeRequirement {
                name: composite.name.clone(),
                information: composite.information.clone(),
                level: composite.level,
                children: composite.children.clone(),
            }),
        }
    }
}

impl<C: ?Sized> fmt::Debug for Requirement<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Leaf(leaf) => f
                .debug_struct("Leaf")
                .field("name", &leaf.name)
                .field("information", &leaf.information)
                .finish_non_exhaustive(),
            Requirement::Composite(composite) => f
                .debug_struct("Composite")
                .field("name", &composite.name)
                .field("information", &composite.information)
                .field("level", &composite.level)
                .field("children", &composite.children)
                .finish(),
        }
    }
}
