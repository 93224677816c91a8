use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A leaf predicate could not decide (for example, trace data it needs is unreadable).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PredicateError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl PredicateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Error)]
pub enum EvaluationError {
    /// `path` is the `/`-separated chain of requirement names from the evaluated root.
    #[error("requirement `{path}` could not be evaluated")]
    Predicate {
        path: String,
        #[source]
        source: PredicateError,
    },
}

impl EvaluationError {
    pub fn path(&self) -> &str {
        match self {
            EvaluationError::Predicate { path, .. } => path,
        }
    }

    /// Prefix the failing path with the name of an enclosing composite.
    pub(crate) fn within(self, parent: &str) -> Self {
        match self {
            EvaluationError::Predicate { path, source } => EvaluationError::Predicate {
                path: format!("{parent}/{path}"),
                source,
            },
        }
    }
}
