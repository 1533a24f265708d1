//! Error types.

/// A boxed error returned by a failing objective evaluator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors reported by the optimizer and its selection strategies.
///
/// Numerical degeneracies (NaN distances, flat fronts with zero hypervolume
/// contributions) are recovered where they occur and never show up here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// A precondition of the run or of a selection strategy does not hold.
  /// Always fatal.
  #[error("ConfigurationError: {0}")]
  Configuration(String),
  /// The objective evaluator failed for a candidate. The optimizer does not
  /// retry it; the caller decides whether to abort or to penalize.
  #[error("EvaluationError: position={position:?}: {source}")]
  Evaluation {
    /// Decision vector the evaluator was called with.
    position: Vec<f64>,
    /// Error returned by the evaluator.
    #[source]
    source: BoxError,
  },
}

impl Error {
  pub(crate) fn configuration(message: impl Into<String>) -> Self {
    Self::Configuration(message.into())
  }
}

/// An alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;
