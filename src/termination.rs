//! Stopping criteria, checked once per generation after selection.

use std::time::Duration;

use typed_builder::TypedBuilder;

/// Progress of a run, handed to a [`Terminator`] after every generation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Status {
  /// Number of objective function evaluations performed so far, including
  /// the initial population.
  pub evaluations: usize,
  /// Number of completed generations.
  pub iterations: usize,
  /// Time elapsed since initialization.
  pub elapsed: Duration,
}

/// An operator that decides whether the run should be stopped.
///
/// # Examples
/// ```
/// # use moea::termination::{Status, Terminator};
/// let mut t = |status: &Status| status.evaluations >= 10_000;
/// assert!(!t.terminate(&Status::default()));
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Terminator {
  /// If returns `true`, the run is stopped.
  fn terminate(&mut self, status: &Status) -> bool;

  /// Returns `true` if this terminator is guaranteed to fire eventually.
  /// The optimizer refuses to run with a terminator that is not.
  fn is_bounded(&self) -> bool {
    true
  }
}

impl<F> Terminator for F
where
  F: FnMut(&Status) -> bool,
{
  fn terminate(&mut self, status: &Status) -> bool {
    self(status)
  }
}

/// A `Terminator` that stops the run as soon as any of its configured limits
/// is reached.
///
/// # Examples
/// ```
/// # use std::time::Duration;
/// # use moea::termination::Budget;
/// let budget = Budget::builder()
///   .max_evaluations(25_000)
///   .max_time(Duration::from_secs(10))
///   .build();
/// ```
#[derive(TypedBuilder, Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Budget {
  /// Maximum number of objective function evaluations.
  #[builder(default, setter(strip_option))]
  pub max_evaluations: Option<usize>,
  /// Maximum number of generations.
  #[builder(default, setter(strip_option))]
  pub max_iterations: Option<usize>,
  /// Maximum wall-clock time.
  #[builder(default, setter(strip_option))]
  pub max_time: Option<Duration>,
}

impl Terminator for Budget {
  fn terminate(&mut self, status: &Status) -> bool {
    self.max_evaluations.is_some_and(|n| status.evaluations >= n)
      || self.max_iterations.is_some_and(|n| status.iterations >= n)
      || self.max_time.is_some_and(|t| status.elapsed >= t)
  }

  fn is_bounded(&self) -> bool {
    self.max_evaluations.is_some()
      || self.max_iterations.is_some()
      || self.max_time.is_some()
  }
}

/// A `Terminator` that stops the run as soon as a certain number of
/// generations have passed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct GenerationTerminator(pub usize);

impl Terminator for GenerationTerminator {
  fn terminate(&mut self, _: &Status) -> bool {
    match self.0 {
      0 => true,
      _ => {
        self.0 -= 1;
        false
      }
    }
  }
}
