//! Objective evaluation operators and utilities.

use executor::EvaluationExecutor;
use rayon::prelude::*;

use crate::{
  error::{BoxError, Error, Result},
  execution::*,
  solution::{Evaluation, Solution},
};

/// An objective function. Maps a decision vector to objective and constraint
/// values.
///
/// The optimizer calls it exactly once per candidate and treats it as a pure
/// function of the position. A failure is propagated to the caller of the
/// optimizer as [`Error::Evaluation`] and never retried.
///
/// Can be applied in parallel to each candidate or to batches of candidates
/// by converting it into a parallelized evaluator with `par_each()` or
/// `par_batch()` methods.
///
/// # Examples
/// ```
/// # use moea::{execution::IntoPar, solution::Evaluation};
/// # use std::convert::Infallible;
/// // Schaffer's problem No.1
/// let e = |x: &[f64]| {
///   Ok::<_, Infallible>(Evaluation::unconstrained([
///     x[0].powi(2),
///     (x[0] - 2.0).powi(2),
///   ]))
/// };
/// let e = e.par_each();
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Evaluator<const N: usize> {
  /// Evaluates given position.
  fn evaluate(
    &self,
    position: &[f64],
  ) -> std::result::Result<Evaluation<N>, BoxError>;
}

impl<const N: usize, F, E> Evaluator<N> for F
where
  F: Fn(&[f64]) -> std::result::Result<Evaluation<N>, E>,
  E: Into<BoxError>,
{
  fn evaluate(
    &self,
    position: &[f64],
  ) -> std::result::Result<Evaluation<N>, BoxError> {
    self(position).map_err(Into::into)
  }
}

impl<const N: usize, E: Evaluator<N>> IntoPar<N> for E {}

/// This private module prevents exposing the `Executor` to a user.
pub(crate) mod executor {
  use crate::{error::Result, solution::Solution};

  /// An internal evaluation executor.
  pub trait EvaluationExecutor<const N: usize, ExecutionStrategy> {
    /// Evaluates each position, optionally parallelizing evaluator's
    /// application. Solutions are returned in the order of `positions`.
    fn execute_evaluations(
      &self,
      positions: Vec<Vec<f64>>,
      tolerance: f64,
    ) -> Result<Vec<Solution<N>>>;
  }
}

fn evaluate<const N: usize, E: Evaluator<N> + ?Sized>(
  evaluator: &E,
  position: Vec<f64>,
  tolerance: f64,
) -> Result<Solution<N>> {
  match evaluator.evaluate(&position) {
    Ok(evaluation) => Ok(Solution::new(position, evaluation, tolerance)),
    Err(source) => Err(Error::Evaluation { position, source }),
  }
}

impl<const N: usize, E> EvaluationExecutor<N, SequentialExecution> for E
where
  E: Evaluator<N>,
{
  fn execute_evaluations(
    &self,
    positions: Vec<Vec<f64>>,
    tolerance: f64,
  ) -> Result<Vec<Solution<N>>> {
    positions
      .into_iter()
      .map(|p| evaluate(self, p, tolerance))
      .collect()
  }
}

impl<const N: usize, E> EvaluationExecutor<N, ParallelEachExecution>
  for ParEach<E>
where
  E: Evaluator<N> + Sync,
{
  fn execute_evaluations(
    &self,
    positions: Vec<Vec<f64>>,
    tolerance: f64,
  ) -> Result<Vec<Solution<N>>> {
    let evaluator: &E = self;
    positions
      .into_par_iter()
      .map(|p| evaluate(evaluator, p, tolerance))
      .collect()
  }
}

impl<const N: usize, E> EvaluationExecutor<N, ParallelBatchExecution>
  for ParBatch<E>
where
  E: Evaluator<N> + Sync,
{
  fn execute_evaluations(
    &self,
    positions: Vec<Vec<f64>>,
    tolerance: f64,
  ) -> Result<Vec<Solution<N>>> {
    let evaluator: &E = self;
    let chunk_size = (positions.len() / rayon::current_num_threads()).max(1);
    positions
      .par_chunks(chunk_size)
      .flat_map_iter(|chunk| {
        chunk
          .iter()
          .map(move |p| evaluate(evaluator, p.clone(), tolerance))
      })
      .collect()
  }
}
