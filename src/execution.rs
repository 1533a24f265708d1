//! Execution strategies of objective evaluation.

use std::ops::Deref;

/// Sequential execution strategy marker, i.e. no parallelization involved.
pub enum SequentialExecution {}

/// Parallel execution strategy marker, parallelizes evaluation of **each**
/// candidate.
pub enum ParallelEachExecution {}

/// Parallel execution strategy marker, parallelizes evaluation of a
/// **batch** of candidates. The crate tries to split the work equally for
/// each available thread.
pub enum ParallelBatchExecution {}

/// A wrapper around an evaluator that marks it to be executed in parallel
/// for **each** candidate.
#[derive(Clone, Copy, Debug)]
pub struct ParEach<E>(E);

impl<E> Deref for ParEach<E> {
  type Target = E;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

/// A wrapper around an evaluator that marks it to be executed in parallel
/// for each **batch** of candidates.
#[derive(Clone, Copy, Debug)]
pub struct ParBatch<E>(E);

impl<E> Deref for ParBatch<E> {
  type Target = E;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

/// Converts an evaluator into its parallelized form.
pub trait IntoPar<const N: usize>: Sized {
  /// Creates a wrapper around given evaluator that marks it to
  /// be executed in parallel for **each** candidate.
  ///
  /// **Parallelization is implemented with [rayon]. As a result, for cheap
  /// objective functions, parallelization may only decrease performance
  /// because of additional overhead introduced. Benchmark if in doubt.**
  fn par_each(self) -> ParEach<Self> {
    ParEach(self)
  }

  /// Creates a wrapper around given evaluator that marks it to
  /// be executed in parallel for each **batch** of candidates.
  /// The crate calculates the size of the batch in such a way as to evenly
  /// distribute the calculations across all available threads.
  ///
  /// **Parallelization is implemented with [rayon]. As a result, for cheap
  /// objective functions, parallelization may only decrease performance
  /// because of additional overhead introduced. Benchmark if in doubt.**
  fn par_batch(self) -> ParBatch<Self> {
    ParBatch(self)
  }
}
