//! Feasibility-first pairwise comparison of solutions.

use std::cmp::Ordering;

use crate::{score::ParetoDominance, solution::Solution};

/// Outcome of comparing two solutions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Comparison {
  /// The first solution is better.
  FirstBetter,
  /// The second solution is better.
  SecondBetter,
  /// Neither solution is better than the other.
  Incomparable,
}

impl Comparison {
  /// Returns the outcome of the same comparison with swapped arguments.
  pub fn reverse(self) -> Self {
    match self {
      Self::FirstBetter => Self::SecondBetter,
      Self::SecondBetter => Self::FirstBetter,
      Self::Incomparable => Self::Incomparable,
    }
  }
}

/// Compares two solutions.
///
/// 1. A feasible solution beats an infeasible one.
/// 2. Of two infeasible solutions, the one with the smaller sum of constraint
///    violation wins; equal sums are incomparable.
/// 3. Of two feasible solutions, the one that Pareto dominates the other wins.
pub fn compare<const N: usize>(a: &Solution<N>, b: &Solution<N>) -> Comparison {
  match (a.is_feasible(), b.is_feasible()) {
    (true, false) => Comparison::FirstBetter,
    (false, true) => Comparison::SecondBetter,
    (false, false) => match a.violation().partial_cmp(&b.violation()) {
      Some(Ordering::Less) => Comparison::FirstBetter,
      Some(Ordering::Greater) => Comparison::SecondBetter,
      _ => Comparison::Incomparable,
    },
    (true, true) => match a.objectives().dominance(b.objectives()) {
      Ordering::Less => Comparison::FirstBetter,
      Ordering::Greater => Comparison::SecondBetter,
      Ordering::Equal => Comparison::Incomparable,
    },
  }
}

/// Returns `true` if `a` is strictly better than `b`.
pub fn is_better<const N: usize>(a: &Solution<N>, b: &Solution<N>) -> bool {
  compare(a, b) == Comparison::FirstBetter
}
