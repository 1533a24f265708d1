//! Evaluated candidate solutions.

use crate::score::Scores;

/// Output of a single objective evaluation: objective values plus inequality
/// (`g(x) <= 0`) and equality (`h(x) == 0`) constraint values.
#[derive(Clone, PartialEq, Debug)]
pub struct Evaluation<const N: usize> {
  /// Objective values, all minimized.
  pub objectives: Scores<N>,
  /// Inequality constraint values, satisfied when `<= 0`.
  pub inequality: Vec<f64>,
  /// Equality constraint values, satisfied when `== 0` within tolerance.
  pub equality: Vec<f64>,
}

impl<const N: usize> Evaluation<N> {
  /// Creates an evaluation with constraint values.
  pub fn new(
    objectives: Scores<N>,
    inequality: Vec<f64>,
    equality: Vec<f64>,
  ) -> Self {
    Self {
      objectives,
      inequality,
      equality,
    }
  }

  /// Creates an evaluation of an unconstrained problem.
  pub fn unconstrained(objectives: Scores<N>) -> Self {
    Self::new(objectives, vec![], vec![])
  }
}

/// An evaluated candidate solution.
///
/// Constructed once from a position and its [`Evaluation`] and never changed
/// afterwards; selection strategies only move solutions between populations.
#[derive(Clone, PartialEq, Debug)]
pub struct Solution<const N: usize> {
  position: Vec<f64>,
  objectives: Scores<N>,
  inequality: Vec<f64>,
  equality: Vec<f64>,
  violation: f64,
}

impl<const N: usize> Solution<N> {
  /// Creates a solution, computing its sum of constraint violation.
  /// Equality constraints within `tolerance` of zero count as satisfied. A
  /// NaN constraint value is never satisfied and violates by infinity.
  pub fn new(
    position: Vec<f64>,
    evaluation: Evaluation<N>,
    tolerance: f64,
  ) -> Self {
    let Evaluation {
      objectives,
      inequality,
      equality,
    } = evaluation;
    let violation = inequality
      .iter()
      .map(|&g| excess(g))
      .chain(equality.iter().map(|h| excess(h.abs() - tolerance)))
      .sum::<f64>();
    Self {
      position,
      objectives,
      inequality,
      equality,
      violation,
    }
  }

  /// Decision variables.
  pub fn position(&self) -> &[f64] {
    &self.position
  }

  /// Objective values.
  pub fn objectives(&self) -> &Scores<N> {
    &self.objectives
  }

  /// Inequality constraint values.
  pub fn inequality(&self) -> &[f64] {
    &self.inequality
  }

  /// Equality constraint values.
  pub fn equality(&self) -> &[f64] {
    &self.equality
  }

  /// Sum of constraint violation. Zero for feasible solutions.
  pub fn violation(&self) -> f64 {
    self.violation
  }

  /// Returns `true` if all constraints are satisfied.
  pub fn is_feasible(&self) -> bool {
    self.violation == 0.0
  }
}

/// Amount by which `value` exceeds zero.
fn excess(value: f64) -> f64 {
  if value.is_nan() {
    f64::INFINITY
  } else {
    value.max(0.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_unconstrained_solution_is_feasible() {
    let s = Solution::new(vec![0.5], Evaluation::unconstrained([1.0, 2.0]), 0.0);
    assert!(s.is_feasible());
    assert_eq!(s.violation(), 0.0);
    assert_eq!(s.objectives(), &[1.0, 2.0]);
    assert_eq!(s.position(), &[0.5]);
  }

  #[test]
  fn test_violation_sum() {
    let evaluation = Evaluation::new([0.0], vec![-1.0, 0.5, 2.0], vec![-0.25]);
    let s = Solution::new(vec![], evaluation, 0.0);
    assert!(!s.is_feasible());
    assert_eq!(s.violation(), 2.75);
  }

  #[test]
  fn test_equality_tolerance() {
    let evaluation = Evaluation::new([0.0], vec![], vec![1e-9, -1e-9]);
    let s = Solution::new(vec![], evaluation.clone(), 1e-8);
    assert!(s.is_feasible());
    let s = Solution::new(vec![], evaluation, 0.0);
    assert!(!s.is_feasible());
  }

  #[test]
  fn test_nan_constraint_is_violated() {
    let evaluation = Evaluation::new([0.0], vec![f64::NAN], vec![]);
    let s = Solution::new(vec![], evaluation, 1e-8);
    assert!(!s.is_feasible());
    assert_eq!(s.violation(), f64::INFINITY);

    let evaluation = Evaluation::new([0.0], vec![-1.0], vec![f64::NAN]);
    let s = Solution::new(vec![], evaluation, 1e-8);
    assert!(!s.is_feasible());

    let nan = Solution::new(
      vec![],
      Evaluation::new([0.0], vec![f64::NAN], vec![f64::NAN]),
      0.0,
    );
    let violating =
      Solution::new(vec![], Evaluation::new([5.0], vec![3.0], vec![]), 0.0);
    assert!(crate::comparator::is_better(&violating, &nan));
  }
}
