//! Seeding of the initial population and inspection of final ones.

use rand::Rng;

use crate::{
  bounds::Bounds,
  error::{Error, Result},
  evaluation::executor::EvaluationExecutor,
  fitness::non_dominated_sort,
  solution::Solution,
};

/// Samples `size` positions uniformly inside `bounds` and evaluates them.
///
/// # Errors
///
/// Propagates the first evaluation failure.
pub fn generate_population<const N: usize, ES, E, R>(
  size: usize,
  bounds: &Bounds,
  tolerance: f64,
  evaluator: &E,
  rng: &mut R,
) -> Result<Vec<Solution<N>>>
where
  E: EvaluationExecutor<N, ES>,
  R: Rng + ?Sized,
{
  let positions = (0..size).map(|_| bounds.sample(rng)).collect();
  evaluator.execute_evaluations(positions, tolerance)
}

/// Checks caller-supplied initial positions against the expected population
/// `size` and the dimension of `bounds`, clamping stray values into bounds.
///
/// # Errors
///
/// Returns a configuration error on a count or dimension mismatch.
pub fn prepare_positions(
  mut positions: Vec<Vec<f64>>,
  size: usize,
  bounds: &Bounds,
) -> Result<Vec<Vec<f64>>> {
  if positions.len() != size {
    return Err(Error::configuration(format!(
      "expected {size} initial positions, got {}",
      positions.len()
    )));
  }
  for (i, position) in positions.iter_mut().enumerate() {
    if position.len() != bounds.dimension() {
      return Err(Error::configuration(format!(
        "initial position {i} has {} variables, bounds have {}",
        position.len(),
        bounds.dimension()
      )));
    }
    bounds.repair(position);
  }
  Ok(positions)
}

/// Returns the solutions of `population` no other solution is better than.
pub fn pareto_front<const N: usize>(
  population: &[Solution<N>],
) -> Vec<&Solution<N>> {
  non_dominated_sort(population)
    .into_iter()
    .next()
    .unwrap_or_default()
    .into_iter()
    .map(|i| &population[i])
    .collect()
}
