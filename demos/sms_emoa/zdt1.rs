//! ZDT1 solution using SMS-EMOA, stopped by an evaluation budget.

use std::{convert::Infallible, time::Duration};

use moea::{
  hypervolume::hypervolume,
  pareto_front,
  Bounds,
  Budget,
  Evaluation,
  Optimizer,
  Parameters,
  Replacement,
};
use rand::{rngs::StdRng, SeedableRng};

/// Number of decision variables.
const D: usize = 30;

fn zdt1(x: &[f64]) -> Result<Evaluation<2>, Infallible> {
  let g = 1.0 + 9.0 * x[1..].iter().sum::<f64>() / (x.len() - 1) as f64;
  let f1 = x[0];
  let f2 = g * (1.0 - (f1 / g).sqrt());
  Ok(Evaluation::unconstrained([f1, f2]))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  env_logger::init();

  // stop after 10000 evaluations or a minute, whichever comes first
  let budget = Budget::builder()
    .max_evaluations(10_000)
    .max_time(Duration::from_secs(60))
    .build();

  let optimizer = Optimizer::builder()
    .parameters(
      Parameters::builder()
        .population_size(50)
        .crossover_distribution_index(15.0)
        .build(),
    )
    .bounds(Bounds::uniform(D, 0.0, 1.0)?)
    .evaluator(zdt1)
    .replacement(Replacement::ContributionRemoval)
    .terminator(budget)
    .rng(StdRng::seed_from_u64(7))
    .build();
  let population = optimizer.optimize()?;

  let front = pareto_front(&population);
  let points: Vec<&[f64]> =
    front.iter().map(|s| s.objectives().as_slice()).collect();
  // the true front `f2 = 1 - sqrt(f1)` scores 120 + 2/3 w.r.t. (11, 11)
  println!(
    "{} non-dominated solutions, hypervolume {:.4} of {:.4}",
    front.len(),
    hypervolume(&points, &[11.0, 11.0]),
    120.0 + 2.0 / 3.0
  );
  Ok(())
}
