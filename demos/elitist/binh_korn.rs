//! Binh and Korn constrained problem solution using elitist replacement.

use std::convert::Infallible;

use moea::{
  pareto_front,
  Bounds,
  Evaluation,
  IntoPar,
  Optimizer,
  Parameters,
  Replacement,
  Status,
};
use rand::{rngs::StdRng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
  env_logger::init();

  // objective functions `f1(x, y) = 4x^2 + 4y^2` and
  // `f2(x, y) = (x - 5)^2 + (y - 5)^2` subject to
  // `(x - 5)^2 + y^2 <= 25` and `(x - 8)^2 + (y + 3)^2 >= 7.7`
  let binh_korn = |p: &[f64]| {
    let (x, y) = (p[0], p[1]);
    Ok::<_, Infallible>(Evaluation::new(
      [
        4.0 * x.powi(2) + 4.0 * y.powi(2),
        (x - 5.0).powi(2) + (y - 5.0).powi(2),
      ],
      vec![
        (x - 5.0).powi(2) + y.powi(2) - 25.0,
        7.7 - (x - 8.0).powi(2) - (y + 3.0).powi(2),
      ],
      vec![],
    ))
  };

  let optimizer = Optimizer::builder()
    .parameters(Parameters::builder().population_size(100).build())
    .bounds(Bounds::new(vec![0.0, 0.0], vec![5.0, 3.0])?)
    // `binh_korn` will be executed concurrently for each candidate
    .evaluator(binh_korn.par_each())
    .replacement(Replacement::Elitist)
    // any `FnMut(&Status) -> bool` closure is a terminator
    .terminator(|status: &Status| status.iterations >= 200)
    .rng(StdRng::seed_from_u64(1))
    .build();
  let population = optimizer.optimize()?;

  let feasible = population.iter().filter(|s| s.is_feasible()).count();
  println!("{feasible} out of {} solutions are feasible", population.len());
  println!("    x    |    y    |    f1    |    f2    ");
  for solution in pareto_front(&population).iter().take(10) {
    let [x, y] = solution.position() else {
      continue;
    };
    let [f1, f2] = solution.objectives();
    println!("{x:8.4} | {y:8.4} | {f1:8.4} | {f2:8.4}");
  }
  println!("   ...   |   ...   |   ...    |   ...    ");
  Ok(())
}
