//! Schaffer's Problem No.1 solution using SPEA2.

use std::{convert::Infallible, fs::File, io::Write, path::Path};

use moea::{
  pareto_front,
  Bounds,
  Evaluation,
  GenerationTerminator,
  IntoPar,
  Optimizer,
  Parameters,
  Replacement,
};
use rand::{rngs::StdRng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
  env_logger::init();

  // objective functions `f1(x) = x^2` and `f2(x) = (x - 2)^2`
  let schaffer = |x: &[f64]| {
    Ok::<_, Infallible>(Evaluation::unconstrained([
      x[0].powi(2),
      (x[0] - 2.0).powi(2),
    ]))
  };

  // a convenient builder with compile time verification from `typed-builder` crate
  let optimizer = Optimizer::builder()
    .parameters(Parameters::builder().population_size(100).build())
    // the Pareto optimal set `0 <= x <= 2` is a tiny part of the search space
    .bounds(Bounds::uniform(1, -1000.0, 1000.0)?)
    // `schaffer` will be executed concurrently for each batch of candidates
    .evaluator(schaffer.par_batch())
    .replacement(Replacement::Spea2)
    .terminator(GenerationTerminator(250))
    .rng(StdRng::seed_from_u64(42))
    .build();
  let population = optimizer.optimize()?;
  let front = pareto_front(&population);

  // write the front to file in demos/spea2/schaffer_n1.csv
  File::create(Path::new(file!()).with_file_name("schaffer_n1.csv"))?
    .write_all(
      front
        .iter()
        .map(|s| format!("{} {}", s.objectives()[0], s.objectives()[1]))
        .collect::<Vec<_>>()
        .join("\n")
        .as_bytes(),
    )?;

  // and print first 10 solutions
  println!("    x    |    f1    |    f2    ");
  for solution in front.iter().take(10) {
    let [f1, f2] = solution.objectives();
    println!("{:8.4} | {f1:8.4} | {f2:8.4}", solution.position()[0]);
  }
  println!("   ...   |   ...    |   ...    ");
  Ok(())
}
