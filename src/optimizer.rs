//! The generation loop.

use std::{marker::PhantomData, time::Instant};

use rand::Rng;
use typed_builder::TypedBuilder;

use crate::{
  bounds::Bounds,
  error::{Error, Result},
  evaluation::executor::EvaluationExecutor,
  parameters::Parameters,
  population::{generate_population, prepare_positions},
  replacement::{Replacement, SelectionContext},
  selection::{binary_tournaments, permutation_tournaments},
  solution::Solution,
  termination::{Status, Terminator},
};

/// Drives a multi-objective evolutionary algorithm.
///
/// Every generation selects `N` parents, recombines them with simulated
/// binary crossover, mutates the children with polynomial mutation,
/// evaluates them and lets the [`Replacement`] strategy decide which
/// solutions survive. The terminator is consulted once per generation,
/// after selection.
///
/// Parent selection depends on the strategy: [`Replacement::Spea2`] plays
/// binary tournaments on SPEA2 fitness, all other strategies play
/// tournaments anchored on a random permutation of the population.
///
/// # Examples
/// ```
/// # use moea::{
/// #   Bounds, Evaluation, GenerationTerminator, Optimizer, Parameters,
/// #   Replacement,
/// # };
/// # use rand::{rngs::StdRng, SeedableRng};
/// # use std::convert::Infallible;
/// let optimizer = Optimizer::builder()
///   .parameters(Parameters::builder().population_size(20).build())
///   .bounds(Bounds::uniform(1, -10.0, 10.0)?)
///   .evaluator(|x: &[f64]| {
///     Ok::<_, Infallible>(Evaluation::unconstrained([
///       x[0].powi(2),
///       (x[0] - 2.0).powi(2),
///     ]))
///   })
///   .replacement(Replacement::Spea2)
///   .terminator(GenerationTerminator(10))
///   .rng(StdRng::seed_from_u64(0))
///   .build();
/// let population = optimizer.optimize()?;
/// assert_eq!(population.len(), 20);
/// # Ok::<(), moea::error::Error>(())
/// ```
#[derive(TypedBuilder)]
pub struct Optimizer<E, ES, T, R, const N: usize>
where
  E: EvaluationExecutor<N, ES>,
  T: Terminator,
  R: Rng,
{
  parameters: Parameters,
  bounds: Bounds,
  evaluator: E,
  replacement: Replacement,
  terminator: T,
  rng: R,
  /// Positions of the initial population. Sampled uniformly inside the
  /// bounds if not given.
  #[builder(default, setter(strip_option))]
  initial_positions: Option<Vec<Vec<f64>>>,
  #[builder(setter(skip), default)]
  population: Vec<Solution<N>>,
  #[builder(setter(skip), default)]
  context: SelectionContext,
  #[builder(setter(skip), default)]
  evaluations: usize,
  #[builder(setter(skip), default)]
  iterations: usize,
  #[builder(setter(skip), default)]
  started: Option<Instant>,
  #[builder(setter(skip), default)]
  _es: PhantomData<ES>,
}

impl<E, ES, T, R, const N: usize> Optimizer<E, ES, T, R, N>
where
  E: EvaluationExecutor<N, ES>,
  T: Terminator,
  R: Rng,
{
  /// Validates the configuration, resolves the default mutation probability
  /// and evaluates the initial population. Calling it again resets the
  /// counters and evaluates a new initial population, either the supplied
  /// initial positions or a fresh sample. The terminator is not reset.
  ///
  /// # Errors
  ///
  /// Returns a configuration error for invalid parameters, a mismatching
  /// initial population or a terminator that would never fire, and
  /// propagates evaluation failures.
  pub fn initialize(&mut self) -> Result<()> {
    if !self.terminator.is_bounded() {
      return Err(Error::configuration(
        "at least one evaluation, iteration or time limit must be set",
      ));
    }
    let dimension = self.bounds.dimension();
    self.parameters.resolve(dimension)?;
    let size = self.parameters.population_size;
    let tolerance = self.parameters.tolerance;

    self.population = match &self.initial_positions {
      Some(positions) => {
        let positions =
          prepare_positions(positions.clone(), size, &self.bounds)?;
        self.evaluator.execute_evaluations(positions, tolerance)?
      }
      None => generate_population(
        size,
        &self.bounds,
        tolerance,
        &self.evaluator,
        &mut self.rng,
      )?,
    };
    self.evaluations = self.population.len();
    self.iterations = 0;
    self.context.clear();
    self.started = Some(Instant::now());

    log::info!(
      "initialized {:?} with {} solutions of {} variables, mutation \
       probability {:?}",
      self.replacement,
      size,
      dimension,
      self.parameters.mutation_probability
    );
    Ok(())
  }

  /// Runs one generation: reproduction, evaluation and selection.
  ///
  /// # Errors
  ///
  /// Fails if the optimizer is not initialized and propagates evaluation
  /// failures.
  pub fn step(&mut self) -> Result<()> {
    if self.population.is_empty() {
      return Err(Error::configuration("optimizer is not initialized"));
    }
    let size = self.parameters.population_size;

    let parents = match self.replacement {
      Replacement::Spea2 => {
        let fitness = self.context.fitness_of(&self.population);
        binary_tournaments(fitness, size, &mut self.rng)
      }
      Replacement::Generational
      | Replacement::Elitist
      | Replacement::ContributionRemoval => {
        permutation_tournaments(&self.population, size, &mut self.rng)
      }
    };
    let parents: Vec<&[f64]> = parents
      .into_iter()
      .map(|i| self.population[i].position())
      .collect();

    let crossover = self.parameters.crossover()?;
    let mutation = self.parameters.mutation()?;
    let mut children =
      crossover.recombine(&parents, &self.bounds, &mut self.rng);
    children.truncate(size);
    for child in &mut children {
      mutation.mutate(child, &self.bounds, &mut self.rng);
    }

    let offspring = self
      .evaluator
      .execute_evaluations(children, self.parameters.tolerance)?;
    self.evaluations += offspring.len();

    let population = std::mem::take(&mut self.population);
    let pool = population.len() + offspring.len();
    self.population =
      self
        .replacement
        .select(population, offspring, &mut self.context)?;
    self.iterations += 1;

    log::debug!(
      "generation {}: kept {} out of {} solutions, {} evaluations",
      self.iterations,
      self.population.len(),
      pool,
      self.evaluations
    );
    Ok(())
  }

  /// Initializes the optimizer and runs generations until the terminator
  /// fires. Returns the final population.
  ///
  /// # Errors
  ///
  /// See [`Optimizer::initialize`] and [`Optimizer::step`].
  pub fn optimize(mut self) -> Result<Vec<Solution<N>>> {
    self.initialize()?;
    while !self.terminator.terminate(&self.status()) {
      self.step()?;
    }
    log::info!(
      "finished after {} generations and {} evaluations",
      self.iterations,
      self.evaluations
    );
    Ok(self.population)
  }

  /// Current population.
  pub fn population(&self) -> &[Solution<N>] {
    &self.population
  }

  /// Number of objective function evaluations performed so far.
  pub fn evaluations(&self) -> usize {
    self.evaluations
  }

  /// Number of completed generations.
  pub fn iterations(&self) -> usize {
    self.iterations
  }

  /// Parameters of the run. The mutation probability is resolved once the
  /// optimizer is initialized.
  pub fn parameters(&self) -> &Parameters {
    &self.parameters
  }

  /// Progress of the run.
  pub fn status(&self) -> Status {
    Status {
      evaluations: self.evaluations,
      iterations: self.iterations,
      elapsed: self.started.map(|s| s.elapsed()).unwrap_or_default(),
    }
  }

  /// Moves the current population out of the optimizer.
  pub fn into_population(self) -> Vec<Solution<N>> {
    self.population
  }
}
