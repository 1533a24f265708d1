//! Algorithm parameters.

use typed_builder::TypedBuilder;

use crate::{
  error::{Error, Result},
  mutation::PolynomialMutation,
  recombination::SimulatedBinaryCrossover,
};

/// Parameters of a run, owned by the optimizer for its entire duration.
///
/// # Examples
/// ```
/// # use moea::parameters::Parameters;
/// let parameters = Parameters::builder()
///   .population_size(100)
///   .crossover_probability(0.8)
///   .build();
/// assert_eq!(parameters.mutation_probability, None); // resolved to `1 / D`
/// ```
#[derive(TypedBuilder, Clone, PartialEq, Debug)]
pub struct Parameters {
  /// Population size `N`.
  pub population_size: usize,
  /// SBX distribution index `η_cr`.
  #[builder(default = 20.0)]
  pub crossover_distribution_index: f64,
  /// SBX per-variable probability `p_cr`.
  #[builder(default = 0.9)]
  pub crossover_probability: f64,
  /// Polynomial mutation distribution index `η_m`.
  #[builder(default = 20.0)]
  pub mutation_distribution_index: f64,
  /// Polynomial mutation per-variable probability `p_m`. `None` stands for
  /// `1 / D` and is replaced with that value when a run is initialized.
  #[builder(default, setter(strip_option))]
  pub mutation_probability: Option<f64>,
  /// Tolerance `ε` under which an equality constraint counts as satisfied.
  #[builder(default = 1e-8)]
  pub tolerance: f64,
}

impl Parameters {
  /// Checks the parameters for a problem of `dimension` variables and
  /// resolves the default mutation probability.
  ///
  /// # Errors
  ///
  /// Returns a configuration error for a zero population size, a
  /// probability outside `[0, 1]`, a negative distribution index or a
  /// negative tolerance.
  pub fn resolve(&mut self, dimension: usize) -> Result<()> {
    if self.population_size == 0 {
      return Err(Error::configuration("population size must be positive"));
    }
    if dimension == 0 {
      return Err(Error::configuration("problem has no decision variables"));
    }
    let mutation_probability = *self
      .mutation_probability
      .get_or_insert(1.0 / dimension as f64);
    check_probability("crossover probability", self.crossover_probability)?;
    check_probability("mutation probability", mutation_probability)?;
    check_index(
      "crossover distribution index",
      self.crossover_distribution_index,
    )?;
    check_index(
      "mutation distribution index",
      self.mutation_distribution_index,
    )?;
    if !(self.tolerance >= 0.0) {
      return Err(Error::configuration(format!(
        "tolerance must be non-negative, got {}",
        self.tolerance
      )));
    }
    Ok(())
  }

  /// Crossover operator configured by these parameters.
  ///
  /// # Errors
  ///
  /// See [`SimulatedBinaryCrossover::new`].
  pub fn crossover(&self) -> Result<SimulatedBinaryCrossover> {
    SimulatedBinaryCrossover::new(
      self.crossover_distribution_index,
      self.crossover_probability,
    )
  }

  /// Mutation operator configured by these parameters. An unresolved
  /// mutation probability is treated as `0`.
  ///
  /// # Errors
  ///
  /// See [`PolynomialMutation::new`].
  pub fn mutation(&self) -> Result<PolynomialMutation> {
    PolynomialMutation::new(
      self.mutation_distribution_index,
      self.mutation_probability.unwrap_or(0.0),
    )
  }
}

pub(crate) fn check_probability(name: &str, value: f64) -> Result<()> {
  if (0.0..=1.0).contains(&value) {
    Ok(())
  } else {
    Err(Error::configuration(format!(
      "{name} must lie in [0, 1], got {value}"
    )))
  }
}

pub(crate) fn check_index(name: &str, value: f64) -> Result<()> {
  if value >= 0.0 && value.is_finite() {
    Ok(())
  } else {
    Err(Error::configuration(format!(
      "{name} must be non-negative, got {value}"
    )))
  }
}
