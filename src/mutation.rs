//! Mutation of real-valued positions.

use rand::Rng;

use crate::{
  bounds::Bounds,
  error::Result,
  parameters::{check_index, check_probability},
};

/// Polynomial mutation.
///
/// Each variable is perturbed independently with probability `probability`.
/// The perturbation follows a polynomial distribution scaled by the variable's
/// range and shaped by `distribution_index` and by the variable's distance to
/// the nearer bound: the larger the index, the smaller the typical step.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PolynomialMutation {
  distribution_index: f64,
  probability: f64,
}

impl PolynomialMutation {
  /// Creates the operator.
  ///
  /// # Errors
  ///
  /// Returns a configuration error for a probability outside `[0, 1]` or a
  /// negative distribution index.
  pub fn new(distribution_index: f64, probability: f64) -> Result<Self> {
    check_index("mutation distribution index", distribution_index)?;
    check_probability("mutation probability", probability)?;
    Ok(Self {
      distribution_index,
      probability,
    })
  }

  /// Distribution index `η_m`.
  pub fn distribution_index(&self) -> f64 {
    self.distribution_index
  }

  /// Per-variable probability of being changed.
  pub fn probability(&self) -> f64 {
    self.probability
  }

  /// Mutates `position` in place, then clamps it into bounds.
  pub fn mutate<R: Rng + ?Sized>(
    &self,
    position: &mut [f64],
    bounds: &Bounds,
    rng: &mut R,
  ) {
    let power = 1.0 / (self.distribution_index + 1.0);
    for ((x, &l), &u) in position
      .iter_mut()
      .zip(bounds.lower())
      .zip(bounds.upper())
    {
      if !rng.gen_bool(self.probability) {
        continue;
      }
      let range = u - l;
      if !(range > 0.0) {
        *x = l;
        continue;
      }
      let r: f64 = rng.gen();
      let delta = if r < 0.5 {
        let xy = 1.0 - (*x - l) / range;
        let value = 2.0 * r
          + (1.0 - 2.0 * r) * xy.max(0.0).powf(self.distribution_index + 1.0);
        value.powf(power) - 1.0
      } else {
        let xy = 1.0 - (u - *x) / range;
        let value = 2.0 * (1.0 - r)
          + 2.0 * (r - 0.5) * xy.max(0.0).powf(self.distribution_index + 1.0);
        1.0 - value.powf(power)
      };
      *x += delta * range;
    }
    bounds.repair(position);
  }
}
