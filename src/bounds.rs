//! Box constraints of the decision space.

use rand::Rng;

use crate::error::{Error, Result};

/// Lower and upper bounds of each decision variable.
#[derive(Clone, PartialEq, Debug)]
pub struct Bounds {
  lower: Vec<f64>,
  upper: Vec<f64>,
}

impl Bounds {
  /// Creates bounds from per-variable limits.
  ///
  /// # Errors
  ///
  /// Returns a configuration error if the vectors are empty, differ in
  /// length, or if any lower bound exceeds its upper bound.
  pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
    if lower.is_empty() {
      return Err(Error::configuration("bounds cannot be empty"));
    }
    if lower.len() != upper.len() {
      return Err(Error::configuration(format!(
        "lower bounds have {} values but upper bounds have {}",
        lower.len(),
        upper.len()
      )));
    }
    if let Some(i) = (0..lower.len()).find(|&i| !(lower[i] <= upper[i])) {
      return Err(Error::configuration(format!(
        "variable {i}: lower bound {} exceeds upper bound {}",
        lower[i], upper[i]
      )));
    }
    Ok(Self { lower, upper })
  }

  /// Creates bounds where every one of `dimension` variables lies in
  /// `[lower, upper]`.
  pub fn uniform(dimension: usize, lower: f64, upper: f64) -> Result<Self> {
    Self::new(vec![lower; dimension], vec![upper; dimension])
  }

  /// Number of decision variables.
  pub fn dimension(&self) -> usize {
    self.lower.len()
  }

  /// Lower bounds.
  pub fn lower(&self) -> &[f64] {
    &self.lower
  }

  /// Upper bounds.
  pub fn upper(&self) -> &[f64] {
    &self.upper
  }

  /// Clamps every out-of-bounds variable to the bound it violates.
  pub fn repair(&self, position: &mut [f64]) {
    debug_assert_eq!(position.len(), self.dimension());
    for ((x, &l), &u) in position.iter_mut().zip(&self.lower).zip(&self.upper)
    {
      if *x < l {
        *x = l;
      } else if *x > u {
        *x = u;
      }
    }
  }

  /// Returns `true` if `position` has the right dimension and lies inside
  /// the bounds.
  pub fn contains(&self, position: &[f64]) -> bool {
    position.len() == self.dimension()
      && position
        .iter()
        .zip(&self.lower)
        .zip(&self.upper)
        .all(|((x, l), u)| l <= x && x <= u)
  }

  /// Samples a position uniformly inside the bounds.
  pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
    self
      .lower
      .iter()
      .zip(&self.upper)
      .map(|(&l, &u)| l + rng.gen::<f64>() * (u - l))
      .collect()
  }
}
