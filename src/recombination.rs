//! Recombination of real-valued positions.

use itertools::Itertools;
use rand::Rng;

use crate::{
  bounds::Bounds,
  error::Result,
  parameters::{check_index, check_probability},
};

/// Simulated binary crossover (SBX).
///
/// Each variable is recombined independently with probability `probability`,
/// otherwise both children inherit the parents' values unchanged. A
/// recombined pair is spread symmetrically around the parents' mean by a
/// factor drawn from a distribution whose shape is set by
/// `distribution_index`: the larger the index, the closer the children stay
/// to their parents. Children are clamped into bounds afterwards.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SimulatedBinaryCrossover {
  distribution_index: f64,
  probability: f64,
}

impl SimulatedBinaryCrossover {
  /// Creates the operator.
  ///
  /// # Errors
  ///
  /// Returns a configuration error for a probability outside `[0, 1]` or a
  /// negative distribution index.
  pub fn new(distribution_index: f64, probability: f64) -> Result<Self> {
    check_index("crossover distribution index", distribution_index)?;
    check_probability("crossover probability", probability)?;
    Ok(Self {
      distribution_index,
      probability,
    })
  }

  /// Distribution index `η_cr`.
  pub fn distribution_index(&self) -> f64 {
    self.distribution_index
  }

  /// Per-variable probability of being changed.
  pub fn probability(&self) -> f64 {
    self.probability
  }

  /// Draws the spread factor `β` for one variable.
  fn spread<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
    let u: f64 = rng.gen();
    let exponent = 1.0 / (self.distribution_index + 1.0);
    if u <= 0.5 {
      (2.0 * u).powf(exponent)
    } else {
      (1.0 / (2.0 * (1.0 - u))).powf(exponent)
    }
  }

  /// Recombines two parents into two children.
  pub fn crossover<R: Rng + ?Sized>(
    &self,
    a: &[f64],
    b: &[f64],
    bounds: &Bounds,
    rng: &mut R,
  ) -> (Vec<f64>, Vec<f64>) {
    debug_assert_eq!(a.len(), b.len());
    let (mut c1, mut c2): (Vec<f64>, Vec<f64>) = a
      .iter()
      .zip(b)
      .map(|(&x, &y)| {
        if !rng.gen_bool(self.probability) {
          return (x, y);
        }
        let beta = self.spread(rng);
        (
          0.5 * ((1.0 + beta) * x + (1.0 - beta) * y),
          0.5 * ((1.0 - beta) * x + (1.0 + beta) * y),
        )
      })
      .unzip();
    bounds.repair(&mut c1);
    bounds.repair(&mut c2);
    (c1, c2)
  }

  /// Recombines consecutive pairs of `parents`, producing one child per
  /// parent. An unpaired last parent is recombined with the first one and
  /// only its first child is kept.
  pub fn recombine<R: Rng + ?Sized>(
    &self,
    parents: &[&[f64]],
    bounds: &Bounds,
    rng: &mut R,
  ) -> Vec<Vec<f64>> {
    let mut children = Vec::with_capacity(parents.len());
    for (a, b) in parents.iter().tuples() {
      let (c1, c2) = self.crossover(a, b, bounds, rng);
      children.push(c1);
      children.push(c2);
    }
    if parents.len() % 2 == 1 {
      let (c1, _) =
        self.crossover(parents[parents.len() - 1], parents[0], bounds, rng);
      children.push(c1);
    }
    children
  }
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;
  use crate::error::Error;

  #[test]
  fn test_zero_probability_copies_parents() {
    let bounds = Bounds::uniform(3, -10.0, 10.0).unwrap();
    let sbx = SimulatedBinaryCrossover::new(20.0, 0.0).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let (c1, c2) =
      sbx.crossover(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &bounds, &mut rng);
    assert_eq!(c1, vec![1.0, 2.0, 3.0]);
    assert_eq!(c2, vec![4.0, 5.0, 6.0]);
  }

  #[test]
  fn test_children_are_centered_on_parents() {
    let bounds = Bounds::uniform(4, -1e9, 1e9).unwrap();
    let sbx = SimulatedBinaryCrossover::new(2.0, 1.0).unwrap();
    let mut rng = StdRng::seed_from_u64(2);
    let a = [0.0, 1.0, -3.0, 5.0];
    let b = [2.0, 1.5, 3.0, -5.0];
    for _ in 0..100 {
      let (c1, c2) = sbx.crossover(&a, &b, &bounds, &mut rng);
      for i in 0..a.len() {
        let error = (c1[i] + c2[i] - (a[i] + b[i])).abs();
        assert!(error < 1e-9 * (1.0 + c1[i].abs()));
      }
    }
  }

  #[test]
  fn test_children_within_bounds() {
    let bounds = Bounds::uniform(2, 0.0, 1.0).unwrap();
    let sbx = SimulatedBinaryCrossover::new(0.5, 1.0).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
      let (c1, c2) =
        sbx.crossover(&[0.0, 1.0], &[1.0, 0.0], &bounds, &mut rng);
      assert!(bounds.contains(&c1));
      assert!(bounds.contains(&c2));
    }
  }

  #[test]
  fn test_larger_index_keeps_children_closer() {
    let bounds = Bounds::uniform(1, -1e6, 1e6).unwrap();
    let spread = |index: f64| {
      let sbx = SimulatedBinaryCrossover::new(index, 1.0).unwrap();
      let mut rng = StdRng::seed_from_u64(4);
      (0..1000)
        .map(|_| {
          let (c1, _) = sbx.crossover(&[0.0], &[1.0], &bounds, &mut rng);
          // distance to the nearer parent
          c1[0].abs()
        })
        .sum::<f64>()
    };
    assert!(spread(50.0) < spread(1.0));
  }

  #[test]
  fn test_recombine_produces_child_per_parent() {
    let bounds = Bounds::uniform(1, 0.0, 10.0).unwrap();
    let sbx = SimulatedBinaryCrossover::new(20.0, 0.9).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let parents: [&[f64]; 3] = [&[1.0], &[2.0], &[3.0]];
    assert_eq!(sbx.recombine(&parents, &bounds, &mut rng).len(), 3);
    assert_eq!(sbx.recombine(&parents[..2], &bounds, &mut rng).len(), 2);
  }

  #[test]
  fn test_invalid_arguments_are_rejected() {
    for (index, probability) in
      [(20.0, 1.5), (20.0, -0.1), (20.0, f64::NAN), (-1.0, 0.9)]
    {
      assert!(matches!(
        SimulatedBinaryCrossover::new(index, probability),
        Err(Error::Configuration(_))
      ));
    }
    let sbx = SimulatedBinaryCrossover::new(0.0, 1.0).unwrap();
    assert_eq!(sbx.distribution_index(), 0.0);
    assert_eq!(sbx.probability(), 1.0);
  }
}
