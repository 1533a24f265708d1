//! Parent selection.

use rand::{seq::SliceRandom, Rng};

use crate::{comparator::is_better, fitness::Fitness, solution::Solution};

/// Plays a tournament between the solution at `anchor` and a uniformly drawn
/// opponent. The anchor wins only if it is strictly better than the opponent
/// according to [`compare`](crate::comparator::compare); otherwise the
/// opponent is returned.
///
/// # Panics
///
/// Panics if `population` is empty.
pub fn tournament<const N: usize, R: Rng + ?Sized>(
  population: &[Solution<N>],
  anchor: usize,
  rng: &mut R,
) -> usize {
  let opponent = rng.gen_range(0..population.len());
  if is_better(&population[anchor], &population[opponent]) {
    anchor
  } else {
    opponent
  }
}

/// Plays a tournament between the solution at `anchor` and a uniformly drawn
/// opponent, where lower `fitness` wins. Ties keep the anchor.
///
/// # Panics
///
/// Panics if `fitness` is empty.
pub fn fitness_tournament<R: Rng + ?Sized>(
  fitness: &[Fitness],
  anchor: usize,
  rng: &mut R,
) -> usize {
  let opponent = rng.gen_range(0..fitness.len());
  if fitness[opponent] < fitness[anchor] {
    opponent
  } else {
    anchor
  }
}

/// Draws two indices uniformly and returns the one with lower `fitness`.
///
/// # Panics
///
/// Panics if `fitness` is empty.
pub fn binary_tournament<R: Rng + ?Sized>(
  fitness: &[Fitness],
  rng: &mut R,
) -> usize {
  let anchor = rng.gen_range(0..fitness.len());
  fitness_tournament(fitness, anchor, rng)
}

/// Selects `count` parents with [`tournament`]s anchored on random
/// permutations of the population, so that within each pass over the
/// population every solution is an anchor exactly once.
pub fn permutation_tournaments<const N: usize, R: Rng + ?Sized>(
  population: &[Solution<N>],
  count: usize,
  rng: &mut R,
) -> Vec<usize> {
  let mut parents = Vec::with_capacity(count);
  if population.is_empty() {
    return parents;
  }
  let mut anchors: Vec<usize> = (0..population.len()).collect();
  while parents.len() < count {
    anchors.shuffle(rng);
    for &anchor in anchors.iter().take(count - parents.len()) {
      parents.push(tournament(population, anchor, rng));
    }
  }
  parents
}

/// Selects `count` parents with [`binary_tournament`]s over `fitness`.
pub fn binary_tournaments<R: Rng + ?Sized>(
  fitness: &[Fitness],
  count: usize,
  rng: &mut R,
) -> Vec<usize> {
  if fitness.is_empty() {
    return vec![];
  }
  (0..count).map(|_| binary_tournament(fitness, rng)).collect()
}
