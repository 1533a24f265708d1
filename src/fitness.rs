//! Fitness assignment: SPEA2 strength fitness and non-dominated sorting.

use crate::{
  comparator::{compare, Comparison},
  distance::{compute_distances, kth_nearest},
  solution::Solution,
};

/// Index of a solution in a population slice.
type SolutionIndex = usize;
/// Number of solutions dominated by a solution.
type StrengthValue = usize;
/// Indices of solutions of a front.
type Front = Vec<SolutionIndex>;

/// SPEA2 fitness value. The lower - the better; values below `1` belong to
/// non-dominated solutions.
pub type Fitness = f64;

/// Assigns SPEA2 fitness to each solution of `population`.
///
/// The fitness of a solution is the sum of the strengths (number of dominated
/// solutions) of all of its dominators, plus a density term
/// `1 / (d_k + 2)` where `d_k` is the distance to its `k`-th nearest
/// neighbor in objective space and `k = floor(sqrt(len))`. Dominance follows
/// [`compare`], so feasibility is taken into account.
pub fn strength_fitness<const N: usize>(
  population: &[Solution<N>],
) -> Vec<Fitness> {
  let n = population.len();
  // `dominated[i]` lists the solutions dominated by solution `i`
  let mut dominated: Vec<Vec<SolutionIndex>> = vec![Vec::new(); n];
  for i in 0..n {
    for j in (i + 1)..n {
      match compare(&population[i], &population[j]) {
        Comparison::FirstBetter => dominated[i].push(j),
        Comparison::SecondBetter => dominated[j].push(i),
        Comparison::Incomparable => {}
      }
    }
  }

  let strength: Vec<StrengthValue> = dominated.iter().map(Vec::len).collect();
  let mut raw = vec![0usize; n];
  for (i, list) in dominated.iter().enumerate() {
    for &j in list {
      raw[j] += strength[i];
    }
  }

  let objectives: Vec<_> = population.iter().map(Solution::objectives).collect();
  let k = ((n as f64).sqrt().floor() as usize).max(1);
  let density = kth_nearest(&compute_distances(&objectives), k);

  raw
    .into_iter()
    .zip(density)
    .map(|(r, d)| r as Fitness + 1.0 / (d + 2.0))
    .collect()
}

/// Sorts `population` into fronts of mutually non-dominated solutions.
/// The first front is not dominated by anything; every solution of front
/// `i + 1` is dominated by some solution of front `i`. Indices inside a
/// front are ascending.
pub fn non_dominated_sort<const N: usize>(
  population: &[Solution<N>],
) -> Vec<Front> {
  let n = population.len();
  let mut dominance_lists: Vec<Vec<SolutionIndex>> = vec![Vec::new(); n];
  let mut dominance_counters: Vec<usize> = vec![0; n];

  // for each unique pair of solutions `p` and `q`...
  for p in 0..n {
    for q in (p + 1)..n {
      match compare(&population[p], &population[q]) {
        // if `p` dominates `q`, remember it and count a dominator of `q`
        Comparison::FirstBetter => {
          dominance_lists[p].push(q);
          dominance_counters[q] += 1;
        }
        // and vice versa
        Comparison::SecondBetter => {
          dominance_lists[q].push(p);
          dominance_counters[p] += 1;
        }
        Comparison::Incomparable => {}
      }
    }
  }

  let mut fronts = Vec::new();
  let mut front: Front = (0..n).filter(|&i| dominance_counters[i] == 0).collect();
  while !front.is_empty() {
    let mut next_front = Vec::new();
    for &p in &front {
      for &q in &dominance_lists[p] {
        dominance_counters[q] -= 1;
        if dominance_counters[q] == 0 {
          next_front.push(q);
        }
      }
    }
    next_front.sort_unstable();
    fronts.push(std::mem::replace(&mut front, next_front));
  }

  debug_assert_eq!(
    fronts.iter().map(Vec::len).sum::<usize>(),
    n,
    "every solution must belong to exactly one front"
  );
  fronts
}

/// Returns the front number of each solution. The lower - the better.
pub fn ranks<const N: usize>(population: &[Solution<N>]) -> Vec<usize> {
  let mut ranks = vec![0; population.len()];
  for (rank, front) in non_dominated_sort(population).into_iter().enumerate() {
    for i in front {
      ranks[i] = rank;
    }
  }
  ranks
}
