//! Environmental selection: deciding which solutions of the merged pool of
//! parents and offspring survive into the next generation.

use crate::{
  distance::truncation,
  error::{Error, Result},
  fitness::{non_dominated_sort, ranks, strength_fitness, Fitness},
  hypervolume::contributions,
  solution::Solution,
};

/// State that outlives a single generation, owned by the driver and handed
/// to every [`Replacement::select`] call.
///
/// Holds the SPEA2 fitness of the current population, computed on the merged
/// pool of the previous selection and restricted to its survivors.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct SelectionContext {
  fitness: Option<Vec<Fitness>>,
}

impl SelectionContext {
  /// Creates an empty context.
  pub fn new() -> Self {
    Self::default()
  }

  /// The cached fitness, if any.
  pub fn fitness(&self) -> Option<&[Fitness]> {
    self.fitness.as_deref()
  }

  /// Returns the cached fitness of `population`, computing it first if the
  /// cache is empty or does not match the population's size.
  pub fn fitness_of<const N: usize>(
    &mut self,
    population: &[Solution<N>],
  ) -> &[Fitness] {
    if self
      .fitness
      .as_ref()
      .is_some_and(|f| f.len() != population.len())
    {
      self.fitness = None;
    }
    self
      .fitness
      .get_or_insert_with(|| strength_fitness(population))
  }

  /// Drops the cached fitness.
  pub fn clear(&mut self) {
    self.fitness = None;
  }
}

/// Environmental selection strategy.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Replacement {
  /// Offspring replace the population wholesale. Both must be of equal size.
  Generational,
  /// The merged pool is ordered by constrained non-dominated rank, stable on
  /// ties, and the best `N` are kept.
  Elitist,
  /// SPEA2 environmental selection: non-dominated solutions first, filled up
  /// by fitness or thinned out by nearest-neighbor truncation.
  Spea2,
  /// SMS-EMOA: solutions of the worst front are removed one by one, the
  /// smallest hypervolume contributor first.
  ContributionRemoval,
}

impl Replacement {
  /// Selects `population.len()` survivors out of `population` and
  /// `offspring`, taking ownership of both.
  ///
  /// # Errors
  ///
  /// [`Replacement::Generational`] fails if the two differ in size.
  pub fn select<const N: usize>(
    &self,
    population: Vec<Solution<N>>,
    offspring: Vec<Solution<N>>,
    context: &mut SelectionContext,
  ) -> Result<Vec<Solution<N>>> {
    let size = population.len();
    match self {
      Self::Generational => {
        if offspring.len() != size {
          return Err(Error::configuration(format!(
            "generational replacement needs {size} offspring, got {}",
            offspring.len()
          )));
        }
        context.clear();
        Ok(offspring)
      }
      Self::Elitist => {
        context.clear();
        Ok(elitist(merge(population, offspring), size))
      }
      Self::Spea2 => Ok(spea2(merge(population, offspring), size, context)),
      Self::ContributionRemoval => {
        context.clear();
        Ok(contribution_removal(merge(population, offspring), size))
      }
    }
  }
}

fn merge<const N: usize>(
  mut population: Vec<Solution<N>>,
  offspring: Vec<Solution<N>>,
) -> Vec<Solution<N>> {
  population.extend(offspring);
  population
}

/// Moves the solutions at `indices` out of `pool`, in the order of `indices`.
fn take<const N: usize>(
  pool: Vec<Solution<N>>,
  indices: &[usize],
) -> Vec<Solution<N>> {
  let mut pool: Vec<Option<Solution<N>>> = pool.into_iter().map(Some).collect();
  indices.iter().filter_map(|&i| pool[i].take()).collect()
}

fn elitist<const N: usize>(
  pool: Vec<Solution<N>>,
  size: usize,
) -> Vec<Solution<N>> {
  let ranks = ranks(&pool);
  let mut order: Vec<usize> = (0..pool.len()).collect();
  order.sort_by_key(|&i| ranks[i]);
  order.truncate(size);
  take(pool, &order)
}

fn spea2<const N: usize>(
  pool: Vec<Solution<N>>,
  size: usize,
  context: &mut SelectionContext,
) -> Vec<Solution<N>> {
  let fitness = strength_fitness(&pool);
  let (mut survivors, mut rest): (Vec<usize>, Vec<usize>) =
    (0..pool.len()).partition(|&i| fitness[i] < 1.0);
  log::debug!(
    "SPEA2 environment of {} out of {} solutions",
    survivors.len(),
    pool.len()
  );

  if survivors.len() < size {
    rest.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b]));
    survivors.extend(rest.into_iter().take(size - survivors.len()));
  } else if survivors.len() > size {
    let objectives: Vec<_> =
      survivors.iter().map(|&i| pool[i].objectives()).collect();
    let deleted = truncation(&objectives, survivors.len() - size);
    survivors = survivors
      .into_iter()
      .zip(deleted)
      .filter_map(|(i, deleted)| (!deleted).then_some(i))
      .collect();
  }

  context.fitness = Some(survivors.iter().map(|&i| fitness[i]).collect());
  take(pool, &survivors)
}

fn contribution_removal<const N: usize>(
  pool: Vec<Solution<N>>,
  size: usize,
) -> Vec<Solution<N>> {
  // removing a member of the worst front leaves every other front intact
  let mut fronts = non_dominated_sort(&pool);
  let mut excess = pool.len().saturating_sub(size);
  while excess > 0 {
    let Some(worst) = fronts.last_mut() else {
      break;
    };
    let victim = least_contributor(&pool, worst);
    log::trace!(
      "removing {:?} out of a front of {}",
      pool[worst[victim]].objectives(),
      worst.len()
    );
    worst.remove(victim);
    if worst.is_empty() {
      fronts.pop();
    }
    excess -= 1;
  }
  let mut survivors: Vec<usize> = fronts.into_iter().flatten().collect();
  survivors.sort_unstable();
  take(pool, &survivors)
}

/// Picks the member of `front` to remove and returns its position in
/// `front`: the most violating one if the front is infeasible, else the one
/// with the smallest exclusive hypervolume contribution. Ties go to the
/// first member.
fn least_contributor<const N: usize>(
  pool: &[Solution<N>],
  front: &[usize],
) -> usize {
  if front.len() == 1 {
    return 0;
  }
  if front.iter().any(|&i| !pool[i].is_feasible()) {
    return (0..front.len())
      .min_by(|&a, &b| {
        pool[front[b]]
          .violation()
          .total_cmp(&pool[front[a]].violation())
      })
      .unwrap_or(0);
  }

  let points: Vec<&[f64]> =
    front.iter().map(|&i| pool[i].objectives().as_slice()).collect();
  let reference: Vec<f64> = (0..N)
    .map(|m| {
      points
        .iter()
        .map(|p| p[m])
        .fold(f64::NEG_INFINITY, f64::max)
        + 1.0
    })
    .collect();
  contributions(&points, &reference)
    .into_iter()
    .enumerate()
    .min_by(|(_, a), (_, b)| a.total_cmp(b))
    .map_or(0, |(position, _)| position)
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, Rng, SeedableRng};

  use super::*;
  use crate::{
    comparator::tests::{feasible, infeasible},
    solution::Evaluation,
  };

  fn objectives<const N: usize>(population: &[Solution<N>]) -> Vec<[f64; N]> {
    population.iter().map(|s| *s.objectives()).collect()
  }

  fn front() -> Vec<Solution<2>> {
    vec![
      feasible([1.0, 4.0]),
      feasible([2.0, 3.0]),
      feasible([3.0, 2.0]),
      feasible([4.0, 1.0]),
    ]
  }

  #[test]
  fn test_generational_replacement() {
    let mut context = SelectionContext::new();
    let empty = Replacement::Generational
      .select::<2>(vec![], vec![], &mut context)
      .unwrap();
    assert!(empty.is_empty());

    let offspring = vec![feasible([9.0, 9.0]); 4];
    let next = Replacement::Generational
      .select(front(), offspring.clone(), &mut context)
      .unwrap();
    assert_eq!(next, offspring);

    let result = Replacement::Generational.select(front(), vec![], &mut context);
    assert!(matches!(result, Err(Error::Configuration(_))));
  }

  #[test]
  fn test_elitist_without_offspring_keeps_population() {
    let mut context = SelectionContext::new();
    let next = Replacement::Elitist
      .select(front(), vec![], &mut context)
      .unwrap();
    assert_eq!(next, front());
  }

  #[test]
  fn test_elitist_keeps_dominating_solution() {
    let mut context = SelectionContext::new();
    let next = Replacement::Elitist
      .select(
        vec![feasible([2.0, 2.0]), feasible([0.0, 5.0])],
        vec![feasible([1.0, 1.0]), feasible([3.0, 3.0])],
        &mut context,
      )
      .unwrap();
    assert_eq!(objectives(&next), vec![[0.0, 5.0], [1.0, 1.0]]);
  }

  #[test]
  fn test_elitist_prefers_feasible() {
    let mut context = SelectionContext::new();
    let next = Replacement::Elitist
      .select(
        vec![infeasible([0.0, 0.0], 1.0)],
        vec![feasible([5.0, 5.0])],
        &mut context,
      )
      .unwrap();
    assert!(next[0].is_feasible());
  }

  #[test]
  fn test_spea2_keeps_exactly_the_environment() {
    let mut context = SelectionContext::new();
    let next = Replacement::Spea2
      .select(
        vec![feasible([2.0, 5.0]), feasible([5.0, 2.0])],
        vec![feasible([1.0, 4.0]), feasible([4.0, 1.0])],
        &mut context,
      )
      .unwrap();
    let mut survivors = objectives(&next);
    survivors.sort_by(|a, b| a[0].total_cmp(&b[0]));
    assert_eq!(survivors, vec![[1.0, 4.0], [4.0, 1.0]]);
    let fitness = context.fitness().unwrap();
    assert_eq!(fitness.len(), 2);
    assert!(fitness.iter().all(|&f| f < 1.0));
  }

  #[test]
  fn test_spea2_fills_environment_by_fitness() {
    let mut context = SelectionContext::new();
    let next = Replacement::Spea2
      .select(
        vec![feasible([3.0, 3.0]), feasible([1.0, 1.0]), feasible([2.0, 2.0])],
        vec![feasible([4.0, 4.0])],
        &mut context,
      )
      .unwrap();
    assert_eq!(objectives(&next), vec![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]);
    let fitness = context.fitness().unwrap();
    assert!(fitness[0] < 1.0);
    assert!(fitness[1] < fitness[2]);
  }

  #[test]
  fn test_spea2_truncates_crowded_environment() {
    let mut context = SelectionContext::new();
    let next = Replacement::Spea2
      .select(
        vec![feasible([0.0, 5.0]), feasible([1.0, 4.0]), feasible([5.0, 0.0])],
        vec![feasible([1.1, 3.9])],
        &mut context,
      )
      .unwrap();
    // (1, 4) and (1.1, 3.9) are each other's nearest neighbors, the second
    // nearest of (1, 4) is closer
    assert_eq!(objectives(&next), vec![[0.0, 5.0], [5.0, 0.0], [1.1, 3.9]]);

    let next = Replacement::Spea2
      .select(
        vec![feasible([0.0, 5.0]), feasible([1.0, 4.0])],
        vec![feasible([1.1, 3.9]), feasible([5.0, 0.0])],
        &mut context,
      )
      .unwrap();
    // (1.1, 3.9) goes next, its second nearest is 5.5 away against 7.07
    assert_eq!(objectives(&next), vec![[0.0, 5.0], [5.0, 0.0]]);
    assert_eq!(context.fitness().unwrap().len(), 2);
  }

  #[test]
  fn test_contribution_removal_drops_least_contributor() {
    let mut context = SelectionContext::new();
    let next = Replacement::ContributionRemoval
      .select(
        vec![feasible([1.0, 3.0]), feasible([3.0, 1.0])],
        vec![feasible([1.5, 2.5])],
        &mut context,
      )
      .unwrap();
    // contributions with reference (4, 4) are 0.5, 1.5 and 0.75
    assert_eq!(objectives(&next), vec![[3.0, 1.0], [1.5, 2.5]]);
  }

  #[test]
  fn test_contribution_removal_drops_dominated_and_infeasible() {
    let mut context = SelectionContext::new();
    let next = Replacement::ContributionRemoval
      .select(
        vec![feasible([1.0, 1.0])],
        vec![feasible([2.0, 2.0])],
        &mut context,
      )
      .unwrap();
    assert_eq!(objectives(&next), vec![[1.0, 1.0]]);

    let next = Replacement::ContributionRemoval
      .select(
        vec![feasible([3.0, 3.0]), infeasible([0.0, 0.0], 2.0)],
        vec![infeasible([0.0, 1.0], 2.0), infeasible([1.0, 0.0], 1.0)],
        &mut context,
      )
      .unwrap();
    assert_eq!(next.len(), 2);
    assert!(next[0].is_feasible());
    assert_eq!(next[1].violation(), 1.0);
  }

  #[test]
  fn test_selection_preserves_population_size() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut random = |n: usize| -> Vec<Solution<2>> {
      (0..n)
        .map(|_| {
          let objectives = [rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)];
          if rng.gen_bool(0.2) {
            infeasible(objectives, rng.gen_range(0.1..1.0))
          } else {
            feasible(objectives)
          }
        })
        .collect()
    };
    for strategy in [
      Replacement::Elitist,
      Replacement::Spea2,
      Replacement::ContributionRemoval,
    ] {
      let mut context = SelectionContext::new();
      for (size, offspring) in [(1, 0), (1, 1), (5, 5), (8, 3), (10, 17)] {
        let next = strategy
          .select(random(size), random(offspring), &mut context)
          .unwrap();
        assert_eq!(next.len(), size, "{strategy:?}");
      }
    }
  }

  #[test]
  fn test_fitness_cache_is_recomputed_on_size_change() {
    let mut context = SelectionContext::new();
    assert_eq!(context.fitness_of(&front()).len(), 4);
    assert_eq!(context.fitness_of(&front()[..2]).len(), 2);
    context.clear();
    assert!(context.fitness().is_none());
  }

  fn marked(position: f64, objectives: [f64; 2]) -> Solution<2> {
    Solution::new(
      vec![position],
      Evaluation::unconstrained(objectives),
      0.0,
    )
  }

  fn positions<const N: usize>(population: &[Solution<N>]) -> Vec<f64> {
    population.iter().map(|s| s.position()[0]).collect()
  }

  #[test]
  fn test_contribution_removal_ties_remove_first() {
    let mut context = SelectionContext::new();
    // contributions with reference (4, 4) are all 1
    let next = Replacement::ContributionRemoval
      .select(
        vec![marked(0.0, [1.0, 3.0]), marked(1.0, [2.0, 2.0])],
        vec![marked(2.0, [3.0, 1.0])],
        &mut context,
      )
      .unwrap();
    assert_eq!(positions(&next), vec![1.0, 2.0]);

    // a front of equal solutions contributes nothing anywhere
    let next = Replacement::ContributionRemoval
      .select(
        vec![marked(0.0, [1.0, 1.0]), marked(1.0, [1.0, 1.0])],
        vec![marked(2.0, [1.0, 1.0]), marked(3.0, [1.0, 1.0])],
        &mut context,
      )
      .unwrap();
    assert_eq!(positions(&next), vec![2.0, 3.0]);
  }

  #[test]
  fn test_contribution_removal_empties_worst_fronts_first() {
    let mut context = SelectionContext::new();
    let next = Replacement::ContributionRemoval
      .select(
        vec![
          marked(0.0, [3.0, 3.0]),
          marked(1.0, [1.0, 2.0]),
          marked(2.0, [4.0, 4.0]),
        ],
        vec![marked(3.0, [2.0, 1.0]), marked(4.0, [2.5, 2.5])],
        &mut context,
      )
      .unwrap();
    assert_eq!(positions(&next), vec![1.0, 3.0, 4.0]);
  }

  #[test]
  fn test_contribution_removal_three_objectives() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut random = |n: usize| -> Vec<Solution<3>> {
      (0..n)
        .map(|_| {
          let a: f64 = rng.gen_range(0.0..1.0);
          let b: f64 = rng.gen_range(0.0..1.0);
          // points on the simplex `f1 + f2 + f3 = 1` are mutually
          // non-dominated
          feasible([a * b, a * (1.0 - b), 1.0 - a])
        })
        .collect()
    };
    let mut context = SelectionContext::new();
    let population = random(60);
    let offspring = random(60);
    let next = Replacement::ContributionRemoval
      .select(population, offspring, &mut context)
      .unwrap();
    assert_eq!(next.len(), 60);

    // with reference (2, 2, 2) the compromise contributes 0.294, every
    // extreme at least 0.51
    let next = Replacement::ContributionRemoval
      .select(
        vec![
          feasible([0.0, 0.0, 1.0]),
          feasible([0.0, 1.0, 0.0]),
          feasible([1.0, 0.0, 0.0]),
        ],
        vec![feasible([0.3, 0.3, 0.4])],
        &mut context,
      )
      .unwrap();
    assert_eq!(
      objectives(&next),
      vec![[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]
    );
  }
}
