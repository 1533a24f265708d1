//! **MOEA** is a small engine of Multi-Objective Evolutionary Algorithms for
//! continuous, box-constrained problems with optional inequality and
//! equality constraints. It strives to be simple, deterministic under a
//! fixed seed and highly focused on usage of closures.
//!
//! Here's a [quick start example](#example) for the impatient.
//!
//! # Workflow
//!
//! An [`Optimizer`] owns a population of `N` [`Solution`]s and repeats a
//! generation loop until its [`Terminator`] fires:
//! 1. **Select** `N` parents with tournaments
//! 2. **Recombine** them with [simulated binary crossover]
//! 3. **Mutate** each child with [polynomial mutation] and clamp it into
//!    [`Bounds`]
//! 4. **Evaluate** each child exactly once with the user's [`Evaluator`]
//! 5. **Replace**: let the [`Replacement`] strategy pick `N` survivors out of
//!    parents and offspring
//!
//! Every decision on which solution is better goes through a single
//! feasibility-first [comparator]: a feasible solution beats an infeasible
//! one, two infeasible ones are ordered by their sum of constraint violation
//! and two feasible ones by Pareto dominance. All objectives are minimized.
//!
//! # Replacement strategies
//!
//! | Strategy                               | Survivors                                                   |
//! |:---------------------------------------|:------------------------------------------------------------|
//! | [`Replacement::Generational`]          | the offspring                                               |
//! | [`Replacement::Elitist`]               | the best `N` by non-dominated rank                          |
//! | [`Replacement::Spea2`]                 | [SPEA2] environmental selection with nearest-neighbor truncation |
//! | [`Replacement::ContributionRemoval`]   | [SMS-EMOA]: the worst front loses its least hypervolume contributor until `N` remain |
//!
//! The building blocks of these strategies are public, so you can use them
//! on their own: [`non_dominated_sort`], [`strength_fitness`],
//! [`truncation`], [`hypervolume`] and [`contributions`],
//! [`crowding_distance`].
//!
//! # Closures
//!
//! An [`Evaluator`] is implemented by any closure of type
//! `Fn(&[f64]) -> Result<Evaluation<N>, E>` where `E` converts into a boxed
//! error, and a [`Terminator`] by any closure of type
//! `FnMut(&Status) -> bool`. The number of objectives `N` is a const generic
//! inferred from the evaluator.
//!
//! If the evaluator fails, the run stops and the failure is returned as
//! [`Error::Evaluation`] together with the offending position. Nothing is
//! retried.
//!
//! # Parallelization
//!
//! Evaluation is the only phase that runs in parallel. Call [`par_each()`]
//! or [`par_batch()`] on an evaluator to evaluate each candidate, or each
//! batch of candidates, on the [rayon] thread pool. Results are always
//! collected in order, so a seeded run stays reproducible:
//! ```
//! # use moea::{Evaluation, IntoPar};
//! # use std::convert::Infallible;
//! let evaluator = |x: &[f64]| {
//!   Ok::<_, Infallible>(Evaluation::unconstrained([x[0], 1.0 - x[0]]))
//! };
//! let evaluator = evaluator.par_batch();
//! ```
//!
//! For cheap objective functions the overhead of parallelization usually
//! only decreases performance. Benchmark, if in doubt.
//!
//! # Logging
//!
//! The crate reports its progress through the [log] facade: one `info`
//! record when a run starts and ends, one `debug` record per generation and
//! `trace` records from inside the selection strategies. Install any logger,
//! e.g. `env_logger`, to see them.
//!
//! # Example
//!
//! Here's a solution for the textbook *Schaffer's Problem No.1* with the
//! [SPEA2] strategy.
//! ```no_run
//! use std::convert::Infallible;
//!
//! use moea::{
//!   pareto_front, Bounds, Evaluation, GenerationTerminator, Optimizer,
//!   Parameters, Replacement,
//! };
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! # fn main() -> moea::Result<()> {
//! // objective functions `f1(x) = x^2` and `f2(x) = (x - 2)^2`
//! let schaffer = |x: &[f64]| {
//!   Ok::<_, Infallible>(Evaluation::unconstrained([
//!     x[0].powi(2),
//!     (x[0] - 2.0).powi(2),
//!   ]))
//! };
//! // a convenient builder with compile time verification from `typed-builder`
//! let optimizer = Optimizer::builder()
//!   .parameters(Parameters::builder().population_size(100).build())
//!   .bounds(Bounds::uniform(1, -1000.0, 1000.0)?)
//!   .evaluator(schaffer)
//!   .replacement(Replacement::Spea2)
//!   .terminator(GenerationTerminator(250))
//!   .rng(StdRng::seed_from_u64(42))
//!   .build();
//! let population = optimizer.optimize()?;
//! // the Pareto optimal set of this problem is `0 <= x <= 2`
//! for solution in pareto_front(&population) {
//!   println!("{:?} -> {:?}", solution.position(), solution.objectives());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! You can find more examples in the *demos* folder in the root of the
//! project.
//!
//! [simulated binary crossover]: crate::recombination::SimulatedBinaryCrossover
//! [polynomial mutation]: crate::mutation::PolynomialMutation
//! [comparator]: crate::comparator::compare
//! [`par_each()`]: crate::execution::IntoPar::par_each
//! [`par_batch()`]: crate::execution::IntoPar::par_batch
//! [`non_dominated_sort`]: crate::fitness::non_dominated_sort
//! [`strength_fitness`]: crate::fitness::strength_fitness
//! [`truncation`]: crate::distance::truncation
//! [`crowding_distance`]: crate::distance::crowding_distance
//! [`hypervolume`]: crate::hypervolume::hypervolume
//! [`contributions`]: crate::hypervolume::contributions
//! [SPEA2]: https://www.research-collection.ethz.ch/bitstream/handle/20.500.11850/145755/eth-24689-01.pdf
//! [SMS-EMOA]: https://doi.org/10.1016/j.ejor.2006.08.008

#![warn(missing_docs)]

pub mod bounds;
pub mod comparator;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod execution;
pub mod fitness;
pub mod hypervolume;
pub mod mutation;
pub mod optimizer;
pub mod parameters;
pub mod population;
pub mod recombination;
pub mod replacement;
pub mod score;
pub mod selection;
pub mod solution;
pub mod termination;

pub use bounds::Bounds;
pub use error::{Error, Result};
pub use evaluation::Evaluator;
pub use execution::IntoPar;
pub use optimizer::Optimizer;
pub use parameters::Parameters;
pub use population::pareto_front;
pub use replacement::{Replacement, SelectionContext};
pub use solution::{Evaluation, Solution};
pub use termination::{Budget, GenerationTerminator, Status, Terminator};
