//! The evaluation capability handed to an external search procedure.
//!
//! A search procedure (an NSGA-II implementation, a random sampler, ...)
//! only needs two things from this crate: a way to evaluate one candidate,
//! [`Evaluate`], and a way to evaluate a whole population,
//! [`BatchEvaluator`]. Every [`Evaluate`] is a [`BatchEvaluator`] that runs
//! sequentially; wrap it with [`par_each()`] or [`par_batch()`] to spread the
//! batch over the [rayon] thread pool. A search that wants full control over
//! a batch can supply an [`Evaluator`] instead.
//!
//! Every strategy returns results in the order of the candidates, identical
//! to evaluating each candidate alone. If candidates are malformed, the error
//! of the first of them is returned.
//!
//! # Examples
//! ```
//! # use rigsite::{evaluator::BatchEvaluator, operator::IntoPar};
//! # use rigsite::{evaluation::Problem, parameters::ProblemParameters};
//! let problem = Problem::new(ProblemParameters::reference());
//! let population = vec![vec![0.0; 36], vec![1.0; 36]];
//! let sequential = problem.evaluate_batch(&population).unwrap();
//! let parallel = problem.clone().par_batch().evaluate_batch(&population).unwrap();
//! assert_eq!(sequential, parallel);
//! ```
//!
//! [`par_each()`]: crate::operator::IntoPar::par_each
//! [`par_batch()`]: crate::operator::IntoPar::par_batch

use rayon::prelude::*;

use crate::{
  error::ShapeError,
  evaluation::{EvaluationResult, Problem},
  execution::*,
  operator::{ParBatch, ParEach},
};

/// Evaluates a single candidate decision vector.
///
/// Implemented by [`Problem`] and by closures of type
/// `Fn(&[f64]) -> Result<EvaluationResult, ShapeError>`, which makes it easy
/// to wrap a problem, e.g. to count evaluations.
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Evaluate {
  /// Returns objective scores and constraint values of `candidate`.
  fn evaluate(&self, candidate: &[f64])
    -> Result<EvaluationResult, ShapeError>;
}

impl<F> Evaluate for F
where
  F: Fn(&[f64]) -> Result<EvaluationResult, ShapeError>,
{
  fn evaluate(
    &self,
    candidate: &[f64],
  ) -> Result<EvaluationResult, ShapeError> {
    self(candidate)
  }
}

impl Evaluate for Problem {
  fn evaluate(
    &self,
    candidate: &[f64],
  ) -> Result<EvaluationResult, ShapeError> {
    Problem::evaluate(self, candidate)
  }
}

/// Evaluates a whole batch of candidates at once.
///
/// Implemented by closures of type
/// `Fn(&[V]) -> Result<Vec<EvaluationResult>, ShapeError>`.
///
/// # Panics
///
/// Doesn't panic itself, but a search procedure will misbehave if this
/// function returns a different number of results than the number of
/// candidates.
pub trait Evaluator<V> {
  /// Returns a result per candidate, in the order of `candidates`.
  fn evaluate(
    &self,
    candidates: &[V],
  ) -> Result<Vec<EvaluationResult>, ShapeError>;
}

impl<V, F> Evaluator<V> for F
where
  F: Fn(&[V]) -> Result<Vec<EvaluationResult>, ShapeError>,
{
  fn evaluate(
    &self,
    candidates: &[V],
  ) -> Result<Vec<EvaluationResult>, ShapeError> {
    self(candidates)
  }
}

/// Batch evaluation with a given execution strategy. This is the interface a
/// search procedure calls.
///
/// The strategy is inferred from the evaluator's type, see
/// [`execution`](crate::execution).
pub trait BatchEvaluator<V, ExecutionStrategy> {
  /// Evaluates every candidate, optionally parallelizing the work.
  fn evaluate_batch(
    &self,
    candidates: &[V],
  ) -> Result<Vec<EvaluationResult>, ShapeError>;
}

impl<V, E> BatchEvaluator<V, Custom> for E
where
  E: Evaluator<V>,
{
  fn evaluate_batch(
    &self,
    candidates: &[V],
  ) -> Result<Vec<EvaluationResult>, ShapeError> {
    Evaluator::evaluate(self, candidates)
  }
}

impl<V, E> BatchEvaluator<V, Sequential> for E
where
  V: AsRef<[f64]>,
  E: Evaluate,
{
  fn evaluate_batch(
    &self,
    candidates: &[V],
  ) -> Result<Vec<EvaluationResult>, ShapeError> {
    candidates
      .iter()
      .map(|c| Evaluate::evaluate(self, c.as_ref()))
      .collect()
  }
}

impl<V, E> BatchEvaluator<V, ParallelEach> for ParEach<E>
where
  V: AsRef<[f64]> + Sync,
  E: Evaluate + Sync,
{
  fn evaluate_batch(
    &self,
    candidates: &[V],
  ) -> Result<Vec<EvaluationResult>, ShapeError> {
    log::debug!("evaluating {} candidates in parallel", candidates.len());
    let results: Vec<_> = candidates
      .par_iter()
      .map(|c| Evaluate::evaluate(&**self, c.as_ref()))
      .collect();
    // collected sequentially so the first malformed candidate wins
    results.into_iter().collect()
  }
}

impl<V, E> BatchEvaluator<V, ParallelBatch> for ParBatch<E>
where
  V: AsRef<[f64]> + Sync,
  E: Evaluate + Sync,
{
  fn evaluate_batch(
    &self,
    candidates: &[V],
  ) -> Result<Vec<EvaluationResult>, ShapeError> {
    let chunk_size = (candidates.len() / rayon::current_num_threads()).max(1);
    log::debug!(
      "evaluating {} candidates in parallel batches of {chunk_size}",
      candidates.len()
    );
    let results: Vec<_> = candidates
      .par_chunks(chunk_size)
      .flat_map_iter(|chunk| {
        chunk.iter().map(|c| Evaluate::evaluate(&**self, c.as_ref()))
      })
      .collect();
    results.into_iter().collect()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use rand::{rngs::StdRng, SeedableRng};

  use super::*;
  use crate::{
    evaluation::CoverageMode,
    operator::IntoPar,
    parameters::ProblemParameters,
  };

  type Candidate = Vec<f64>;

  fn takes_batch_evaluator<ES, E: BatchEvaluator<Candidate, ES>>(e: &E) {
    assert!(e.evaluate_batch(&[]).unwrap().is_empty());
  }

  fn population(problem: &Problem, size: usize, seed: u64) -> Vec<Candidate> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size)
      .map(|_| problem.domain().sample(problem.dimensions(), &mut rng))
      .collect()
  }

  #[test]
  fn test_evaluate_from_problem() {
    let problem = Problem::new(ProblemParameters::reference());
    takes_batch_evaluator(&problem);
    takes_batch_evaluator(&problem.clone().par_each());
    takes_batch_evaluator(&problem.par_batch());
  }

  #[test]
  fn test_evaluate_from_closure() {
    let problem = Problem::new(ProblemParameters::reference());
    let evaluate = |c: &[f64]| problem.evaluate(c);
    takes_batch_evaluator(&evaluate);
    takes_batch_evaluator(&evaluate.par_each());
    takes_batch_evaluator(&evaluate.par_batch());
  }

  #[test]
  fn test_evaluator_from_closure() {
    let problem = Problem::new(ProblemParameters::reference());
    let evaluator =
      |candidates: &[Candidate]| -> Result<Vec<EvaluationResult>, ShapeError> {
        candidates.iter().map(|c| problem.evaluate(c)).collect()
      };
    takes_batch_evaluator(&evaluator);
  }

  #[test]
  fn test_custom_evaluate() {
    struct Infeasible {}
    impl Evaluate for Infeasible {
      fn evaluate(
        &self,
        _: &[f64],
      ) -> Result<EvaluationResult, ShapeError> {
        Ok(EvaluationResult {
          objectives: [0.0; 3],
          constraints: vec![1.0],
        })
      }
    }

    let evaluate = Infeasible {};
    let results = evaluate.evaluate_batch(&[vec![0.0]]).unwrap();
    assert!(!results[0].is_feasible());
    takes_batch_evaluator(&evaluate.par_batch());
  }

  #[test]
  fn test_batch_matches_individual_evaluation() {
    for coverage in [CoverageMode::WellCoverage, CoverageMode::PlatformRow] {
      let problem = Problem::builder()
        .parameters(ProblemParameters::reference())
        .coverage(coverage)
        .build();
      let candidates = population(&problem, 257, 5);
      let individual: Vec<_> = candidates
        .iter()
        .map(|c| problem.evaluate(c).unwrap())
        .collect();

      let sequential = problem.evaluate_batch(&candidates).unwrap();
      let par_each = problem.clone().par_each().evaluate_batch(&candidates);
      let par_batch = problem.clone().par_batch().evaluate_batch(&candidates);

      assert_eq!(sequential, individual);
      assert_eq!(par_each.unwrap(), individual);
      assert_eq!(par_batch.unwrap(), individual);
    }
  }

  #[test]
  fn test_candidates_as_arrays() {
    let problem = Problem::new(ProblemParameters::reference());
    let candidates = [[1.0; 36], [0.0; 36]];
    let results = problem.par_each().evaluate_batch(&candidates).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].objectives, [0.0; 3]);
  }

  #[test]
  fn test_first_malformed_candidate_is_reported() {
    let problem = Problem::new(ProblemParameters::reference());
    let mut candidates = population(&problem, 64, 9);
    candidates[10].pop();
    candidates[40].push(0.0);
    let expected = Err(ShapeError {
      expected: 36,
      actual: 35,
    });
    assert_eq!(problem.evaluate_batch(&candidates), expected);
    assert_eq!(
      problem.clone().par_each().evaluate_batch(&candidates),
      expected
    );
    assert_eq!(problem.par_batch().evaluate_batch(&candidates), expected);
  }

  #[test]
  fn test_every_candidate_is_evaluated_once() {
    let problem = Problem::new(ProblemParameters::reference());
    let calls = AtomicUsize::new(0);
    let counting = |c: &[f64]| {
      calls.fetch_add(1, Ordering::Relaxed);
      problem.evaluate(c)
    };
    let candidates = population(&problem, 100, 1);
    counting.par_batch().evaluate_batch(&candidates).unwrap();
    assert_eq!(calls.load(Ordering::Relaxed), 100);
  }
}
