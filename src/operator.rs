//! Wrappers that mark an evaluator for parallel execution.

use std::ops::Deref;

use crate::evaluator::Evaluate;

/// A wrapper around an evaluator that marks it to be executed in parallel
/// for **each** candidate.
#[derive(Debug, Clone, Copy)]
pub struct ParEach<E> {
  evaluator: E,
}

impl<E> Deref for ParEach<E> {
  type Target = E;

  fn deref(&self) -> &Self::Target {
    &self.evaluator
  }
}

/// A wrapper around an evaluator that marks it to be executed in parallel
/// for each **batch** of candidates.
#[derive(Debug, Clone, Copy)]
pub struct ParBatch<E> {
  evaluator: E,
}

impl<E> Deref for ParBatch<E> {
  type Target = E;

  fn deref(&self) -> &Self::Target {
    &self.evaluator
  }
}

/// Conversion of an [`Evaluate`] into a parallelized evaluator.
pub trait IntoPar: Sized {
  /// Creates a wrapper around given evaluator that marks it to be executed
  /// in parallel for **each** candidate.
  ///
  /// **Parallelization is implemented with [rayon]. A single evaluation is
  /// a handful of dot products, so for small batches the overhead may only
  /// decrease performance. Benchmark if in doubt.**
  fn par_each(self) -> ParEach<Self> {
    ParEach { evaluator: self }
  }

  /// Creates a wrapper around given evaluator that marks it to be executed
  /// in parallel for each **batch** of candidates.
  /// The size of a batch is calculated in such a way as to evenly
  /// distribute the candidates across all available threads.
  ///
  /// **Parallelization is implemented with [rayon]. A single evaluation is
  /// a handful of dot products, so for small batches the overhead may only
  /// decrease performance. Benchmark if in doubt.**
  fn par_batch(self) -> ParBatch<Self> {
    ParBatch { evaluator: self }
  }
}

impl<E> IntoPar for E where E: Evaluate + Sync {}
