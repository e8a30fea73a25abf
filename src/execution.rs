//! Execution strategy markers.
//!
//! A [`BatchEvaluator`] is implemented once per strategy. The strategy is a
//! type parameter of the trait, so the implementation is picked by the type
//! of the evaluator: a plain evaluator runs sequentially, one wrapped with
//! [`par_each()`] or [`par_batch()`] runs on the [rayon] thread pool.
//!
//! [`BatchEvaluator`]: crate::evaluator::BatchEvaluator
//! [`par_each()`]: crate::operator::IntoPar::par_each
//! [`par_batch()`]: crate::operator::IntoPar::par_batch

/// Sequential execution strategy marker, i.e. no parallelization involved.
pub enum Sequential {}

/// Parallel execution strategy marker, parallelizes evaluation of **each**
/// candidate.
pub enum ParallelEach {}

/// Parallel execution strategy marker, parallelizes evaluation of
/// **batches** of candidates. The batches are sized to split the work
/// equally between the available threads.
pub enum ParallelBatch {}

/// Custom execution strategy marker, the evaluator handles the whole batch
/// itself.
pub enum Custom {}
