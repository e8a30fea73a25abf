//! **rigsite** encodes and evaluates the multi-objective *platform location
//! problem*: where to build oil platforms, at which capacity tier, and which
//! wells each of them should drill, when construction cost, oil production
//! and environmental damage pull in different directions.
//!
//! Here's a [quick start example](#example) for the impatient.
//!
//! This crate does not search for solutions. Selection, crossover,
//! mutation, non-dominated sorting and the rest of an evolutionary algorithm
//! belong to whatever optimizer you plug it into. What the crate provides is
//! the part that is specific to the problem:
//! - **Parameters** - cost, production, capacity and damage tables, validated
//!   once and shared read-only, see [`ProblemParameters`]
//! - **Encoding** - the mapping between a flat decision vector, which is what
//!   an optimizer manipulates, and the assignment matrix `x` (platform x well)
//!   plus the capacity-selection matrix `y` (platform x tier), see [`decode`]
//! - **Evaluation** - the three objectives and the constraint vector of a
//!   decision vector, see [`Problem`]
//! - **Batch evaluation** - the interface an optimizer calls once per
//!   population, optionally parallelized, see [`BatchEvaluator`]
//!
//! # Decision vectors
//!
//! A problem with `I` platforms, `J` wells and `K` capacity tiers is encoded
//! in `I * J + I * K` variables, each in `[0, 1]`. The first `I * J` are
//! `x[i][j]`, "platform `i` serves well `j`", row by row. The remaining
//! `I * K` are `y[i][k]`, "platform `i` is built at tier `k`". Whether the
//! variables are relaxed reals or strict bits is up to the optimizer's
//! variable bounds, see [`Domain`]. The crate never clamps them.
//!
//! # Objectives and constraints
//!
//! Every objective is minimized: cost, *negated* production and damage. The
//! constraints are satisfied when they are `<= 0`:
//! - coverage: each well is served by at most one platform, or, in the
//!   alternate [`CoverageMode::PlatformRow`] formulation, each platform
//!   serves at most one well
//! - tier: each platform is built at, at most, one capacity tier
//! - capacity: production assigned to a platform fits the tier built for it
//!
//! The order of the constraints is fixed, since optimizers address them by
//! position. [`Problem::constraint_kinds`] tells what each position means.
//!
//! # Parallelization
//!
//! Evaluation is a pure function of the decision vector and the shared
//! parameters, so batches parallelize without any synchronization. Call
//! [`par_each()`] or [`par_batch()`] on a problem, or on any [`Evaluate`]
//! closure, and its [`BatchEvaluator`] runs on the [rayon] thread pool:
//! ```
//! # use rigsite::*;
//! let problem = Problem::new(ProblemParameters::reference());
//! let population = vec![vec![0.5; problem.num_variables()]; 100];
//! let results = problem.par_batch().evaluate_batch(&population).unwrap();
//! assert_eq!(results.len(), 100);
//! ```
//!
//! A single evaluation is cheap. For small instances the overhead of
//! parallelization usually only decreases performance, but when you need
//! it, *you need it*. Benchmark, if in doubt.
//!
//! # Example
//!
//! One platform, two wells and a single capacity tier that is exactly big
//! enough for both wells:
//! ```
//! use rigsite::{ParameterTables, Problem, ProblemParameters};
//!
//! let parameters = ProblemParameters::new(
//!   ParameterTables::builder()
//!     .drill_cost(vec![vec![1.0, 1.0]])
//!     .build_cost(vec![vec![0.0]])
//!     .well_production(vec![10.0, 10.0])
//!     .platform_capacity(vec![20.0])
//!     .build(),
//! )
//! .unwrap();
//! let problem = Problem::new(parameters);
//! // x = [1, 1], y = [1]
//! let result = problem.evaluate(&[1.0, 1.0, 1.0]).unwrap();
//! assert_eq!(result.objectives, [2.0, -20.0, 0.0]);
//! // one coverage value per well, then tier and capacity of the platform
//! assert_eq!(result.constraints, vec![0.0, 0.0, 0.0, 0.0]);
//! assert!(result.is_feasible());
//! ```
//!
//! [`par_each()`]: crate::operator::IntoPar::par_each
//! [`par_batch()`]: crate::operator::IntoPar::par_batch

#![warn(missing_docs)]

pub mod encoding;
pub mod error;
pub mod evaluation;
pub mod evaluator;
pub mod execution;
pub mod matrix;
pub mod operator;
pub mod parameters;
pub mod score;

pub use encoding::{decode, encode, Domain};
pub use error::{ConfigError, ParameterDimensionError, ShapeError};
pub use evaluation::{
  ConstraintKind,
  CoverageMode,
  EvaluationResult,
  Problem,
};
pub use evaluator::{BatchEvaluator, Evaluate, Evaluator};
pub use operator::IntoPar;
pub use parameters::{Dimensions, ParameterTables, ProblemParameters};
