//! Objective and constraint computation for the platform location problem.
//!
//! A [`Problem`] pairs shared [`ProblemParameters`] with the interpretation
//! of the coverage constraint. It evaluates decision vectors into an
//! [`EvaluationResult`]: three minimized objectives and a constraint vector
//! whose entries are satisfied when they are `<= 0`.
//!
//! # Objectives
//!
//! With `x` the assignment matrix and `y` the capacity-selection matrix:
//! - cost: `Σij c[i][j]·x[i][j] + Σik f[i][k]·y[i][k]`
//! - production: `-Σij a[j]·x[i][j]`. A well served by several platforms is
//!   counted once per platform, the coverage constraint is what rules that
//!   out.
//! - damage: `Σi (Σj (DW[j] + DQ[i][j])·x[i][j] + Σk (DO[i] + DP[i][k])·y[i][k])`
//!
//! # Constraints
//!
//! - coverage, see [`CoverageMode`]
//! - tier: `Σk y[i][k] - 1` for every platform
//! - capacity: `Σj a[j]·x[i][j] - Σk b[k]·y[i][k]` for every platform
//!
//! The position of every constraint is fixed by the coverage mode and can be
//! looked up with [`Problem::constraint_kinds`].

use std::sync::Arc;

use itertools::izip;
use typed_builder::TypedBuilder;

use crate::{
  encoding::{decode, AssignmentMatrix, CapacitySelectionMatrix, Domain},
  error::ShapeError,
  parameters::{Dimensions, ProblemParameters},
  score::{Score, Scores, COST, DAMAGE, OBJECTIVE_NUM, PRODUCTION},
};

/// Interpretation of the coverage constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverageMode {
  /// Every well is served by at most one platform: `Σi x[i][j] - 1` for
  /// every well `j`.
  ///
  /// The constraint vector starts with one coverage entry per well, followed
  /// by a `(tier, capacity)` pair per platform, `J + 2I` entries in total.
  #[default]
  WellCoverage,
  /// Every platform serves at most one well: `Σj x[i][j] - 1` for every
  /// platform `i`.
  ///
  /// The constraint vector holds a `(coverage, tier, capacity)` triplet per
  /// platform, `3I` entries in total.
  PlatformRow,
}

/// What a single entry of the constraint vector measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
  /// Number of platforms serving the well, minus one.
  WellCoverage {
    /// Index of the well.
    well: usize,
  },
  /// Number of wells served by the platform, minus one.
  PlatformRow {
    /// Index of the platform.
    platform: usize,
  },
  /// Number of capacity tiers selected for the platform, minus one.
  Tier {
    /// Index of the platform.
    platform: usize,
  },
  /// Production assigned to the platform in excess of its capacity.
  Capacity {
    /// Index of the platform.
    platform: usize,
  },
}

/// Objective scores and constraint values of a single candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
  /// `[cost, -production, damage]`, all minimized.
  pub objectives: Scores<OBJECTIVE_NUM>,
  /// Constraint values, satisfied when `<= 0`.
  pub constraints: Vec<Score>,
}

impl EvaluationResult {
  /// Construction and drilling cost.
  pub fn cost(&self) -> Score {
    self.objectives[COST]
  }

  /// Oil production, with its natural sign.
  pub fn production(&self) -> Score {
    -self.objectives[PRODUCTION]
  }

  /// Environmental damage.
  pub fn damage(&self) -> Score {
    self.objectives[DAMAGE]
  }

  /// Whether every constraint is satisfied, i.e. `<= 0`.
  ///
  /// A `NaN` constraint is never satisfied.
  pub fn is_feasible(&self) -> bool {
    self.constraints.iter().all(|g| *g <= 0.0)
  }

  /// Sum of the positive parts of the constraints, `0` for a feasible
  /// candidate.
  pub fn violation(&self) -> Score {
    self.constraints.iter().map(|g| g.max(0.0)).sum()
  }
}

/// The platform location problem: parameters plus the formulation choices.
///
/// Cloning is cheap, the parameters are shared.
///
/// The [`Domain`] only matters to whoever samples candidates and to
/// [`Domain::contains`]. Both domains share the `[0, 1]` bounds and every
/// vector is evaluated the same way, `Domain::Binary` does not round.
///
/// # Examples
/// ```
/// # use rigsite::{evaluation::{CoverageMode, Problem}, parameters::ProblemParameters};
/// let problem = Problem::builder()
///   .parameters(ProblemParameters::reference())
///   .coverage(CoverageMode::PlatformRow)
///   .build();
/// assert_eq!(problem.num_variables(), 36);
/// assert_eq!(problem.num_constraints(), 9);
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct Problem {
  #[builder(setter(into))]
  parameters: Arc<ProblemParameters>,
  #[builder(default)]
  coverage: CoverageMode,
  #[builder(default)]
  domain: Domain,
}

impl Problem {
  /// A problem with the default well coverage constraint and continuous
  /// variables.
  pub fn new(parameters: impl Into<Arc<ProblemParameters>>) -> Self {
    Self::builder().parameters(parameters).build()
  }

  /// The shared parameters.
  pub fn parameters(&self) -> &ProblemParameters {
    &self.parameters
  }

  /// The coverage constraint interpretation.
  pub fn coverage(&self) -> CoverageMode {
    self.coverage
  }

  /// The domain of the decision variables.
  pub fn domain(&self) -> Domain {
    self.domain
  }

  /// Sizes of the index sets.
  pub fn dimensions(&self) -> Dimensions {
    self.parameters.dimensions()
  }

  /// Length of a decision vector.
  pub fn num_variables(&self) -> usize {
    self.dimensions().decision_len()
  }

  /// Number of objectives, always 3.
  pub fn num_objectives(&self) -> usize {
    OBJECTIVE_NUM
  }

  /// Length of the constraint vector.
  pub fn num_constraints(&self) -> usize {
    let Dimensions {
      platforms, wells, ..
    } = self.dimensions();
    match self.coverage {
      CoverageMode::WellCoverage => wells + 2 * platforms,
      CoverageMode::PlatformRow => 3 * platforms,
    }
  }

  /// Lower and upper bounds of every decision variable.
  pub fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
    self.domain.bounds(self.dimensions())
  }

  /// The meaning of every position of the constraint vector.
  pub fn constraint_kinds(&self) -> Vec<ConstraintKind> {
    let Dimensions {
      platforms, wells, ..
    } = self.dimensions();
    match self.coverage {
      CoverageMode::WellCoverage => (0..wells)
        .map(|well| ConstraintKind::WellCoverage { well })
        .chain((0..platforms).flat_map(|platform| {
          [
            ConstraintKind::Tier { platform },
            ConstraintKind::Capacity { platform },
          ]
        }))
        .collect(),
      CoverageMode::PlatformRow => (0..platforms)
        .flat_map(|platform| {
          [
            ConstraintKind::PlatformRow { platform },
            ConstraintKind::Tier { platform },
            ConstraintKind::Capacity { platform },
          ]
        })
        .collect(),
    }
  }

  /// Decodes `vector` and computes its objectives and constraints.
  pub fn evaluate(
    &self,
    vector: &[f64],
  ) -> Result<EvaluationResult, ShapeError> {
    let (x, y) = decode(vector, self.dimensions())?;
    Ok(EvaluationResult {
      objectives: [
        self.cost(&x, &y),
        -self.production(&x),
        self.damage(&x, &y),
      ],
      constraints: self.constraints(&x, &y),
    })
  }

  /// Drilling plus building cost.
  pub fn cost(
    &self,
    x: &AssignmentMatrix,
    y: &CapacitySelectionMatrix,
  ) -> Score {
    let p = &*self.parameters;
    let drilling: Score = x
      .iter_rows()
      .enumerate()
      .map(|(i, row)| dot(p.drill_cost(i), row))
      .sum();
    let building: Score = y
      .iter_rows()
      .enumerate()
      .map(|(i, row)| dot(p.build_cost(i), row))
      .sum();
    drilling + building
  }

  /// Total production of the assigned wells, with its natural sign.
  pub fn production(&self, x: &AssignmentMatrix) -> Score {
    let a = self.parameters.well_production();
    x.iter_rows().map(|row| dot(a, row)).sum()
  }

  /// Environmental damage of the opened wells, pipelines and platforms.
  pub fn damage(
    &self,
    x: &AssignmentMatrix,
    y: &CapacitySelectionMatrix,
  ) -> Score {
    let p = &*self.parameters;
    izip!(x.iter_rows(), y.iter_rows(), p.platform_damage())
      .enumerate()
      .map(|(i, (xs, ys, platform_damage))| {
        let wells: Score =
          izip!(xs, p.well_damage(), p.connection_damage(i))
            .map(|(x_ij, dw, dq)| (dw + dq) * x_ij)
            .sum();
        let platform: Score = izip!(ys, p.capacity_damage(i))
          .map(|(y_ik, dp)| (platform_damage + dp) * y_ik)
          .sum();
        wells + platform
      })
      .sum()
  }

  /// The constraint vector, ordered as described by [`CoverageMode`].
  pub fn constraints(
    &self,
    x: &AssignmentMatrix,
    y: &CapacitySelectionMatrix,
  ) -> Vec<Score> {
    let p = &*self.parameters;
    let tier = y.row_sums().into_iter().map(|s| s - 1.0);
    let capacity = x.iter_rows().zip(y.iter_rows()).map(|(xs, ys)| {
      dot(p.well_production(), xs) - dot(p.platform_capacity(), ys)
    });
    match self.coverage {
      CoverageMode::WellCoverage => x
        .column_sums()
        .into_iter()
        .map(|s| s - 1.0)
        .chain(tier.zip(capacity).flat_map(|(g2, g3)| [g2, g3]))
        .collect(),
      CoverageMode::PlatformRow => izip!(x.row_sums(), tier, capacity)
        .flat_map(|(s, g2, g3)| [s - 1.0, g2, g3])
        .collect(),
    }
  }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
  a.iter().zip(b).map(|(a, b)| a * b).sum()
}
