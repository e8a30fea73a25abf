//! Type aliases and positions of the objective scores returned by an
//! evaluation.

/// An alias for an objective or constraint score.
///
/// Every objective is minimized. Objectives that are naturally maximized,
/// like oil production, are negated before they are returned, so a larger
/// production shows up as a *smaller* score.
pub type Score = f64;

/// An alias for an array of `N` values of `Score` type.
pub type Scores<const N: usize> = [Score; N];

/// Number of objectives of the platform location problem.
pub const OBJECTIVE_NUM: usize = 3;

/// Position of the construction and drilling cost objective.
pub const COST: usize = 0;

/// Position of the negated oil production objective.
pub const PRODUCTION: usize = 1;

/// Position of the environmental damage objective.
pub const DAMAGE: usize = 2;
