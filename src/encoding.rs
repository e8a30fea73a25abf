//! Conversion between flat decision vectors and the assignment and
//! capacity-selection matrices.
//!
//! A decision vector of a problem with `I` platforms, `J` wells and `K`
//! capacity tiers has `I * J + I * K` entries. The first `I * J` of them are
//! the assignment matrix `x`, the rest are the capacity-selection matrix `y`,
//! both laid out row-major with one row per platform.
//!
//! Decoding does not look at the values: keeping them inside the variable
//! bounds is the job of whoever produces the vectors, see [`Domain`].

use rand::Rng;

use crate::{error::ShapeError, matrix::Matrix, parameters::Dimensions};

/// `x[i][j]`, platform `i` serves well `j`.
pub type AssignmentMatrix<'a> = Matrix<'a>;

/// `y[i][k]`, platform `i` is built at capacity tier `k`.
pub type CapacitySelectionMatrix<'a> = Matrix<'a>;

/// Splits `vector` into the assignment and capacity-selection matrices.
///
/// Nothing is copied, both matrices borrow from `vector`.
///
/// # Examples
/// ```
/// # use rigsite::{encoding::decode, parameters::Dimensions};
/// let dims = Dimensions { platforms: 2, wells: 2, capacity_levels: 1 };
/// let (x, y) = decode(&[1.0, 0.0, 0.0, 1.0, 1.0, 1.0], dims).unwrap();
/// assert_eq!(x.row(1), &[0.0, 1.0]);
/// assert_eq!(y.shape(), (2, 1));
/// ```
pub fn decode(
  vector: &[f64],
  dims: Dimensions,
) -> Result<(AssignmentMatrix<'_>, CapacitySelectionMatrix<'_>), ShapeError> {
  if vector.len() != dims.decision_len() {
    return Err(ShapeError {
      expected: dims.decision_len(),
      actual: vector.len(),
    });
  }
  let (x, y) = vector.split_at(dims.assignment_len());
  Ok((
    Matrix::new(x, dims.platforms, dims.wells),
    Matrix::new(y, dims.platforms, dims.capacity_levels),
  ))
}

/// Flattens assignment rows and capacity-selection rows back into a decision
/// vector. Inverse of [`decode`].
pub fn encode<X, Y>(assignment: &[X], selection: &[Y]) -> Vec<f64>
where
  X: AsRef<[f64]>,
  Y: AsRef<[f64]>,
{
  assignment
    .iter()
    .map(|row| row.as_ref())
    .chain(selection.iter().map(|row| row.as_ref()))
    .flatten()
    .copied()
    .collect()
}

/// The domain every decision variable is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Domain {
  /// Relaxed indicators in `[0, 1]`.
  #[default]
  Continuous,
  /// Binary indicators, `0` or `1`.
  Binary,
}

impl Domain {
  /// Lower and upper bound of every variable. Both domains span `[0, 1]`.
  pub fn bounds(&self, dims: Dimensions) -> (Vec<f64>, Vec<f64>) {
    let n = dims.decision_len();
    (vec![0.0; n], vec![1.0; n])
  }

  /// Whether every entry of `vector` lies in the domain.
  pub fn contains(&self, vector: &[f64]) -> bool {
    match self {
      Domain::Continuous => vector.iter().all(|v| (0.0..=1.0).contains(v)),
      Domain::Binary => vector.iter().all(|v| *v == 0.0 || *v == 1.0),
    }
  }

  /// Draws a random decision vector from the domain: uniform values for
  /// [`Domain::Continuous`], fair coin flips for [`Domain::Binary`].
  pub fn sample<R: Rng>(&self, dims: Dimensions, rng: &mut R) -> Vec<f64> {
    (0..dims.decision_len())
      .map(|_| match self {
        Domain::Continuous => rng.gen_range(0.0..=1.0),
        Domain::Binary => {
          if rng.gen_bool(0.5) {
            1.0
          } else {
            0.0
          }
        }
      })
      .collect()
  }
}
