//! Error types returned by parameter construction and evaluation.

use thiserror::Error;

/// A decision vector does not have the length implied by the problem's
/// dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("decision vector has {actual} entries, expected {expected}")]
pub struct ShapeError {
  /// `platforms * wells + platforms * capacity_levels`.
  pub expected: usize,
  /// Length of the vector that was supplied.
  pub actual: usize,
}

/// A parameter table disagrees with the declared problem dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterDimensionError {
  /// A table that defines one of the index sets is empty.
  #[error("table `{table}` is empty")]
  Empty {
    /// Name of the offending table.
    table: &'static str,
  },
  /// A table has the wrong number of entries or rows.
  #[error("table `{table}` has {actual} entries, expected {expected}")]
  Length {
    /// Name of the offending table.
    table: &'static str,
    /// Required length.
    expected: usize,
    /// Supplied length.
    actual: usize,
  },
  /// A row of a two-dimensional table has the wrong number of columns.
  #[error(
    "row {row} of table `{table}` has {actual} entries, expected {expected}"
  )]
  Row {
    /// Name of the offending table.
    table: &'static str,
    /// Index of the offending row.
    row: usize,
    /// Required row length.
    expected: usize,
    /// Supplied row length.
    actual: usize,
  },
}

/// Failure to ingest parameter tables from a serialized source.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The source is not valid JSON or does not match the table layout.
  #[error("failed to parse parameter tables: {0}")]
  Json(#[from] serde_json::Error),
  /// The tables parsed but their dimensions are inconsistent.
  #[error("invalid parameter tables: {0}")]
  Dimensions(#[from] ParameterDimensionError),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_messages() {
    let e = ShapeError {
      expected: 36,
      actual: 35,
    };
    assert_eq!(e.to_string(), "decision vector has 35 entries, expected 36");

    let e = ParameterDimensionError::Row {
      table: "drill_cost",
      row: 2,
      expected: 10,
      actual: 9,
    };
    assert_eq!(
      e.to_string(),
      "row 2 of table `drill_cost` has 9 entries, expected 10"
    );

    let e = ConfigError::from(ParameterDimensionError::Empty {
      table: "well_production",
    });
    assert_eq!(
      e.to_string(),
      "invalid parameter tables: table `well_production` is empty"
    );
  }
}
