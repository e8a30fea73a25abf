//! Problem constants: costs, production estimates, capacities and
//! environmental damage tables.
//!
//! Raw tables are collected in a [`ParameterTables`], which can be built in
//! code with its builder or deserialized with [serde]. Tables are validated
//! once, when they are turned into [`ProblemParameters`], and never mutated
//! afterwards.

use std::io::Read;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{ConfigError, ParameterDimensionError};

/// Sizes of the three index sets of the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
  /// Candidate platform locations, the set `I`.
  pub platforms: usize,
  /// Candidate well locations, the set `J`.
  pub wells: usize,
  /// Platform capacity tiers, the set `K`.
  pub capacity_levels: usize,
}

impl Dimensions {
  /// Number of entries of the assignment matrix.
  pub fn assignment_len(&self) -> usize {
    self.platforms * self.wells
  }

  /// Number of entries of the capacity-selection matrix.
  pub fn selection_len(&self) -> usize {
    self.platforms * self.capacity_levels
  }

  /// Length of a decision vector.
  pub fn decision_len(&self) -> usize {
    self.assignment_len() + self.selection_len()
  }
}

/// Unvalidated parameter tables as they come from a configuration source.
///
/// Two-dimensional tables are indexed platform first. Damage tables may be
/// omitted, in which case they are read as all zeros.
///
/// # Examples
/// ```
/// # use rigsite::parameters::{ParameterTables, ProblemParameters};
/// let tables = ParameterTables::builder()
///   .drill_cost(vec![vec![1.0, 1.0]])
///   .build_cost(vec![vec![0.0]])
///   .well_production(vec![10.0, 10.0])
///   .platform_capacity(vec![20.0])
///   .build();
/// let params = ProblemParameters::new(tables).unwrap();
/// assert_eq!(params.dimensions().decision_len(), 3);
/// ```
#[derive(
  Debug, Clone, PartialEq, Default, Serialize, Deserialize, TypedBuilder,
)]
pub struct ParameterTables {
  /// `c[i][j]`, cost of drilling well `j` from platform `i`.
  pub drill_cost: Vec<Vec<f64>>,
  /// `f[i][k]`, cost of building platform `i` at capacity tier `k`.
  pub build_cost: Vec<Vec<f64>>,
  /// `a[j]`, monthly production estimate of well `j`.
  pub well_production: Vec<f64>,
  /// `b[k]`, throughput capacity of tier `k`.
  pub platform_capacity: Vec<f64>,
  /// `DW[j]`, damage of opening well `j`.
  #[serde(default)]
  #[builder(default)]
  pub well_damage: Vec<f64>,
  /// `DO[i]`, damage of operating a platform at location `i`.
  #[serde(default)]
  #[builder(default)]
  pub platform_damage: Vec<f64>,
  /// `DQ[i][j]`, damage of a pipeline rupture between platform `i` and
  /// well `j`.
  #[serde(default)]
  #[builder(default)]
  pub connection_damage: Vec<Vec<f64>>,
  /// `DP[i][k]`, damage of operating platform `i` at tier `k`.
  #[serde(default)]
  #[builder(default)]
  pub capacity_damage: Vec<Vec<f64>>,
}

impl ParameterTables {
  /// Drops every damage table. The environmental objective of the resulting
  /// problem is always zero, which reduces it to the cost/production
  /// formulation.
  pub fn without_damage(self) -> Self {
    Self {
      well_damage: vec![],
      platform_damage: vec![],
      connection_damage: vec![],
      capacity_damage: vec![],
      ..self
    }
  }
}

/// Validated, immutable problem constants.
///
/// Two-dimensional tables are stored row-major, one row per platform.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemParameters {
  dimensions: Dimensions,
  drill_cost: Vec<f64>,
  build_cost: Vec<f64>,
  well_production: Vec<f64>,
  platform_capacity: Vec<f64>,
  well_damage: Vec<f64>,
  platform_damage: Vec<f64>,
  connection_damage: Vec<f64>,
  capacity_damage: Vec<f64>,
}

impl ProblemParameters {
  /// Validates `tables` and freezes them.
  ///
  /// The number of platforms is the number of rows of `drill_cost`, the
  /// number of wells is the length of `well_production` and the number of
  /// capacity tiers is the length of `platform_capacity`. Every other table
  /// must agree with them.
  pub fn new(tables: ParameterTables) -> Result<Self, ParameterDimensionError> {
    let dimensions = Dimensions {
      platforms: non_empty("drill_cost", tables.drill_cost.len())?,
      wells: non_empty("well_production", tables.well_production.len())?,
      capacity_levels: non_empty(
        "platform_capacity",
        tables.platform_capacity.len(),
      )?,
    };
    let Dimensions {
      platforms,
      wells,
      capacity_levels,
    } = dimensions;

    let params = Self {
      dimensions,
      drill_cost: flatten("drill_cost", tables.drill_cost, platforms, wells)?,
      build_cost: flatten(
        "build_cost",
        tables.build_cost,
        platforms,
        capacity_levels,
      )?,
      well_production: tables.well_production,
      platform_capacity: tables.platform_capacity,
      well_damage: vector_or_zeros("well_damage", tables.well_damage, wells)?,
      platform_damage: vector_or_zeros(
        "platform_damage",
        tables.platform_damage,
        platforms,
      )?,
      connection_damage: table_or_zeros(
        "connection_damage",
        tables.connection_damage,
        platforms,
        wells,
      )?,
      capacity_damage: table_or_zeros(
        "capacity_damage",
        tables.capacity_damage,
        platforms,
        capacity_levels,
      )?,
    };

    let non_finite = params.non_finite_count();
    if non_finite > 0 {
      log::warn!("parameter tables contain {non_finite} non-finite entries");
    }
    log::debug!(
      "problem parameters: {platforms} platforms, {wells} wells, \
       {capacity_levels} capacity levels"
    );
    Ok(params)
  }

  /// Parses JSON encoded [`ParameterTables`] and validates them.
  pub fn from_json(json: &str) -> Result<Self, ConfigError> {
    let tables: ParameterTables = serde_json::from_str(json)?;
    Ok(Self::new(tables)?)
  }

  /// Reads JSON encoded [`ParameterTables`] from `reader` and validates them.
  pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
    let tables: ParameterTables = serde_json::from_reader(reader)?;
    Ok(Self::new(tables)?)
  }

  /// The three platform, ten well, two tier instance the problem was first
  /// studied on.
  pub fn reference() -> Self {
    let tables = ParameterTables {
      drill_cost: vec![
        vec![5.0, 8.0, 6.0, 9.0, 7.0, 6.0, 4.0, 5.0, 3.0, 7.0],
        vec![7.0, 6.0, 5.0, 8.0, 6.0, 4.0, 9.0, 7.0, 6.0, 5.0],
        vec![4.0, 5.0, 3.0, 7.0, 6.0, 8.0, 6.0, 9.0, 7.0, 6.0],
      ],
      build_cost: vec![vec![6.0, 5.0], vec![7.0, 4.0], vec![3.0, 8.0]],
      well_production: vec![
        3000.0, 4500.0, 6000.0, 3600.0, 2400.0, 5100.0, 2700.0, 3300.0,
        3900.0, 5400.0,
      ],
      platform_capacity: vec![16000.0, 15000.0],
      well_damage: vec![
        310782.0, 474140.0, 663646.0, 261669.0, 174145.0, 151671.0, 507921.0,
        939078.0, 115599.0, 149953.0,
      ],
      platform_damage: vec![90000.0, 135000.0, 180000.0],
      connection_damage: vec![
        vec![
          395729.0, 689619.0, 548398.0, 831475.0, 299864.0, 287818.0,
          737374.0, 645187.0, 820220.0, 92386.0,
        ],
        vec![
          185233.0, 94087.0, 632542.0, 572771.0, 793997.0, 974831.0,
          818750.0, 361304.0, 463313.0, 836669.0,
        ],
        vec![
          94918.0, 185338.0, 380086.0, 914520.0, 91802.0, 788721.0, 498847.0,
          761448.0, 885344.0, 397285.0,
        ],
      ],
      capacity_damage: vec![
        vec![203684.0, 276239.0],
        vec![261388.0, 211061.0],
        vec![248587.0, 78777.0],
      ],
    };
    // the tables above are consistent, so validation cannot fail
    match Self::new(tables) {
      Ok(params) => params,
      Err(e) => unreachable!("reference tables are malformed: {e}"),
    }
  }

  /// Returns the tables back in their unvalidated, serializable form.
  pub fn to_tables(&self) -> ParameterTables {
    let Dimensions {
      wells,
      capacity_levels,
      ..
    } = self.dimensions;
    ParameterTables {
      drill_cost: unflatten(&self.drill_cost, wells),
      build_cost: unflatten(&self.build_cost, capacity_levels),
      well_production: self.well_production.clone(),
      platform_capacity: self.platform_capacity.clone(),
      well_damage: self.well_damage.clone(),
      platform_damage: self.platform_damage.clone(),
      connection_damage: unflatten(&self.connection_damage, wells),
      capacity_damage: unflatten(&self.capacity_damage, capacity_levels),
    }
  }

  /// Sizes of the index sets.
  pub fn dimensions(&self) -> Dimensions {
    self.dimensions
  }

  /// Drilling costs from platform `i` to every well.
  pub fn drill_cost(&self, i: usize) -> &[f64] {
    row(&self.drill_cost, i, self.dimensions.wells)
  }

  /// Building costs of platform `i` at every capacity tier.
  pub fn build_cost(&self, i: usize) -> &[f64] {
    row(&self.build_cost, i, self.dimensions.capacity_levels)
  }

  /// Production estimate of every well.
  pub fn well_production(&self) -> &[f64] {
    &self.well_production
  }

  /// Throughput capacity of every tier.
  pub fn platform_capacity(&self) -> &[f64] {
    &self.platform_capacity
  }

  /// Damage of opening every well.
  pub fn well_damage(&self) -> &[f64] {
    &self.well_damage
  }

  /// Damage of operating a platform at every location.
  pub fn platform_damage(&self) -> &[f64] {
    &self.platform_damage
  }

  /// Pipeline damage between platform `i` and every well.
  pub fn connection_damage(&self, i: usize) -> &[f64] {
    row(&self.connection_damage, i, self.dimensions.wells)
  }

  /// Damage of operating platform `i` at every capacity tier.
  pub fn capacity_damage(&self, i: usize) -> &[f64] {
    row(&self.capacity_damage, i, self.dimensions.capacity_levels)
  }

  fn non_finite_count(&self) -> usize {
    [
      &self.drill_cost,
      &self.build_cost,
      &self.well_production,
      &self.platform_capacity,
      &self.well_damage,
      &self.platform_damage,
      &self.connection_damage,
      &self.capacity_damage,
    ]
    .into_iter()
    .flatten()
    .filter(|v| !v.is_finite())
    .count()
  }
}

impl TryFrom<ParameterTables> for ProblemParameters {
  type Error = ParameterDimensionError;

  fn try_from(tables: ParameterTables) -> Result<Self, Self::Error> {
    Self::new(tables)
  }
}

fn row(data: &[f64], i: usize, width: usize) -> &[f64] {
  &data[i * width..(i + 1) * width]
}

fn non_empty(
  table: &'static str,
  len: usize,
) -> Result<usize, ParameterDimensionError> {
  match len {
    0 => Err(ParameterDimensionError::Empty { table }),
    len => Ok(len),
  }
}

fn check_len(
  table: &'static str,
  actual: usize,
  expected: usize,
) -> Result<(), ParameterDimensionError> {
  if actual == expected {
    Ok(())
  } else {
    Err(ParameterDimensionError::Length {
      table,
      expected,
      actual,
    })
  }
}

fn flatten(
  table: &'static str,
  rows: Vec<Vec<f64>>,
  height: usize,
  width: usize,
) -> Result<Vec<f64>, ParameterDimensionError> {
  check_len(table, rows.len(), height)?;
  let mut data = Vec::with_capacity(height * width);
  for (row, values) in rows.into_iter().enumerate() {
    if values.len() != width {
      return Err(ParameterDimensionError::Row {
        table,
        row,
        expected: width,
        actual: values.len(),
      });
    }
    data.extend(values);
  }
  Ok(data)
}

fn unflatten(data: &[f64], width: usize) -> Vec<Vec<f64>> {
  data.chunks_exact(width).map(<[f64]>::to_vec).collect()
}

fn vector_or_zeros(
  table: &'static str,
  values: Vec<f64>,
  len: usize,
) -> Result<Vec<f64>, ParameterDimensionError> {
  if values.is_empty() {
    return Ok(vec![0.0; len]);
  }
  check_len(table, values.len(), len)?;
  Ok(values)
}

fn table_or_zeros(
  table: &'static str,
  rows: Vec<Vec<f64>>,
  height: usize,
  width: usize,
) -> Result<Vec<f64>, ParameterDimensionError> {
  if rows.is_empty() {
    return Ok(vec![0.0; height * width]);
  }
  flatten(table, rows, height, width)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn small_tables() -> ParameterTables {
    ParameterTables::builder()
      .drill_cost(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
      .build_cost(vec![vec![10.0, 20.0], vec![30.0, 40.0]])
      .well_production(vec![1.0, 2.0, 3.0])
      .platform_capacity(vec![10.0, 20.0])
      .build()
  }

  #[test]
  fn test_dimensions_inferred_from_tables() {
    let params = ProblemParameters::new(small_tables()).unwrap();
    assert_eq!(
      params.dimensions(),
      Dimensions {
        platforms: 2,
        wells: 3,
        capacity_levels: 2,
      }
    );
    assert_eq!(params.dimensions().assignment_len(), 6);
    assert_eq!(params.dimensions().selection_len(), 4);
    assert_eq!(params.dimensions().decision_len(), 10);
    assert_eq!(params.drill_cost(1), &[4.0, 5.0, 6.0]);
    assert_eq!(params.build_cost(0), &[10.0, 20.0]);
  }

  #[test]
  fn test_omitted_damage_is_zero() {
    let params = ProblemParameters::new(small_tables()).unwrap();
    assert_eq!(params.well_damage(), &[0.0; 3]);
    assert_eq!(params.platform_damage(), &[0.0; 2]);
    assert_eq!(params.connection_damage(1), &[0.0; 3]);
    assert_eq!(params.capacity_damage(1), &[0.0; 2]);
  }

  #[test]
  fn test_empty_index_set() {
    let tables = ParameterTables {
      well_production: vec![],
      ..small_tables()
    };
    assert_eq!(
      ProblemParameters::new(tables),
      Err(ParameterDimensionError::Empty {
        table: "well_production"
      })
    );
  }

  #[test]
  fn test_dimension_mismatch() {
    let tables = ParameterTables {
      build_cost: vec![vec![10.0, 20.0]],
      ..small_tables()
    };
    assert_eq!(
      ProblemParameters::new(tables),
      Err(ParameterDimensionError::Length {
        table: "build_cost",
        expected: 2,
        actual: 1,
      })
    );

    let tables = ParameterTables {
      drill_cost: vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0]],
      ..small_tables()
    };
    assert_eq!(
      ProblemParameters::new(tables),
      Err(ParameterDimensionError::Row {
        table: "drill_cost",
        row: 1,
        expected: 3,
        actual: 2,
      })
    );

    let tables = ParameterTables {
      platform_damage: vec![1.0, 2.0, 3.0],
      ..small_tables()
    };
    assert_eq!(
      ProblemParameters::new(tables),
      Err(ParameterDimensionError::Length {
        table: "platform_damage",
        expected: 2,
        actual: 3,
      })
    );
  }

  #[test]
  fn test_negative_and_non_finite_entries_are_accepted() {
    let tables = ParameterTables {
      well_production: vec![-1.0, f64::NAN, f64::INFINITY],
      ..small_tables()
    };
    let params = ProblemParameters::new(tables).unwrap();
    assert_eq!(params.non_finite_count(), 2);
  }

  #[test]
  fn test_reference_instance() {
    let params = ProblemParameters::reference();
    assert_eq!(
      params.dimensions(),
      Dimensions {
        platforms: 3,
        wells: 10,
        capacity_levels: 2,
      }
    );
    assert_eq!(params.dimensions().decision_len(), 36);
    assert_eq!(params.platform_capacity(), &[16000.0, 15000.0]);
    assert_eq!(params.capacity_damage(2), &[248587.0, 78777.0]);
  }

  #[test]
  fn test_from_json() {
    let json = r#"{
      "drill_cost": [[1, 1]],
      "build_cost": [[0]],
      "well_production": [10, 10],
      "platform_capacity": [20],
      "platform_damage": [5]
    }"#;
    let params = ProblemParameters::from_json(json).unwrap();
    assert_eq!(params.dimensions().decision_len(), 3);
    assert_eq!(params.platform_damage(), &[5.0]);
    assert_eq!(params.well_damage(), &[0.0, 0.0]);

    let params = ProblemParameters::from_reader(json.as_bytes()).unwrap();
    assert_eq!(params.well_production(), &[10.0, 10.0]);
  }

  #[test]
  fn test_from_json_errors() {
    assert!(matches!(
      ProblemParameters::from_json("{"),
      Err(ConfigError::Json(_))
    ));
    let json = r#"{
      "drill_cost": [[1, 1]],
      "build_cost": [[0]],
      "well_production": [10, 10, 10],
      "platform_capacity": [20]
    }"#;
    assert!(matches!(
      ProblemParameters::from_json(json),
      Err(ConfigError::Dimensions(ParameterDimensionError::Row {
        table: "drill_cost",
        ..
      }))
    ));
  }

  #[test]
  fn test_tables_survive_serialization() {
    let params = ProblemParameters::reference();
    let json = serde_json::to_string(&params.to_tables()).unwrap();
    assert_eq!(ProblemParameters::from_json(&json).unwrap(), params);
  }

  #[test]
  fn test_without_damage() {
    let tables = ProblemParameters::reference().to_tables().without_damage();
    let params = ProblemParameters::new(tables).unwrap();
    assert_eq!(params.well_damage(), &[0.0; 10]);
    assert_eq!(params.connection_damage(0), &[0.0; 10]);
    assert_eq!(params.drill_cost(0)[0], 5.0);
  }
}
