//! A read-only row-major matrix borrowed from a decision vector.

/// A `rows x cols` view over a row-major slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<'a> {
  data: &'a [f64],
  rows: usize,
  cols: usize,
}

impl<'a> Matrix<'a> {
  /// Wraps `data` as a `rows x cols` matrix.
  ///
  /// # Panics
  ///
  /// Panics if `data.len() != rows * cols`.
  pub fn new(data: &'a [f64], rows: usize, cols: usize) -> Self {
    assert_eq!(data.len(), rows * cols, "matrix data has wrong length");
    Self { data, rows, cols }
  }

  /// Number of rows.
  pub fn rows(&self) -> usize {
    self.rows
  }

  /// Number of columns.
  pub fn cols(&self) -> usize {
    self.cols
  }

  /// `(rows, cols)`.
  pub fn shape(&self) -> (usize, usize) {
    (self.rows, self.cols)
  }

  /// Entry at row `i`, column `j`.
  pub fn get(&self, i: usize, j: usize) -> f64 {
    self.row(i)[j]
  }

  /// Row `i` as a slice.
  pub fn row(&self, i: usize) -> &'a [f64] {
    &self.data[i * self.cols..(i + 1) * self.cols]
  }

  /// Iterates over the rows.
  pub fn iter_rows(&self) -> impl Iterator<Item = &'a [f64]> + 'a {
    let Self { data, rows, cols } = *self;
    (0..rows).map(move |i| &data[i * cols..(i + 1) * cols])
  }

  /// Sum of every row.
  pub fn row_sums(&self) -> Vec<f64> {
    self.iter_rows().map(|r| r.iter().sum()).collect()
  }

  /// Sum of every column.
  pub fn column_sums(&self) -> Vec<f64> {
    let mut sums = vec![0.0; self.cols];
    for row in self.iter_rows() {
      sums.iter_mut().zip(row).for_each(|(s, v)| *s += v);
    }
    sums
  }

  /// Column indices of row `i` whose entry is at least `threshold`.
  ///
  /// Under a continuous encoding this reads the relaxed indicators back as
  /// decisions, e.g. `active(i, 0.5)` lists the wells platform `i` serves.
  pub fn active(&self, i: usize, threshold: f64) -> Vec<usize> {
    self
      .row(i)
      .iter()
      .enumerate()
      .filter(|(_, v)| **v >= threshold)
      .map(|(j, _)| j)
      .collect()
  }

  /// The underlying row-major slice.
  pub fn as_slice(&self) -> &'a [f64] {
    self.data
  }

  /// Copies the matrix into nested vectors, one per row.
  pub fn to_rows(&self) -> Vec<Vec<f64>> {
    self.iter_rows().map(<[f64]>::to_vec).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_matrix_accessors() {
    let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let m = Matrix::new(&data, 2, 3);
    assert_eq!(m.shape(), (2, 3));
    assert_eq!(m.get(1, 0), 4.0);
    assert_eq!(m.row(0), &[1.0, 2.0, 3.0]);
    assert_eq!(m.row_sums(), vec![6.0, 15.0]);
    assert_eq!(m.column_sums(), vec![5.0, 7.0, 9.0]);
    assert_eq!(m.to_rows(), vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
  }

  #[test]
  fn test_active_entries() {
    let data = [0.9, 0.1, 0.5, 0.0, 0.0, 0.0];
    let m = Matrix::new(&data, 2, 3);
    assert_eq!(m.active(0, 0.5), vec![0, 2]);
    assert_eq!(m.active(1, 0.5), Vec::<usize>::new());
  }

  #[test]
  #[should_panic(expected = "matrix data has wrong length")]
  fn test_wrong_length() {
    Matrix::new(&[1.0, 2.0], 2, 2);
  }
}
