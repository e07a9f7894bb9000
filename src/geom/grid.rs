//! Rectangular control grids for tensor-product surfaces.
//!
//! A [`ControlGrid`] stores its row and column counts next to a flat row-major
//! buffer, so every row has the same length by construction. Rows run along
//! the surface's `u` direction, columns along `v`.

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("row {row} has {found} entries, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("a {rows}x{cols} grid needs {} values, got {len}", .rows * .cols)]
    SizeMismatch { rows: usize, cols: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlGrid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> ControlGrid<T> {
    /// Wraps a row-major buffer of `rows * cols` values.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, GridError> {
        if data.len() != rows * cols {
            return Err(GridError::SizeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            data: Vec::new(),
        }
    }

    /// Builds a grid from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(row_count * cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(GridError::Ragged {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend(values);
        }
        Ok(Self {
            rows: row_count,
            cols,
            data,
        })
    }

    /// Builds a grid by calling `f(row, col)` for every cell in row-major order.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[must_use]
    pub const fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the grid has no rows or no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row < self.rows && col < self.cols {
            self.data.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.rows {
            Some(&self.data[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    /// Row-major view of all cells.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        (0..self.rows).map(|row| &self.data[row * self.cols..(row + 1) * self.cols])
    }

    #[must_use]
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> ControlGrid<U> {
        ControlGrid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> ControlGrid<T> {
    /// A `rows x cols` grid with every cell set to `value`.
    #[must_use]
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }
}

impl<T> Default for ControlGrid<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Index<(usize, usize)> for ControlGrid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        debug_assert!(col < self.cols, "column {col} out of range for {} columns", self.cols);
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for ControlGrid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        debug_assert!(col < self.cols, "column {col} out of range for {} columns", self.cols);
        &mut self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_flattens_row_major() {
        let grid = ControlGrid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(grid.dims(), (2, 3));
        assert_eq!(grid.as_slice(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(grid[(1, 0)], 4);
        assert_eq!(grid.row(1), Some(&[4, 5, 6][..]));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 3), None);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = ControlGrid::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn new_checks_buffer_length() {
        assert!(ControlGrid::new(2, 2, vec![0.0; 4]).is_ok());
        let err = ControlGrid::new(2, 3, vec![0.0; 4]).unwrap_err();
        assert_eq!(err.to_string(), "a 2x3 grid needs 6 values, got 4");
    }

    #[test]
    fn empty_and_degenerate_shapes() {
        let grid: ControlGrid<f64> = ControlGrid::from_rows(Vec::new()).unwrap();
        assert!(grid.is_empty());
        let no_cols: ControlGrid<f64> = ControlGrid::from_rows(vec![Vec::new(), Vec::new()]).unwrap();
        assert!(no_cols.is_empty());
        assert_eq!(no_cols.dims(), (2, 0));
        assert_eq!(no_cols.iter_rows().count(), 2);
    }

    #[test]
    fn map_and_filled_keep_shape() {
        let grid = ControlGrid::from_fn(3, 2, |r, c| r * 10 + c);
        assert_eq!(grid[(2, 1)], 21);
        let doubled = grid.map(|v| v * 2);
        assert_eq!(doubled.dims(), (3, 2));
        assert_eq!(doubled[(2, 1)], 42);
        let ones = ControlGrid::filled(3, 2, 1.0);
        assert!(ones.as_slice().iter().all(|w| *w == 1.0));
    }
}
