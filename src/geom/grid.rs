//! Dense scalar grids and the finite-difference helpers that operate on them.
//!
//! A [`Grid2`] stores `rows × cols` samples in row-major order. The strip
//! model keeps its parameter and coordinate arrays in this form: rows follow
//! the `v` parameter and columns follow `u`.
//!
//! [`gradient`] reproduces the usual numerical-gradient convention: centered
//! differences at interior samples and first-order one-sided differences at
//! both ends of the axis. An axis with exactly two samples therefore gets the
//! same forward difference at both ends.

/// Direction along which a grid is differentiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Down the columns (index `i`, one step per row).
    Rows,
    /// Along a row (index `j`, one step per column).
    Cols,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("gradient along {axis:?} requires at least 2 samples, got {count}")]
    TooFewSamples { axis: Axis, count: usize },
    #[error("grid spacing must be finite and non-zero, got {0}")]
    InvalidSpacing(f64),
    #[error("grid of {rows}x{cols} samples is too large to address")]
    TooLarge { rows: usize, cols: usize },
}

/// Returns `count` evenly spaced samples from `start` to `stop`, both included.
///
/// The final sample is pinned to `stop` so that the closing boundary is exact.
/// A single sample yields `[start]`; zero samples yield an empty vector.
#[must_use]
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            values[count - 1] = stop;
            values
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid2 {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Grid2 {
    /// Builds a grid by evaluating `f(i, j)` for every row `i` and column `j`.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Result<Self, GridError> {
        let len = rows
            .checked_mul(cols)
            .ok_or(GridError::TooLarge { rows, cols })?;
        let mut data = Vec::with_capacity(len);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Ok(Self { rows, cols, data })
    }

    /// `(rows, cols)`.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Outer-product grids of `u` (columns) and `v` (rows).
///
/// `U[i][j] = u[j]` and `V[i][j] = v[i]`; both grids are `v.len() × u.len()`.
pub fn meshgrid(u: &[f64], v: &[f64]) -> Result<(Grid2, Grid2), GridError> {
    let rows = v.len();
    let cols = u.len();
    let u_grid = Grid2::from_fn(rows, cols, |_, j| u[j])?;
    let v_grid = Grid2::from_fn(rows, cols, |i, _| v[i])?;
    Ok((u_grid, v_grid))
}

/// Finite-difference derivative of `grid` along `axis` with uniform `spacing`.
pub fn gradient(grid: &Grid2, spacing: f64, axis: Axis) -> Result<Grid2, GridError> {
    if !spacing.is_finite() || spacing == 0.0 {
        return Err(GridError::InvalidSpacing(spacing));
    }

    let (rows, cols) = grid.shape();
    let count = match axis {
        Axis::Rows => rows,
        Axis::Cols => cols,
    };
    if count < 2 {
        return Err(GridError::TooFewSamples { axis, count });
    }

    let at = |i: usize, j: usize, k: usize| match axis {
        Axis::Rows => grid.get(k, j),
        Axis::Cols => grid.get(i, k),
    };
    let last = count - 1;

    Grid2::from_fn(rows, cols, |i, j| {
        let k = match axis {
            Axis::Rows => i,
            Axis::Cols => j,
        };
        if k == 0 {
            (at(i, j, 1) - at(i, j, 0)) / spacing
        } else if k == last {
            (at(i, j, last) - at(i, j, last - 1)) / spacing
        } else {
            (at(i, j, k + 1) - at(i, j, k - 1)) / (2.0 * spacing)
        }
    })
}
