//! Shape-checked matrix operations used by the network.
//!
//! ndarray panics on incompatible shapes; these helpers check first and
//! report an `Error::InvalidInput` instead, so a bad batch fails fast at the
//! caller rather than aborting the process.

use crate::{Error, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Matrix product `a · b`
pub fn dot(a: &ArrayView2<f64>, b: &ArrayView2<f64>) -> Result<Array2<f64>> {
    if a.ncols() != b.nrows() {
        return Err(Error::InvalidInput(format!(
            "cannot multiply {:?} by {:?}",
            a.dim(),
            b.dim()
        )));
    }

    Ok(a.dot(b))
}

/// Add a row vector to every row of `m`
pub fn add_row(m: Array2<f64>, row: &ArrayView1<f64>) -> Result<Array2<f64>> {
    if m.ncols() != row.len() {
        return Err(Error::InvalidInput(format!(
            "cannot add a row of width {} to a matrix of shape {:?}",
            row.len(),
            m.dim()
        )));
    }

    Ok(m + row)
}

/// Elementwise difference `a - b`
pub fn sub(a: &ArrayView2<f64>, b: &ArrayView2<f64>) -> Result<Array2<f64>> {
    same_shape(a, b, "subtract")?;

    Ok(a - b)
}

/// Elementwise (Hadamard) product `a ⊙ b`
pub fn hadamard(a: &ArrayView2<f64>, b: &ArrayView2<f64>) -> Result<Array2<f64>> {
    same_shape(a, b, "multiply elementwise")?;

    Ok(a * b)
}

/// Mean of the rows of `m`, i.e. the column-wise average
pub fn row_mean(m: &ArrayView2<f64>) -> Result<Array1<f64>> {
    m.mean_axis(Axis(0))
        .ok_or_else(|| Error::InvalidInput("cannot average a matrix with no rows".to_owned()))
}

/// Index of the largest entry. Ties go to the first occurrence
pub fn argmax(row: &ArrayView1<f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, &value) in row.iter().enumerate() {
        match best {
            Some((_, max)) if value <= max => {}
            _ => best = Some((idx, value)),
        }
    }

    best.map(|(idx, _)| idx)
}

fn same_shape(a: &ArrayView2<f64>, b: &ArrayView2<f64>, op: &str) -> Result<()> {
    if a.dim() != b.dim() {
        return Err(Error::InvalidInput(format!(
            "cannot {} {:?} and {:?}",
            op,
            a.dim(),
            b.dim()
        )));
    }

    Ok(())
}
