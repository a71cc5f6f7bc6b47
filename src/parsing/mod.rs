use crate::{Error, Result};
use ndarray::Array2;

pub mod samples;

/// Paired feature rows and one-hot target rows
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub data: Array2<f64>,
    pub target: Array2<f64>,
}

impl Dataset {
    /// Pair features with targets, checking that every feature row has a target row
    pub fn new(data: Array2<f64>, target: Array2<f64>) -> Result<Dataset> {
        if data.nrows() != target.nrows() {
            return Err(Error::InvalidInput(format!(
                "{} feature rows but {} target rows",
                data.nrows(),
                target.nrows()
            )));
        }

        Ok(Dataset { data, target })
    }

    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }
}
