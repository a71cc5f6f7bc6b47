use crate::parsing::Dataset;
use crate::{Error, Result};
use ndarray::Axis;
use rand::seq::SliceRandom;
use rand::Rng;

/// A train/test partition of a dataset, with the original row index of every
/// row on each side
#[derive(Clone, Debug)]
pub struct Partition {
    pub train: Dataset,
    pub test: Dataset,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

impl Partition {
    /// `train_test_split` happily returns an empty side; call this when both are needed
    pub fn ensure_non_empty(&self) -> Result<()> {
        if self.train.is_empty() || self.test.is_empty() {
            return Err(Error::InsufficientData(format!(
                "partition has {} training and {} test samples",
                self.train.len(),
                self.test.len()
            )));
        }

        Ok(())
    }
}

/// Shuffle the rows of `dataset` and hold out `floor(n * test_ratio)` of them for testing.
///
/// Feature rows stay paired with their target rows. Either side may come out
/// empty when the ratio is small or large relative to the number of rows.
pub fn train_test_split<R: Rng + ?Sized>(
    dataset: &Dataset,
    test_ratio: f64,
    rng: &mut R,
) -> Result<Partition> {
    if dataset.is_empty() {
        return Err(Error::InsufficientData("cannot split an empty dataset".to_owned()));
    }
    if dataset.data.nrows() != dataset.target.nrows() {
        return Err(Error::InvalidInput(format!(
            "{} feature rows but {} target rows",
            dataset.data.nrows(),
            dataset.target.nrows()
        )));
    }
    if !(test_ratio > 0f64 && test_ratio < 1f64) {
        return Err(Error::Configuration(format!(
            "test ratio must be in (0, 1), got {}",
            test_ratio
        )));
    }

    let n = dataset.len();
    let test_size = (n as f64 * test_ratio).floor() as usize;

    // Fisher-Yates over the row indices
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);

    let train_indices = indices.split_off(test_size);
    let test_indices = indices;

    let select = |rows: &[usize]| Dataset {
        data: dataset.data.select(Axis(0), rows),
        target: dataset.target.select(Axis(0), rows),
    };

    Ok(Partition {
        train: select(&train_indices),
        test: select(&test_indices),
        train_indices,
        test_indices,
    })
}
