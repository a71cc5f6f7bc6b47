//! Decision-boundary queries.
//!
//! The canvas is cut into square blocks and the model is asked for the class at
//! the centre of each one. The returned cells carry the class label, so whoever
//! draws the overlay only needs a label → color table.

use crate::model::Model;
use crate::{Error, Result};
use ndarray::Array2;
use serde::Serialize;

/// The canvas being covered, in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryGrid {
    pub width: usize,
    pub height: usize,
    pub block_size: usize,
}

impl Default for BoundaryGrid {
    fn default() -> Self {
        BoundaryGrid {
            width: 600,
            height: 600,
            block_size: 4,
        }
    }
}

impl BoundaryGrid {
    /// Pixel origin of every block, row by row from the top left
    pub fn blocks(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let step = self.block_size.max(1);

        (0..self.height)
            .step_by(step)
            .flat_map(move |y| (0..self.width).step_by(step).map(move |x| (x, y)))
    }

    /// Normalized coordinates of the centre of the block at `(x, y)`
    pub fn centre(&self, x: usize, y: usize) -> (f64, f64) {
        let half = self.block_size as f64 / 2f64;

        (
            (x as f64 + half) / self.width as f64,
            (y as f64 + half) / self.height as f64,
        )
    }

    fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(Error::Configuration("block size must be at least 1".to_owned()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::Configuration(format!(
                "cannot cover a {}x{} canvas",
                self.width, self.height
            )));
        }

        Ok(())
    }
}

/// One block of the overlay
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoundaryCell<L> {
    pub x: usize,
    pub y: usize,
    pub class_index: usize,
    pub label: L,
}

/// Predict the class of every block of `grid`, labeling it through `classes`
pub fn decision_boundary<M, L>(model: &M, classes: &[L], grid: &BoundaryGrid) -> Result<Vec<BoundaryCell<L>>>
where
    M: Model + ?Sized,
    L: Clone,
{
    grid.validate()?;

    let blocks: Vec<(usize, usize)> = grid.blocks().collect();
    let centres = Array2::from_shape_fn((blocks.len(), 2), |(row, col)| {
        let (x, y) = grid.centre(blocks[row].0, blocks[row].1);
        if col == 0 {
            x
        } else {
            y
        }
    });

    let predictions = model.predict(&centres.view())?;

    blocks
        .into_iter()
        .zip(predictions)
        .map(|((x, y), class_index)| {
            let label = classes.get(class_index).cloned().ok_or_else(|| {
                Error::InvalidInput(format!(
                    "model predicted class {} but only {} classes are known",
                    class_index,
                    classes.len()
                ))
            })?;

            Ok(BoundaryCell {
                x,
                y,
                class_index,
                label,
            })
        })
        .collect()
}
