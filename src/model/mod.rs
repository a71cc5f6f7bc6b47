use crate::parsing::Dataset;
use crate::{Error, Result};
use ndarray::{Array2, ArrayView2, Axis};

pub mod matrix;
pub mod neural_net;
pub mod training;

use matrix::argmax;
use training::{TrainReport, TrainingHooks};

/// The most likely class of one instance and how sure the model is about it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prediction {
    pub class_index: usize,
    /// Probability of `class_index` in percent, rounded to two decimals
    pub confidence: f64,
}

pub trait Model {
    fn fit(
        &mut self,
        dataset: &Dataset,
        epochs: usize,
        hooks: &mut dyn TrainingHooks,
    ) -> Result<TrainReport>;

    /// Class probabilities for every row of `instances`
    fn predict_proba(&self, instances: &ArrayView2<f64>) -> Result<Array2<f64>>;

    /// Most likely class of every row. Ties go to the lower class index
    fn predict(&self, instances: &ArrayView2<f64>) -> Result<Vec<usize>> {
        let probabilities = self.predict_proba(instances)?;

        Ok(probabilities
            .axis_iter(Axis(0))
            .map(|row| argmax(&row).unwrap_or(0))
            .collect())
    }

    fn predict_with_confidence(&self, instances: &ArrayView2<f64>) -> Result<Vec<Prediction>> {
        let probabilities = self.predict_proba(instances)?;

        Ok(probabilities
            .axis_iter(Axis(0))
            .map(|row| {
                let class_index = argmax(&row).unwrap_or(0);
                Prediction {
                    class_index,
                    confidence: (row[class_index] * 10000f64).round() / 100f64,
                }
            })
            .collect())
    }

    /// Percentage of rows whose predicted class is the hot entry of the target row
    fn accuracy(&self, instances: &ArrayView2<f64>, targets: &ArrayView2<f64>) -> Result<f64> {
        if instances.nrows() != targets.nrows() {
            return Err(Error::InvalidInput(format!(
                "{} instances but {} target rows",
                instances.nrows(),
                targets.nrows()
            )));
        }

        let predictions = self.predict(instances)?;
        let num_correct = predictions
            .iter()
            .zip(targets.axis_iter(Axis(0)))
            .filter(|(predicted, target_row)| argmax(target_row) == Some(**predicted))
            .count();

        Ok(num_correct as f64 / predictions.len() as f64 * 100f64)
    }
}
