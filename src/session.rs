//! One training run over painted samples: drop the background, encode the
//! labels, split, build a network sized for the classes, train, evaluate.

use crate::config::TrainingConfig;
use crate::model::neural_net::NeuralNet;
use crate::model::training::{TrainReport, TrainingHooks};
use crate::model::Model;
use crate::parsing::samples::{labeled, Sample};
use crate::parsing::Dataset;
use crate::preprocessing::{encode_labels, train_test_split, LabelEncoding};
use crate::{Error, Result};
use ndarray::{array, Array2};
use rand::Rng;
use tracing::{info, warn};

/// Samples are points on the canvas
pub const INPUT_SIZE: usize = 2;

/// A trained model together with the class list needed to read its predictions
#[derive(Debug)]
pub struct TrainingSession {
    pub model: NeuralNet,
    pub encoding: LabelEncoding<String>,
    pub report: TrainReport,
    pub train_accuracy: f64,
    /// `None` when every sample went to training
    pub test_accuracy: Option<f64>,
}

impl TrainingSession {
    /// Train a fresh network on `samples`
    pub fn run<R: Rng + ?Sized>(
        samples: &[Sample],
        config: &TrainingConfig,
        rng: &mut R,
        hooks: &mut dyn TrainingHooks,
    ) -> Result<TrainingSession> {
        config.validate()?;

        let samples = labeled(samples);
        if samples.is_empty() {
            return Err(Error::InsufficientData("no labeled samples to train on".to_owned()));
        }

        let labels: Vec<String> = samples.iter().map(|s| s.label.clone()).collect();
        let encoding = encode_labels(&labels)?;
        let data = Array2::from_shape_fn((samples.len(), INPUT_SIZE), |(row, col)| {
            if col == 0 {
                samples[row].x
            } else {
                samples[row].y
            }
        });
        let dataset = Dataset::new(data, encoding.one_hot().clone())?;

        let partition = train_test_split(&dataset, config.test_ratio, rng)?;
        if partition.train.is_empty() {
            return Err(Error::InsufficientData(format!(
                "a test ratio of {} leaves no training samples out of {}",
                config.test_ratio,
                dataset.len()
            )));
        }
        if partition.test.is_empty() {
            warn!(
                "test partition is empty with {} samples, test accuracy is undefined",
                dataset.len()
            );
        }

        let mut model = NeuralNet::from_config(INPUT_SIZE, encoding.num_classes(), config, rng)?;
        info!(
            "training {:?} on {} samples ({} held out), {} classes",
            model.sizes(),
            partition.train.len(),
            partition.test.len(),
            encoding.num_classes()
        );

        let report = model.fit(&partition.train, config.epochs, hooks)?;
        let train_accuracy = model.accuracy(&partition.train.data.view(), &partition.train.target.view())?;
        let test_accuracy = if partition.test.is_empty() {
            None
        } else {
            Some(model.accuracy(&partition.test.data.view(), &partition.test.target.view())?)
        };

        info!("Training Accuracy: {:.2} %", train_accuracy);
        if let Some(test_accuracy) = test_accuracy {
            info!("Test Accuracy: {:.2} %", test_accuracy);
        }

        Ok(TrainingSession {
            model,
            encoding,
            report,
            train_accuracy,
            test_accuracy,
        })
    }

    /// Label and confidence (percent) of the point under the cursor
    pub fn classify(&self, x: f64, y: f64) -> Result<(&str, f64)> {
        let prediction = self
            .model
            .predict_with_confidence(&array![[x, y]].view())?
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidInput("no prediction for a single point".to_owned()))?;
        let label = self.encoding.class(prediction.class_index).ok_or_else(|| {
            Error::InvalidInput(format!("unknown class index {}", prediction.class_index))
        })?;

        Ok((label.as_str(), prediction.confidence))
    }
}
