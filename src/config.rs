use crate::model::neural_net::InitMethod;
use crate::{Error, Result};

/// Upper bound on the number of hidden layers a session may request
pub const MAX_HIDDEN_LAYERS: usize = 5;

/// Architecture and hyperparameters chosen by the caller for one training run.
/// Built once and passed by reference, never mutated during training.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingConfig {
    pub hidden_sizes: Vec<usize>,
    pub learning_rate: f64,
    pub epochs: usize,
    /// Share of the samples held out for evaluation
    pub test_ratio: f64,
    pub init_method: InitMethod,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            hidden_sizes: vec![64; 4],
            learning_rate: 0.1,
            epochs: 1000,
            test_ratio: 0.25,
            init_method: InitMethod::He,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.hidden_sizes.len() > MAX_HIDDEN_LAYERS {
            return Err(Error::Configuration(format!(
                "at most {} hidden layers are supported, got {}",
                MAX_HIDDEN_LAYERS,
                self.hidden_sizes.len()
            )));
        }
        if let Some(idx) = self.hidden_sizes.iter().position(|&size| size == 0) {
            return Err(Error::Configuration(format!(
                "hidden layer {} has zero units",
                idx
            )));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0f64) {
            return Err(Error::Configuration(format!(
                "learning rate must be finite and positive, got {}",
                self.learning_rate
            )));
        }
        if self.epochs == 0 {
            return Err(Error::Configuration("epochs must be at least 1".to_owned()));
        }
        if !(self.test_ratio > 0f64 && self.test_ratio < 1f64) {
            return Err(Error::Configuration(format!(
                "test ratio must be in (0, 1), got {}",
                self.test_ratio
            )));
        }

        Ok(())
    }
}
