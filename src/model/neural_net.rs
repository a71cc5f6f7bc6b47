use super::matrix::{add_row, dot, hadamard, row_mean, sub};
use super::training::{report_interval, Progress, TrainReport, TrainingHooks};
use super::Model;
use crate::config::TrainingConfig;
use crate::parsing::Dataset;
use crate::{Error, Result};
use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;
use std::ops::ControlFlow;
use tracing::{debug, warn};

/// Guards the logarithm in the loss against zero probabilities
const LOSS_EPSILON: f64 = 1e-12;

/// Represents a feedforward classifier: ReLU hidden layers and a softmax output
#[derive(Clone, Debug)]
pub struct NeuralNet {
    layers: Vec<(Array2<f64>, Array1<f64>)>, // One (weights, biases) pair per entry of sizes after the first
    sizes: Vec<usize>,                       // [input, hidden..., output], never empty
    learning_rate: f64,
    cache: Option<ActivationCache>,
}

/// How the weights are drawn at construction
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InitMethod {
    /// Normal with standard deviation sqrt(2 / fan_in), small random biases
    #[default]
    He,
    /// Uniform on [-0.5, 0.5], zero biases. Only trains well with one hidden layer
    Uniform,
}

/// Outputs of every layer from the last `forward`, kept for the following `backward`
#[derive(Clone, Debug)]
struct ActivationCache {
    hidden: Vec<Array2<f64>>,        // hidden[0] is the input, the last entry the probabilities
    hidden_linear: Vec<Array2<f64>>, // pre-activation of every layer
}

impl NeuralNet {
    /// Construct a new neural net with `input_size` features, the given hidden widths and
    /// `output_size` classes
    pub fn new<R: Rng + ?Sized>(
        input_size: usize,
        hidden_sizes: &[usize],
        output_size: usize,
        learning_rate: f64,
        init_method: InitMethod,
        rng: &mut R,
    ) -> Result<NeuralNet> {
        if input_size == 0 {
            return Err(Error::Configuration("input size must be at least 1".to_owned()));
        }
        if output_size == 0 {
            return Err(Error::EmptyInput("network needs at least one output class".to_owned()));
        }
        if let Some(idx) = hidden_sizes.iter().position(|&size| size == 0) {
            return Err(Error::Configuration(format!("hidden layer {} has zero units", idx)));
        }
        if !(learning_rate.is_finite() && learning_rate > 0f64) {
            return Err(Error::Configuration(format!(
                "learning rate must be finite and positive, got {}",
                learning_rate
            )));
        }

        let mut sizes = Vec::with_capacity(hidden_sizes.len() + 2);
        sizes.push(input_size);
        sizes.extend_from_slice(hidden_sizes);
        sizes.push(output_size);

        let layers = match init_method {
            InitMethod::He => init_layers_he(&sizes, rng)?,
            InitMethod::Uniform => init_layers_uniform(&sizes, rng),
        };

        Ok(NeuralNet {
            layers,
            sizes,
            learning_rate,
            cache: None,
        })
    }

    /// Construct the net a training run asks for
    pub fn from_config<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        config: &TrainingConfig,
        rng: &mut R,
    ) -> Result<NeuralNet> {
        NeuralNet::new(
            input_size,
            &config.hidden_sizes,
            output_size,
            config.learning_rate,
            config.init_method,
            rng,
        )
    }

    /// Weight matrix and bias vector of every layer, input side first
    pub fn layers(&self) -> &[(Array2<f64>, Array1<f64>)] {
        &self.layers
    }

    /// Widths from the input through the hidden layers to the output
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn input_size(&self) -> usize {
        self.sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    /// Class probabilities for every row of `inputs`.
    /// The layer outputs are cached for the next call to `backward`
    pub fn forward(&mut self, inputs: &ArrayView2<f64>) -> Result<Array2<f64>> {
        let cache = self.propagate(inputs)?;
        let probabilities = cache.output().clone();
        self.cache = Some(cache);

        Ok(probabilities)
    }

    /// Compute the gradients of the cross-entropy loss for the batch that the
    /// preceding `forward` saw, then take one gradient descent step on every layer
    pub fn backward(&mut self, inputs: &ArrayView2<f64>, targets: &ArrayView2<f64>) -> Result<()> {
        let cache = self.cache.take().ok_or_else(|| {
            Error::InvalidInput("backward needs a preceding forward pass".to_owned())
        })?;

        if cache.hidden[0] != *inputs {
            return Err(Error::InvalidInput(
                "backward must see the batch of the preceding forward pass".to_owned(),
            ));
        }
        if targets.dim() != cache.output().dim() {
            return Err(Error::InvalidInput(format!(
                "targets have shape {:?}, expected {:?}",
                targets.dim(),
                cache.output().dim()
            )));
        }

        let gradients = self.gradients(&cache, targets)?;

        // Only update once every gradient is known, the hidden-layer gradients
        // depend on the weights of the layers above them
        for ((weights, biases), (weight_grad, bias_grad)) in self.layers.iter_mut().zip(gradients) {
            weights.scaled_add(-self.learning_rate, &weight_grad);
            biases.scaled_add(-self.learning_rate, &bias_grad);
        }

        Ok(())
    }

    /// Full-batch gradient descent on `dataset` for `epochs` steps.
    ///
    /// About a hundred times per run (and after the last step) the accuracy and
    /// loss are handed to `hooks.on_progress`, followed by `hooks.yield_now`.
    pub fn train(
        &mut self,
        dataset: &Dataset,
        epochs: usize,
        hooks: &mut dyn TrainingHooks,
    ) -> Result<TrainReport> {
        if epochs == 0 {
            return Err(Error::Configuration("epochs must be at least 1".to_owned()));
        }
        self.check_batch(&dataset.data.view())?;
        if dataset.target.dim() != (dataset.len(), self.output_size()) {
            return Err(Error::InvalidInput(format!(
                "targets have shape {:?}, expected ({}, {})",
                dataset.target.dim(),
                dataset.len(),
                self.output_size()
            )));
        }

        let inputs = dataset.data.view();
        let targets = dataset.target.view();
        let every = report_interval(epochs);
        let mut report = TrainReport::default();

        for epoch in 0..epochs {
            let predictions = self.forward(&inputs)?;
            self.backward(&inputs, &targets)?;
            report.epochs_run = epoch + 1;

            if epoch % every != 0 && epoch != epochs - 1 {
                continue;
            }

            let progress = Progress {
                epoch: epoch + 1,
                total_epochs: epochs,
                accuracy: self.accuracy(&inputs, &targets)?,
                loss: cross_entropy_loss(&targets, &predictions.view())?,
            };
            debug!(
                "epoch {}/{}: accuracy {:.2}%, loss {:.4}",
                progress.epoch, epochs, progress.accuracy, progress.loss
            );

            report.losses.push((progress.epoch, progress.loss));
            report.final_accuracy = progress.accuracy;
            report.final_loss = progress.loss;
            hooks.on_progress(&progress);

            if let ControlFlow::Break(()) = hooks.yield_now() {
                warn!("training stopped after {} of {} epochs", epoch + 1, epochs);
                report.cancelled = epoch + 1 < epochs;
                break;
            }
        }

        Ok(report)
    }

    /// Class probabilities without touching the cache
    pub fn probabilities(&self, inputs: &ArrayView2<f64>) -> Result<Array2<f64>> {
        let mut cache = self.propagate(inputs)?;

        Ok(cache.hidden.pop().unwrap_or_default())
    }

    // Perform a forward pass of the network on some input.
    // Returns the outputs of every layer, and the non-activated outputs (used for backprop)
    fn propagate(&self, inputs: &ArrayView2<f64>) -> Result<ActivationCache> {
        self.check_batch(inputs)?;

        let mut hidden = vec![inputs.to_owned()];
        let mut hidden_linear = vec![];
        let mut it = self.layers.iter().peekable();

        while let Some((weights, biases)) = it.next() {
            let previous = hidden[hidden.len() - 1].view();
            let lin_output = add_row(dot(&previous, &weights.view())?, &biases.view())?;
            // Hidden layers go through ReLU, the output layer through softmax
            let real_output = match it.peek() {
                Some(_) => lin_output.mapv(relu),
                None => softmax(&lin_output.view()),
            };

            hidden.push(real_output);
            hidden_linear.push(lin_output);
        }

        Ok(ActivationCache {
            hidden,
            hidden_linear,
        })
    }

    /// Gradients of the loss w.r.t. the weights and biases of every layer, first layer first
    fn gradients(
        &self,
        cache: &ActivationCache,
        targets: &ArrayView2<f64>,
    ) -> Result<Vec<(Array2<f64>, Array1<f64>)>> {
        let m = targets.nrows() as f64;
        let mut gradients = Vec::with_capacity(self.layers.len());
        // Softmax followed by cross-entropy has the gradient `predictions - targets`
        let mut grad_help = sub(&cache.output().view(), targets)?;

        for idx in (0..self.layers.len()).rev() {
            let weight_grad = dot(&cache.hidden[idx].t(), &grad_help.view())? / m;
            let bias_grad = row_mean(&grad_help.view())?;

            if idx > 0 {
                let upstream = dot(&grad_help.view(), &self.layers[idx].0.t())?;
                let step_mat = cache.hidden_linear[idx - 1].mapv(delta_relu);
                grad_help = hadamard(&upstream.view(), &step_mat.view())?;
            }

            gradients.push((weight_grad, bias_grad));
        }

        gradients.reverse();
        Ok(gradients)
    }

    fn check_batch(&self, inputs: &ArrayView2<f64>) -> Result<()> {
        if inputs.nrows() == 0 {
            return Err(Error::InvalidInput("batch has no rows".to_owned()));
        }
        if inputs.ncols() != self.input_size() {
            return Err(Error::InvalidInput(format!(
                "batch rows have {} features, the network expects {}",
                inputs.ncols(),
                self.input_size()
            )));
        }

        Ok(())
    }
}

impl ActivationCache {
    fn output(&self) -> &Array2<f64> {
        &self.hidden[self.hidden.len() - 1]
    }
}

impl Model for NeuralNet {
    fn fit(
        &mut self,
        dataset: &Dataset,
        epochs: usize,
        hooks: &mut dyn TrainingHooks,
    ) -> Result<TrainReport> {
        self.train(dataset, epochs, hooks)
    }

    fn predict_proba(&self, instances: &ArrayView2<f64>) -> Result<Array2<f64>> {
        self.probabilities(instances)
    }
}

fn relu(z: f64) -> f64 {
    z.max(0f64)
}

/// The kink at zero gets derivative 0
fn delta_relu(z: f64) -> f64 {
    if z > 0f64 {
        1f64
    } else {
        0f64
    }
}

fn init_layers_he<R: Rng + ?Sized>(
    layer_structure: &[usize],
    rng: &mut R,
) -> Result<Vec<(Array2<f64>, Array1<f64>)>> {
    let mut layers = vec![];
    let bias_dist = Uniform::new(-0.01, 0.01);

    for pair in layer_structure.windows(2) {
        let std_dev = (2f64 / pair[0] as f64).sqrt();
        let dist = Normal::new(0f64, std_dev).map_err(|e| Error::Configuration(e.to_string()))?;

        let weights = Array2::from_shape_simple_fn((pair[0], pair[1]), || dist.sample(&mut *rng));
        let bias = Array1::from_shape_simple_fn(pair[1], || bias_dist.sample(&mut *rng));

        layers.push((weights, bias));
    }

    Ok(layers)
}

fn init_layers_uniform<R: Rng + ?Sized>(
    layer_structure: &[usize],
    rng: &mut R,
) -> Vec<(Array2<f64>, Array1<f64>)> {
    let mut layers = vec![];
    let dist = Uniform::new_inclusive(-0.5, 0.5);

    for pair in layer_structure.windows(2) {
        let weights = Array2::from_shape_simple_fn((pair[0], pair[1]), || dist.sample(&mut *rng));
        let bias = Array1::zeros(pair[1]);

        layers.push((weights, bias));
    }

    layers
}

/// Softmax over every row - convert scores into probability distributions
fn softmax(scores: &ArrayView2<f64>) -> Array2<f64> {
    let mut probabilities = scores.to_owned();

    for mut row in probabilities.axis_iter_mut(Axis(0)) {
        // Shift by the max so exp never sees large positive values
        let max = row.fold(f64::NEG_INFINITY, |acc, &x| acc.max(x));
        row.mapv_inplace(|x| (x - max).exp());
        let sum = row.sum();
        row /= sum;
    }

    probabilities
}

/// Mean cross-entropy between one-hot targets and predicted probabilities
pub fn cross_entropy_loss(targets: &ArrayView2<f64>, predictions: &ArrayView2<f64>) -> Result<f64> {
    if targets.dim() != predictions.dim() {
        return Err(Error::InvalidInput(format!(
            "targets have shape {:?}, predictions {:?}",
            targets.dim(),
            predictions.dim()
        )));
    }
    if targets.nrows() == 0 {
        return Err(Error::InvalidInput("cannot compute the loss of an empty batch".to_owned()));
    }

    let total: f64 = predictions
        .axis_iter(Axis(0))
        .zip(targets.axis_iter(Axis(0)))
        .map(|(actual_row, target_row)| {
            target_row.dot(&actual_row.mapv(|p| (p + LOSS_EPSILON).ln()))
        })
        .sum();

    // log(1 + eps) is slightly positive, keep a perfect prediction at zero loss
    Ok((-total / targets.nrows() as f64).max(0f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::training::NoHooks;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn net(hidden: &[usize], seed: u64) -> NeuralNet {
        let mut rng = StdRng::seed_from_u64(seed);
        NeuralNet::new(2, hidden, 3, 0.1, InitMethod::He, &mut rng).unwrap()
    }

    fn batch() -> Array2<f64> {
        array![[0.0, 0.0], [0.2, 0.9], [0.7, 0.1], [1.0, 1.0], [0.5, 0.5]]
    }

    fn targets() -> Array2<f64> {
        array![
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0]
        ]
    }

    struct Recorder {
        reports: Vec<Progress>,
        stop_after: Option<usize>,
    }

    impl TrainingHooks for Recorder {
        fn on_progress(&mut self, progress: &Progress) {
            self.reports.push(progress.clone());
        }

        fn yield_now(&mut self) -> ControlFlow<()> {
            match self.stop_after {
                Some(n) if self.reports.len() >= n => ControlFlow::Break(()),
                _ => ControlFlow::Continue(()),
            }
        }
    }

    #[test]
    fn layer_shapes_follow_sizes() {
        let net = net(&[5, 4], 1);

        assert_eq!(net.sizes(), &[2, 5, 4, 3]);
        assert_eq!(net.layers().len(), net.sizes().len() - 1);
        assert_eq!((net.input_size(), net.output_size()), (2, 3));
        assert_eq!(net.learning_rate(), 0.1);
        for (l, (weights, biases)) in net.layers.iter().enumerate() {
            assert_eq!(weights.dim(), (net.sizes[l], net.sizes[l + 1]));
            assert_eq!(biases.len(), net.sizes[l + 1]);
            assert!(biases.iter().all(|b| b.abs() <= 0.01));
        }
    }

    #[test]
    fn uniform_init_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(2);
        let net = NeuralNet::new(2, &[8], 2, 0.1, InitMethod::Uniform, &mut rng).unwrap();

        for (weights, biases) in &net.layers {
            assert!(weights.iter().all(|w| w.abs() <= 0.5));
            assert!(biases.iter().all(|&b| b == 0.0));
        }
    }

    #[test]
    fn he_init_scales_with_fan_in() {
        let mut rng = StdRng::seed_from_u64(3);
        let net = NeuralNet::new(200, &[200], 2, 0.1, InitMethod::He, &mut rng).unwrap();
        let weights = &net.layers[0].0;
        let variance = weights.mapv(|w| w * w).mean().unwrap();

        // Expected variance 2 / 200
        assert_relative_eq!(variance, 0.01, max_relative = 0.1);
    }

    #[test]
    fn rejects_bad_construction() {
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            NeuralNet::new(2, &[4], 0, 0.1, InitMethod::He, &mut rng),
            Err(Error::EmptyInput(_))
        ));
        assert!(matches!(
            NeuralNet::new(2, &[4, 0], 2, 0.1, InitMethod::He, &mut rng),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            NeuralNet::new(2, &[4], 2, 0.0, InitMethod::He, &mut rng),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            NeuralNet::new(0, &[4], 2, 0.1, InitMethod::He, &mut rng),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn forward_rows_are_distributions() {
        let mut net = net(&[6, 6], 4);
        // Blow the weights up so the logits get large
        for (weights, _) in net.layers.iter_mut() {
            weights.mapv_inplace(|w| w * 300.0);
        }

        let probabilities = net.forward(&batch().view()).unwrap();

        assert_eq!(probabilities.dim(), (5, 3));
        for row in probabilities.outer_iter() {
            assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-6);
            assert!(row.iter().all(|p| (0.0..=1.0).contains(p)));
        }
    }

    #[test]
    fn softmax_handles_huge_scores() {
        let probabilities = softmax(&array![[1000.0, 1000.0], [-1000.0, 0.0]].view());

        assert_abs_diff_eq!(probabilities[[0, 0]], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(probabilities[[1, 1]], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn forward_rejects_bad_batches() {
        let mut net = net(&[4], 5);

        assert!(matches!(
            net.forward(&array![[0.1, 0.2, 0.3]].view()),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            net.forward(&Array2::<f64>::zeros((0, 2)).view()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn backward_updates_the_weights_forward_uses() {
        let mut net = net(&[8], 6);
        let inputs = batch();

        let before = net.forward(&inputs.view()).unwrap();
        net.backward(&inputs.view(), &targets().view()).unwrap();
        let after = net.forward(&inputs.view()).unwrap();

        assert_ne!(before, after);
    }

    #[test]
    fn backward_lowers_the_loss() {
        let mut net = net(&[8], 7);
        let inputs = batch();
        let targets = targets();

        let before = net.forward(&inputs.view()).unwrap();
        net.backward(&inputs.view(), &targets.view()).unwrap();
        let after = net.probabilities(&inputs.view()).unwrap();

        assert!(
            cross_entropy_loss(&targets.view(), &after.view()).unwrap()
                < cross_entropy_loss(&targets.view(), &before.view()).unwrap()
        );
    }

    #[test]
    fn gradient_matches_finite_differences() {
        let mut net = net(&[3], 8);
        let inputs = batch();
        let targets = targets();
        let loss_of = |net: &NeuralNet| {
            let p = net.probabilities(&inputs.view()).unwrap();
            cross_entropy_loss(&targets.view(), &p.view()).unwrap()
        };

        let cache = net.propagate(&inputs.view()).unwrap();
        let gradients = net.gradients(&cache, &targets.view()).unwrap();

        let h = 1e-6;
        for l in 0..net.layers.len() {
            let original = net.layers[l].0[[0, 0]];
            net.layers[l].0[[0, 0]] = original + h;
            let up = loss_of(&net);
            net.layers[l].0[[0, 0]] = original - h;
            let down = loss_of(&net);
            net.layers[l].0[[0, 0]] = original;

            assert_abs_diff_eq!(gradients[l].0[[0, 0]], (up - down) / (2.0 * h), epsilon = 1e-5);

            let original = net.layers[l].1[0];
            net.layers[l].1[0] = original + h;
            let up = loss_of(&net);
            net.layers[l].1[0] = original - h;
            let down = loss_of(&net);
            net.layers[l].1[0] = original;

            assert_abs_diff_eq!(gradients[l].1[0], (up - down) / (2.0 * h), epsilon = 1e-5);
        }
    }

    #[test]
    fn backward_needs_a_matching_forward() {
        let mut net = net(&[4], 9);
        let inputs = batch();

        assert!(matches!(
            net.backward(&inputs.view(), &targets().view()),
            Err(Error::InvalidInput(_))
        ));

        net.forward(&inputs.view()).unwrap();
        let other = inputs.mapv(|x| 1.0 - x);
        assert!(matches!(
            net.backward(&other.view(), &targets().view()),
            Err(Error::InvalidInput(_))
        ));

        // The cache is used up even by a failed backward
        assert!(net.backward(&inputs.view(), &targets().view()).is_err());
    }

    #[test]
    fn backward_rejects_wrong_target_width() {
        let mut net = net(&[4], 10);
        let inputs = batch();

        net.forward(&inputs.view()).unwrap();
        assert!(matches!(
            net.backward(&inputs.view(), &Array2::zeros((5, 2)).view()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn loss_is_never_negative() {
        let targets = array![[1.0, 0.0], [0.0, 1.0]];
        let perfect = targets.clone();
        let hedged = array![[0.5, 0.5], [0.5, 0.5]];
        let wrong = array![[0.0, 1.0], [1.0, 0.0]];

        assert_eq!(cross_entropy_loss(&targets.view(), &perfect.view()).unwrap(), 0.0);
        assert_relative_eq!(
            cross_entropy_loss(&targets.view(), &hedged.view()).unwrap(),
            2f64.ln(),
            max_relative = 1e-9
        );
        assert!(cross_entropy_loss(&targets.view(), &wrong.view()).unwrap() > 20.0);
        assert!(cross_entropy_loss(&targets.view(), &hedged.t()).is_ok());
        assert!(cross_entropy_loss(&targets.view(), &array![[1.0, 0.0]].view()).is_err());
    }

    #[test]
    fn accuracy_counts_matching_argmax() {
        let mut net = net(&[4], 11);
        let inputs = batch();
        let predicted = net.predict(&inputs.view()).unwrap();

        // Make the first two rows right and the rest wrong
        let mut targets = Array2::zeros((5, 3));
        for (row, &class) in predicted.iter().enumerate() {
            let class = if row < 2 { class } else { (class + 1) % 3 };
            targets[[row, class]] = 1.0;
        }

        assert_relative_eq!(net.accuracy(&inputs.view(), &targets.view()).unwrap(), 40.0);
        // The cache is untouched by predictions
        assert!(net.backward(&inputs.view(), &targets.view()).is_err());
        net.forward(&inputs.view()).unwrap();
        assert!(net.backward(&inputs.view(), &targets.view()).is_ok());
    }

    #[test]
    fn train_reports_about_a_hundred_times() {
        let mut net = net(&[4], 12);
        let dataset = Dataset::new(batch(), targets()).unwrap();
        let mut recorder = Recorder {
            reports: vec![],
            stop_after: None,
        };

        let report = net.train(&dataset, 150, &mut recorder).unwrap();

        // Every second step, plus the last one
        assert_eq!(recorder.reports.len(), 76);
        assert_eq!(recorder.reports[0].epoch, 1);
        assert_eq!(recorder.reports[1].epoch, 3);
        assert_eq!(recorder.reports.last().unwrap().epoch, 150);
        assert!(recorder.reports.iter().all(|p| p.total_epochs == 150));
        assert!(recorder
            .reports
            .iter()
            .all(|p| (0.0..=100.0).contains(&p.accuracy) && p.loss >= 0.0));
        assert_eq!(report.epochs_run, 150);
        assert_eq!(report.losses.len(), 76);
        assert!(!report.cancelled);
    }

    #[test]
    fn train_stops_when_a_hook_breaks() {
        let mut net = net(&[4], 13);
        let dataset = Dataset::new(batch(), targets()).unwrap();
        let mut recorder = Recorder {
            reports: vec![],
            stop_after: Some(3),
        };

        let report = net.train(&dataset, 1000, &mut recorder).unwrap();

        // Reports land on steps 1, 11 and 21
        assert_eq!(recorder.reports.len(), 3);
        assert_eq!(report.epochs_run, 21);
        assert!(report.cancelled);
    }

    #[test]
    fn train_validates_its_dataset() {
        let mut net = net(&[4], 14);
        let narrow = Dataset::new(batch(), Array2::zeros((5, 2))).unwrap();
        let good = Dataset::new(batch(), targets()).unwrap();

        assert!(matches!(
            net.train(&narrow, 10, &mut NoHooks),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            net.train(&good, 0, &mut NoHooks),
            Err(Error::Configuration(_))
        ));
    }
}
