use std::ops::ControlFlow;
use tracing::info;

/// A snapshot of training progress, reported about a hundred times per run
#[derive(Clone, Debug, PartialEq)]
pub struct Progress {
    /// 1-based number of the step that just finished
    pub epoch: usize,
    pub total_epochs: usize,
    /// Accuracy on the training data, in percent
    pub accuracy: f64,
    pub loss: f64,
}

/// Outcome of a training run
#[derive(Clone, Debug, Default)]
pub struct TrainReport {
    pub epochs_run: usize,
    /// (epoch, loss) at every progress report, used for plotting
    pub losses: Vec<(usize, f64)>,
    pub final_accuracy: f64,
    pub final_loss: f64,
    /// True if a hook asked training to stop before the last epoch
    pub cancelled: bool,
}

/// Callbacks invoked by the training loop.
///
/// After every progress report the loop calls `yield_now`, which is where a host
/// with its own event loop gets control back. Returning `ControlFlow::Break`
/// stops training once the current step is done; weights keep whatever values
/// the finished steps gave them.
pub trait TrainingHooks {
    fn on_progress(&mut self, _progress: &Progress) {}

    fn yield_now(&mut self) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Hooks that do nothing, for batch/offline training
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl TrainingHooks for NoHooks {}

/// Logs every progress report at info level
#[derive(Clone, Copy, Debug, Default)]
pub struct ProgressLogger;

impl TrainingHooks for ProgressLogger {
    fn on_progress(&mut self, progress: &Progress) {
        info!(
            "Epoch {}/{} - Acc: {:.2}% - Loss: {:.4}",
            progress.epoch, progress.total_epochs, progress.accuracy, progress.loss
        );
    }
}

/// Number of steps between two progress reports
pub(crate) fn report_interval(epochs: usize) -> usize {
    epochs.div_ceil(100).max(1)
}
