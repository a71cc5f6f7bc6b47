use clap::Parser;
use paint_classifier::boundary::{decision_boundary, BoundaryGrid};
use paint_classifier::model::neural_net::InitMethod;
use paint_classifier::model::training::{Progress, ProgressLogger, TrainingHooks};
use paint_classifier::parsing::samples::{class_distribution, parse_samples};
use paint_classifier::session::TrainingSession;
use paint_classifier::{Error, TrainingConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::Write;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// CSV file of painted samples with an x,y,label header
    #[arg(short, long)]
    samples_path: String,

    /// Widths of the hidden layers, e.g. 64 64 64 64
    #[arg(short = 'n', long, num_args = 0.., value_delimiter = ' ', default_values_t = [64usize, 64, 64, 64])]
    hidden_layers: Vec<usize>,

    /// Learning rate of the network
    #[arg(short, long, default_value_t = 0.1)]
    learning_rate: f64,

    /// Number of full-batch gradient descent steps
    #[arg(short, long, default_value_t = 1000)]
    epochs: usize,

    /// Share of the samples held out for testing
    #[arg(short = 'r', long, default_value_t = 0.25)]
    test_ratio: f64,

    /// Weight initialization method
    #[arg(short, long, value_enum, default_value_t = InitMethod::He)]
    initialization: InitMethod,

    /// Seed for weight initialization and the train/test split
    #[arg(long)]
    seed: Option<u64>,

    /// Stop training after this many seconds
    #[arg(short, long)]
    time_limit: Option<f64>,

    /// Write the loss curve here, one tab-separated epoch and loss per line
    #[arg(short, long)]
    debug_path: Option<String>,

    /// Export the decision boundary as CSV (x,y,class_index,label per block)
    #[arg(short, long)]
    boundary_path: Option<String>,

    /// Side of the square canvas the samples were taken from, in pixels
    #[arg(long, default_value_t = 600)]
    canvas_size: usize,

    /// Side of a decision-boundary block, in pixels
    #[arg(long, default_value_t = 4)]
    block_size: usize,

    /// More output per occurrence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Logs progress and enforces the time limit at every yield point
struct CliHooks {
    logger: ProgressLogger,
    started: Instant,
    time_limit: Option<Duration>,
}

impl TrainingHooks for CliHooks {
    fn on_progress(&mut self, progress: &Progress) {
        self.logger.on_progress(progress);
    }

    fn yield_now(&mut self) -> ControlFlow<()> {
        match self.time_limit {
            Some(limit) if self.started.elapsed() >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }
}

/// One `epoch<TAB>loss` line per progress report
fn write_losses(debug_path: &str, losses: &[(usize, f64)]) -> std::io::Result<()> {
    let mut file = File::create(debug_path)?;

    for (epoch, loss) in losses {
        writeln!(file, "{}\t{}", epoch, loss)?;
    }

    Ok(())
}

/// Write the class of every decision-boundary block as CSV
fn write_boundary(
    boundary_path: &str,
    session: &TrainingSession,
    grid: &BoundaryGrid,
) -> paint_classifier::Result<()> {
    let cells = decision_boundary(&session.model, session.encoding.classes(), grid)?;
    let mut writer = csv::Writer::from_path(boundary_path)?;

    for cell in cells {
        writer.serialize(cell)?;
    }
    writer.flush()?;

    Ok(())
}

fn run(args: Args) -> paint_classifier::Result<()> {
    let samples = parse_samples(&args.samples_path)?;
    info!("loaded {} samples from {}", samples.len(), args.samples_path);
    for (label, share) in class_distribution(&samples) {
        info!("{}: {:.2}%", label, share);
    }

    let config = TrainingConfig {
        hidden_sizes: args.hidden_layers,
        learning_rate: args.learning_rate,
        epochs: args.epochs,
        test_ratio: args.test_ratio,
        init_method: args.initialization,
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let time_limit = args
        .time_limit
        .map(|secs| {
            Duration::try_from_secs_f64(secs)
                .map_err(|e| Error::Configuration(format!("time limit {}: {}", secs, e)))
        })
        .transpose()?;
    let mut hooks = CliHooks {
        logger: ProgressLogger,
        started: Instant::now(),
        time_limit,
    };

    let session = TrainingSession::run(&samples, &config, &mut rng, &mut hooks)?;
    if session.report.cancelled {
        warn!(
            "time limit reached after {} of {} epochs",
            session.report.epochs_run, config.epochs
        );
    }

    if let Some(debug_path) = args.debug_path {
        write_losses(&debug_path, &session.report.losses)?;
    }

    if let Some(boundary_path) = args.boundary_path {
        let grid = BoundaryGrid {
            width: args.canvas_size,
            height: args.canvas_size,
            block_size: args.block_size,
        };
        write_boundary(&boundary_path, &session, &grid)?;
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
