use clap::{Args, Parser, Subcommand};
use mlp::analyser::Analyser;
use mlp::config::RunConfig;
use mlp::network::json;
use mlp::network::Network;
use mlp::trainer::{problem_from_name, Trainer, DEFAULT_THRESHOLD};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::error;

/// Train and evaluate small feed-forward networks on toy problems
#[derive(Parser, Debug)]
#[command(name = "mlp", version, about)]
struct Cli {
    /// log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// train a network on a problem
    Train(TrainArgs),
    /// evaluate a saved network on a problem
    Test(TestArgs),
}

#[derive(Args, Debug)]
struct TrainArgs {
    /// JSON run configuration; command line options override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// or, and, xor, line
    #[arg(long)]
    problem: Option<String>,
    /// neurons per layer, e.g. 2,1
    #[arg(long, value_delimiter = ',')]
    topology: Option<Vec<usize>>,
    /// step, step-bipolar, sigmoid
    #[arg(long)]
    activation: Option<String>,
    #[arg(long)]
    iterations: Option<u64>,
    #[arg(long)]
    seed: Option<u64>,
    /// directory for the analyser data files
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// keep and continue existing analyser data
    #[arg(long)]
    resume: bool,
    /// render weights/adjustments plots at the end
    #[arg(long)]
    plot: bool,
    /// start from a saved network instead of a random one
    #[arg(long)]
    load: Option<PathBuf>,
    /// save the trained network
    #[arg(long)]
    save: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TestArgs {
    /// saved network
    #[arg(long)]
    load: PathBuf,
    #[arg(long, default_value = "or")]
    problem: String,
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,
    #[arg(long, default_value_t = 5)]
    line_max: u32,
}

impl TrainArgs {
    /// command line values take precedence over the configuration file
    fn apply(&self, config: &mut RunConfig) {
        if let Some(problem) = &self.problem {
            config.problem = problem.clone();
        }
        if let Some(topology) = &self.topology {
            config.topology = topology.clone();
        }
        if let Some(activation) = &self.activation {
            config.activation = activation.clone();
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.output_dir.is_some() {
            config.output_dir = self.output_dir.clone();
        }
        if self.resume {
            config.overwrite = false;
        }
        if self.plot {
            config.plot = true;
        }
    }
}

/// "false" value expected from the network, given its output neuron
fn false_value(network: &Network) -> f64 {
    network
        .layers()
        .last()
        .and_then(|layer| layer.first())
        .map(|neuron| neuron.activation().false_value())
        .unwrap_or(0.0)
}

fn train(args: TrainArgs) -> mlp::Result<()> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    args.apply(&mut config);

    let activation = config.activation()?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut network = match &args.load {
        Some(path) => json::load_from_file(path)?,
        None => Network::random(
            2,
            &config.topology,
            activation,
            config.neuron_learning_rate,
            config.network_learning_rate,
            &mut rng,
        )?,
    };

    let problem = problem_from_name(&config.problem, false_value(&network), config.line_max)?;
    let mut trainer = Trainer::new(problem, config.threshold);

    let mut analyser = match &config.output_dir {
        Some(dir) => Some(
            Analyser::new(&network, dir, config.overwrite)?
                .with_plot_command(Some(config.plot_command.clone())),
        ),
        None => None,
    };

    let summary = trainer.train(&mut network, analyser.as_mut(), config.iterations)?;
    let accuracy = trainer.test(&mut network)?;

    println!(
        "{}: {} epochs (converged: {}), accuracy {:.2}%",
        config.problem, summary.epochs, summary.converged, accuracy
    );
    for failure in trainer.failures() {
        println!("{failure}");
    }

    if config.plot {
        if let Some(analyser) = &analyser {
            analyser.generate_plots()?;
        }
    }

    if let Some(path) = &args.save {
        json::save_to_file(&network, path)?;
    }

    Ok(())
}

fn test(args: TestArgs) -> mlp::Result<()> {
    let mut network = json::load_from_file(&args.load)?;
    let problem = problem_from_name(&args.problem, false_value(&network), args.line_max)?;
    let mut trainer = Trainer::new(problem, args.threshold);

    let accuracy = trainer.test(&mut network)?;
    println!("{}: accuracy {:.2}%", args.problem, accuracy);
    for failure in trainer.failures() {
        println!("{failure}");
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    mlp::logging::init(&cli.log_level);

    let result = match cli.command {
        Command::Train(args) => train(args),
        Command::Test(args) => test(args),
    };

    if let Err(e) = result {
        error!(error = %e, "run failed");
        std::process::exit(1);
    }
}
