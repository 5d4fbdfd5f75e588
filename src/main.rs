//! ferrite-mlp command-line driver.
//!
//! Run with:
//!   cargo run -- gates
//!   cargo run -- xor --epochs 3000
//!   cargo run -- segments --seed 7
//!   cargo run -- run --spec xor.json --dataset xor

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ferrite_mlp::data::{self, gates};
use ferrite_mlp::{train_loop, EpochStats, Network, NetworkSpec, Neuron, Sample, TrainConfig};

#[derive(Parser)]
#[command(name = "ferrite-mlp")]
#[command(about = "Train tiny sigmoid multilayer perceptrons with backpropagation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Seed for the initial weights; omitted means a fresh random seed
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Print per-epoch statistics as JSON lines
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate hand-weighted AND/OR/NAND perceptrons and a hand-built XOR network
    Gates,

    /// Train a 2-2-1 network on XOR
    Xor {
        #[command(flatten)]
        train: TrainArgs,

        /// Number of epochs
        #[arg(short, long, default_value = "3000")]
        epochs: usize,
    },

    /// Train a 7-7-10 network to recognise seven-segment digits
    Segments {
        #[command(flatten)]
        train: TrainArgs,

        /// Number of epochs
        #[arg(short, long, default_value = "1000")]
        epochs: usize,
    },

    /// Train a network described by a JSON spec file
    Run {
        /// Path to the network spec
        #[arg(long)]
        spec: String,

        /// Dataset to train on
        #[arg(short, long, value_enum)]
        dataset: Dataset,

        /// Number of epochs
        #[arg(short, long, default_value = "1000")]
        epochs: usize,

        /// Log the epoch MSE every this many epochs
        #[arg(long, default_value = "100")]
        log_interval: usize,
    },
}

#[derive(Args)]
struct TrainArgs {
    /// Learning rate
    #[arg(long, default_value = "0.5")]
    learning_rate: f64,

    /// Bias input fed to every neuron
    #[arg(long, default_value = "1.0")]
    bias: f64,

    /// Log the epoch MSE every this many epochs
    #[arg(long, default_value = "100")]
    log_interval: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum Dataset {
    And,
    Or,
    Xor,
    Segments,
}

impl Dataset {
    fn samples(self) -> Vec<Sample> {
        match self {
            Dataset::And => data::and(),
            Dataset::Or => data::or(),
            Dataset::Xor => data::xor(),
            Dataset::Segments => data::seven_segment(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!("Weight seed: {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    match cli.command {
        Commands::Gates => run_gates(&mut rng)?,
        Commands::Xor { train, epochs } => {
            let mut network = Network::new(&[2, 2, 1], train.bias, train.learning_rate, &mut rng)?;
            let samples = data::xor();
            let history = train_loop(&mut network, &samples, &TrainConfig::new(epochs, train.log_interval))?;
            report_history(&history, cli.json)?;

            println!("\nTrained weights (compare to the hand-coded gates):\n");
            print_weights(&network);
            print_truth_table(&mut network, "XOR")?;
        }
        Commands::Segments { train, epochs } => {
            let mut network = Network::new(&[7, 7, 10], train.bias, train.learning_rate, &mut rng)?;
            let samples = data::seven_segment();
            let history = train_loop(&mut network, &samples, &TrainConfig::new(epochs, train.log_interval))?;
            report_history(&history, cli.json)?;
            print_digit_scores(&mut network, &samples)?;
        }
        Commands::Run { spec, dataset, epochs, log_interval } => {
            let mut spec = NetworkSpec::load_json(&spec)?;
            if spec.seed.is_none() {
                spec.seed = Some(seed);
            }
            info!("Loaded spec '{}' with layers {:?}", spec.name, spec.layer_sizes);

            let mut network = Network::from_spec(&spec)?;
            let samples = dataset.samples();
            let history = train_loop(&mut network, &samples, &TrainConfig::new(epochs, log_interval))?;
            report_history(&history, cli.json)?;

            print_weights(&network);
            for sample in &samples {
                let output = network.forward(&sample.input)?;
                println!("{:?} -> {}", sample.input, format_values(&output));
            }
        }
    }

    Ok(())
}

fn run_gates(rng: &mut StdRng) -> Result<()> {
    println!("-------- Logic gate perceptrons --------\n");
    let mut perceptron = Neuron::new(2, 1.0, rng);
    for (name, weights) in [
        ("AND", gates::AND_WEIGHTS),
        ("OR", gates::OR_WEIGHTS),
        ("NAND", gates::NAND_WEIGHTS),
    ] {
        perceptron.replace_weights(weights.to_vec())?;
        println!("{name} gate:");
        for [a, b] in gates::binary_inputs() {
            println!("A={a} {name} B={b} ==> {:.4}", perceptron.evaluate(&[a, b])?);
        }
        println!();
    }

    println!("-------- Hand-coded XOR network --------\n");
    // XOR = (A NAND B) AND (A OR B)
    let mut network = Network::with_defaults(&[2, 2, 1], rng)?;
    network.set_weights(gates::hand_coded_xor_weights())?;
    print_weights(&network);
    print_truth_table(&mut network, "XOR")?;
    Ok(())
}

fn report_history(history: &[EpochStats], json: bool) -> Result<()> {
    if json {
        for stats in history {
            println!("{}", serde_json::to_string(stats)?);
        }
    }
    if let (Some(first), Some(last)) = (history.first(), history.last()) {
        info!(
            "Trained {} epochs: mse {:.6} -> {:.6}",
            history.len(),
            first.mse,
            last.mse
        );
    }
    Ok(())
}

fn print_weights(network: &Network) {
    println!("Weights of {} layers:", network.layer_count());
    for (offset, layer) in network.weights_snapshot().iter().enumerate() {
        for (neuron, weights) in layer.iter().enumerate() {
            println!("layer={}, neuron={}: {}", offset + 1, neuron, format_values(weights));
        }
    }
    println!();
}

fn print_truth_table(network: &mut Network, name: &str) -> Result<()> {
    for [a, b] in gates::binary_inputs() {
        let output = network.forward(&[a, b])?;
        println!("A={a} {name} B={b} ==> {:.4}", output[0]);
    }
    Ok(())
}

fn print_digit_scores(network: &mut Network, samples: &[Sample]) -> Result<()> {
    println!("\nDigit -> activation of its own output neuron:");
    for (digit, sample) in samples.iter().enumerate() {
        let output = network.forward(&sample.input)?;
        println!("{digit} = {:.4}", output[digit]);
    }
    Ok(())
}

fn format_values(values: &[f64]) -> String {
    values.iter()
        .map(|v| format!("{v:.4}"))
        .collect::<Vec<_>>()
        .join(", ")
}
