use clap::Parser;
use mlp::network::activation::Activation;
use mlp::network::json::{LayerData, NetworkData, NeuronData};
use mlp::network::neuron::DEFAULT_LEARNING_RATE;
use mlp::network::DEFAULT_NETWORK_LEARNING_RATE;
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::{fs, process};

/// Write a randomly initialized network as JSON, ready for `mlp train --load`
#[derive(Parser, Debug)]
struct Cli {
    /// number of network inputs
    #[arg(long, default_value_t = 2)]
    inputs: usize,
    /// neurons per layer, output layer last
    #[arg(long, value_delimiter = ',', default_value = "2,1")]
    topology: Vec<usize>,
    #[arg(long, default_value = "sigmoid")]
    activation: String,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value = "network.json")]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // reject unknown activation names before writing anything
    let activation = match cli.activation.parse::<Activation>() {
        Ok(activation) => activation,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    /*network data struct */
    let mut nd = NetworkData {
        learning_rate: DEFAULT_NETWORK_LEARNING_RATE,
        layers: Vec::new(),
    };

    /*Random number generator for weights and biases*/
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let distr = Uniform::new_inclusive(-1.0, 1.0);

    let mut nr_inputs = cli.inputs;
    for &nr_neurons in &cli.topology {
        let mut neurons: Vec<NeuronData> = vec![];
        for _ in 0..nr_neurons {
            let weights: Vec<f64> = (0..nr_inputs).map(|_| rng.sample(distr)).collect();
            neurons.push(NeuronData {
                weights,
                bias: rng.sample(distr),
                activation: activation.to_string(),
                learning_rate: DEFAULT_LEARNING_RATE,
            });
        }
        nd.layers.push(LayerData { neurons });
        nr_inputs = nr_neurons;
    }

    let written = serde_json::to_string_pretty(&nd)
        .map_err(mlp::Error::from)
        .and_then(|serialized| fs::write(&cli.output, serialized).map_err(mlp::Error::from));

    match written {
        Ok(()) => println!("network written to {}", cli.output.display()),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}
