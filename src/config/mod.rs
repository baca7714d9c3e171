use crate::analyser::DEFAULT_PLOT_COMMAND;
use crate::error::Result;
use crate::network::activation::Activation;
use crate::network::neuron::DEFAULT_LEARNING_RATE;
use crate::network::DEFAULT_NETWORK_LEARNING_RATE;
use crate::trainer::{DEFAULT_ITERATIONS, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings of a training run, read from a JSON file.
/// Every field is optional in the file and falls back to its default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub problem: String,
    pub topology: Vec<usize>, // neurons in each layer, output layer last
    pub activation: String,
    pub network_learning_rate: f64,
    pub neuron_learning_rate: f64,
    pub iterations: u64,
    pub threshold: f64,
    pub line_max: u32,
    pub seed: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub overwrite: bool,
    pub plot: bool,
    pub plot_command: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            problem: "or".to_string(),
            topology: vec![1],
            activation: Activation::Sigmoid.to_string(),
            network_learning_rate: DEFAULT_NETWORK_LEARNING_RATE,
            neuron_learning_rate: DEFAULT_LEARNING_RATE,
            iterations: DEFAULT_ITERATIONS,
            threshold: DEFAULT_THRESHOLD,
            line_max: 5,
            seed: None,
            output_dir: None,
            overwrite: true,
            plot: false,
            plot_command: DEFAULT_PLOT_COMMAND.to_string(),
        }
    }
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let read = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&read)?)
    }

    /// fails with UnsupportedActivation on unknown names
    pub fn activation(&self) -> Result<Activation> {
        self.activation.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, r#"{ "problem": "xor", "topology": [2, 1], "seed": 9 }"#).unwrap();

        let config = RunConfig::load(&path).unwrap();
        assert_eq!(config.problem, "xor");
        assert_eq!(config.topology, vec![2, 1]);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.iterations, DEFAULT_ITERATIONS);
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.activation().unwrap(), Activation::Sigmoid);
        assert!(config.overwrite);
    }

    #[test]
    fn test_unsupported_activation() {
        let config = RunConfig {
            activation: "softmax".to_string(),
            ..RunConfig::default()
        };
        assert!(matches!(
            config.activation(),
            Err(Error::UnsupportedActivation(_))
        ));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, "{ problem: ").unwrap();
        assert!(matches!(RunConfig::load(&path), Err(Error::Json(_))));
    }
}
