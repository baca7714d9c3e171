use crate::error::Result;
use crate::network::activation::Activation;
use crate::network::neuron::Neuron;
use crate::network::Network;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NetworkData {
    pub learning_rate: f64,
    pub layers: Vec<LayerData>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NeuronData {
    pub weights: Vec<f64>,
    pub bias: f64,
    pub activation: String,
    pub learning_rate: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LayerData {
    pub neurons: Vec<NeuronData>,
}

impl From<&Neuron> for NeuronData {
    fn from(neuron: &Neuron) -> Self {
        NeuronData {
            weights: neuron.weights.clone(),
            bias: neuron.bias,
            activation: neuron.activation().to_string(),
            learning_rate: neuron.learning_rate(),
        }
    }
}

impl From<&Network> for NetworkData {
    fn from(network: &Network) -> Self {
        NetworkData {
            learning_rate: network.learning_rate(),
            layers: network
                .layers()
                .iter()
                .map(|layer| LayerData {
                    neurons: layer.iter().map(NeuronData::from).collect(),
                })
                .collect(),
        }
    }
}

impl NeuronData {
    /// build the neuron; fails on unknown activation names
    pub fn into_neuron(self) -> Result<Neuron> {
        let activation: Activation = self.activation.parse()?;
        Ok(Neuron::new(
            self.weights,
            self.bias,
            activation,
            self.learning_rate,
        ))
    }
}

impl NetworkData {
    /// build the network, checking activations and topology
    pub fn into_network(self) -> Result<Network> {
        let layers = self
            .layers
            .into_iter()
            .map(|layer| {
                layer
                    .neurons
                    .into_iter()
                    .map(NeuronData::into_neuron)
                    .collect::<Result<Vec<Neuron>>>()
            })
            .collect::<Result<Vec<Vec<Neuron>>>>()?;
        Network::from_layers(layers, self.learning_rate)
    }
}

/// Read a network previously written by 'save_to_file'
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Network> {
    let read = fs::read_to_string(path.as_ref())?;
    let data: NetworkData = serde_json::from_str(&read)?;
    info!(path = ?path.as_ref(), layers = data.layers.len(), "network loaded");
    data.into_network()
}

/// Write all weights, biases and settings of 'network' as JSON
pub fn save_to_file<P: AsRef<Path>>(network: &Network, path: P) -> Result<()> {
    let serialized = serde_json::to_string_pretty(&NetworkData::from(network))?;
    fs::write(path.as_ref(), serialized)?;
    info!(path = ?path.as_ref(), "network saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::network::activation::StepConvention;
    use tempfile::tempdir;

    fn sample_network() -> Network {
        Network::from_layers(
            vec![
                vec![
                    Neuron::new(vec![0.5, -0.4], 0.1, Activation::Sigmoid, 0.1),
                    Neuron::new(
                        vec![-0.3, 0.8],
                        -0.2,
                        Activation::Step(StepConvention::Bipolar),
                        0.2,
                    ),
                ],
                vec![Neuron::new(vec![0.6, -0.7], 0.3, Activation::Sigmoid, 0.1)],
            ],
            0.5,
        )
        .unwrap()
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        let network = sample_network();

        save_to_file(&network, &path).unwrap();
        let loaded = load_from_file(&path).unwrap();

        assert_eq!(loaded.snapshot(), network.snapshot());
        assert_eq!(loaded.learning_rate(), 0.5);
        assert_eq!(
            loaded.layers()[0][1].activation(),
            Activation::Step(StepConvention::Bipolar)
        );
        assert_eq!(loaded.layers()[0][1].learning_rate(), 0.2);
    }

    #[test]
    fn test_unknown_activation_rejected() {
        let data = NetworkData {
            learning_rate: 0.5,
            layers: vec![LayerData {
                neurons: vec![NeuronData {
                    weights: vec![0.1],
                    bias: 0.0,
                    activation: "tanh".to_string(),
                    learning_rate: 0.1,
                }],
            }],
        };
        assert!(matches!(
            data.into_network(),
            Err(Error::UnsupportedActivation(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_from_file(dir.path().join("missing.json")),
            Err(Error::Io(_))
        ));
    }
}
