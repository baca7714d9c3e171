use crate::error::{Error, Result};
use crate::snapshot::{Snapshot, WeightTree};
use rand::Rng;
use tracing::debug;

pub mod activation;
pub mod json;
pub mod neuron;

use activation::Activation;
use neuron::Neuron;

/// learning rate used by the network-level delta when none is configured
pub const DEFAULT_NETWORK_LEARNING_RATE: f64 = 0.5;

/// The struct Network represents a feed-forward multi-layer perceptron.
/// All the Neurons inside the network belong to a layer and
/// each layer collects its own Neurons inside a Vec. The set
/// of all Vec representing layers is then collected inside an
/// outer Vec. Layer 0 is the one fed with the network inputs, the
/// last layer produces the network outputs.
///
/// Every Neuron of layer 'k' accepts as many inputs as the number of
/// Neurons in layer 'k-1' (the number of network inputs for layer 0).
#[derive(Clone, Debug)]
pub struct Network {
    layers: Vec<Vec<Neuron>>,        // Vec collecting layers (other Vecs)
    learning_rate: f64,              // scales the delta shared by each layer
    last_layer_inputs: Vec<Vec<f64>>, // vector fed to each layer by the last forward pass
}

impl Network {
    /// Create a network without layers
    pub fn new(learning_rate: f64) -> Self {
        Network {
            layers: Vec::new(),
            learning_rate,
            last_layer_inputs: Vec::new(),
        }
    }

    /// Create a network from a complete topology, checking that each layer
    /// accepts the outputs of the previous one
    pub fn from_layers(layers: Vec<Vec<Neuron>>, learning_rate: f64) -> Result<Self> {
        if layers.is_empty() || layers.iter().any(|layer| layer.is_empty()) {
            return Err(Error::EmptyNetwork);
        }

        for (previous, layer) in layers.iter().zip(layers.iter().skip(1)) {
            if let Some(neuron) = layer.iter().find(|n| n.input_count() != previous.len()) {
                return Err(Error::InputMismatch {
                    expected: previous.len(),
                    actual: neuron.input_count(),
                });
            }
        }

        if let Some(first) = layers[0].first() {
            let n_inputs = first.input_count();
            if let Some(neuron) = layers[0].iter().find(|n| n.input_count() != n_inputs) {
                return Err(Error::InputMismatch {
                    expected: n_inputs,
                    actual: neuron.input_count(),
                });
            }
        }

        Ok(Network {
            layers,
            learning_rate,
            last_layer_inputs: Vec::new(),
        })
    }

    /// Create a network accepting 'n_inputs' inputs, with one layer for each
    /// entry of 'layer_sizes', randomly initialized
    pub fn random<R: Rng + ?Sized>(
        n_inputs: usize,
        layer_sizes: &[usize],
        activation: Activation,
        neuron_learning_rate: f64,
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let mut layers = Vec::new();
        let mut layer_inputs = n_inputs;
        for &size in layer_sizes {
            layers.push(
                (0..size)
                    .map(|_| Neuron::random(layer_inputs, activation, neuron_learning_rate, &mut *rng))
                    .collect(),
            );
            layer_inputs = size;
        }
        Network::from_layers(layers, learning_rate)
    }

    /// Add a layer to the network
    pub fn add_layer(&mut self, layer: Vec<Neuron>) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &Vec<Vec<Neuron>> {
        &self.layers
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Inputs received by each layer during the last forward pass
    /// (index 0 holds the network inputs)
    pub fn last_layer_inputs(&self) -> &Vec<Vec<f64>> {
        &self.last_layer_inputs
    }

    /// Get output nodes number
    pub fn get_outputs_number(&self) -> Result<usize> {
        match self.layers.last() {
            Some(layer) => Ok(layer.len()),
            None => Err(Error::EmptyNetwork),
        }
    }

    /// Propagate 'inputs' through all the layers and return the outputs of the
    /// last one. Layer 'k' is fed with the outputs of layer 'k-1'; the vector
    /// fed to every layer is kept for backpropagation.
    pub fn feed_forward(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        if self.layers.is_empty() {
            return Err(Error::EmptyNetwork);
        }

        self.last_layer_inputs.clear();
        let mut current = inputs.to_vec();

        for layer in self.layers.iter_mut() {
            let outputs = layer
                .iter_mut()
                .map(|neuron| neuron.feed_forward(&current))
                .collect::<Result<Vec<f64>>>()?;
            self.last_layer_inputs
                .push(std::mem::replace(&mut current, outputs));
        }

        Ok(current)
    }

    /// Simplified backpropagation.
    ///
    /// The error of the first output against 'expected_output' gives a delta
    /// (error * learning_rate) shared by every neuron of the last layer. Going
    /// backwards, the error of layer 'k' is the sum, over the neurons of layer
    /// 'k+1', of bias * delta + sum(weights) * delta; all neurons of layer 'k'
    /// are updated with the same delta derived from it.
    ///
    /// Returns true only when the error computed for layer 0 is exactly 0.
    pub fn train(&mut self, inputs: &[f64], expected_output: f64) -> Result<bool> {
        let outputs = self.feed_forward(inputs)?;
        let first_output = *outputs.first().ok_or(Error::EmptyNetwork)?;

        let mut error = expected_output - first_output;
        let mut delta = error * self.learning_rate;

        let last = self.layers.len() - 1;
        for neuron in self.layers[last].iter_mut() {
            neuron.update_weights_and_bias(&self.last_layer_inputs[last], delta);
        }

        for layer_nr in (0..last).rev() {
            error = self.layers[layer_nr + 1]
                .iter()
                .map(|neuron| neuron.bias * delta + neuron.weights.iter().sum::<f64>() * delta)
                .sum();
            delta = error * self.learning_rate;

            for neuron in self.layers[layer_nr].iter_mut() {
                neuron.update_weights_and_bias(&self.last_layer_inputs[layer_nr], delta);
            }
        }

        debug!(error, delta, "network trained on one sample");

        Ok(error == 0.0)
    }

    /// Nested copy of all weights: layers -> neurons -> weights + bias
    pub fn snapshot(&self) -> WeightTree {
        WeightTree::Row(
            self.layers
                .iter()
                .map(|layer| WeightTree::Row(layer.iter().map(|n| n.snapshot()).collect()))
                .collect(),
        )
    }
}

impl Snapshot for Network {
    fn snapshot(&self) -> WeightTree {
        Network::snapshot(self)
    }

    fn subject_name(&self) -> &'static str {
        "Network"
    }
}
