use crate::error::{Error, Result};
use crate::network::activation::Activation;
use crate::snapshot::{Snapshot, WeightTree};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// learning rate given to neurons when none is configured
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// The Neuron struct represents a single perceptron unit.
/// A neuron is characterized by a Vec of weights, one for each input it
/// receives, a bias and the activation function applied to the weighted sum
/// of its inputs.
///
/// Each neuron also keeps:
///
/// - the learning rate it was configured with (used as a floor)
/// - the learning rate actually used by its next update when trained on its
/// own; a sigmoid neuron raises it after each output it computes
#[derive(Clone, Debug)]
pub struct Neuron {
    pub weights: Vec<f64>, // 'i'th weight multiplies the 'i'th input
    pub bias: f64,
    activation: Activation,
    learning_rate: f64,           // configured (default) learning rate
    effective_learning_rate: f64, // rate used by the next call to train
}

impl Neuron {
    /// returns a new neuron having the specified weights and bias
    pub fn new(weights: Vec<f64>, bias: f64, activation: Activation, learning_rate: f64) -> Self {
        Neuron {
            weights,
            bias,
            activation,
            learning_rate,
            effective_learning_rate: learning_rate,
        }
    }

    /// returns a neuron accepting 'n_inputs' inputs, whose weights and bias
    /// are drawn uniformly in [-1, 1] from the provided random source
    pub fn random<R: Rng + ?Sized>(
        n_inputs: usize,
        activation: Activation,
        learning_rate: f64,
        rng: &mut R,
    ) -> Self {
        let distr = Uniform::new_inclusive(-1.0, 1.0);
        let weights = (0..n_inputs).map(|_| distr.sample(&mut *rng)).collect();
        let bias = distr.sample(rng);
        Neuron::new(weights, bias, activation, learning_rate)
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn effective_learning_rate(&self) -> f64 {
        self.effective_learning_rate
    }

    pub fn input_count(&self) -> usize {
        self.weights.len()
    }

    /// compute the weighted sum of the inputs plus the bias and return the
    /// activation of that sum.
    /// A sigmoid neuron also updates its effective learning rate to
    /// max(sigmoid'(output), learning_rate).
    pub fn feed_forward(&mut self, inputs: &[f64]) -> Result<f64> {
        let output = self.activation.apply(self.weighted_sum(inputs)?);

        if self.activation.adapts_learning_rate() {
            self.effective_learning_rate = self
                .activation
                .derivative_from_output(output)
                .max(self.learning_rate);
        }

        Ok(output)
    }

    /// perceptron rule: guess, compute the error against the expected output
    /// and move weights and bias by error * effective learning rate.
    /// Returns true only when the guess was exactly the expected value.
    pub fn train(&mut self, inputs: &[f64], expected_output: f64) -> Result<bool> {
        let guess = self.feed_forward(inputs)?;
        let error = expected_output - guess;
        let delta = error * self.effective_learning_rate;
        self.update_weights_and_bias(inputs, delta);

        Ok(error == 0.0)
    }

    /// bias += delta, weights[i] += inputs[i] * delta
    pub fn update_weights_and_bias(&mut self, inputs: &[f64], delta: f64) {
        self.bias += delta;
        for (weight, input) in self.weights.iter_mut().zip(inputs) {
            *weight += input * delta;
        }
    }

    /// weights followed by the bias as trailing element
    pub fn snapshot(&self) -> WeightTree {
        WeightTree::Row(
            self.weights
                .iter()
                .chain(std::iter::once(&self.bias))
                .map(|value| WeightTree::Leaf(*value))
                .collect(),
        )
    }

    fn weighted_sum(&self, inputs: &[f64]) -> Result<f64> {
        if inputs.len() != self.weights.len() {
            return Err(Error::InputMismatch {
                expected: self.weights.len(),
                actual: inputs.len(),
            });
        }

        let mut sum = 0.0;
        for (weight, input) in self.weights.iter().zip(inputs) {
            sum += weight * input;
        }

        Ok(sum + self.bias)
    }
}

impl Snapshot for Neuron {
    fn snapshot(&self) -> WeightTree {
        Neuron::snapshot(self)
    }

    fn subject_name(&self) -> &'static str {
        "Neuron"
    }
}
