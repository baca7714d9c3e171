use crate::analyser::Analyser;
use crate::error::{Error, Result};
use crate::network::neuron::Neuron;
use crate::network::Network;
use crate::snapshot::Snapshot;
use tracing::{debug, info};

pub mod problem;

pub use problem::{problem_from_name, Gate, LogicGate, Problem, StraightLine};

/// largest distance between output and expected value counted as a pass
pub const DEFAULT_THRESHOLD: f64 = 0.01;
/// number of passes over the whole domain when none is configured
pub const DEFAULT_ITERATIONS: u64 = 100_000;

/// Something a trainer can drive: a single Neuron or a whole Network.
pub trait Model: Snapshot {
    /// output vector for 'inputs'
    fn predict(&mut self, inputs: &[f64]) -> Result<Vec<f64>>;

    /// one training step on 'inputs'; only the first expected value is used.
    /// Returns true on an exact match.
    fn train(&mut self, inputs: &[f64], expected: &[f64]) -> Result<bool>;
}

fn first_expected(expected: &[f64]) -> Result<f64> {
    expected.first().copied().ok_or(Error::InputMismatch {
        expected: 1,
        actual: 0,
    })
}

impl Model for Neuron {
    fn predict(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        Ok(vec![self.feed_forward(inputs)?])
    }

    fn train(&mut self, inputs: &[f64], expected: &[f64]) -> Result<bool> {
        Neuron::train(self, inputs, first_expected(expected)?)
    }
}

impl Model for Network {
    fn predict(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.feed_forward(inputs)
    }

    fn train(&mut self, inputs: &[f64], expected: &[f64]) -> Result<bool> {
        Network::train(self, inputs, first_expected(expected)?)
    }
}

/// true when 'a' and 'b' differ by less than 'threshold'
pub fn are_floats_equal(a: f64, b: f64, threshold: f64) -> bool {
    (a - b).abs() < threshold
}

/// Outcome of a call to Trainer::train
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrainingSummary {
    pub epochs: u64,     // full passes over the domain actually run
    pub converged: bool, // last epoch matched every case exactly
}

/// Trains and evaluates a model on a Problem.
pub struct Trainer<P: Problem> {
    problem: P,
    threshold: f64,
    failures: Vec<String>,
}

impl<P: Problem> Trainer<P> {
    pub fn new(problem: P, threshold: f64) -> Self {
        Trainer {
            problem,
            threshold,
            failures: Vec::new(),
        }
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// cases that failed during the last call to test
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Feed every case of the domain to 'model' and return the percentage of
    /// outputs within the threshold of the expected value.
    pub fn test<M: Model + ?Sized>(&mut self, model: &mut M) -> Result<f64> {
        self.failures.clear();
        let domain = self.problem.domain();
        let mut passed = 0;

        for inputs in domain.iter() {
            let expected = self.problem.expected(inputs);
            let actual = model.predict(inputs)?.first().copied().ok_or(Error::EmptyNetwork)?;

            if are_floats_equal(actual, expected, self.threshold) {
                passed += 1;
            } else {
                self.failures.push(format!(
                    "For inputs {} expected {} but got {}",
                    inputs
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<String>>()
                        .join(","),
                    expected,
                    actual
                ));
            }
        }

        if domain.is_empty() {
            return Ok(0.0);
        }
        Ok(passed as f64 / domain.len() as f64 * 100.0)
    }

    /// Run up to 'iterations' passes over the whole domain. The analyser, if
    /// any, records once after each pass. Training stops early after a pass
    /// in which every case matched exactly.
    pub fn train<M: Model + ?Sized>(
        &mut self,
        model: &mut M,
        mut analyser: Option<&mut Analyser>,
        iterations: u64,
    ) -> Result<TrainingSummary> {
        let domain = self.problem.domain();
        let expected: Vec<f64> = domain.iter().map(|i| self.problem.expected(i)).collect();
        let report_every = (iterations / 10).max(1);

        info!(
            problem = self.problem.name(),
            iterations,
            cases = domain.len(),
            "training started"
        );

        let mut summary = TrainingSummary {
            epochs: 0,
            converged: false,
        };

        for epoch in 0..iterations {
            let mut all_matched = true;
            for (inputs, expected) in domain.iter().zip(expected.iter()) {
                let matched = model.train(inputs, &[*expected])?;
                all_matched &= matched;
            }

            if let Some(analyser) = analyser.as_deref_mut() {
                analyser.record(&*model, None)?;
            }

            summary.epochs = epoch + 1;
            if all_matched {
                summary.converged = true;
                info!(epoch = summary.epochs, "every case matched, training stopped");
                break;
            }

            if summary.epochs % report_every == 0 {
                debug!(epoch = summary.epochs, "training in progress");
            }
        }

        info!(
            problem = self.problem.name(),
            epochs = summary.epochs,
            converged = summary.converged,
            "training finished"
        );
        Ok(summary)
    }
}
