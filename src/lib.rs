//! # mlp
//!
//! A minimal feed-forward multi-layer perceptron with a simplified,
//! shared-delta backpropagation rule, trainers for small logic and
//! geometry problems, and an analyser recording weight trajectories.
//!
//! ## Modules
//!
//! - `network`: Neuron, activations, Network and its JSON persistence
//! - `trainer`: problems (OR, AND, XOR, straight line) and the Trainer
//! - `analyser`: per-weight time series on disk and gnuplot scripts
//! - `snapshot`: nested weight snapshots and their differences
//! - `config`: run configuration
//! - `logging`: tracing subscriber setup

pub mod analyser;
pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod snapshot;
pub mod trainer;

pub use analyser::Analyser;
pub use error::{Error, Result};
pub use network::activation::{Activation, StepConvention};
pub use network::neuron::Neuron;
pub use network::Network;
pub use snapshot::{compare_weights, Snapshot, WeightTree};
pub use trainer::{Model, Problem, Trainer, TrainingSummary};
