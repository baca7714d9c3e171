use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the network, trainers and analyser can report
#[derive(Error, Debug)]
pub enum Error {
    /// the input vector length differs from the number of weights of a neuron
    #[error("input mismatch: expected {expected} inputs, got {actual}")]
    InputMismatch { expected: usize, actual: usize },

    /// activation name not recognised while building a neuron
    #[error("unsupported activation: {0}")]
    UnsupportedActivation(String),

    /// problem name not recognised while building a trainer
    #[error("unknown problem: {0}")]
    UnknownProblem(String),

    /// network without layers, or with an empty layer
    #[error("network has no neurons to evaluate")]
    EmptyNetwork,

    /// two weight snapshots do not have the same nesting
    #[error("weight snapshots have different shapes")]
    ShapeMismatch,

    /// a data file used for resuming does not start with an iteration number
    #[error("cannot read iteration from {path:?}: {line:?}")]
    CorruptLog { path: PathBuf, line: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
