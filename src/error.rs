use thiserror::Error;

/// Errors produced by the learning engine, the validation harness and the
/// dataset helpers.
#[derive(Debug, Error)]
pub enum NeuralError {
    /// A feature, weight or target vector does not have the length the
    /// receiving structure expects.
    #[error("dimension mismatch: expected {expected} values, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("cannot compare {actual} actual values with {predicted} predictions")]
    LengthMismatch { actual: usize, predicted: usize },

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("cannot split {records} records into {k} folds")]
    InvalidFolds { k: usize, records: usize },

    #[error("cannot run {0} subsampling rounds")]
    InvalidRounds(usize),

    /// A split left nothing to train on.
    #[error("split left no training records ({held_out} held out for testing)")]
    EmptyTrainingSplit { held_out: usize },

    #[error("split percentage {0} is outside (0, 1)")]
    InvalidSplit(f64),

    #[error("invalid network topology: {0}")]
    InvalidTopology(String),

    #[error("network has no context block")]
    NotRecurrent,

    #[error("classifier has not been fitted")]
    NotFitted,

    #[error("class index {class} is out of range for {classes} classes")]
    UnknownClass { class: usize, classes: usize },

    /// The record carries the wrong kind of target for the operation.
    #[error("record target is not a {expected}")]
    TargetKind { expected: &'static str },

    #[error("row {row}: {message}")]
    Csv { row: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NeuralError>;
