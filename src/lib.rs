pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod perceptron;
pub mod network;
pub mod train;
pub mod dataset;
pub mod validation;

#[cfg(test)]
mod tests;

// Convenience re-exports
pub use error::{NeuralError, Result};
pub use activation::{ActivationFunction, GradientRule};
pub use layers::{Layer, Unit};
pub use perceptron::{Perceptron, WeightInit};
pub use network::{Network, NetworkSpec};
pub use train::{elman_train, mlp_train, EpochStats, TrainConfig};
pub use dataset::{LabelEncoder, MalformedPolicy, Record, Target};
pub use validation::{k_fold_validation, random_subsampling_validation, Classifier, ValidationReport};
