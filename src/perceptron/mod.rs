pub mod perceptron;

pub use perceptron::{Perceptron, TrainSummary, WeightInit};
