use serde::{Serialize, Deserialize};

use crate::error::{NeuralError, Result};

/// Count of exact matches between actual and predicted labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accuracy {
    pub correct: usize,
    pub total: usize,
}

impl Accuracy {
    /// Correct predictions as a percentage in [0, 100].
    pub fn percentage(&self) -> f64 {
        self.correct as f64 / self.total as f64 * 100.0
    }
}

pub fn accuracy(actual: &[f64], predicted: &[f64]) -> Result<Accuracy> {
    if actual.len() != predicted.len() {
        return Err(NeuralError::LengthMismatch { actual: actual.len(), predicted: predicted.len() });
    }
    if actual.is_empty() {
        return Err(NeuralError::EmptyDataset);
    }
    let correct = actual.iter().zip(predicted).filter(|(a, p)| a == p).count();
    Ok(Accuracy { correct, total: actual.len() })
}

pub fn mean(scores: &[f64]) -> Result<f64> {
    if scores.is_empty() {
        return Err(NeuralError::EmptyDataset);
    }
    Ok(scores.iter().sum::<f64>() / scores.len() as f64)
}
