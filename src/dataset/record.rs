use serde::{Serialize, Deserialize};

use crate::error::{NeuralError, Result};

/// What a record is expected to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Target {
    /// Encoded class index (single-output and one-hot tasks).
    Class(usize),
    /// Full expected output vector (multi-output / bitwise tasks).
    Vector(Vec<f64>),
}

/// A feature vector with its expected output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub features: Vec<f64>,
    pub target: Target,
    /// Label text as read from the source, before encoding.
    pub raw_label: Option<String>,
}

impl Record {
    pub fn with_class(features: Vec<f64>, class: usize) -> Record {
        Record { features, target: Target::Class(class), raw_label: None }
    }

    pub fn with_vector(features: Vec<f64>, expected: Vec<f64>) -> Record {
        Record { features, target: Target::Vector(expected), raw_label: None }
    }

    /// Record whose label is still raw text; the class is filled in by
    /// `LabelEncoder::apply`.
    pub fn unlabeled(features: Vec<f64>, raw_label: String) -> Record {
        Record { features, target: Target::Class(0), raw_label: Some(raw_label) }
    }

    pub fn class(&self) -> Result<usize> {
        match self.target {
            Target::Class(c) => Ok(c),
            Target::Vector(_) => Err(NeuralError::TargetKind { expected: "class index" }),
        }
    }

    /// Class index as the `0.0` / `1.0` style scalar the perceptron compares against.
    pub fn expected_scalar(&self) -> Result<f64> {
        self.class().map(|c| c as f64)
    }

    pub fn expected_vector(&self) -> Result<&[f64]> {
        match &self.target {
            Target::Vector(v) => Ok(v),
            Target::Class(_) => Err(NeuralError::TargetKind { expected: "vector" }),
        }
    }
}
