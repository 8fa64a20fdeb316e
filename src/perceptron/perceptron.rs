use serde::{Serialize, Deserialize};

use crate::dataset::record::Record;
use crate::error::Result;
use crate::layers::unit::Unit;
use crate::math::random::seeded;

/// How `Perceptron::train` prepares weights before the first epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightInit {
    /// Keep whatever the unit currently holds.
    Keep,
    /// Zero weights and bias.
    Zero,
    /// N(0, 1) weights and bias from the given seed.
    Random { seed: u64 },
}

/// Squared errors accumulated over a whole training run, before and after
/// each individual update. Diagnostics only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainSummary {
    pub epochs: usize,
    pub squared_error_before: f64,
    pub squared_error_after: f64,
}

/// Single-unit binary classifier trained online with the perceptron rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perceptron {
    pub unit: Unit,
}

impl Perceptron {
    /// Zero-initialized perceptron over `features` inputs.
    pub fn new(features: usize, learning_rate: f64) -> Perceptron {
        Perceptron { unit: Unit::zeroed(features, learning_rate) }
    }

    /// `1.0` when `w·x + b >= 0`, else `0.0`.
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        if self.unit.net_input(features)? < 0.0 {
            Ok(0.0)
        } else {
            Ok(1.0)
        }
    }

    /// Applies one online update for `record` and returns the prediction
    /// error before and after it.
    pub fn update_weights(&mut self, record: &Record) -> Result<(f64, f64)> {
        let expected = record.expected_scalar()?;
        let before = expected - self.predict(&record.features)?;

        let lr = self.unit.learning_rate;
        self.unit.bias += lr * before;
        for (w, x) in self.unit.weights.iter_mut().zip(record.features.iter()) {
            *w += lr * before * x;
        }

        let after = expected - self.predict(&record.features)?;
        Ok((before, after))
    }

    /// Runs `epochs` full passes over `records`, updating after every record.
    ///
    /// With `WeightInit::Zero` or `Random` the weight vector is resized to the
    /// feature count of the first record. An empty record set leaves the
    /// unit untouched.
    pub fn train(&mut self, records: &[Record], epochs: usize, init: WeightInit) -> Result<TrainSummary> {
        let mut summary = TrainSummary { epochs, ..TrainSummary::default() };
        let Some(first) = records.first() else {
            return Ok(summary);
        };

        let dim = first.features.len();
        match init {
            WeightInit::Keep => {}
            WeightInit::Zero => {
                self.unit.weights = vec![0.0; dim];
                self.unit.bias = 0.0;
            }
            WeightInit::Random { seed } => {
                let lr = self.unit.learning_rate;
                self.unit = Unit::random(dim, 1.0, &mut seeded(seed));
                self.unit.learning_rate = lr;
            }
        }

        for epoch in 0..epochs {
            for record in records {
                let (before, after) = self.update_weights(record)?;
                summary.squared_error_before += before * before;
                summary.squared_error_after += after * after;
            }
            log::debug!(
                "perceptron epoch {}: squared error before {:.4}, after {:.4}",
                epoch + 1,
                summary.squared_error_before,
                summary.squared_error_after
            );
        }

        Ok(summary)
    }
}
