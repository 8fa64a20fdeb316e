use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::math::random::standard_normal;
use crate::math::vector::dot;

/// A single trainable unit.
///
/// `value` and `delta` are scratch space for the current forward/backward
/// pass and carry no meaning outside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub weights: Vec<f64>,
    pub bias: f64,
    /// Step size for online perceptron updates. Networks use their own rate.
    pub learning_rate: f64,
    pub value: f64,
    pub delta: f64,
}

impl Unit {
    /// Unit with all weights and bias set to zero.
    pub fn zeroed(fan_in: usize, learning_rate: f64) -> Unit {
        Unit {
            weights: vec![0.0; fan_in],
            bias: 0.0,
            learning_rate,
            value: 0.0,
            delta: 0.0,
        }
    }

    /// Unit whose weights, bias, learning rate and scratch values are drawn
    /// from N(0, 1) and multiplied by `scale`.
    pub fn random<R: Rng + ?Sized>(fan_in: usize, scale: f64, rng: &mut R) -> Unit {
        let weights = (0..fan_in).map(|_| standard_normal(rng) * scale).collect();
        Unit {
            weights,
            bias: standard_normal(rng) * scale,
            learning_rate: standard_normal(rng) * scale,
            value: standard_normal(rng) * scale,
            delta: standard_normal(rng) * scale,
        }
    }

    pub fn fan_in(&self) -> usize {
        self.weights.len()
    }

    /// `w·x + b`, failing when `inputs` does not match the fan-in.
    pub fn net_input(&self, inputs: &[f64]) -> Result<f64> {
        Ok(dot(&self.weights, inputs)? + self.bias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NeuralError;
    use crate::math::random::seeded;

    #[test]
    fn random_unit_is_reproducible() {
        let a = Unit::random(4, 0.5, &mut seeded(3));
        let b = Unit::random(4, 0.5, &mut seeded(3));
        assert_eq!(a, b);
        assert_eq!(a.fan_in(), 4);
    }

    #[test]
    fn scale_shrinks_initial_weights() {
        let unit = Unit::random(32, 1e-13, &mut seeded(11));
        assert!(unit.weights.iter().all(|w| w.abs() < 1e-11));
        assert!(unit.bias.abs() < 1e-11);
    }

    #[test]
    fn net_input_checks_fan_in() {
        let mut unit = Unit::zeroed(2, 0.1);
        unit.weights = vec![0.5, -1.0];
        unit.bias = 0.25;
        assert!((unit.net_input(&[2.0, 1.0]).unwrap() - 0.25).abs() < 1e-12);
        assert!(matches!(
            unit.net_input(&[1.0, 2.0, 3.0]),
            Err(NeuralError::DimensionMismatch { expected: 2, found: 3 })
        ));
    }
}
