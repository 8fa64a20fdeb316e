use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::layers::unit::Unit;

/// An ordered collection of units sharing the same fan-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub units: Vec<Unit>,
}

impl Layer {
    /// Allocates `size` randomly initialized units with `fan_in` weights each.
    pub fn prepare<R: Rng + ?Sized>(size: usize, fan_in: usize, scale: f64, rng: &mut R) -> Layer {
        let units = (0..size).map(|_| Unit::random(fan_in, scale, rng)).collect();
        let layer = Layer { units };

        log::debug!("prepared layer: {} units, fan-in {}", size, fan_in);
        layer
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Fan-in shared by the units (0 for an empty layer).
    pub fn fan_in(&self) -> usize {
        self.units.first().map(Unit::fan_in).unwrap_or(0)
    }

    /// Current `value` of every unit, in order.
    pub fn values(&self) -> Vec<f64> {
        self.units.iter().map(|u| u.value).collect()
    }
}
