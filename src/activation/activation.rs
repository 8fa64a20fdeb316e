use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Transfer function shared by every unit of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    /// Step function: 1 for x >= 0, 0 otherwise.
    Heaviside,
    Sigmoid,
    Tanh,
}

/// Selects which derivative backpropagation multiplies deltas by.
///
/// - `Reference` — the historical derivatives: constant `1.0` for Heaviside
///   and Sigmoid, `1 - x²` for Tanh. Sigmoid under this rule is not a true
///   gradient and does not converge on problems that need hidden units.
/// - `Analytic`  — textbook derivatives written in terms of the unit's
///   activated output `y`: Sigmoid `y·(1 - y)`, Tanh `1 - y²`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientRule {
    #[default]
    Reference,
    Analytic,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Heaviside => if x >= 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::Tanh => x.tanh(),
        }
    }

    /// Reference derivative. Heaviside has none, so it passes the gradient
    /// through unchanged; Sigmoid does the same. Tanh is `1 - x²` of the
    /// argument it receives.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Heaviside => 1.0,
            ActivationFunction::Sigmoid => 1.0,
            ActivationFunction::Tanh => 1.0 - x.powi(2),
        }
    }

    /// Derivative expressed through the activated output `y = f(x)`.
    pub fn analytic_derivative(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Heaviside => 1.0,
            ActivationFunction::Sigmoid => y * (1.0 - y),
            ActivationFunction::Tanh => 1.0 - y * y,
        }
    }

    /// Derivative used by backpropagation for a unit whose stored value is `value`.
    pub fn gradient(&self, rule: GradientRule, value: f64) -> f64 {
        match rule {
            GradientRule::Reference => self.derivative(value),
            GradientRule::Analytic => self.analytic_derivative(value),
        }
    }
}
