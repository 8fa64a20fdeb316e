use serde::{Serialize, Deserialize};

use crate::activation::{ActivationFunction, GradientRule};
use crate::error::Result;

/// Scale applied to N(0, 1) initial weights unless a spec says otherwise.
/// Tiny on purpose so early activations sit near the transfer function's
/// midpoint.
pub const REFERENCE_INIT_SCALE: f64 = 1e-13;

fn default_init_scale() -> f64 {
    REFERENCE_INIT_SCALE
}

/// A fully serializable description of a network: topology, learning
/// hyperparameters and the seed its weights are drawn from.
///
/// `NetworkSpec` can be saved to / loaded from JSON independently of the
/// trained weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Layer sizes, input first. For a recurrent network the input size
    /// already includes the context block.
    pub layers: Vec<usize>,
    pub learning_rate: f64,
    pub activation: ActivationFunction,
    #[serde(default)]
    pub gradient: GradientRule,
    /// Number of trailing input slots fed back from the first hidden layer.
    /// `None` builds a plain feed-forward network.
    #[serde(default)]
    pub context_size: Option<usize>,
    #[serde(default = "default_init_scale")]
    pub init_scale: f64,
    #[serde(default)]
    pub seed: u64,
}

impl NetworkSpec {
    pub fn feed_forward(layers: Vec<usize>, learning_rate: f64, activation: ActivationFunction) -> Self {
        NetworkSpec {
            layers,
            learning_rate,
            activation,
            gradient: GradientRule::Reference,
            context_size: None,
            init_scale: REFERENCE_INIT_SCALE,
            seed: 0,
        }
    }

    /// Three-layer Elman layout. `input_size` counts the `context_size`
    /// context slots as well as the raw features.
    pub fn elman(
        input_size: usize,
        context_size: usize,
        hidden_size: usize,
        output_size: usize,
        learning_rate: f64,
        activation: ActivationFunction,
    ) -> Self {
        NetworkSpec {
            context_size: Some(context_size),
            ..NetworkSpec::feed_forward(vec![input_size, hidden_size, output_size], learning_rate, activation)
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_gradient(mut self, gradient: GradientRule) -> Self {
        self.gradient = gradient;
        self
    }

    pub fn with_init_scale(mut self, init_scale: f64) -> Self {
        self.init_scale = init_scale;
        self
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
