use serde::{Serialize, Deserialize};

/// Configuration for a training run.
///
/// # Fields
/// - `epochs`       — last epoch index; passes run from epoch 0 through
///                    `epochs` inclusive, so `epochs + 1` passes in total
/// - `sample_every` — when set, `elman_train` logs one randomly chosen
///                    record's decoded prediction every that many epochs
/// - `seed`         — seed for the sample selection above
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    #[serde(default)]
    pub sample_every: Option<usize>,
    #[serde(default)]
    pub seed: u64,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with sampling disabled.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            sample_every: None,
            seed: 0,
        }
    }

    pub fn with_sampling(mut self, every: usize, seed: u64) -> Self {
        self.sample_every = Some(every);
        self.seed = seed;
        self
    }
}
