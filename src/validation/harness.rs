use serde::{Serialize, Deserialize};

use crate::dataset::record::Record;
use crate::error::{NeuralError, Result};
use crate::network::network::Network;
use crate::network::spec::NetworkSpec;
use crate::perceptron::perceptron::{Perceptron, WeightInit};
use crate::train::train_config::TrainConfig;
use crate::train::trainer::mlp_train;
use crate::validation::metrics::{accuracy, mean};
use crate::validation::split::{k_fold_split, train_test_split};

/// A model the validation loops can fit on one split and score on another.
pub trait Classifier {
    /// Trains from scratch on `train` for `epochs` epochs.
    fn fit(&mut self, train: &[Record], epochs: usize) -> Result<()>;

    /// Predicted class for `features`, as the same `f64` code records carry.
    fn predict(&mut self, features: &[f64]) -> Result<f64>;
}

/// Perceptron reset with `init` before every fit.
#[derive(Debug, Clone)]
pub struct PerceptronClassifier {
    pub perceptron: Perceptron,
    pub init: WeightInit,
}

impl PerceptronClassifier {
    pub fn new(features: usize, learning_rate: f64) -> Self {
        PerceptronClassifier { perceptron: Perceptron::new(features, learning_rate), init: WeightInit::Zero }
    }
}

impl Classifier for PerceptronClassifier {
    fn fit(&mut self, train: &[Record], epochs: usize) -> Result<()> {
        self.perceptron.train(train, epochs, self.init)?;
        Ok(())
    }

    fn predict(&mut self, features: &[f64]) -> Result<f64> {
        self.perceptron.predict(features)
    }
}

/// Feed-forward network rebuilt from `spec` before every fit, trained with
/// one-hot targets over `class_count` classes. Predictions are the index of
/// the strongest output.
#[derive(Debug, Clone)]
pub struct MlpClassifier {
    pub spec: NetworkSpec,
    pub class_count: usize,
    network: Option<Network>,
}

impl MlpClassifier {
    pub fn new(spec: NetworkSpec, class_count: usize) -> Self {
        MlpClassifier { spec, class_count, network: None }
    }

    /// Network from the most recent fit.
    pub fn network(&self) -> Option<&Network> {
        self.network.as_ref()
    }
}

impl Classifier for MlpClassifier {
    fn fit(&mut self, train: &[Record], epochs: usize) -> Result<()> {
        let mut network = Network::from_spec(&self.spec)?;
        mlp_train(&mut network, train, self.class_count, &TrainConfig::new(epochs))?;
        self.network = Some(network);
        Ok(())
    }

    fn predict(&mut self, features: &[f64]) -> Result<f64> {
        let network = self.network.as_mut().ok_or(NeuralError::NotFitted)?;
        Ok(network.classify(features)? as f64)
    }
}

/// Per-round accuracy percentages and their mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub scores: Vec<f64>,
    pub mean: f64,
}

/// Repeats a holdout split `rounds` times, fitting on the training part and
/// scoring on the test part. Round `t` shuffles with `seed + t`; without a
/// seed every round uses the same ordered split.
pub fn random_subsampling_validation<C: Classifier>(
    model: &mut C,
    records: &[Record],
    percentage: f64,
    epochs: usize,
    rounds: usize,
    shuffle: Option<u64>,
) -> Result<ValidationReport> {
    if rounds == 0 {
        return Err(NeuralError::InvalidRounds(rounds));
    }

    let mut scores = Vec::with_capacity(rounds);
    for t in 0..rounds {
        let seed = shuffle.map(|s| s.wrapping_add(t as u64));
        let (train, test) = train_test_split(records, percentage, seed)?;
        let score = fit_and_score(model, &train, &test, epochs)?;

        log::info!(
            "subsampling round {}: train {}, test {}, {:.2}% correct",
            t, train.len(), test.len(), score
        );
        scores.push(score);
    }

    finish(scores, "random subsampling")
}

/// k-fold cross validation: each fold is the test set once while the other
/// `k - 1` folds train the model.
pub fn k_fold_validation<C: Classifier>(
    model: &mut C,
    records: &[Record],
    epochs: usize,
    k: usize,
    shuffle: Option<u64>,
) -> Result<ValidationReport> {
    let folds = k_fold_split(records, k, shuffle)?;

    let mut scores = Vec::with_capacity(k);
    for (t, test) in folds.iter().enumerate() {
        let train: Vec<Record> = folds.iter()
            .enumerate()
            .filter(|(i, _)| *i != t)
            .flat_map(|(_, fold)| fold.iter().cloned())
            .collect();
        let score = fit_and_score(model, &train, test, epochs)?;

        log::info!(
            "fold {}: train {}, test {}, {:.2}% correct",
            t, train.len(), test.len(), score
        );
        scores.push(score);
    }

    finish(scores, "k-fold")
}

fn fit_and_score<C: Classifier>(model: &mut C, train: &[Record], test: &[Record], epochs: usize) -> Result<f64> {
    if train.is_empty() {
        return Err(NeuralError::EmptyTrainingSplit { held_out: test.len() });
    }
    model.fit(train, epochs)?;

    let mut actual = Vec::with_capacity(test.len());
    let mut predicted = Vec::with_capacity(test.len());
    for record in test {
        actual.push(record.expected_scalar()?);
        predicted.push(model.predict(&record.features)?);
    }
    Ok(accuracy(&actual, &predicted)?.percentage())
}

fn finish(scores: Vec<f64>, method: &str) -> Result<ValidationReport> {
    let mean = mean(&scores)?;
    log::info!("{} validation completed over {} rounds: mean {:.2}%", method, scores.len(), mean);
    Ok(ValidationReport { scores, mean })
}
