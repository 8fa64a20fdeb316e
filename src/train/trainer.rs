use std::time::Instant;

use rand::Rng;

use crate::dataset::patterns::{from_binary, round_output};
use crate::dataset::record::Record;
use crate::error::{NeuralError, Result};
use crate::math::random::seeded;
use crate::math::vector::one_hot;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains a classifier network with one-hot targets.
///
/// Each record's target is a vector of `class_count` zeros with `1.0` at
/// the record's class index. Runs epochs `0..=config.epochs` and returns
/// one `EpochStats` per pass.
pub fn mlp_train(
    network: &mut Network,
    records: &[Record],
    class_count: usize,
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    if records.is_empty() {
        return Err(NeuralError::EmptyDataset);
    }
    let targets = records.iter()
        .map(|r| one_hot(r.class()?, class_count))
        .collect::<Result<Vec<_>>>()?;

    let mut history = Vec::new();
    for epoch in 0..=config.epochs {
        let t_start = Instant::now();

        let mut total_error = 0.0;
        for (record, target) in records.iter().zip(&targets) {
            total_error += network.backpropagate(&record.features, target)?;
        }

        let stats = epoch_stats(epoch, config, total_error, records.len(), t_start);
        log::debug!("mlp epoch {} completed: mean error {:.6}", epoch, stats.mean_error);
        history.push(stats);
    }

    Ok(history)
}

/// Trains a recurrent network against each record's own target vector.
///
/// Records are presented in order every epoch, so the context block carries
/// the previous record's hidden output. With `config.sample_every` set, one
/// seeded-random record per sampled epoch is decoded from binary and logged.
pub fn elman_train(
    network: &mut Network,
    records: &[Record],
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    if !network.is_recurrent() {
        return Err(NeuralError::NotRecurrent);
    }
    if records.is_empty() {
        return Err(NeuralError::EmptyDataset);
    }

    let mut rng = seeded(config.seed);
    let mut history = Vec::new();

    for epoch in 0..=config.epochs {
        let t_start = Instant::now();
        let sampled = match config.sample_every {
            Some(every) if every > 0 && epoch % every == 0 => Some(rng.gen_range(0..records.len())),
            _ => None,
        };

        let mut total_error = 0.0;
        for (i, record) in records.iter().enumerate() {
            total_error += network.backpropagate(&record.features, record.expected_vector()?)?;
            if sampled == Some(i) {
                log_sample(epoch, record, &network.outputs())?;
            }
        }

        let stats = epoch_stats(epoch, config, total_error, records.len(), t_start);
        log::debug!("elman epoch {} completed: mean error {:.6}", epoch, stats.mean_error);
        history.push(stats);
    }

    Ok(history)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn epoch_stats(epoch: usize, config: &TrainConfig, total_error: f64, n: usize, t_start: Instant) -> EpochStats {
    EpochStats {
        epoch,
        total_epochs: config.epochs,
        mean_error: total_error / n as f64,
        elapsed_ms: t_start.elapsed().as_millis() as u64,
    }
}

/// Logs a binary-addition record as integers: both operands, the expected
/// sum and the rounded network output.
fn log_sample(epoch: usize, record: &Record, output: &[f64]) -> Result<()> {
    let half = record.features.len() / 2;
    let (a, b) = record.features.split_at(half);
    let predicted = round_output(output);

    log::info!(
        "epoch {}: {} + {} = {} (network: {} {:?})",
        epoch,
        from_binary(a),
        from_binary(b),
        from_binary(record.expected_vector()?),
        from_binary(&predicted),
        predicted
    );
    Ok(())
}
