use crate::dataset::record::Record;
use crate::error::{NeuralError, Result};
use crate::math::random::{permutation, seeded};

/// Record order to split by: a seeded permutation, or the input order.
fn ordering(n: usize, shuffle: Option<u64>) -> Vec<usize> {
    match shuffle {
        Some(seed) => permutation(n, &mut seeded(seed)),
        None => (0..n).collect(),
    }
}

/// Holdout split. The first `⌊N · percentage⌋` records (after the optional
/// seeded shuffle) form the training set, the rest the test set.
pub fn train_test_split(
    records: &[Record],
    percentage: f64,
    shuffle: Option<u64>,
) -> Result<(Vec<Record>, Vec<Record>)> {
    if records.is_empty() {
        return Err(NeuralError::EmptyDataset);
    }
    if !(percentage > 0.0 && percentage < 1.0) {
        return Err(NeuralError::InvalidSplit(percentage));
    }

    let pivot = (records.len() as f64 * percentage) as usize;
    let order = ordering(records.len(), shuffle);
    let (train_idx, test_idx) = order.split_at(pivot);

    let train: Vec<Record> = train_idx.iter().map(|&i| records[i].clone()).collect();
    let test: Vec<Record> = test_idx.iter().map(|&i| records[i].clone()).collect();

    log::info!("split completed: {} training, {} testing", train.len(), test.len());
    Ok((train, test))
}

/// Partitions `records` into `k` folds. The first `N mod k` folds hold one
/// extra record, so sizes differ by at most one.
pub fn k_fold_split(records: &[Record], k: usize, shuffle: Option<u64>) -> Result<Vec<Vec<Record>>> {
    if records.is_empty() {
        return Err(NeuralError::EmptyDataset);
    }
    if k == 0 || k > records.len() {
        return Err(NeuralError::InvalidFolds { k, records: records.len() });
    }

    let size = records.len() / k;
    let extra = records.len() % k;
    let order = ordering(records.len(), shuffle);

    let mut folds: Vec<Vec<Record>> = Vec::with_capacity(k);
    let mut start = 0;
    for f in 0..k {
        let len = if f < extra { size + 1 } else { size };
        folds.push(order[start..start + len].iter().map(|&i| records[i].clone()).collect());
        start += len;
    }

    log::info!("fold split completed: {} folds of ~{} records", k, size);
    Ok(folds)
}
