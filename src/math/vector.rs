use crate::error::{NeuralError, Result};

/// Scalar product of two equal-length slices.
///
/// Returns `DimensionMismatch` when the lengths differ; nothing is truncated
/// or padded.
pub fn dot(weights: &[f64], values: &[f64]) -> Result<f64> {
    if weights.len() != values.len() {
        return Err(NeuralError::DimensionMismatch {
            expected: weights.len(),
            found: values.len(),
        });
    }
    Ok(weights.iter().zip(values.iter()).map(|(w, x)| w * x).sum())
}

/// Index of the maximum element in a slice. Ties resolve to the first
/// occurrence; an empty slice yields `0`.
pub fn argmax(v: &[f64]) -> usize {
    let mut best = 0;
    for (i, x) in v.iter().enumerate() {
        if *x > v[best] {
            best = i;
        }
    }
    best
}

/// Mean absolute difference between two equal-length slices.
pub fn mean_absolute_error(predicted: &[f64], expected: &[f64]) -> Result<f64> {
    if predicted.len() != expected.len() {
        return Err(NeuralError::DimensionMismatch {
            expected: expected.len(),
            found: predicted.len(),
        });
    }
    if expected.is_empty() {
        return Err(NeuralError::EmptyDataset);
    }
    let n = expected.len() as f64;
    Ok(predicted.iter().zip(expected.iter())
        .map(|(p, e)| (p - e).abs())
        .sum::<f64>() / n)
}

/// One-hot vector of length `classes` with `1.0` at `class`.
pub fn one_hot(class: usize, classes: usize) -> Result<Vec<f64>> {
    if class >= classes {
        return Err(NeuralError::UnknownClass { class, classes });
    }
    let mut v = vec![0.0; classes];
    v[class] = 1.0;
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_rejects_mismatched_lengths() {
        let err = dot(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, NeuralError::DimensionMismatch { expected: 2, found: 1 }));
    }

    #[test]
    fn dot_multiplies_and_sums() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap(), 32.0);
        assert_eq!(dot(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn argmax_prefers_first_maximum() {
        assert_eq!(argmax(&[0.1, 0.9, 0.9, 0.2]), 1);
        assert_eq!(argmax(&[]), 0);
    }

    #[test]
    fn one_hot_marks_single_class() {
        assert_eq!(one_hot(2, 4).unwrap(), vec![0.0, 0.0, 1.0, 0.0]);
        assert!(matches!(one_hot(4, 4), Err(NeuralError::UnknownClass { class: 4, classes: 4 })));
    }

    #[test]
    fn mean_absolute_error_averages_over_outputs() {
        let mae = mean_absolute_error(&[0.5, 1.0], &[1.0, 0.0]).unwrap();
        assert!((mae - 0.75).abs() < 1e-12);
    }
}
