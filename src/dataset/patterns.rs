//! Synthetic binary-addition patterns for the recurrent network.

use rand::Rng;

use crate::dataset::record::Record;
use crate::math::random::seeded;

/// Binary digits of `n`, most significant first, zero-padded to `width`.
/// Bits above `width` are discarded.
pub fn to_binary(n: u64, width: usize) -> Vec<f64> {
    (0..width)
        .rev()
        .map(|bit| if bit < 64 && (n >> bit) & 1 == 1 { 1.0 } else { 0.0 })
        .collect()
}

/// Inverse of `to_binary`; any value >= 0.5 counts as a set bit.
pub fn from_binary(bits: &[f64]) -> u64 {
    bits.iter().fold(0u64, |acc, &b| (acc << 1) | u64::from(b >= 0.5))
}

/// Rounds network outputs to hard `0.0` / `1.0` digits.
pub fn round_output(output: &[f64]) -> Vec<f64> {
    output.iter().map(|&v| if v >= 0.5 { 1.0 } else { 0.0 }).collect()
}

/// `count` records whose features are the `bits`-wide binary forms of two
/// random operands, concatenated, and whose target is their `bits + 1`
/// wide binary sum.
pub fn binary_addition_patterns(count: usize, bits: usize, seed: u64) -> Vec<Record> {
    let mut rng = seeded(seed);
    let limit = 1u64 << bits.min(62);

    (0..count)
        .map(|_| {
            let a = rng.gen_range(0..limit);
            let b = rng.gen_range(0..limit);
            let mut features = to_binary(a, bits);
            features.extend(to_binary(b, bits));
            Record::with_vector(features, to_binary(a + b, bits + 1))
        })
        .collect()
}
