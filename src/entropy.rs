//! Sequence composition helpers.

use std::collections::BTreeMap;

/// Shannon entropy, in bits, of the symbol distribution of `seq`.
///
/// Empty input and single-symbol input both have entropy 0.0.
pub fn entropy(seq: &[u8]) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }

    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for &base in seq {
        *counts.entry(base).or_insert(0) += 1;
    }

    let total = seq.len() as f64;
    let sum: f64 = counts
        .values()
        .map(|&count| {
            let freq = count as f64 / total;
            freq * freq.log2()
        })
        .sum();
    // avoid reporting -0.0 for single-symbol input
    if sum == 0.0 {
        0.0
    } else {
        -sum
    }
}

/// True if `seq` is non-empty and every byte equals the first.
#[inline]
pub fn is_homopolymer(seq: &[u8]) -> bool {
    match seq.split_first() {
        Some((first, rest)) => rest.iter().all(|b| b == first),
        None => false,
    }
}
