//! Utility functions for the tournament simulator

/// Derive an independent RNG stream seed from a base seed
///
/// Each stochastic concern (strength draw, round-0 shuffle, match outcomes,
/// simulation trials) gets its own stream so advancing one never perturbs
/// the others. Uses a splitmix64-style finalizer over the combined words.
pub fn derive_stream_seed(base: u64, stream: u64) -> u64 {
    let mut z = base
        .wrapping_mul(0x9e37_79b9_7f4a_7c15)
        .wrapping_add(stream);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Ranks by descending value with ties broken by index
///
/// Returns ranks `1..=n` as floats, so the largest value gets rank 1.
/// Equal values keep their index order, which makes the ranking total.
pub fn descending_index_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[b]
            .partial_cmp(&values[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    let mut ranks = vec![0.0; n];
    for (position, &idx) in order.iter().enumerate() {
        ranks[idx] = (position + 1) as f64;
    }
    ranks
}

/// Ranks by descending value with ties receiving their average rank
///
/// Matches the conventional "fractional" ranking used by rank-correlation
/// statistics: a group of `t` equal values spanning positions `p..p+t`
/// all receive rank `(2p + t + 1) / 2`.
pub fn descending_average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[b]
            .partial_cmp(&values[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end share the average of ranks start+1..=end
        let avg = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = avg;
        }
        start = end;
    }
    ranks
}
