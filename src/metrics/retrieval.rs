//! Information-retrieval metrics over a binary relevance vector
//!
//! Standard definitions: the input slice is relevance ordered by the
//! ranking under evaluation (best rank first). DCG uses binary gains with
//! the `1 / log2(rank + 1)` discount.

/// Precision over the first `k` positions
///
/// Returns 0.0 when `k` is 0; `k` is clamped to the vector length.
pub fn precision_at_k(relevance: &[bool], k: usize) -> f64 {
    let limit = k.min(relevance.len());
    if limit == 0 {
        return 0.0;
    }
    let hits = relevance[..limit].iter().filter(|&&r| r).count();
    hits as f64 / limit as f64
}

/// Precision at the number of relevant items (R-precision)
pub fn r_precision(relevance: &[bool]) -> f64 {
    let total_relevant = relevance.iter().filter(|&&r| r).count();
    precision_at_k(relevance, total_relevant)
}

/// Average of precision values at each relevant position
///
/// Divides by the number of relevant items present; 0.0 when none are.
pub fn average_precision(relevance: &[bool]) -> f64 {
    let mut hits = 0usize;
    let mut precision_sum = 0.0;
    for (i, &relevant) in relevance.iter().enumerate() {
        if relevant {
            hits += 1;
            precision_sum += hits as f64 / (i + 1) as f64;
        }
    }
    if hits == 0 {
        0.0
    } else {
        precision_sum / hits as f64
    }
}

/// Discounted cumulative gain at `k` with binary gains
pub fn dcg_at_k(relevance: &[bool], k: usize) -> f64 {
    relevance
        .iter()
        .take(k)
        .enumerate()
        .filter(|(_, &r)| r)
        .map(|(i, _)| 1.0 / ((i + 2) as f64).log2())
        .sum()
}

/// Normalized DCG at `k`: DCG against the ideal ordering of the same
/// relevance counts. Returns 0.0 when nothing is relevant.
pub fn ndcg_at_k(relevance: &[bool], k: usize) -> f64 {
    let mut ideal: Vec<bool> = relevance.to_vec();
    ideal.sort_by(|a, b| b.cmp(a));
    let ideal_dcg = dcg_at_k(&ideal, k);
    if ideal_dcg == 0.0 {
        0.0
    } else {
        dcg_at_k(relevance, k) / ideal_dcg
    }
}
