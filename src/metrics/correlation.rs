//! Rank correlation statistics
//!
//! Kendall's tau-b and Spearman's rho over two rank vectors, each with a
//! two-sided p-value under the null of no association. Tau uses the
//! tie-corrected asymptotic normal approximation; rho uses the Student's t
//! transform. Both return NaN when the coefficient is undefined (a
//! constant input vector).

use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::function::erf::erf;
use std::f64::consts::SQRT_2;

/// Standard normal CDF
fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / SQRT_2))
}

/// Sizes of tie groups within a value vector
fn tie_group_sizes(values: &[f64]) -> Vec<u64> {
    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mut groups = Vec::new();
    let mut start = 0;
    while start < sorted.len() {
        let mut end = start + 1;
        while end < sorted.len() && sorted[end] == sorted[start] {
            end += 1;
        }
        if end - start > 1 {
            groups.push((end - start) as u64);
        }
        start = end;
    }
    groups
}

/// Kendall's tau-b with a two-sided asymptotic p-value
pub fn kendall_tau(x: &[f64], y: &[f64]) -> (f64, f64) {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len();
    if n < 2 {
        return (f64::NAN, f64::NAN);
    }

    let mut concordant_minus_discordant = 0i64;
    for i in 0..n {
        for j in (i + 1)..n {
            let dx = (x[i] - x[j]).partial_cmp(&0.0).map_or(0, |o| o as i64);
            let dy = (y[i] - y[j]).partial_cmp(&0.0).map_or(0, |o| o as i64);
            concordant_minus_discordant += dx * dy;
        }
    }

    let nf = n as f64;
    let n0 = nf * (nf - 1.0) / 2.0;
    let x_ties = tie_group_sizes(x);
    let y_ties = tie_group_sizes(y);
    let pairs_tied = |groups: &[u64]| -> f64 {
        groups.iter().map(|&t| t as f64 * (t as f64 - 1.0) / 2.0).sum()
    };
    let n1 = pairs_tied(&x_ties);
    let n2 = pairs_tied(&y_ties);

    let denominator = ((n0 - n1) * (n0 - n2)).sqrt();
    if denominator == 0.0 {
        return (f64::NAN, f64::NAN);
    }
    let s = concordant_minus_discordant as f64;
    let tau = s / denominator;

    // Tie-corrected variance of S under the null
    let moment =
        |groups: &[u64], f: &dyn Fn(f64) -> f64| -> f64 { groups.iter().map(|&t| f(t as f64)).sum() };
    let v0 = nf * (nf - 1.0) * (2.0 * nf + 5.0);
    let vt = moment(&x_ties, &|t| t * (t - 1.0) * (2.0 * t + 5.0));
    let vu = moment(&y_ties, &|t| t * (t - 1.0) * (2.0 * t + 5.0));
    let mut variance = (v0 - vt - vu) / 18.0;
    variance += moment(&x_ties, &|t| t * (t - 1.0)) * moment(&y_ties, &|t| t * (t - 1.0))
        / (2.0 * nf * (nf - 1.0));
    if n > 2 {
        variance += moment(&x_ties, &|t| t * (t - 1.0) * (t - 2.0))
            * moment(&y_ties, &|t| t * (t - 1.0) * (t - 2.0))
            / (9.0 * nf * (nf - 1.0) * (nf - 2.0));
    }
    if variance <= 0.0 {
        return (tau, f64::NAN);
    }

    let z = s / variance.sqrt();
    let p = 2.0 * (1.0 - normal_cdf(z.abs()));
    (tau, p.clamp(0.0, 1.0))
}

/// Pearson correlation coefficient
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        cov += (a - mean_x) * (b - mean_y);
        var_x += (a - mean_x).powi(2);
        var_y += (b - mean_y).powi(2);
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x * var_y).sqrt()
}

/// Spearman's rho with a two-sided p-value via the t transform
///
/// Inputs are expected to already be rank vectors (fractional ranks for
/// ties), for which Spearman's rho reduces to the Pearson coefficient.
pub fn spearman_rho(x: &[f64], y: &[f64]) -> (f64, f64) {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len();
    if n < 3 {
        return (f64::NAN, f64::NAN);
    }

    let rho = pearson(x, y);
    if rho.is_nan() {
        return (f64::NAN, f64::NAN);
    }
    if rho.abs() >= 1.0 {
        return (rho.clamp(-1.0, 1.0), 0.0);
    }

    let df = (n - 2) as f64;
    let t = rho * (df / (1.0 - rho * rho)).sqrt();
    let p = match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => 2.0 * (1.0 - dist.cdf(t.abs())),
        Err(_) => f64::NAN,
    };
    (rho, p.clamp(0.0, 1.0))
}
