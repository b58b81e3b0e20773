//! Log-space primitives.
//!
//! Joint likelihoods of even moderately sized samples underflow `f64`
//! (`exp(-745)` is already subnormal). The helpers here keep every
//! computation in log space and only exponentiate differences that are
//! guaranteed to be ≤ 0, so the largest term is always exactly 1.
//!
//! # Provided items
//! - [`log_sum_exp`]: stable `ln Σ exp(xᵢ)` using a max shift.
//! - [`relative_likelihoods`]: `exp(ℓᵢ − max ℓ)`, each in [0, 1].
//! - [`normalized_likelihoods`]: `exp(ℓᵢ − log_sum_exp(ℓ))`, summing to 1.
//! - [`max_with_index`]: first maximum of a sequence and its position.
use ndarray::Array1;

/// First maximum of `values` and its index, skipping NaN.
///
/// Returns `None` for an empty iterator or one that contains only NaN.
/// Ties keep the earliest index.
pub fn max_with_index<'a, I>(values: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = &'a f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.into_iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best
}

/// Numerically stable `ln Σ exp(xᵢ)`.
///
/// - Empty input, or input whose maximum is `-∞`, yields `-∞`.
/// - A `+∞` entry yields `+∞`.
pub fn log_sum_exp(values: &[f64]) -> f64 {
    let max = match max_with_index(values) {
        Some((_, m)) => m,
        None => return f64::NEG_INFINITY,
    };
    if !max.is_finite() {
        return max;
    }
    let sum: f64 = values.iter().map(|&v| (v - max).exp()).sum();
    max + sum.ln()
}

/// Likelihoods relative to the maximum, `exp(ℓᵢ − max ℓ)`.
///
/// The maximum maps to exactly 1 and no entry can overflow. Callers must
/// ensure the maximum log-likelihood is finite; with `max = -∞` every entry
/// is NaN.
pub fn relative_likelihoods(log_likelihood: &Array1<f64>) -> Array1<f64> {
    let max = max_with_index(log_likelihood.iter()).map_or(f64::NEG_INFINITY, |(_, m)| m);
    log_likelihood.mapv(|l| (l - max).exp())
}

/// Likelihoods normalized over the grid, `exp(ℓᵢ − ln Σ exp ℓⱼ)`.
///
/// Preserves the ordering of the raw likelihoods and sums to 1 whenever the
/// maximum log-likelihood is finite.
pub fn normalized_likelihoods(log_likelihood: &Array1<f64>) -> Array1<f64> {
    let lse = log_sum_exp(&log_likelihood.to_vec());
    log_likelihood.mapv(|l| (l - lse).exp())
}
