//! likelihood::validation — shared input guards for surface evaluation.
//!
//! Purpose
//! -------
//! Centralize the basic checks every likelihood routine relies on:
//! non-empty finite observations, a non-empty strictly increasing grid,
//! interval thresholds in (0, 1], and positive finite scale values.
//!
//! Conventions
//! -----------
//! - Purely about validation; no I/O and no allocation beyond error
//!   construction.
//! - Family-specific support checks (e.g. Bernoulli observations in {0, 1})
//!   live on the families themselves; this module only checks shape and
//!   finiteness.
//!
//! Testing notes
//! -------------
//! - Unit tests cover each error branch and a success path per guard.

use crate::likelihood::errors::{LikError, LikResult};

/// Validate an observation sequence: non-empty and all values finite.
///
/// Errors
/// ------
/// - `LikError::EmptyInput { what: "observations" }` when `data` is empty.
/// - `LikError::NonFiniteInput` for the first NaN or ±∞ entry.
pub fn validate_observations(data: &[f64]) -> LikResult<()> {
    if data.is_empty() {
        return Err(LikError::EmptyInput { what: "observations" });
    }
    for (index, &value) in data.iter().enumerate() {
        if !value.is_finite() {
            return Err(LikError::NonFiniteInput { what: "observation", index, value });
        }
    }
    Ok(())
}

/// Validate a hypothesis grid: non-empty, finite and strictly increasing.
///
/// Errors
/// ------
/// - `LikError::EmptyInput { what: "grid" }` when `grid` is empty.
/// - `LikError::NonFiniteInput` for the first NaN or ±∞ entry.
/// - `LikError::UnorderedGrid` at the first index where
///   `grid[i] <= grid[i - 1]`.
pub fn validate_grid(grid: &[f64]) -> LikResult<()> {
    if grid.is_empty() {
        return Err(LikError::EmptyInput { what: "grid" });
    }
    for (index, &value) in grid.iter().enumerate() {
        if !value.is_finite() {
            return Err(LikError::NonFiniteInput { what: "grid", index, value });
        }
        if index > 0 && value <= grid[index - 1] {
            return Err(LikError::UnorderedGrid { index, previous: grid[index - 1], value });
        }
    }
    Ok(())
}

/// Validate a likelihood-interval threshold: `0 < threshold <= 1`.
///
/// NaN fails both comparisons and is therefore rejected.
pub fn validate_threshold(threshold: f64) -> LikResult<f64> {
    if threshold > 0.0 && threshold <= 1.0 {
        Ok(threshold)
    } else {
        Err(LikError::InvalidThreshold { value: threshold })
    }
}

/// Validate a scale-type nuisance value (finite and strictly positive).
pub fn validate_positive_scale(family: &'static str, value: f64) -> LikResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LikError::Domain {
            family,
            parameter: "nuisance",
            value,
            reason: "scale must be finite and > 0",
        })
    }
}

/// Validate a probability hypothesis on the closed interval [0, 1].
pub fn validate_probability(family: &'static str, p: f64) -> LikResult<f64> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(LikError::Domain {
            family,
            parameter: "hypothesis",
            value: p,
            reason: "probability must lie in [0, 1]",
        })
    }
}

/// Validate a count observation in `0..=max` (or `0..` when `max` is `None`).
///
/// Returns the count as `u64` so discrete densities can consume it directly.
pub fn validate_count(family: &'static str, x: f64, max: Option<u64>) -> LikResult<u64> {
    if x < 0.0 || x.fract() != 0.0 {
        return Err(LikError::Domain {
            family,
            parameter: "observation",
            value: x,
            reason: "counts must be non-negative integers",
        });
    }
    if let Some(max) = max {
        if x > max as f64 {
            return Err(LikError::Domain {
                family,
                parameter: "observation",
                value: x,
                reason: "count exceeds the number of trials",
            });
        }
    }
    Ok(x as u64)
}
