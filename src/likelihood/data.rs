//! Observation and hypothesis-grid containers.
//!
//! Purpose
//! -------
//! Provide small, validated, immutable containers for the two inputs of
//! every likelihood analysis: the observed data and the ordered grid of
//! candidate parameter values. Downstream code relies on their invariants
//! and never re-checks shape or finiteness.
//!
//! Key behaviors
//! -------------
//! - [`Observations`] enforces non-emptiness and finiteness.
//! - [`HypothesisGrid`] enforces non-emptiness, finiteness and strict
//!   increase, and offers `seq`-style builders ([`HypothesisGrid::from_step`],
//!   [`HypothesisGrid::linspace`]).
//! - Grid lookup ([`HypothesisGrid::position_of`]) tolerates the tiny
//!   representation error of step-built grids (`0.001 * 833` is not exactly
//!   `0.833`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Neither container exposes mutable access; an analysis that needs
//!   different data builds a new container.
//! - Family-specific support (binary, counts, positive rates) is not checked
//!   here; [`LikelihoodSurface::new`](crate::likelihood::surface::LikelihoodSurface::new)
//!   checks it against the chosen family.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction errors, step/linspace builders and
//!   tolerant lookup.
use crate::likelihood::{
    errors::{LikError, LikResult},
    validation::{validate_grid, validate_observations},
};
use ndarray::Array1;

/// Relative tolerance used when matching a hypothesis value to a grid point.
pub const GRID_MATCH_TOL: f64 = 1e-9;

/// Largest number of points the grid builders will allocate.
pub const MAX_GRID_POINTS: usize = 100_000_000;

/// `Observations` — validated, immutable observation sequence.
///
/// Fields
/// ------
/// - `data`: `Array1<f64>`
///   Observed values (binary, counts or reals depending on the family).
///
/// Invariants
/// ----------
/// - `data.len() > 0` and every entry is finite.
/// - Order is preserved but carries no meaning for the likelihood.
#[derive(Debug, Clone, PartialEq)]
pub struct Observations {
    data: Array1<f64>,
}

impl Observations {
    /// Construct validated observations.
    ///
    /// Errors
    /// ------
    /// - `LikError::EmptyInput` if `data` is empty.
    /// - `LikError::NonFiniteInput` for the first NaN or ±∞ entry.
    pub fn new(data: Array1<f64>) -> LikResult<Self> {
        match data.as_slice() {
            Some(slice) => validate_observations(slice)?,
            None => validate_observations(&data.to_vec())?,
        }
        Ok(Observations { data })
    }

    /// Convenience constructor from a slice.
    pub fn from_slice(data: &[f64]) -> LikResult<Self> {
        validate_observations(data)?;
        Ok(Observations { data: Array1::from(data.to_vec()) })
    }

    /// Binary outcomes from a success count and a trial count, successes
    /// first (`successes` ones followed by `trials - successes` zeros).
    pub fn from_successes(successes: usize, trials: usize) -> LikResult<Self> {
        if successes > trials {
            return Err(LikError::Domain {
                family: "Bernoulli",
                parameter: "observation",
                value: successes as f64,
                reason: "successes cannot exceed trials",
            });
        }
        let data = Array1::from_iter((0..trials).map(|i| if i < successes { 1.0 } else { 0.0 }));
        Observations::new(data)
    }

    /// Observed values.
    pub fn values(&self) -> &Array1<f64> {
        &self.data
    }

    /// Number of observations (always ≥ 1).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; provided for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over observed values.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }

    /// Arithmetic mean of the observations.
    pub fn mean(&self) -> f64 {
        self.data.sum() / self.data.len() as f64
    }
}

/// `HypothesisGrid` — validated, strictly increasing candidate values.
///
/// Invariants
/// ----------
/// - `values.len() > 0`, all finite, and `values[i] < values[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct HypothesisGrid {
    values: Array1<f64>,
}

impl HypothesisGrid {
    /// Construct a validated grid from explicit values.
    ///
    /// Errors
    /// ------
    /// - `LikError::EmptyInput`, `LikError::NonFiniteInput` or
    ///   `LikError::UnorderedGrid` per [`validate_grid`].
    pub fn new(values: Array1<f64>) -> LikResult<Self> {
        match values.as_slice() {
            Some(slice) => validate_grid(slice)?,
            None => validate_grid(&values.to_vec())?,
        }
        Ok(HypothesisGrid { values })
    }

    /// Convenience constructor from a slice.
    pub fn from_slice(values: &[f64]) -> LikResult<Self> {
        validate_grid(values)?;
        Ok(HypothesisGrid { values: Array1::from(values.to_vec()) })
    }

    /// Inclusive stepped grid `start, start + step, …` up to `end`.
    ///
    /// The point count is `⌊(end − start) / step⌋ + 1`, with a small slack
    /// so that `from_step(0.0, 1.0, 0.001)` yields 1001 points ending at 1.
    ///
    /// Errors
    /// ------
    /// - `LikError::InvalidGridSpec` if any argument is non-finite, `step <= 0`,
    ///   `end < start`, or the range would need more than
    ///   [`MAX_GRID_POINTS`] points or a step below the resolution of `start`.
    pub fn from_step(start: f64, end: f64, step: f64) -> LikResult<Self> {
        if !start.is_finite() || !end.is_finite() || !step.is_finite() {
            return Err(LikError::InvalidGridSpec { reason: "start, end and step must be finite" });
        }
        if step <= 0.0 {
            return Err(LikError::InvalidGridSpec { reason: "step must be > 0" });
        }
        if end < start {
            return Err(LikError::InvalidGridSpec { reason: "end must not be below start" });
        }
        let span = ((end - start) / step + 1e-9).floor();
        if !span.is_finite() || span >= MAX_GRID_POINTS as f64 {
            return Err(LikError::InvalidGridSpec { reason: "step too small for range" });
        }
        let intervals = span as usize;
        if intervals > 0 && start + step <= start {
            return Err(LikError::InvalidGridSpec { reason: "step below the resolution of start" });
        }
        let values = Array1::from_iter((0..=intervals).map(|i| start + i as f64 * step));
        HypothesisGrid::new(values)
    }

    /// `n` evenly spaced points from `start` to `end` inclusive.
    ///
    /// Errors
    /// ------
    /// - `LikError::InvalidGridSpec` if `n == 0`, `n > MAX_GRID_POINTS`,
    ///   bounds are non-finite, or `n > 1` with `end <= start`.
    pub fn linspace(start: f64, end: f64, n: usize) -> LikResult<Self> {
        if n == 0 {
            return Err(LikError::InvalidGridSpec { reason: "n must be at least 1" });
        }
        if n > MAX_GRID_POINTS {
            return Err(LikError::InvalidGridSpec { reason: "too many grid points" });
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(LikError::InvalidGridSpec { reason: "start and end must be finite" });
        }
        if n > 1 && end <= start {
            return Err(LikError::InvalidGridSpec { reason: "end must exceed start" });
        }
        HypothesisGrid::new(Array1::linspace(start, end, n))
    }

    /// Grid values in increasing order.
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Number of grid points (always ≥ 1).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; provided for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Index of the grid point matching `value` within [`GRID_MATCH_TOL`]
    /// (relative, floored at an absolute `GRID_MATCH_TOL`).
    pub fn position_of(&self, value: f64) -> Option<usize> {
        let tol = GRID_MATCH_TOL * value.abs().max(1.0);
        self.values.iter().position(|&g| (g - value).abs() <= tol)
    }
}
