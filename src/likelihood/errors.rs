//! likelihood::errors — error surface for likelihood-surface evaluation.
//!
//! Purpose
//! -------
//! Provide the single error enum and result alias used by every routine in
//! the `likelihood` subtree, together with a conversion layer to Python
//! exceptions for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`LikResult`] and [`LikError`] as the canonical result and error
//!   types for grid construction, density evaluation, ratios and intervals.
//! - Attach human-readable `Display` messages to each variant, phrased in
//!   terms of domain constraints ("p must lie in [0, 1]") rather than
//!   low-level details.
//! - Implement `From<LikError> for PyErr` (behind `python-bindings`) so the
//!   Python layer raises `ValueError` with the Rust message preserved.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every contract violation is reported synchronously at the call that
//!   violates it; no variant is ever swallowed or turned into a default
//!   value (an underflowed reference likelihood is never reported as a
//!   ratio of 1 or 0).
//! - Variants carry only scalars and static strings so they stay cheap to
//!   clone and compare in tests.
//!
//! Conventions
//! -----------
//! - `Domain` is the catch-all for values outside a family's support; the
//!   `parameter` field names which slot was offending (`"observation"`,
//!   `"hypothesis"`, `"nuisance"`).
//! - `ZeroReference` always points callers at the log-space alternative.
//!
//! Testing notes
//! -------------
//! - Unit tests check that `Display` messages embed their payloads and that
//!   the zero-reference message mentions the log-space ratio.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for likelihood-surface operations.
pub type LikResult<T> = Result<T, LikError>;

/// LikError — failure conditions for likelihood-surface evaluation.
///
/// Variants
/// --------
/// - `EmptyInput { what }`
///   Observations or grid contain no elements.
/// - `NonFiniteInput { what, index, value }`
///   An observation or grid value is NaN or ±∞.
/// - `UnorderedGrid { index, previous, value }`
///   The hypothesis grid is not strictly increasing at `index`.
/// - `InvalidGridSpec { reason }`
///   Arguments to a grid builder (`from_step`, `linspace`) are inconsistent.
/// - `Domain { family, parameter, value, reason }`
///   An observation, hypothesis or nuisance value lies outside the family's
///   support.
/// - `MissingParameter { family, parameter }`
///   The family requires a nuisance parameter that was neither supplied nor
///   profiled.
/// - `ZeroReference { hypothesis }`
///   The reference likelihood is exactly zero, so the linear ratio is
///   undefined.
/// - `InvalidThreshold { value }`
///   A likelihood-interval threshold lies outside (0, 1].
/// - `UnparsableThreshold { text }`
///   A threshold string could not be parsed.
/// - `ReferenceNotOnGrid { value }`
///   A reference hypothesis does not match any grid point.
/// - `ReferenceIndexOutOfRange { index, len }`
///   A reference grid index is past the end of the grid.
#[derive(Debug, Clone, PartialEq)]
pub enum LikError {
    // ---- Inputs ----
    EmptyInput {
        what: &'static str,
    },
    NonFiniteInput {
        what: &'static str,
        index: usize,
        value: f64,
    },
    UnorderedGrid {
        index: usize,
        previous: f64,
        value: f64,
    },
    InvalidGridSpec {
        reason: &'static str,
    },

    // ---- Families ----
    Domain {
        family: &'static str,
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
    MissingParameter {
        family: &'static str,
        parameter: &'static str,
    },

    // ---- Ratios and intervals ----
    ZeroReference {
        hypothesis: f64,
    },
    InvalidThreshold {
        value: f64,
    },
    UnparsableThreshold {
        text: String,
    },
    ReferenceNotOnGrid {
        value: f64,
    },
    ReferenceIndexOutOfRange {
        index: usize,
        len: usize,
    },
}

impl LikError {
    /// `true` for values outside a family's support.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, LikError::Domain { .. })
    }
}

impl std::error::Error for LikError {}

impl std::fmt::Display for LikError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Inputs ----
            LikError::EmptyInput { what } => {
                write!(f, "Empty input: {what} must contain at least one value")
            }
            LikError::NonFiniteInput { what, index, value } => {
                write!(f, "Non-finite {what} value at index {index}: {value}")
            }
            LikError::UnorderedGrid { index, previous, value } => {
                write!(
                    f,
                    "Hypothesis grid must be strictly increasing: grid[{index}] = {value} \
                     does not exceed the previous value {previous}"
                )
            }
            LikError::InvalidGridSpec { reason } => {
                write!(f, "Invalid grid specification: {reason}")
            }

            // ---- Families ----
            LikError::Domain { family, parameter, value, reason } => {
                write!(f, "Domain error in {family} family: {parameter} = {value}: {reason}")
            }
            LikError::MissingParameter { family, parameter } => {
                write!(
                    f,
                    "Missing parameter: the {family} family requires a {parameter}; \
                     supply a fixed value or profile it"
                )
            }

            // ---- Ratios and intervals ----
            LikError::ZeroReference { hypothesis } => {
                write!(
                    f,
                    "Reference likelihood at hypothesis {hypothesis} is exactly zero; \
                     the ratio is undefined, use log_likelihood_ratios instead"
                )
            }
            LikError::InvalidThreshold { value } => {
                write!(f, "Invalid likelihood-interval threshold {value}: must lie in (0, 1]")
            }
            LikError::UnparsableThreshold { text } => {
                write!(
                    f,
                    "Could not parse threshold '{text}': expected a decimal, a fraction \
                     such as '1/8', or a preset name"
                )
            }
            LikError::ReferenceNotOnGrid { value } => {
                write!(f, "Reference hypothesis {value} does not match any grid point")
            }
            LikError::ReferenceIndexOutOfRange { index, len } => {
                write!(f, "Reference index {index} is out of range for a grid of length {len}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<LikError> for PyErr {
    fn from(err: LikError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
