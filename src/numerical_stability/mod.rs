//! numerical_stability — log-space helpers for likelihood arithmetic.
//!
//! Purpose
//! -------
//! Collect the small numerical primitives that keep likelihood work in log
//! space: a max-shifted log-sum-exp, likelihoods relative to the maximum,
//! and grid-normalized likelihoods.
//!
//! Invariants & assumptions
//! ------------------------
//! - All routines assume validated inputs; shape and domain validation is
//!   enforced by the `likelihood` subtree and surfaced as `LikError`.
//! - Exponentials are only ever taken of non-positive differences, so no
//!   routine here can overflow.
//!
//! Conventions
//! -----------
//! - Vectors are `ndarray::Array1<f64>`; scalar helpers take slices.
//! - This module never logs, performs I/O, or touches global state.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`log_space`] check agreement with naive formulas on safe
//!   ranges and finiteness where the naive formulas underflow.

pub mod log_space;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::log_space::{
    log_sum_exp, max_with_index, normalized_likelihoods, relative_likelihoods,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::log_space::{log_sum_exp, normalized_likelihoods, relative_likelihoods};
}
