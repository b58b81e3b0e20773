//! likelihood — likelihood surfaces, ratios and intervals over a grid.
//!
//! Purpose
//! -------
//! Evaluate the likelihood of a set of observations under a one-parameter
//! family of hypotheses, on a caller-supplied grid, and answer the questions
//! asked of such a surface: where is it maximal, how strongly does the data
//! favour one hypothesis over another, and which hypotheses are supported
//! at a given likelihood-ratio threshold.
//!
//! Key behaviors
//! -------------
//! - Bind data, grid and a [`DensityFamily`] into a [`LikelihoodSurface`],
//!   validating every input once at construction.
//! - Evaluate the surface into a [`LikelihoodScan`] holding both the linear
//!   joint likelihood and the log-likelihood at every grid point, with the
//!   nuisance parameter either fixed or profiled by a
//!   [`NuisanceEstimator`].
//! - Derive maximum-likelihood estimates, likelihood ratios (linear and
//!   log), relative likelihoods and [`LikelihoodInterval`]s from a scan.
//!
//! Invariants & assumptions
//! ------------------------
//! - Observations and grid values are finite; grids are strictly increasing.
//! - Log-likelihoods are sums of native per-observation log-densities, never
//!   logarithms of underflowed products.
//! - Linear ratios are refused with [`LikError::ZeroReference`] when their
//!   reference likelihood is zero; log ratios remain available.
//!
//! Conventions
//! -----------
//! - Fallible operations return [`LikResult`]; nothing panics on invalid
//!   user input.
//! - Grid hypotheses passed by value are matched to grid points within a
//!   relative tolerance of [`GRID_MATCH_TOL`].
//! - Diagnostics go through the `log` facade (`warn` for underflow, `debug`
//!   for ties and evaluation summaries); the crate never installs a logger.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the surface through the prelude:
//!
//!   ```rust
//!   use likelihood_surface::likelihood::prelude::*;
//!
//!   let surface = LikelihoodSurface::new(
//!       Bernoulli,
//!       Observations::from_successes(5, 6)?,
//!       HypothesisGrid::from_slice(&[0.5, 0.8, 0.9])?,
//!       SurfaceOptions::default(),
//!   )?;
//!   let scan = surface.evaluate(None)?;
//!   let ratio = scan.likelihood_ratio(0.8, 0.5)?;
//!   assert!(ratio > 4.0);
//!   # Ok::<(), LikError>(())
//!   ```
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its own guards and arithmetic.
//! - End-to-end scenarios live in `tests/integration_likelihood_pipeline.rs`.

pub mod data;
pub mod errors;
pub mod families;
pub mod interval;
pub mod nuisance;
pub mod options;
pub mod scan;
pub mod surface;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::{GRID_MATCH_TOL, HypothesisGrid, MAX_GRID_POINTS, Observations};
pub use self::errors::{LikError, LikResult};
pub use self::families::{Bernoulli, Binomial, DensityFamily, FnFamily, Normal, Poisson};
pub use self::interval::LikelihoodInterval;
pub use self::nuisance::{Denominator, NuisanceEstimator, SdAboutHypothesis};
pub use self::options::{LikelihoodThreshold, SurfaceOptions};
pub use self::scan::{LikelihoodPoint, LikelihoodScan, MaxLikelihood, NuisanceMode, Reference};
pub use self::surface::LikelihoodSurface;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use likelihood_surface::likelihood::prelude::*;
//
// to import the whole evaluation surface in a single line.

pub mod prelude {
    pub use super::data::{HypothesisGrid, Observations};
    pub use super::errors::{LikError, LikResult};
    pub use super::families::{Bernoulli, Binomial, DensityFamily, FnFamily, Normal, Poisson};
    pub use super::interval::LikelihoodInterval;
    pub use super::nuisance::{Denominator, NuisanceEstimator, SdAboutHypothesis};
    pub use super::options::{LikelihoodThreshold, SurfaceOptions};
    pub use super::scan::{LikelihoodScan, MaxLikelihood, Reference};
    pub use super::surface::LikelihoodSurface;
}
