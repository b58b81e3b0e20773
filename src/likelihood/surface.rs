//! likelihood::surface — likelihood evaluation over a hypothesis grid.
//!
//! Purpose
//! -------
//! Bind observations, a hypothesis grid and a density family into a
//! [`LikelihoodSurface`], and evaluate it into a
//! [`LikelihoodScan`](crate::likelihood::scan::LikelihoodScan) either with a
//! fixed nuisance parameter or with the nuisance profiled out point by
//! point.
//!
//! Key behaviors
//! -------------
//! - Validate every observation against the family's support and every grid
//!   point against its hypothesis domain once, at construction.
//! - Compute, per grid point, the joint likelihood as the product of
//!   per-observation densities and the joint log-likelihood as the sum of
//!   per-observation native log-densities. The two are computed side by
//!   side and never derived from each other.
//! - Optionally evaluate grid points on the rayon thread pool; results are
//!   bit-for-bit identical to sequential evaluation because each point is
//!   computed independently by the same sequential inner loop.
//! - Warn through the `log` facade when joint likelihoods underflow.
//!
//! Invariants & assumptions
//! ------------------------
//! - A surface never mutates after construction; every evaluation is a pure
//!   function of the surface and its arguments.
//! - Nuisance values (fixed or profiled) are validated by the family before
//!   any density is evaluated, so evaluation errors are reported in grid
//!   order regardless of parallelism.
//!
//! Downstream usage
//! ----------------
//! - Typical use:
//!
//!   ```rust
//!   use likelihood_surface::likelihood::prelude::*;
//!
//!   let obs = Observations::from_successes(5, 6)?;
//!   let grid = HypothesisGrid::from_step(0.0, 1.0, 0.001)?;
//!   let surface = LikelihoodSurface::new(Bernoulli, obs, grid, SurfaceOptions::default())?;
//!   let scan = surface.evaluate(None)?;
//!   let mle = scan.max_likelihood_estimate();
//!   assert!((mle.hypothesis - 0.833).abs() < 1e-9);
//!   # Ok::<(), LikError>(())
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction errors, missing nuisance parameters,
//!   order invariance, parallel/sequential agreement, agreement of
//!   `exp(ℓ)` with the linear likelihood, and profile monotonicity.
use crate::likelihood::{
    data::{HypothesisGrid, Observations},
    errors::{LikError, LikResult},
    families::DensityFamily,
    nuisance::NuisanceEstimator,
    options::SurfaceOptions,
    scan::{LikelihoodScan, NuisanceMode},
};
use ndarray::Array1;
use rayon::prelude::*;

/// `LikelihoodSurface` — observations, grid and family bound for evaluation.
///
/// Fields
/// ------
/// - `family`: `F`
///   Density family supplying per-observation (log-)densities.
/// - `observations`: [`Observations`]
///   Validated data, inside the family's support.
/// - `grid`: [`HypothesisGrid`]
///   Strictly increasing candidate values, inside the family's domain.
/// - `options`: [`SurfaceOptions`]
///   Evaluation strategy and logging switches.
///
/// Invariants
/// ----------
/// - Every observation passed `family.check_observation`.
/// - Every grid value passed `family.check_hypothesis`.
#[derive(Debug, Clone)]
pub struct LikelihoodSurface<F: DensityFamily> {
    family: F,
    observations: Observations,
    grid: HypothesisGrid,
    options: SurfaceOptions,
}

impl<F: DensityFamily> LikelihoodSurface<F> {
    /// Bind a family, observations and grid.
    ///
    /// Errors
    /// ------
    /// - `LikError::Domain` for the first observation outside the family's
    ///   support or the first grid value outside its hypothesis domain.
    pub fn new(
        family: F, observations: Observations, grid: HypothesisGrid, options: SurfaceOptions,
    ) -> LikResult<Self> {
        for &x in observations.iter() {
            family.check_observation(x)?;
        }
        for &h in grid.values().iter() {
            family.check_hypothesis(h)?;
        }
        Ok(LikelihoodSurface { family, observations, grid, options })
    }

    /// Bind a family to raw slices with default options.
    ///
    /// Errors
    /// ------
    /// - `LikError::EmptyInput` if either slice is empty.
    /// - Any error from [`Observations::from_slice`],
    ///   [`HypothesisGrid::from_slice`] or [`LikelihoodSurface::new`].
    pub fn from_slices(family: F, observations: &[f64], grid: &[f64]) -> LikResult<Self> {
        let observations = Observations::from_slice(observations)?;
        let grid = HypothesisGrid::from_slice(grid)?;
        LikelihoodSurface::new(family, observations, grid, SurfaceOptions::default())
    }

    /// Same surface with different evaluation options.
    pub fn with_options(self, options: SurfaceOptions) -> Self {
        LikelihoodSurface { options, ..self }
    }

    pub fn family(&self) -> &F {
        &self.family
    }

    pub fn observations(&self) -> &Observations {
        &self.observations
    }

    pub fn grid(&self) -> &HypothesisGrid {
        &self.grid
    }

    pub fn options(&self) -> SurfaceOptions {
        self.options
    }

    /// Evaluate the surface with a single nuisance value for every grid
    /// point.
    ///
    /// `fixed_nuisance` overrides the family's default nuisance value.
    ///
    /// Errors
    /// ------
    /// - `LikError::MissingParameter` if the family requires a nuisance
    ///   parameter and neither `fixed_nuisance` nor a family default is
    ///   available.
    /// - `LikError::Domain` if the nuisance value is outside the family's
    ///   domain, or a density rejects its arguments.
    pub fn evaluate(&self, fixed_nuisance: Option<f64>) -> LikResult<LikelihoodScan> {
        let nuisance = self.resolve_fixed_nuisance(fixed_nuisance)?;
        let mode = match nuisance {
            Some(value) => NuisanceMode::Fixed(value),
            None => NuisanceMode::None,
        };
        self.evaluate_with(vec![nuisance; self.grid.len()], mode)
    }

    /// Evaluate the profile likelihood: the nuisance parameter is
    /// re-estimated at every grid point by `estimator`.
    ///
    /// Errors
    /// ------
    /// - The first estimator error in grid order.
    /// - `LikError::Domain` if an estimate lies outside the family's
    ///   nuisance domain.
    pub fn evaluate_profiled<E>(&self, estimator: &E) -> LikResult<LikelihoodScan>
    where
        E: NuisanceEstimator + ?Sized,
    {
        let nuisance = self
            .grid
            .values()
            .iter()
            .map(|&h| {
                let value = estimator.estimate(&self.observations, h)?;
                self.family.check_nuisance(value).map(Some)
            })
            .collect::<LikResult<Vec<_>>>()?;
        self.evaluate_with(nuisance, NuisanceMode::Profiled)
    }

    /// Joint log-likelihood at an arbitrary hypothesis (not only grid
    /// points).
    pub fn log_likelihood_at(&self, hypothesis: f64, nuisance: Option<f64>) -> LikResult<f64> {
        Ok(self.joint_at(hypothesis, nuisance)?.1)
    }

    /// Joint likelihood at an arbitrary hypothesis; may underflow to zero.
    pub fn likelihood_at(&self, hypothesis: f64, nuisance: Option<f64>) -> LikResult<f64> {
        Ok(self.joint_at(hypothesis, nuisance)?.0)
    }

    /// Ratio `L(a) / L(b)` for arbitrary hypotheses under one nuisance value.
    ///
    /// Errors
    /// ------
    /// - `LikError::ZeroReference` if `L(b)` is exactly zero.
    pub fn likelihood_ratio(&self, a: f64, b: f64, nuisance: Option<f64>) -> LikResult<f64> {
        let (_, ll_a) = self.joint_at(a, nuisance)?;
        let (l_b, ll_b) = self.joint_at(b, nuisance)?;
        if l_b == 0.0 {
            return Err(LikError::ZeroReference { hypothesis: b });
        }
        Ok((ll_a - ll_b).exp())
    }

    /// Log ratio `ℓ(a) − ℓ(b)` for arbitrary hypotheses under one nuisance
    /// value.
    ///
    /// Errors
    /// ------
    /// - `LikError::ZeroReference` if `ℓ(b)` is `-∞`.
    pub fn log_likelihood_ratio(&self, a: f64, b: f64, nuisance: Option<f64>) -> LikResult<f64> {
        let (_, ll_a) = self.joint_at(a, nuisance)?;
        let (_, ll_b) = self.joint_at(b, nuisance)?;
        if ll_b == f64::NEG_INFINITY {
            return Err(LikError::ZeroReference { hypothesis: b });
        }
        Ok(ll_a - ll_b)
    }

    // ---- Private helpers ----

    fn resolve_fixed_nuisance(&self, fixed: Option<f64>) -> LikResult<Option<f64>> {
        let value = match self.family.nuisance_name() {
            Some(parameter) => Some(fixed.or(self.family.default_nuisance()).ok_or(
                LikError::MissingParameter { family: self.family.name(), parameter },
            )?),
            None => fixed,
        };
        value.map(|v| self.family.check_nuisance(v)).transpose()
    }

    fn joint_at(&self, hypothesis: f64, nuisance: Option<f64>) -> LikResult<(f64, f64)> {
        self.family.check_hypothesis(hypothesis)?;
        let nuisance = self.resolve_fixed_nuisance(nuisance)?;
        self.joint(hypothesis, nuisance)
    }

    /// Joint `(likelihood, log_likelihood)` at one hypothesis.
    fn joint(&self, hypothesis: f64, nuisance: Option<f64>) -> LikResult<(f64, f64)> {
        let mut likelihood = 1.0;
        let mut log_likelihood = 0.0;
        for &x in self.observations.iter() {
            likelihood *= self.family.density(x, hypothesis, nuisance)?;
            log_likelihood += self.family.ln_density(x, hypothesis, nuisance)?;
        }
        Ok((likelihood, log_likelihood))
    }

    fn evaluate_with(
        &self, nuisance: Vec<Option<f64>>, mode: NuisanceMode,
    ) -> LikResult<LikelihoodScan> {
        let grid = self.grid.values();
        let results: Vec<LikResult<(f64, f64)>> = if self.options.parallel {
            (0..grid.len()).into_par_iter().map(|i| self.joint(grid[i], nuisance[i])).collect()
        } else {
            (0..grid.len()).map(|i| self.joint(grid[i], nuisance[i])).collect()
        };

        let mut likelihood = Array1::zeros(grid.len());
        let mut log_likelihood = Array1::zeros(grid.len());
        for (i, result) in results.into_iter().enumerate() {
            let (l, ll) = result?;
            likelihood[i] = l;
            log_likelihood[i] = ll;
        }

        let scan = LikelihoodScan::new(
            self.family.name(),
            self.grid.clone(),
            likelihood,
            log_likelihood,
            nuisance,
            mode,
        );
        log::debug!(
            "{}: evaluated {} grid points over {} observations ({mode:?})",
            self.family.name(),
            scan.len(),
            self.observations.len()
        );
        let underflowed = scan.underflow_count();
        if underflowed > 0 && self.options.warn_on_underflow {
            log::warn!(
                "{}: joint likelihood underflowed to zero at {underflowed} of {} grid points; \
                 use log-likelihoods and log-likelihood ratios",
                self.family.name(),
                scan.len()
            );
        }
        Ok(scan)
    }
}
