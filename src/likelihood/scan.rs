//! likelihood::scan — evaluated likelihood surfaces and their summaries.
//!
//! Purpose
//! -------
//! Hold the result of evaluating a likelihood surface over its grid and
//! derive everything a reader of the surface asks for: the
//! maximum-likelihood estimate, likelihood ratios against a reference,
//! log-likelihood ratios, likelihood intervals, and `(x, y)` series for
//! plotting collaborators.
//!
//! Key behaviors
//! -------------
//! - [`LikelihoodScan`] owns the grid, the joint likelihoods (products of
//!   densities) and the joint log-likelihoods (sums of native
//!   log-densities), plus the nuisance value used at each grid point.
//! - Maxima, intervals and relative likelihoods are computed in log space,
//!   so they remain well defined when every linear likelihood underflows.
//! - Linear likelihood ratios refuse to divide by an underflowed reference
//!   and return `LikError::ZeroReference` instead.
//!
//! Invariants & assumptions
//! ------------------------
//! - `grid`, `likelihood`, `log_likelihood` and `nuisance` all have the grid
//!   length and share its order.
//! - `log_likelihood[i]` is the sum of per-observation log-densities; it is
//!   never derived from `likelihood[i].ln()`.
//! - A scan is immutable once built; derived quantities are recomputed on
//!   demand rather than cached.
//!
//! Conventions
//! -----------
//! - References are selected through [`Reference`]: the MLE, an explicit
//!   hypothesis value (matched to a grid point), or a grid index.
//! - Ties for the maximum resolve to the first grid point; the remaining
//!   tied indices are recorded on [`MaxLikelihood`].
//!
//! Testing notes
//! -------------
//! - Unit tests here build scans from hand-written log-likelihood vectors
//!   to exercise ties, underflow and reference resolution in isolation.
//! - Surface-level properties (order invariance, profiling monotonicity,
//!   concrete Bernoulli/normal scenarios) live in the surface tests and in
//!   `tests/integration_likelihood_pipeline.rs`.
use crate::{
    likelihood::{
        data::HypothesisGrid,
        errors::{LikError, LikResult},
        interval::LikelihoodInterval,
        options::LikelihoodThreshold,
    },
    numerical_stability::{max_with_index, normalized_likelihoods, relative_likelihoods},
};
use ndarray::Array1;

/// How the nuisance parameter was handled when the scan was evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NuisanceMode {
    /// The family has no nuisance parameter.
    None,
    /// One fixed value was used at every grid point.
    Fixed(f64),
    /// The value was re-estimated at every grid point.
    Profiled,
}

/// Reference hypothesis for likelihood ratios.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Reference {
    /// The maximum-likelihood grid point.
    #[default]
    Mle,
    /// The grid point matching this hypothesis value.
    Hypothesis(f64),
    /// The grid point at this index.
    Index(usize),
}

/// One evaluated grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LikelihoodPoint {
    pub hypothesis: f64,
    pub likelihood: f64,
    pub log_likelihood: f64,
    pub nuisance: Option<f64>,
}

/// Maximum-likelihood grid point.
///
/// - `index`, `hypothesis`: first grid point attaining the maximum.
/// - `likelihood`, `log_likelihood`: values at that point.
/// - `nuisance`: nuisance value used there (profiled or fixed).
/// - `ties`: other grid indices whose log-likelihood equals the maximum
///   exactly; non-empty means the choice of `index` was arbitrary.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxLikelihood {
    pub index: usize,
    pub hypothesis: f64,
    pub likelihood: f64,
    pub log_likelihood: f64,
    pub nuisance: Option<f64>,
    pub ties: Vec<usize>,
}

impl MaxLikelihood {
    /// `true` when other grid points attain the same maximum.
    pub fn is_tied(&self) -> bool {
        !self.ties.is_empty()
    }
}

impl std::fmt::Display for MaxLikelihood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MLE = {} (log-likelihood {:.6}", self.hypothesis, self.log_likelihood)?;
        if let Some(nuisance) = self.nuisance {
            write!(f, ", nuisance {nuisance:.6}")?;
        }
        if self.is_tied() {
            write!(f, ", tied with {} other grid point(s)", self.ties.len())?;
        }
        write!(f, ")")
    }
}

/// `LikelihoodScan` — a likelihood surface evaluated on its grid.
///
/// Constructed by
/// [`LikelihoodSurface::evaluate`](crate::likelihood::surface::LikelihoodSurface::evaluate)
/// and
/// [`LikelihoodSurface::evaluate_profiled`](crate::likelihood::surface::LikelihoodSurface::evaluate_profiled).
#[derive(Debug, Clone, PartialEq)]
pub struct LikelihoodScan {
    family: &'static str,
    grid: HypothesisGrid,
    likelihood: Array1<f64>,
    log_likelihood: Array1<f64>,
    nuisance: Vec<Option<f64>>,
    mode: NuisanceMode,
}

impl LikelihoodScan {
    pub(crate) fn new(
        family: &'static str, grid: HypothesisGrid, likelihood: Array1<f64>,
        log_likelihood: Array1<f64>, nuisance: Vec<Option<f64>>, mode: NuisanceMode,
    ) -> Self {
        debug_assert_eq!(grid.len(), likelihood.len());
        debug_assert_eq!(grid.len(), log_likelihood.len());
        debug_assert_eq!(grid.len(), nuisance.len());
        LikelihoodScan { family, grid, likelihood, log_likelihood, nuisance, mode }
    }

    /// Name of the density family the scan was evaluated under.
    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn grid(&self) -> &HypothesisGrid {
        &self.grid
    }

    /// Joint likelihoods (products of densities); may contain underflowed
    /// zeros.
    pub fn likelihood(&self) -> &Array1<f64> {
        &self.likelihood
    }

    /// Joint log-likelihoods (sums of native log-densities).
    pub fn log_likelihood(&self) -> &Array1<f64> {
        &self.log_likelihood
    }

    /// Nuisance value used at each grid point.
    pub fn nuisance(&self) -> &[Option<f64>] {
        &self.nuisance
    }

    pub fn nuisance_mode(&self) -> NuisanceMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Evaluated grid point at `index`.
    pub fn point(&self, index: usize) -> Option<LikelihoodPoint> {
        Some(LikelihoodPoint {
            hypothesis: self.grid.get(index)?,
            likelihood: self.likelihood[index],
            log_likelihood: self.log_likelihood[index],
            nuisance: self.nuisance[index],
        })
    }

    /// All evaluated grid points in grid order.
    pub fn points(&self) -> Vec<LikelihoodPoint> {
        (0..self.len()).filter_map(|i| self.point(i)).collect()
    }

    /// Number of grid points whose linear likelihood underflowed to zero
    /// while the log-likelihood stayed finite.
    pub fn underflow_count(&self) -> usize {
        self.likelihood
            .iter()
            .zip(self.log_likelihood.iter())
            .filter(|&(&l, &ll)| l == 0.0 && ll.is_finite())
            .count()
    }

    /// Maximum-likelihood grid point, located in log space.
    ///
    /// Ties resolve to the first grid point; the other tied indices are
    /// returned in [`MaxLikelihood::ties`].
    pub fn max_likelihood_estimate(&self) -> MaxLikelihood {
        let (index, max) = max_with_index(self.log_likelihood.iter())
            .unwrap_or((0, self.log_likelihood[0]));
        let ties: Vec<usize> = self
            .log_likelihood
            .iter()
            .enumerate()
            .filter(|&(i, &ll)| i != index && ll == max)
            .map(|(i, _)| i)
            .collect();
        if !ties.is_empty() {
            log::debug!(
                "{}: maximum log-likelihood {max} attained at {} grid points; reporting the first",
                self.family,
                ties.len() + 1
            );
        }
        MaxLikelihood {
            index,
            hypothesis: self.grid.values()[index],
            likelihood: self.likelihood[index],
            log_likelihood: max,
            nuisance: self.nuisance[index],
            ties,
        }
    }

    /// Grid index selected by `reference`.
    ///
    /// # Errors
    /// - [`LikError::ReferenceNotOnGrid`] if a hypothesis value matches no
    ///   grid point.
    /// - [`LikError::ReferenceIndexOutOfRange`] if an index is too large.
    pub fn resolve_reference(&self, reference: Reference) -> LikResult<usize> {
        match reference {
            Reference::Mle => Ok(self.max_likelihood_estimate().index),
            Reference::Hypothesis(value) => {
                self.grid.position_of(value).ok_or(LikError::ReferenceNotOnGrid { value })
            }
            Reference::Index(index) if index < self.len() => Ok(index),
            Reference::Index(index) => {
                Err(LikError::ReferenceIndexOutOfRange { index, len: self.len() })
            }
        }
    }

    /// Likelihood ratios `L(h) / L(reference)` for every grid point.
    ///
    /// Computed as `exp(ℓ(h) − ℓ(reference))`, which equals the quotient of
    /// the linear likelihoods wherever neither underflows.
    ///
    /// # Errors
    /// - [`LikError::ZeroReference`] if the reference likelihood is exactly
    ///   zero (underflow or zero density); use
    ///   [`log_likelihood_ratios`](Self::log_likelihood_ratios) instead.
    /// - Reference-resolution errors per [`resolve_reference`](Self::resolve_reference).
    pub fn likelihood_ratios(&self, reference: Reference) -> LikResult<Array1<f64>> {
        let r = self.resolve_reference(reference)?;
        if self.likelihood[r] == 0.0 {
            return Err(LikError::ZeroReference { hypothesis: self.grid.values()[r] });
        }
        let ll_ref = self.log_likelihood[r];
        Ok(self.log_likelihood.mapv(|ll| (ll - ll_ref).exp()))
    }

    /// Log-likelihood ratios `ℓ(h) − ℓ(reference)` for every grid point.
    ///
    /// Well defined whenever the reference log-likelihood is finite, even if
    /// every linear likelihood underflowed.
    ///
    /// # Errors
    /// - [`LikError::ZeroReference`] if the reference log-likelihood is `-∞`
    ///   (a genuinely zero density, not underflow).
    pub fn log_likelihood_ratios(&self, reference: Reference) -> LikResult<Array1<f64>> {
        let r = self.resolve_reference(reference)?;
        let ll_ref = self.log_likelihood[r];
        if ll_ref == f64::NEG_INFINITY {
            return Err(LikError::ZeroReference { hypothesis: self.grid.values()[r] });
        }
        Ok(self.log_likelihood.mapv(|ll| ll - ll_ref))
    }

    /// Pairwise ratio `L(a) / L(b)` between two grid hypotheses.
    pub fn likelihood_ratio(&self, a: f64, b: f64) -> LikResult<f64> {
        let ia = self.resolve_reference(Reference::Hypothesis(a))?;
        let ib = self.resolve_reference(Reference::Hypothesis(b))?;
        if self.likelihood[ib] == 0.0 {
            return Err(LikError::ZeroReference { hypothesis: b });
        }
        Ok((self.log_likelihood[ia] - self.log_likelihood[ib]).exp())
    }

    /// Pairwise log ratio `ℓ(a) − ℓ(b)` between two grid hypotheses.
    pub fn log_likelihood_ratio(&self, a: f64, b: f64) -> LikResult<f64> {
        let ia = self.resolve_reference(Reference::Hypothesis(a))?;
        let ib = self.resolve_reference(Reference::Hypothesis(b))?;
        if self.log_likelihood[ib] == f64::NEG_INFINITY {
            return Err(LikError::ZeroReference { hypothesis: b });
        }
        Ok(self.log_likelihood[ia] - self.log_likelihood[ib])
    }

    /// Likelihood interval at a raw threshold.
    ///
    /// # Errors
    /// - [`LikError::InvalidThreshold`] unless `0 < threshold <= 1`.
    /// - [`LikError::ZeroReference`] if the maximum log-likelihood is `-∞`.
    pub fn likelihood_interval(&self, threshold: f64) -> LikResult<LikelihoodInterval> {
        self.interval_at(LikelihoodThreshold::new(threshold)?)
    }

    /// Likelihood interval at a validated threshold.
    ///
    /// Members are the grid points with `ℓ(h) − ℓ(ĥ) ≥ ln threshold`. The
    /// comparison happens in log space, so the interval exists even when
    /// the linear likelihoods underflow. Contiguity is reported on the
    /// result, never enforced.
    pub fn interval_at(&self, threshold: LikelihoodThreshold) -> LikResult<LikelihoodInterval> {
        let mle = self.max_likelihood_estimate();
        if mle.log_likelihood == f64::NEG_INFINITY {
            return Err(LikError::ZeroReference { hypothesis: mle.hypothesis });
        }
        let cutoff = threshold.ln_value();
        let (indices, hypotheses): (Vec<usize>, Vec<f64>) = self
            .log_likelihood
            .iter()
            .zip(self.grid.values().iter())
            .enumerate()
            .filter(|&(_, (&ll, _))| ll - mle.log_likelihood >= cutoff)
            .map(|(i, (_, &h))| (i, h))
            .unzip();
        let interval = LikelihoodInterval::new(threshold, indices, hypotheses, self.len());
        if !interval.is_contiguous() {
            log::debug!(
                "{}: {} likelihood interval splits into {} segments",
                self.family,
                threshold,
                interval.segments().len()
            );
        }
        Ok(interval)
    }

    /// Likelihoods relative to the maximum, `exp(ℓ(h) − ℓ(ĥ))`.
    ///
    /// Equal to `likelihood_ratios(Reference::Mle)` when nothing underflows,
    /// but available even when the MLE's linear likelihood is zero.
    ///
    /// # Errors
    /// - [`LikError::ZeroReference`] if the maximum log-likelihood is `-∞`.
    pub fn relative_likelihoods(&self) -> LikResult<Array1<f64>> {
        self.guard_finite_max()?;
        Ok(relative_likelihoods(&self.log_likelihood))
    }

    /// Likelihoods normalized to sum to one over the grid.
    ///
    /// # Errors
    /// - [`LikError::ZeroReference`] if the maximum log-likelihood is `-∞`.
    pub fn normalized_likelihoods(&self) -> LikResult<Array1<f64>> {
        self.guard_finite_max()?;
        Ok(normalized_likelihoods(&self.log_likelihood))
    }

    /// `(hypothesis, likelihood)` pairs in grid order.
    pub fn likelihood_series(&self) -> Vec<(f64, f64)> {
        self.series(&self.likelihood)
    }

    /// `(hypothesis, log-likelihood)` pairs in grid order.
    pub fn log_likelihood_series(&self) -> Vec<(f64, f64)> {
        self.series(&self.log_likelihood)
    }

    /// `(hypothesis, likelihood ratio)` pairs against `reference`.
    pub fn ratio_series(&self, reference: Reference) -> LikResult<Vec<(f64, f64)>> {
        Ok(self.series(&self.likelihood_ratios(reference)?))
    }

    fn series(&self, values: &Array1<f64>) -> Vec<(f64, f64)> {
        self.grid.values().iter().copied().zip(values.iter().copied()).collect()
    }

    fn guard_finite_max(&self) -> LikResult<()> {
        let mle = self.max_likelihood_estimate();
        if mle.log_likelihood == f64::NEG_INFINITY {
            return Err(LikError::ZeroReference { hypothesis: mle.hypothesis });
        }
        Ok(())
    }
}
