//! Density families for likelihood surfaces.
//!
//! This module defines [`DensityFamily`], the capability a likelihood surface
//! needs from a sampling-distribution assumption, and the families shipped
//! with the crate:
//!
//! - [`Bernoulli`]: binary outcomes with success probability `p ∈ [0, 1]`.
//! - [`Binomial`]: success counts out of a fixed number of trials.
//! - [`Normal`]: real observations with hypothesised mean and a standard
//!   deviation nuisance parameter.
//! - [`Poisson`]: non-negative counts with rate `λ > 0`.
//! - [`FnFamily`]: caller-supplied density (and optional log-density) closures.
//!
//! ## Numerics
//! - Every shipped family evaluates its log-density in native log form
//!   (`ln p`, `ln_1p(-p)`, statrs `ln_pdf` / `ln_pmf`) rather than
//!   `density(..).ln()`, so extreme hypotheses keep full precision.
//! - `0 · ln 0` is taken as `0` at the boundary of the Bernoulli and Binomial
//!   supports, so `p = 0` and `p = 1` are valid grid points.
use crate::likelihood::{
    errors::{LikError, LikResult},
    validation::{validate_count, validate_positive_scale, validate_probability},
};
use statrs::{
    distribution::{Continuous, Discrete},
    function::factorial::ln_binomial,
};

/// Sampling-distribution capability consumed by
/// [`LikelihoodSurface`](crate::likelihood::surface::LikelihoodSurface).
///
/// Required:
/// - `name()`: short family name used in error messages.
/// - `check_observation(x)`: reject observations outside the support.
/// - `check_hypothesis(h)`: reject hypotheses outside the parameter domain.
/// - `ln_density(x, h, nuisance)`: per-observation log-density in native log
///   form.
///
/// Optional:
/// - `density(x, h, nuisance)`: per-observation density; defaults to
///   `ln_density(..).exp()`.
/// - `nuisance_name()`: `Some(name)` when the family needs a nuisance
///   parameter; `default_nuisance()` supplies a family-level fixed value.
/// - `check_nuisance(value)`: validate a nuisance value (defaults to
///   accepting any finite value).
///
/// Implementations must be pure: the same arguments always produce the same
/// result, which is what makes parallel grid evaluation safe.
pub trait DensityFamily: Send + Sync {
    // Required methods
    fn name(&self) -> &'static str;
    fn check_observation(&self, x: f64) -> LikResult<()>;
    fn check_hypothesis(&self, hypothesis: f64) -> LikResult<()>;
    fn ln_density(&self, x: f64, hypothesis: f64, nuisance: Option<f64>) -> LikResult<f64>;

    // Optional methods
    fn density(&self, x: f64, hypothesis: f64, nuisance: Option<f64>) -> LikResult<f64> {
        Ok(self.ln_density(x, hypothesis, nuisance)?.exp())
    }

    fn nuisance_name(&self) -> Option<&'static str> {
        None
    }

    fn default_nuisance(&self) -> Option<f64> {
        None
    }

    fn check_nuisance(&self, value: f64) -> LikResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(LikError::Domain {
                family: self.name(),
                parameter: "nuisance",
                value,
                reason: "nuisance must be finite",
            })
        }
    }

    /// `true` when `ln_density` cannot be evaluated without a nuisance value.
    fn requires_nuisance(&self) -> bool {
        self.nuisance_name().is_some()
    }
}

/// Bernoulli outcomes `x ∈ {0, 1}` with success probability `p ∈ [0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bernoulli;

impl DensityFamily for Bernoulli {
    fn name(&self) -> &'static str {
        "Bernoulli"
    }

    fn check_observation(&self, x: f64) -> LikResult<()> {
        if x == 0.0 || x == 1.0 {
            Ok(())
        } else {
            Err(LikError::Domain {
                family: self.name(),
                parameter: "observation",
                value: x,
                reason: "outcomes must be 0 or 1",
            })
        }
    }

    fn check_hypothesis(&self, hypothesis: f64) -> LikResult<()> {
        validate_probability(self.name(), hypothesis).map(|_| ())
    }

    fn ln_density(&self, x: f64, hypothesis: f64, _nuisance: Option<f64>) -> LikResult<f64> {
        self.check_observation(x)?;
        let p = validate_probability(self.name(), hypothesis)?;
        if x == 1.0 { Ok(p.ln()) } else { Ok((-p).ln_1p()) }
    }

    fn density(&self, x: f64, hypothesis: f64, _nuisance: Option<f64>) -> LikResult<f64> {
        self.check_observation(x)?;
        let p = validate_probability(self.name(), hypothesis)?;
        if x == 1.0 { Ok(p) } else { Ok(1.0 - p) }
    }
}

/// Binomial success counts `k ∈ 0..=trials` with success probability `p`.
///
/// One observation per experiment; `Binomial { trials: 6 }` with the single
/// observation `5` carries the same likelihood shape as six Bernoulli
/// outcomes with five successes (they differ by the constant `C(6, 5)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binomial {
    pub trials: u64,
}

impl Binomial {
    /// Binomial family with a fixed number of trials per observation.
    pub fn new(trials: u64) -> LikResult<Self> {
        if trials == 0 {
            return Err(LikError::Domain {
                family: "Binomial",
                parameter: "trials",
                value: 0.0,
                reason: "trials must be at least 1",
            });
        }
        Ok(Binomial { trials })
    }
}

impl DensityFamily for Binomial {
    fn name(&self) -> &'static str {
        "Binomial"
    }

    fn check_observation(&self, x: f64) -> LikResult<()> {
        validate_count(self.name(), x, Some(self.trials)).map(|_| ())
    }

    fn check_hypothesis(&self, hypothesis: f64) -> LikResult<()> {
        validate_probability(self.name(), hypothesis).map(|_| ())
    }

    fn ln_density(&self, x: f64, hypothesis: f64, _nuisance: Option<f64>) -> LikResult<f64> {
        let k = validate_count(self.name(), x, Some(self.trials))?;
        let p = validate_probability(self.name(), hypothesis)?;
        let failures = self.trials - k;
        let success_term = if k == 0 { 0.0 } else { k as f64 * p.ln() };
        let failure_term = if failures == 0 { 0.0 } else { failures as f64 * (-p).ln_1p() };
        Ok(ln_binomial(self.trials, k) + success_term + failure_term)
    }
}

/// Normal observations with hypothesised mean `μ` and standard deviation
/// nuisance `σ > 0`.
///
/// `sd` is the family-level fixed standard deviation. When it is `None`,
/// callers must either pass a fixed value to `evaluate` or profile `σ`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Normal {
    pub sd: Option<f64>,
}

impl Normal {
    /// Normal family with a known standard deviation.
    pub fn with_sd(sd: f64) -> LikResult<Self> {
        let sd = validate_positive_scale("Normal", sd)?;
        Ok(Normal { sd: Some(sd) })
    }

    /// Normal family whose standard deviation must be supplied or profiled.
    pub const fn unknown_sd() -> Self {
        Normal { sd: None }
    }

    fn distribution(
        &self, mean: f64, nuisance: Option<f64>,
    ) -> LikResult<statrs::distribution::Normal> {
        if !mean.is_finite() {
            return Err(LikError::Domain {
                family: self.name(),
                parameter: "hypothesis",
                value: mean,
                reason: "mean must be finite",
            });
        }
        let sd = nuisance.or(self.sd).ok_or(LikError::MissingParameter {
            family: self.name(),
            parameter: "standard deviation",
        })?;
        let sd = validate_positive_scale(self.name(), sd)?;
        statrs::distribution::Normal::new(mean, sd).map_err(|_| LikError::Domain {
            family: self.name(),
            parameter: "nuisance",
            value: sd,
            reason: "rejected by the normal distribution constructor",
        })
    }
}

impl DensityFamily for Normal {
    fn name(&self) -> &'static str {
        "Normal"
    }

    fn check_observation(&self, _x: f64) -> LikResult<()> {
        Ok(())
    }

    fn check_hypothesis(&self, hypothesis: f64) -> LikResult<()> {
        if hypothesis.is_finite() {
            Ok(())
        } else {
            Err(LikError::Domain {
                family: self.name(),
                parameter: "hypothesis",
                value: hypothesis,
                reason: "mean must be finite",
            })
        }
    }

    fn ln_density(&self, x: f64, hypothesis: f64, nuisance: Option<f64>) -> LikResult<f64> {
        Ok(self.distribution(hypothesis, nuisance)?.ln_pdf(x))
    }

    fn density(&self, x: f64, hypothesis: f64, nuisance: Option<f64>) -> LikResult<f64> {
        Ok(self.distribution(hypothesis, nuisance)?.pdf(x))
    }

    fn nuisance_name(&self) -> Option<&'static str> {
        Some("standard deviation")
    }

    fn default_nuisance(&self) -> Option<f64> {
        self.sd
    }

    fn check_nuisance(&self, value: f64) -> LikResult<f64> {
        validate_positive_scale(self.name(), value)
    }
}

/// Poisson counts with rate `λ > 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Poisson;

impl Poisson {
    fn distribution(&self, rate: f64) -> LikResult<statrs::distribution::Poisson> {
        self.check_hypothesis(rate)?;
        statrs::distribution::Poisson::new(rate).map_err(|_| LikError::Domain {
            family: self.name(),
            parameter: "hypothesis",
            value: rate,
            reason: "rejected by the Poisson distribution constructor",
        })
    }
}

impl DensityFamily for Poisson {
    fn name(&self) -> &'static str {
        "Poisson"
    }

    fn check_observation(&self, x: f64) -> LikResult<()> {
        validate_count(self.name(), x, None).map(|_| ())
    }

    fn check_hypothesis(&self, hypothesis: f64) -> LikResult<()> {
        if hypothesis.is_finite() && hypothesis > 0.0 {
            Ok(())
        } else {
            Err(LikError::Domain {
                family: self.name(),
                parameter: "hypothesis",
                value: hypothesis,
                reason: "rate must be finite and > 0",
            })
        }
    }

    fn ln_density(&self, x: f64, hypothesis: f64, _nuisance: Option<f64>) -> LikResult<f64> {
        let k = validate_count(self.name(), x, None)?;
        Ok(self.distribution(hypothesis)?.ln_pmf(k))
    }

    fn density(&self, x: f64, hypothesis: f64, _nuisance: Option<f64>) -> LikResult<f64> {
        let k = validate_count(self.name(), x, None)?;
        Ok(self.distribution(hypothesis)?.pmf(k))
    }
}

/// Boxed per-observation density closure `(x, hypothesis, nuisance) -> value`.
pub type DensityFn = Box<dyn Fn(f64, f64, Option<f64>) -> LikResult<f64> + Send + Sync>;

/// `FnFamily` — density family built from caller closures.
///
/// The density closure is mandatory. A native log-density closure is
/// optional; without one, `ln_density` falls back to `density(..).ln()`,
/// which loses precision where the density underflows.
///
/// Closures report out-of-support arguments by returning
/// `LikError::Domain`. Densities that are negative, NaN or infinite, and
/// log-densities that are NaN or `+∞`, are rejected the same way.
pub struct FnFamily {
    name: &'static str,
    density: DensityFn,
    ln_density: Option<DensityFn>,
    nuisance_name: Option<&'static str>,
}

impl FnFamily {
    /// Family from a density closure alone.
    pub fn new<D>(name: &'static str, density: D) -> Self
    where
        D: Fn(f64, f64, Option<f64>) -> LikResult<f64> + Send + Sync + 'static,
    {
        FnFamily { name, density: Box::new(density), ln_density: None, nuisance_name: None }
    }

    /// Attach a native log-density closure.
    pub fn with_ln_density<L>(mut self, ln_density: L) -> Self
    where
        L: Fn(f64, f64, Option<f64>) -> LikResult<f64> + Send + Sync + 'static,
    {
        self.ln_density = Some(Box::new(ln_density));
        self
    }

    /// Declare that the closures need a nuisance parameter called `name`.
    pub fn with_nuisance(mut self, name: &'static str) -> Self {
        self.nuisance_name = Some(name);
        self
    }

    fn checked(&self, value: f64) -> LikResult<f64> {
        if !value.is_finite() || value < 0.0 {
            return Err(LikError::Domain {
                family: self.name,
                parameter: "density",
                value,
                reason: "densities must be finite and non-negative",
            });
        }
        Ok(value)
    }
}

impl std::fmt::Debug for FnFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnFamily")
            .field("name", &self.name)
            .field("native_ln_density", &self.ln_density.is_some())
            .field("nuisance_name", &self.nuisance_name)
            .finish()
    }
}

impl DensityFamily for FnFamily {
    fn name(&self) -> &'static str {
        self.name
    }

    fn check_observation(&self, _x: f64) -> LikResult<()> {
        Ok(())
    }

    fn check_hypothesis(&self, _hypothesis: f64) -> LikResult<()> {
        Ok(())
    }

    fn ln_density(&self, x: f64, hypothesis: f64, nuisance: Option<f64>) -> LikResult<f64> {
        match &self.ln_density {
            Some(ln_density) => {
                let value = ln_density(x, hypothesis, nuisance)?;
                if value.is_nan() || value == f64::INFINITY {
                    return Err(LikError::Domain {
                        family: self.name,
                        parameter: "log-density",
                        value,
                        reason: "log-densities must be finite or -inf",
                    });
                }
                Ok(value)
            }
            None => Ok(self.density(x, hypothesis, nuisance)?.ln()),
        }
    }

    fn density(&self, x: f64, hypothesis: f64, nuisance: Option<f64>) -> LikResult<f64> {
        self.checked((self.density)(x, hypothesis, nuisance)?)
    }

    fn nuisance_name(&self) -> Option<&'static str> {
        self.nuisance_name
    }
}
