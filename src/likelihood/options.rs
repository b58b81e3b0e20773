//! Evaluation options and likelihood-interval thresholds.
//!
//! - [`SurfaceOptions`]: how a surface evaluates its grid (sequential or
//!   data-parallel).
//! - [`LikelihoodThreshold`]: a validated interval cutoff in (0, 1] with the
//!   conventional presets 1/8 and 1/32. Neither preset is a default; the
//!   caller picks the conservatism.
//!
//! Parsing:
//! `LikelihoodThreshold` implements `FromStr` and accepts a decimal
//! (`"0.125"`), a fraction (`"1/8"`), or a case-insensitive preset name
//! (`"one_eighth"`, `"one_thirty_second"`).
use crate::likelihood::{
    errors::{LikError, LikResult},
    validation::validate_threshold,
};
use std::str::FromStr;

/// Grid-evaluation configuration.
///
/// Fields:
/// - `parallel: bool`: evaluate grid points on the rayon thread pool.
///   Results are identical to sequential evaluation.
/// - `warn_on_underflow: bool`: emit a `log::warn!` record when some joint
///   likelihoods underflow to zero.
///
/// Default:
/// - `parallel`: `false`
/// - `warn_on_underflow`: `true`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceOptions {
    pub parallel: bool,
    pub warn_on_underflow: bool,
}

impl SurfaceOptions {
    pub fn new(parallel: bool, warn_on_underflow: bool) -> Self {
        Self { parallel, warn_on_underflow }
    }

    /// Default options with parallel evaluation switched on.
    pub fn parallel() -> Self {
        Self { parallel: true, ..Self::default() }
    }
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self { parallel: false, warn_on_underflow: true }
    }
}

/// Validated likelihood-interval threshold in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct LikelihoodThreshold(f64);

impl LikelihoodThreshold {
    /// The 1/8 convention: moderately strong evidence against points
    /// outside the interval.
    pub const ONE_EIGHTH: LikelihoodThreshold = LikelihoodThreshold(0.125);

    /// The 1/32 convention: strong evidence against points outside the
    /// interval.
    pub const ONE_THIRTY_SECOND: LikelihoodThreshold = LikelihoodThreshold(0.031_25);

    /// Construct a threshold.
    ///
    /// # Errors
    /// - [`LikError::InvalidThreshold`] unless `0 < value <= 1`.
    pub fn new(value: f64) -> LikResult<Self> {
        validate_threshold(value).map(LikelihoodThreshold)
    }

    /// Threshold as a likelihood ratio.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Threshold as a log-likelihood ratio (`ln value`, always ≤ 0).
    pub fn ln_value(&self) -> f64 {
        self.0.ln()
    }
}

impl TryFrom<f64> for LikelihoodThreshold {
    type Error = LikError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        LikelihoodThreshold::new(value)
    }
}

impl FromStr for LikelihoodThreshold {
    type Err = LikError;

    /// Parse a threshold from a decimal, a fraction or a preset name.
    ///
    /// Any value that parses but lies outside (0, 1] returns
    /// `LikError::InvalidThreshold`; anything unparsable returns
    /// `LikError::UnparsableThreshold`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "one_eighth" | "eighth" => return Ok(Self::ONE_EIGHTH),
            "one_thirty_second" | "thirty_second" => return Ok(Self::ONE_THIRTY_SECOND),
            _ => {}
        }
        let unparsable = || LikError::UnparsableThreshold { text: s.to_string() };
        let value = match trimmed.split_once('/') {
            Some((num, den)) => {
                let num: f64 = num.trim().parse().map_err(|_| unparsable())?;
                let den: f64 = den.trim().parse().map_err(|_| unparsable())?;
                num / den
            }
            None => trimmed.parse().map_err(|_| unparsable())?,
        };
        LikelihoodThreshold::new(value)
    }
}

impl std::fmt::Display for LikelihoodThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Self::ONE_EIGHTH {
            write!(f, "1/8")
        } else if *self == Self::ONE_THIRTY_SECOND {
            write!(f, "1/32")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
