//! Closed-form nuisance-parameter estimators for profile likelihoods.
//!
//! A [`NuisanceEstimator`] maps `(observations, hypothesis)` to the nuisance
//! value plugged into the density at that hypothesis. Estimators are pure
//! closed-form functions, never numerical optimizers; the surface calls
//! them once per grid point.
//!
//! Shipped estimators:
//! - [`SdAboutHypothesis`]: standard deviation of the observations about the
//!   hypothesised mean (rather than about the sample mean).
//! - Any closure `Fn(&Observations, f64) -> LikResult<f64>`.
use crate::likelihood::{
    data::Observations,
    errors::{LikError, LikResult},
};

/// Pluggable closed-form estimator for a nuisance parameter.
pub trait NuisanceEstimator: Send + Sync {
    /// Nuisance value that best fits `observations` when the parameter of
    /// interest equals `hypothesis`.
    fn estimate(&self, observations: &Observations, hypothesis: f64) -> LikResult<f64>;
}

impl<F> NuisanceEstimator for F
where
    F: Fn(&Observations, f64) -> LikResult<f64> + Send + Sync,
{
    fn estimate(&self, observations: &Observations, hypothesis: f64) -> LikResult<f64> {
        self(observations, hypothesis)
    }
}

/// Divisor applied to the sum of squared deviations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Denominator {
    /// `n − 1`, the usual sample-variance divisor.
    #[default]
    NMinusOne,
    /// `n`, the maximum-likelihood divisor: the per-point maximizer of the
    /// normal likelihood in `σ`.
    N,
}

/// `SdAboutHypothesis` — standard deviation about a fixed hypothesised mean.
///
/// Computes `sqrt(Σ (xᵢ − μ)² / d)` with `d = n − 1` or `d = n` per
/// [`Denominator`].
///
/// Errors
/// ------
/// - `LikError::Domain` if the divisor is zero (a single observation with
///   `Denominator::NMinusOne`) or every observation equals `μ`, so the
///   estimate is zero and the normal density degenerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SdAboutHypothesis {
    pub denominator: Denominator,
}

impl SdAboutHypothesis {
    pub const fn new(denominator: Denominator) -> Self {
        SdAboutHypothesis { denominator }
    }

    /// Maximum-likelihood variant (`/ n`).
    pub const fn mle() -> Self {
        SdAboutHypothesis { denominator: Denominator::N }
    }
}

impl NuisanceEstimator for SdAboutHypothesis {
    fn estimate(&self, observations: &Observations, hypothesis: f64) -> LikResult<f64> {
        let n = observations.len();
        let divisor = match self.denominator {
            Denominator::NMinusOne => n.saturating_sub(1),
            Denominator::N => n,
        };
        if divisor == 0 {
            return Err(LikError::Domain {
                family: "Normal",
                parameter: "observations",
                value: n as f64,
                reason: "the n - 1 divisor needs at least two observations",
            });
        }
        let ss: f64 = observations.iter().map(|x| (x - hypothesis).powi(2)).sum();
        let sd = (ss / divisor as f64).sqrt();
        if sd > 0.0 && sd.is_finite() {
            Ok(sd)
        } else {
            Err(LikError::Domain {
                family: "Normal",
                parameter: "nuisance",
                value: sd,
                reason: "profiled standard deviation must be finite and > 0",
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Both divisors reproduce the closed-form standard deviation about a
    // fixed mean.
    //
    // Given
    // -----
    // - Observations [1, 2, 3, 4] and hypothesised mean 2.
    //
    // Expect
    // ------
    // - Σ(x − 2)² = 6; sqrt(6/3) and sqrt(6/4).
    fn sd_about_hypothesis_matches_closed_form() {
        // Arrange
        let obs = Observations::from_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap();

        // Act
        let sample = SdAboutHypothesis::default().estimate(&obs, 2.0).unwrap();
        let mle = SdAboutHypothesis::mle().estimate(&obs, 2.0).unwrap();

        // Assert
        assert_relative_eq!(sample, 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(mle, 1.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Degenerate inputs are reported as domain errors instead of a zero
    // or NaN estimate.
    //
    // Given
    // -----
    // - A single observation with the n − 1 divisor.
    // - Observations all equal to the hypothesis.
    //
    // Expect
    // ------
    // - Domain errors in both cases.
    fn degenerate_estimates_are_errors() {
        // Arrange
        let single = Observations::from_slice(&[1.0]).unwrap();
        let constant = Observations::from_slice(&[3.0, 3.0, 3.0]).unwrap();

        // Act
        let a = SdAboutHypothesis::default().estimate(&single, 0.0);
        let b = SdAboutHypothesis::mle().estimate(&constant, 3.0);

        // Assert
        assert!(a.unwrap_err().is_domain_error());
        assert!(b.unwrap_err().is_domain_error());
    }

    #[test]
    // Purpose
    // -------
    // Closures satisfy the estimator capability.
    //
    // Given
    // -----
    // - A closure returning the mean absolute deviation about μ.
    //
    // Expect
    // ------
    // - The closure result is returned unchanged.
    fn closures_are_estimators() {
        // Arrange
        let mad = |obs: &Observations, mu: f64| -> LikResult<f64> {
            Ok(obs.iter().map(|x| (x - mu).abs()).sum::<f64>() / obs.len() as f64)
        };
        let obs = Observations::from_slice(&[0.0, 2.0]).unwrap();

        // Act
        let value = mad.estimate(&obs, 1.0).unwrap();

        // Assert
        assert_eq!(value, 1.0);
    }
}
