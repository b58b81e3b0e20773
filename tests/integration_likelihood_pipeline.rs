//! Integration tests for likelihood surfaces, ratios and intervals.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline: from raw observations and a grid,
//!   through surface construction and evaluation, to maximum-likelihood
//!   estimates, likelihood ratios and likelihood intervals.
//! - Pin the worked examples (five successes in six trials, a fine MLE
//!   grid, empty inputs, large-sample underflow) to their closed-form values.
//!
//! Coverage
//! --------
//! - `likelihood::surface`:
//!   - Construction from slices, steps and linspaces; fixed and profiled
//!     nuisance evaluation; parallel evaluation.
//! - `likelihood::scan`:
//!   - MLE, linear and log ratios, reference resolution, intervals,
//!     relative likelihoods, plot series.
//! - `likelihood::families`:
//!   - Bernoulli/Binomial agreement, Poisson, Normal, and closure-defined
//!     families.
//! - `likelihood::options`:
//!   - Threshold presets and string parsing.
//!
//! Exclusions
//! ----------
//! - Guard-by-guard validation and log-space helpers; these are covered by
//!   unit tests.
//! - Python bindings, which are exercised from the Python package.
use approx::assert_relative_eq;
use likelihood_surface::likelihood::{
    LikError, Reference,
    data::{HypothesisGrid, Observations},
    families::{Bernoulli, Binomial, FnFamily, Normal, Poisson},
    nuisance::SdAboutHypothesis,
    options::{LikelihoodThreshold, SurfaceOptions},
    surface::LikelihoodSurface,
};

/// Purpose
/// -------
/// Five successes out of six Bernoulli trials on an arbitrary grid.
fn five_of_six(grid: HypothesisGrid) -> LikelihoodSurface<Bernoulli> {
    let obs = Observations::from_successes(5, 6).unwrap();
    LikelihoodSurface::new(Bernoulli, obs, grid, SurfaceOptions::default()).unwrap()
}

/// Purpose
/// -------
/// Deterministic, roughly centred normal-looking sample of length `n`.
///
/// Returns
/// -------
/// - `x_i = 0.5 · sin(i + 1)` for `i = 0,…,n−1`: bounded in [−0.5, 0.5]
///   with mean close to zero.
fn centred_sample(n: usize) -> Vec<f64> {
    (0..n).map(|i| 0.5 * ((i + 1) as f64).sin()).collect()
}

#[test]
// Purpose
// -------
// Five successes in six trials: ratios between three candidate
// probabilities match the closed form p⁵(1 − p).
//
// Given
// -----
// - Bernoulli family, grid {0.5, 0.8, 0.9}.
//
// Expect
// ------
// - L(0.8)/L(0.5) = 0.8⁵·0.2 / 0.5⁶ = 4.194304.
// - L(0.8)/L(0.9) = 0.8⁵·0.2 / (0.9⁵·0.1) ≈ 1.1099, inside [0.9, 1.2].
// - Reciprocity and reflexivity hold.
fn bernoulli_ratios_for_five_of_six() {
    // Arrange
    let surface = five_of_six(HypothesisGrid::from_slice(&[0.5, 0.8, 0.9]).unwrap());
    let l = |p: f64| p.powi(5) * (1.0 - p);

    // Act
    let scan = surface.evaluate(None).unwrap();
    let r_08_05 = scan.likelihood_ratio(0.8, 0.5).unwrap();
    let r_08_09 = scan.likelihood_ratio(0.8, 0.9).unwrap();

    // Assert
    assert_relative_eq!(r_08_05, l(0.8) / l(0.5), max_relative = 1e-12);
    assert_relative_eq!(r_08_05, 4.194304, max_relative = 1e-9);
    assert_relative_eq!(r_08_09, l(0.8) / l(0.9), max_relative = 1e-12);
    assert!((0.9..=1.2).contains(&r_08_09));
    assert_relative_eq!(
        scan.likelihood_ratio(0.5, 0.8).unwrap(),
        1.0 / r_08_05,
        max_relative = 1e-12
    );
    assert_eq!(scan.likelihood_ratio(0.9, 0.9).unwrap(), 1.0);
    for (&l_lin, &ll) in scan.likelihood().iter().zip(scan.log_likelihood().iter()) {
        assert_relative_eq!(ll.exp(), l_lin, max_relative = 1e-12);
    }
}

#[test]
// Purpose
// -------
// The maximum-likelihood estimate on a fine grid is the grid point nearest
// the closed-form 5/6, in both sequential and parallel evaluation.
//
// Given
// -----
// - Bernoulli, grid 0, 0.001, …, 1 (1001 points).
//
// Expect
// ------
// - MLE = 0.833 (within 1e-9), no ties, identical parallel result.
// - Ratios against the MLE are ≤ 1 everywhere and equal 1 at the MLE.
fn fine_grid_mle_is_five_sixths() {
    // Arrange
    let surface = five_of_six(HypothesisGrid::from_step(0.0, 1.0, 0.001).unwrap());
    let parallel = surface.clone().with_options(SurfaceOptions::parallel());

    // Act
    let scan = surface.evaluate(None).unwrap();
    let mle = scan.max_likelihood_estimate();
    let ratios = scan.likelihood_ratios(Reference::Mle).unwrap();

    // Assert
    assert_eq!(scan.len(), 1001);
    assert!((mle.hypothesis - 0.833).abs() < 1e-9);
    assert!((mle.hypothesis - 5.0 / 6.0).abs() <= 0.001);
    assert!(!mle.is_tied());
    assert_eq!(ratios[mle.index], 1.0);
    assert!(ratios.iter().all(|&r| (0.0..=1.0).contains(&r)));
    assert_eq!(parallel.evaluate(None).unwrap(), scan);
}

#[test]
// Purpose
// -------
// Empty observations or an empty grid fail at the first operation with
// `EmptyInput` rather than yielding a degenerate surface.
//
// Given
// -----
// - Every construction path with an empty input.
//
// Expect
// ------
// - `EmptyInput` in each case.
fn empty_inputs_fail_everywhere() {
    // Act & Assert
    let empty = |e: LikError| matches!(e, LikError::EmptyInput { .. });
    assert!(empty(LikelihoodSurface::from_slices(Bernoulli, &[], &[0.5]).unwrap_err()));
    assert!(empty(LikelihoodSurface::from_slices(Bernoulli, &[1.0], &[]).unwrap_err()));
    assert!(empty(LikelihoodSurface::from_slices(Poisson, &[], &[]).unwrap_err()));
    assert!(empty(Observations::from_successes(0, 0).unwrap_err()));
    assert!(empty(Observations::from_slice(&[]).unwrap_err()));
    assert!(empty(HypothesisGrid::from_slice(&[]).unwrap_err()));
}

#[test]
// Purpose
// -------
// With 600 observations, the joint likelihood of a badly fitting mean
// underflows to exactly zero. Linear ratios against it are refused; log
// ratios stay finite.
//
// Given
// -----
// - 600 values in [−0.5, 0.5], Normal with sd = 1.
// - Grid {−0.5, 0, 0.5, 10}; μ = 10 lies ~10 sd from every observation.
//
// Expect
// ------
// - L(10) == 0 exactly while ℓ(10) is finite.
// - `likelihood_ratios` against μ = 10 → `ZeroReference { hypothesis: 10 }`.
// - `log_likelihood_ratios` against the MLE is finite and negative at μ = 10.
// - `log_likelihood_ratio(10, 0)` is finite and negative.
fn underflowed_reference_needs_log_space() {
    // Arrange
    let data = centred_sample(600);
    let surface = LikelihoodSurface::new(
        Normal::with_sd(1.0).unwrap(),
        Observations::from_slice(&data).unwrap(),
        HypothesisGrid::from_slice(&[-0.5, 0.0, 0.5, 10.0]).unwrap(),
        SurfaceOptions::default(),
    )
    .unwrap();

    // Act
    let scan = surface.evaluate(None).unwrap();
    let linear = scan.likelihood_ratios(Reference::Hypothesis(10.0));
    let logs = scan.log_likelihood_ratios(Reference::Mle).unwrap();
    let pairwise = scan.log_likelihood_ratio(10.0, 0.0).unwrap();

    // Assert
    assert_eq!(scan.likelihood()[3], 0.0);
    assert!(scan.log_likelihood()[3].is_finite());
    assert_eq!(scan.underflow_count(), 1);
    assert_eq!(linear, Err(LikError::ZeroReference { hypothesis: 10.0 }));
    assert!(logs[3].is_finite() && logs[3] < 0.0);
    assert!(pairwise.is_finite() && pairwise < 0.0);
    assert_eq!(scan.likelihood_ratio(0.0, 10.0), Err(LikError::ZeroReference { hypothesis: 10.0 }));
    assert_relative_eq!(
        surface.log_likelihood_ratio(10.0, 0.0, None).unwrap(),
        pairwise,
        max_relative = 1e-12
    );
}

#[test]
// Purpose
// -------
// Six Bernoulli trials with five successes and a single Binomial(6)
// observation of 5 produce the same ratios: their likelihoods differ by the
// constant C(6, 5).
//
// Given
// -----
// - Grid 0.05, 0.10, …, 0.95 for both families.
//
// Expect
// ------
// - Log-likelihoods differ by ln 6 at every grid point.
// - Likelihood ratios against the MLE agree; MLEs coincide.
fn binomial_matches_bernoulli_up_to_a_constant() {
    // Arrange
    let grid = HypothesisGrid::from_step(0.05, 0.95, 0.05).unwrap();
    let bernoulli = five_of_six(grid.clone());
    let binomial = LikelihoodSurface::new(
        Binomial::new(6).unwrap(),
        Observations::from_slice(&[5.0]).unwrap(),
        grid,
        SurfaceOptions::default(),
    )
    .unwrap();

    // Act
    let a = bernoulli.evaluate(None).unwrap();
    let b = binomial.evaluate(None).unwrap();

    // Assert
    for (la, lb) in a.log_likelihood().iter().zip(b.log_likelihood().iter()) {
        assert_relative_eq!(lb - la, 6.0_f64.ln(), epsilon = 1e-10);
    }
    let ra = a.likelihood_ratios(Reference::Mle).unwrap();
    let rb = b.likelihood_ratios(Reference::Mle).unwrap();
    for (x, y) in ra.iter().zip(rb.iter()) {
        assert_relative_eq!(x, y, max_relative = 1e-10);
    }
    assert_eq!(a.max_likelihood_estimate().index, b.max_likelihood_estimate().index);
}

#[test]
// Purpose
// -------
// Likelihood intervals at the 1/8 and 1/32 presets for five successes in
// six trials are contiguous, nested, and bracket the MLE.
//
// Given
// -----
// - Bernoulli, grid step 0.001 on [0, 1].
//
// Expect
// ------
// - 1/8 interval ≈ [0.4.., 0.99..]: lower in (0.4, 0.5), upper in
//   (0.98, 0.995), not touching either grid edge.
// - 1/32 interval strictly contains the 1/8 interval.
// - Every member's ratio to the MLE is ≥ 1/8.
fn preset_intervals_are_nested() {
    // Arrange
    let scan = five_of_six(HypothesisGrid::from_step(0.0, 1.0, 0.001).unwrap())
        .evaluate(None)
        .unwrap();

    // Act
    let eighth = scan.interval_at(LikelihoodThreshold::ONE_EIGHTH).unwrap();
    let thirty_second = scan.interval_at(LikelihoodThreshold::ONE_THIRTY_SECOND).unwrap();
    let ratios = scan.likelihood_ratios(Reference::Mle).unwrap();

    // Assert
    assert!(eighth.is_contiguous() && thirty_second.is_contiguous());
    let (lo8, hi8) = eighth.bounds().unwrap();
    let (lo32, hi32) = thirty_second.bounds().unwrap();
    assert!(lo8 > 0.4 && lo8 < 0.5, "lower 1/8 bound {lo8}");
    assert!(hi8 > 0.98 && hi8 < 0.995, "upper 1/8 bound {hi8}");
    assert!(lo32 < lo8 && hi32 > hi8);
    assert!(!eighth.touches_grid_edge());
    assert!(eighth.hypotheses().contains(&scan.max_likelihood_estimate().hypothesis));
    for &i in eighth.indices() {
        assert!(ratios[i] >= 0.125);
    }
    assert!(eighth.to_string().starts_with("1/8 likelihood interval: ["));
}

#[test]
// Purpose
// -------
// Thresholds parse from presets, fractions and decimals; invalid values are
// rejected before any interval is computed.
//
// Given
// -----
// - Strings "1/8", "one_thirty_second", "0.125", "1.5", "abc"; raw 0.0.
//
// Expect
// ------
// - Presets compare equal to the constants.
// - "1.5" and 0.0 → `InvalidThreshold`; "abc" → `UnparsableThreshold`.
fn thresholds_parse_and_validate() {
    // Arrange
    let scan = five_of_six(HypothesisGrid::from_slice(&[0.5, 0.8, 0.9]).unwrap())
        .evaluate(None)
        .unwrap();

    // Act & Assert
    assert_eq!("1/8".parse::<LikelihoodThreshold>().unwrap(), LikelihoodThreshold::ONE_EIGHTH);
    assert_eq!(
        "one_thirty_second".parse::<LikelihoodThreshold>().unwrap(),
        LikelihoodThreshold::ONE_THIRTY_SECOND
    );
    assert_eq!("0.125".parse::<LikelihoodThreshold>().unwrap(), LikelihoodThreshold::ONE_EIGHTH);
    assert_eq!(
        "1.5".parse::<LikelihoodThreshold>(),
        Err(LikError::InvalidThreshold { value: 1.5 })
    );
    assert!(matches!(
        "abc".parse::<LikelihoodThreshold>(),
        Err(LikError::UnparsableThreshold { .. })
    ));
    assert_eq!(scan.likelihood_interval(0.0), Err(LikError::InvalidThreshold { value: 0.0 }));
    assert_eq!(scan.likelihood_interval(1.0).unwrap().hypotheses(), &[0.8]);
}

#[test]
// Purpose
// -------
// References that are not grid points are rejected rather than silently
// snapped.
//
// Given
// -----
// - Grid {0.5, 0.8, 0.9}.
//
// Expect
// ------
// - `Hypothesis(0.55)` → `ReferenceNotOnGrid`.
// - `Index(3)` → `ReferenceIndexOutOfRange`.
// - `Index(1)` and `Hypothesis(0.8)` resolve to the same ratios.
fn off_grid_references_are_rejected() {
    // Arrange
    let scan = five_of_six(HypothesisGrid::from_slice(&[0.5, 0.8, 0.9]).unwrap())
        .evaluate(None)
        .unwrap();

    // Act & Assert
    assert_eq!(
        scan.likelihood_ratios(Reference::Hypothesis(0.55)),
        Err(LikError::ReferenceNotOnGrid { value: 0.55 })
    );
    assert_eq!(
        scan.log_likelihood_ratios(Reference::Index(3)),
        Err(LikError::ReferenceIndexOutOfRange { index: 3, len: 3 })
    );
    assert_eq!(
        scan.likelihood_ratios(Reference::Index(1)).unwrap(),
        scan.likelihood_ratios(Reference::Hypothesis(0.8)).unwrap()
    );
}

#[test]
// Purpose
// -------
// Poisson counts peak at the sample mean and yield plot series aligned with
// the grid.
//
// Given
// -----
// - Counts [2, 3, 1, 4, 0] (mean 2), grid 0.5, 1.0, …, 4.0.
//
// Expect
// ------
// - MLE λ = 2.
// - Series pairs line up with grid values; relative likelihood 1 at the MLE.
fn poisson_peaks_at_sample_mean() {
    // Arrange
    let surface = LikelihoodSurface::new(
        Poisson,
        Observations::from_slice(&[2.0, 3.0, 1.0, 4.0, 0.0]).unwrap(),
        HypothesisGrid::from_step(0.5, 4.0, 0.5).unwrap(),
        SurfaceOptions::default(),
    )
    .unwrap();

    // Act
    let scan = surface.evaluate(None).unwrap();
    let mle = scan.max_likelihood_estimate();
    let series = scan.likelihood_series();
    let relative = scan.relative_likelihoods().unwrap();

    // Assert
    assert_eq!(scan.len(), 8);
    assert_relative_eq!(mle.hypothesis, 2.0, epsilon = 1e-12);
    assert_eq!(relative[mle.index], 1.0);
    for ((h, l), &g) in series.iter().zip(scan.grid().values().iter()) {
        assert_eq!(*h, g);
        assert!(*l > 0.0);
    }
    assert!(matches!(
        LikelihoodSurface::from_slices(Poisson, &[1.5], &[1.0]),
        Err(LikError::Domain { .. })
    ));
}

#[test]
// Purpose
// -------
// Profiling the standard deviation out of a normal likelihood yields a
// profile peaked at the sample mean, with per-point nuisance values
// recorded.
//
// Given
// -----
// - Ten observations with mean 5.21, grid 4.00, 4.01, …, 6.50.
//
// Expect
// ------
// - Profile MLE at μ = 5.21 with nuisance equal to the sample sd.
// - Without a nuisance value and without profiling → `MissingParameter`.
fn profiled_normal_peaks_at_sample_mean() {
    // Arrange
    let data = [4.8, 5.6, 5.1, 4.2, 6.3, 5.0, 5.4, 4.6, 5.9, 5.2];
    let mean = data.iter().sum::<f64>() / data.len() as f64;
    let sample_sd =
        (data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (data.len() - 1) as f64).sqrt();
    let surface = LikelihoodSurface::new(
        Normal::unknown_sd(),
        Observations::from_slice(&data).unwrap(),
        HypothesisGrid::from_step(4.0, 6.5, 0.01).unwrap(),
        SurfaceOptions::default(),
    )
    .unwrap();

    // Act
    let profile = surface.evaluate_profiled(&SdAboutHypothesis::default()).unwrap();
    let mle = profile.max_likelihood_estimate();

    // Assert
    assert_relative_eq!(mle.hypothesis, 5.21, epsilon = 1e-9);
    assert_relative_eq!(mle.nuisance.unwrap(), sample_sd, max_relative = 1e-9);
    assert!(profile.nuisance().iter().all(|s| s.is_some_and(|v| v > 0.0)));
    assert!(matches!(surface.evaluate(None), Err(LikError::MissingParameter { .. })));
}

#[test]
// Purpose
// -------
// A closure-defined exponential family reproduces its closed-form MLE, and
// the native log-density path agrees with the `ln(density)` fallback.
//
// Given
// -----
// - Exponential density λ·e^(−λx); data [0.5, 1.0, 1.5, 2.0] (MLE 1/1.25).
// - Grid 0.1, 0.2, …, 2.0.
//
// Expect
// ------
// - MLE λ = 0.8.
// - Native and fallback log-likelihoods agree to 1e-12.
fn closure_family_reproduces_exponential_mle() {
    // Arrange
    let density = |x: f64, rate: f64, _: Option<f64>| -> Result<f64, LikError> {
        Ok(rate * (-rate * x).exp())
    };
    let native = FnFamily::new("Exponential", density)
        .with_ln_density(|x: f64, rate: f64, _: Option<f64>| Ok(rate.ln() - rate * x));
    let fallback = FnFamily::new("Exponential", density);
    let data = [0.5, 1.0, 1.5, 2.0];
    let grid = HypothesisGrid::from_step(0.1, 2.0, 0.1).unwrap();
    let obs = Observations::from_slice(&data).unwrap();

    // Act
    let a = LikelihoodSurface::new(native, obs.clone(), grid.clone(), SurfaceOptions::default())
        .unwrap()
        .evaluate(None)
        .unwrap();
    let b = LikelihoodSurface::new(fallback, obs, grid, SurfaceOptions::default())
        .unwrap()
        .evaluate(None)
        .unwrap();

    // Assert
    assert!((a.max_likelihood_estimate().hypothesis - 0.8).abs() < 1e-9);
    for (x, y) in a.log_likelihood().iter().zip(b.log_likelihood().iter()) {
        assert_relative_eq!(x, y, epsilon = 1e-12);
    }
}

#[test]
// Purpose
// -------
// A caller-supplied family whose density is infinite at some points makes
// evaluation fail with `Domain`, rather than producing a scan whose ratios
// and relative likelihoods are NaN and whose interval is empty.
//
// Given
// -----
// - A closure density that is +inf when x equals the hypothesis and
//   e^(−|x − h|) elsewhere; data [1, 2], grid [1, 2, 3].
// - The same shape expressed through a native log-density returning +inf.
//
// Expect
// ------
// - `evaluate` → `Domain` for both, in sequential and parallel mode.
fn infinite_closure_density_is_a_domain_error() {
    // Arrange
    let spike = |x: f64, h: f64, _: Option<f64>| -> Result<f64, LikError> {
        Ok(if x == h { f64::INFINITY } else { (-(x - h).abs()).exp() })
    };
    let linear = FnFamily::new("Spike", spike);
    let native = FnFamily::new("Spike", spike).with_ln_density(|x: f64, h: f64, _: Option<f64>| {
        Ok(if x == h { f64::INFINITY } else { -(x - h).abs() })
    });
    let obs = Observations::from_slice(&[1.0, 2.0]).unwrap();
    let grid = HypothesisGrid::from_slice(&[1.0, 2.0, 3.0]).unwrap();

    // Act
    let sequential =
        LikelihoodSurface::new(linear, obs.clone(), grid.clone(), SurfaceOptions::default())
            .unwrap()
            .evaluate(None);
    let parallel = LikelihoodSurface::new(native, obs, grid, SurfaceOptions::parallel())
        .unwrap()
        .evaluate(None);

    // Assert
    assert!(matches!(sequential, Err(LikError::Domain { family: "Spike", .. })));
    assert!(matches!(parallel, Err(LikError::Domain { family: "Spike", .. })));
}
