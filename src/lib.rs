//! likelihood_surface — likelihood surfaces, ratios and intervals, with
//! optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes grid likelihood scans to Python via the `_likelihood_surface`
//! extension module. When the `python-bindings` feature is enabled, this
//! module defines the Python-facing class and scan functions used by the
//! `likelihood_surface` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`likelihood` and
//!   `numerical_stability`) as the public crate surface.
//! - Define a `#[pyclass]` wrapper around
//!   [`LikelihoodScan`](crate::likelihood::scan::LikelihoodScan) and one
//!   `#[pyfunction]` per shipped density family.
//! - Create and register the `likelihood` Python submodule under
//!   `likelihood_surface` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue and error mapping.
//! - Errors from core Rust code are carried as `LikError` internally and
//!   converted to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on
//!   [`likelihood::prelude`](crate::likelihood::prelude) and can ignore the
//!   PyO3 items guarded by the `python-bindings` feature.
//! - Python plotting and reporting code consumes the `grid`, `likelihood`
//!   and ratio vectors exposed by `LikelihoodScan`.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by `tests/integration_likelihood_pipeline.rs`.

pub mod likelihood;
pub mod numerical_stability;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    likelihood::{
        families::{Bernoulli, Binomial, Normal, Poisson},
        nuisance::{Denominator, SdAboutHypothesis},
        scan::LikelihoodScan,
    },
    utils::{build_surface, extract_reference, extract_threshold},
};

/// LikelihoodScan — Python-facing wrapper for an evaluated likelihood
/// surface.
///
/// Purpose
/// -------
/// Give Python callers read access to a [`LikelihoodScan`] and the derived
/// quantities (MLE, ratios, intervals) without re-implementing any of the
/// log-space arithmetic in Python.
///
/// Key behaviors
/// -------------
/// - Expose the grid, likelihood, log-likelihood and nuisance vectors as
///   copy-on-access properties.
/// - Forward ratio and interval queries to the Rust scan; a `reference` of
///   `None` means the maximum-likelihood point.
///
/// Parameters
/// ----------
/// Instances are constructed by `bernoulli_scan`, `binomial_scan`,
/// `normal_scan` and `poisson_scan`; they are not created directly by user
/// code.
///
/// Fields
/// ------
/// - `inner`: [`LikelihoodScan`]
///   Rust-side evaluation result.
///
/// Notes
/// -----
/// - Rust callers should use [`LikelihoodScan`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "likelihood_surface.likelihood", name = "LikelihoodScan")]
pub struct PyLikelihoodScan {
    pub inner: LikelihoodScan,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyLikelihoodScan {
    #[getter]
    pub fn family(&self) -> &'static str {
        self.inner.family()
    }

    #[getter]
    pub fn grid(&self) -> Vec<f64> {
        self.inner.grid().values().to_vec()
    }

    #[getter]
    pub fn likelihood(&self) -> Vec<f64> {
        self.inner.likelihood().to_vec()
    }

    #[getter]
    pub fn log_likelihood(&self) -> Vec<f64> {
        self.inner.log_likelihood().to_vec()
    }

    #[getter]
    pub fn nuisance(&self) -> Vec<Option<f64>> {
        self.inner.nuisance().to_vec()
    }

    /// Number of grid points whose linear likelihood underflowed to zero.
    #[getter]
    pub fn underflow_count(&self) -> usize {
        self.inner.underflow_count()
    }

    /// `(hypothesis, log_likelihood)` at the first maximum.
    #[getter]
    pub fn mle(&self) -> (f64, f64) {
        let mle = self.inner.max_likelihood_estimate();
        (mle.hypothesis, mle.log_likelihood)
    }

    #[pyo3(signature = (reference = None))]
    pub fn likelihood_ratios(&self, reference: Option<f64>) -> PyResult<Vec<f64>> {
        Ok(self.inner.likelihood_ratios(extract_reference(reference))?.to_vec())
    }

    #[pyo3(signature = (reference = None))]
    pub fn log_likelihood_ratios(&self, reference: Option<f64>) -> PyResult<Vec<f64>> {
        Ok(self.inner.log_likelihood_ratios(extract_reference(reference))?.to_vec())
    }

    pub fn likelihood_ratio(&self, a: f64, b: f64) -> PyResult<f64> {
        Ok(self.inner.likelihood_ratio(a, b)?)
    }

    pub fn relative_likelihoods(&self) -> PyResult<Vec<f64>> {
        Ok(self.inner.relative_likelihoods()?.to_vec())
    }

    /// Interval segments `[(lower, upper), ...]`; more than one segment
    /// means the supported set is not contiguous.
    #[pyo3(signature = (threshold = None))]
    pub fn likelihood_interval(
        &self, threshold: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<Vec<(f64, f64)>> {
        let threshold = match threshold {
            Some(raw) => extract_threshold(raw)?,
            None => crate::likelihood::options::LikelihoodThreshold::ONE_EIGHTH,
        };
        Ok(self.inner.interval_at(threshold)?.segments())
    }

    pub fn __len__(&self) -> usize {
        self.inner.len()
    }

    pub fn __repr__(&self) -> String {
        format!(
            "LikelihoodScan(family={}, points={}, {})",
            self.inner.family(),
            self.inner.len(),
            self.inner.max_likelihood_estimate()
        )
    }
}

/// Bernoulli likelihood scan over success probabilities.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (data, grid, parallel = false))]
pub fn bernoulli_scan<'py>(
    data: &Bound<'py, PyAny>, grid: &Bound<'py, PyAny>, parallel: bool,
) -> PyResult<PyLikelihoodScan> {
    let surface = build_surface(Bernoulli, data, grid, parallel)?;
    Ok(PyLikelihoodScan { inner: surface.evaluate(None)? })
}

/// Binomial likelihood scan; `data` holds success counts out of `trials`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (data, grid, trials, parallel = false))]
pub fn binomial_scan<'py>(
    data: &Bound<'py, PyAny>, grid: &Bound<'py, PyAny>, trials: u64, parallel: bool,
) -> PyResult<PyLikelihoodScan> {
    let surface = build_surface(Binomial::new(trials)?, data, grid, parallel)?;
    Ok(PyLikelihoodScan { inner: surface.evaluate(None)? })
}

/// Normal likelihood scan over the mean.
///
/// With `profile=True` the standard deviation is re-estimated about every
/// grid mean (divisor `n - 1`, or `n` when `mle_sd=True`); otherwise `sd`
/// is required.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (data, grid, sd = None, profile = false, mle_sd = false, parallel = false))]
pub fn normal_scan<'py>(
    data: &Bound<'py, PyAny>, grid: &Bound<'py, PyAny>, sd: Option<f64>,
    profile: bool, mle_sd: bool, parallel: bool,
) -> PyResult<PyLikelihoodScan> {
    let surface = build_surface(Normal::unknown_sd(), data, grid, parallel)?;
    let scan = if profile {
        let denominator = if mle_sd { Denominator::N } else { Denominator::NMinusOne };
        surface.evaluate_profiled(&SdAboutHypothesis::new(denominator))?
    } else {
        surface.evaluate(sd)?
    };
    Ok(PyLikelihoodScan { inner: scan })
}

/// Poisson likelihood scan over the rate.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (data, grid, parallel = false))]
pub fn poisson_scan<'py>(
    data: &Bound<'py, PyAny>, grid: &Bound<'py, PyAny>, parallel: bool,
) -> PyResult<PyLikelihoodScan> {
    let surface = build_surface(Poisson, data, grid, parallel)?;
    Ok(PyLikelihoodScan { inner: surface.evaluate(None)? })
}

/// _likelihood_surface — PyO3 module initializer for the Python extension.
///
/// Creates the `likelihood` submodule, attaches it to the parent module and
/// registers it in `sys.modules` so it is importable via a dotted path.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _likelihood_surface<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let likelihood_mod = PyModule::new(_py, "likelihood")?;
    likelihood(_py, m, &likelihood_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("likelihood_surface.likelihood", likelihood_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn likelihood<'py>(
    _py: Python, likelihood_surface: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyLikelihoodScan>()?;
    m.add_function(wrap_pyfunction!(bernoulli_scan, m)?)?;
    m.add_function(wrap_pyfunction!(binomial_scan, m)?)?;
    m.add_function(wrap_pyfunction!(normal_scan, m)?)?;
    m.add_function(wrap_pyfunction!(poisson_scan, m)?)?;
    likelihood_surface.add_submodule(m)?;
    Ok(())
}
