//! PyO3 conversion helpers shared by the Python-facing wrappers in `lib.rs`.
#[cfg(feature = "python-bindings")]
use std::str::FromStr;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::likelihood::{
    data::{HypothesisGrid, Observations},
    families::DensityFamily,
    options::{LikelihoodThreshold, SurfaceOptions},
    scan::Reference,
    surface::LikelihoodSurface,
};

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray1;

/// Copy a Python array-like into a `Vec<f64>`.
///
/// Accepts a float64 ndarray (contiguous or strided), anything exposing
/// `to_numpy()` such as a pandas Series, or a plain sequence of floats.
/// `what` names the argument in the error message.
#[cfg(feature = "python-bindings")]
fn extract_f64_vec(raw: &Bound<'_, PyAny>, what: &str) -> PyResult<Vec<f64>> {
    fn from_array(obj: &Bound<'_, PyAny>) -> Option<Vec<f64>> {
        let arr = obj.extract::<PyReadonlyArray1<f64>>().ok()?;
        Some(arr.as_array().to_vec())
    }
    if let Some(values) = from_array(raw) {
        return Ok(values);
    }
    if let Some(values) = raw.call_method0("to_numpy").ok().as_ref().and_then(from_array) {
        return Ok(values);
    }
    raw.extract::<Vec<f64>>().map_err(|_| {
        PyTypeError::new_err(format!(
            "{what} must be a 1-D float64 numpy.ndarray, pandas.Series, or sequence of floats"
        ))
    })
}

/// Build a validated surface from Python data and grid array-likes.
#[cfg(feature = "python-bindings")]
pub fn build_surface<F: DensityFamily>(
    family: F, data: &Bound<'_, PyAny>, grid: &Bound<'_, PyAny>, parallel: bool,
) -> PyResult<LikelihoodSurface<F>> {
    let observations = Observations::from_slice(&extract_f64_vec(data, "data")?)?;
    let grid = HypothesisGrid::from_slice(&extract_f64_vec(grid, "grid")?)?;
    let options = SurfaceOptions::new(parallel, true);
    Ok(LikelihoodSurface::new(family, observations, grid, options)?)
}

/// Accept either a number or a preset/fraction string such as `"1/8"` or
/// `"one_thirty_second"`.
#[cfg(feature = "python-bindings")]
pub fn extract_threshold(raw: &Bound<'_, PyAny>) -> PyResult<LikelihoodThreshold> {
    if let Ok(value) = raw.extract::<f64>() {
        return Ok(LikelihoodThreshold::new(value)?);
    }
    let text: String = raw.extract().map_err(|_| {
        PyTypeError::new_err("threshold must be a float or a string such as '1/8'")
    })?;
    Ok(LikelihoodThreshold::from_str(&text)?)
}

/// `None` selects the maximum-likelihood point; a float selects the grid
/// point it matches.
#[cfg(feature = "python-bindings")]
pub fn extract_reference(reference: Option<f64>) -> Reference {
    match reference {
        Some(h) => Reference::Hypothesis(h),
        None => Reference::Mle,
    }
}
