//! Python bindings for sample-rate inference and region selection

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::signal::{self, RegionOfInterest};

/// Region from optional bounds: both or neither
pub(super) fn region_from_bounds(
    x1: Option<f64>,
    x2: Option<f64>,
) -> PyResult<Option<RegionOfInterest>> {
    match (x1, x2) {
        (Some(x1), Some(x2)) => Ok(Some(RegionOfInterest::new(x1, x2)?)),
        (None, None) => Ok(None),
        _ => Err(PyValueError::new_err("region needs both x1 and x2")),
    }
}

/// Estimate the sample rate of a time axis
///
/// Args:
///     t: Strictly increasing time axis as numpy array
///
/// Returns:
///     Median of the per-step rates 1/(t[i+1] - t[i])
#[pyfunction]
pub fn estimate_sample_rate(t: PyReadonlyArray1<f64>) -> PyResult<f64> {
    Ok(signal::estimate_sample_rate(t.as_slice()?)?)
}

/// Keep the samples with x1 <= t <= x2
///
/// Args:
///     t: Time axis as numpy array
///     y: Values as numpy array
///     x1: Lower bound (inclusive), or None for no region
///     x2: Upper bound (inclusive), or None for no region
///
/// Returns:
///     Tuple of (t, y) numpy arrays
#[pyfunction]
#[pyo3(signature = (t, y, x1=None, x2=None))]
pub fn select_region<'py>(
    py: Python<'py>,
    t: PyReadonlyArray1<f64>,
    y: PyReadonlyArray1<f64>,
    x1: Option<f64>,
    x2: Option<f64>,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let t = t.as_slice()?;
    let y = y.as_slice()?;
    if t.len() != y.len() {
        return Err(PyValueError::new_err(format!(
            "t has {} samples but y has {}",
            t.len(),
            y.len()
        )));
    }

    let region = region_from_bounds(x1, x2)?;
    let selected = signal::select_region(t, y, region.as_ref());

    Ok((
        PyArray1::from_vec(py, selected.t.into_owned()),
        PyArray1::from_vec(py, selected.y.into_owned()),
    ))
}
