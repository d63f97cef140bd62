//! Python bindings for the PSD estimators

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use crate::spectrum::{
    self, CovarianceConfig, PostProcessConfig, PsdEstimate, WelchConfig, WindowType,
    LOW_FREQUENCY_BINS,
};

type SpectrumArrays<'py> = (&'py PyArray1<f64>, &'py PyArray1<f64>);

fn to_numpy(py: Python<'_>, estimate: PsdEstimate) -> SpectrumArrays<'_> {
    (
        PyArray1::from_vec(py, estimate.frequencies),
        PyArray1::from_vec(py, estimate.power),
    )
}

/// Welch PSD estimate
///
/// Args:
///     y: Signal as numpy array
///     fs: Sample rate in Hz
///     window: rectangular (boxcar), bartlett, hamming or taylor
///     nperseg: Segment length, clamped to len(y)
///
/// Returns:
///     Tuple of (frequencies, power density)
#[pyfunction]
#[pyo3(signature = (y, fs, window="rectangular", nperseg=2048))]
pub fn welch<'py>(
    py: Python<'py>,
    y: PyReadonlyArray1<f64>,
    fs: f64,
    window: &str,
    nperseg: usize,
) -> PyResult<SpectrumArrays<'py>> {
    let config = WelchConfig::new(window.parse::<WindowType>()?, nperseg);
    let estimate = spectrum::welch(y.as_slice()?, fs, &config)?;
    Ok(to_numpy(py, estimate))
}

/// Covariance-method AR PSD estimate
///
/// Args:
///     y: Signal as numpy array
///     fs: Sample rate in Hz
///     order: AR model order
///     nfft: Transform length, clamped to len(y)
///
/// Returns:
///     Tuple of (frequencies, power density)
#[pyfunction]
#[pyo3(signature = (y, fs, order=48, nfft=2048))]
pub fn pcovar<'py>(
    py: Python<'py>,
    y: PyReadonlyArray1<f64>,
    fs: f64,
    order: usize,
    nfft: usize,
) -> PyResult<SpectrumArrays<'py>> {
    let config = CovarianceConfig::new(order, nfft);
    let estimate = spectrum::pcovar(y.as_slice()?, fs, &config)?;
    Ok(to_numpy(py, estimate))
}

/// Drop the lowest bins and scale the rest to a peak of 1.0
///
/// Args:
///     f: Frequencies as numpy array
///     pxx: Power values as numpy array
///     skip_bins: Number of low-frequency bins to drop
///
/// Returns:
///     Tuple of (frequencies, normalised power)
#[pyfunction]
#[pyo3(signature = (f, pxx, skip_bins=LOW_FREQUENCY_BINS))]
pub fn normalize<'py>(
    py: Python<'py>,
    f: PyReadonlyArray1<f64>,
    pxx: PyReadonlyArray1<f64>,
    skip_bins: usize,
) -> PyResult<SpectrumArrays<'py>> {
    let estimate = PsdEstimate::new(f.as_slice()?.to_vec(), pxx.as_slice()?.to_vec())?;
    let config = PostProcessConfig::default().with_skip_bins(skip_bins);
    Ok(to_numpy(py, spectrum::normalize(estimate, &config)?))
}
