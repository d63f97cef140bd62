//! Python binding for a full analysis pass

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::analysis::{AnalysisPipeline, MethodSet};
use crate::signal::{Channel, ChannelSet, RegionOfInterest};
use crate::spectrum::{CovarianceConfig, WelchConfig, WindowType};

fn dict_value<'a, T: FromPyObject<'a>>(dict: &'a PyDict, key: &str) -> PyResult<Option<T>> {
    match dict.get_item(key)? {
        Some(value) => Ok(Some(value.extract()?)),
        None => Ok(None),
    }
}

fn welch_config(dict: &PyDict) -> PyResult<WelchConfig> {
    let mut config = WelchConfig::default();
    if let Some(window) = dict_value::<&str>(dict, "window")? {
        config.window = window.parse::<WindowType>()?;
    }
    if let Some(nperseg) = dict_value(dict, "nperseg")? {
        config.nperseg = nperseg;
    }
    Ok(config)
}

fn covariance_config(dict: &PyDict) -> PyResult<CovarianceConfig> {
    let mut config = CovarianceConfig::default();
    if let Some(order) = dict_value(dict, "order")? {
        config.order = order;
    }
    if let Some(nfft) = dict_value(dict, "nfft")? {
        config.nfft = nfft;
    }
    Ok(config)
}

/// Run every enabled method over every channel
///
/// Args:
///     channels: List of (label, t, y) tuples
///     roi: (x1, x2) tuple, or None to use all samples
///     welch: Dict {window, nperseg}, or None to disable Welch
///     pcovar: Dict {order, nfft}, or None to disable pcovar
///
/// Returns:
///     Dict with "spectra" and "failures" lists, in channel order with
///     Welch before pcovar (both empty when no method is enabled)
#[pyfunction]
#[pyo3(signature = (channels, roi=None, welch=None, pcovar=None))]
pub fn analyze<'py>(
    py: Python<'py>,
    channels: Vec<(String, PyReadonlyArray1<f64>, PyReadonlyArray1<f64>)>,
    roi: Option<(f64, f64)>,
    welch: Option<&PyDict>,
    pcovar: Option<&PyDict>,
) -> PyResult<&'py PyDict> {
    let mut set = ChannelSet::default();
    for (label, t, y) in channels {
        set.push(Channel::new(label, t.as_slice()?.to_vec(), y.as_slice()?.to_vec())?);
    }

    let region = roi
        .map(|(x1, x2)| RegionOfInterest::new(x1, x2))
        .transpose()?;

    let mut methods = MethodSet::new();
    if let Some(dict) = welch {
        methods = methods.with_welch(welch_config(dict)?);
    }
    if let Some(dict) = pcovar {
        methods = methods.with_covariance(covariance_config(dict)?);
    }
    let pipeline = AnalysisPipeline::new(methods)?;
    let report = py.allow_threads(|| pipeline.run(&set, region.as_ref()));

    let spectra = PyList::empty(py);
    for spectrum in &report.spectra {
        let entry = PyDict::new(py);
        entry.set_item("label", &spectrum.label)?;
        entry.set_item("method", spectrum.method.tag())?;
        entry.set_item("display_name", spectrum.display_name())?;
        entry.set_item("channel_index", spectrum.channel_index)?;
        entry.set_item("frequencies", PyArray1::from_slice(py, &spectrum.frequencies))?;
        entry.set_item("power", PyArray1::from_slice(py, &spectrum.power))?;
        spectra.append(entry)?;
    }

    let failures = PyList::empty(py);
    for failure in &report.failures {
        let entry = PyDict::new(py);
        entry.set_item("channel_index", failure.channel_index)?;
        entry.set_item("label", &failure.channel_label)?;
        entry.set_item("method", failure.method.tag())?;
        entry.set_item("kind", failure.error.kind())?;
        entry.set_item("message", failure.error.to_string())?;
        failures.append(entry)?;
    }

    let result = PyDict::new(py);
    result.set_item("spectra", spectra)?;
    result.set_item("failures", failures)?;
    Ok(result)
}
