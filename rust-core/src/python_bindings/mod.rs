//! PyO3 bindings for Python integration

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::error::AnalysisError;
use crate::import::ImportError;

mod signal_bindings;
mod spectrum_bindings;
mod analysis_bindings;
mod import_bindings;

impl From<AnalysisError> for PyErr {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidConfig(_) => PyValueError::new_err(err.to_string()),
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

impl From<ImportError> for PyErr {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Channel(inner) => inner.into(),
            ImportError::Csv(_) => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Python module definition
#[pymodule]
fn psdlab(_py: Python, m: &PyModule) -> PyResult<()> {
    // RUST_LOG controls extension logging; a host that already set a logger wins
    let _ = env_logger::try_init();

    m.add_function(wrap_pyfunction!(signal_bindings::estimate_sample_rate, m)?)?;
    m.add_function(wrap_pyfunction!(signal_bindings::select_region, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::welch, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::pcovar, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::normalize, m)?)?;
    m.add_function(wrap_pyfunction!(analysis_bindings::analyze, m)?)?;
    m.add_function(wrap_pyfunction!(import_bindings::load_csv, m)?)?;

    m.add("SEGMENT_LENGTHS", crate::spectrum::SEGMENT_LENGTHS.to_vec())?;
    m.add(
        "WINDOW_TYPES",
        crate::spectrum::WindowType::ALL
            .iter()
            .map(|w| w.name())
            .collect::<Vec<_>>(),
    )?;

    Ok(())
}
