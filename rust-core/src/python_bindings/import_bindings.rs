//! Python binding for CSV channel import

use std::path::PathBuf;

use numpy::PyArray1;
use pyo3::prelude::*;

use crate::import::{self, ColumnMapping, TableOptions};

type ChannelTuple<'py> = (String, &'py PyArray1<f64>, &'py PyArray1<f64>);

/// Load channels from a CSV file
///
/// Args:
///     path: CSV file path
///     columns: List of (x_column, y_column) index pairs
///     has_header: First row holds column names
///     has_index_column: First column is a row index
///
/// Returns:
///     List of (label, t, y) tuples, ready for analyze()
#[pyfunction]
#[pyo3(signature = (path, columns, has_header=true, has_index_column=false))]
pub fn load_csv(
    py: Python<'_>,
    path: PathBuf,
    columns: Vec<(usize, usize)>,
    has_header: bool,
    has_index_column: bool,
) -> PyResult<Vec<ChannelTuple<'_>>> {
    let options = TableOptions {
        has_header,
        has_index_column,
    };
    let table = import::load_csv(&path, &options)?;

    let mappings: Vec<ColumnMapping> = columns
        .into_iter()
        .map(|(x, y)| ColumnMapping::new(x, y))
        .collect();
    let set = table.channels(&mappings)?;

    Ok(set
        .iter()
        .map(|ch| {
            (
                ch.label().to_string(),
                PyArray1::from_slice(py, ch.t()),
                PyArray1::from_slice(py, ch.y()),
            )
        })
        .collect())
}
