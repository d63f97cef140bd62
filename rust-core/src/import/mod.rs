//! Channel import from tabular files
//!
//! Architecture:
//! ```text
//!   .csv file / reader
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Table    │  header + text cells (optional index column dropped)
//!   └──────────┘
//!        │  [ColumnMapping { x, y }, ...]
//!        ▼
//!   ┌────────────┐
//!   │ ChannelSet  │  one Channel per mapping, labelled by its y column
//!   └────────────┘
//! ```

pub mod table;

pub use table::{load_csv, ColumnMapping, Table, TableOptions};

use thiserror::Error;

use crate::error::AnalysisError;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column {index} out of range (table has {available} columns)")]
    ColumnOutOfRange { index: usize, available: usize },

    #[error("Row {row}, column '{column}': '{value}' is not a number")]
    NotNumeric {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Column '{column}' has no data")]
    NoData { column: String },

    #[error("Time column '{column}' is not strictly increasing at row {row}")]
    NotIncreasing { column: String, row: usize },

    #[error(transparent)]
    Channel(#[from] AnalysisError),
}
