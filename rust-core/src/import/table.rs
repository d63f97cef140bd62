use std::io::Read;
use std::path::Path;

use log::info;

use super::ImportError;
use crate::signal::{Channel, ChannelSet};

/// Layout switches for a tabular source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// First row holds column names
    pub has_header: bool,

    /// First column is a row index, not data
    pub has_index_column: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            has_index_column: false,
        }
    }
}

/// One X/Y column pair selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub x: usize,
    pub y: usize,
}

impl ColumnMapping {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Parsed table: column names and row-major text cells
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Load a CSV file into a [`Table`]
pub fn load_csv(path: &Path, options: &TableOptions) -> Result<Table, ImportError> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    let table = Table::from_reader(file, options)?;
    info!(
        "loaded {}: {} columns, {} rows",
        path.display(),
        table.columns.len(),
        table.rows.len()
    );
    Ok(table)
}

impl Table {
    /// Parse CSV from any reader
    ///
    /// Rows may be ragged; missing trailing cells read as empty. Without a
    /// header, columns are named by their position.
    pub fn from_reader<R: Read>(reader: R, options: &TableOptions) -> Result<Self, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(options.has_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let skip = usize::from(options.has_index_column);

        let mut header: Vec<String> = if options.has_header {
            reader
                .headers()?
                .iter()
                .skip(skip)
                .map(|h| h.to_string())
                .collect()
        } else {
            Vec::new()
        };

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .skip(skip)
                    .map(|cell| cell.to_string())
                    .collect::<Vec<_>>(),
            );
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or(0).max(header.len());
        while header.len() < width {
            header.push(header.len().to_string());
        }
        for row in rows.iter_mut() {
            row.resize(width, String::new());
        }

        Ok(Self {
            columns: header,
            rows,
        })
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    fn check_column(&self, index: usize) -> Result<(), ImportError> {
        if index < self.columns.len() {
            Ok(())
        } else {
            Err(ImportError::ColumnOutOfRange {
                index,
                available: self.columns.len(),
            })
        }
    }

    /// Build one channel from an X/Y column pair, labelled by the Y column
    ///
    /// Trailing rows empty in both columns are ignored.
    pub fn channel(&self, mapping: ColumnMapping) -> Result<Channel, ImportError> {
        self.check_column(mapping.x)?;
        self.check_column(mapping.y)?;

        let x_name = &self.columns[mapping.x];
        let y_name = &self.columns[mapping.y];

        let used = self
            .rows
            .iter()
            .rposition(|row| !row[mapping.x].is_empty() || !row[mapping.y].is_empty())
            .map_or(0, |last| last + 1);
        if used == 0 {
            return Err(ImportError::NoData {
                column: y_name.clone(),
            });
        }

        let mut t = Vec::with_capacity(used);
        let mut y = Vec::with_capacity(used);
        for (row_no, row) in self.rows[..used].iter().enumerate() {
            t.push(parse_cell(&row[mapping.x], row_no, x_name)?);
            y.push(parse_cell(&row[mapping.y], row_no, y_name)?);
        }

        if let Some(row) = t.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ImportError::NotIncreasing {
                column: x_name.clone(),
                row: row + 1,
            });
        }

        Ok(Channel::new(y_name.clone(), t, y)?)
    }

    /// Build a channel set from the mappings, in mapping order
    pub fn channels(&self, mappings: &[ColumnMapping]) -> Result<ChannelSet, ImportError> {
        mappings
            .iter()
            .map(|&mapping| self.channel(mapping))
            .collect::<Result<Vec<_>, _>>()
            .map(ChannelSet::new)
    }
}

fn parse_cell(cell: &str, row: usize, column: &str) -> Result<f64, ImportError> {
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ImportError::NotNumeric {
            row,
            column: column.to_string(),
            value: cell.to_string(),
        }),
    }
}
