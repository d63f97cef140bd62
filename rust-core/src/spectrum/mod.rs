//! Power spectral density estimation
//!
//! Two estimators (averaged periodogram and autoregressive covariance
//! method) feed a common post-processing step that makes their outputs
//! comparable on one plot.

pub mod fft;
pub mod windows;
pub mod windowing;
pub mod welch;
pub mod covariance;
pub mod postprocess;

pub use fft::FftEngine;
pub use windows::{generate_periodic_window, generate_window, WindowType};
pub use welch::{welch, WelchConfig};
pub use covariance::{ar_covariance, pcovar, ArModel, CovarianceConfig};
pub use postprocess::{normalize, PostProcessConfig, LOW_FREQUENCY_BINS, MIN_NORMALIZED_BINS};

use std::fmt;

use crate::error::{AnalysisError, Result};

/// Segment / transform lengths offered for both estimators
pub const SEGMENT_LENGTHS: [usize; 6] = [128, 256, 512, 1024, 2048, 4096];

/// Estimation method tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    Welch,
    Pcovar,
}

impl Method {
    /// Machine tag (`welch` / `pcovar`)
    pub fn tag(&self) -> &'static str {
        match self {
            Method::Welch => "welch",
            Method::Pcovar => "pcovar",
        }
    }

    /// Legend label
    pub fn label(&self) -> &'static str {
        match self {
            Method::Welch => "Welch",
            Method::Pcovar => "pcovar",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Raw estimator output: one-sided frequencies and power density
#[derive(Debug, Clone, PartialEq)]
pub struct PsdEstimate {
    pub frequencies: Vec<f64>,
    pub power: Vec<f64>,
}

impl PsdEstimate {
    pub fn new(frequencies: Vec<f64>, power: Vec<f64>) -> Result<Self> {
        if frequencies.len() != power.len() {
            return Err(AnalysisError::DegenerateSpectrum(format!(
                "{} frequencies but {} power values",
                frequencies.len(),
                power.len()
            )));
        }
        Ok(Self { frequencies, power })
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// Post-processed spectrum of one channel by one method
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Ascending, non-negative frequencies
    pub frequencies: Vec<f64>,

    /// Normalised power (peak = 1)
    pub power: Vec<f64>,

    /// Label of the source channel
    pub label: String,

    /// Position of the source channel in its set (colour identity)
    pub channel_index: usize,

    pub method: Method,
}

impl Spectrum {
    /// Suggested legend entry, e.g. `"ch1 Spec. Den. (Welch)"`
    pub fn display_name(&self) -> String {
        format!("{} Spec. Den. ({})", self.label, self.method.label())
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Frequency of the highest bin
    pub fn peak_frequency(&self) -> Option<f64> {
        self.power
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| self.frequencies[i])
    }
}
