//! Error taxonomy for the spectral estimation core
//!
//! Errors are local to one (channel, method) pair; the pipeline collects
//! them instead of aborting.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Insufficient samples: need at least {needed}, got {available}")]
    InsufficientSamples { needed: usize, available: usize },

    #[error("Degenerate spectrum: {0}")]
    DegenerateSpectrum(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("FFT processing failed: {0}")]
    Fft(String),
}

impl AnalysisError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InsufficientSamples { .. } => "insufficient_samples",
            AnalysisError::DegenerateSpectrum(_) => "degenerate_spectrum",
            AnalysisError::InvalidConfig(_) => "invalid_config",
            AnalysisError::Fft(_) => "fft",
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
