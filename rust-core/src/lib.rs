//! psdlab - Spectral Density Core
//!
//! Welch and covariance-AR power spectral density estimation over tabular
//! time-series channels, with optional Python bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod signal;
pub mod spectrum;
pub mod analysis;
pub mod import;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{AnalysisError, Result};
pub use signal::{Channel, ChannelSet, RegionOfInterest};
pub use spectrum::{CovarianceConfig, Method, PostProcessConfig, Spectrum, WelchConfig, WindowType};
pub use analysis::{AnalysisPipeline, AnalysisReport, AnalysisSession, MethodConfig, MethodSet};
pub use import::{ColumnMapping, ImportError, Table, TableOptions};
