//! Analysis orchestration: session state and the per-channel pipeline

pub mod pipeline;
pub mod session;

pub use pipeline::{AnalysisPipeline, AnalysisReport, MethodConfig, MethodSet, PairFailure};
pub use session::{AnalysisSession, RoiState};
