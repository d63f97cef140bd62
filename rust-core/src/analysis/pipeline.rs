//! Per-channel, per-method orchestration of the estimators
//!
//! A pass is a pure function of (channels, region, methods): nothing is
//! cached between calls, so a caller may re-run it on every parameter
//! change and simply discard stale results.

use log::{debug, info, warn};

use crate::error::{AnalysisError, Result};
use crate::signal::{estimate_sample_rate, select_region, Channel, ChannelSet, RegionOfInterest};
use crate::spectrum::{
    normalize, pcovar, welch, CovarianceConfig, Method, PostProcessConfig, PsdEstimate, Spectrum,
    WelchConfig,
};

/// Configuration of one enabled estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MethodConfig {
    Welch(WelchConfig),
    Covariance(CovarianceConfig),
}

impl MethodConfig {
    pub fn method(&self) -> Method {
        match self {
            MethodConfig::Welch(_) => Method::Welch,
            MethodConfig::Covariance(_) => Method::Pcovar,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            MethodConfig::Welch(config) => config.validate(),
            MethodConfig::Covariance(config) => config.validate(),
        }
    }

    fn estimate(&self, y: &[f64], sample_rate: f64) -> Result<PsdEstimate> {
        match self {
            MethodConfig::Welch(config) => welch(y, sample_rate, config),
            MethodConfig::Covariance(config) => pcovar(y, sample_rate, config),
        }
    }
}

/// The set of enabled estimators
///
/// At most one configuration per method; iteration is always Welch first,
/// then pcovar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MethodSet {
    welch: Option<WelchConfig>,
    covariance: Option<CovarianceConfig>,
}

impl MethodSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_welch(mut self, config: WelchConfig) -> Self {
        self.welch = Some(config);
        self
    }

    pub fn with_covariance(mut self, config: CovarianceConfig) -> Self {
        self.covariance = Some(config);
        self
    }

    /// Enable or replace a method
    pub fn enable(&mut self, config: MethodConfig) {
        match config {
            MethodConfig::Welch(c) => self.welch = Some(c),
            MethodConfig::Covariance(c) => self.covariance = Some(c),
        }
    }

    pub fn disable(&mut self, method: Method) {
        match method {
            Method::Welch => self.welch = None,
            Method::Pcovar => self.covariance = None,
        }
    }

    pub fn is_enabled(&self, method: Method) -> bool {
        match method {
            Method::Welch => self.welch.is_some(),
            Method::Pcovar => self.covariance.is_some(),
        }
    }

    pub fn welch(&self) -> Option<&WelchConfig> {
        self.welch.as_ref()
    }

    pub fn covariance(&self) -> Option<&CovarianceConfig> {
        self.covariance.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.welch.is_none() && self.covariance.is_none()
    }

    /// Enabled configurations in output order
    pub fn iter(&self) -> impl Iterator<Item = MethodConfig> + '_ {
        self.welch
            .map(MethodConfig::Welch)
            .into_iter()
            .chain(self.covariance.map(MethodConfig::Covariance))
    }

    pub fn validate(&self) -> Result<()> {
        self.iter().try_for_each(|config| config.validate())
    }
}

/// A (channel, method) pair that produced no spectrum
#[derive(Debug, Clone, PartialEq)]
pub struct PairFailure {
    pub channel_index: usize,
    pub channel_label: String,
    pub method: Method,
    pub error: AnalysisError,
}

/// Result of one pass: every spectrum that could be computed plus the
/// failures of the rest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisReport {
    pub spectra: Vec<Spectrum>,
    pub failures: Vec<PairFailure>,
}

impl AnalysisReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Spectra of one channel, in method order
    pub fn spectra_for(&self, channel_index: usize) -> impl Iterator<Item = &Spectrum> {
        self.spectra
            .iter()
            .filter(move |s| s.channel_index == channel_index)
    }
}

/// Orchestrates region selection, rate inference, estimation and
/// post-processing across a channel set
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPipeline {
    methods: MethodSet,
    post_process: PostProcessConfig,
}

impl AnalysisPipeline {
    /// Create a pipeline, rejecting invalid estimator parameters up front
    pub fn new(methods: MethodSet) -> Result<Self> {
        Self::with_post_process(methods, PostProcessConfig::default())
    }

    pub fn with_post_process(methods: MethodSet, post_process: PostProcessConfig) -> Result<Self> {
        methods.validate()?;
        post_process.validate()?;
        Ok(Self {
            methods,
            post_process,
        })
    }

    pub fn methods(&self) -> &MethodSet {
        &self.methods
    }

    pub fn post_process(&self) -> &PostProcessConfig {
        &self.post_process
    }

    /// Run every enabled method on every channel
    ///
    /// Output order is channel order, then Welch before pcovar. Failures
    /// stay local to their (channel, method) pair.
    pub fn run(&self, channels: &ChannelSet, region: Option<&RegionOfInterest>) -> AnalysisReport {
        let mut report = AnalysisReport::default();

        for (index, channel) in channels.iter().enumerate() {
            for config in self.methods.iter() {
                let method = config.method();
                match self.run_pair(channel, region, &config) {
                    Ok(estimate) => report.spectra.push(Spectrum {
                        frequencies: estimate.frequencies,
                        power: estimate.power,
                        label: channel.label().to_string(),
                        channel_index: index,
                        method,
                    }),
                    Err(error) => {
                        warn!(
                            "channel {} ('{}'), {}: {}",
                            index,
                            channel.label(),
                            method,
                            error
                        );
                        report.failures.push(PairFailure {
                            channel_index: index,
                            channel_label: channel.label().to_string(),
                            method,
                            error,
                        });
                    }
                }
            }
        }

        info!(
            "analysis pass: {} channels, {} spectra, {} failures",
            channels.len(),
            report.spectra.len(),
            report.failures.len()
        );

        report
    }

    fn run_pair(
        &self,
        channel: &Channel,
        region: Option<&RegionOfInterest>,
        config: &MethodConfig,
    ) -> Result<PsdEstimate> {
        let selected = select_region(channel.t(), channel.y(), region);
        if selected.is_empty() {
            return Err(AnalysisError::InsufficientSamples {
                needed: 1,
                available: 0,
            });
        }

        // Sample rate is taken over the whole channel, not the region
        let sample_rate = estimate_sample_rate(channel.t())?;

        debug!(
            "'{}': {} of {} samples in region, fs = {:.6}",
            channel.label(),
            selected.len(),
            channel.len(),
            sample_rate
        );

        let raw = config.estimate(&selected.y, sample_rate)?;
        normalize(raw, &self.post_process)
    }
}
