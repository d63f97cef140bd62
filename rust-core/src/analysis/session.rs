//! Analysis session state
//!
//! Everything the display layer changes between passes: loaded channels,
//! region widget state, enabled methods. A session is passed explicitly
//! to each pass; nothing is held globally.

use log::debug;

use super::pipeline::{AnalysisPipeline, AnalysisReport, MethodConfig, MethodSet};
use crate::error::Result;
use crate::signal::{ChannelSet, RegionOfInterest};
use crate::spectrum::{Method, PostProcessConfig};

/// Region widget state: bounds are remembered while inactive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiState {
    pub active: bool,
    pub x1: f64,
    pub x2: f64,
}

impl Default for RoiState {
    fn default() -> Self {
        Self {
            active: false,
            x1: 0.0,
            x2: 1.0,
        }
    }
}

impl RoiState {
    /// Active region covering the first channel's full x-extent
    pub fn full_extent(channels: &ChannelSet) -> Self {
        match RegionOfInterest::full_extent(channels) {
            Some(roi) => Self {
                active: true,
                x1: roi.x1(),
                x2: roi.x2(),
            },
            None => Self {
                active: true,
                ..Self::default()
            },
        }
    }

    /// Width of the current bounds (`dx`)
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// The region to apply, or `None` when inactive
    ///
    /// # Errors
    /// `InvalidConfig` for an active region with `x1 > x2`.
    pub fn region(&self) -> Result<Option<RegionOfInterest>> {
        if self.active {
            RegionOfInterest::new(self.x1, self.x2).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Current analysis state of one window/document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisSession {
    channels: ChannelSet,
    roi: RoiState,
    methods: MethodSet,
    post_process: PostProcessConfig,
}

impl AnalysisSession {
    pub fn new(channels: ChannelSet) -> Self {
        let mut session = Self::default();
        session.set_channels(channels);
        session
    }

    pub fn channels(&self) -> &ChannelSet {
        &self.channels
    }

    pub fn roi(&self) -> &RoiState {
        &self.roi
    }

    pub fn methods(&self) -> &MethodSet {
        &self.methods
    }

    pub fn post_process(&self) -> &PostProcessConfig {
        &self.post_process
    }

    /// Replace the loaded channels
    ///
    /// Region bounds snap to the new data's extent; the active flag is kept.
    pub fn set_channels(&mut self, channels: ChannelSet) {
        let active = self.roi.active;
        self.roi = RoiState {
            active,
            ..RoiState::full_extent(&channels)
        };
        self.channels = channels;
        debug!(
            "session: {} channels loaded, region [{}, {}]",
            self.channels.len(),
            self.roi.x1,
            self.roi.x2
        );
    }

    /// Turn the region on, re-deriving its bounds from the current data
    pub fn enable_roi(&mut self) {
        self.roi = RoiState::full_extent(&self.channels);
    }

    pub fn disable_roi(&mut self) {
        self.roi.active = false;
    }

    /// Move the region bounds (the active flag is unchanged)
    pub fn set_roi_bounds(&mut self, x1: f64, x2: f64) {
        self.roi.x1 = x1;
        self.roi.x2 = x2;
    }

    pub fn enable_method(&mut self, config: MethodConfig) {
        self.methods.enable(config);
    }

    pub fn disable_method(&mut self, method: Method) {
        self.methods.disable(method);
    }

    pub fn set_methods(&mut self, methods: MethodSet) {
        self.methods = methods;
    }

    pub fn set_post_process(&mut self, post_process: PostProcessConfig) {
        self.post_process = post_process;
    }

    /// Run one pass over the current state
    ///
    /// # Errors
    /// `InvalidConfig` for bad estimator parameters or region bounds;
    /// per-channel failures are inside the report instead.
    pub fn analyze(&self) -> Result<AnalysisReport> {
        let region = self.roi.region()?;
        let pipeline = AnalysisPipeline::with_post_process(self.methods, self.post_process)?;
        Ok(pipeline.run(&self.channels, region.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::signal::Channel;
    use crate::spectrum::{WelchConfig, WindowType};

    fn channels() -> ChannelSet {
        let t: Vec<f64> = (0..600).map(|n| n as f64 * 0.01).collect();
        let y: Vec<f64> = t
            .iter()
            .map(|&ti| (2.0 * std::f64::consts::PI * 5.0 * ti).sin())
            .collect();
        ChannelSet::new(vec![Channel::new("signal", t, y).unwrap()])
    }

    #[test]
    fn test_roi_defaults_to_first_channel_extent() {
        let mut session = AnalysisSession::new(channels());
        assert!(!session.roi().active);

        session.set_roi_bounds(1.0, 2.0);
        session.enable_roi();
        let roi = session.roi();
        assert!(roi.active);
        assert_eq!(roi.x1, 0.0);
        assert!((roi.x2 - 5.99).abs() < 1e-12);
        assert!((roi.width() - 5.99).abs() < 1e-12);
    }

    #[test]
    fn test_inverted_active_region_is_invalid() {
        let mut session = AnalysisSession::new(channels());
        session.enable_method(MethodConfig::Welch(WelchConfig::default()));
        session.enable_roi();
        session.set_roi_bounds(3.0, 1.0);
        assert!(matches!(
            session.analyze(),
            Err(AnalysisError::InvalidConfig(_))
        ));

        // Inactive bounds are not validated
        session.disable_roi();
        assert!(session.analyze().is_ok());
    }

    #[test]
    fn test_session_pass() {
        let mut session = AnalysisSession::new(channels());
        session.enable_method(MethodConfig::Welch(WelchConfig::new(WindowType::Hamming, 128)));
        session.enable_roi();
        session.set_roi_bounds(1.0, 4.0);

        let report = session.analyze().unwrap();
        assert_eq!(report.spectra.len(), 1);
        let peak = report.spectra[0].peak_frequency().unwrap();
        assert!((peak - 5.0).abs() < 1.0);

        session.disable_method(Method::Welch);
        assert!(session.analyze().unwrap().spectra.is_empty());
    }
}
