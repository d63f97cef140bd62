//! Time-domain channels, sample-rate inference and region selection

pub mod sample_rate;
pub mod region;

pub use sample_rate::estimate_sample_rate;
pub use region::{select_region, RegionOfInterest};

use crate::error::{AnalysisError, Result};

/// A named (t, y) trace
///
/// `t` is expected to be strictly increasing but not necessarily uniform.
/// Transformations always produce new sequences; a channel is never
/// mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    label: String,
    t: Vec<f64>,
    y: Vec<f64>,
}

impl Channel {
    /// Create a channel, checking that `t` and `y` have equal, non-zero length
    /// and hold only finite values
    pub fn new(label: impl Into<String>, t: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if t.len() != y.len() {
            return Err(AnalysisError::InvalidConfig(format!(
                "time axis has {} samples but values have {}",
                t.len(),
                y.len()
            )));
        }
        if t.is_empty() {
            return Err(AnalysisError::InsufficientSamples {
                needed: 1,
                available: 0,
            });
        }
        let non_finite = t
            .iter()
            .zip(&y)
            .position(|(ti, yi)| !ti.is_finite() || !yi.is_finite());
        if let Some(i) = non_finite {
            return Err(AnalysisError::InvalidConfig(format!(
                "sample {i} is not finite (t = {}, y = {})",
                t[i], y[i]
            )));
        }

        Ok(Self {
            label: label.into(),
            t,
            y,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn t(&self) -> &[f64] {
        &self.t
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// First and last time stamp
    pub fn x_extent(&self) -> (f64, f64) {
        // Non-empty by construction
        (self.t[0], self.t[self.t.len() - 1])
    }

    /// Whether the time axis is strictly increasing
    pub fn is_strictly_increasing(&self) -> bool {
        self.t.windows(2).all(|w| w[1] > w[0])
    }
}

/// Ordered list of channels
///
/// A channel's position is its identity for colouring and legends in both
/// the time and frequency views, so order is preserved everywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelSet {
    channels: Vec<Channel>,
}

impl ChannelSet {
    pub fn new(channels: Vec<Channel>) -> Self {
        Self { channels }
    }

    pub fn push(&mut self, channel: Channel) {
        self.channels.push(channel);
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Channel> {
        self.channels.iter()
    }

    pub fn first(&self) -> Option<&Channel> {
        self.channels.first()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.label()).collect()
    }
}

impl From<Vec<Channel>> for ChannelSet {
    fn from(channels: Vec<Channel>) -> Self {
        Self::new(channels)
    }
}

impl<'a> IntoIterator for &'a ChannelSet {
    type Item = &'a Channel;
    type IntoIter = std::slice::Iter<'a, Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_length_mismatch() {
        let err = Channel::new("a", vec![0.0, 1.0], vec![1.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfig(_)));
    }

    #[test]
    fn test_channel_empty_rejected() {
        let err = Channel::new("a", vec![], vec![]).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientSamples { .. }));
    }

    #[test]
    fn test_channel_non_finite_rejected() {
        let err = Channel::new("a", vec![0.0, 1.0, 2.0], vec![1.0, f64::NAN, 3.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfig(_)));

        let err = Channel::new("a", vec![0.0, f64::INFINITY], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfig(_)));
    }

    #[test]
    fn test_channel_extent_and_monotonicity() {
        let ch = Channel::new("a", vec![0.5, 1.0, 3.0], vec![0.0; 3]).unwrap();
        assert_eq!(ch.x_extent(), (0.5, 3.0));
        assert!(ch.is_strictly_increasing());

        let ch = Channel::new("b", vec![0.0, 1.0, 1.0], vec![0.0; 3]).unwrap();
        assert!(!ch.is_strictly_increasing());
    }

    #[test]
    fn test_channel_set_order() {
        let set: ChannelSet = vec![
            Channel::new("first", vec![0.0], vec![0.0]).unwrap(),
            Channel::new("second", vec![0.0], vec![0.0]).unwrap(),
        ]
        .into();
        assert_eq!(set.labels(), vec!["first", "second"]);
        assert_eq!(set.first().map(|c| c.label()), Some("first"));
    }
}
