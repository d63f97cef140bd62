//! Region-of-interest restriction of a (t, y) pair

use std::borrow::Cow;

use super::ChannelSet;
use crate::error::{AnalysisError, Result};

/// Closed interval `[x1, x2]` in time-axis units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionOfInterest {
    x1: f64,
    x2: f64,
}

impl RegionOfInterest {
    /// Create a region, rejecting `x1 > x2` and non-finite bounds
    pub fn new(x1: f64, x2: f64) -> Result<Self> {
        if !x1.is_finite() || !x2.is_finite() {
            return Err(AnalysisError::InvalidConfig(format!(
                "region bounds must be finite (x1 = {x1}, x2 = {x2})"
            )));
        }
        if x1 > x2 {
            return Err(AnalysisError::InvalidConfig(format!(
                "region lower bound {x1} exceeds upper bound {x2}"
            )));
        }
        Ok(Self { x1, x2 })
    }

    /// Full x-extent of the first channel, or `None` for an empty set
    pub fn full_extent(channels: &ChannelSet) -> Option<Self> {
        channels.first().map(|ch| {
            let (x1, x2) = ch.x_extent();
            Self { x1, x2 }
        })
    }

    pub fn x1(&self) -> f64 {
        self.x1
    }

    pub fn x2(&self) -> f64 {
        self.x2
    }

    /// Interval width (`dx`)
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Inclusive on both ends
    pub fn contains(&self, x: f64) -> bool {
        self.x1 <= x && x <= self.x2
    }
}

/// Samples of a channel restricted to a region
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSlice<'a> {
    pub t: Cow<'a, [f64]>,
    pub y: Cow<'a, [f64]>,
}

impl RegionSlice<'_> {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// Keep the samples with `x1 <= t[i] <= x2`, in input order
///
/// Without a region the input is returned as-is (borrowed). An interval
/// that excludes every sample yields empty sequences; callers report that
/// as `InsufficientSamples`.
pub fn select_region<'a>(
    t: &'a [f64],
    y: &'a [f64],
    region: Option<&RegionOfInterest>,
) -> RegionSlice<'a> {
    let Some(region) = region else {
        return RegionSlice {
            t: Cow::Borrowed(t),
            y: Cow::Borrowed(y),
        };
    };

    let (t_sel, y_sel): (Vec<f64>, Vec<f64>) = t
        .iter()
        .zip(y.iter())
        .filter(|&(&ti, _)| region.contains(ti))
        .map(|(&ti, &yi)| (ti, yi))
        .unzip();

    RegionSlice {
        t: Cow::Owned(t_sel),
        y: Cow::Owned(y_sel),
    }
}
