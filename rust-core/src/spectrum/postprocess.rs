//! Low-frequency truncation and peak normalisation
//!
//! Both estimators leak DC and edge effects into their lowest bins. Those
//! bins are dropped before the peak is taken, so a leaked bin never sets
//! the normalisation reference.

use super::PsdEstimate;
use crate::error::{AnalysisError, Result};

/// Lowest-frequency bins discarded from every spectrum
pub const LOW_FREQUENCY_BINS: usize = 4;

/// Bins that must survive truncation for a usable spectrum
pub const MIN_NORMALIZED_BINS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostProcessConfig {
    /// Bins dropped from the low end
    pub skip_bins: usize,

    /// Minimum bins left after dropping
    pub min_bins: usize,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            skip_bins: LOW_FREQUENCY_BINS,
            min_bins: MIN_NORMALIZED_BINS,
        }
    }
}

impl PostProcessConfig {
    pub fn with_skip_bins(mut self, skip_bins: usize) -> Self {
        self.skip_bins = skip_bins;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_bins == 0 {
            return Err(AnalysisError::InvalidConfig(
                "minimum bin count must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Raw bins an estimate needs to survive post-processing
    pub fn required_raw_bins(&self) -> usize {
        self.skip_bins + self.min_bins
    }
}

/// Drop the first `skip_bins` bins and scale the rest so the peak is 1.0
///
/// # Errors
/// `DegenerateSpectrum` when fewer than `min_bins` remain or the remaining
/// maximum is not positive and finite.
pub fn normalize(estimate: PsdEstimate, config: &PostProcessConfig) -> Result<PsdEstimate> {
    let PsdEstimate {
        mut frequencies,
        mut power,
    } = estimate;

    if frequencies.len() != power.len() {
        return Err(AnalysisError::DegenerateSpectrum(format!(
            "{} frequencies but {} power values",
            frequencies.len(),
            power.len()
        )));
    }

    let raw_bins = power.len();
    if raw_bins < config.required_raw_bins() {
        return Err(AnalysisError::DegenerateSpectrum(format!(
            "{} bins left after dropping {} (need {})",
            raw_bins.saturating_sub(config.skip_bins),
            config.skip_bins,
            config.min_bins
        )));
    }

    frequencies.drain(..config.skip_bins);
    power.drain(..config.skip_bins);

    let peak = power.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(peak > 0.0 && peak.is_finite()) {
        return Err(AnalysisError::DegenerateSpectrum(format!(
            "spectrum maximum is {peak}, cannot normalise"
        )));
    }

    for p in power.iter_mut() {
        *p /= peak;
    }

    Ok(PsdEstimate { frequencies, power })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(power: Vec<f64>) -> PsdEstimate {
        let frequencies = (0..power.len()).map(|k| k as f64).collect();
        PsdEstimate { frequencies, power }
    }

    #[test]
    fn test_drops_leading_bins_and_normalises() {
        // A huge DC bin must not set the reference
        let raw = estimate(vec![1e6, 50.0, 40.0, 30.0, 2.0, 4.0, 8.0, 1.0, 0.5]);
        let out = normalize(raw, &PostProcessConfig::default()).unwrap();

        assert_eq!(out.frequencies, vec![4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(out.power, vec![0.25, 0.5, 1.0, 0.125, 0.0625]);
    }

    #[test]
    fn test_peak_is_exactly_one() {
        let raw = estimate((0..64).map(|k| (k as f64 * 0.37).sin().abs() * 3.3 + 0.01).collect());
        let out = normalize(raw, &PostProcessConfig::default()).unwrap();
        let max = out.power.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(max, 1.0);
        assert_eq!(out.len(), 60);
    }

    #[test]
    fn test_too_few_bins() {
        // 8 raw bins leave 4 after truncation
        let raw = estimate(vec![1.0; 8]);
        assert!(matches!(
            normalize(raw, &PostProcessConfig::default()),
            Err(AnalysisError::DegenerateSpectrum(_))
        ));

        // 9 raw bins is the boundary
        let raw = estimate(vec![1.0; 9]);
        assert_eq!(normalize(raw, &PostProcessConfig::default()).unwrap().len(), 5);
    }

    #[test]
    fn test_zero_spectrum() {
        let raw = estimate(vec![0.0; 32]);
        assert!(matches!(
            normalize(raw, &PostProcessConfig::default()),
            Err(AnalysisError::DegenerateSpectrum(_))
        ));
    }

    #[test]
    fn test_overridden_skip_count() {
        let raw = estimate(vec![10.0, 1.0, 2.0, 4.0, 2.0, 1.0]);
        let config = PostProcessConfig::default().with_skip_bins(1);
        let out = normalize(raw, &config).unwrap();
        assert_eq!(out.frequencies[0], 1.0);
        assert_eq!(out.power, vec![0.25, 0.5, 1.0, 0.5, 0.25]);
    }
}
