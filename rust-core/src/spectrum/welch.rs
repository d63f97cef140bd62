//! Welch's averaged periodogram
//!
//! Half-overlapping segments, constant detrend per segment, periodic
//! window, mean averaging and one-sided density scaling.

use log::debug;
use ndarray::{Array2, Axis};

use super::fft::FftEngine;
use super::windowing::{prepare_segment, window_energy};
use super::windows::{generate_periodic_window, WindowType};
use super::PsdEstimate;
use crate::error::{AnalysisError, Result};

/// Welch estimator configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WelchConfig {
    /// Window applied to every segment
    pub window: WindowType,

    /// Requested segment length (clamped to the available samples)
    pub nperseg: usize,
}

impl Default for WelchConfig {
    fn default() -> Self {
        Self {
            window: WindowType::Rectangular,
            nperseg: 2048,
        }
    }
}

impl WelchConfig {
    pub fn new(window: WindowType, nperseg: usize) -> Self {
        Self { window, nperseg }
    }

    pub fn validate(&self) -> Result<()> {
        if self.nperseg == 0 {
            return Err(AnalysisError::InvalidConfig(
                "Welch segment length must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Segment length actually used for `available` samples
    pub fn effective_nperseg(&self, available: usize) -> usize {
        self.nperseg.min(available)
    }
}

/// Estimate the one-sided PSD of `y` sampled at `sample_rate`
///
/// # Returns
/// Frequencies `k·fs/nperseg` for `k = 0..=nperseg/2` and the averaged,
/// density-scaled periodogram.
pub fn welch(y: &[f64], sample_rate: f64, config: &WelchConfig) -> Result<PsdEstimate> {
    config.validate()?;
    check_sample_rate(sample_rate)?;
    if y.is_empty() {
        return Err(AnalysisError::InsufficientSamples {
            needed: 1,
            available: 0,
        });
    }
    check_finite(y)?;

    let nperseg = config.effective_nperseg(y.len());
    let noverlap = nperseg / 2;
    let step = nperseg - noverlap;
    let n_segments = (y.len() - nperseg) / step + 1;

    let window = generate_periodic_window(config.window, nperseg);
    let mut engine = FftEngine::new(nperseg)?;
    let n_bins = engine.num_bins();

    debug!(
        "welch: {} samples, fs = {:.6}, nperseg = {} (requested {}), {} segments, window = {}",
        y.len(),
        sample_rate,
        nperseg,
        config.nperseg,
        n_segments,
        config.window
    );

    let mut periodograms = Array2::<f64>::zeros((n_segments, n_bins));
    for (i, mut row) in periodograms.axis_iter_mut(Axis(0)).enumerate() {
        let start = i * step;
        let segment = prepare_segment(&y[start..start + nperseg], &window);
        let power = engine.compute_power(&segment)?;
        for (dst, src) in row.iter_mut().zip(power) {
            *dst = src;
        }
    }

    let mut psd = periodograms
        .mean_axis(Axis(0))
        .ok_or_else(|| AnalysisError::DegenerateSpectrum("no segments to average".to_string()))?
        .to_vec();

    let energy = window_energy(&window);
    if !(energy > 0.0) {
        return Err(AnalysisError::DegenerateSpectrum(format!(
            "{} window of length {} has no energy",
            config.window, nperseg
        )));
    }
    let scale = 1.0 / (sample_rate * energy);

    // Fold negative frequencies onto the positive half, except DC and
    // (for even lengths) Nyquist, which have no mirror image.
    let last_doubled = if nperseg % 2 == 0 { n_bins - 1 } else { n_bins };
    for (k, p) in psd.iter_mut().enumerate() {
        *p *= scale;
        if k > 0 && k < last_doubled {
            *p *= 2.0;
        }
    }

    PsdEstimate::new(engine.frequency_axis_hz(sample_rate), psd)
}

pub(crate) fn check_sample_rate(sample_rate: f64) -> Result<()> {
    if sample_rate > 0.0 && sample_rate.is_finite() {
        Ok(())
    } else {
        Err(AnalysisError::InvalidConfig(format!(
            "sample rate must be positive and finite (got {sample_rate})"
        )))
    }
}

/// Reject NaN and infinite samples before they reach a transform or solver
pub(crate) fn check_finite(y: &[f64]) -> Result<()> {
    match y.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(AnalysisError::InvalidConfig(format!(
            "sample {index} is not finite ({})",
            y[index]
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(freq: f64, fs: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * PI * freq * i as f64 / fs).sin())
            .collect()
    }

    #[test]
    fn test_output_shape_and_axis() {
        let y = sine(50.0, 1000.0, 4096);
        let psd = welch(&y, 1000.0, &WelchConfig::new(WindowType::Hamming, 256)).unwrap();

        assert_eq!(psd.frequencies.len(), 129);
        assert_eq!(psd.power.len(), 129);
        assert_eq!(psd.frequencies[0], 0.0);
        assert!((psd.frequencies[128] - 500.0).abs() < 1e-9);
        assert!(psd.frequencies.windows(2).all(|w| w[1] > w[0]));
        assert!(psd.power.iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn test_sine_peak_location() {
        let fs = 1000.0;
        for window in WindowType::ALL {
            let y = sine(125.0, fs, 4096);
            let psd = welch(&y, fs, &WelchConfig::new(window, 512)).unwrap();
            let (peak, _) = psd
                .power
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.total_cmp(b))
                .unwrap();
            assert!(
                (psd.frequencies[peak] - 125.0).abs() < 2.0,
                "{window}: peak at {}",
                psd.frequencies[peak]
            );
        }
    }

    #[test]
    fn test_white_noise_density_level() {
        // Parseval: Σ P·df is the mean segment variance
        let mut state: u64 = 12345;
        let y: Vec<f64> = (0..8192)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                ((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
            })
            .collect();
        let fs = 100.0;
        let psd = welch(&y, fs, &WelchConfig::new(WindowType::Rectangular, 1024)).unwrap();

        let df = fs / 1024.0;
        let total: f64 = psd.power.iter().sum::<f64>() * df;
        let variance = 1.0 / 3.0;
        assert!((total - variance).abs() < 0.03, "total power {total}");
    }

    #[test]
    fn test_nperseg_clamped_to_samples() {
        let y = vec![0.0, 1.0, 0.0, -1.0, 0.0, 1.0, 0.0, -1.0];
        let psd = welch(&y, 1.0, &WelchConfig::new(WindowType::Rectangular, 4096)).unwrap();

        // nperseg = 8 -> single segment, 5 one-sided bins
        assert_eq!(psd.len(), 5);
        assert!((psd.frequencies[4] - 0.5).abs() < 1e-12);

        // Period-4 wave: all power at fs/4
        let (peak, _) = psd
            .power
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .unwrap();
        assert_eq!(peak, 2);
    }

    #[test]
    fn test_odd_segment_length() {
        let y = sine(1.0, 9.0, 9);
        let psd = welch(&y, 9.0, &WelchConfig::new(WindowType::Hamming, 9)).unwrap();
        assert_eq!(psd.len(), 5);
        assert!(psd.power.iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn test_deterministic() {
        let y = sine(33.0, 512.0, 3000);
        let config = WelchConfig::new(WindowType::Taylor, 256);
        let a = welch(&y, 512.0, &config).unwrap();
        let b = welch(&y, 512.0, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_inputs() {
        let y = vec![1.0; 16];
        assert!(matches!(
            welch(&y, 1.0, &WelchConfig::new(WindowType::Hamming, 0)),
            Err(AnalysisError::InvalidConfig(_))
        ));
        assert!(matches!(
            welch(&y, 0.0, &WelchConfig::default()),
            Err(AnalysisError::InvalidConfig(_))
        ));
        assert!(matches!(
            welch(&[], 1.0, &WelchConfig::default()),
            Err(AnalysisError::InsufficientSamples { .. })
        ));
    }

    #[test]
    fn test_non_finite_sample_rejected() {
        let mut y = sine(10.0, 100.0, 512);
        y[100] = f64::NAN;
        let err = welch(&y, 100.0, &WelchConfig::new(WindowType::Hamming, 128)).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InvalidConfig("sample 100 is not finite (NaN)".to_string())
        );

        y[100] = f64::NEG_INFINITY;
        assert!(matches!(
            welch(&y, 100.0, &WelchConfig::default()),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }
}
