//! FFT engine using realfft for real-valued signals
//!
//! One engine per transform length; buffers are reused across calls.

use std::sync::Arc;

use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};

use crate::error::{AnalysisError, Result};

/// FFT engine for real-valued signals
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer
    input_buffer: Vec<f64>,

    /// Reusable output buffer (complex spectrum)
    output_buffer: Vec<Complex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples, any length >= 1)
    pub fn new(fft_size: usize) -> Result<Self> {
        if fft_size == 0 {
            return Err(AnalysisError::InvalidConfig(
                "FFT size must be at least 1".to_string(),
            ));
        }

        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();

        Ok(Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
        })
    }

    /// Compute the one-sided complex spectrum X[k], k = 0..=fft_size/2
    ///
    /// The signal is zero-padded (or truncated) to `fft_size`.
    pub fn compute(&mut self, signal: &[f64]) -> Result<&[Complex<f64>]> {
        let copy_len = signal.len().min(self.fft_size);
        self.input_buffer[..copy_len].copy_from_slice(&signal[..copy_len]);
        self.input_buffer[copy_len..].fill(0.0);

        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
            .map_err(|e| AnalysisError::Fft(e.to_string()))?;

        Ok(&self.output_buffer)
    }

    /// Compute power spectrum |X[k]|²
    pub fn compute_power(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        Ok(self.compute(signal)?.iter().map(|c| c.norm_sqr()).collect())
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Get number of frequency bins (fft_size/2 + 1 for real FFT)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Frequency of bin `k` in Hz
    pub fn bin_to_hz(&self, bin: usize, sample_rate: f64) -> f64 {
        bin as f64 * sample_rate / self.fft_size as f64
    }

    /// Frequency axis in Hz for all one-sided bins
    pub fn frequency_axis_hz(&self, sample_rate: f64) -> Vec<f64> {
        (0..self.num_bins())
            .map(|bin| self.bin_to_hz(bin, sample_rate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_fft_dc_signal() {
        let mut fft = FftEngine::new(1024).unwrap();

        // DC signal (constant), zero-padded
        let signal = vec![1.0; 100];
        let power = fft.compute_power(&signal).unwrap();

        // DC bin power is N²
        assert!((power[0] - 10_000.0).abs() < 1e-6);
        assert_eq!(power.len(), 513);
    }

    #[test]
    fn test_fft_sine_wave() {
        let mut fft = FftEngine::new(1024).unwrap();

        // Exactly 64 cycles per frame
        let signal: Vec<f64> = (0..1024)
            .map(|n| (2.0 * PI * 64.0 * n as f64 / 1024.0).sin())
            .collect();

        let power = fft.compute_power(&signal).unwrap();
        let (peak_bin, &peak) = power
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .unwrap();

        assert_eq!(peak_bin, 64);
        // |X| = N/2 for a unit sine on a bin centre
        assert!((peak.sqrt() - 512.0).abs() < 1e-6);
    }

    #[test]
    fn test_odd_length_bins() {
        let fft = FftEngine::new(9).unwrap();
        assert_eq!(fft.num_bins(), 5);
        let freqs = fft.frequency_axis_hz(9.0);
        assert_eq!(freqs, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_frequency_axis() {
        let fft = FftEngine::new(1024).unwrap();
        let freqs = fft.frequency_axis_hz(48000.0);

        assert_eq!(freqs.len(), 513);
        assert_eq!(freqs[0], 0.0);
        assert!((freqs[512] - 24000.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(FftEngine::new(0).is_err());
    }
}
