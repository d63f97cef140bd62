//! Autoregressive PSD by the covariance method (pcovar)
//!
//! The AR coefficients minimise the forward prediction error over the
//! samples where the full prediction window lies inside the data (no
//! zero-padding of the data matrix, unlike the autocorrelation method).
//! The spectrum is the all-pole model response scaled by the prediction
//! error power.

use log::debug;
use nalgebra::{DMatrix, DVector};
use num_complex::Complex;

use super::fft::FftEngine;
use super::welch::{check_finite, check_sample_rate};
use super::PsdEstimate;
use crate::error::{AnalysisError, Result};

/// Covariance-method estimator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CovarianceConfig {
    /// AR model order (number of coefficients besides a0 = 1)
    pub order: usize,

    /// Requested transform length (clamped to the available samples)
    pub nfft: usize,
}

impl Default for CovarianceConfig {
    fn default() -> Self {
        Self {
            order: 48,
            nfft: 2048,
        }
    }
}

impl CovarianceConfig {
    pub fn new(order: usize, nfft: usize) -> Self {
        Self { order, nfft }
    }

    pub fn validate(&self) -> Result<()> {
        if self.order == 0 {
            return Err(AnalysisError::InvalidConfig(
                "AR order must be at least 1".to_string(),
            ));
        }
        if self.nfft == 0 {
            return Err(AnalysisError::InvalidConfig(
                "pcovar transform length must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Transform length actually used for `available` samples
    pub fn effective_nfft(&self, available: usize) -> usize {
        self.nfft.min(available)
    }
}

/// Fitted all-pole model: x[n] + Σ a[k]·x[n-k] = e[n]
#[derive(Debug, Clone, PartialEq)]
pub struct ArModel {
    /// a[1..=order]
    pub coefficients: Vec<f64>,

    /// Mean squared forward prediction error
    pub noise_variance: f64,
}

impl ArModel {
    pub fn order(&self) -> usize {
        self.coefficients.len()
    }

    /// Prediction-error filter [1, a1, ..., ap]
    pub fn polynomial(&self) -> Vec<f64> {
        std::iter::once(1.0)
            .chain(self.coefficients.iter().copied())
            .collect()
    }
}

/// Upper bound on implicit QR sweeps in the SVD of the data matrix
const SVD_MAX_ITERATIONS: usize = 10_000;

/// Fit an AR model of the given order by the covariance method
///
/// Solves the least-squares system `Xc·a = -x1` by SVD, which returns the
/// minimum-norm solution when the data do not determine every coefficient.
///
/// # Errors
/// `InsufficientSamples` unless `order < y.len()`; `InvalidConfig` for a
/// non-finite sample.
pub fn ar_covariance(y: &[f64], order: usize) -> Result<ArModel> {
    if order == 0 {
        return Err(AnalysisError::InvalidConfig(
            "AR order must be at least 1".to_string(),
        ));
    }
    if order >= y.len() {
        return Err(AnalysisError::InsufficientSamples {
            needed: order + 1,
            available: y.len(),
        });
    }
    check_finite(y)?;

    let rows = y.len() - order;
    let xc = DMatrix::from_fn(rows, order, |i, k| y[order + i - 1 - k]);
    let x1 = DVector::from_fn(rows, |i, _| y[order + i]);

    let svd = xc
        .clone()
        .try_svd(true, true, f64::EPSILON, SVD_MAX_ITERATIONS)
        .ok_or_else(|| {
            AnalysisError::DegenerateSpectrum(format!(
                "AR fit did not converge within {SVD_MAX_ITERATIONS} iterations"
            ))
        })?;
    let tolerance = svd.singular_values.max() * f64::EPSILON * rows.max(order) as f64;
    let rhs = -x1.clone();
    let a = svd
        .solve(&rhs, tolerance)
        .map_err(|e| AnalysisError::DegenerateSpectrum(format!("AR fit failed: {e}")))?;

    // Residual power: x1ᵀx1 + x1ᵀ(Xc·a), averaged over the fitted rows.
    // Floored at ε·energy: exactly predictable data cancels to rounding noise.
    let energy = x1.dot(&x1) / rows as f64;
    let residual = (x1.dot(&x1) + x1.dot(&(&xc * &a))) / rows as f64;
    let noise_variance = residual.max(energy * f64::EPSILON);

    Ok(ArModel {
        coefficients: a.iter().copied().collect(),
        noise_variance,
    })
}

/// Evaluate `noise / |A(e^{jω})|²` on a one-sided grid of `nfft` points
///
/// Coefficients beyond `nfft` wrap around, which samples the model's
/// frequency response exactly at `k·fs/nfft`.
pub fn ar_psd(model: &ArModel, sample_rate: f64, nfft: usize) -> Result<PsdEstimate> {
    check_sample_rate(sample_rate)?;
    let mut engine = FftEngine::new(nfft)?;

    let mut folded = vec![0.0; nfft];
    for (i, c) in model.polynomial().into_iter().enumerate() {
        folded[i % nfft] += c;
    }

    let response: Vec<Complex<f64>> = engine.compute(&folded)?.to_vec();
    let mut power = Vec::with_capacity(response.len());
    for (k, a) in response.iter().enumerate() {
        let p = 2.0 * model.noise_variance / (sample_rate * a.norm_sqr());
        if !p.is_finite() {
            return Err(AnalysisError::DegenerateSpectrum(format!(
                "AR model has a pole on the unit circle near bin {k}"
            )));
        }
        power.push(p);
    }

    PsdEstimate::new(engine.frequency_axis_hz(sample_rate), power)
}

/// Covariance-method PSD of `y` sampled at `sample_rate`
pub fn pcovar(y: &[f64], sample_rate: f64, config: &CovarianceConfig) -> Result<PsdEstimate> {
    config.validate()?;
    check_sample_rate(sample_rate)?;

    let model = ar_covariance(y, config.order)?;
    let nfft = config.effective_nfft(y.len());

    debug!(
        "pcovar: {} samples, fs = {:.6}, order = {}, nfft = {} (requested {}), noise = {:.3e}",
        y.len(),
        sample_rate,
        config.order,
        nfft,
        config.nfft,
        model.noise_variance
    );

    ar_psd(&model, sample_rate, nfft)
}
