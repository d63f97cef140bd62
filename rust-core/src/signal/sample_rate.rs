//! Effective sampling frequency of a (possibly non-uniform) time axis

use crate::error::{AnalysisError, Result};

/// Estimate the sampling frequency as `median(1 / diff(t))`
///
/// The median keeps occasional gaps or jittered stamps from skewing the
/// estimate.
///
/// # Errors
/// `InsufficientSamples` when `t` has fewer than 2 points,
/// `InvalidConfig` when a spacing is not positive and finite.
pub fn estimate_sample_rate(t: &[f64]) -> Result<f64> {
    if t.len() < 2 {
        return Err(AnalysisError::InsufficientSamples {
            needed: 2,
            available: t.len(),
        });
    }

    let mut rates = Vec::with_capacity(t.len() - 1);
    for w in t.windows(2) {
        let dt = w[1] - w[0];
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(AnalysisError::InvalidConfig(format!(
                "time axis is not strictly increasing ({} -> {})",
                w[0], w[1]
            )));
        }
        rates.push(1.0 / dt);
    }

    Ok(median(&mut rates))
}

/// Median of a non-empty slice (sorts in place)
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let len = values.len();
    if len % 2 == 0 {
        (values[len / 2 - 1] + values[len / 2]) / 2.0
    } else {
        values[len / 2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_axis() {
        let t: Vec<f64> = (0..8).map(|n| n as f64).collect();
        assert_eq!(estimate_sample_rate(&t).unwrap(), 1.0);
    }

    #[test]
    fn test_uniform_axis_khz() {
        let t: Vec<f64> = (0..1000).map(|n| n as f64 / 1000.0).collect();
        let fs = estimate_sample_rate(&t).unwrap();
        assert!((fs - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_robust_to_gap() {
        // One long gap among regular 10 ms spacing
        let mut t: Vec<f64> = (0..50).map(|n| n as f64 * 0.01).collect();
        for v in t.iter_mut().skip(25) {
            *v += 1.0;
        }
        let fs = estimate_sample_rate(&t).unwrap();
        assert!((fs - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_even_count_median() {
        // Rates 1, 2, 4, 4 -> median 3
        let t = [0.0, 1.0, 1.5, 1.75, 2.0];
        assert!((estimate_sample_rate(&t).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_positive_for_increasing_axis() {
        let t = [-3.0, -2.9, 0.0, 10.0, 10.001];
        assert!(estimate_sample_rate(&t).unwrap() > 0.0);
    }

    #[test]
    fn test_single_sample_rejected() {
        let err = estimate_sample_rate(&[1.0]).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientSamples {
                needed: 2,
                available: 1
            }
        );
    }

    #[test]
    fn test_duplicate_stamp_rejected() {
        let err = estimate_sample_rate(&[0.0, 1.0, 1.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfig(_)));
    }
}
