//! Segment preparation for periodogram estimates
//!
//! Detrending, tapering and the window energy used for density scaling

/// Subtract the segment mean (constant detrend)
pub fn remove_mean(segment: &[f64]) -> Vec<f64> {
    if segment.is_empty() {
        return Vec::new();
    }
    let mean = segment.iter().sum::<f64>() / segment.len() as f64;
    segment.iter().map(|&s| s - mean).collect()
}

/// Apply window in-place
pub fn apply_window_inplace(signal: &mut [f64], window: &[f64]) {
    for (s, w) in signal.iter_mut().zip(window.iter()) {
        *s *= w;
    }
}

/// Detrend and taper one segment
pub fn prepare_segment(segment: &[f64], window: &[f64]) -> Vec<f64> {
    let mut prepared = remove_mean(segment);
    apply_window_inplace(&mut prepared, window);
    prepared
}

/// Sum of squared window coefficients (Σw²)
pub fn window_energy(window: &[f64]) -> f64 {
    window.iter().map(|&w| w * w).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::windows::{generate_periodic_window, WindowType};

    #[test]
    fn test_remove_mean() {
        let out = remove_mean(&[1.0, 2.0, 3.0]);
        assert_eq!(out, vec![-1.0, 0.0, 1.0]);
        assert!(remove_mean(&[]).is_empty());
    }

    #[test]
    fn test_prepare_segment_tapers_edges() {
        let segment: Vec<f64> = (0..100).map(|n| if n % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let window = generate_periodic_window(WindowType::Hamming, 100);
        let prepared = prepare_segment(&segment, &window);

        assert_eq!(prepared.len(), 100);
        assert!(prepared[0].abs() < 0.1);
        assert!((prepared[50].abs() - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_window_energy() {
        let rect = generate_periodic_window(WindowType::Rectangular, 64);
        assert_eq!(window_energy(&rect), 64.0);

        // Tapering always loses energy relative to the rectangle
        let hamming = generate_periodic_window(WindowType::Hamming, 64);
        let e = window_energy(&hamming);
        assert!(e > 20.0 && e < 64.0);
    }
}
