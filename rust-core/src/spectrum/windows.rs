//! Window functions for spectral estimation
//!
//! Periodic (DFT-even) variants are what the averaged periodogram uses;
//! symmetric variants are kept for inspection and tests.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;

/// Number of nearly constant-level sidelobes next to the Taylor mainlobe
pub const TAYLOR_NBAR: usize = 4;

/// Taylor sidelobe suppression in dB below the mainlobe peak
pub const TAYLOR_SLL_DB: f64 = 30.0;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowType {
    /// Rectangular window (no tapering)
    #[default]
    Rectangular,

    /// Bartlett (triangular) window with zero end points:
    /// w[n] = 1 - |2n/(M-1) - 1|
    Bartlett,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    /// Sidelobe attenuation: ~43 dB
    Hamming,

    /// Taylor window (nbar = 4, sll = 30 dB), centre normalised to 1
    Taylor,
}

impl WindowType {
    pub const ALL: [WindowType; 4] = [
        WindowType::Rectangular,
        WindowType::Bartlett,
        WindowType::Hamming,
        WindowType::Taylor,
    ];

    /// Canonical lower-case name
    pub fn name(&self) -> &'static str {
        match self {
            WindowType::Rectangular => "rectangular",
            WindowType::Bartlett => "bartlett",
            WindowType::Hamming => "hamming",
            WindowType::Taylor => "taylor",
        }
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WindowType {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangular" | "boxcar" | "rect" => Ok(WindowType::Rectangular),
            "bartlett" | "triangular" => Ok(WindowType::Bartlett),
            "hamming" => Ok(WindowType::Hamming),
            "taylor" => Ok(WindowType::Taylor),
            other => Err(AnalysisError::InvalidConfig(format!(
                "unknown window '{other}' (expected rectangular, bartlett, hamming or taylor)"
            ))),
        }
    }
}

/// Generate symmetric window coefficients w[n], n = 0..M-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    match length {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => symmetric(window_type, length),
    }
}

/// Generate periodic window coefficients for spectral analysis
///
/// Computed as the symmetric window of length M+1 with the last sample
/// dropped, so the window tiles a DFT frame of M samples.
pub fn generate_periodic_window(window_type: WindowType, length: usize) -> Vec<f64> {
    match length {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let mut window = symmetric(window_type, length + 1);
            window.truncate(length);
            window
        }
    }
}

fn symmetric(window_type: WindowType, length: usize) -> Vec<f64> {
    let m = length as f64;

    match window_type {
        WindowType::Rectangular => vec![1.0; length],

        WindowType::Bartlett => (0..length)
            .map(|n| {
                let x = 2.0 * n as f64 / (m - 1.0);
                if x <= 1.0 {
                    x
                } else {
                    2.0 - x
                }
            })
            .collect(),

        WindowType::Hamming => (0..length)
            .map(|n| {
                let angle = 2.0 * PI * n as f64 / (m - 1.0);
                0.54 - 0.46 * angle.cos()
            })
            .collect(),

        WindowType::Taylor => taylor(length, TAYLOR_NBAR, TAYLOR_SLL_DB),
    }
}

/// Taylor window of length M, normalised so the (virtual) centre is 1
fn taylor(length: usize, nbar: usize, sll_db: f64) -> Vec<f64> {
    let m = length as f64;
    let b = 10f64.powf(sll_db / 20.0);
    let a = b.acosh() / PI;
    let nb = nbar as f64;
    let s2 = nb * nb / (a * a + (nb - 0.5) * (nb - 0.5));

    // Cosine series coefficients F_m, m = 1..nbar-1
    let coefficients: Vec<f64> = (1..nbar)
        .map(|mi| {
            let mf = mi as f64;
            let m2 = mf * mf;
            let sign = if mi % 2 == 1 { 1.0 } else { -1.0 };

            let numer: f64 = (1..nbar)
                .map(|k| {
                    let kf = k as f64 - 0.5;
                    1.0 - m2 / s2 / (a * a + kf * kf)
                })
                .product();

            let denom: f64 = (1..nbar)
                .filter(|&k| k != mi)
                .map(|k| {
                    let kf = k as f64;
                    1.0 - m2 / (kf * kf)
                })
                .product();

            sign * numer / (2.0 * denom)
        })
        .collect();

    let w = |n: f64| -> f64 {
        1.0 + 2.0
            * coefficients
                .iter()
                .enumerate()
                .map(|(i, f)| {
                    let mi = (i + 1) as f64;
                    f * (2.0 * PI * mi * (n - m / 2.0 + 0.5) / m).cos()
                })
                .sum::<f64>()
    };

    let scale = 1.0 / w((m - 1.0) / 2.0);
    (0..length).map(|n| w(n as f64) * scale).collect()
}
