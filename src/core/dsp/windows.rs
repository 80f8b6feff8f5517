//! Window function implementations

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::InvalidInput;

/// Flat-top cosine-sum coefficients, un-normalised
const FLAT_TOP: [f64; 5] = [1.0, 1.93, 1.29, 0.388, 0.028];

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// Identity weighting (no window)
    #[default]
    Rectangular,
    Hann,
    Hamming,
    Blackman,
    /// Good for amplitude and phase accuracy at the cost of a wider main lobe
    FlatTop,
}

impl WindowType {
    pub fn all() -> [Self; 5] {
        [
            Self::Rectangular,
            Self::Hann,
            Self::Hamming,
            Self::Blackman,
            Self::FlatTop,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            WindowType::Rectangular => "rectangular",
            WindowType::Hann => "hann",
            WindowType::Hamming => "hamming",
            WindowType::Blackman => "blackman",
            WindowType::FlatTop => "flattop",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "rectangular" | "rect" | "none" => Some(Self::Rectangular),
            "hann" | "hanning" => Some(Self::Hann),
            "hamming" => Some(Self::Hamming),
            "blackman" => Some(Self::Blackman),
            "flattop" | "flat_top" | "flat-top" => Some(Self::FlatTop),
            _ => None,
        }
    }

    /// `None` for rectangular, so callers can skip the multiply entirely
    pub fn coefficients(&self, size: usize) -> Option<Vec<f64>> {
        match self {
            WindowType::Rectangular => None,
            other => Some(create_window(size, *other)),
        }
    }
}

impl std::fmt::Display for WindowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Create a symmetric window of `size` points
pub fn create_window(size: usize, window_type: WindowType) -> Vec<f64> {
    if size == 1 {
        return vec![1.0];
    }

    let denom = size.saturating_sub(1) as f64;
    let flat_top_sum: f64 = FLAT_TOP.iter().sum();

    (0..size)
        .map(|i| {
            let x = 2.0 * PI * i as f64 / denom;
            match window_type {
                WindowType::Rectangular => 1.0,
                WindowType::Hann => 0.5 * (1.0 - x.cos()),
                WindowType::Hamming => 0.54 - 0.46 * x.cos(),
                WindowType::Blackman => 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos(),
                WindowType::FlatTop => {
                    (FLAT_TOP[0] - FLAT_TOP[1] * x.cos() + FLAT_TOP[2] * (2.0 * x).cos()
                        - FLAT_TOP[3] * (3.0 * x).cos()
                        + FLAT_TOP[4] * (4.0 * x).cos())
                        / flat_top_sum
                }
            }
        })
        .collect()
}

/// Multiply `samples` by `window` elementwise
pub fn apply_window(samples: &[f64], window: &[f64]) -> Result<Vec<f64>, InvalidInput> {
    if samples.len() != window.len() {
        return Err(InvalidInput::WindowLengthMismatch {
            signal: samples.len(),
            window: window.len(),
        });
    }

    Ok(samples.iter().zip(window).map(|(&s, &w)| s * w).collect())
}

/// Render coefficients as a C array initialiser, eight values per line
pub fn format_c_array(name: &str, coefficients: &[f64]) -> String {
    let mut out = format!("float {}[] = {{\n", name);
    for (i, c) in coefficients.iter().enumerate() {
        out.push_str(&format!("{:.6}", c));
        if (i + 1) % 8 == 0 {
            out.push_str(",\n");
        } else if i + 1 < coefficients.len() {
            out.push_str(", ");
        }
    }
    out.push_str("\n};\n");
    out
}
