// src/core/phase.rs
//
// Calibrated phase extraction from a single DFT bin.

use log::{debug, warn};
use rustfft::num_complex::Complex;
use serde::{Deserialize, Serialize};

use super::dsp::{apply_window, compute_dft, Spectrum};
use crate::config::ExtractorConfig;
use crate::error::{InvalidInput, PhaseResult};

/// Below this on both axes a bin has no meaningful angle
pub const PHASE_EPSILON: f64 = 1e-10;

/// How the bin to read is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinSelection {
    /// Read the intended bin regardless of where the energy is
    FixedBin(usize),
    /// Read the bin with the largest |X|² below Nyquist
    MaxEnergyBin,
}

impl Default for BinSelection {
    fn default() -> Self {
        Self::FixedBin(9)
    }
}

impl std::fmt::Display for BinSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinSelection::FixedBin(k) => write!(f, "fixed bin {}", k),
            BinSelection::MaxEnergyBin => write!(f, "max energy bin"),
        }
    }
}

/// What to do when the requested bin is at or above N/2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Fail with `InvalidInput::BinOutOfRange`, or `NoUsableBins` when N < 2
    #[default]
    Reject,
    /// Report phase 0.0, as the acquisition firmware does
    ZeroPhase,
}

/// Result of one extraction, with the intermediate artifacts a plot needs
#[derive(Debug, Clone, Serialize)]
pub struct PhaseMeasurement {
    /// Calibrated phase in [0, 360)
    pub phase_degrees: f64,
    /// `None` when the out-of-range policy produced the result
    pub bin: Option<usize>,
    pub bin_frequency_hz: Option<f64>,
    /// Angle before calibration, in (−180, 180]
    pub raw_angle_degrees: f64,
    pub magnitude: f64,
    pub value: Complex<f64>,
    #[serde(skip)]
    pub spectrum: Spectrum,
}

impl PhaseMeasurement {
    pub fn is_out_of_range(&self) -> bool {
        self.bin.is_none()
    }
}

/// Wrap any angle into [0, 360)
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0; also folds -0.0
    if wrapped >= 360.0 || wrapped == 0.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed difference `a − b` wrapped into (−180, 180]
pub fn wrapped_difference(a: f64, b: f64) -> f64 {
    let d = normalize_degrees(a - b);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Angle of a bin in degrees, or exactly 0.0 when both parts are negligible
pub fn raw_angle_degrees(value: Complex<f64>) -> f64 {
    if value.re.abs() < PHASE_EPSILON && value.im.abs() < PHASE_EPSILON {
        return 0.0;
    }
    value.im.atan2(value.re).to_degrees()
}

/// Phase of `value` in degrees, minus the calibration offset, wrapped into [0, 360)
pub fn compute_phase_degrees(value: Complex<f64>, calibration_offset_degrees: f64) -> f64 {
    if value.re.abs() < PHASE_EPSILON && value.im.abs() < PHASE_EPSILON {
        return 0.0;
    }
    normalize_degrees(raw_angle_degrees(value) - calibration_offset_degrees)
}

/// Pick the bin index for `selection`. `None` means no usable bin exists.
pub fn select_bin_index(spectrum: &Spectrum, selection: BinSelection) -> Option<usize> {
    match selection {
        BinSelection::FixedBin(k) if k < spectrum.usable_bins() => Some(k),
        BinSelection::FixedBin(_) => None,
        BinSelection::MaxEnergyBin => spectrum.max_energy_bin(),
    }
}

/// One-shot extraction without a config object
pub fn extract_phase(
    samples: &[f64],
    window: Option<&[f64]>,
    selection: BinSelection,
    calibration_offset_degrees: f64,
) -> PhaseResult<f64> {
    let config = ExtractorConfig {
        bin_selection: selection,
        calibration_offset_degrees,
        ..ExtractorConfig::default()
    };
    PhaseExtractor::new(config)
        .measure_with_window(samples, window)
        .map(|m| m.phase_degrees)
}

/// Stateless extraction pipeline: window, DFT, bin selection, calibrated phase
#[derive(Debug, Clone)]
pub struct PhaseExtractor {
    config: ExtractorConfig,
    window: Option<Vec<f64>>,
}

impl PhaseExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            window: None,
        }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Calibrated phase of `samples` using the configured window
    pub fn extract(&self, samples: &[f64]) -> PhaseResult<f64> {
        self.measure(samples).map(|m| m.phase_degrees)
    }

    /// Full measurement using the configured window
    pub fn measure(&self, samples: &[f64]) -> PhaseResult<PhaseMeasurement> {
        if samples.is_empty() {
            return Err(InvalidInput::EmptySignal.into());
        }

        if let Some(cached) = self.window.as_deref().filter(|w| w.len() == samples.len()) {
            return self.measure_with_window(samples, Some(cached));
        }

        let window = self.config.window.coefficients(samples.len());
        self.measure_with_window(samples, window.as_deref())
    }

    /// Precompute the configured window for buffers of `size` samples
    pub fn with_window_size(mut self, size: usize) -> Self {
        self.window = self.config.window.coefficients(size);
        self
    }

    /// Full measurement with an explicit window (`None` is identity weighting)
    pub fn measure_with_window(
        &self,
        samples: &[f64],
        window: Option<&[f64]>,
    ) -> PhaseResult<PhaseMeasurement> {
        // fields are public, so a hand-built config may never have been validated
        self.config.validate()?;
        if samples.is_empty() {
            return Err(InvalidInput::EmptySignal.into());
        }
        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(InvalidInput::NonFiniteSample { index }.into());
        }

        let spectrum = match window {
            Some(w) => compute_dft(&apply_window(samples, w)?),
            None => compute_dft(samples),
        };
        debug!(
            "computed {}-point DFT ({} usable bins, window: {})",
            spectrum.len(),
            spectrum.usable_bins(),
            if window.is_some() { "yes" } else { "no" }
        );

        let Some(bin) = select_bin_index(&spectrum, self.config.bin_selection) else {
            return self.out_of_range(spectrum);
        };

        let value = spectrum.bin(bin)?;
        let raw = raw_angle_degrees(value);
        let phase = compute_phase_degrees(value, self.config.calibration_offset_degrees);
        debug!(
            "bin {}: re={:.6} im={:.6} raw={:.4}° phase={:.4}°",
            bin, value.re, value.im, raw, phase
        );

        Ok(PhaseMeasurement {
            phase_degrees: phase,
            bin: Some(bin),
            bin_frequency_hz: Some(self.config.bin_frequency(bin, spectrum.len())),
            raw_angle_degrees: raw,
            magnitude: value.norm(),
            value,
            spectrum,
        })
    }

    fn out_of_range(&self, spectrum: Spectrum) -> PhaseResult<PhaseMeasurement> {
        let err = match self.config.bin_selection {
            BinSelection::FixedBin(bin) => InvalidInput::BinOutOfRange {
                bin,
                limit: spectrum.usable_bins(),
            },
            BinSelection::MaxEnergyBin => InvalidInput::NoUsableBins {
                len: spectrum.len(),
            },
        };

        match self.config.out_of_range {
            OutOfRangePolicy::Reject => Err(err.into()),
            OutOfRangePolicy::ZeroPhase => {
                warn!("{}, reporting phase 0", err);
                Ok(PhaseMeasurement {
                    phase_degrees: 0.0,
                    bin: None,
                    bin_frequency_hz: None,
                    raw_angle_degrees: 0.0,
                    magnitude: 0.0,
                    value: Complex::new(0.0, 0.0),
                    spectrum,
                })
            }
        }
    }
}
