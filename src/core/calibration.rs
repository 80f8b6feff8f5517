// src/core/calibration.rs
//
// Helpers for choosing a bin and deriving the calibration offset for a rig.
//
// A tone that does not sit exactly on a bin drifts against that bin's
// frequency over the buffer, so the bin angle carries a fixed bias:
//
//     Δφ = 360 · (f_bin − f_signal) · N / fs   degrees
//
// In practice window leakage and the sine/cosine convention move the bias
// away from the theoretical figure, so `measure_offset` runs the actual
// pipeline on a clean reference tone instead.

use log::debug;

use super::phase::{normalize_degrees, PhaseExtractor};
use super::signal::SineWave;
use crate::config::ExtractorConfig;
use crate::error::PhaseResult;

/// Frequency of bin `k` in Hz
pub fn bin_frequency(k: usize, sample_rate: f64, num_points: usize) -> f64 {
    k as f64 * sample_rate / num_points as f64
}

/// Bin whose centre is closest to `frequency_hz`
pub fn nearest_bin(frequency_hz: f64, sample_rate: f64, num_points: usize) -> usize {
    (frequency_hz * num_points as f64 / sample_rate).round().max(0.0) as usize
}

/// Phase the bin gains on the tone over one buffer, in degrees (not wrapped)
pub fn theoretical_offset_degrees(
    k: usize,
    signal_frequency_hz: f64,
    sample_rate: f64,
    num_points: usize,
) -> f64 {
    let f_bin = bin_frequency(k, sample_rate, num_points);
    360.0 * (f_bin - signal_frequency_hz) * num_points as f64 / sample_rate
}

/// Result of running the reference tone through the pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredOffset {
    /// Phase the reference reads as with no calibration, in [0, 360)
    pub offset_degrees: f64,
    /// Bin the extractor actually read; `None` under the zero-phase fallback
    pub bin: Option<usize>,
}

/// Empirical offset: the phase a clean 0° sine at the target frequency reads as
/// under `config` with no calibration applied. Feed it back as
/// `calibration_offset_degrees` to make that tone read 0°.
pub fn measure_offset(config: &ExtractorConfig, num_points: usize) -> PhaseResult<MeasuredOffset> {
    let reference = SineWave {
        num_points,
        rms_amplitude: 1.0,
        frequency_hz: config.target_frequency_hz,
        sample_rate: config.sample_rate,
        phase_degrees: 0.0,
        noise_amplitude: 0.0,
        seed: 0,
    };

    let uncalibrated = ExtractorConfig {
        calibration_offset_degrees: 0.0,
        ..config.clone()
    };
    let measurement = PhaseExtractor::new(uncalibrated).measure(&reference.samples())?;
    let offset = normalize_degrees(measurement.raw_angle_degrees);
    debug!(
        "measured offset {:.6}° at bin {:?} ({} window)",
        offset, measurement.bin, config.window
    );
    Ok(MeasuredOffset {
        offset_degrees: offset,
        bin: measurement.bin,
    })
}
