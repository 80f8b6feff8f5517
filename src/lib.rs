//! binphase - Calibrated phase extraction from a single DFT bin
//!
//! Takes a buffer of real samples, optionally windows it, runs a forward DFT
//! and reports the phase of one frequency bin in degrees, corrected by a
//! fixed calibration offset and wrapped into [0, 360).
//!
//! ## Features
//!
//! - **Bin selection**: a fixed bin (the intended one) or the bin with the most energy
//! - **Calibration**: subtract a measured or theoretical offset for off-bin tones
//! - **Windows**: Rectangular, Hann, Hamming, Blackman, Flat-top
//! - **Explicit out-of-range policy**: reject, or report 0° like the acquisition firmware
//! - **Test tones**: seeded noisy sine synthesis and the plain sample text format
//! - **Sweeps**: check the whole 0..360° range in parallel
//!
//! ## Module Structure
//!
//! - `core` - DFT, windows, phase extraction, signals, sweeps, calibration
//! - `cli` - Command-line interface
//! - `config` - Extractor configuration and presets
//! - `error` - Error types
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use binphase::{ExtractorConfig, PhaseExtractor, ProfilePreset, SineWave};
//!
//! let config = ExtractorConfig::from_preset(ProfilePreset::Hann);
//! let samples = SineWave { phase_degrees: 30.0, ..SineWave::default() }.samples();
//!
//! let phase = PhaseExtractor::new(config).extract(&samples)?;
//! println!("phase: {:.2}°", phase);
//! ```
//!
//! ## Profiles
//!
//! | Profile     | Bin        | Window      | Offset       |
//! |-------------|------------|-------------|--------------|
//! | hann        | fixed 9    | Hann        | 222.884444°  |
//! | flattop     | fixed 9    | Flat-top    | −137.1126°   |
//! | rectangular | fixed 9    | none        | 222.884444°  |
//! | peak        | max energy | none        | 0°           |
//!
//! All profiles assume a 50 Hz tone sampled at 11718.75 Hz.

// Core analysis functionality
pub mod core;

// Command-line interface
pub mod cli;

// Configuration and profiles
pub mod config;

// Error types
pub mod error;

// Re-export commonly used types at crate root for convenience
pub use crate::config::{ExtractorConfig, ProfileBuilder, ProfilePreset};
pub use crate::core::{
    compute_dft, compute_phase_degrees, extract_phase, normalize_degrees, run_sweep,
    BinSelection, OutOfRangePolicy, PhaseExtractor, PhaseMeasurement, Signal, SineWave,
    Spectrum, SweepRange, SweepReport, WindowType,
};
pub use crate::error::{InvalidInput, PhaseError, PhaseResult, SignalError};
