// src/config/profiles.rs
//
// Extraction settings and the calibrated presets for the 50 Hz test rig

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::dsp::WindowType;
use crate::core::phase::{BinSelection, OutOfRangePolicy};
use crate::error::InvalidInput;

/// ADC rate that places 50 Hz closest to bin 9 of a 2048-point buffer
pub const DEFAULT_SAMPLE_RATE: f64 = 11718.75;
pub const DEFAULT_TARGET_FREQUENCY: f64 = 50.0;
pub const DEFAULT_TARGET_BIN: usize = 9;
/// Measured phase lag of bin 9 behind a 0° 50 Hz sine under a Hann window
pub const HANN_BIN9_OFFSET: f64 = 222.884444;
/// Same measurement under the flat-top window
pub const FLAT_TOP_BIN9_OFFSET: f64 = -137.1126;

/// Preset profiles for common rigs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfilePreset {
    /// Hann window, bin 9, calibrated offset
    Hann,
    /// Flat-top window, bin 9, calibrated offset
    FlatTop,
    /// No window, bin 9, Hann offset (leaks just under a degree)
    Rectangular,
    /// No window, strongest bin, no calibration
    Peak,
    /// User-defined settings
    Custom,
}

impl ProfilePreset {
    pub fn all() -> [Self; 4] {
        [Self::Hann, Self::FlatTop, Self::Rectangular, Self::Peak]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProfilePreset::Hann => "hann",
            ProfilePreset::FlatTop => "flattop",
            ProfilePreset::Rectangular => "rectangular",
            ProfilePreset::Peak => "peak",
            ProfilePreset::Custom => "custom",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProfilePreset::Hann => "Hann window, fixed bin 9, calibrated for 50 Hz",
            ProfilePreset::FlatTop => "Flat-top window, fixed bin 9, calibrated for 50 Hz",
            ProfilePreset::Rectangular => "No window, fixed bin 9, Hann calibration",
            ProfilePreset::Peak => "No window, strongest bin, uncalibrated",
            ProfilePreset::Custom => "User-defined settings",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "hann" | "hanning" | "standard" => Some(Self::Hann),
            "flattop" | "flat_top" | "flat-top" => Some(Self::FlatTop),
            "rectangular" | "rect" | "none" => Some(Self::Rectangular),
            "peak" | "max" | "max_energy" => Some(Self::Peak),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Complete extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Sampling rate in Hz
    pub sample_rate: f64,
    /// Nominal frequency of the measured signal in Hz
    pub target_frequency_hz: f64,
    pub bin_selection: BinSelection,
    /// Subtracted from the raw bin angle before wrapping
    pub calibration_offset_degrees: f64,
    pub window: WindowType,
    pub out_of_range: OutOfRangePolicy,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self::from_preset(ProfilePreset::Hann)
    }
}

impl ExtractorConfig {
    /// Create config from preset
    pub fn from_preset(preset: ProfilePreset) -> Self {
        let base = Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            target_frequency_hz: DEFAULT_TARGET_FREQUENCY,
            bin_selection: BinSelection::FixedBin(DEFAULT_TARGET_BIN),
            calibration_offset_degrees: HANN_BIN9_OFFSET,
            window: WindowType::Hann,
            out_of_range: OutOfRangePolicy::Reject,
        };

        match preset {
            ProfilePreset::Hann | ProfilePreset::Custom => base,
            ProfilePreset::FlatTop => Self {
                window: WindowType::FlatTop,
                calibration_offset_degrees: FLAT_TOP_BIN9_OFFSET,
                ..base
            },
            ProfilePreset::Rectangular => Self {
                window: WindowType::Rectangular,
                ..base
            },
            ProfilePreset::Peak => Self {
                window: WindowType::Rectangular,
                bin_selection: BinSelection::MaxEnergyBin,
                calibration_offset_degrees: 0.0,
                ..base
            },
        }
    }

    /// Load a JSON config; missing fields take the Hann preset values
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading extractor config {}", path_ref.display()))?;
        let config: ExtractorConfig = serde_json::from_str(&contents)
            .with_context(|| format!("parsing extractor config {}", path_ref.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InvalidInput> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(InvalidInput::InvalidSampleRate(self.sample_rate));
        }
        if !self.calibration_offset_degrees.is_finite() {
            return Err(InvalidInput::InvalidCalibrationOffset(
                self.calibration_offset_degrees,
            ));
        }
        Ok(())
    }

    /// Frequency of bin `k` in a `num_points` transform
    pub fn bin_frequency(&self, k: usize, num_points: usize) -> f64 {
        k as f64 * self.sample_rate / num_points as f64
    }
}

/// Builder for custom configs
pub struct ProfileBuilder {
    config: ExtractorConfig,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self {
            config: ExtractorConfig::default(),
        }
    }

    pub fn from_preset(preset: ProfilePreset) -> Self {
        Self {
            config: ExtractorConfig::from_preset(preset),
        }
    }

    pub fn from_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn sample_rate(mut self, hz: f64) -> Self {
        self.config.sample_rate = hz;
        self
    }

    pub fn target_frequency(mut self, hz: f64) -> Self {
        self.config.target_frequency_hz = hz;
        self
    }

    pub fn fixed_bin(mut self, k: usize) -> Self {
        self.config.bin_selection = BinSelection::FixedBin(k);
        self
    }

    pub fn max_energy_bin(mut self) -> Self {
        self.config.bin_selection = BinSelection::MaxEnergyBin;
        self
    }

    pub fn calibration_offset(mut self, degrees: f64) -> Self {
        self.config.calibration_offset_degrees = degrees;
        self
    }

    pub fn window(mut self, window: WindowType) -> Self {
        self.config.window = window;
        self
    }

    pub fn out_of_range(mut self, policy: OutOfRangePolicy) -> Self {
        self.config.out_of_range = policy;
        self
    }

    pub fn build(self) -> Result<ExtractorConfig, InvalidInput> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
