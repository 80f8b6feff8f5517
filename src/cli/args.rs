//! CLI argument parsing with profile support

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{ExtractorConfig, ProfileBuilder, ProfilePreset};
use crate::core::dsp::WindowType;
use crate::core::phase::OutOfRangePolicy;
use crate::core::signal::SineWave;
use crate::core::sweep::SweepRange;

#[derive(Parser, Debug)]
#[command(name = "binphase")]
#[command(version, about = "Extract the calibrated phase of a DFT bin from sampled sine signals")]
pub struct Cli {
    /// Debug logging for every pipeline stage
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read a sample file and report the phase of the selected bin
    Extract(ExtractArgs),
    /// Synthesize a noisy sine wave and write it as a sample file
    Generate(GenerateArgs),
    /// Extract the phase of synthetic tones across a range of phases
    Sweep(SweepArgs),
    /// Print the theoretical and measured calibration offset for a setup
    Calibrate(CalibrateArgs),
    /// Write window coefficients
    Window(WindowArgs),
    /// List available profiles and exit
    Profiles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WindowFormat {
    /// One coefficient per line
    Lines,
    /// C array initialiser, eight values per line
    C,
}

/// Options shared by every command that runs the extractor
#[derive(Args, Debug, Clone)]
pub struct ExtractorArgs {
    /// Base profile (hann, flattop, rectangular, peak)
    #[arg(long, default_value = "hann", env = "BINPHASE_PROFILE")]
    pub profile: String,

    /// JSON config file; replaces the profile, flags below still apply
    #[arg(long, env = "BINPHASE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Sample rate in Hz
    #[arg(long)]
    pub sample_rate: Option<f64>,

    /// Nominal signal frequency in Hz
    #[arg(long)]
    pub target_frequency: Option<f64>,

    /// Read this bin
    #[arg(long, conflicts_with = "max_energy")]
    pub bin: Option<usize>,

    /// Read the bin with the most energy
    #[arg(long)]
    pub max_energy: bool,

    /// Calibration offset in degrees, subtracted from the bin angle
    #[arg(long, allow_hyphen_values = true)]
    pub offset: Option<f64>,

    /// Window function (rectangular, hann, hamming, blackman, flattop)
    #[arg(long)]
    pub window: Option<String>,

    /// Report phase 0 instead of failing when the bin is at or above N/2
    #[arg(long)]
    pub zero_out_of_range: bool,
}

impl ExtractorArgs {
    /// Profile or config file first, then individual overrides
    pub fn resolve(&self) -> Result<ExtractorConfig> {
        let base = match &self.config {
            Some(path) => ExtractorConfig::load(path)?,
            None => {
                let preset = ProfilePreset::from_name(&self.profile)
                    .ok_or_else(|| anyhow!("Unknown profile: {}", self.profile))?;
                ExtractorConfig::from_preset(preset)
            }
        };

        let mut builder = ProfileBuilder::from_config(base);
        if let Some(rate) = self.sample_rate {
            builder = builder.sample_rate(rate);
        }
        if let Some(freq) = self.target_frequency {
            builder = builder.target_frequency(freq);
        }
        if let Some(k) = self.bin {
            builder = builder.fixed_bin(k);
        }
        if self.max_energy {
            builder = builder.max_energy_bin();
        }
        if let Some(offset) = self.offset {
            builder = builder.calibration_offset(offset);
        }
        if let Some(name) = &self.window {
            let window =
                WindowType::from_name(name).ok_or_else(|| anyhow!("Unknown window: {}", name))?;
            builder = builder.window(window);
        }
        if self.zero_out_of_range {
            builder = builder.out_of_range(OutOfRangePolicy::ZeroPhase);
        }

        Ok(builder.build()?)
    }
}

/// Tone parameters; frequency and rate come from the extractor setup when sweeping
#[derive(Args, Debug, Clone)]
pub struct ToneArgs {
    /// Number of samples
    #[arg(long, default_value_t = 2048)]
    pub points: usize,

    /// RMS amplitude in volts
    #[arg(long, default_value_t = 0.025)]
    pub rms: f64,

    /// Uniform noise amplitude (0 disables noise)
    #[arg(long, default_value_t = 0.002)]
    pub noise: f64,

    /// Noise seed
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Sample file, one sample per line
    pub input: PathBuf,

    #[command(flatten)]
    pub extractor: ExtractorArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the spectrum below Nyquist (index freq re im magnitude)
    #[arg(long)]
    pub spectrum_out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Output sample file
    pub output: PathBuf,

    #[command(flatten)]
    pub tone: ToneArgs,

    /// Tone frequency in Hz
    #[arg(long, default_value_t = 50.0)]
    pub frequency: f64,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 11718.75)]
    pub sample_rate: f64,

    /// Initial phase in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub phase: f64,
}

impl GenerateArgs {
    pub fn sine_wave(&self) -> SineWave {
        SineWave {
            num_points: self.tone.points,
            rms_amplitude: self.tone.rms,
            frequency_hz: self.frequency,
            sample_rate: self.sample_rate,
            phase_degrees: self.phase,
            noise_amplitude: self.tone.noise,
            seed: self.tone.seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub extractor: ExtractorArgs,

    #[command(flatten)]
    pub tone: ToneArgs,

    /// First phase in degrees
    #[arg(long, default_value_t = 0.0)]
    pub start: f64,

    /// Sweep stops below this phase
    #[arg(long, default_value_t = 360.0)]
    pub end: f64,

    /// Phase step in degrees
    #[arg(long, default_value_t = 1.0)]
    pub step: f64,

    /// Also write each tone as sine_wave_<phase>.txt into this directory
    #[arg(long)]
    pub write_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl SweepArgs {
    pub fn range(&self) -> SweepRange {
        SweepRange {
            start: self.start,
            end: self.end,
            step: self.step,
        }
    }

    pub fn sine_wave(&self, config: &ExtractorConfig) -> SineWave {
        SineWave {
            num_points: self.tone.points,
            rms_amplitude: self.tone.rms,
            frequency_hz: config.target_frequency_hz,
            sample_rate: config.sample_rate,
            phase_degrees: self.start,
            noise_amplitude: self.tone.noise,
            seed: self.tone.seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct CalibrateArgs {
    #[command(flatten)]
    pub extractor: ExtractorArgs,

    /// Buffer length
    #[arg(long, default_value_t = 2048)]
    pub points: usize,
}

#[derive(Args, Debug)]
pub struct WindowArgs {
    /// Window function
    #[arg(long = "type", default_value = "flattop")]
    pub window_type: String,

    #[arg(long, default_value_t = 2048)]
    pub points: usize,

    #[arg(long, value_enum, default_value_t = WindowFormat::Lines)]
    pub format: WindowFormat,

    /// Output file (stdout if omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}
