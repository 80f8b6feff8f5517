// src/core/signal.rs
//
// Sample buffers: synthesis of noisy sine waves and the plain-text sample format.

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::{DEFAULT_SAMPLE_RATE, DEFAULT_TARGET_FREQUENCY};
use crate::error::{InvalidInput, SignalError};

/// Uniformly sampled real signal. Never empty, never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate: f64,
}

impl Signal {
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Result<Self, InvalidInput> {
        if samples.is_empty() {
            return Err(InvalidInput::EmptySignal);
        }
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(InvalidInput::InvalidSampleRate(sample_rate));
        }
        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(InvalidInput::NonFiniteSample { index });
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Time of each sample, `index / sample_rate`
    pub fn timestamps(&self) -> Vec<f64> {
        (0..self.samples.len())
            .map(|i| i as f64 / self.sample_rate)
            .collect()
    }

    /// Read one sample per line; the first whitespace-separated field is the sample
    pub fn read<P: AsRef<Path>>(path: P, sample_rate: f64) -> Result<Self, SignalError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SignalError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let samples = parse_samples(&contents)?;
        if samples.is_empty() {
            return Err(SignalError::Empty(path.to_path_buf()));
        }
        debug!("read {} samples from {}", samples.len(), path.display());

        Ok(Self::new(samples, sample_rate)?)
    }

    /// Write `re im` lines with a zero imaginary column
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), SignalError> {
        let path = path.as_ref();
        let io_err = |source| SignalError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = fs::File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        for s in &self.samples {
            writeln!(writer, "{:.6} {:.6}", s, 0.0).map_err(io_err)?;
        }
        writer.flush().map_err(io_err)?;

        info!("wrote {} samples to {}", self.samples.len(), path.display());
        Ok(())
    }
}

/// Parse the sample text format. Blank lines are skipped; extra fields are ignored.
pub fn parse_samples(contents: &str) -> Result<Vec<f64>, SignalError> {
    let mut samples = Vec::new();
    for (i, line) in contents.lines().enumerate() {
        let Some(first) = line.split_whitespace().next() else {
            continue;
        };
        let value: f64 = first.parse().map_err(|_| SignalError::Parse {
            line: i + 1,
            content: line.to_string(),
        })?;
        samples.push(value);
    }
    Ok(samples)
}

/// Parameters of a synthetic test tone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SineWave {
    pub num_points: usize,
    /// RMS amplitude in volts; peak is `rms · √2`
    pub rms_amplitude: f64,
    pub frequency_hz: f64,
    pub sample_rate: f64,
    pub phase_degrees: f64,
    /// Uniform noise in [−noise, noise]; zero disables it
    pub noise_amplitude: f64,
    pub seed: u64,
}

impl Default for SineWave {
    fn default() -> Self {
        Self {
            num_points: 2048,
            rms_amplitude: 0.025,
            frequency_hz: DEFAULT_TARGET_FREQUENCY,
            sample_rate: DEFAULT_SAMPLE_RATE,
            phase_degrees: 0.0,
            noise_amplitude: 0.002,
            seed: 0,
        }
    }
}

impl SineWave {
    /// Tone for step `index` of a sweep: same settings at `phase_degrees`,
    /// with the seed advanced by `index` so each step gets its own noise
    pub fn step_tone(&self, index: usize, phase_degrees: f64) -> Self {
        Self {
            phase_degrees,
            seed: self.seed.wrapping_add(index as u64),
            ..self.clone()
        }
    }

    pub fn peak_amplitude(&self) -> f64 {
        self.rms_amplitude * 2f64.sqrt()
    }

    /// Raw samples; deterministic for a given seed
    pub fn samples(&self) -> Vec<f64> {
        let peak = self.peak_amplitude();
        let phase = self.phase_degrees.to_radians();
        let omega = 2.0 * PI * self.frequency_hz;
        let mut rng = StdRng::seed_from_u64(self.seed);

        (0..self.num_points)
            .map(|i| {
                let t = i as f64 / self.sample_rate;
                let noise = if self.noise_amplitude > 0.0 {
                    rng.gen_range(-self.noise_amplitude..=self.noise_amplitude)
                } else {
                    0.0
                };
                peak * (omega * t + phase).sin() + noise
            })
            .collect()
    }

    pub fn generate(&self) -> Result<Signal, InvalidInput> {
        Signal::new(self.samples(), self.sample_rate)
    }
}
