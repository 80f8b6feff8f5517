// src/error.rs
//
// Error types shared by the extraction pipeline and the sample file reader.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for phase extraction
pub type PhaseResult<T> = Result<T, PhaseError>;

/// Reasons an input buffer or request is rejected before any result is produced
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("signal is empty")]
    EmptySignal,

    #[error("window length {window} does not match signal length {signal}")]
    WindowLengthMismatch { signal: usize, window: usize },

    /// `limit` is the first index that may not be used (N/2 for phase, N for lookup)
    #[error("bin {bin} is out of range (must be below {limit})")]
    BinOutOfRange { bin: usize, limit: usize },

    #[error("sample {index} is not a finite number")]
    NonFiniteSample { index: usize },

    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),

    #[error("calibration offset must be finite, got {0}")]
    InvalidCalibrationOffset(f64),

    /// A transform of `len` points has no bin below Nyquist
    #[error("a {len}-point signal has no usable bins")]
    NoUsableBins { len: usize },

    #[error("sweep would take {steps} steps (at most {limit} allowed)")]
    TooManySweepSteps { steps: f64, limit: usize },
}

/// Errors produced by the extraction pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhaseError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

/// Errors produced while reading or writing sample files
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: cannot parse sample from {content:?}")]
    Parse { line: usize, content: String },

    #[error("{0} contains no samples")]
    Empty(PathBuf),

    #[error(transparent)]
    Phase(#[from] PhaseError),
}

impl From<InvalidInput> for SignalError {
    fn from(err: InvalidInput) -> Self {
        SignalError::Phase(PhaseError::InvalidInput(err))
    }
}
