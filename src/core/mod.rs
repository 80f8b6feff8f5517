//! Core signal handling and phase extraction

pub mod calibration;
pub mod dsp;
pub mod phase;
pub mod signal;
pub mod sweep;

pub use dsp::{compute_dft, Spectrum, WindowType};
pub use phase::{
    compute_phase_degrees, extract_phase, normalize_degrees, select_bin_index, BinSelection,
    OutOfRangePolicy, PhaseExtractor, PhaseMeasurement,
};
pub use signal::{Signal, SineWave};
pub use sweep::{run_sweep, SweepPoint, SweepRange, SweepReport, SweepSummary};
