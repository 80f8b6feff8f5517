//! Configuration module for binphase

mod profiles;

pub use profiles::{
    ExtractorConfig, ProfileBuilder, ProfilePreset, DEFAULT_SAMPLE_RATE, DEFAULT_TARGET_BIN,
    DEFAULT_TARGET_FREQUENCY, FLAT_TOP_BIN9_OFFSET, HANN_BIN9_OFFSET,
};
