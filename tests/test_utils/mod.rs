// tests/test_utils/mod.rs
//
// Shared helpers for the integration tests.

#![allow(dead_code)]

use std::f64::consts::PI;
use std::path::PathBuf;
use std::process::{Command, Output};

pub const RIG_POINTS: usize = 2048;
pub const RIG_SAMPLE_RATE: f64 = 11718.75;

/// Noise-free `sin(2πft + φ)`
pub fn sine(n: usize, freq: f64, sample_rate: f64, phase_deg: f64) -> Vec<f64> {
    (0..n)
        .map(|i| (2.0 * PI * freq * i as f64 / sample_rate + phase_deg.to_radians()).sin())
        .collect()
}

/// Noise-free `cos(2πft + φ)`; its DFT angle at an aligned bin is φ itself
pub fn cosine(n: usize, freq: f64, sample_rate: f64, phase_deg: f64) -> Vec<f64> {
    (0..n)
        .map(|i| (2.0 * PI * freq * i as f64 / sample_rate + phase_deg.to_radians()).cos())
        .collect()
}

/// Signed angular distance wrapped into (−180, 180]
pub fn angle_error(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

pub fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_binphase"))
}

pub fn run_binphase(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .env_remove("BINPHASE_PROFILE")
        .env_remove("BINPHASE_CONFIG")
        .output()
        .expect("Failed to execute binphase")
}
