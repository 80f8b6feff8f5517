// src/core/sweep.rs
//
// Phase sweep: synthesize one tone per phase step and check what the
// extractor reads back. Each step owns its buffer, so steps run in parallel.

use log::info;
use rayon::prelude::*;
use serde::Serialize;

use super::phase::{wrapped_difference, PhaseExtractor};
use super::signal::SineWave;
use crate::error::{InvalidInput, PhaseResult};

/// Upper bound on the number of steps in one sweep
pub const MAX_SWEEP_STEPS: usize = 1_000_000;

/// Phase range to sweep, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for SweepRange {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 360.0,
            step: 1.0,
        }
    }
}

impl SweepRange {
    /// Phases `start, start + step, ...` strictly below `end`
    pub fn phases(&self) -> Result<Vec<f64>, InvalidInput> {
        if !(self.step > 0.0) || !(self.end > self.start) {
            return Ok(Vec::new());
        }
        let steps = ((self.end - self.start) / self.step).ceil();
        if !(steps <= MAX_SWEEP_STEPS as f64) {
            return Err(InvalidInput::TooManySweepSteps {
                steps,
                limit: MAX_SWEEP_STEPS,
            });
        }
        Ok((0..steps as usize)
            .map(|i| self.start + i as f64 * self.step)
            .filter(|p| *p < self.end)
            .collect())
    }
}

/// One step of a sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub signal_phase: f64,
    pub computed_phase: f64,
    /// computed − signal, wrapped into (−180, 180]
    pub error: f64,
}

/// Aggregate error over a sweep
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepSummary {
    pub count: usize,
    pub max_abs_error: f64,
    pub mean_abs_error: f64,
    pub rms_error: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub points: Vec<SweepPoint>,
    pub summary: SweepSummary,
}

impl SweepSummary {
    pub fn from_points(points: &[SweepPoint]) -> Self {
        if points.is_empty() {
            return Self::default();
        }
        let n = points.len() as f64;
        let max_abs_error = points.iter().map(|p| p.error.abs()).fold(0.0, f64::max);
        let mean_abs_error = points.iter().map(|p| p.error.abs()).sum::<f64>() / n;
        let rms_error = (points.iter().map(|p| p.error * p.error).sum::<f64>() / n).sqrt();

        Self {
            count: points.len(),
            max_abs_error,
            mean_abs_error,
            rms_error,
        }
    }
}

/// Run `extractor` over `wave` at every phase in `range`
pub fn run_sweep(
    extractor: &PhaseExtractor,
    wave: &SineWave,
    range: SweepRange,
) -> PhaseResult<SweepReport> {
    let phases = range.phases()?;
    info!(
        "sweeping {} phases from {:.1}° to {:.1}° ({} points per buffer)",
        phases.len(),
        range.start,
        range.end,
        wave.num_points
    );

    let points = phases
        .par_iter()
        .enumerate()
        .map(|(i, &phase)| {
            let computed = extractor.extract(&wave.step_tone(i, phase).samples())?;
            Ok(SweepPoint {
                signal_phase: phase,
                computed_phase: computed,
                error: wrapped_difference(computed, phase),
            })
        })
        .collect::<PhaseResult<Vec<_>>>()?;

    let summary = SweepSummary::from_points(&points);
    Ok(SweepReport { points, summary })
}
