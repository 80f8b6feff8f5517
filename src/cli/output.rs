//! Output formatting for CLI results

use colorful::Colorful;
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::{ExtractorConfig, ProfilePreset};
use crate::core::phase::PhaseMeasurement;
use crate::core::sweep::SweepReport;

/// Everything `extract --format json` prints
#[derive(Debug, Serialize)]
pub struct ExtractReport<'a> {
    pub input: String,
    pub num_points: usize,
    pub config: &'a ExtractorConfig,
    pub measurement: &'a PhaseMeasurement,
}

/// Format a measurement for terminal output
pub fn format_measurement(
    input: &str,
    measurement: &PhaseMeasurement,
    config: &ExtractorConfig,
    verbose: bool,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", input.to_string().bold()));

    match (measurement.bin, measurement.bin_frequency_hz) {
        (Some(bin), Some(freq)) => {
            output.push_str(&format!(
                "  Phase: {}\n",
                format!("{:.4}°", measurement.phase_degrees).green()
            ));
            output.push_str(&format!("  Bin: {} ({:.4} Hz)\n", bin, freq));
        }
        _ => {
            output.push_str(&format!(
                "  Phase: {}\n",
                "0.0000° (bin out of range)".to_string().yellow()
            ));
        }
    }

    if verbose {
        output.push_str("\n  Technical Details:\n");
        output.push_str(&format!(
            "    Selection: {} | Window: {}\n",
            config.bin_selection, config.window
        ));
        output.push_str(&format!(
            "    Raw angle: {:.4}° | Offset: {:.6}°\n",
            measurement.raw_angle_degrees, config.calibration_offset_degrees
        ));
        output.push_str(&format!(
            "    Bin value: {:.6} {:+.6}i | Magnitude: {:.6}\n",
            measurement.value.re, measurement.value.im, measurement.magnitude
        ));
        output.push_str(&format!(
            "    Sample rate: {} Hz | Target: {} Hz\n",
            config.sample_rate, config.target_frequency_hz
        ));
    }

    output
}

pub fn format_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Table of a sweep plus its summary
pub fn format_sweep(report: &SweepReport, verbose: bool) -> String {
    let mut output = String::new();

    for point in &report.points {
        output.push_str(&format!(
            "Signal phase: {:.4}, Computed phase {:.4}",
            point.signal_phase, point.computed_phase
        ));
        if verbose {
            output.push_str(&format!(" (error {:+.4})", point.error));
        }
        output.push('\n');
    }

    let s = &report.summary;
    output.push_str(&format!(
        "\n{} phases | max |error| {} | mean |error| {:.4}° | rms {:.4}°\n",
        s.count,
        format!("{:.4}°", s.max_abs_error).cyan(),
        s.mean_abs_error,
        s.rms_error
    ));

    output
}

/// Print available profiles
pub fn print_profiles() {
    println!("Available extraction profiles:\n");

    for preset in ProfilePreset::all() {
        let config = ExtractorConfig::from_preset(preset);
        println!("  {} - {}", preset.name().bold(), preset.description());
        println!(
            "    Selection: {} | Window: {} | Offset: {}°",
            config.bin_selection, config.window, config.calibration_offset_degrees
        );
        println!(
            "    Sample rate: {} Hz | Target: {} Hz",
            config.sample_rate, config.target_frequency_hz
        );
        println!();
    }
}

/// Write `index frequency re im magnitude` for every bin below Nyquist
pub fn write_spectrum(
    path: &Path,
    measurement: &PhaseMeasurement,
    config: &ExtractorConfig,
) -> std::io::Result<()> {
    let spectrum = &measurement.spectrum;
    let mut writer = BufWriter::new(fs::File::create(path)?);

    for (k, c) in spectrum.bins()[..spectrum.usable_bins()].iter().enumerate() {
        writeln!(
            writer,
            "{} {:.6} {:.6} {:.6} {:.6}",
            k,
            config.bin_frequency(k, spectrum.len()),
            c.re,
            c.im,
            c.norm()
        )?;
    }

    writer.flush()
}
