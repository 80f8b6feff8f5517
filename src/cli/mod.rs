// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod output;

pub use args::{Cli, Command, ExtractorArgs, OutputFormat, WindowFormat};
pub use output::{format_json, format_measurement, format_sweep, print_profiles, ExtractReport};

use anyhow::{Context, Result};
use colorful::Colorful;
use log::info;
use std::fs;

use crate::core::calibration::{
    bin_frequency, measure_offset, nearest_bin, theoretical_offset_degrees,
};
use crate::core::dsp::windows::{create_window, format_c_array};
use crate::core::dsp::WindowType;
use crate::core::phase::{BinSelection, PhaseExtractor};
use crate::core::signal::Signal;
use crate::core::sweep::run_sweep;

use args::{CalibrateArgs, ExtractArgs, GenerateArgs, SweepArgs, WindowArgs};

/// Run the parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let verbose = cli.verbose;
    match cli.command {
        Command::Extract(args) => run_extract(&args, verbose),
        Command::Generate(args) => run_generate(&args),
        Command::Sweep(args) => run_sweep_command(&args, verbose),
        Command::Calibrate(args) => run_calibrate(&args),
        Command::Window(args) => run_window(&args),
        Command::Profiles => {
            print_profiles();
            Ok(())
        }
    }
}

fn run_extract(args: &ExtractArgs, verbose: bool) -> Result<()> {
    let config = args.extractor.resolve()?;
    let signal = Signal::read(&args.input, config.sample_rate)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    info!(
        "analyzing {} ({} samples, {:.4}s)",
        args.input.display(),
        signal.len(),
        signal.duration_secs()
    );

    let measurement = PhaseExtractor::new(config.clone())
        .measure(signal.samples())
        .with_context(|| format!("Failed to extract phase from {}", args.input.display()))?;

    if let Some(path) = &args.spectrum_out {
        output::write_spectrum(path, &measurement, &config)
            .with_context(|| format!("Failed to write spectrum to {}", path.display()))?;
        info!("spectrum written to {}", path.display());
    }

    let input = args.input.display().to_string();
    match args.format {
        OutputFormat::Text => print!(
            "{}",
            format_measurement(&input, &measurement, &config, verbose)
        ),
        OutputFormat::Json => {
            let report = ExtractReport {
                input,
                num_points: signal.len(),
                config: &config,
                measurement: &measurement,
            };
            println!("{}", format_json(&report)?);
        }
    }

    Ok(())
}

fn run_generate(args: &GenerateArgs) -> Result<()> {
    let wave = args.sine_wave();
    let signal = wave.generate().context("Invalid tone parameters")?;
    signal.write(&args.output)?;
    println!(
        "Wrote {} samples of {} Hz at {:.1}° to {}",
        signal.len(),
        wave.frequency_hz,
        wave.phase_degrees,
        args.output.display()
    );
    Ok(())
}

fn run_sweep_command(args: &SweepArgs, verbose: bool) -> Result<()> {
    let config = args.extractor.resolve()?;
    let wave = args.sine_wave(&config);
    let extractor = PhaseExtractor::new(config).with_window_size(wave.num_points);

    if let Some(dir) = &args.write_dir {
        fs::create_dir_all(dir)?;
        for (i, phase) in args.range().phases()?.into_iter().enumerate() {
            let path = dir.join(format!("sine_wave_{:.1}.txt", phase));
            wave.step_tone(i, phase).generate()?.write(&path)?;
        }
    }

    let report = run_sweep(&extractor, &wave, args.range()).context("Sweep failed")?;

    match args.format {
        OutputFormat::Text => print!("{}", format_sweep(&report, verbose)),
        OutputFormat::Json => println!("{}", format_json(&report)?),
    }
    Ok(())
}

fn run_calibrate(args: &CalibrateArgs) -> Result<()> {
    let config = args.extractor.resolve()?;
    let n = args.points;
    let measured = measure_offset(&config, n).context("Failed to measure offset")?;
    let nearest = nearest_bin(config.target_frequency_hz, config.sample_rate, n);
    // describe the bin the measurement read, not the one we expected it to pick
    let bin = measured.bin.unwrap_or(match config.bin_selection {
        BinSelection::FixedBin(k) => k,
        BinSelection::MaxEnergyBin => nearest,
    });
    let theoretical = theoretical_offset_degrees(bin, config.target_frequency_hz, config.sample_rate, n);

    println!(
        "Target {} Hz at {} Hz, {} points, {} window",
        config.target_frequency_hz, config.sample_rate, n, config.window
    );
    println!(
        "  Bin {}: {:.10} Hz (nearest bin to target: {})",
        bin,
        bin_frequency(bin, config.sample_rate, n),
        nearest
    );
    println!("  Theoretical drift: {:.6}°", theoretical);
    println!(
        "  Measured offset:   {}",
        format!("{:.6}°", measured.offset_degrees).green()
    );
    Ok(())
}

fn run_window(args: &WindowArgs) -> Result<()> {
    let window_type = WindowType::from_name(&args.window_type)
        .with_context(|| format!("Unknown window: {}", args.window_type))?;
    let coefficients = create_window(args.points, window_type);

    let text = match args.format {
        WindowFormat::Lines => coefficients
            .iter()
            .map(|c| format!("{:.6}\n", c))
            .collect::<String>(),
        WindowFormat::C => format_c_array(&format!("{}_window", window_type.name()), &coefficients),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {} {} coefficients to {}", args.points, window_type, path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
