// tests/phase_properties_test.rs
//
// End-to-end properties of the extraction pipeline through the public API.
//
// Usage:
//   cargo test --test phase_properties_test

mod test_utils;

use binphase::{
    extract_phase, BinSelection, ExtractorConfig, InvalidInput, OutOfRangePolicy, PhaseError,
    PhaseExtractor, ProfileBuilder, ProfilePreset, SineWave, WindowType,
};
use test_utils::{angle_error, cosine, sine, RIG_POINTS, RIG_SAMPLE_RATE};

const RIG_OFFSET: f64 = 222.884444;

// ============================================================================
// Output range and degenerate bins
// ============================================================================

#[test]
fn phase_is_always_in_range() {
    let offsets = [-1000.0, -360.0, -0.0, 0.0, 1e-12, 222.884444, 359.999999, 360.0, 7200.5];
    let lengths = [2usize, 3, 17, 64, 1000, 2048];

    for &n in &lengths {
        for seed in 0..4u64 {
            let wave = SineWave {
                num_points: n,
                noise_amplitude: 0.01,
                phase_degrees: seed as f64 * 97.0,
                seed,
                ..SineWave::default()
            };
            let samples = wave.samples();
            for &offset in &offsets {
                for selection in [BinSelection::FixedBin(0), BinSelection::FixedBin(n / 2 - 1), BinSelection::MaxEnergyBin] {
                    let phase = extract_phase(&samples, None, selection, offset).unwrap();
                    assert!(
                        (0.0..360.0).contains(&phase),
                        "n={} offset={} {:?} gave {}",
                        n,
                        offset,
                        selection,
                        phase
                    );
                }
            }
        }
    }
}

#[test]
fn silent_signal_reads_exactly_zero() {
    let samples = vec![0.0; RIG_POINTS];
    for offset in [0.0, RIG_OFFSET, -45.0] {
        let phase = extract_phase(&samples, None, BinSelection::FixedBin(9), offset).unwrap();
        assert_eq!(phase, 0.0);
    }

    // energy far below the threshold on both axes is still degenerate
    let tiny: Vec<f64> = sine(RIG_POINTS, 50.0, RIG_SAMPLE_RATE, 10.0)
        .iter()
        .map(|s| s * 1e-16)
        .collect();
    let phase = extract_phase(&tiny, None, BinSelection::FixedBin(9), RIG_OFFSET).unwrap();
    assert_eq!(phase, 0.0);
}

// ============================================================================
// Calibration
// ============================================================================

#[test]
fn calibration_offset_shifts_phase_linearly() {
    let samples = SineWave { phase_degrees: 33.0, ..SineWave::default() }.samples();
    let base = extract_phase(&samples, None, BinSelection::FixedBin(9), 10.0).unwrap();

    for delta in [0.5, 45.0, 179.0, 300.0, 725.25, -90.0] {
        let shifted = extract_phase(&samples, None, BinSelection::FixedBin(9), 10.0 + delta).unwrap();
        assert!(
            angle_error(shifted, base - delta).abs() < 1e-9,
            "delta {} moved {} to {}",
            delta,
            base,
            shifted
        );
    }
}

#[test]
fn bin_aligned_tone_round_trips() {
    let k = 8;
    let freq = k as f64 * RIG_SAMPLE_RATE / RIG_POINTS as f64;

    for input_phase in [0.0, 1.0, 89.5, 180.0, 271.25, 359.0] {
        for offset in [0.0, RIG_OFFSET, -30.0] {
            let samples = cosine(RIG_POINTS, freq, RIG_SAMPLE_RATE, input_phase);
            let phase = extract_phase(&samples, None, BinSelection::FixedBin(k), offset).unwrap();
            let expected = (input_phase - offset).rem_euclid(360.0);
            assert!(
                angle_error(phase, expected).abs() < 1e-6,
                "input {} offset {}: got {}, expected {}",
                input_phase,
                offset,
                phase,
                expected
            );
        }
    }
}

#[test]
fn sine_reads_ninety_degrees_behind_cosine() {
    let freq = 8.0 * RIG_SAMPLE_RATE / RIG_POINTS as f64;
    let samples = sine(RIG_POINTS, freq, RIG_SAMPLE_RATE, 40.0);
    let phase = extract_phase(&samples, None, BinSelection::FixedBin(8), 0.0).unwrap();
    assert!(angle_error(phase, 310.0).abs() < 1e-6);
}

#[test]
fn fifty_hz_reference_scenario() {
    let samples = sine(RIG_POINTS, 50.0, RIG_SAMPLE_RATE, 0.0);
    let config = ProfileBuilder::from_preset(ProfilePreset::Rectangular)
        .build()
        .unwrap();
    let m = PhaseExtractor::new(config).measure(&samples).unwrap();

    assert_eq!(m.bin, Some(9));
    assert!((m.bin_frequency_hz.unwrap() - 51.4984130859375).abs() < 1e-9);
    assert!((m.raw_angle_degrees + 136.270171).abs() < 1e-3);
    assert!((m.phase_degrees - 0.845385).abs() < 1e-3);
}

#[test]
fn calibrated_presets_track_noisy_sweep() {
    for preset in [ProfilePreset::Hann, ProfilePreset::FlatTop] {
        let extractor = PhaseExtractor::new(ExtractorConfig::from_preset(preset)).with_window_size(RIG_POINTS);
        for step in 0..36 {
            let input = step as f64 * 10.0;
            let samples = SineWave {
                phase_degrees: input,
                seed: step,
                ..SineWave::default()
            }
            .samples();
            let phase = extractor.extract(&samples).unwrap();
            // 2 mV of noise on a 35 mV peak costs well under a degree
            assert!(
                angle_error(phase, input).abs() < 0.5,
                "{:?}: input {} read as {}",
                preset,
                input,
                phase
            );
        }
    }
}

// ============================================================================
// Bin selection
// ============================================================================

#[test]
fn max_energy_bin_finds_the_tone() {
    let samples = SineWave::default().samples();
    let config = ProfileBuilder::from_preset(ProfilePreset::Peak).build().unwrap();
    let m = PhaseExtractor::new(config).measure(&samples).unwrap();
    assert_eq!(m.bin, Some(9));
}

#[test]
fn fixed_bin_reads_requested_bin_even_without_energy() {
    let samples = SineWave { noise_amplitude: 0.0, ..SineWave::default() }.samples();
    let config = ProfileBuilder::new()
        .fixed_bin(300)
        .window(WindowType::Rectangular)
        .build()
        .unwrap();
    let m = PhaseExtractor::new(config).measure(&samples).unwrap();
    assert_eq!(m.bin, Some(300));
    assert!(m.magnitude < 1.0);
}

#[test]
fn out_of_range_bin_policy() {
    let samples = SineWave::default().samples();

    for bin in [RIG_POINTS / 2, RIG_POINTS - 1, RIG_POINTS, 10 * RIG_POINTS] {
        let reject = ProfileBuilder::new().fixed_bin(bin).build().unwrap();
        assert_eq!(
            PhaseExtractor::new(reject).extract(&samples),
            Err(PhaseError::InvalidInput(InvalidInput::BinOutOfRange {
                bin,
                limit: RIG_POINTS / 2
            }))
        );

        let zero = ProfileBuilder::new()
            .fixed_bin(bin)
            .out_of_range(OutOfRangePolicy::ZeroPhase)
            .build()
            .unwrap();
        assert_eq!(PhaseExtractor::new(zero).extract(&samples), Ok(0.0));
    }
}

#[test]
fn single_sample_has_no_usable_bin() {
    let err = extract_phase(&[1.0], None, BinSelection::MaxEnergyBin, 0.0).unwrap_err();
    assert_eq!(err, PhaseError::InvalidInput(InvalidInput::NoUsableBins { len: 1 }));
    assert_eq!(err.to_string(), "invalid input: a 1-point signal has no usable bins");

    let err = extract_phase(&[1.0], None, BinSelection::FixedBin(0), 0.0).unwrap_err();
    assert_eq!(
        err,
        PhaseError::InvalidInput(InvalidInput::BinOutOfRange { bin: 0, limit: 0 })
    );
}

// ============================================================================
// Invalid input
// ============================================================================

#[test]
fn empty_signal_is_invalid_input() {
    assert_eq!(
        extract_phase(&[], None, BinSelection::FixedBin(0), 0.0),
        Err(PhaseError::InvalidInput(InvalidInput::EmptySignal))
    );
    assert_eq!(
        extract_phase(&[], None, BinSelection::MaxEnergyBin, 0.0),
        Err(PhaseError::InvalidInput(InvalidInput::EmptySignal))
    );
}

#[test]
fn non_finite_offset_is_invalid_input() {
    let samples = SineWave::default().samples();
    for offset in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let result = extract_phase(&samples, None, BinSelection::FixedBin(9), offset);
        assert!(
            matches!(
                result,
                Err(PhaseError::InvalidInput(InvalidInput::InvalidCalibrationOffset(_)))
            ),
            "offset {} gave {:?}",
            offset,
            result
        );
    }
}

#[test]
fn hand_built_config_with_bad_sample_rate_is_rejected() {
    let samples = SineWave::default().samples();
    for rate in [0.0, -RIG_SAMPLE_RATE, f64::INFINITY] {
        let config = ExtractorConfig {
            sample_rate: rate,
            ..ExtractorConfig::default()
        };
        assert_eq!(
            PhaseExtractor::new(config).measure(&samples).map(|m| m.phase_degrees),
            Err(PhaseError::InvalidInput(InvalidInput::InvalidSampleRate(rate)))
        );
    }
}

#[test]
fn window_length_mismatch_is_invalid_input() {
    let samples = vec![0.5; 64];
    let window = vec![1.0; 63];
    assert_eq!(
        extract_phase(&samples, Some(&window), BinSelection::FixedBin(1), 0.0),
        Err(PhaseError::InvalidInput(InvalidInput::WindowLengthMismatch {
            signal: 64,
            window: 63
        }))
    );
}

#[test]
fn explicit_window_matches_configured_window() {
    let samples = SineWave { phase_degrees: 123.0, ..SineWave::default() }.samples();
    let window = binphase::core::dsp::create_window(RIG_POINTS, WindowType::Hann);

    let explicit = extract_phase(&samples, Some(&window), BinSelection::FixedBin(9), RIG_OFFSET).unwrap();
    let configured = PhaseExtractor::new(ExtractorConfig::from_preset(ProfilePreset::Hann))
        .extract(&samples)
        .unwrap();
    assert_eq!(explicit.to_bits(), configured.to_bits());
}

// ============================================================================
// Statelessness
// ============================================================================

#[test]
fn repeated_extraction_is_bit_identical() {
    let samples = SineWave { phase_degrees: 271.0, seed: 3, ..SineWave::default() }.samples();
    let extractor = PhaseExtractor::new(ExtractorConfig::default());

    let first = extractor.extract(&samples).unwrap();
    let second = extractor.extract(&samples).unwrap();
    let fresh = PhaseExtractor::new(ExtractorConfig::default()).extract(&samples).unwrap();

    assert_eq!(first.to_bits(), second.to_bits());
    assert_eq!(first.to_bits(), fresh.to_bits());
}

#[test]
fn extractor_can_be_shared_across_threads() {
    let extractor = PhaseExtractor::new(ExtractorConfig::default()).with_window_size(RIG_POINTS);
    let expected: Vec<f64> = (0..4)
        .map(|i| {
            let samples = SineWave { phase_degrees: i as f64 * 90.0, ..SineWave::default() }.samples();
            extractor.extract(&samples).unwrap()
        })
        .collect();

    let results: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let extractor = &extractor;
                scope.spawn(move || {
                    let samples = SineWave { phase_degrees: i as f64 * 90.0, ..SineWave::default() }.samples();
                    extractor.extract(&samples).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results, expected);
}
