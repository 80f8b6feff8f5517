//! Forward DFT and spectrum access

use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::InvalidInput;

/// Full complex spectrum of a real signal, N bins, unnormalised
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    bins: Vec<Complex<f64>>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn bins(&self) -> &[Complex<f64>] {
        &self.bins
    }

    /// Number of bins usable for phase extraction (below Nyquist)
    pub fn usable_bins(&self) -> usize {
        self.bins.len() / 2
    }

    /// Look up bin `k`, which must be below N
    pub fn bin(&self, k: usize) -> Result<Complex<f64>, InvalidInput> {
        self.bins.get(k).copied().ok_or(InvalidInput::BinOutOfRange {
            bin: k,
            limit: self.bins.len(),
        })
    }

    /// Index of the bin with the largest |X|² below Nyquist; ties resolve to the lower index
    pub fn max_energy_bin(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (k, c) in self.bins[..self.usable_bins()].iter().enumerate() {
            let energy = c.norm_sqr();
            if best.map_or(true, |(_, e)| energy > e) {
                best = Some((k, energy));
            }
        }
        best.map(|(k, _)| k)
    }
}

/// Compute the forward DFT of a real signal: X[k] = Σ x[n]·e^(−2πikn/N)
pub fn compute_dft(samples: &[f64]) -> Spectrum {
    if samples.is_empty() {
        return Spectrum { bins: Vec::new() };
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(samples.len());

    let mut buffer: Vec<Complex<f64>> = samples
        .iter()
        .map(|&s| Complex::new(s, 0.0))
        .collect();

    fft.process(&mut buffer);

    Spectrum { bins: buffer }
}
