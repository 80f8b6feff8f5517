//! Digital Signal Processing utilities

mod fft;
pub mod windows;

pub use fft::{compute_dft, Spectrum};
pub use windows::{apply_window, create_window, WindowType};
