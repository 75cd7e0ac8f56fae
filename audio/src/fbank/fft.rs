//! Power spectrum of real frames via `rustfft`.
//!
//! Unlike a radix-2 transform, the planner handles any FFT length, so sizes
//! such as 4800 (100ms @ 48kHz) need no rounding.

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Planned forward FFT producing one-sided power spectra.
pub struct PowerSpectrum {
    fft_size: usize,
    fft: Arc<dyn Fft<f64>>,
}

impl PowerSpectrum {
    pub fn new(fft_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        Self { fft_size, fft }
    }

    /// Number of output bins: `fft_size / 2 + 1`.
    pub fn bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Writes `|X[k]|^2 / fft_size` for the non-negative frequencies into `out`.
    ///
    /// `frame` is zero-padded to the FFT size; it must not be longer.
    pub fn compute(&self, frame: &[f64], out: &mut [f64]) {
        debug_assert!(frame.len() <= self.fft_size);
        debug_assert_eq!(out.len(), self.bins());

        let mut buffer: Vec<Complex<f64>> = (0..self.fft_size)
            .map(|i| Complex::new(frame.get(i).copied().unwrap_or(0.0), 0.0))
            .collect();
        self.fft.process(&mut buffer);

        let scale = 1.0 / self.fft_size as f64;
        for (o, c) in out.iter_mut().zip(buffer.iter()) {
            *o = c.norm_sqr() * scale;
        }
    }
}
