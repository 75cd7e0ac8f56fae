//! Mel-scale utilities and filterbank generation.

use std::f64::consts::PI;

/// Generates a Hamming window of the given length.
pub fn hamming_window(n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![1.0; n];
    }
    (0..n)
        .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f64 / (n - 1) as f64).cos())
        .collect()
}

/// Converts frequency in Hz to mel scale.
fn hz_to_mel(hz: f64) -> f64 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Converts mel scale frequency back to Hz.
fn mel_to_hz(mel: f64) -> f64 {
    700.0 * (10.0_f64.powf(mel / 2595.0) - 1.0)
}

/// Creates the triangular mel filterbank.
///
/// Returns `[num_filters][half_fft]` where `half_fft = fft_size / 2 + 1`.
/// Filter edges sit on bins `floor((fft_size + 1) * hz / sample_rate)`.
/// Adjacent edges may collapse onto one bin for narrow low bands; such a
/// filter side is simply empty.
pub fn mel_filter_bank(
    num_filters: usize,
    fft_size: usize,
    sample_rate: u32,
    low_freq: f64,
    high_freq: f64,
) -> Vec<Vec<f64>> {
    let half_fft = fft_size / 2 + 1;
    let low_mel = hz_to_mel(low_freq);
    let high_mel = hz_to_mel(high_freq);

    // num_filters + 2 equally spaced mel points
    let step = (high_mel - low_mel) / (num_filters + 1) as f64;
    let bins: Vec<usize> = (0..num_filters + 2)
        .map(|i| {
            let hz = mel_to_hz(low_mel + i as f64 * step);
            let bin = ((fft_size + 1) as f64 * hz / sample_rate as f64).floor() as usize;
            bin.min(half_fft - 1)
        })
        .collect();

    let mut bank = Vec::with_capacity(num_filters);
    for m in 0..num_filters {
        let mut filter = vec![0.0f64; half_fft];
        let left = bins[m];
        let center = bins[m + 1];
        let right = bins[m + 2];

        for k in left..center {
            filter[k] = (k - left) as f64 / (center - left) as f64;
        }
        for k in center..right {
            filter[k] = (right - k) as f64 / (right - center) as f64;
        }
        bank.push(filter);
    }
    bank
}
