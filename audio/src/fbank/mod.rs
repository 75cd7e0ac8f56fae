//! Log mel filterbank feature extraction from mono PCM audio.
//!
//! Output is a `[T, num_filters]` f32 matrix of log filterbank energies,
//! one row per analysis frame.
//!
//! Default parameters follow the classic `logfbank` front end:
//! - SampleRate: 16000
//! - WinLen: 0.025 s (400 samples @ 16kHz)
//! - WinStep: 0.01 s (160 samples @ 16kHz)
//! - FFTSize: 512
//! - NumFilters: 26
//! - LowFreq: 0 Hz
//! - HighFreq: Nyquist
//! - PreEmphasis: 0.97
//! - Window: rectangular
//!
//! The hop stays fractional: frame `t` starts at `round(t * hop)`. For a
//! whole-sample hop this matches `logfbank` exactly. For a fractional hop
//! (220.5 samples at 22.05 kHz) `logfbank` rounds the hop once, to 221,
//! so its frames drift and the row count can differ by one. Three seconds
//! at 22.05 kHz gives 299 rows here and 298 from `logfbank`.

mod fft;
mod frame;
mod mel;

pub use frame::round_half_up;

use thiserror::Error;

/// Errors returned by filterbank extraction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FbankError {
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(u32),

    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("fft size {fft_size} is smaller than the frame length of {frame_len} samples")]
    FftTooSmall { fft_size: usize, frame_len: usize },

    #[error("empty signal")]
    EmptySignal,
}

/// Analysis window applied to each frame before the FFT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    /// All ones.
    #[default]
    Rectangular,
    /// 0.54 - 0.46 cos(2πn / (N - 1)).
    Hamming,
}

/// Configuration for mel filterbank extraction.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input sample rate in Hz.
    pub sample_rate: u32,
    /// Frame length in seconds.
    pub win_len: f64,
    /// Frame step in seconds.
    pub win_step: f64,
    /// Number of mel filters, i.e. the width of each output row.
    pub num_filters: usize,
    /// FFT size; must be at least the frame length in samples.
    pub fft_size: usize,
    /// Lowest band edge in Hz.
    pub low_freq: f64,
    /// Highest band edge in Hz; `None` means the Nyquist frequency.
    pub high_freq: Option<f64>,
    /// Pre-emphasis coefficient, 0 disables it.
    pub pre_emphasis: f64,
    pub window: Window,
    /// Filter energies below this value are raised to it before the log.
    pub energy_floor: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            win_len: 0.025,
            win_step: 0.01,
            num_filters: 26,
            fft_size: 512,
            low_freq: 0.0,
            high_freq: None,
            pre_emphasis: 0.97,
            window: Window::Rectangular,
            energy_floor: f64::EPSILON,
        }
    }
}

/// Mel filterbank feature extractor.
pub struct Extractor {
    cfg: Config,
    frame_len: usize,
    hop: f64,
    window: Vec<f64>,
    mel_bank: Vec<Vec<f64>>,
    spectrum: fft::PowerSpectrum,
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field("cfg", &self.cfg)
            .field("frame_len", &self.frame_len)
            .field("hop", &self.hop)
            .finish_non_exhaustive()
    }
}

impl Extractor {
    /// Creates a new extractor, validating the config and precomputing the
    /// window and filterbank.
    pub fn new(cfg: Config) -> Result<Self, FbankError> {
        if cfg.sample_rate == 0 {
            return Err(FbankError::InvalidSampleRate(cfg.sample_rate));
        }
        check_positive("win_len", cfg.win_len)?;
        check_positive("win_step", cfg.win_step)?;
        if cfg.num_filters == 0 {
            return Err(FbankError::InvalidParameter { name: "num_filters", value: 0.0 });
        }
        if cfg.fft_size == 0 {
            return Err(FbankError::InvalidParameter { name: "fft_size", value: 0.0 });
        }
        if !(0.0..1.0).contains(&cfg.pre_emphasis) {
            return Err(FbankError::InvalidParameter {
                name: "pre_emphasis",
                value: cfg.pre_emphasis,
            });
        }
        check_positive("energy_floor", cfg.energy_floor)?;

        let nyquist = cfg.sample_rate as f64 / 2.0;
        let high_freq = cfg.high_freq.unwrap_or(nyquist);
        if !high_freq.is_finite() || high_freq > nyquist {
            return Err(FbankError::InvalidParameter { name: "high_freq", value: high_freq });
        }
        if !cfg.low_freq.is_finite() || cfg.low_freq < 0.0 || cfg.low_freq >= high_freq {
            return Err(FbankError::InvalidParameter { name: "low_freq", value: cfg.low_freq });
        }

        let frame_len = round_half_up(cfg.win_len * cfg.sample_rate as f64);
        let hop = frame::snap_hop(cfg.win_step * cfg.sample_rate as f64);
        if frame_len == 0 {
            return Err(FbankError::InvalidParameter { name: "win_len", value: cfg.win_len });
        }
        if hop < 1.0 {
            return Err(FbankError::InvalidParameter { name: "win_step", value: cfg.win_step });
        }
        if frame_len > cfg.fft_size {
            return Err(FbankError::FftTooSmall { fft_size: cfg.fft_size, frame_len });
        }

        let window = match cfg.window {
            Window::Rectangular => vec![1.0; frame_len],
            Window::Hamming => mel::hamming_window(frame_len),
        };
        let mel_bank = mel::mel_filter_bank(
            cfg.num_filters,
            cfg.fft_size,
            cfg.sample_rate,
            cfg.low_freq,
            high_freq,
        );
        let spectrum = fft::PowerSpectrum::new(cfg.fft_size);

        Ok(Self { cfg, frame_len, hop, window, mel_bank, spectrum })
    }

    /// Returns the config this extractor was built from.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Frame length in samples.
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Frame step in samples; fractional when `win_step * sample_rate` is.
    pub fn hop(&self) -> f64 {
        self.hop
    }

    /// Number of frames produced for a signal of `len` samples.
    pub fn num_frames(&self, len: usize) -> usize {
        frame::num_frames(len, self.frame_len, self.hop)
    }

    /// Extracts log mel filterbank energies from mono samples.
    ///
    /// Returns `[T][num_filters]` where `T = num_frames(pcm.len())`. Signals
    /// shorter than one frame still yield one zero-padded frame.
    pub fn extract(&self, pcm: &[f32]) -> Result<Vec<Vec<f32>>, FbankError> {
        if pcm.is_empty() {
            return Err(FbankError::EmptySignal);
        }

        let cfg = &self.cfg;
        let signal = frame::pre_emphasis(pcm, cfg.pre_emphasis);
        let num_frames = self.num_frames(signal.len());

        let mut features = Vec::with_capacity(num_frames);
        let mut frame = vec![0.0f64; self.frame_len];
        let mut power = vec![0.0f64; self.spectrum.bins()];

        for t in 0..num_frames {
            let start = frame::frame_start(t, self.hop);
            frame::fill_frame(&signal, start, &self.window, &mut frame);
            self.spectrum.compute(&frame, &mut power);

            // Mel filterbank + log
            let mut mel = vec![0.0f32; cfg.num_filters];
            for (m, filter) in self.mel_bank.iter().enumerate() {
                let mut sum = 0.0f64;
                for (k, &w) in filter.iter().enumerate() {
                    sum += w * power[k];
                }
                if sum < cfg.energy_floor {
                    sum = cfg.energy_floor;
                }
                mel[m] = sum.ln() as f32;
            }
            features.push(mel);
        }

        Ok(features)
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), FbankError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FbankError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(freq: f64, sample_rate: u32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f64 / sample_rate as f64).sin() as f32 * 0.5)
            .collect()
    }

    #[test]
    fn test_extract_sine_wave() {
        let extractor = Extractor::new(Config::default()).unwrap();
        let samples = sine(440.0, 16000, 16000);

        let features = extractor.extract(&samples).unwrap();

        // 1 + ceil((16000 - 400) / 160) = 99
        assert_eq!(features.len(), 99);
        for frame in &features {
            assert_eq!(frame.len(), 26);
            for &v in frame {
                assert!(v.is_finite(), "feature value must be finite, got {}", v);
            }
        }
    }

    #[test]
    fn test_sine_energy_peaks_near_tone() {
        let cfg = Config { fft_size: 1024, ..Config::default() };
        let extractor = Extractor::new(cfg).unwrap();
        let low = extractor.extract(&sine(300.0, 16000, 8000)).unwrap();
        let high = extractor.extract(&sine(5000.0, 16000, 8000)).unwrap();

        let argmax = |row: &[f32]| {
            row.iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i)
                .unwrap()
        };
        assert!(argmax(&low[10]) < argmax(&high[10]));
    }

    #[test]
    fn test_silence_is_floored() {
        let extractor = Extractor::new(Config::default()).unwrap();
        let features = extractor.extract(&vec![0.0; 16000]).unwrap();
        let floor = f64::EPSILON.ln() as f32;
        for frame in &features {
            for &v in frame {
                assert!(v.is_finite());
                assert!((v - floor).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_large_fft_size() {
        let cfg = Config { fft_size: 4800, ..Config::default() };
        let extractor = Extractor::new(cfg).unwrap();
        let features = extractor.extract(&sine(1000.0, 16000, 4000)).unwrap();
        assert_eq!(features.len(), extractor.num_frames(4000));
        assert_eq!(features[0].len(), 26);
    }

    #[test]
    fn test_short_signal_yields_one_frame() {
        let extractor = Extractor::new(Config::default()).unwrap();
        let features = extractor.extract(&[0.1; 100]).unwrap();
        assert_eq!(features.len(), 1);
    }

    #[test]
    fn test_hamming_window_config() {
        let cfg = Config { window: Window::Hamming, ..Config::default() };
        let extractor = Extractor::new(cfg).unwrap();
        let features = extractor.extract(&sine(440.0, 16000, 1600)).unwrap();
        assert_eq!(features.len(), 9);
    }

    #[test]
    fn test_fractional_hop_frame_count() {
        let cfg = Config { sample_rate: 22050, ..Config::default() };
        let extractor = Extractor::new(cfg).unwrap();
        assert_eq!(extractor.frame_len(), 551);
        assert!((extractor.hop() - 220.5).abs() < 1e-9);
        assert_eq!(extractor.num_frames(66150), 299);

        // A rounded 221-sample hop would give 298
        assert_eq!(frame::num_frames(66150, 551, 221.0), 298);
    }

    #[test]
    fn test_deterministic() {
        let extractor = Extractor::new(Config::default()).unwrap();
        let samples = sine(700.0, 16000, 3200);
        assert_eq!(extractor.extract(&samples).unwrap(), extractor.extract(&samples).unwrap());
    }

    #[test]
    fn test_empty_input() {
        let extractor = Extractor::new(Config::default()).unwrap();
        assert_eq!(extractor.extract(&[]), Err(FbankError::EmptySignal));
    }

    #[test]
    fn test_invalid_configs() {
        let bad_rate = Config { sample_rate: 0, ..Config::default() };
        assert_eq!(Extractor::new(bad_rate).unwrap_err(), FbankError::InvalidSampleRate(0));

        let small_fft = Config { fft_size: 256, ..Config::default() };
        assert_eq!(
            Extractor::new(small_fft).unwrap_err(),
            FbankError::FftTooSmall { fft_size: 256, frame_len: 400 }
        );

        let bad_step = Config { win_step: 0.0, ..Config::default() };
        assert!(matches!(
            Extractor::new(bad_step),
            Err(FbankError::InvalidParameter { name: "win_step", .. })
        ));

        let above_nyquist = Config { high_freq: Some(9000.0), ..Config::default() };
        assert!(matches!(
            Extractor::new(above_nyquist),
            Err(FbankError::InvalidParameter { name: "high_freq", .. })
        ));

        let no_filters = Config { num_filters: 0, ..Config::default() };
        assert!(Extractor::new(no_filters).is_err());
    }
}
