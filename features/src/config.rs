//! Analysis window configuration.

use lipsync_audio::fbank;
use serde::{Deserialize, Serialize};

/// Default frame step in seconds.
pub const DEFAULT_STEP_SIZE_SECONDS: f64 = 0.01;
/// Default FFT size in samples.
pub const DEFAULT_FFT_SIZE: usize = 4800;
/// Default analysis frame length in seconds.
pub const DEFAULT_FRAME_LENGTH_SECONDS: f64 = 0.025;
/// Default number of mel filterbank channels.
pub const DEFAULT_NUM_CHANNELS: usize = 26;

/// How the waveform is cut into analysis frames.
///
/// Every field has a default, so a partial YAML/JSON document deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Advance between consecutive frames in seconds (default: 0.01).
    pub step_size_seconds: f64,
    /// FFT size in samples; must cover one frame (default: 4800).
    pub fft_size: usize,
    /// Length of one analysis frame in seconds (default: 0.025).
    pub frame_length_seconds: f64,
    /// Number of mel filters, i.e. columns of the feature matrix (default: 26).
    pub num_channels: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            step_size_seconds: DEFAULT_STEP_SIZE_SECONDS,
            fft_size: DEFAULT_FFT_SIZE,
            frame_length_seconds: DEFAULT_FRAME_LENGTH_SECONDS,
            num_channels: DEFAULT_NUM_CHANNELS,
        }
    }
}

impl WindowConfig {
    /// Filterbank parameters for audio at `sample_rate`.
    pub fn fbank_config(&self, sample_rate: u32) -> fbank::Config {
        fbank::Config {
            sample_rate,
            win_len: self.frame_length_seconds,
            win_step: self.step_size_seconds,
            num_filters: self.num_channels,
            fft_size: self.fft_size,
            ..fbank::Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = WindowConfig::default();
        assert_eq!(cfg.step_size_seconds, 0.01);
        assert_eq!(cfg.fft_size, 4800);
        assert_eq!(cfg.frame_length_seconds, 0.025);
        assert_eq!(cfg.num_channels, 26);
    }

    #[test]
    fn test_partial_deserialize() {
        let cfg: WindowConfig = serde_json::from_str(r#"{"fft_size": 8192}"#).unwrap();
        assert_eq!(cfg.fft_size, 8192);
        assert_eq!(cfg.step_size_seconds, 0.01);
        assert_eq!(cfg.num_channels, 26);
    }

    #[test]
    fn test_fbank_config() {
        let fb = WindowConfig::default().fbank_config(44100);
        assert_eq!(fb.sample_rate, 44100);
        assert_eq!(fb.win_step, 0.01);
        assert_eq!(fb.win_len, 0.025);
        assert_eq!(fb.num_filters, 26);
        assert_eq!(fb.fft_size, 4800);
        assert_eq!(fb.pre_emphasis, 0.97);
    }
}
