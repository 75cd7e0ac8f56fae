//! In-memory normalized audio.

use lipsync_audio::wav::Decoded;

/// Mono samples with their sample rate.
///
/// Produced by the normalizer for each call and consumed by feature
/// extraction; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioWaveform {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Mono samples in the source file's native units (raw integer PCM
    /// values for integer WAV, `[-1.0, 1.0]` for float WAV).
    pub samples: Vec<f32>,
}

impl AudioWaveform {
    pub fn new(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self { sample_rate, samples }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds, 0 for an invalid sample rate.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

impl From<Decoded> for AudioWaveform {
    fn from(decoded: Decoded) -> Self {
        Self::new(decoded.sample_rate, decoded.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        let wave = AudioWaveform::new(16000, vec![0.0; 8000]);
        assert_eq!(wave.len(), 8000);
        assert!(!wave.is_empty());
        assert!((wave.duration_secs() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_rate_duration() {
        let wave = AudioWaveform::new(0, vec![0.0; 10]);
        assert_eq!(wave.duration_secs(), 0.0);
    }

    #[test]
    fn test_from_decoded() {
        let decoded = Decoded { sample_rate: 22050, channels: 2, samples: vec![4096.0, -4096.0] };
        let wave = AudioWaveform::from(decoded);
        assert_eq!(wave.sample_rate, 22050);
        assert_eq!(wave.samples, vec![4096.0, -4096.0]);
    }
}
