//! Log mel filterbank extraction over a normalized waveform.

use lipsync_audio::fbank::{Extractor, FbankError};
use tracing::debug;

use crate::{AudioWaveform, FeatureMatrix, Result, WindowConfig};

/// Computes one log mel filterbank vector per analysis frame.
///
/// Frames advance by `config.step_size_seconds` and span
/// `config.frame_length_seconds`; the last frame is zero-padded. The result
/// has `config.num_channels` columns.
///
/// # Errors
///
/// [`Error::FeatureExtraction`](crate::Error::FeatureExtraction) when the
/// waveform is empty, its sample rate is 0, or the filterbank rejects the
/// window configuration (e.g. `fft_size` shorter than one frame).
pub fn extract(waveform: &AudioWaveform, config: &WindowConfig) -> Result<FeatureMatrix> {
    if waveform.is_empty() {
        return Err(FbankError::EmptySignal.into());
    }
    let extractor = Extractor::new(config.fbank_config(waveform.sample_rate))?;

    debug!(
        "extracting features using a window step size of {} seconds ({} samples per frame, nfft {})",
        config.step_size_seconds,
        extractor.frame_len(),
        config.fft_size
    );
    let rows = extractor.extract(&waveform.samples)?;
    debug!("frames = {}", rows.len());
    debug!("features per frame = {}", config.num_channels);

    Ok(FeatureMatrix::new(rows, config.num_channels, config.step_size_seconds))
}
