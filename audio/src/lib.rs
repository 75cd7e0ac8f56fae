//! Audio building blocks for lipsync feature extraction.
//!
//! This crate provides:
//!
//! - `fbank`: log mel filterbank energies from mono PCM
//! - `wav`: WAV decoding to mono f32 samples
//! - `loudness`: EBU R128 loudness normalization as a pluggable external service
//!
//! # Example
//!
//! ```no_run
//! use lipsync_audio::fbank::{Config, Extractor};
//!
//! let decoded = lipsync_audio::wav::decode("speech.wav")?;
//! let extractor = Extractor::new(Config {
//!     sample_rate: decoded.sample_rate,
//!     fft_size: 4800,
//!     ..Config::default()
//! })?;
//! let features = extractor.extract(&decoded.samples)?;
//! println!("{} frames x {} filters", features.len(), features[0].len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod fbank;
pub mod loudness;
pub mod wav;
