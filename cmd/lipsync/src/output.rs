//! Output utilities for the CLI.

use std::{fs::File, io::Write, path::Path};

use lipsync_features::{AudioWaveform, FeatureMatrix};
use serde::Serialize;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// YAML format (default).
    #[default]
    Yaml,
    /// JSON format.
    Json,
}

/// Output configuration.
pub struct Output {
    pub format: OutputFormat,
    pub file: Option<String>,
}

impl Output {
    /// Creates a new output configuration.
    pub fn new(format: OutputFormat, file: Option<String>) -> Self {
        Self { format, file }
    }

    /// Renders a value in the configured format.
    pub fn render<T: Serialize>(&self, value: &T) -> anyhow::Result<String> {
        Ok(match self.format {
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
        })
    }

    /// Writes the result to the output file, or stdout when there is none.
    pub fn write<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let output = self.render(value)?;

        match &self.file {
            Some(path) => {
                let mut file = File::create(path)?;
                file.write_all(output.as_bytes())?;
            }
            None => {
                println!("{}", output);
            }
        }

        Ok(())
    }
}

/// Shape of an extraction run, printed when the full matrix goes to a file
/// or is not requested.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub audio_file: String,
    pub sample_rate: u32,
    pub duration_seconds: f64,
    pub frames: usize,
    pub channels: usize,
    pub step_size_seconds: f64,
}

impl Summary {
    pub fn new(audio_file: &Path, waveform: &AudioWaveform, features: &FeatureMatrix) -> Self {
        Self {
            audio_file: audio_file.display().to_string(),
            sample_rate: waveform.sample_rate,
            duration_seconds: waveform.duration_secs(),
            frames: features.num_frames(),
            channels: features.num_channels(),
            step_size_seconds: features.step_size_seconds(),
        }
    }
}
