//! Configuration file for the lipsync CLI.
//!
//! Stored as YAML, by default in ~/.lipsync/config.yaml. Every field is
//! optional; missing ones fall back to the pipeline defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use lipsync_features::{FfmpegNormalize, WindowConfig};
use serde::{Deserialize, Serialize};

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".lipsync";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Analysis window settings.
    pub window: WindowConfig,
    /// Loudness normalizer settings.
    pub normalizer: NormalizerConfig,
}

/// How to invoke the external loudness normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Program to run (default: ffmpeg-normalize from PATH).
    pub program: String,
    /// Integrated loudness target in LUFS; the tool's EBU R128 default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_level: Option<f64>,
    /// Extra arguments passed before the input file.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_args: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            program: FfmpegNormalize::default()
                .program()
                .display()
                .to_string(),
            target_level: None,
            extra_args: Vec::new(),
        }
    }
}

impl NormalizerConfig {
    /// Builds the subprocess backend.
    pub fn service(&self) -> FfmpegNormalize {
        let mut service = FfmpegNormalize::new(&self.program).with_args(&self.extra_args);
        if let Some(level) = self.target_level {
            service = service.with_target_level(level);
        }
        service
    }
}

impl Config {
    /// Gets the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR).join(DEFAULT_CONFIG_FILE))
    }

    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// if present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::default_config_path() {
                Some(path) if path.is_file() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Loads the configuration from a YAML file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parses YAML; an empty document yields the defaults.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_default() {
        let cfg = Config::parse("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.window.fft_size, 4800);
        assert_eq!(cfg.normalizer.program, "ffmpeg-normalize");
    }

    #[test]
    fn test_partial_yaml() {
        let cfg = Config::parse(
            "window:\n  step_size_seconds: 0.02\nnormalizer:\n  target_level: -16\n",
        )
        .unwrap();
        assert_eq!(cfg.window.step_size_seconds, 0.02);
        assert_eq!(cfg.window.fft_size, 4800);
        assert_eq!(cfg.normalizer.program, "ffmpeg-normalize");
        assert_eq!(cfg.normalizer.target_level, Some(-16.0));
    }

    #[test]
    fn test_service_command() {
        let cfg = NormalizerConfig {
            program: "/usr/local/bin/ffmpeg-normalize".to_string(),
            target_level: Some(-20.0),
            extra_args: vec!["-ar".to_string(), "16000".to_string()],
        };
        let cmd = cfg.service().command(Path::new("a.wav"), Path::new("b.wav"));
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(cmd.get_program(), "/usr/local/bin/ffmpeg-normalize");
        assert_eq!(args, vec!["-ar", "16000", "-t", "-20", "-f", "a.wav", "-o", "b.wav"]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "window:\n  num_channels: 40\n").unwrap();

        let cfg = Config::load(Some(&path)).unwrap();
        assert_eq!(cfg.window.num_channels, 40);
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("missing.yaml"))).is_err());
    }

    #[test]
    fn test_invalid_yaml_fails() {
        assert!(Config::parse("window: [1, 2").is_err());
    }
}
