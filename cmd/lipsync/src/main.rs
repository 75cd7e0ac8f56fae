//! Lipsync CLI - extract viseme-driving audio features from a speech recording.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lipsync_features::{extract, Pipeline};
use tracing_subscriber::EnvFilter;

mod config;
mod output;

use config::Config;
use output::{Output, OutputFormat, Summary};

/// Lipsync CLI - extract viseme-driving audio features.
///
/// Loudness-normalizes the input (EBU R128, via ffmpeg-normalize) and
/// computes log mel filterbank energies every 10ms.
///
/// Configuration is read from ~/.lipsync/config.yaml when present.
#[derive(Parser)]
#[command(name = "lipsync")]
#[command(about = "Extract log mel filterbank features for mouth-shape animation")]
#[command(version)]
pub struct Cli {
    /// Path to the audio WAV file
    #[arg(long = "audio-file")]
    pub audio_file: PathBuf,

    /// Config file (default is ~/.lipsync/config.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides it
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Verbose output (same as --log-level debug)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Write the full feature matrix to this file
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Output as JSON instead of YAML
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    fn output_format(&self) -> OutputFormat {
        if self.json { OutputFormat::Json } else { OutputFormat::Yaml }
    }

    fn log_filter(&self) -> EnvFilter {
        let level = if self.verbose { "debug" } else { self.log_level.as_str() };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cfg = Config::load(cli.config.as_deref())?;
    tracing::debug!("config: {:?}", cfg);

    // Same steps as Pipeline::run, keeping the waveform for the summary
    let pipeline = Pipeline::new(cfg.normalizer.service(), cfg.window);
    let waveform = pipeline
        .normalizer()
        .normalize(&cli.audio_file)
        .with_context(|| format!("failed to normalize {}", cli.audio_file.display()))?;
    let features = extract(&waveform, pipeline.window())
        .with_context(|| format!("failed to extract features from {}", cli.audio_file.display()))?;
    tracing::info!(
        "extracted {} frames x {} channels from {}",
        features.num_frames(),
        features.num_channels(),
        cli.audio_file.display()
    );

    if let Some(path) = &cli.output {
        Output::new(cli.output_format(), Some(path.clone())).write(&features)?;
    }
    Output::new(cli.output_format(), None)
        .write(&Summary::new(&cli.audio_file, &waveform, &features))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from(["lipsync", "--audio-file", "speech.wav", "-v", "--json"])
            .unwrap();
        assert_eq!(cli.audio_file, PathBuf::from("speech.wav"));
        assert!(cli.verbose);
        assert_eq!(cli.output_format(), OutputFormat::Json);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_audio_file_required() {
        assert!(Cli::try_parse_from(["lipsync"]).is_err());
    }
}
