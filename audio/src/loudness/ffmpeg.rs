//! `ffmpeg-normalize` subprocess backend.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use super::{LoudnessError, LoudnessNormalizer};

/// Default program name, resolved through `PATH`.
pub const DEFAULT_PROGRAM: &str = "ffmpeg-normalize";

/// Runs `ffmpeg-normalize -f <input> -o <output>` as a blocking subprocess.
///
/// The tool defaults to EBU R128 normalization; `-f` lets it overwrite an
/// existing output. There is no timeout and no retry.
#[derive(Debug, Clone)]
pub struct FfmpegNormalize {
    program: PathBuf,
    target_level: Option<f64>,
    extra_args: Vec<OsString>,
}

impl Default for FfmpegNormalize {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl FfmpegNormalize {
    /// Creates a backend running `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            target_level: None,
            extra_args: Vec::new(),
        }
    }

    /// Sets the integrated loudness target in LUFS (`-t`).
    pub fn with_target_level(mut self, lufs: f64) -> Self {
        self.target_level = Some(lufs);
        self
    }

    /// Appends arguments passed to the tool before the input file.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Builds the command line without running it.
    pub fn command(&self, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.extra_args);
        if let Some(level) = self.target_level {
            cmd.arg("-t").arg(level.to_string());
        }
        cmd.arg("-f").arg(input).arg("-o").arg(output);
        cmd
    }
}

impl LoudnessNormalizer for FfmpegNormalize {
    fn normalize(&self, input: &Path, output: &Path) -> Result<(), LoudnessError> {
        let program = self.program.display().to_string();
        debug!(
            "applying EBU R128 loudness normalization to {} using {}",
            input.display(),
            program
        );

        let result = self
            .command(input, output)
            .output()
            .map_err(|source| LoudnessError::Spawn { program: program.clone(), source })?;

        if !result.status.success() {
            let mut captured = String::from_utf8_lossy(&result.stdout).into_owned();
            captured.push_str(&String::from_utf8_lossy(&result.stderr));
            return Err(LoudnessError::Failed {
                program,
                status: result.status,
                output: captured.trim().to_string(),
            });
        }

        if !output.is_file() {
            return Err(LoudnessError::MissingOutput {
                program,
                output: output.display().to_string(),
            });
        }
        Ok(())
    }
}
