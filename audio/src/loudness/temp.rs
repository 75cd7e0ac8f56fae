//! Scoped ownership of the intermediate normalized file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

/// Marker inserted between the input stem and the uniqueness token.
pub const NORMALIZED_MARKER: &str = "normalized";

/// Path of a transient file that is deleted when this value is dropped.
///
/// Nothing is created on construction; whoever writes to [`TempOutput::path`]
/// hands cleanup to this guard.
#[derive(Debug)]
pub struct TempOutput {
    path: PathBuf,
}

impl TempOutput {
    /// Derives a sibling of `input`: same directory,
    /// `<stem>-normalized-<token>.wav`.
    ///
    /// The token is a fresh UUID, so concurrent calls on the same input
    /// never share a path.
    pub fn sibling_of(input: &Path) -> Self {
        let token = Uuid::new_v4().simple().to_string();
        Self::with_token(input, &token)
    }

    /// Like [`TempOutput::sibling_of`] with a caller-supplied token.
    pub fn with_token(input: &Path, token: &str) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());
        let dir = input.parent().unwrap_or_else(|| Path::new(""));
        let path = dir.join(format!("{stem}-{NORMALIZED_MARKER}-{token}.wav"));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the file now, reporting any failure other than absence.
    pub fn remove(mut self) -> io::Result<()> {
        let path = std::mem::take(&mut self.path);
        remove_if_exists(&path)
    }
}

impl Drop for TempOutput {
    fn drop(&mut self) {
        if self.path.as_os_str().is_empty() {
            return;
        }
        if let Err(e) = remove_if_exists(&self.path) {
            warn!("loudness: failed to remove {}: {}", self.path.display(), e);
        }
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
