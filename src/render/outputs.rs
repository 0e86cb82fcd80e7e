use std::path::PathBuf;

use anyhow::Context as _;

use crate::foundation::error::StoryResult;

/// Source of output file paths for rendered artifacts.
pub trait OutputPaths {
    /// Reserve a fresh output path.
    fn next_path(&mut self) -> StoryResult<PathBuf>;
}

/// Unique `.mp4` paths inside a directory.
///
/// Each path is reserved as an empty file that outlives this value; the caller owns it.
#[derive(Clone, Debug)]
pub struct TempOutputs {
    dir: PathBuf,
    prefix: String,
    suffix: String,
}

impl TempOutputs {
    /// Allocate paths inside `dir` (created on first use).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "story-".to_string(),
            suffix: ".mp4".to_string(),
        }
    }

    /// Allocate paths in the system temp directory.
    pub fn system() -> Self {
        Self::new(std::env::temp_dir())
    }

    /// Directory paths are allocated in.
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

impl OutputPaths for TempOutputs {
    fn next_path(&mut self) -> StoryResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output directory '{}'", self.dir.display()))?;
        let file = tempfile::Builder::new()
            .prefix(&self.prefix)
            .suffix(&self.suffix)
            .tempfile_in(&self.dir)
            .with_context(|| format!("reserve output file in '{}'", self.dir.display()))?;
        let path = file
            .into_temp_path()
            .keep()
            .context("keep reserved output file")?;
        Ok(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/outputs.rs"]
mod tests;
