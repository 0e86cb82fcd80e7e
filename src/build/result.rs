use std::path::{Path, PathBuf};

use crate::{overlay::mention::StoryMention, overlay::sticker::StorySticker};

/// Artifacts of one story build.
///
/// Rendered files belong to the caller once the build returns.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StoryBuild {
    mentions: Vec<StoryMention>,
    path: PathBuf,
    paths: Vec<PathBuf>,
    stickers: Vec<StorySticker>,
}

impl StoryBuild {
    pub(crate) fn new(
        mentions: Vec<StoryMention>,
        path: PathBuf,
        paths: Vec<PathBuf>,
        stickers: Vec<StorySticker>,
    ) -> Self {
        Self {
            mentions,
            path,
            paths,
            stickers,
        }
    }

    /// Mentions resolved against the caption (zero or one).
    pub fn mentions(&self) -> &[StoryMention] {
        &self.mentions
    }

    /// Full composition.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Segment files in timeline order; empty when no split was needed.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Interactive regions to attach on upload.
    pub fn stickers(&self) -> &[StorySticker] {
        &self.stickers
    }

    /// Pretty JSON rendering of the build.
    pub fn to_json_pretty(&self) -> crate::StoryResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::StoryError::serde(format!("serialize story build: {e}")))
    }
}
