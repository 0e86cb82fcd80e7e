use std::path::PathBuf;

/// Convenience result type used across the story pipeline.
pub type StoryResult<T> = Result<T, StoryError>;

/// Top-level error taxonomy for story builds.
#[derive(thiserror::Error, Debug)]
pub enum StoryError {
    /// A background or source path does not exist.
    #[error("invalid path: '{}' does not exist", .0.display())]
    InvalidPath(PathBuf),

    /// Invalid caller-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Media metadata could not be probed.
    #[error("probe error: {0}")]
    Probe(String),

    /// The rendering engine failed to produce an artifact.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing options or results.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryError {
    /// Build a [`StoryError::InvalidPath`] value.
    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        Self::InvalidPath(path.into())
    }

    /// Build a [`StoryError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StoryError::Probe`] value.
    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe(msg.into())
    }

    /// Build a [`StoryError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StoryError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
