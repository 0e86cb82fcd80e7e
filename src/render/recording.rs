use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::error::{StoryError, StoryResult},
    render::scene::{Scene, StoryRenderer},
    timeline::segment::SegmentRange,
};

/// A renderer call captured by [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub enum RenderCall {
    /// Full composition render.
    Scene {
        /// Scene as handed to the renderer.
        scene: Scene,
        /// Output path.
        out: PathBuf,
    },
    /// Segment extraction.
    Range {
        /// Source composition.
        full: PathBuf,
        /// Extracted range.
        range: SegmentRange,
        /// Output path.
        out: PathBuf,
    },
}

/// Renderer that records calls and writes empty files instead of encoding.
///
/// Used for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<RenderCall>,
    fail_at: Option<usize>,
}

impl RecordingRenderer {
    /// Create a new recording renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `n`-th call (0-based) fail with a render error.
    pub fn failing_at(n: usize) -> Self {
        Self {
            calls: Vec::new(),
            fail_at: Some(n),
        }
    }

    /// Borrow the recorded calls in order.
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    fn record(&mut self, call: RenderCall, out: &Path) -> StoryResult<()> {
        if self.fail_at == Some(self.calls.len()) {
            return Err(StoryError::render(format!(
                "simulated render failure for '{}'",
                out.display()
            )));
        }
        std::fs::write(out, b"").with_context(|| format!("touch '{}'", out.display()))?;
        self.calls.push(call);
        Ok(())
    }
}

impl StoryRenderer for RecordingRenderer {
    fn render_scene(&mut self, scene: &Scene, out: &Path) -> StoryResult<()> {
        scene.validate()?;
        self.record(
            RenderCall::Scene {
                scene: scene.clone(),
                out: out.to_path_buf(),
            },
            out,
        )
    }

    fn extract_range(&mut self, full: &Path, range: SegmentRange, out: &Path) -> StoryResult<()> {
        self.record(
            RenderCall::Range {
                full: full.to_path_buf(),
                range,
                out: out.to_path_buf(),
            },
            out,
        )
    }
}
