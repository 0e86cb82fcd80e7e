use std::path::Path;

use crate::{
    foundation::core::{Canvas, Fps, Rect},
    foundation::error::{StoryError, StoryResult},
    layout::element::{ElementHandle, PlacedElement},
    timeline::segment::SegmentRange,
};

/// One positioned visual in draw order.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneLayer {
    /// What to draw.
    pub handle: ElementHandle,
    /// Where to draw it, canvas pixels.
    pub rect: Rect,
}

impl From<&PlacedElement> for SceneLayer {
    fn from(p: &PlacedElement) -> Self {
        Self {
            handle: p.element.handle.clone(),
            rect: p.rect(),
        }
    }
}

/// Declarative description of one composition handed to a renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Output size.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Output length, seconds.
    pub duration_sec: u32,
    /// Layers bottom to top.
    pub layers: Vec<SceneLayer>,
}

impl Scene {
    /// Empty scene.
    pub fn new(canvas: Canvas, fps: Fps, duration_sec: u32) -> Self {
        Self {
            canvas,
            fps,
            duration_sec,
            layers: Vec::new(),
        }
    }

    /// Append a placed element on top of the current layers.
    pub fn push(&mut self, placed: &PlacedElement) {
        self.layers.push(SceneLayer::from(placed));
    }

    /// Index of the first layer whose audio should be kept.
    pub fn audio_layer(&self) -> Option<usize> {
        self.layers.iter().position(|l| {
            matches!(
                l.handle,
                ElementHandle::Video {
                    has_audio: true,
                    ..
                }
            )
        })
    }

    /// Check the scene can be encoded.
    pub fn validate(&self) -> StoryResult<()> {
        self.canvas.validate()?;
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(StoryError::validation("scene fps must be non-zero"));
        }
        if self.duration_sec == 0 {
            return Err(StoryError::validation("scene duration must be > 0"));
        }
        if self.layers.is_empty() {
            return Err(StoryError::validation("scene has no layers"));
        }
        Ok(())
    }
}

/// External rendering engine seam.
///
/// Calls are made sequentially: the full composition first, then each segment in order.
pub trait StoryRenderer {
    /// Encode `scene` into a video at `out`.
    fn render_scene(&mut self, scene: &Scene, out: &Path) -> StoryResult<()>;

    /// Re-encode `[range.start_sec, range.end_sec)` of an already composed video.
    fn extract_range(&mut self, full: &Path, range: SegmentRange, out: &Path) -> StoryResult<()>;
}
