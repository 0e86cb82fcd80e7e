use crate::foundation::error::{StoryError, StoryResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Portrait story canvas (720x1280).
    pub const STORY: Canvas = Canvas {
        width: 720,
        height: 1280,
    };

    /// Create a validated canvas.
    pub fn new(width: u32, height: u32) -> StoryResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Reject canvases the encoder cannot produce.
    pub fn validate(&self) -> StoryResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StoryError::validation("canvas width/height must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(StoryError::validation(
                "canvas width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }

    /// Width as `f64`, for layout math.
    pub fn w(&self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`, for layout math.
    pub fn h(&self) -> f64 {
        f64::from(self.height)
    }

    /// Canvas size as a kurbo [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.w(), self.h())
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::STORY
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> StoryResult<Self> {
        if den == 0 {
            return Err(StoryError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(StoryError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// `num/den` form accepted by ffmpeg rate options.
    pub fn to_ffmpeg_rate(self) -> String {
        format!("{}/{}", self.num, self.den)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 24, den: 1 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
