//! Caller-facing build configuration.
//!
//! Every field has a default, so a JSON options file only needs the fields it changes.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::{
    assets::color::Rgba8,
    foundation::core::{Canvas, Fps},
    foundation::error::{StoryError, StoryResult},
    timeline::duration::DEFAULT_IMAGE_DURATION_SEC,
    timeline::segment::MAX_SEGMENT_SEC,
};

/// Text styling for the caption.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Font family name. Default `"Arial"`.
    pub font: String,
    /// Font size in pixels. Default `100`.
    pub font_size: f32,
    /// Text color. Default `"white"`.
    pub color: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: "Arial".to_string(),
            font_size: 100.0,
            color: "white".to_string(),
        }
    }
}

/// Link label and sticker settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LinkOptions {
    /// URL or free-form link string. Empty disables the link.
    pub url: String,
    /// Label left edge in pixels. Default: centered on the canvas.
    pub left: Option<f64>,
    /// Label top edge in pixels. Default: half the primary element's height.
    pub top: Option<f64>,
    /// Label box width in pixels. Default `400`.
    pub width: f64,
    /// Label font size in pixels. Default `32`.
    pub font_size: f32,
    /// Label text color. Default `"blue"`.
    pub color: String,
    /// Label box fill. Default `"white"`.
    pub bg_color: String,
    /// Label fade-in, seconds. Default `3.0`.
    pub fade_in_sec: f64,
    /// Sticker stacking order. Default `0.0`.
    pub sticker_z: f64,
    /// Sticker rotation in degrees. Default `0.0`.
    pub sticker_rotation: f64,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            url: String::new(),
            left: None,
            top: None,
            width: 400.0,
            font_size: 32.0,
            color: "blue".to_string(),
            bg_color: "white".to_string(),
            fade_in_sec: 3.0,
            sticker_z: 0.0,
            sticker_rotation: 0.0,
        }
    }
}

impl LinkOptions {
    /// Default link settings for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// All knobs of a story build.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Output canvas. Default 720x1280.
    pub canvas: Canvas,
    /// Output frame rate. Default 24.
    pub fps: Fps,
    /// Timeline cap in seconds; `0` keeps the source length. Default `0`.
    pub max_duration: u32,
    /// Longest single segment, seconds. Default `15`.
    pub segment_max_sec: u32,
    /// Display time for images without a cap, seconds. Default `15`.
    pub image_default_duration: u32,
    /// Caption box width in pixels. Default `600`.
    pub caption_max_width: f64,
    /// Gap between primary media and caption, pixels. Default `50`.
    pub caption_gap: f64,
    /// Vertical margin above which primary media is lifted, pixels. Default `90`.
    pub primary_nudge_threshold: f64,
    /// Lift applied to primary media, pixels. Default `50`.
    pub primary_nudge: f64,
    /// Caption styling; the link label shares its font family.
    pub caption: TextStyle,
    /// Optional link label and sticker.
    pub link: Option<LinkOptions>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            canvas: Canvas::STORY,
            fps: Fps::default(),
            max_duration: 0,
            segment_max_sec: MAX_SEGMENT_SEC,
            image_default_duration: DEFAULT_IMAGE_DURATION_SEC,
            caption_max_width: 600.0,
            caption_gap: 50.0,
            primary_nudge_threshold: 90.0,
            primary_nudge: 50.0,
            caption: TextStyle::default(),
            link: None,
        }
    }
}

impl BuildOptions {
    /// Parse options from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> StoryResult<Self> {
        let opts: Self = serde_json::from_reader(reader)
            .map_err(|e| StoryError::serde(format!("parse build options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> StoryResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StoryError::validation(format!("open build options '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject settings that cannot produce a story.
    pub fn validate(&self) -> StoryResult<()> {
        self.canvas.validate()?;
        Fps::new(self.fps.num, self.fps.den)?;
        if self.segment_max_sec == 0 {
            return Err(StoryError::validation("segment_max_sec must be > 0"));
        }
        if self.image_default_duration == 0 {
            return Err(StoryError::validation("image_default_duration must be > 0"));
        }
        if !(self.caption_max_width.is_finite() && self.caption_max_width > 0.0) {
            return Err(StoryError::validation("caption_max_width must be > 0"));
        }
        if !(self.caption.font_size.is_finite() && self.caption.font_size > 0.0) {
            return Err(StoryError::validation("caption font_size must be > 0"));
        }
        Rgba8::parse(&self.caption.color)?;
        if let Some(link) = &self.link {
            if !(link.width.is_finite() && link.width > 0.0) {
                return Err(StoryError::validation("link width must be > 0"));
            }
            if !(link.font_size.is_finite() && link.font_size > 0.0) {
                return Err(StoryError::validation("link font_size must be > 0"));
            }
            if !link.fade_in_sec.is_finite() || link.fade_in_sec < 0.0 {
                return Err(StoryError::validation("link fade_in_sec must be >= 0"));
            }
            Rgba8::parse(&link.color)?;
            Rgba8::parse(&link.bg_color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/build/options.rs"]
mod tests;
