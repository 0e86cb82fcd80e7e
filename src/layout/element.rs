use std::path::PathBuf;

use crate::foundation::core::{Point, Rect, Size};

/// What the renderer should draw for an element.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementHandle {
    /// Still image file, looped for the whole timeline.
    Image {
        /// Image file.
        path: PathBuf,
    },
    /// Video file; its audio is carried into the composition when present.
    Video {
        /// Video file.
        path: PathBuf,
        /// Whether the source has an audio stream.
        has_audio: bool,
    },
    /// Pre-rasterized text.
    Text {
        /// Rasterized text (PNG with alpha).
        path: PathBuf,
        /// Text content, kept for logging and inspection.
        text: String,
        /// Alpha fade-in at the start of the timeline, seconds (0 = none).
        fade_in_sec: f64,
    },
}

/// A placeable item with a known pixel size.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualElement {
    /// Size in canvas pixels.
    pub size: Size,
    /// Renderable handle.
    pub handle: ElementHandle,
}

impl VisualElement {
    /// Wrap a handle with its pixel size.
    pub fn new(size: Size, handle: ElementHandle) -> Self {
        Self { size, handle }
    }

    /// Assign a canvas position.
    pub fn place(self, left: f64, top: f64) -> PlacedElement {
        PlacedElement {
            element: self,
            origin: Point::new(left, top),
        }
    }
}

/// A [`VisualElement`] with its final canvas position (top-left corner).
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedElement {
    /// Placed element.
    pub element: VisualElement,
    /// Top-left corner in canvas pixels.
    pub origin: Point,
}

impl PlacedElement {
    pub fn left(&self) -> f64 {
        self.origin.x
    }

    pub fn top(&self) -> f64 {
        self.origin.y
    }

    pub fn width(&self) -> f64 {
        self.element.size.width
    }

    pub fn height(&self) -> f64 {
        self.element.size.height
    }

    /// Bounding box in canvas pixels.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.element.size)
    }
}
