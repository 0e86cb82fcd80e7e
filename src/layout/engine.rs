//! Placement of the story layers on a fixed canvas.
//!
//! Layers, bottom to top: background, primary media, caption, link. All positions are
//! top-left corners in canvas pixels.

use std::path::Path;

use crate::{
    assets::color::Rgba8,
    assets::media::{ensure_exists, probe_image_size},
    assets::text::{TextElementFactory, TextRequest},
    build::options::{BuildOptions, LinkOptions, TextStyle},
    foundation::core::Canvas,
    foundation::error::StoryResult,
    layout::element::{ElementHandle, PlacedElement, VisualElement},
    overlay::mention::StoryMention,
};

/// Deterministic placement rules for one canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutEngine {
    canvas: Canvas,
    /// Vertical margin above which the primary element is lifted.
    pub nudge_threshold: f64,
    /// How far the primary element is lifted, pixels.
    pub nudge: f64,
    /// Gap between the primary element's bottom edge and the caption.
    pub caption_gap: f64,
    /// Caption box width.
    pub caption_max_width: f64,
}

impl LayoutEngine {
    /// Engine with the stock story placement constants.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            nudge_threshold: 90.0,
            nudge: 50.0,
            caption_gap: 50.0,
            caption_max_width: 600.0,
        }
    }

    /// Engine configured from build options.
    pub fn from_options(opts: &BuildOptions) -> Self {
        Self {
            canvas: opts.canvas,
            nudge_threshold: opts.primary_nudge_threshold,
            nudge: opts.primary_nudge,
            caption_gap: opts.caption_gap,
            caption_max_width: opts.caption_max_width,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Place the background image over the whole canvas.
    ///
    /// Fails with `InvalidPath` when the file is missing and with a probe error when it is
    /// not a readable image. Nothing is rendered at this point.
    pub fn place_background(&self, path: Option<&Path>) -> StoryResult<Option<PlacedElement>> {
        let Some(path) = path else {
            return Ok(None);
        };
        ensure_exists(path)?;
        let (w, h) = probe_image_size(path)?;
        tracing::debug!(path = %path.display(), w, h, "background stretched to canvas");
        let element = VisualElement::new(
            self.canvas.size(),
            ElementHandle::Image {
                path: path.to_path_buf(),
            },
        );
        Ok(Some(element.place(0.0, 0.0)))
    }

    /// Center the primary element, then lift it when the vertical margin is large.
    pub fn place_primary(&self, element: VisualElement) -> PlacedElement {
        let left = (self.canvas.w() - element.size.width) / 2.0;
        let mut top = (self.canvas.h() - element.size.height) / 2.0;
        if top > self.nudge_threshold {
            tracing::debug!(top, nudge = self.nudge, "lifting primary element");
            top -= self.nudge;
        }
        element.place(left, top)
    }

    /// Place the caption under the primary element, horizontally centered.
    ///
    /// Returns `None` when there is no caption text or the factory produced nothing.
    pub fn place_caption(
        &self,
        text: &mut dyn TextElementFactory,
        caption: &str,
        style: &TextStyle,
        primary: &PlacedElement,
    ) -> StoryResult<Option<PlacedElement>> {
        if caption.is_empty() {
            return Ok(None);
        }
        let req = TextRequest {
            text: caption.to_string(),
            font: style.font.clone(),
            font_size: style.font_size,
            color: Rgba8::parse(&style.color)?,
            max_width: Some(self.caption_max_width),
            bg_color: None,
            fade_in_sec: 0.0,
        };
        let Some(element) = text.create_text(&req)? else {
            return Ok(None);
        };
        let left = (self.canvas.w() - element.size.width) / 2.0;
        let top = primary.top() + primary.height() + self.caption_gap;
        Ok(Some(element.place(left, top)))
    }

    /// Place the link label.
    ///
    /// Defaults: `left = (W - link.width) / 2` and `top = primaryHeight / 2`. The vertical
    /// default is relative to the primary element's own height, not the canvas.
    pub fn place_link(
        &self,
        text: &mut dyn TextElementFactory,
        link: &LinkOptions,
        font: &str,
        primary: &PlacedElement,
    ) -> StoryResult<Option<PlacedElement>> {
        if link.url.is_empty() {
            return Ok(None);
        }
        let left = link
            .left
            .unwrap_or_else(|| (self.canvas.w() - link.width) / 2.0);
        let top = link.top.unwrap_or_else(|| primary.height() / 2.0);
        tracing::debug!(left, top, "link placement");

        let req = TextRequest {
            text: link_label(&link.url),
            font: font.to_string(),
            font_size: link.font_size,
            color: Rgba8::parse(&link.color)?,
            max_width: Some(link.width),
            bg_color: Some(Rgba8::parse(&link.bg_color)?),
            fade_in_sec: link.fade_in_sec,
        };
        Ok(text
            .create_text(&req)?
            .map(|element| element.place(left, top)))
    }
}

/// Caption content: the explicit caption, else the first mention's handle.
pub fn caption_text(caption: &str, mention: Option<&StoryMention>) -> Option<String> {
    if !caption.is_empty() {
        return Some(caption.to_string());
    }
    mention
        .map(|m| m.display_handle())
        .filter(|s| !s.is_empty())
}

/// Display label for a link: its host (with an explicit port), else the raw string.
pub fn link_label(link: &str) -> String {
    match url::Url::parse(link) {
        Ok(url) => match url.host_str() {
            Some(host) if !host.is_empty() => match url.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            },
            _ => {
                tracing::warn!(link, "link has no host, using raw string as label");
                link.to_string()
            }
        },
        Err(e) => {
            tracing::warn!(link, error = %e, "unparsable link, using raw string as label");
            link.to_string()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
