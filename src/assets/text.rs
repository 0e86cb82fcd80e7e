use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::{
    assets::color::Rgba8,
    foundation::core::Size,
    foundation::error::{StoryError, StoryResult},
    foundation::math::unpremul_u8,
    layout::element::{ElementHandle, VisualElement},
};

/// Everything needed to produce one text element.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRequest {
    /// Text content.
    pub text: String,
    /// Font family name.
    pub font: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Text color.
    pub color: Rgba8,
    /// Box width; text wraps inside it and the element takes this width.
    pub max_width: Option<f64>,
    /// Fill behind the text box.
    pub bg_color: Option<Rgba8>,
    /// Alpha fade-in when the element appears, seconds.
    pub fade_in_sec: f64,
}

/// Produces sized text elements for layout.
///
/// The returned element size is authoritative: layout math uses it as-is.
pub trait TextElementFactory {
    /// Create a text element, or `None` when there is nothing to draw.
    fn create_text(&mut self, req: &TextRequest) -> StoryResult<Option<VisualElement>>;
}

/// Brush used for Parley layout runs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Reusable Parley text shaping context.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register font bytes and return the family name they provide.
    pub fn register_font(&mut self, font_bytes: &[u8]) -> StoryResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| StoryError::validation("no font families registered from font bytes"))?;

        Ok(self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| StoryError::validation("registered font family has no name"))?
            .to_string())
    }

    /// Shape and lay out plain text in a registered family.
    pub fn layout_plain(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
        brush: TextBrushRgba8,
        max_width_px: Option<f32>,
    ) -> StoryResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(StoryError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family.to_string())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(max_width_px);
        if let Some(w) = max_width_px {
            layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        }
        Ok(layout)
    }
}

struct RegisteredFont {
    family: String,
    font: vello_cpu::peniko::FontData,
}

/// Text factory that shapes with Parley, rasterizes with `vello_cpu` and writes PNGs.
///
/// Rasters live in a scratch directory owned by the factory, so the factory must outlive
/// every render that references its elements.
pub struct ParleyTextFactory {
    engine: TextLayoutEngine,
    fonts: Vec<RegisteredFont>,
    scratch: tempfile::TempDir,
    next_id: u32,
}

impl ParleyTextFactory {
    /// Create a factory with an empty font set and a fresh scratch directory.
    pub fn new() -> StoryResult<Self> {
        let scratch = tempfile::Builder::new()
            .prefix("wavyte-story-text")
            .tempdir()
            .context("create text scratch directory")?;
        Ok(Self {
            engine: TextLayoutEngine::new(),
            fonts: Vec::new(),
            scratch,
            next_id: 0,
        })
    }

    /// Register a font file (TTF/OTF) and return its family name.
    pub fn register_font_file(&mut self, path: &Path) -> StoryResult<String> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        self.register_font_bytes(bytes)
    }

    /// Register in-memory font bytes and return their family name.
    pub fn register_font_bytes(&mut self, bytes: Vec<u8>) -> StoryResult<String> {
        let family = self.engine.register_font(&bytes)?;
        tracing::debug!(family = %family, "registered font");
        self.fonts.push(RegisteredFont {
            family: family.clone(),
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0),
        });
        Ok(family)
    }

    /// Directory holding rasterized text elements.
    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }

    fn font_for(&self, family: &str) -> StoryResult<&RegisteredFont> {
        if let Some(f) = self
            .fonts
            .iter()
            .find(|f| f.family.eq_ignore_ascii_case(family))
        {
            return Ok(f);
        }
        let fallback = self
            .fonts
            .first()
            .ok_or_else(|| {
                StoryError::validation(
                    "no fonts registered for text rendering; register a font file first",
                )
            })?;
        tracing::warn!(
            requested = family,
            using = %fallback.family,
            "font family not registered, falling back"
        );
        Ok(fallback)
    }

    fn next_raster_path(&mut self) -> PathBuf {
        self.next_id += 1;
        self.scratch
            .path()
            .join(format!("text-{:04}.png", self.next_id))
    }
}

impl TextElementFactory for ParleyTextFactory {
    #[tracing::instrument(skip(self, req), fields(text = %req.text))]
    fn create_text(&mut self, req: &TextRequest) -> StoryResult<Option<VisualElement>> {
        if req.text.is_empty() {
            return Ok(None);
        }
        let (family, font) = {
            let f = self.font_for(&req.font)?;
            (f.family.clone(), f.font.clone())
        };
        let layout = self.engine.layout_plain(
            &req.text,
            &family,
            req.font_size,
            req.color.into(),
            req.max_width.map(|w| w as f32),
        )?;

        let width = match req.max_width {
            Some(w) => w.ceil(),
            None => f64::from(layout.width()).ceil(),
        }
        .max(1.0);
        let height = f64::from(layout.height()).ceil().max(1.0);
        let (w, h) = pixmap_dims(width, height)?;

        let mut pixmap = rasterize_layout(&layout, &font, w, h, req.bg_color);
        let path = self.next_raster_path();
        write_pixmap_png(&mut pixmap, w, h, &path)?;

        Ok(Some(VisualElement::new(
            Size::new(f64::from(w), f64::from(h)),
            ElementHandle::Text {
                path,
                text: req.text.clone(),
                fade_in_sec: req.fade_in_sec,
            },
        )))
    }
}

fn pixmap_dims(width: f64, height: f64) -> StoryResult<(u16, u16)> {
    if width > f64::from(u16::MAX) || height > f64::from(u16::MAX) {
        return Err(StoryError::validation(format!(
            "text element {width}x{height} exceeds raster limits"
        )));
    }
    Ok((width as u16, height as u16))
}

fn rasterize_layout(
    layout: &parley::Layout<TextBrushRgba8>,
    font: &vello_cpu::peniko::FontData,
    width: u16,
    height: u16,
    bg: Option<Rgba8>,
) -> vello_cpu::Pixmap {
    let mut ctx = vello_cpu::RenderContext::new(width, height);
    if let Some(bg) = bg {
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));
    }

    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);
    pixmap
}

fn write_pixmap_png(
    pixmap: &mut vello_cpu::Pixmap,
    width: u16,
    height: u16,
    path: &Path,
) -> StoryResult<()> {
    let straight = premul_to_straight(pixmap.data_as_u8_slice_mut());
    image::save_buffer_with_format(
        path,
        &straight,
        u32::from(width),
        u32::from(height),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write text raster '{}'", path.display()))?;
    Ok(())
}

pub(crate) fn premul_to_straight(premul: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(premul.len());
    for px in premul.chunks_exact(4) {
        let a = px[3];
        out.extend_from_slice(&[
            unpremul_u8(px[0], a),
            unpremul_u8(px[1], a),
            unpremul_u8(px[2], a),
            a,
        ]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
