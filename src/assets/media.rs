use std::path::{Path, PathBuf};

use crate::{
    foundation::core::{Canvas, Size},
    foundation::error::{StoryError, StoryResult},
    layout::element::{ElementHandle, VisualElement},
};

/// Metadata reported by `ffprobe` for a video source.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoSourceInfo {
    /// Probed file.
    pub source_path: PathBuf,
    /// Width of the first video stream.
    pub width: u32,
    /// Height of the first video stream.
    pub height: u32,
    /// Container duration in seconds.
    pub duration_sec: f64,
    /// Whether any audio stream is present.
    pub has_audio: bool,
}

/// Whether the primary media is a still image or a video.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Still image; has no intrinsic duration.
    Image,
    /// Video with a probed duration.
    Video,
}

/// Primary media wrapped as a sized visual element.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceClip {
    /// Image or video.
    pub kind: SourceKind,
    /// Element handed to the layout engine.
    pub element: VisualElement,
    /// Intrinsic duration, `None` for images.
    pub duration_sec: Option<f64>,
}

impl SourceClip {
    /// Probe a still image and scale it to the canvas width, keeping its aspect ratio.
    #[tracing::instrument(skip(canvas))]
    pub fn photo(path: &Path, canvas: Canvas) -> StoryResult<Self> {
        ensure_exists(path)?;
        let (w, h) = probe_image_size(path)?;
        Ok(Self::from_image_size(path, w, h, canvas))
    }

    /// Build an image clip from already-known pixel dimensions.
    pub fn from_image_size(path: &Path, width: u32, height: u32, canvas: Canvas) -> Self {
        Self {
            kind: SourceKind::Image,
            element: VisualElement::new(
                scale_to_canvas_width(width, height, canvas),
                ElementHandle::Image {
                    path: path.to_path_buf(),
                },
            ),
            duration_sec: None,
        }
    }

    /// Probe a video file with `ffprobe`. The video keeps its native size.
    #[tracing::instrument]
    pub fn video(path: &Path) -> StoryResult<Self> {
        ensure_exists(path)?;
        let info = probe_video(path)?;
        Ok(Self::from_video_info(info))
    }

    /// Build a video clip from probe output.
    pub fn from_video_info(info: VideoSourceInfo) -> Self {
        Self {
            kind: SourceKind::Video,
            element: VisualElement::new(
                Size::new(f64::from(info.width), f64::from(info.height)),
                ElementHandle::Video {
                    path: info.source_path,
                    has_audio: info.has_audio,
                },
            ),
            duration_sec: Some(info.duration_sec),
        }
    }
}

/// Fail with [`StoryError::InvalidPath`] when `path` is missing.
pub fn ensure_exists(path: &Path) -> StoryResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(StoryError::invalid_path(path))
    }
}

/// Scale `width x height` so that the width matches the canvas width.
///
/// The height is truncated to whole pixels.
pub fn scale_to_canvas_width(width: u32, height: u32, canvas: Canvas) -> Size {
    if width == 0 {
        return Size::new(canvas.w(), 0.0);
    }
    let ratio = canvas.w() / f64::from(width);
    Size::new(canvas.w(), (f64::from(height) * ratio).floor())
}

/// Read pixel dimensions of an image without decoding it fully.
pub fn probe_image_size(path: &Path) -> StoryResult<(u32, u32)> {
    image::image_dimensions(path)
        .map_err(|e| StoryError::probe(format!("read image size '{}': {e}", path.display())))
}

/// Probe a video file with the system `ffprobe` binary.
pub fn probe_video(source_path: &Path) -> StoryResult<VideoSourceInfo> {
    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| StoryError::probe(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(StoryError::probe(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    parse_ffprobe_json(source_path, &out.stdout)
}

pub(crate) fn parse_ffprobe_json(source_path: &Path, json: &[u8]) -> StoryResult<VideoSourceInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let parsed: ProbeOut = serde_json::from_slice(json)
        .map_err(|e| StoryError::probe(format!("ffprobe json parse failed: {e}")))?;
    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| StoryError::probe("no video stream found"))?;
    let width = video_stream
        .width
        .ok_or_else(|| StoryError::probe("missing video width from ffprobe"))?;
    let height = video_stream
        .height
        .ok_or_else(|| StoryError::probe("missing video height from ffprobe"))?;

    let duration_sec = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .or(video_stream.duration.as_deref())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);
    let has_audio = parsed
        .streams
        .iter()
        .any(|s| s.codec_type.as_deref() == Some("audio"));

    Ok(VideoSourceInfo {
        source_path: source_path.to_path_buf(),
        width,
        height,
        duration_sec,
        has_audio,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
