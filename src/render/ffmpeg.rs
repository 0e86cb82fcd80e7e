use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::{
    foundation::error::{StoryError, StoryResult},
    layout::element::ElementHandle,
    render::scene::{Scene, StoryRenderer},
    timeline::segment::SegmentRange,
};

/// Encoder settings shared by full compositions and segments.
#[derive(Clone, Debug)]
pub struct FfmpegRendererOpts {
    /// Overwrite output files if they already exist.
    pub overwrite: bool,
    /// Video codec passed to `-c:v`.
    pub video_codec: String,
    /// Audio codec passed to `-c:a`.
    pub audio_codec: String,
    /// Output pixel format.
    pub pix_fmt: String,
    /// Canvas fill below all layers (ffmpeg color syntax).
    pub base_color: String,
}

impl Default for FfmpegRendererOpts {
    fn default() -> Self {
        Self {
            overwrite: true,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            pix_fmt: "yuv420p".to_string(),
            base_color: "black".to_string(),
        }
    }
}

/// Renderer that drives the system `ffmpeg` binary.
#[derive(Clone, Debug, Default)]
pub struct FfmpegRenderer {
    opts: FfmpegRendererOpts,
}

impl FfmpegRenderer {
    /// Create a renderer with the given encoder settings.
    pub fn new(opts: FfmpegRendererOpts) -> Self {
        Self { opts }
    }

    pub(crate) fn scene_args(&self, scene: &Scene, out: &Path) -> StoryResult<Vec<OsString>> {
        scene.validate()?;
        let rate = scene.fps.to_ffmpeg_rate();
        let dur = scene.duration_sec.to_string();

        let mut args: Vec<OsString> = Vec::new();
        push(&mut args, ["-loglevel", "error"]);
        push(&mut args, [if self.opts.overwrite { "-y" } else { "-n" }]);

        for layer in &scene.layers {
            match &layer.handle {
                ElementHandle::Image { path } | ElementHandle::Text { path, .. } => {
                    push(
                        &mut args,
                        [
                            "-loop",
                            "1",
                            "-framerate",
                            rate.as_str(),
                            "-t",
                            dur.as_str(),
                            "-i",
                        ],
                    );
                    args.push(path.as_os_str().to_owned());
                }
                ElementHandle::Video { path, .. } => {
                    push(&mut args, ["-t", dur.as_str(), "-i"]);
                    args.push(path.as_os_str().to_owned());
                }
            }
        }

        push(&mut args, ["-filter_complex"]);
        args.push(filter_graph(scene, &self.opts.base_color).into());
        push(&mut args, ["-map", "[vout]"]);
        match scene.audio_layer() {
            Some(i) => {
                let map = format!("{i}:a:0");
                push(
                    &mut args,
                    ["-map", map.as_str(), "-c:a", self.opts.audio_codec.as_str()],
                );
            }
            None => push(&mut args, ["-an"]),
        }
        push(
            &mut args,
            [
                "-c:v",
                self.opts.video_codec.as_str(),
                "-pix_fmt",
                self.opts.pix_fmt.as_str(),
                "-r",
                rate.as_str(),
                "-t",
                dur.as_str(),
                "-movflags",
                "+faststart",
            ],
        );
        args.push(out.as_os_str().to_owned());
        Ok(args)
    }

    pub(crate) fn range_args(
        &self,
        full: &Path,
        range: SegmentRange,
        out: &Path,
    ) -> StoryResult<Vec<OsString>> {
        if range.is_empty() {
            return Err(StoryError::validation("cannot extract an empty range"));
        }
        let start = range.start_sec.to_string();
        let len = range.len_secs().to_string();

        let mut args: Vec<OsString> = Vec::new();
        push(&mut args, ["-loglevel", "error"]);
        push(&mut args, [if self.opts.overwrite { "-y" } else { "-n" }]);
        push(&mut args, ["-ss", start.as_str(), "-i"]);
        args.push(full.as_os_str().to_owned());
        push(
            &mut args,
            [
                "-t",
                len.as_str(),
                "-map",
                "0:v:0",
                "-map",
                "0:a?",
                "-c:v",
                self.opts.video_codec.as_str(),
                "-pix_fmt",
                self.opts.pix_fmt.as_str(),
                "-c:a",
                self.opts.audio_codec.as_str(),
                "-movflags",
                "+faststart",
            ],
        );
        args.push(out.as_os_str().to_owned());
        Ok(args)
    }
}

impl StoryRenderer for FfmpegRenderer {
    #[tracing::instrument(skip(self, scene), fields(layers = scene.layers.len(), duration = scene.duration_sec))]
    fn render_scene(&mut self, scene: &Scene, out: &Path) -> StoryResult<()> {
        let args = self.scene_args(scene, out)?;
        run_ffmpeg(&args, out)
    }

    #[tracing::instrument(skip(self))]
    fn extract_range(&mut self, full: &Path, range: SegmentRange, out: &Path) -> StoryResult<()> {
        let args = self.range_args(full, range, out)?;
        run_ffmpeg(&args, out)
    }
}

/// Build the `filter_complex` graph: a solid base, then every layer scaled to its element
/// size and overlaid at its position. The final label is `[vout]`.
pub(crate) fn filter_graph(scene: &Scene, base_color: &str) -> String {
    let mut parts = vec![format!(
        "color=c={base_color}:s={}x{}:r={}:d={}[base0]",
        scene.canvas.width,
        scene.canvas.height,
        scene.fps.to_ffmpeg_rate(),
        scene.duration_sec
    )];

    let n = scene.layers.len();
    if n == 0 {
        parts.push("[base0]null[vout]".to_string());
        return parts.join(";");
    }
    for (i, layer) in scene.layers.iter().enumerate() {
        let w = layer.rect.width().round().max(1.0) as i64;
        let h = layer.rect.height().round().max(1.0) as i64;
        let fade = match &layer.handle {
            ElementHandle::Text { fade_in_sec, .. } if *fade_in_sec > 0.0 => {
                format!(",fade=t=in:st=0:d={fade_in_sec}:alpha=1")
            }
            _ => String::new(),
        };
        parts.push(format!("[{i}:v]scale={w}:{h},format=rgba{fade}[l{i}]"));

        let out = if i + 1 == n {
            "vout".to_string()
        } else {
            format!("base{}", i + 1)
        };
        parts.push(format!(
            "[base{i}][l{i}]overlay=x={}:y={}:eof_action=pass[{out}]",
            layer.rect.x0.round() as i64,
            layer.rect.y0.round() as i64
        ));
    }
    parts.join(";")
}

fn push<const N: usize>(args: &mut Vec<OsString>, items: [&str; N]) {
    args.extend(items.iter().map(OsString::from));
}

fn run_ffmpeg(args: &[OsString], out: &Path) -> StoryResult<()> {
    ensure_parent_dir(out)?;
    if !is_ffmpeg_on_path() {
        return Err(StoryError::render(
            "ffmpeg is required for MP4 encoding, but was not found on PATH",
        ));
    }

    let output = Command::new("ffmpeg")
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            StoryError::render(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(StoryError::render(format!(
            "ffmpeg exited with status {} writing '{}': {}",
            output.status,
            out.display(),
            stderr.trim()
        )));
    }
    tracing::info!(out = %out.display(), "wrote video");
    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> StoryResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/render/ffmpeg.rs"]
mod tests;
