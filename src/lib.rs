//! Story composition for vertical, full-screen video posts.
//!
//! A story is one photo or video placed on a fixed portrait canvas, with an optional
//! background, a caption, a tappable link label and a tagged user. Building a story produces
//! an encoded video, optional bounded-length segments, and the interactive regions
//! (stickers, mentions) an upload needs.
//!
//! # Pipeline overview
//!
//! 1. **Adapt**: photo/video path -> [`SourceClip`] (sized [`VisualElement`] + duration)
//! 2. **Lay out**: [`LayoutEngine`] places background, primary media, caption and link
//! 3. **Overlay**: placed link -> [`StorySticker`]; placed caption -> adjusted [`StoryMention`]
//! 4. **Time**: [`resolve_duration`] picks the timeline length
//! 5. **Render**: a [`StoryRenderer`] encodes the [`Scene`], then [`plan_segments`] splits
//!    anything longer than 15 seconds
//!
//! Rendering, text rasterization and output naming are trait seams ([`StoryRenderer`],
//! [`TextElementFactory`], [`OutputPaths`]); the stock implementations drive the system
//! `ffmpeg`, Parley + `vello_cpu`, and `tempfile`.
#![forbid(unsafe_code)]

mod assets;
mod build;
mod foundation;
mod layout;
mod overlay;
mod render;
mod timeline;

pub use crate::assets::color::Rgba8;
pub use crate::assets::media::{
    SourceClip, SourceKind, VideoSourceInfo, ensure_exists, probe_image_size, probe_video,
    scale_to_canvas_width,
};
pub use crate::assets::text::{
    ParleyTextFactory, TextBrushRgba8, TextElementFactory, TextLayoutEngine, TextRequest,
};
pub use crate::build::builder::{BuildBackends, StoryBuilder};
pub use crate::build::options::{BuildOptions, LinkOptions, TextStyle};
pub use crate::build::result::StoryBuild;
pub use crate::foundation::core::{Canvas, Fps, Point, Rect, Size, Vec2};
pub use crate::foundation::error::{StoryError, StoryResult};
pub use crate::layout::element::{ElementHandle, PlacedElement, VisualElement};
pub use crate::layout::engine::{LayoutEngine, caption_text, link_label};
pub use crate::overlay::mention::{
    MENTION_CENTER_X, MENTION_Y_OFFSET, MentionUser, StoryMention, adjust_mention,
};
pub use crate::overlay::sticker::{LINK_TAP_STATE, STORY_LINK_TYPE, StorySticker, link_sticker};
pub use crate::render::ffmpeg::{
    FfmpegRenderer, FfmpegRendererOpts, ensure_parent_dir, is_ffmpeg_on_path,
};
pub use crate::render::outputs::{OutputPaths, TempOutputs};
pub use crate::render::recording::{RecordingRenderer, RenderCall};
pub use crate::render::scene::{Scene, SceneLayer, StoryRenderer};
pub use crate::timeline::duration::{
    DEFAULT_IMAGE_DURATION_SEC, resolve_duration, resolve_duration_secs,
};
pub use crate::timeline::segment::{
    MAX_SEGMENT_SEC, SegmentJob, SegmentRange, plan_segment_jobs, plan_segments, render_segments,
};
