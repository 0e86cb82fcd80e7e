use std::path::PathBuf;

use crate::{
    assets::media::SourceClip,
    assets::text::TextElementFactory,
    build::options::BuildOptions,
    build::result::StoryBuild,
    foundation::error::{StoryError, StoryResult},
    layout::engine::{LayoutEngine, caption_text},
    overlay::mention::{StoryMention, adjust_mention},
    overlay::sticker::{StorySticker, link_sticker},
    render::outputs::OutputPaths,
    render::scene::{Scene, StoryRenderer},
    timeline::duration::resolve_duration,
    timeline::segment::{plan_segment_jobs, render_segments},
};

/// Collaborators a build delegates to.
pub struct BuildBackends<'a> {
    /// Produces sized text elements.
    pub text: &'a mut dyn TextElementFactory,
    /// Encodes scenes and segments.
    pub renderer: &'a mut dyn StoryRenderer,
    /// Names output files.
    pub outputs: &'a mut dyn OutputPaths,
}

/// Composes a story from one photo or video.
#[derive(Clone, Debug, Default)]
pub struct StoryBuilder {
    path: PathBuf,
    caption: String,
    mentions: Vec<StoryMention>,
    bg_path: Option<PathBuf>,
}

impl StoryBuilder {
    /// Builder for the media at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Caption shown under the media.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    /// Users to tag; only the first one is placed.
    pub fn with_mentions(mut self, mentions: Vec<StoryMention>) -> Self {
        self.mentions = mentions;
        self
    }

    /// Background image covering the canvas.
    pub fn with_background(mut self, bg_path: impl Into<PathBuf>) -> Self {
        self.bg_path = Some(bg_path.into());
        self
    }

    /// Build from a video source.
    pub fn video(
        &self,
        opts: &BuildOptions,
        backends: BuildBackends<'_>,
    ) -> StoryResult<StoryBuild> {
        opts.validate()?;
        let source = SourceClip::video(&self.path)?;
        self.build_main(source, opts, backends)
    }

    /// Build from a still image, scaled to the canvas width.
    pub fn photo(
        &self,
        opts: &BuildOptions,
        backends: BuildBackends<'_>,
    ) -> StoryResult<StoryBuild> {
        opts.validate()?;
        let source = SourceClip::photo(&self.path, opts.canvas)?;
        self.build_main(source, opts, backends)
    }

    /// Lay out, render and split a story around an already adapted source.
    ///
    /// Missing files and bad styling fail before anything is rendered. No partial result is
    /// returned on failure.
    #[tracing::instrument(skip_all, fields(source = %self.path.display()))]
    pub fn build_main(
        &self,
        source: SourceClip,
        opts: &BuildOptions,
        backends: BuildBackends<'_>,
    ) -> StoryResult<StoryBuild> {
        let BuildBackends {
            text,
            renderer,
            outputs,
        } = backends;
        let layout = LayoutEngine::from_options(opts);
        let canvas = layout.canvas();

        let background = layout.place_background(self.bg_path.as_deref())?;
        let primary = layout.place_primary(source.element.clone());

        let mention = self.mentions.first();
        let caption = match caption_text(&self.caption, mention) {
            Some(t) => layout.place_caption(text, &t, &opts.caption, &primary)?,
            None => None,
        };

        let mut stickers: Vec<StorySticker> = Vec::new();
        let mut link_element = None;
        if let Some(link) = opts.link.as_ref().filter(|l| !l.url.is_empty()) {
            link_element = layout.place_link(text, link, &opts.caption.font, &primary)?;
            if let Some(placed) = &link_element {
                stickers.push(link_sticker(placed, link, canvas));
            }
        }

        let mentions: Vec<StoryMention> = adjust_mention(mention, caption.as_ref(), canvas)
            .into_iter()
            .collect();

        let duration = resolve_duration(&source, opts.max_duration, opts.image_default_duration);
        if duration == 0 {
            return Err(StoryError::validation(format!(
                "source '{}' has no usable duration",
                self.path.display()
            )));
        }

        let mut scene = Scene::new(canvas, opts.fps, duration);
        for placed in background
            .iter()
            .chain(std::iter::once(&primary))
            .chain(caption.iter())
            .chain(link_element.iter())
        {
            scene.push(placed);
        }

        tracing::info!(
            duration,
            layers = scene.layers.len(),
            stickers = stickers.len(),
            mentions = mentions.len(),
            "rendering story"
        );
        let path = outputs.next_path()?;
        renderer.render_scene(&scene, &path)?;

        let jobs = plan_segment_jobs(duration, opts.segment_max_sec, outputs)?;
        let paths = render_segments(renderer, &path, &jobs)?;

        tracing::info!(path = %path.display(), segments = paths.len(), "story built");
        Ok(StoryBuild::new(mentions, path, paths, stickers))
    }
}
