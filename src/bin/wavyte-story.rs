use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wavyte_story::{
    BuildBackends, BuildOptions, FfmpegRenderer, FfmpegRendererOpts, MentionUser, ParleyTextFactory,
    StoryBuilder, StoryMention, TempOutputs,
};

#[derive(Parser, Debug)]
#[command(name = "wavyte-story", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a story from a video (requires `ffmpeg` and `ffprobe` on PATH).
    Video(BuildArgs),
    /// Compose a story from a still image (requires `ffmpeg` on PATH).
    Photo(BuildArgs),
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Source photo or video.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Caption under the media.
    #[arg(long, default_value = "")]
    caption: String,

    /// Username to tag (without `@`).
    #[arg(long)]
    mention: Option<String>,

    /// User id of the tagged user.
    #[arg(long, default_value = "")]
    mention_pk: String,

    /// Background image covering the canvas.
    #[arg(long)]
    bg: Option<PathBuf>,

    /// Link shown as a tappable label.
    #[arg(long)]
    link: Option<String>,

    /// Timeline cap in seconds (0 = source length, 15 s for photos).
    #[arg(long)]
    max_duration: Option<u32>,

    /// Font file (TTF/OTF) for caption and link text. Repeatable. Required whenever a
    /// caption, mention or link is drawn; the first file is used when the requested family
    /// is not registered.
    #[arg(long = "font-file")]
    font_files: Vec<PathBuf>,

    /// Build options JSON; command-line flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for rendered files (default: system temp dir).
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (args, is_video) = match cli.cmd {
        Command::Video(args) => (args, true),
        Command::Photo(args) => (args, false),
    };
    cmd_build(args, is_video)
}

fn cmd_build(args: BuildArgs, is_video: bool) -> anyhow::Result<()> {
    let mut opts = match &args.config {
        Some(p) => BuildOptions::from_path(p)?,
        None => BuildOptions::default(),
    };
    if let Some(max) = args.max_duration {
        opts.max_duration = max;
    }
    if let Some(url) = args.link {
        let mut link = opts.link.take().unwrap_or_default();
        link.url = url;
        opts.link = Some(link);
    }

    let draws_text = !args.caption.is_empty()
        || args.mention.as_deref().is_some_and(|m| !m.is_empty())
        || opts.link.as_ref().is_some_and(|l| !l.url.is_empty());
    if draws_text && args.font_files.is_empty() {
        anyhow::bail!(
            "--font-file is required to draw a caption, mention or link (no system fonts are used)"
        );
    }

    let mut builder = StoryBuilder::new(&args.in_path).with_caption(args.caption);
    if let Some(bg) = args.bg {
        builder = builder.with_background(bg);
    }
    if let Some(username) = args.mention {
        builder = builder.with_mentions(vec![StoryMention::new(MentionUser {
            pk: args.mention_pk,
            username,
        })]);
    }

    let mut text = ParleyTextFactory::new()?;
    for f in &args.font_files {
        let family = text.register_font_file(f)?;
        tracing::info!(font = %f.display(), family = %family, "font registered");
    }
    let mut renderer = FfmpegRenderer::new(FfmpegRendererOpts::default());
    let mut outputs = match args.out_dir {
        Some(dir) => TempOutputs::new(dir),
        None => TempOutputs::system(),
    };

    let backends = BuildBackends {
        text: &mut text,
        renderer: &mut renderer,
        outputs: &mut outputs,
    };
    let build = if is_video {
        builder.video(&opts, backends)
    } else {
        builder.photo(&opts, backends)
    }
    .with_context(|| format!("build story from '{}'", args.in_path.display()))?;

    println!("{}", build.to_json_pretty()?);
    Ok(())
}
