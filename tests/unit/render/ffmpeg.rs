use super::*;
use crate::foundation::core::{Canvas, Fps, Rect};
use crate::render::scene::SceneLayer;
use std::path::PathBuf;

fn story_scene(duration: u32) -> Scene {
    Scene {
        canvas: Canvas::STORY,
        fps: Fps::default(),
        duration_sec: duration,
        layers: vec![
            SceneLayer {
                handle: ElementHandle::Image {
                    path: PathBuf::from("bg.png"),
                },
                rect: Rect::new(0.0, 0.0, 720.0, 1280.0),
            },
            SceneLayer {
                handle: ElementHandle::Video {
                    path: PathBuf::from("in.mp4"),
                    has_audio: true,
                },
                rect: Rect::new(0.0, 140.0, 720.0, 1040.0),
            },
            SceneLayer {
                handle: ElementHandle::Text {
                    path: PathBuf::from("link.png"),
                    text: "example.com".to_string(),
                    fade_in_sec: 3.0,
                },
                rect: Rect::new(160.0, 450.0, 560.0, 490.0),
            },
        ],
    }
}

fn strs(args: &[OsString]) -> Vec<String> {
    args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
}

#[test]
fn filter_graph_chains_overlays_and_fades_text() {
    let g = filter_graph(&story_scene(20), "black");
    assert_eq!(
        g,
        "color=c=black:s=720x1280:r=24/1:d=20[base0]\
         ;[0:v]scale=720:1280,format=rgba[l0]\
         ;[base0][l0]overlay=x=0:y=0:eof_action=pass[base1]\
         ;[1:v]scale=720:900,format=rgba[l1]\
         ;[base1][l1]overlay=x=0:y=140:eof_action=pass[base2]\
         ;[2:v]scale=400:40,format=rgba,fade=t=in:st=0:d=3:alpha=1[l2]\
         ;[base2][l2]overlay=x=160:y=450:eof_action=pass[vout]"
    );
}

#[test]
fn scene_args_loop_stills_and_keep_video_audio() {
    let r = FfmpegRenderer::default();
    let args = strs(&r.scene_args(&story_scene(20), Path::new("out.mp4")).unwrap());

    let inputs: Vec<&str> = args
        .windows(2)
        .filter(|w| w[0] == "-i")
        .map(|w| w[1].as_str())
        .collect();
    assert_eq!(inputs, vec!["bg.png", "in.mp4", "link.png"]);
    assert_eq!(args.iter().filter(|a| *a == "-loop").count(), 2);

    let joined = args.join(" ");
    assert!(joined.contains("-map [vout] -map 1:a:0 -c:a aac"));
    assert!(joined.contains("-c:v libx264 -pix_fmt yuv420p -r 24/1 -t 20"));
    assert_eq!(args.first().map(String::as_str), Some("-loglevel"));
    assert_eq!(args.last().map(String::as_str), Some("out.mp4"));
}

#[test]
fn silent_scenes_drop_audio() {
    let mut scene = story_scene(5);
    scene.layers[1].handle = ElementHandle::Image {
        path: PathBuf::from("photo.jpg"),
    };
    let args = strs(
        &FfmpegRenderer::default()
            .scene_args(&scene, Path::new("o.mp4"))
            .unwrap(),
    );
    assert!(args.iter().any(|a| a == "-an"));
    assert!(!args.iter().any(|a| a == "-c:a"));
}

#[test]
fn invalid_scenes_are_rejected_before_spawning() {
    let r = FfmpegRenderer::default();
    assert!(r.scene_args(&story_scene(0), Path::new("o.mp4")).is_err());
    let mut empty = story_scene(5);
    empty.layers.clear();
    assert!(r.scene_args(&empty, Path::new("o.mp4")).is_err());
}

#[test]
fn range_args_seek_and_reencode() {
    let r = FfmpegRenderer::default();
    let range = SegmentRange::new(15, 20).unwrap();
    let args = strs(
        &r.range_args(Path::new("full.mp4"), range, Path::new("seg.mp4"))
            .unwrap(),
    );
    let joined = args.join(" ");
    assert!(joined.contains("-ss 15 -i full.mp4 -t 5"));
    assert!(joined.contains("-map 0:v:0 -map 0:a?"));
    assert!(joined.contains("-c:v libx264 -pix_fmt yuv420p -c:a aac"));
    assert_eq!(args.last().map(String::as_str), Some("seg.mp4"));

    let empty = SegmentRange::new(3, 3).unwrap();
    assert!(
        r.range_args(Path::new("full.mp4"), empty, Path::new("seg.mp4"))
            .is_err()
    );
}
