use super::*;

#[test]
fn photo_is_scaled_to_canvas_width() {
    let s = scale_to_canvas_width(1080, 1350, Canvas::STORY);
    assert_eq!(s, Size::new(720.0, 900.0));

    // 720 / 1000 * 333 = 239.76 -> truncated.
    let s = scale_to_canvas_width(1000, 333, Canvas::STORY);
    assert_eq!(s, Size::new(720.0, 239.0));
}

#[test]
fn image_clip_has_no_intrinsic_duration() {
    let clip = SourceClip::from_image_size(Path::new("a.jpg"), 1440, 1440, Canvas::STORY);
    assert_eq!(clip.kind, SourceKind::Image);
    assert_eq!(clip.duration_sec, None);
    assert_eq!(clip.element.size, Size::new(720.0, 720.0));
}

#[test]
fn missing_source_is_invalid_path() {
    let err = SourceClip::photo(Path::new("/definitely/missing.jpg"), Canvas::STORY).unwrap_err();
    assert!(matches!(err, StoryError::InvalidPath(_)));
    let err = SourceClip::video(Path::new("/definitely/missing.mp4")).unwrap_err();
    assert!(matches!(err, StoryError::InvalidPath(_)));
}

#[test]
fn ffprobe_json_yields_size_duration_and_audio() {
    let json = br#"{
        "streams": [
            {"codec_type": "video", "width": 720, "height": 1280, "r_frame_rate": "30/1"},
            {"codec_type": "audio", "sample_rate": "44100"}
        ],
        "format": {"duration": "20.040000"}
    }"#;
    let info = parse_ffprobe_json(Path::new("in.mp4"), json).unwrap();
    assert_eq!((info.width, info.height), (720, 1280));
    assert!((info.duration_sec - 20.04).abs() < 1e-9);
    assert!(info.has_audio);

    let clip = SourceClip::from_video_info(info);
    assert_eq!(clip.kind, SourceKind::Video);
    assert_eq!(
        clip.element.handle,
        ElementHandle::Video {
            path: PathBuf::from("in.mp4"),
            has_audio: true
        }
    );
}

#[test]
fn ffprobe_json_without_video_stream_is_probe_error() {
    let json = br#"{"streams": [{"codec_type": "audio"}]}"#;
    let err = parse_ffprobe_json(Path::new("a.m4a"), json).unwrap_err();
    assert!(matches!(err, StoryError::Probe(_)));
}
