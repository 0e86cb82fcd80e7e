use super::*;

#[test]
fn defaults_match_story_conventions() {
    let o = BuildOptions::default();
    assert_eq!(o.canvas, Canvas::STORY);
    assert_eq!(o.fps, Fps { num: 24, den: 1 });
    assert_eq!(o.max_duration, 0);
    assert_eq!(o.segment_max_sec, 15);
    assert_eq!(o.image_default_duration, 15);
    assert_eq!(o.caption_max_width, 600.0);
    assert_eq!(o.caption.font, "Arial");
    assert_eq!(o.caption.font_size, 100.0);
    assert_eq!(o.caption.color, "white");
    assert!(o.link.is_none());
    o.validate().unwrap();

    let l = LinkOptions::new("https://example.com");
    assert_eq!(l.width, 400.0);
    assert_eq!(l.font_size, 32.0);
    assert_eq!(l.color, "blue");
    assert_eq!(l.bg_color, "white");
    assert_eq!(l.fade_in_sec, 3.0);
    assert_eq!((l.left, l.top), (None, None));
    assert_eq!((l.sticker_z, l.sticker_rotation), (0.0, 0.0));
}

#[test]
fn partial_json_fills_in_defaults() {
    let json = br##"{
        "max_duration": 10,
        "caption": {"color": "#ffcc00"},
        "link": {"url": "https://example.com", "top": 200.0}
    }"##;
    let o = BuildOptions::from_reader(&json[..]).unwrap();
    assert_eq!(o.max_duration, 10);
    assert_eq!(o.caption.color, "#ffcc00");
    assert_eq!(o.caption.font, "Arial");
    let link = o.link.unwrap();
    assert_eq!(link.top, Some(200.0));
    assert_eq!(link.left, None);
    assert_eq!(link.width, 400.0);
}

#[test]
fn malformed_json_is_serde_error() {
    let err = BuildOptions::from_reader(&b"{not json"[..]).unwrap_err();
    assert!(matches!(err, StoryError::Serde(_)));
}

#[test]
fn validation_rejects_bad_values() {
    let bad = [
        BuildOptions {
            segment_max_sec: 0,
            ..BuildOptions::default()
        },
        BuildOptions {
            canvas: Canvas {
                width: 719,
                height: 1280,
            },
            ..BuildOptions::default()
        },
        BuildOptions {
            fps: Fps { num: 24, den: 0 },
            ..BuildOptions::default()
        },
        BuildOptions {
            caption: TextStyle {
                color: "octarine".to_string(),
                ..TextStyle::default()
            },
            ..BuildOptions::default()
        },
        BuildOptions {
            link: Some(LinkOptions {
                width: 0.0,
                ..LinkOptions::new("https://example.com")
            }),
            ..BuildOptions::default()
        },
        BuildOptions {
            link: Some(LinkOptions {
                bg_color: "#12".to_string(),
                ..LinkOptions::new("https://example.com")
            }),
            ..BuildOptions::default()
        },
    ];
    for o in bad {
        assert!(matches!(o.validate(), Err(StoryError::Validation(_))), "{o:?}");
    }
}

#[test]
fn missing_options_file_is_reported() {
    let err = BuildOptions::from_path("/no/such/options.json").unwrap_err();
    assert!(err.to_string().contains("/no/such/options.json"));
}
