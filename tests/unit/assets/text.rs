use super::*;

fn request(text: &str) -> TextRequest {
    TextRequest {
        text: text.to_string(),
        font: "Arial".to_string(),
        font_size: 32.0,
        color: Rgba8::rgb(255, 255, 255),
        max_width: Some(400.0),
        bg_color: None,
        fade_in_sec: 0.0,
    }
}

#[test]
fn empty_text_produces_no_element() {
    let mut factory = ParleyTextFactory::new().unwrap();
    assert!(factory.create_text(&request("")).unwrap().is_none());
}

#[test]
fn text_without_registered_fonts_is_validation_error() {
    let mut factory = ParleyTextFactory::new().unwrap();
    let err = factory.create_text(&request("hello")).unwrap_err();
    assert!(matches!(err, StoryError::Validation(_)));
}

#[test]
fn garbage_font_bytes_are_rejected() {
    let mut factory = ParleyTextFactory::new().unwrap();
    assert!(factory.register_font_bytes(b"not a font".to_vec()).is_err());
}

#[test]
fn invalid_font_size_is_rejected() {
    let mut engine = TextLayoutEngine::new();
    let err = engine
        .layout_plain("x", "Arial", 0.0, TextBrushRgba8::default(), None)
        .err()
        .unwrap();
    assert!(matches!(err, StoryError::Validation(_)));
}

#[test]
fn premul_to_straight_restores_channels() {
    let out = premul_to_straight(&[128, 0, 0, 128, 0, 0, 0, 0, 10, 20, 30, 255]);
    assert_eq!(out, vec![255, 0, 0, 128, 0, 0, 0, 0, 10, 20, 30, 255]);
}

#[test]
fn oversized_rasters_are_rejected() {
    assert!(pixmap_dims(70_000.0, 10.0).is_err());
    assert_eq!(pixmap_dims(400.0, 39.0).unwrap(), (400, 39));
}

fn fixture_font() -> Vec<u8> {
    std::fs::read(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/fonts/DejaVuSans.ttf"
    ))
    .unwrap()
}

fn factory_with_font() -> ParleyTextFactory {
    let mut factory = ParleyTextFactory::new().unwrap();
    let family = factory.register_font_bytes(fixture_font()).unwrap();
    assert_eq!(family, "DejaVu Sans");
    factory
}

fn render(factory: &mut ParleyTextFactory, req: &TextRequest) -> (VisualElement, image::RgbaImage) {
    let element = factory.create_text(req).unwrap().unwrap();
    let ElementHandle::Text { path, .. } = &element.handle else {
        panic!("expected a text handle");
    };
    let img = image::open(path).unwrap().to_rgba8();
    (element, img)
}

/// `(min_x, max_x, min_y, max_y)` of pixels with any coverage.
fn ink_bounds(img: &image::RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, px) in img.enumerate_pixels() {
        if px[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, x, y, y),
            Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
        });
    }
    bounds
}

fn glyph_request(text: &str) -> TextRequest {
    TextRequest {
        font: "DejaVu Sans".to_string(),
        font_size: 40.0,
        max_width: Some(600.0),
        ..request(text)
    }
}

#[test]
fn rasterized_text_is_inked_inside_the_element() {
    let mut factory = factory_with_font();
    let (element, img) = render(&mut factory, &glyph_request("WWWWWWWWWW"));

    assert_eq!(element.size.width, 600.0);
    assert_eq!(
        (img.width(), img.height()),
        (600, element.size.height as u32)
    );
    assert!(element.size.height >= 40.0);

    let (min_x, max_x, min_y, max_y) = ink_bounds(&img).expect("text raster has no ink");
    assert!(min_x < 20, "ink starts at x={min_x}");
    assert!(max_x > 200, "ink ends at x={max_x}");
    assert!(min_y > 0, "ink touches the top edge");
    assert!(max_y < img.height());
}

#[test]
fn ink_width_grows_with_text_length() {
    let mut factory = factory_with_font();
    let (_, short) = render(&mut factory, &glyph_request("WW"));
    let (_, long) = render(&mut factory, &glyph_request("WWWWWWWWWW"));

    let (s0, s1, _, _) = ink_bounds(&short).unwrap();
    let (l0, l1, _, _) = ink_bounds(&long).unwrap();
    assert!(l1 - l0 > 3 * (s1 - s0), "short {s0}..{s1}, long {l0}..{l1}");
}

#[test]
fn unknown_family_falls_back_to_first_registered_font() {
    let mut factory = factory_with_font();
    let (_, img) = render(&mut factory, &request("hello"));
    assert!(ink_bounds(&img).is_some());
}

#[test]
fn background_fills_box_behind_glyphs() {
    let mut factory = factory_with_font();
    let req = TextRequest {
        color: Rgba8::rgb(0, 0, 255),
        bg_color: Some(Rgba8::rgb(255, 255, 255)),
        ..glyph_request("example.com")
    };
    let (_, img) = render(&mut factory, &req);

    assert!(img.pixels().all(|px| px[3] == 255));
    assert!(img.pixels().any(|px| px[0] < 128 && px[2] > 200));
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
}
