use super::*;

#[test]
fn parses_named_colors_case_insensitively() {
    assert_eq!(Rgba8::parse("white").unwrap(), Rgba8::rgb(255, 255, 255));
    assert_eq!(Rgba8::parse(" Blue ").unwrap(), Rgba8::rgb(0, 0, 255));
    assert!(Rgba8::parse("not-a-color").is_err());
}

#[test]
fn parses_hex_rgb_and_rgba() {
    assert_eq!(Rgba8::parse("#ff0000").unwrap(), Rgba8::rgb(255, 0, 0));
    let c = Rgba8::parse("#0000ff80").unwrap();
    assert_eq!((c.b, c.a), (255, 128));
    assert!(Rgba8::parse("#fff").is_err());
    assert!(Rgba8::parse("#gg0000").is_err());
}

