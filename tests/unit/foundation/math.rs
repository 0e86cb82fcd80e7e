use super::*;

#[test]
fn round_to_seven_decimals() {
    assert_eq!(round_to(160.0 / 720.0, 7), 0.2222222);
    assert_eq!(round_to(2.0 / 3.0, 7), 0.6666667);
    assert_eq!(round_to(0.5, 7), 0.5);
    assert_eq!(round_to(-2.0 / 3.0, 7), -0.6666667);
}

#[test]
fn round_to_uses_exact_binary_value() {
    // Stored as 0.34781794999999998..., so it rounds down even though `x * 1e7` lands on .5.
    assert_eq!(round_to(0.34781795, 7), 0.3478179);
}

#[test]
fn round_to_breaks_exact_ties_to_even() {
    // 2^-8 is exactly 0.00390625.
    assert_eq!(round_to(0.00390625, 7), 0.0039062);
    assert_eq!(round_to(0.5, 0), 0.0);
    assert_eq!(round_to(1.5, 0), 2.0);
}

#[test]
fn round_to_passes_non_finite_through() {
    assert!(round_to(f64::NAN, 7).is_nan());
    assert_eq!(round_to(f64::INFINITY, 7), f64::INFINITY);
}

#[test]
fn normalize_px_guards_empty_extent() {
    assert_eq!(normalize_px(10.0, 0.0), 0.0);
    assert_eq!(normalize_px(360.0, 720.0), 0.5);
}

#[test]
fn unpremul_inverts_premultiplied_channels() {
    assert_eq!(unpremul_u8(0, 0), 0);
    assert_eq!(unpremul_u8(255, 255), 255);
    // 200 at alpha 128 premultiplies to 100.
    let back = unpremul_u8(100, 128);
    assert!((i32::from(back) - 200).abs() <= 1);
}
