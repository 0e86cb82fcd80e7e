/// Round `v` to `decimals` fractional digits.
///
/// Rounds the exact binary value of `v`, with ties to even, the same way Python's
/// `round(v, n)` does. Scaling by `10^n` first would round an already inexact product and
/// can disagree in the last digit.
pub(crate) fn round_to(v: f64, decimals: usize) -> f64 {
    if !v.is_finite() {
        return v;
    }
    format!("{v:.decimals$}").parse().unwrap_or(v)
}

/// Express a pixel quantity as a fraction of `extent`, rounded to 7 decimals.
pub(crate) fn normalize_px(px: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    round_to(px / extent, 7)
}

/// Undo premultiplication of one color channel.
pub(crate) fn unpremul_u8(c: u8, a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let v = (u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a);
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
