use crate::foundation::error::{StoryError, StoryResult};

/// Straight-alpha RGBA8 color parsed from a caller color string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a CSS-style color name, `#RRGGBB` or `#RRGGBBAA`.
    pub fn parse(s: &str) -> StoryResult<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return parse_hex(s).map_err(StoryError::validation);
        }
        named(&s.to_ascii_lowercase())
            .ok_or_else(|| StoryError::validation(format!("unknown color \"{s}\"")))
    }
}

fn named(name: &str) -> Option<Rgba8> {
    let c = match name {
        "white" => Rgba8::rgb(255, 255, 255),
        "black" => Rgba8::rgb(0, 0, 0),
        "red" => Rgba8::rgb(255, 0, 0),
        "green" => Rgba8::rgb(0, 128, 0),
        "lime" => Rgba8::rgb(0, 255, 0),
        "blue" => Rgba8::rgb(0, 0, 255),
        "yellow" => Rgba8::rgb(255, 255, 0),
        "cyan" | "aqua" => Rgba8::rgb(0, 255, 255),
        "magenta" | "fuchsia" => Rgba8::rgb(255, 0, 255),
        "gray" | "grey" => Rgba8::rgb(128, 128, 128),
        "orange" => Rgba8::rgb(255, 165, 0),
        "purple" => Rgba8::rgb(128, 0, 128),
        "pink" => Rgba8::rgb(255, 192, 203),
        "transparent" => Rgba8 {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        },
        _ => return None,
    };
    Some(c)
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }
    let (r, g, b, a) = match s.len() {
        6 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        ),
        8 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        ),
        _ => {
            return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
        }
    };
    Ok(Rgba8 { r, g, b, a })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
