use std::collections::BTreeMap;

use crate::{
    build::options::LinkOptions,
    foundation::core::Canvas,
    foundation::math::normalize_px,
    layout::element::PlacedElement,
};

/// Discriminator for link stickers.
pub const STORY_LINK_TYPE: &str = "story_link";

/// Tap-state identifier sent with every link sticker.
pub const LINK_TAP_STATE: &str = "link_sticker_default";

/// Interactive region attached to a story.
///
/// `x`, `y`, `width` and `height` are canvas fractions rounded to 7 decimals, computed once
/// from pixel geometry when the sticker is created.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StorySticker {
    /// Left edge, fraction of canvas width.
    pub x: f64,
    /// Top edge, fraction of canvas height.
    pub y: f64,
    /// Stacking order.
    pub z: f64,
    /// Width, fraction of canvas width.
    pub width: f64,
    /// Height, fraction of canvas height.
    pub height: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Sticker kind, e.g. `story_link`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Kind-specific payload.
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Turn the placed link label into a `story_link` sticker.
pub fn link_sticker(placed: &PlacedElement, link: &LinkOptions, canvas: Canvas) -> StorySticker {
    let mut extra = BTreeMap::new();
    extra.insert("link_type".to_string(), serde_json::json!("web"));
    extra.insert("url".to_string(), serde_json::json!(link.url));
    extra.insert(
        "tap_state_str_id".to_string(),
        serde_json::json!(LINK_TAP_STATE),
    );

    StorySticker {
        x: normalize_px(placed.left(), canvas.w()),
        y: normalize_px(placed.top(), canvas.h()),
        z: link.sticker_z,
        width: normalize_px(placed.width(), canvas.w()),
        height: normalize_px(placed.height(), canvas.h()),
        rotation: link.sticker_rotation,
        kind: STORY_LINK_TYPE.to_string(),
        extra,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/sticker.rs"]
mod tests;
