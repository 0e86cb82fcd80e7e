use crate::{
    foundation::core::Canvas,
    foundation::math::normalize_px,
    layout::element::PlacedElement,
};

/// Horizontal center of a mention region as the platform expects it.
pub const MENTION_CENTER_X: f64 = 0.49892962;

/// Vertical offset added to a mention region below the caption top, canvas fraction.
pub const MENTION_Y_OFFSET: f64 = 0.02;

/// Tagged user reference.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MentionUser {
    /// Platform user id.
    pub pk: String,
    /// Username without the leading `@`.
    pub username: String,
}

/// A tagged user plus its normalized geometry on the canvas.
///
/// Geometry is `None` until resolved against a rendered caption.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StoryMention {
    /// Tagged user.
    pub user: MentionUser,
    /// Horizontal center, canvas fraction.
    pub x: Option<f64>,
    /// Vertical position, canvas fraction.
    pub y: Option<f64>,
    /// Width, canvas fraction.
    pub width: Option<f64>,
    /// Height, canvas fraction.
    pub height: Option<f64>,
    /// Rotation in degrees.
    pub rotation: Option<f64>,
}

impl StoryMention {
    /// Mention without geometry.
    pub fn new(user: MentionUser) -> Self {
        Self {
            user,
            x: None,
            y: None,
            width: None,
            height: None,
            rotation: None,
        }
    }

    /// `@username`, used as caption text when no caption is given.
    pub fn display_handle(&self) -> String {
        if self.user.username.is_empty() {
            return String::new();
        }
        format!("@{}", self.user.username)
    }

    /// Whether geometry has been resolved.
    pub fn has_geometry(&self) -> bool {
        self.x.is_some() && self.y.is_some() && self.width.is_some() && self.height.is_some()
    }
}

/// Align a mention with the placed caption element.
///
/// Returns `None` when there is no mention or no caption; such a mention must be dropped.
pub fn adjust_mention(
    mention: Option<&StoryMention>,
    caption: Option<&PlacedElement>,
    canvas: Canvas,
) -> Option<StoryMention> {
    let (mention, caption) = (mention?, caption?);
    let adjusted = StoryMention {
        user: mention.user.clone(),
        x: Some(MENTION_CENTER_X),
        y: Some(normalize_px(caption.top(), canvas.h()) + MENTION_Y_OFFSET),
        width: Some(normalize_px(caption.width(), canvas.w())),
        height: Some(normalize_px(caption.height(), canvas.h())),
        rotation: Some(0.0),
    };
    tracing::debug!(user = %adjusted.user.username, y = ?adjusted.y, "mention aligned to caption");
    Some(adjusted)
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/mention.rs"]
mod tests;
