use crate::assets::media::{SourceClip, SourceKind};

/// Display time for still images when the caller gives no cap.
pub const DEFAULT_IMAGE_DURATION_SEC: u32 = 15;

/// Timeline length in whole seconds.
///
/// A positive `max_duration` always wins. Otherwise videos keep their own (truncated) length
/// and images fall back to `image_default`.
pub fn resolve_duration(source: &SourceClip, max_duration: u32, image_default: u32) -> u32 {
    resolve_duration_secs(source.kind, source.duration_sec, max_duration, image_default)
}

pub fn resolve_duration_secs(
    kind: SourceKind,
    source_duration_sec: Option<f64>,
    max_duration: u32,
    image_default: u32,
) -> u32 {
    if max_duration > 0 {
        return max_duration;
    }
    match kind {
        SourceKind::Image => image_default,
        SourceKind::Video => whole_seconds(source_duration_sec.unwrap_or(0.0)),
    }
}

fn whole_seconds(secs: f64) -> u32 {
    if !secs.is_finite() || secs <= 0.0 {
        return 0;
    }
    // sub-second clips count as one second
    (secs.floor() as u32).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/duration.rs"]
mod tests;
