//! Splitting of long compositions into bounded segments.
//!
//! Planning is pure; rendering the planned jobs goes through a [`StoryRenderer`].

use std::path::{Path, PathBuf};

use crate::{
    foundation::error::{StoryError, StoryResult},
    render::outputs::OutputPaths,
    render::scene::StoryRenderer,
};

/// Longest segment the platform accepts, seconds.
pub const MAX_SEGMENT_SEC: u32 = 15;

/// Half-open range `[start_sec, end_sec)` of the composed timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SegmentRange {
    /// Inclusive start, seconds.
    pub start_sec: u32,
    /// Exclusive end, seconds.
    pub end_sec: u32,
}

impl SegmentRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start_sec: u32, end_sec: u32) -> StoryResult<Self> {
        if start_sec > end_sec {
            return Err(StoryError::validation("SegmentRange start must be <= end"));
        }
        Ok(Self { start_sec, end_sec })
    }

    /// Length in seconds.
    pub fn len_secs(self) -> u32 {
        self.end_sec.saturating_sub(self.start_sec)
    }

    /// Return `true` when the range is empty.
    pub fn is_empty(self) -> bool {
        self.start_sec == self.end_sec
    }
}

/// Cut `[0, duration)` into contiguous ranges of at most `max_len` seconds.
///
/// Returns an empty list when no split is needed (`duration <= max_len`).
pub fn plan_segments(duration: u32, max_len: u32) -> StoryResult<Vec<SegmentRange>> {
    if max_len == 0 {
        return Err(StoryError::validation("segment length must be > 0"));
    }
    if duration <= max_len {
        return Ok(Vec::new());
    }
    let count = duration.div_ceil(max_len);
    let mut out = Vec::with_capacity(count as usize);
    for i in 0..count {
        let start = i * max_len;
        let end = start + max_len.min(duration - start);
        out.push(SegmentRange {
            start_sec: start,
            end_sec: end,
        });
    }
    Ok(out)
}

/// One planned segment render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentJob {
    /// Position in the segment list.
    pub index: usize,
    /// Timeline range to extract.
    pub range: SegmentRange,
    /// Where the segment is written.
    pub out_path: PathBuf,
}

/// Pair each planned range with an output path, in index order.
pub fn plan_segment_jobs(
    duration: u32,
    max_len: u32,
    outputs: &mut dyn OutputPaths,
) -> StoryResult<Vec<SegmentJob>> {
    plan_segments(duration, max_len)?
        .into_iter()
        .enumerate()
        .map(|(index, range)| {
            Ok(SegmentJob {
                index,
                range,
                out_path: outputs.next_path()?,
            })
        })
        .collect()
}

/// Render segment jobs one after another from the full composition at `full`.
pub fn render_segments(
    renderer: &mut dyn StoryRenderer,
    full: &Path,
    jobs: &[SegmentJob],
) -> StoryResult<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(jobs.len());
    for job in jobs {
        tracing::info!(
            index = job.index,
            start = job.range.start_sec,
            end = job.range.end_sec,
            out = %job.out_path.display(),
            "rendering segment"
        );
        renderer.extract_range(full, job.range, &job.out_path)?;
        paths.push(job.out_path.clone());
    }
    Ok(paths)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/segment.rs"]
mod tests;
