//! Core shared types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A closed interval `[start, end]` on some time axis (seconds).
///
/// The axis itself (reference timeline vs. a track's local time base) is
/// determined by context; `TimeRange` only guarantees `end >= start` when
/// constructed through [`TimeRange::new`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    /// Create a range, returning `None` when `end < start`.
    pub fn new(start: f64, end: f64) -> Option<Self> {
        if end >= start {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Create a range starting at zero with the given duration.
    pub fn from_duration(duration: f64) -> Self {
        Self {
            start: 0.0,
            end: duration.max(0.0),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the range has zero duration.
    pub fn is_degenerate(&self) -> bool {
        self.end == self.start
    }

    /// Open-start / closed-end containment: `t > start && t <= end`.
    pub fn contains_open_closed(&self, t: f64) -> bool {
        t > self.start && t <= self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}s, {:.3}s]", self.start, self.end)
    }
}

/// Kind of loadable source file, dispatched by file suffix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// Tab-separated sensor data (`.tsv`); may carry several parallel channels.
    Sensor,
    /// Video container (`.webm`, `.mp4`, `.mov`); yields a single series.
    Video,
}

impl SourceKind {
    /// Determine the source kind from a path's extension.
    ///
    /// Returns `None` for unrecognized or missing extensions.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "tsv" => Some(Self::Sensor),
            "webm" | "mp4" | "mov" => Some(Self::Video),
            _ => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor => write!(f, "sensor"),
            Self::Video => write!(f, "video"),
        }
    }
}
