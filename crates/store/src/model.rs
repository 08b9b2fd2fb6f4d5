//! The live in-memory model: tracks and their aligned time series.
//!
//! The `ProjectStore` is the exclusive owner of the model; observers only ever
//! read it. A series holds its owning track's id as a weak back-reference
//! (resolved through `ModelIndex`), never a pointer, so there are no
//! ownership cycles.

use std::path::PathBuf;

use al_common::TimeRange;
use al_decode::DecodedSource;

/// Decoded content of one channel of a source file.
///
/// Never persisted; re-derived from the owning series' source path on project
/// load. Immutable once decoded.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeriesData {
    /// Channel name ("video" for video-backed content).
    pub name: String,
    /// Content start in the source's local time base (seconds).
    pub local_start: f64,
    /// Content end in the source's local time base (seconds).
    pub local_end: f64,
    /// Channel samples (empty for video content).
    pub values: Vec<f64>,
}

impl TimeSeriesData {
    pub fn local_range(&self) -> TimeRange {
        TimeRange {
            start: self.local_start,
            end: self.local_end,
        }
    }
}

/// A time series placed on the shared reference timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedTimeSeries {
    pub id: String,
    /// Owning track's id — a non-owning back-reference for lookup only.
    pub track_id: String,
    /// Where the content starts on the reference timeline.
    pub reference_start: f64,
    /// Where the content ends on the reference timeline.
    /// Invariant: `reference_end >= reference_start`.
    pub reference_end: f64,
    /// Source file the content was decoded from.
    pub source: PathBuf,
    /// Whether the user has aligned this series (vs. the load-time default).
    pub aligned: bool,
    /// Decoded content channels; parallel channels share one local time span.
    pub time_series: Vec<TimeSeriesData>,
}

impl AlignedTimeSeries {
    pub fn reference_range(&self) -> TimeRange {
        TimeRange {
            start: self.reference_start,
            end: self.reference_end,
        }
    }
}

/// A track: an ordered group of aligned time series.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub id: String,
    pub series: Vec<AlignedTimeSeries>,
    pub minimized: bool,
}

/// The whole live model: at most one reference track plus the track list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectModel {
    pub reference_track: Option<Track>,
    pub tracks: Vec<Track>,
}

impl ProjectModel {
    /// Iterate all tracks, reference track first (if present).
    pub fn all_tracks(&self) -> impl Iterator<Item = &Track> {
        self.reference_track.iter().chain(self.tracks.iter())
    }

    /// Remove a track by id, searching the reference slot and the list.
    /// Returns the removed track, or `None` if the id is unknown.
    pub fn remove_track(&mut self, track_id: &str) -> Option<Track> {
        if self
            .reference_track
            .as_ref()
            .is_some_and(|t| t.id == track_id)
        {
            let removed = self.reference_track.take();
            tracing::debug!(track_id, "Removed reference track");
            return removed;
        }
        if let Some(pos) = self.tracks.iter().position(|t| t.id == track_id) {
            let track = self.tracks.remove(pos);
            tracing::debug!(track_id, "Removed track");
            return Some(track);
        }
        None
    }

    /// Drop everything (new project / project reset).
    pub fn clear(&mut self) {
        self.reference_track = None;
        self.tracks.clear();
    }

    /// Total number of series across all tracks.
    pub fn series_count(&self) -> usize {
        self.all_tracks().map(|t| t.series.len()).sum()
    }
}

/// Wrap decoded source content into model content channels.
///
/// Sensor content yields one channel per column, all sharing the file's local
/// span; video content yields a single channel running `0..duration`.
pub fn time_series_from_decoded(decoded: &DecodedSource) -> Vec<TimeSeriesData> {
    match decoded {
        DecodedSource::Sensor(data) => {
            let range = data.local_range();
            data.channels
                .iter()
                .map(|ch| TimeSeriesData {
                    name: ch.name.clone(),
                    local_start: range.start,
                    local_end: range.end,
                    values: ch.values.clone(),
                })
                .collect()
        }
        DecodedSource::Video(meta) => vec![TimeSeriesData {
            name: "video".to_string(),
            local_start: 0.0,
            local_end: meta.duration,
            values: Vec::new(),
        }],
    }
}
