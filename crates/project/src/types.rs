//! Persisted project format.
//!
//! The JSON layout matches the annotation tool's established project files:
//! camelCase keys, decoded series content omitted (only the `source` path is
//! written, content is re-derived on load), and the alignment/labeling
//! sub-store payloads carried as opaque JSON values.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Top-level persisted project.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProject {
    /// The distinguished reference track, if one was loaded.
    pub reference_track: Option<SavedTrack>,
    /// All non-reference tracks.
    pub tracks: Vec<SavedTrack>,
    /// Project name and save timestamp.
    pub metadata: ProjectMetadata,
    /// Alignment sub-store state — opaque to this crate.
    pub alignment: serde_json::Value,
    /// Labeling sub-store state — opaque to this crate.
    pub labeling: serde_json::Value,
    /// UI state restored on load.
    pub ui: UiState,
}

impl SavedProject {
    /// Create a new empty project with the given name, stamped now.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            reference_track: None,
            tracks: Vec::new(),
            metadata: ProjectMetadata {
                name: name.into(),
                time_saved: epoch_seconds_now(),
            },
            alignment: serde_json::Value::Null,
            labeling: serde_json::Value::Null,
            ui: UiState::default(),
        }
    }

    /// Iterate over all tracks: the reference track first (if present), then
    /// the rest in list order.
    pub fn all_tracks(&self) -> impl Iterator<Item = &SavedTrack> {
        self.reference_track.iter().chain(self.tracks.iter())
    }

    /// Total number of persisted series across all tracks.
    pub fn series_count(&self) -> usize {
        self.all_tracks().map(|t| t.time_series.len()).sum()
    }
}

/// Persisted form of a track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTrack {
    pub id: String,
    pub minimized: bool,
    pub time_series: Vec<SavedSeries>,
}

/// Persisted form of an aligned time series.
///
/// Decoded content is intentionally absent: it is re-derived from `source`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSeries {
    pub id: String,
    /// Owning track's id (the series' weak back-reference).
    #[serde(rename = "trackID")]
    pub track_id: String,
    pub reference_start: f64,
    pub reference_end: f64,
    /// Source file path the content is re-decoded from on load.
    pub source: String,
    pub aligned: bool,
}

/// Project metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    pub name: String,
    /// Save timestamp, seconds since the Unix epoch.
    pub time_saved: f64,
}

/// Which main tab is active.
///
/// Older project files stored a third `"file"` tab; it maps to `Alignment`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectTab {
    #[serde(alias = "file")]
    Alignment,
    Labeling,
}

/// UI state persisted with the project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub current_tab: ProjectTab,
    /// Reference view pan: leftmost visible reference time (seconds).
    pub reference_view_start: f64,
    /// Reference view zoom: pixels per second.
    #[serde(rename = "referenceViewPPS")]
    pub reference_view_pps: f64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            current_tab: ProjectTab::Alignment,
            reference_view_start: 0.0,
            reference_view_pps: 0.1,
        }
    }
}

/// An entry in the recent-projects list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentEntry {
    /// Project file path.
    pub path: String,
    /// Project name at the time it was opened.
    pub name: String,
    /// Seconds since the Unix epoch.
    pub last_opened: f64,
}

/// Current wall-clock time as seconds since the Unix epoch.
pub fn epoch_seconds_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
