//! Annotation label types.

use serde::{Deserialize, Serialize};

/// An annotation on the shared reference timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Class name assigned to this interval (e.g. "walk").
    pub class_name: String,
    /// Interval start in reference time (seconds).
    pub timestamp_start: f64,
    /// Interval end in reference time (seconds).
    pub timestamp_end: f64,
}

impl Label {
    pub fn new(class_name: impl Into<String>, timestamp_start: f64, timestamp_end: f64) -> Self {
        Self {
            class_name: class_name.into(),
            timestamp_start,
            timestamp_end,
        }
    }
}

/// A label projected into a track's *local* time base.
///
/// Transient: produced only during export, never stored or persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MappedLabel {
    pub class_name: String,
    /// Interval start in local time (seconds).
    pub timestamp_start: f64,
    /// Interval end in local time (seconds).
    pub timestamp_end: f64,
}

impl MappedLabel {
    /// Open-start / closed-end test: a row belongs to this label when
    /// `t > start && t <= end`.
    pub fn contains(&self, t: f64) -> bool {
        t > self.timestamp_start && t <= self.timestamp_end
    }
}
