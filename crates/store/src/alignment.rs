//! Alignment sub-store state: marker correspondences.
//!
//! A marker pins one local timestamp of a series to a point on the reference
//! timeline; two markers determine the series' affine placement. The state is
//! serialized opaquely into the project file and captured whole in alignment
//! snapshots.

use serde::{Deserialize, Serialize};

/// One local-time / reference-time correspondence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentMarker {
    pub series_id: String,
    pub local_time: f64,
    pub reference_time: f64,
}

/// All alignment markers, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentState {
    pub markers: Vec<AlignmentMarker>,
}

impl AlignmentState {
    pub fn add_marker(&mut self, series_id: &str, local_time: f64, reference_time: f64) {
        self.markers.push(AlignmentMarker {
            series_id: series_id.to_string(),
            local_time,
            reference_time,
        });
    }

    /// Drop all markers belonging to a series (called when the series' track
    /// is deleted).
    pub fn remove_markers_for_series(&mut self, series_id: &str) {
        self.markers.retain(|m| m.series_id != series_id);
    }

    pub fn markers_for_series<'a>(
        &'a self,
        series_id: &'a str,
    ) -> impl Iterator<Item = &'a AlignmentMarker> + 'a {
        self.markers.iter().filter(move |m| m.series_id == series_id)
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_filter_markers() {
        let mut state = AlignmentState::default();
        state.add_marker("series-0", 1.0, 2.0);
        state.add_marker("series-1", 3.0, 4.0);
        state.add_marker("series-0", 5.0, 6.0);

        assert_eq!(state.markers.len(), 3);
        assert_eq!(state.markers_for_series("series-0").count(), 2);
        assert_eq!(state.markers_for_series("series-9").count(), 0);
    }

    #[test]
    fn remove_markers_for_series() {
        let mut state = AlignmentState::default();
        state.add_marker("series-0", 1.0, 2.0);
        state.add_marker("series-1", 3.0, 4.0);

        state.remove_markers_for_series("series-0");
        assert_eq!(state.markers.len(), 1);
        assert_eq!(state.markers[0].series_id, "series-1");
    }

    #[test]
    fn serde_round_trip() {
        let mut state = AlignmentState::default();
        state.add_marker("series-0", 1.5, 2.5);

        let value = serde_json::to_value(&state).unwrap();
        let back: AlignmentState = serde_json::from_value(value).unwrap();
        assert_eq!(back, state);
    }
}
