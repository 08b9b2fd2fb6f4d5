//! ID-keyed lookup indices over the live model.
//!
//! The index is rebuilt deterministically from the track/series graph after
//! every structural change; its contents are always exactly the set reachable
//! from `reference_track ∪ tracks`. Positions stored here are only valid
//! against the model the index was built from — the store rebuilds before any
//! observer can look.

use std::collections::HashMap;

use crate::model::{AlignedTimeSeries, ProjectModel, Track};

/// Where a track lives in the model.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrackSlot {
    Reference,
    Listed(usize),
}

/// Lookup tables: track id → slot, series id → (owning slot, position).
#[derive(Clone, Debug, Default)]
pub struct ModelIndex {
    tracks: HashMap<String, TrackSlot>,
    series: HashMap<String, (TrackSlot, usize)>,
}

impl ModelIndex {
    /// Rebuild both indices from the current model.
    pub fn rebuild(model: &ProjectModel) -> Self {
        let mut tracks = HashMap::new();
        let mut series = HashMap::new();

        let mut insert_track = |track: &Track, slot: TrackSlot| {
            tracks.insert(track.id.clone(), slot);
            for (pos, s) in track.series.iter().enumerate() {
                series.insert(s.id.clone(), (slot, pos));
            }
        };

        if let Some(reference) = &model.reference_track {
            insert_track(reference, TrackSlot::Reference);
        }
        for (i, track) in model.tracks.iter().enumerate() {
            insert_track(track, TrackSlot::Listed(i));
        }

        tracing::debug!(
            tracks = tracks.len(),
            series = series.len(),
            "Rebuilt model index"
        );
        Self { tracks, series }
    }

    pub fn contains_track(&self, id: &str) -> bool {
        self.tracks.contains_key(id)
    }

    pub fn contains_series(&self, id: &str) -> bool {
        self.series.contains_key(id)
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn track_ids(&self) -> impl Iterator<Item = &str> {
        self.tracks.keys().map(|s| s.as_str())
    }

    pub fn series_ids(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(|s| s.as_str())
    }

    /// Resolve a track id against the model this index was built from.
    pub fn track<'m>(&self, model: &'m ProjectModel, id: &str) -> Option<&'m Track> {
        match self.tracks.get(id)? {
            TrackSlot::Reference => model.reference_track.as_ref(),
            TrackSlot::Listed(i) => model.tracks.get(*i),
        }
    }

    /// Resolve a series id against the model this index was built from.
    pub fn series<'m>(&self, model: &'m ProjectModel, id: &str) -> Option<&'m AlignedTimeSeries> {
        let (slot, pos) = self.series.get(id)?;
        let track = match slot {
            TrackSlot::Reference => model.reference_track.as_ref()?,
            TrackSlot::Listed(i) => model.tracks.get(*i)?,
        };
        track.series.get(*pos)
    }

    /// Resolve a series id mutably.
    pub fn series_mut<'m>(
        &self,
        model: &'m mut ProjectModel,
        id: &str,
    ) -> Option<&'m mut AlignedTimeSeries> {
        let (slot, pos) = self.series.get(id)?;
        let track = match slot {
            TrackSlot::Reference => model.reference_track.as_mut()?,
            TrackSlot::Listed(i) => model.tracks.get_mut(*i)?,
        };
        track.series.get_mut(*pos)
    }

    /// Owning track id of a series.
    pub fn owning_track_id<'m>(&self, model: &'m ProjectModel, series_id: &str) -> Option<&'m str> {
        self.series(model, series_id).map(|s| s.track_id.as_str())
    }

    /// Generate a fresh track id by probing `track-{n}` for increasing `n`.
    pub fn fresh_track_id(&self) -> String {
        fresh_id("track", |candidate| self.contains_track(candidate))
    }

    /// Generate a fresh series id by probing `series-{n}` for increasing `n`.
    pub fn fresh_series_id(&self) -> String {
        fresh_id("series", |candidate| self.contains_series(candidate))
    }
}

/// Probe `{prefix}-{n}` for increasing `n` until `taken` rejects a candidate.
///
/// Uniqueness comes from the probe, not a counter, so it survives project
/// reloads without persisting any allocator state.
fn fresh_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut n = 0usize;
    loop {
        let candidate = format!("{prefix}-{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::tests::make_track;

    fn sample_model() -> ProjectModel {
        let mut model = ProjectModel::default();
        model.reference_track = Some(make_track("track-0", &["series-0"]));
        model.tracks.push(make_track("track-1", &["series-1", "series-2"]));
        model.tracks.push(make_track("track-2", &[]));
        model
    }

    /// Assert that the index holds exactly the ids reachable from the model.
    pub(crate) fn assert_index_matches(index: &ModelIndex, model: &ProjectModel) {
        let mut expected_tracks: Vec<&str> = model.all_tracks().map(|t| t.id.as_str()).collect();
        let mut actual_tracks: Vec<&str> = index.track_ids().collect();
        expected_tracks.sort_unstable();
        actual_tracks.sort_unstable();
        assert_eq!(actual_tracks, expected_tracks);

        let mut expected_series: Vec<&str> = model
            .all_tracks()
            .flat_map(|t| t.series.iter())
            .map(|s| s.id.as_str())
            .collect();
        let mut actual_series: Vec<&str> = index.series_ids().collect();
        expected_series.sort_unstable();
        actual_series.sort_unstable();
        assert_eq!(actual_series, expected_series);
    }

    #[test]
    fn rebuild_covers_reachable_set() {
        let model = sample_model();
        let index = ModelIndex::rebuild(&model);
        assert_eq!(index.track_count(), 3);
        assert_eq!(index.series_count(), 3);
        assert_index_matches(&index, &model);
    }

    #[test]
    fn rebuild_after_removal_drops_entries() {
        let mut model = sample_model();
        model.remove_track("track-1");
        let index = ModelIndex::rebuild(&model);
        assert!(!index.contains_track("track-1"));
        assert!(!index.contains_series("series-1"));
        assert!(!index.contains_series("series-2"));
        assert_index_matches(&index, &model);
    }

    #[test]
    fn resolve_track_and_series() {
        let model = sample_model();
        let index = ModelIndex::rebuild(&model);

        assert_eq!(index.track(&model, "track-0").unwrap().id, "track-0");
        assert_eq!(index.track(&model, "track-2").unwrap().id, "track-2");
        assert!(index.track(&model, "track-9").is_none());

        let s = index.series(&model, "series-2").unwrap();
        assert_eq!(s.id, "series-2");
        assert_eq!(index.owning_track_id(&model, "series-2"), Some("track-1"));
        assert!(index.series(&model, "series-9").is_none());
    }

    #[test]
    fn resolve_series_mut() {
        let mut model = sample_model();
        let index = ModelIndex::rebuild(&model);

        let s = index.series_mut(&mut model, "series-0").unwrap();
        s.aligned = true;
        assert!(index.series(&model, "series-0").unwrap().aligned);
    }

    #[test]
    fn fresh_ids_probe_past_taken_names() {
        let model = sample_model();
        let index = ModelIndex::rebuild(&model);

        // track-0..2 taken, so the first free candidate is track-3
        assert_eq!(index.fresh_track_id(), "track-3");
        // series-0..2 taken
        assert_eq!(index.fresh_series_id(), "series-3");
    }

    #[test]
    fn fresh_ids_on_empty_index_start_at_zero() {
        let index = ModelIndex::default();
        assert_eq!(index.fresh_track_id(), "track-0");
        assert_eq!(index.fresh_series_id(), "series-0");
    }

    #[test]
    fn empty_model_yields_empty_index() {
        let index = ModelIndex::rebuild(&ProjectModel::default());
        assert_eq!(index.track_count(), 0);
        assert_eq!(index.series_count(), 0);
    }
}
