//! The project store — single owner of the live model.
//!
//! `ProjectStore` is the only place model mutation happens. UI code expresses
//! what it wants as a `StoreIntent`; the store validates, records undo
//! history, mutates, rebuilds the index, and emits `StoreEvent`s. Decode
//! workers never touch the model: they reply over a channel and the store
//! applies the effects from `process_completions()` on its own thread.
//!
//! Loads are undoable: the pre-load snapshot is pushed when the load is
//! *initiated*, so an undo issued before the decode lands still restores the
//! correct state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam::channel::{self, Receiver, Sender};
use tracing::{debug, error, info, warn};

use al_common::{Label, SourceKind};
use al_decode::{DecodeJob, DecodeReply, DecodedSource, SourceLoader};
use al_project::{ProjectError, RecentProjects, SavedProject, SavedSeries, SavedTrack, UiState};

use crate::alignment::AlignmentState;
use crate::barrier::JoinBarrier;
use crate::error::{StoreError, StoreResult};
use crate::events::{Notifier, StoreEvent};
use crate::export;
use crate::history::History;
use crate::index::ModelIndex;
use crate::labeling::LabelingState;
use crate::loading::{DirectLoad, LoadSlot, PendingProjectLoad};
use crate::model::{time_series_from_decoded, AlignedTimeSeries, ProjectModel, Track};
use crate::snapshot::{AlignmentSnapshot, LabelingSnapshot};

/// Maximum undo depth per edit domain.
const HISTORY_DEPTH: usize = 50;

/// Everything a caller can ask the store to do.
#[derive(Clone, Debug)]
pub enum StoreIntent {
    /// Reset to an empty untitled project. Pending loads are discarded.
    NewProject,
    /// Load a video file into the reference track slot.
    LoadReferenceTrack { path: PathBuf },
    /// Load a video file as a new appended track.
    LoadVideoTrack { path: PathBuf },
    /// Load a sensor file as a new appended track.
    LoadSensorTrack { path: PathBuf },
    /// Delete a track (reference or listed) by id.
    DeleteTrack { track_id: String },
    /// Re-place a series on the reference timeline.
    AlignSeries {
        series_id: String,
        reference_start: f64,
        reference_end: f64,
    },
    /// Pin one local timestamp of a series to a reference-timeline point.
    AddAlignmentMarker {
        series_id: String,
        local_time: f64,
        reference_time: f64,
    },
    /// Add a label on the reference timeline.
    AddLabel {
        class_name: String,
        start: f64,
        end: f64,
    },
    /// Remove a label by its index in creation order.
    RemoveLabel { index: usize },
    /// Save the project to a file.
    SaveProject { path: PathBuf },
    /// Load a project file, replacing the current state atomically once all
    /// series decodes resolve.
    LoadProject { path: PathBuf },
    /// Write annotated label files for every sensor-backed series.
    ExportLabels { out_dir: PathBuf },
    AlignmentUndo,
    AlignmentRedo,
    LabelingUndo,
    LabelingRedo,
}

/// Single owner of the live model and both edit histories.
pub struct ProjectStore {
    model: ProjectModel,
    index: ModelIndex,
    alignment: AlignmentState,
    labeling: LabelingState,
    ui: UiState,

    alignment_history: History<AlignmentSnapshot>,
    labeling_history: History<LabelingSnapshot>,

    project_path: Option<PathBuf>,
    project_name: String,
    recent: RecentProjects,

    notifier: Notifier,

    loader: Box<dyn SourceLoader>,
    reply_tx: Sender<DecodeReply>,
    reply_rx: Receiver<DecodeReply>,
    next_ticket: u64,
    pending_direct: HashMap<u64, DirectLoad>,
    pending_project: Option<PendingProjectLoad>,
}

impl ProjectStore {
    /// Create a store with the recent-projects list from its default
    /// location.
    pub fn new(loader: Box<dyn SourceLoader>) -> Self {
        Self::with_recent(loader, RecentProjects::load())
    }

    /// Create a store with an explicit recent-projects list.
    pub fn with_recent(loader: Box<dyn SourceLoader>, recent: RecentProjects) -> Self {
        let (reply_tx, reply_rx) = channel::unbounded();
        Self {
            model: ProjectModel::default(),
            index: ModelIndex::default(),
            alignment: AlignmentState::default(),
            labeling: LabelingState::default(),
            ui: UiState::default(),
            alignment_history: History::new(HISTORY_DEPTH),
            labeling_history: History::new(HISTORY_DEPTH),
            project_path: None,
            project_name: "Untitled".to_string(),
            recent,
            notifier: Notifier::new(),
            loader,
            reply_tx,
            reply_rx,
            next_ticket: 0,
            pending_direct: HashMap::new(),
            pending_project: None,
        }
    }

    /// Route an intent to its operation.
    pub fn dispatch(&mut self, intent: StoreIntent) -> StoreResult<()> {
        debug!(?intent, "Dispatching intent");
        match intent {
            StoreIntent::NewProject => {
                self.new_project();
                Ok(())
            }
            StoreIntent::LoadReferenceTrack { path } => self.load_reference_track(&path),
            StoreIntent::LoadVideoTrack { path } => self.load_video_track(&path),
            StoreIntent::LoadSensorTrack { path } => self.load_sensor_track(&path),
            StoreIntent::DeleteTrack { track_id } => self.delete_track(&track_id),
            StoreIntent::AlignSeries {
                series_id,
                reference_start,
                reference_end,
            } => self.align_series(&series_id, reference_start, reference_end),
            StoreIntent::AddAlignmentMarker {
                series_id,
                local_time,
                reference_time,
            } => self.add_alignment_marker(&series_id, local_time, reference_time),
            StoreIntent::AddLabel {
                class_name,
                start,
                end,
            } => self.add_label(&class_name, start, end),
            StoreIntent::RemoveLabel { index } => self.remove_label(index),
            StoreIntent::SaveProject { path } => self.save_project(&path),
            StoreIntent::LoadProject { path } => self.load_project(&path, None),
            StoreIntent::ExportLabels { out_dir } => self.export_labels(&out_dir).map(|_| ()),
            StoreIntent::AlignmentUndo => {
                self.alignment_undo();
                Ok(())
            }
            StoreIntent::AlignmentRedo => {
                self.alignment_redo();
                Ok(())
            }
            StoreIntent::LabelingUndo => {
                self.labeling_undo();
                Ok(())
            }
            StoreIntent::LabelingRedo => {
                self.labeling_redo();
                Ok(())
            }
        }
    }

    // ----- Observation -----

    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        self.notifier.subscribe()
    }

    pub fn model(&self) -> &ProjectModel {
        &self.model
    }

    pub fn index(&self) -> &ModelIndex {
        &self.index
    }

    pub fn alignment(&self) -> &AlignmentState {
        &self.alignment
    }

    pub fn labeling(&self) -> &LabelingState {
        &self.labeling
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// UI state is persisted but not undoable; the frontend edits it freely.
    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    pub fn project_path(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn recent(&self) -> &RecentProjects {
        &self.recent
    }

    pub fn can_undo_alignment(&self) -> bool {
        self.alignment_history.can_undo()
    }

    pub fn can_redo_alignment(&self) -> bool {
        self.alignment_history.can_redo()
    }

    pub fn can_undo_labeling(&self) -> bool {
        self.labeling_history.can_undo()
    }

    pub fn can_redo_labeling(&self) -> bool {
        self.labeling_history.can_redo()
    }

    /// Whether a whole-project load is still waiting on decodes.
    pub fn is_loading_project(&self) -> bool {
        self.pending_project.is_some()
    }

    // ----- Project lifecycle -----

    /// Reset to an empty untitled project.
    ///
    /// Both histories are cleared (they refer to a superseded model) and any
    /// outstanding load results will be discarded when they arrive.
    pub fn new_project(&mut self) {
        info!("New project");
        self.model.clear();
        self.alignment.clear();
        self.labeling.clear();
        self.alignment_history.clear();
        self.labeling_history.clear();
        self.ui = UiState::default();
        self.project_path = None;
        self.project_name = "Untitled".to_string();
        self.pending_direct.clear();
        self.pending_project = None;
        self.reindex();
        self.notifier.emit(StoreEvent::TracksChanged);
    }

    /// Save the project, remembering its path and touching the recent list.
    pub fn save_project(&mut self, path: &Path) -> StoreResult<()> {
        let saved = self.to_saved()?;
        al_project::save_project(&saved, path)?;

        self.project_path = Some(path.to_path_buf());
        self.recent.touch(path, &saved.metadata.name);
        if let Err(e) = self.recent.save() {
            warn!(error = %e, "Failed to persist recent projects list");
        }
        self.notifier.emit(StoreEvent::ProjectSaved {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    fn to_saved(&self) -> StoreResult<SavedProject> {
        let mut saved = SavedProject::new(self.project_name.clone());
        saved.reference_track = self.model.reference_track.as_ref().map(saved_track);
        saved.tracks = self.model.tracks.iter().map(saved_track).collect();
        saved.alignment = serde_json::to_value(&self.alignment).map_err(ProjectError::from)?;
        saved.labeling = serde_json::to_value(&self.labeling).map_err(ProjectError::from)?;
        saved.ui = self.ui.clone();
        Ok(saved)
    }

    /// Begin loading a project file.
    ///
    /// The file is parsed and validated synchronously; parse errors return
    /// immediately and leave the current state untouched. Then one decode job
    /// per persisted series is dispatched, all of them before any completion
    /// is applied, and a join barrier holds the commit until the last one
    /// resolves. The live state is replaced only at that single commit point;
    /// if any decode failed, nothing is replaced and `LoadFailed` is emitted.
    ///
    /// `on_loaded` runs after a successful commit.
    pub fn load_project(
        &mut self,
        path: &Path,
        on_loaded: Option<Box<dyn FnOnce() + Send>>,
    ) -> StoreResult<()> {
        let saved = al_project::load_project(path)?;

        if self.pending_project.is_some() {
            warn!("Replacing in-flight project load");
        }

        let barrier = JoinBarrier::new();
        let mut tickets = HashMap::new();
        let mut jobs = Vec::new();
        for track in saved.all_tracks() {
            for series in &track.time_series {
                let ticket = self.next_ticket;
                self.next_ticket += 1;
                tickets.insert(ticket, (series.id.clone(), barrier.register()));
                jobs.push(DecodeJob {
                    ticket,
                    path: PathBuf::from(&series.source),
                });
            }
        }

        let all_done = Arc::new(AtomicBool::new(false));
        {
            let flag = Arc::clone(&all_done);
            barrier.on_complete(move || flag.store(true, Ordering::SeqCst));
        }

        info!(path = %path.display(), series = jobs.len(), "Project load initiated");
        self.pending_project = Some(PendingProjectLoad {
            path: path.to_path_buf(),
            saved,
            barrier,
            tickets,
            staged: HashMap::new(),
            failure: None,
            all_done,
            on_loaded,
        });

        for job in jobs {
            self.loader.request(job, self.reply_tx.clone());
        }

        // A project with no series has nothing to wait for: the barrier
        // already fired and the commit happens within this call.
        if self.pending_project.as_ref().is_some_and(|p| p.is_done()) {
            self.commit_pending_project();
        }
        Ok(())
    }

    /// Commit or abandon a completed project load.
    ///
    /// Every input is validated and assembled *before* the first live field
    /// is touched, so observers see either the old state or the fully loaded
    /// one, never a partial mix.
    fn commit_pending_project(&mut self) {
        let Some(mut pending) = self.pending_project.take() else {
            return;
        };

        if let Some((series_id, message)) = pending.failure.take() {
            let message = format!("series {series_id}: {message}");
            error!(path = %pending.path.display(), %message, "Project load abandoned");
            self.notifier.emit(StoreEvent::LoadFailed {
                path: pending.path,
                message,
            });
            return;
        }

        let alignment = match sub_store_state::<AlignmentState>(&pending.saved.alignment) {
            Ok(state) => state,
            Err(e) => {
                self.abandon_load(pending.path, format!("invalid alignment state: {e}"));
                return;
            }
        };
        let labeling = match sub_store_state::<LabelingState>(&pending.saved.labeling) {
            Ok(state) => state,
            Err(e) => {
                self.abandon_load(pending.path, format!("invalid labeling state: {e}"));
                return;
            }
        };

        let mut model = ProjectModel::default();
        if let Some(saved_ref) = &pending.saved.reference_track {
            match assemble_track(saved_ref, &pending.staged) {
                Ok(track) => model.reference_track = Some(track),
                Err(message) => {
                    self.abandon_load(pending.path, message);
                    return;
                }
            }
        }
        for saved_track in &pending.saved.tracks {
            match assemble_track(saved_track, &pending.staged) {
                Ok(track) => model.tracks.push(track),
                Err(message) => {
                    self.abandon_load(pending.path, message);
                    return;
                }
            }
        }

        // Commit point: everything below is infallible.
        self.alignment_history.clear();
        self.labeling_history.clear();
        self.model = model;
        self.alignment = alignment;
        self.labeling = labeling;
        self.ui = pending.saved.ui.clone();
        self.project_name = pending.saved.metadata.name.clone();
        self.project_path = Some(pending.path.clone());
        self.reindex();

        self.recent.touch(&pending.path, &self.project_name);
        if let Err(e) = self.recent.save() {
            warn!(error = %e, "Failed to persist recent projects list");
        }

        info!(
            path = %pending.path.display(),
            tracks = self.index.track_count(),
            series = self.index.series_count(),
            "Project loaded"
        );
        self.notifier.emit(StoreEvent::TracksChanged);
        self.notifier.emit(StoreEvent::ProjectLoaded {
            path: pending.path.clone(),
        });

        if let Some(callback) = pending.on_loaded.take() {
            callback();
        }
    }

    fn abandon_load(&mut self, path: PathBuf, message: String) {
        error!(path = %path.display(), %message, "Project load abandoned");
        self.notifier.emit(StoreEvent::LoadFailed { path, message });
    }

    /// Export annotated label files for every sensor-backed series.
    pub fn export_labels(&mut self, out_dir: &Path) -> StoreResult<Vec<PathBuf>> {
        let files = export::export_label_files(&self.model, &self.labeling, out_dir)?;
        self.notifier.emit(StoreEvent::LabelsExported {
            files: files.len(),
        });
        Ok(files)
    }

    // ----- Track loading -----

    /// Load a video file into the reference track slot, replacing any
    /// previous reference track when the decode lands.
    pub fn load_reference_track(&mut self, path: &Path) -> StoreResult<()> {
        self.begin_direct_load(path, LoadSlot::Reference, SourceKind::Video, "Load reference track")
    }

    /// Load a video file as a new appended track.
    pub fn load_video_track(&mut self, path: &Path) -> StoreResult<()> {
        self.begin_direct_load(path, LoadSlot::Appended, SourceKind::Video, "Load video track")
    }

    /// Load a sensor file as a new appended track.
    pub fn load_sensor_track(&mut self, path: &Path) -> StoreResult<()> {
        self.begin_direct_load(path, LoadSlot::Appended, SourceKind::Sensor, "Load sensor track")
    }

    fn begin_direct_load(
        &mut self,
        path: &Path,
        slot: LoadSlot,
        expected: SourceKind,
        history_label: &str,
    ) -> StoreResult<()> {
        // Validate the suffix before touching the history: a rejected intent
        // must leave nothing to undo.
        match SourceKind::from_path(path) {
            Some(kind) if kind == expected => {}
            _ => {
                return Err(StoreError::WrongSourceKind {
                    expected: expected.to_string(),
                    path: path.display().to_string(),
                })
            }
        }

        self.alignment_history
            .push(history_label, self.capture_alignment());

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending_direct.insert(ticket, DirectLoad { slot });
        debug!(ticket, path = %path.display(), ?slot, "Track load initiated");
        self.loader.request(
            DecodeJob {
                ticket,
                path: path.to_path_buf(),
            },
            self.reply_tx.clone(),
        );
        Ok(())
    }

    /// Drain the decode reply channel and apply the effects. Returns the
    /// number of replies handled. Call from the store's thread whenever the
    /// frontend ticks.
    pub fn process_completions(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(reply) = self.reply_rx.try_recv() {
            self.handle_reply(reply);
            handled += 1;
        }
        handled
    }

    fn handle_reply(&mut self, reply: DecodeReply) {
        if let Some(direct) = self.pending_direct.remove(&reply.ticket) {
            self.finish_direct_load(direct, reply);
            return;
        }

        let mut ready = false;
        if let Some(pending) = self.pending_project.as_mut() {
            if let Some((series_id, token)) = pending.tickets.remove(&reply.ticket) {
                match reply.result {
                    Ok(decoded) => {
                        pending.staged.insert(series_id, decoded);
                    }
                    Err(e) => {
                        if pending.failure.is_none() {
                            pending.failure = Some((series_id, e.to_string()));
                        }
                    }
                }
                token.complete();
                debug!(
                    ticket = reply.ticket,
                    outstanding = pending.outstanding(),
                    "Project series resolved"
                );
                ready = pending.is_done();
            } else {
                debug!(ticket = reply.ticket, "Dropping stale decode reply");
            }
        } else {
            debug!(ticket = reply.ticket, "Dropping stale decode reply");
        }

        if ready {
            self.commit_pending_project();
        }
    }

    fn finish_direct_load(&mut self, direct: DirectLoad, reply: DecodeReply) {
        let decoded = match reply.result {
            Ok(decoded) => decoded,
            Err(e) => {
                error!(path = %reply.path.display(), error = %e, "Track load failed");
                self.notifier.emit(StoreEvent::LoadFailed {
                    path: reply.path,
                    message: e.to_string(),
                });
                return;
            }
        };

        let track_id = self.index.fresh_track_id();
        let series_id = self.index.fresh_series_id();
        let duration = decoded.duration();
        let series = AlignedTimeSeries {
            id: series_id,
            track_id: track_id.clone(),
            reference_start: 0.0,
            reference_end: duration,
            source: reply.path.clone(),
            aligned: false,
            time_series: time_series_from_decoded(&decoded),
        };
        let track = Track {
            id: track_id,
            series: vec![series],
            minimized: false,
        };

        match direct.slot {
            LoadSlot::Reference => self.model.reference_track = Some(track),
            LoadSlot::Appended => self.model.tracks.push(track),
        }
        self.reindex();
        info!(path = %reply.path.display(), ?direct.slot, "Track loaded");
        self.notifier.emit(StoreEvent::TracksChanged);
    }

    // ----- Structural edits -----

    /// Delete a track by id, dropping its series' alignment markers.
    pub fn delete_track(&mut self, track_id: &str) -> StoreResult<()> {
        if !self.index.contains_track(track_id) {
            return Err(StoreError::TrackNotFound {
                id: track_id.to_string(),
            });
        }

        self.alignment_history
            .push("Delete track", self.capture_alignment());

        let Some(removed) = self.model.remove_track(track_id) else {
            // Unreachable while the index mirrors the model.
            return Err(StoreError::TrackNotFound {
                id: track_id.to_string(),
            });
        };
        for series in &removed.series {
            self.alignment.remove_markers_for_series(&series.id);
        }
        self.reindex();
        self.notifier.emit(StoreEvent::TracksChanged);
        Ok(())
    }

    /// Re-place a series on the reference timeline.
    pub fn align_series(
        &mut self,
        series_id: &str,
        reference_start: f64,
        reference_end: f64,
    ) -> StoreResult<()> {
        if !self.index.contains_series(series_id) {
            return Err(StoreError::SeriesNotFound {
                id: series_id.to_string(),
            });
        }
        if reference_end < reference_start {
            return Err(StoreError::InvalidBounds {
                id: series_id.to_string(),
                start: reference_start,
                end: reference_end,
            });
        }

        self.alignment_history
            .push("Align series", self.capture_alignment());

        if let Some(series) = self.index.series_mut(&mut self.model, series_id) {
            series.reference_start = reference_start;
            series.reference_end = reference_end;
            series.aligned = true;
        }
        self.notifier.emit(StoreEvent::TracksChanged);
        Ok(())
    }

    /// Record a marker pinning a series' local timestamp to a point on the
    /// reference timeline.
    pub fn add_alignment_marker(
        &mut self,
        series_id: &str,
        local_time: f64,
        reference_time: f64,
    ) -> StoreResult<()> {
        if !self.index.contains_series(series_id) {
            return Err(StoreError::SeriesNotFound {
                id: series_id.to_string(),
            });
        }

        self.alignment_history
            .push("Add marker", self.capture_alignment());
        self.alignment
            .add_marker(series_id, local_time, reference_time);
        self.notifier.emit(StoreEvent::TracksChanged);
        Ok(())
    }

    // ----- Labeling edits -----

    /// Add a label on the reference timeline.
    pub fn add_label(&mut self, class_name: &str, start: f64, end: f64) -> StoreResult<()> {
        if end < start {
            return Err(StoreError::InvalidLabel { start, end });
        }

        self.labeling_history
            .push("Add label", self.capture_labeling());
        self.labeling.add_label(Label::new(class_name, start, end));
        self.notifier.emit(StoreEvent::LabelsChanged);
        Ok(())
    }

    /// Remove a label by its index in creation order.
    pub fn remove_label(&mut self, index: usize) -> StoreResult<()> {
        if index >= self.labeling.labels.len() {
            return Err(StoreError::LabelNotFound { index });
        }

        self.labeling_history
            .push("Remove label", self.capture_labeling());
        self.labeling.remove_label(index);
        self.notifier.emit(StoreEvent::LabelsChanged);
        Ok(())
    }

    // ----- Undo / redo -----

    /// Undo the last alignment-domain action. Returns whether anything was
    /// undone.
    pub fn alignment_undo(&mut self) -> bool {
        let current = self.capture_alignment();
        match self.alignment_history.undo("Current", current) {
            Some(snapshot) => {
                self.restore_alignment(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn alignment_redo(&mut self) -> bool {
        let current = self.capture_alignment();
        match self.alignment_history.redo("Current", current) {
            Some(snapshot) => {
                self.restore_alignment(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn labeling_undo(&mut self) -> bool {
        let current = self.capture_labeling();
        match self.labeling_history.undo("Current", current) {
            Some(snapshot) => {
                self.restore_labeling(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn labeling_redo(&mut self) -> bool {
        let current = self.capture_labeling();
        match self.labeling_history.redo("Current", current) {
            Some(snapshot) => {
                self.restore_labeling(snapshot);
                true
            }
            None => false,
        }
    }

    fn capture_alignment(&self) -> AlignmentSnapshot {
        AlignmentSnapshot::capture(&self.model, &self.alignment)
    }

    fn capture_labeling(&self) -> LabelingSnapshot {
        LabelingSnapshot::capture(&self.labeling)
    }

    fn restore_alignment(&mut self, snapshot: AlignmentSnapshot) {
        self.model = snapshot.model;
        self.alignment = snapshot.alignment;
        self.reindex();
        self.notifier.emit(StoreEvent::TracksChanged);
    }

    fn restore_labeling(&mut self, snapshot: LabelingSnapshot) {
        self.labeling = snapshot.labeling;
        self.notifier.emit(StoreEvent::LabelsChanged);
    }

    fn reindex(&mut self) {
        self.index = ModelIndex::rebuild(&self.model);
    }
}

/// Deserialize an opaque sub-store payload; `Null` (projects saved before the
/// sub-store existed) yields the default state.
fn sub_store_state<T: Default + serde::de::DeserializeOwned>(
    value: &serde_json::Value,
) -> Result<T, serde_json::Error> {
    if value.is_null() {
        Ok(T::default())
    } else {
        serde_json::from_value(value.clone())
    }
}

fn saved_track(track: &Track) -> SavedTrack {
    SavedTrack {
        id: track.id.clone(),
        minimized: track.minimized,
        time_series: track
            .series
            .iter()
            .map(|s| SavedSeries {
                id: s.id.clone(),
                track_id: s.track_id.clone(),
                reference_start: s.reference_start,
                reference_end: s.reference_end,
                source: s.source.display().to_string(),
                aligned: s.aligned,
            })
            .collect(),
    }
}

/// Rebuild a live track from its persisted form plus staged decoded content.
fn assemble_track(
    saved: &SavedTrack,
    staged: &HashMap<String, DecodedSource>,
) -> Result<Track, String> {
    let mut series = Vec::with_capacity(saved.time_series.len());
    for s in &saved.time_series {
        let Some(decoded) = staged.get(&s.id) else {
            return Err(format!("series {}: no decoded content staged", s.id));
        };
        series.push(AlignedTimeSeries {
            id: s.id.clone(),
            track_id: saved.id.clone(),
            reference_start: s.reference_start,
            reference_end: s.reference_end,
            source: PathBuf::from(&s.source),
            aligned: s.aligned,
            time_series: time_series_from_decoded(decoded),
        });
    }
    Ok(Track {
        id: saved.id.clone(),
        series,
        minimized: saved.minimized,
    })
}
