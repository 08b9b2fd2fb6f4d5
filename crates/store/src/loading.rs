//! Bookkeeping for in-flight asynchronous loads.
//!
//! Decode workers reply over the store's channel; the structures here track
//! what each reply ticket means and, for whole-project loads, stage decoded
//! content until the join barrier reports that every series has resolved.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use al_decode::DecodedSource;
use al_project::SavedProject;

use crate::barrier::{JoinBarrier, LoadToken};

/// Where a directly loaded track is installed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadSlot {
    /// Replace the reference track.
    Reference,
    /// Append to the track list.
    Appended,
}

/// One outstanding direct (single-source) load.
#[derive(Debug)]
pub(crate) struct DirectLoad {
    pub slot: LoadSlot,
}

/// Staging area for a whole-project load.
///
/// Nothing here touches the live model: the store only commits (or abandons)
/// the staged state after the barrier fires, so observers see either the old
/// model or the fully loaded one.
pub(crate) struct PendingProjectLoad {
    /// The project file being loaded.
    pub path: PathBuf,
    /// Parsed project awaiting content.
    pub saved: SavedProject,
    /// Joins all series decodes; kept for instrumentation.
    pub barrier: JoinBarrier,
    /// Reply ticket → (series id, its barrier token).
    pub tickets: HashMap<u64, (String, LoadToken)>,
    /// Series id → decoded content.
    pub staged: HashMap<String, DecodedSource>,
    /// First decode failure, if any: (series id, message). Sibling results
    /// keep arriving but are discarded at commit time.
    pub failure: Option<(String, String)>,
    /// Set by the barrier callback when the last token fires.
    pub all_done: Arc<AtomicBool>,
    /// Caller-supplied callback, invoked after a successful commit.
    pub on_loaded: Option<Box<dyn FnOnce() + Send>>,
}

impl PendingProjectLoad {
    pub fn is_done(&self) -> bool {
        self.all_done.load(Ordering::SeqCst)
    }

    pub fn outstanding(&self) -> usize {
        self.barrier.outstanding()
    }
}
