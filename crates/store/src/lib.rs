//! `al-store` — Project state management for the alignlab annotation core.
//!
//! This crate owns the canonical in-memory model of tracks and aligned time
//! series and orchestrates everything that touches it:
//!
//! - **`ProjectStore`**: the single owner of the live model; reacts to
//!   `StoreIntent`s, mutates the model, rebuilds lookup indices, and emits
//!   typed change notifications
//! - **`History<T>`**: bounded snapshot-based undo/redo, instantiated once per
//!   edit domain (alignment, labeling)
//! - **`JoinBarrier`**: joins N concurrent asynchronous loads into exactly one
//!   completion callback
//! - **Snapshots**: deep, independent copies of model + sub-store state used
//!   as undo/redo units
//! - **Export**: projection of reference-timeline labels onto each series'
//!   native rows
//!
//! # Architecture
//!
//! ```text
//! ProjectStore
//! ├── model: ProjectModel            (reference track + track list)
//! ├── index: ModelIndex              (id → entity, rebuilt after every mutation)
//! ├── alignment: AlignmentState      (marker correspondences)
//! ├── labeling: LabelingState        (classes + labels)
//! ├── alignment_history / labeling_history: History<_>
//! ├── notifier: Notifier             (StoreEvent fan-out)
//! └── pending loads                  (decode replies joined by JoinBarrier)
//! ```
//!
//! All model mutation happens on the store's thread: decode workers reply over
//! a channel and the effects are applied by `process_completions()`.

pub mod alignment;
pub mod barrier;
pub mod error;
pub mod events;
pub mod export;
pub mod history;
pub mod index;
pub mod labeling;
pub mod loading;
pub mod model;
pub mod snapshot;
pub mod store;

// Re-export primary types at crate root for convenience.
pub use alignment::{AlignmentMarker, AlignmentState};
pub use barrier::{JoinBarrier, LoadToken};
pub use error::{StoreError, StoreResult};
pub use events::{Notifier, StoreEvent};
pub use history::{History, HistoryEntry};
pub use index::ModelIndex;
pub use labeling::LabelingState;
pub use model::{AlignedTimeSeries, ProjectModel, TimeSeriesData, Track};
pub use snapshot::{AlignmentSnapshot, LabelingSnapshot};
pub use store::{ProjectStore, StoreIntent};
