//! `al-project` — Project file save/load for the alignlab annotation core.
//!
//! This crate handles the persisted form of a project: the tracks and their
//! aligned series (reduced to persisted fields — decoded content is never
//! written, only re-derived from each series' source path on load), the opaque
//! alignment/labeling sub-store payloads, UI state, and metadata. It supports:
//!
//! - **Save/Load**: serialize/deserialize `SavedProject` to/from JSON
//! - **Atomic writes**: temp-file-then-rename so an interrupted save never
//!   truncates an existing project
//! - **Recent Projects**: persisted MRU list of opened project files
//!
//! # Usage
//!
//! ```rust,no_run
//! use al_project::{load_project, save_project, SavedProject};
//! use std::path::Path;
//!
//! let project = SavedProject::new("My Session");
//! save_project(&project, Path::new("session.alp")).unwrap();
//! let loaded = load_project(Path::new("session.alp")).unwrap();
//! assert_eq!(loaded.metadata.name, "My Session");
//! ```

pub mod error;
pub mod load;
pub mod recent;
pub mod save;
pub mod types;

// Re-export primary API at crate root
pub use error::{ProjectError, ProjectResult};
pub use load::{from_json_string, load_project};
pub use recent::RecentProjects;
pub use save::{save_project, to_json_string};
pub use types::{
    ProjectMetadata, ProjectTab, RecentEntry, SavedProject, SavedSeries, SavedTrack, UiState,
};
