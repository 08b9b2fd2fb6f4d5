//! `al-timemap` — Affine time mapping between local and reference timelines.
//!
//! Every aligned time series carries two correspondences between its native
//! (local) time base and the shared reference timeline: where its content
//! starts and where it ends. From those two points this crate solves the
//! affine relation
//!
//! ```text
//! reference_time = k * local_time + b
//! ```
//!
//! and provides the forward map (local → reference) and the inverse map
//! (reference → local) used to project annotation labels back onto a track's
//! native rows for export.

pub mod error;
pub mod map;

pub use error::{TimeMapError, TimeMapResult};
pub use map::{project_labels, TimeMap};
