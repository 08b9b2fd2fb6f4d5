//! `al-common` — Shared types for the alignlab annotation core.
//!
//! This crate is the foundation the other alignlab crates depend on.
//! It defines the shared vocabulary:
//!
//! - **Types**: `TimeRange` (closed interval on a time axis), `SourceKind`
//!   (file-suffix dispatch for loadable sources)
//! - **Labels**: `Label` (reference-timeline annotation), `MappedLabel`
//!   (the same annotation projected into a track's local time base)

pub mod label;
pub mod types;

// Re-export commonly used items at crate root
pub use label::{Label, MappedLabel};
pub use types::{SourceKind, TimeRange};
