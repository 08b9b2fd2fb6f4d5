//! `al-decode` — Source decoding and asynchronous load plumbing.
//!
//! The annotation core never blocks on file I/O: a decode request registers
//! with the store and returns immediately, and the decoded result comes back
//! over a channel. This crate provides both halves of that contract:
//!
//! - **Sensor decoding**: tab-separated `.tsv` files into timestamped rows
//!   plus named value channels (`SensorData`)
//! - **Video probing**: the `VideoProbe` trait seam producing `VideoMeta`
//!   (duration only — container parsing lives behind the trait)
//! - **Dispatch**: `decode_source` routes a path by suffix
//! - **Loading**: the `SourceLoader` trait and the thread-spawning
//!   `ThreadLoader`, replying over a crossbeam channel

pub mod error;
pub mod loader;
pub mod sensor;
pub mod video;

pub use error::{DecodeError, DecodeResult};
pub use loader::{DecodeJob, DecodeReply, SourceLoader, ThreadLoader};
pub use sensor::{SensorChannel, SensorData, SensorRow};
pub use video::{VideoMeta, VideoProbe};

use al_common::SourceKind;
use std::path::Path;
use std::sync::Arc;

/// Decoded content of a source file, tagged by kind.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodedSource {
    Sensor(SensorData),
    Video(VideoMeta),
}

impl DecodedSource {
    /// Duration of the decoded content in its local time base.
    pub fn duration(&self) -> f64 {
        match self {
            Self::Sensor(data) => data.local_range().duration(),
            Self::Video(meta) => meta.duration,
        }
    }
}

/// Decode a source file, dispatching on its suffix.
pub fn decode_source(path: &Path, probe: &Arc<dyn VideoProbe>) -> DecodeResult<DecodedSource> {
    match SourceKind::from_path(path) {
        Some(SourceKind::Sensor) => Ok(DecodedSource::Sensor(sensor::decode_sensor_file(path)?)),
        Some(SourceKind::Video) => Ok(DecodedSource::Video(probe.probe(path)?)),
        None => Err(DecodeError::UnsupportedSource {
            path: path.display().to_string(),
        }),
    }
}
