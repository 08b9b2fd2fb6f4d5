//! Video metadata probing.
//!
//! The annotation core only needs a video's duration to place it on the
//! reference timeline; frame decoding belongs to the playback layer. Container
//! parsing therefore sits behind the `VideoProbe` trait so the store can be
//! exercised without real media on disk.

use std::path::Path;

use crate::error::{DecodeError, DecodeResult};

/// Metadata extracted from a video container.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMeta {
    /// Total duration in seconds (the content's local time base runs 0..duration).
    pub duration: f64,
}

/// Trait seam for video container probing.
pub trait VideoProbe: Send + Sync {
    /// Probe the container at `path` and return its metadata.
    fn probe(&self, path: &Path) -> DecodeResult<VideoMeta>;
}

/// A probe that reads duration from a sidecar `.duration` text file.
///
/// The real container parsers live in the playback layer; this keeps the
/// annotation core loadable in environments without them. The sidecar holds a
/// single floating-point number of seconds.
#[derive(Clone, Debug, Default)]
pub struct SidecarProbe;

impl VideoProbe for SidecarProbe {
    fn probe(&self, path: &Path) -> DecodeResult<VideoMeta> {
        let sidecar = path.with_extension("duration");
        let text = std::fs::read_to_string(&sidecar).map_err(|e| DecodeError::Io {
            path: sidecar.display().to_string(),
            source: e,
        })?;
        let duration: f64 = text
            .trim()
            .parse()
            .map_err(|_| DecodeError::VideoProbe {
                path: path.display().to_string(),
                reason: format!("sidecar {:?} does not contain a duration", sidecar),
            })?;
        if !duration.is_finite() || duration < 0.0 {
            return Err(DecodeError::VideoProbe {
                path: path.display().to_string(),
                reason: format!("invalid duration {duration}"),
            });
        }
        Ok(VideoMeta { duration })
    }
}
