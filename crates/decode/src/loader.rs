//! Asynchronous source loading.
//!
//! A decode request registers a job and returns immediately; the result comes
//! back over a crossbeam channel tagged with the job's ticket. The store
//! drains that channel on its own thread, so the shared model is only ever
//! mutated from one place regardless of how completions interleave.

use std::path::PathBuf;
use std::sync::Arc;

use crossbeam::channel::Sender;
use tracing::{debug, error};

use crate::error::DecodeError;
use crate::video::VideoProbe;
use crate::{decode_source, DecodedSource};

/// A decode request. The ticket is assigned by the requester and echoed back
/// in the reply so completions can be matched to their initiating operation.
#[derive(Clone, Debug)]
pub struct DecodeJob {
    pub ticket: u64,
    pub path: PathBuf,
}

/// Reply to a `DecodeJob`.
#[derive(Debug)]
pub struct DecodeReply {
    pub ticket: u64,
    pub path: PathBuf,
    pub result: Result<DecodedSource, DecodeError>,
}

/// Seam for dispatching decode jobs.
///
/// Production code uses `ThreadLoader`; tests substitute loaders that hold
/// jobs back to control completion order.
pub trait SourceLoader: Send {
    /// Begin decoding `job.path`. Must not block; the reply is delivered on
    /// `reply_tx` when the decode finishes, in any order relative to other
    /// outstanding jobs.
    fn request(&self, job: DecodeJob, reply_tx: Sender<DecodeReply>);
}

/// Spawns one worker thread per decode job.
pub struct ThreadLoader {
    probe: Arc<dyn VideoProbe>,
}

impl ThreadLoader {
    pub fn new(probe: Arc<dyn VideoProbe>) -> Self {
        Self { probe }
    }
}

impl SourceLoader for ThreadLoader {
    fn request(&self, job: DecodeJob, reply_tx: Sender<DecodeReply>) {
        let probe = Arc::clone(&self.probe);
        debug!(ticket = job.ticket, path = %job.path.display(), "Dispatching decode job");
        std::thread::spawn(move || {
            let result = decode_source(&job.path, &probe);
            if let Err(e) = &result {
                error!(ticket = job.ticket, path = %job.path.display(), error = %e, "Decode failed");
            }
            // The receiver may already be gone (store dropped); nothing to do then.
            let _ = reply_tx.send(DecodeReply {
                ticket: job.ticket,
                path: job.path,
                result,
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel;

    use crate::video::VideoMeta;
    use std::path::Path;

    struct FixedProbe(f64);

    impl VideoProbe for FixedProbe {
        fn probe(&self, _path: &Path) -> crate::error::DecodeResult<VideoMeta> {
            Ok(VideoMeta { duration: self.0 })
        }
    }

    #[test]
    fn thread_loader_replies_with_matching_ticket() {
        let dir = std::env::temp_dir().join("al_loader_test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("data.tsv");
        std::fs::write(&path, "0.0\t1.0\n1.0\t2.0\n").expect("write");

        let loader = ThreadLoader::new(Arc::new(FixedProbe(0.0)));
        let (tx, rx) = channel::unbounded();
        loader.request(
            DecodeJob {
                ticket: 7,
                path: path.clone(),
            },
            tx,
        );

        let reply = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("reply");
        assert_eq!(reply.ticket, 7);
        assert!(matches!(reply.result, Ok(DecodedSource::Sensor(_))));

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn thread_loader_uses_probe_for_video() {
        let loader = ThreadLoader::new(Arc::new(FixedProbe(42.0)));
        let (tx, rx) = channel::unbounded();
        loader.request(
            DecodeJob {
                ticket: 1,
                path: PathBuf::from("/anywhere/clip.webm"),
            },
            tx,
        );

        let reply = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("reply");
        match reply.result {
            Ok(DecodedSource::Video(meta)) => assert!((meta.duration - 42.0).abs() < f64::EPSILON),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn thread_loader_reports_decode_failure() {
        let loader = ThreadLoader::new(Arc::new(FixedProbe(0.0)));
        let (tx, rx) = channel::unbounded();
        loader.request(
            DecodeJob {
                ticket: 2,
                path: PathBuf::from("/missing/file.tsv"),
            },
            tx,
        );

        let reply = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("reply");
        assert!(reply.result.is_err());
    }
}
