//! Join barrier — one callback after N asynchronous loads complete.
//!
//! Multi-file project loads decode every source concurrently; the model may
//! only be replaced once, after the last decode finishes, regardless of the
//! order completions arrive in. The barrier tracks the outstanding count and
//! fires its completion callback exactly once.
//!
//! A `LoadToken` is consumed by `complete()`, so firing a token twice is
//! unrepresentable. There is no cancellation: a token dropped without firing
//! leaves the barrier permanently incomplete (logged as a warning).

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

type CompletionFn = Box<dyn FnOnce() + Send>;

struct Inner {
    outstanding: usize,
    /// Set once `on_complete` has been called (registration closed).
    closed: bool,
    callback: Option<CompletionFn>,
}

/// Joins N independent asynchronous operations into one completion callback.
#[derive(Clone)]
pub struct JoinBarrier {
    inner: Arc<Mutex<Inner>>,
}

impl Default for JoinBarrier {
    fn default() -> Self {
        Self::new()
    }
}

impl JoinBarrier {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                outstanding: 0,
                closed: false,
                callback: None,
            })),
        }
    }

    /// Register one pending operation and return its completion token.
    ///
    /// Must be called before `on_complete` closes registration.
    pub fn register(&self) -> LoadToken {
        let mut inner = self.inner.lock();
        debug_assert!(!inner.closed, "register() after on_complete()");
        if inner.closed {
            warn!("Join barrier token registered after registration closed");
        }
        inner.outstanding += 1;
        debug!(outstanding = inner.outstanding, "Registered load token");
        LoadToken {
            inner: Arc::clone(&self.inner),
            fired: false,
        }
    }

    /// Close registration and set the completion callback.
    ///
    /// If no tokens are outstanding the callback runs immediately,
    /// synchronously, within this call. Otherwise it runs exactly once, when
    /// the last token fires, no matter the firing order.
    pub fn on_complete(&self, f: impl FnOnce() + Send + 'static) {
        let run_now = {
            let mut inner = self.inner.lock();
            if inner.closed {
                warn!("on_complete() called twice; replacing pending callback");
            }
            inner.closed = true;
            if inner.outstanding == 0 {
                true
            } else {
                inner.callback = Some(Box::new(f));
                return;
            }
        };
        if run_now {
            debug!("Join barrier complete with no outstanding tokens");
            f();
        }
    }

    /// Number of tokens registered but not yet fired.
    pub fn outstanding(&self) -> usize {
        self.inner.lock().outstanding
    }
}

/// Completion token for one registered operation.
///
/// Call `complete()` exactly when the associated load finishes.
pub struct LoadToken {
    inner: Arc<Mutex<Inner>>,
    fired: bool,
}

impl LoadToken {
    /// Report this operation as finished, consuming the token.
    pub fn complete(mut self) {
        self.fire();
    }

    fn fire(&mut self) {
        if self.fired {
            return;
        }
        self.fired = true;

        let callback = {
            let mut inner = self.inner.lock();
            inner.outstanding -= 1;
            debug!(outstanding = inner.outstanding, "Load token fired");
            if inner.outstanding == 0 && inner.closed {
                inner.callback.take()
            } else {
                None
            }
        };

        // Run outside the lock so the callback may use the barrier.
        if let Some(cb) = callback {
            cb();
        }
    }
}

impl Drop for LoadToken {
    fn drop(&mut self) {
        if !self.fired {
            warn!("Load token dropped without completing; barrier will never fire");
        }
    }
}
