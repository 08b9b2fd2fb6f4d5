//! Typed change notifications.
//!
//! Observers (the rendering layer) subscribe to a crossbeam channel of
//! `StoreEvent`s. Events are a closed enum, not a string namespace, so the
//! compiler keeps publisher and subscribers in agreement. Subscribers never
//! get a mutation path: they only read the store and react to events.

use std::path::PathBuf;

use crossbeam::channel::{self, Receiver, Sender};
use tracing::debug;

/// Everything the store announces to observers.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreEvent {
    /// The track/series structure (or a series' placement) changed.
    TracksChanged,
    /// The label set changed.
    LabelsChanged,
    /// A project committed atomically after all decodes resolved.
    ProjectLoaded { path: PathBuf },
    /// A project was written to disk.
    ProjectSaved { path: PathBuf },
    /// A load (direct or whole-project) failed; the previous state is intact.
    LoadFailed { path: PathBuf, message: String },
    /// Label export finished.
    LabelsExported { files: usize },
}

/// Fan-out of `StoreEvent`s to any number of subscribers.
#[derive(Default)]
pub struct Notifier {
    subscribers: Vec<Sender<StoreEvent>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to all future events.
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver an event to every live subscriber, dropping disconnected ones.
    pub fn emit(&mut self, event: StoreEvent) {
        debug!(?event, subscribers = self.subscribers.len(), "Emitting store event");
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
