//! Snapshot-based undo/redo history, generic over the snapshot type.
//!
//! One instance exists per edit domain (alignment, labeling) so that undoing
//! a structural edit never disturbs labeling work and vice versa.
//!
//! # Usage
//!
//! ```ignore
//! let mut history: History<AlignmentSnapshot> = History::new(50);
//!
//! // Before a mutating action, capture the state the action will change.
//! history.push("Delete track", store.alignment_snapshot());
//!
//! // Undo: hand over the current state (it becomes the redo target) and
//! // install whatever comes back.
//! if let Some(prev) = history.undo("Current", store.alignment_snapshot()) {
//!     store.load_alignment_snapshot(prev);
//! }
//! ```

use std::time::Instant;

/// A single entry in the undo/redo history.
#[derive(Clone, Debug)]
pub struct HistoryEntry<T> {
    /// Human-readable label describing the action (e.g. "Delete track").
    pub label: String,
    /// The state snapshot at this point in history.
    pub snapshot: T,
    /// When this entry was created.
    pub timestamp: Instant,
}

impl<T> HistoryEntry<T> {
    fn new(label: &str, snapshot: T) -> Self {
        Self {
            label: label.to_string(),
            snapshot,
            timestamp: Instant::now(),
        }
    }
}

/// Bounded undo/redo stacks over snapshots of type `T`.
///
/// - Pushing a new entry clears the redo stack (strict linear history:
///   branches made from an earlier point are discarded)
/// - Undo and redo are exact inverses along the same path as long as no
///   intervening push occurs
/// - Maximum stack depth prevents unbounded memory growth
pub struct History<T> {
    undo_stack: Vec<HistoryEntry<T>>,
    redo_stack: Vec<HistoryEntry<T>>,
    max_entries: usize,
}

impl<T> History<T> {
    /// Create a history with the given maximum number of undo entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_entries,
        }
    }

    /// Push a snapshot of the state *before* the action being performed.
    /// Clears the redo stack.
    pub fn push(&mut self, label: &str, snapshot: T) {
        self.redo_stack.clear();
        self.undo_stack.push(HistoryEntry::new(label, snapshot));

        while self.undo_stack.len() > self.max_entries {
            self.undo_stack.remove(0);
        }

        tracing::debug!(label, undo_depth = self.undo_stack.len(), "History entry pushed");
    }

    /// Clear both stacks (project load / new project: old history refers to a
    /// superseded model).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        tracing::debug!("History cleared");
    }

    /// Undo: push `current` onto the redo stack and return the most recent
    /// undo entry's snapshot, or `None` (leaving state untouched) if there is
    /// nothing to undo.
    pub fn undo(&mut self, current_label: &str, current: T) -> Option<T> {
        if self.undo_stack.is_empty() {
            return None;
        }

        self.redo_stack.push(HistoryEntry::new(current_label, current));
        let entry = self.undo_stack.pop().expect("checked non-empty");
        tracing::debug!(
            label = %entry.label,
            undo_remaining = self.undo_stack.len(),
            "Undo"
        );
        Some(entry.snapshot)
    }

    /// Redo: push `current` back onto the undo stack and return the most
    /// recent redo entry's snapshot, or `None` if there is nothing to redo.
    pub fn redo(&mut self, current_label: &str, current: T) -> Option<T> {
        if self.redo_stack.is_empty() {
            return None;
        }

        self.undo_stack.push(HistoryEntry::new(current_label, current));
        let entry = self.redo_stack.pop().expect("checked non-empty");
        tracing::debug!(
            label = %entry.label,
            redo_remaining = self.redo_stack.len(),
            "Redo"
        );
        Some(entry.snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Label of the action that would be undone next.
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.last().map(|e| e.label.as_str())
    }

    /// Label of the action that would be redone next.
    pub fn redo_label(&self) -> Option<&str> {
        self.redo_stack.last().map(|e| e.label.as_str())
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}
