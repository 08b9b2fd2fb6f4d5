//! Labeling sub-store state: class list and reference-timeline labels.
//!
//! Serialized opaquely into the project file and captured whole in labeling
//! snapshots.

use al_common::Label;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelingState {
    /// Known class names, in definition order.
    pub classes: Vec<String>,
    /// Labels on the reference timeline, in creation order.
    pub labels: Vec<Label>,
}

impl LabelingState {
    /// Register a class name; duplicates are ignored.
    pub fn add_class(&mut self, name: &str) {
        if !self.classes.iter().any(|c| c == name) {
            self.classes.push(name.to_string());
        }
    }

    /// Add a label, registering its class if unseen.
    pub fn add_label(&mut self, label: Label) {
        self.add_class(&label.class_name);
        self.labels.push(label);
    }

    /// Remove a label by index. Returns the removed label, or `None` if out
    /// of bounds.
    pub fn remove_label(&mut self, index: usize) -> Option<Label> {
        if index < self.labels.len() {
            Some(self.labels.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.classes.clear();
        self.labels.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_label_registers_class() {
        let mut state = LabelingState::default();
        state.add_label(Label::new("walk", 0.0, 1.0));
        state.add_label(Label::new("run", 1.0, 2.0));
        state.add_label(Label::new("walk", 2.0, 3.0));

        assert_eq!(state.labels.len(), 3);
        assert_eq!(state.classes, vec!["walk", "run"]);
    }

    #[test]
    fn remove_label_by_index() {
        let mut state = LabelingState::default();
        state.add_label(Label::new("walk", 0.0, 1.0));
        state.add_label(Label::new("run", 1.0, 2.0));

        let removed = state.remove_label(0).unwrap();
        assert_eq!(removed.class_name, "walk");
        assert_eq!(state.labels.len(), 1);

        assert!(state.remove_label(5).is_none());
    }

    #[test]
    fn serde_round_trip() {
        let mut state = LabelingState::default();
        state.add_label(Label::new("walk", 0.5, 2.5));

        let value = serde_json::to_value(&state).unwrap();
        let back: LabelingState = serde_json::from_value(value).unwrap();
        assert_eq!(back, state);
    }
}
