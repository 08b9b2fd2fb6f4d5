//! Undo/redo snapshot structures.
//!
//! A snapshot is a deep, fully owned copy: every field is cloned value data,
//! so no mutation of the live model after capture can ever leak into it.

use crate::alignment::AlignmentState;
use crate::labeling::LabelingState;
use crate::model::ProjectModel;

/// Undo/redo unit for the alignment domain: the structural model plus the
/// alignment sub-store state.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignmentSnapshot {
    pub model: ProjectModel,
    pub alignment: AlignmentState,
}

impl AlignmentSnapshot {
    pub fn capture(model: &ProjectModel, alignment: &AlignmentState) -> Self {
        Self {
            model: model.clone(),
            alignment: alignment.clone(),
        }
    }
}

/// Undo/redo unit for the labeling domain.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelingSnapshot {
    pub labeling: LabelingState,
}

impl LabelingSnapshot {
    pub fn capture(labeling: &LabelingState) -> Self {
        Self {
            labeling: labeling.clone(),
        }
    }
}
