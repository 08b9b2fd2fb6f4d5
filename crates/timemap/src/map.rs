//! Two-point affine solve and label projection.

use al_common::{Label, MappedLabel, TimeRange};
use serde::{Deserialize, Serialize};

use crate::error::{TimeMapError, TimeMapResult};

/// The affine map `reference = k * local + b` between a series' local time
/// base and the shared reference timeline.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeMap {
    /// Scale factor.
    pub k: f64,
    /// Offset.
    pub b: f64,
}

impl TimeMap {
    /// Solve for `(k, b)` from two local/reference correspondences:
    /// `(local.start, reference.start)` and `(local.end, reference.end)`.
    ///
    /// A zero-length local interval is a degenerate input and is rejected
    /// rather than producing an infinite or NaN scale.
    pub fn solve(local: TimeRange, reference: TimeRange) -> TimeMapResult<Self> {
        if local.is_degenerate() {
            tracing::warn!(
                local_start = local.start,
                reference = %reference,
                "Rejecting degenerate alignment interval"
            );
            return Err(TimeMapError::DegenerateInterval { local: local.start });
        }

        let k = (reference.end - reference.start) / (local.end - local.start);
        let b = reference.start - k * local.start;
        Ok(Self { k, b })
    }

    /// Map a local time onto the reference timeline.
    pub fn to_reference(&self, local_time: f64) -> f64 {
        self.k * local_time + self.b
    }

    /// Map a reference time back into the local time base.
    ///
    /// Fails on a zero-scale map, which only arises from a zero-length
    /// *reference* interval (a supported but non-invertible configuration).
    pub fn to_local(&self, reference_time: f64) -> TimeMapResult<f64> {
        if self.k == 0.0 {
            return Err(TimeMapError::ZeroScale);
        }
        Ok((reference_time - self.b) / self.k)
    }
}

/// Project reference-timeline labels into a series' local time base and sort
/// them by local start time.
///
/// Labels are projected through the inverse map; the result is transient and
/// only used while walking the series' native rows during export.
pub fn project_labels(map: &TimeMap, labels: &[Label]) -> TimeMapResult<Vec<MappedLabel>> {
    let mut mapped = Vec::with_capacity(labels.len());
    for label in labels {
        let start = map.to_local(label.timestamp_start)?;
        let end = map.to_local(label.timestamp_end)?;
        // A negative scale flips the interval; keep start <= end.
        let (start, end) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        mapped.push(MappedLabel {
            class_name: label.class_name.clone(),
            timestamp_start: start,
            timestamp_end: end,
        });
    }
    mapped.sort_by(|a, b| {
        a.timestamp_start
            .partial_cmp(&b.timestamp_start)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(mapped)
}
