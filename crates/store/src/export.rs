//! Label export — stamp reference-timeline labels onto each series' rows.
//!
//! For every sensor-backed series the export re-decodes the source file,
//! solves the affine map between the file's local time base and the series'
//! reference placement, projects all labels through the inverse map, and
//! writes an augmented copy of the source rows with the matching class name
//! appended as a final column. Video-backed series carry no rows and are
//! skipped.

use std::path::{Path, PathBuf};

use al_common::SourceKind;
use al_timemap::{project_labels, TimeMap};
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::labeling::LabelingState;
use crate::model::ProjectModel;

/// Export one annotated file per sensor-backed series into `out_dir`.
///
/// Returns the paths of the files written. Each output row is the original
/// row's fields plus one trailing column: the class name of the label whose
/// local interval contains the row's timestamp (open start, closed end), or
/// empty if no label matches.
pub fn export_label_files(
    model: &ProjectModel,
    labeling: &LabelingState,
    out_dir: &Path,
) -> StoreResult<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    for track in model.all_tracks() {
        for series in &track.series {
            if SourceKind::from_path(&series.source) != Some(SourceKind::Sensor) {
                debug!(series = %series.id, "Skipping non-sensor series in label export");
                continue;
            }

            let data = al_decode::sensor::decode_sensor_file(&series.source)?;
            let map = TimeMap::solve(data.local_range(), series.reference_range())?;
            let mapped = project_labels(&map, &labeling.labels)?;

            let mut out = String::new();
            let mut cursor = 0usize;
            for row in &data.rows {
                // Skip labels that ended strictly before this row. A row at
                // exactly a label's end still belongs to it (closed end).
                while cursor + 1 < mapped.len() && row.time > mapped[cursor].timestamp_end {
                    cursor += 1;
                }
                let class = mapped
                    .get(cursor)
                    .filter(|l| l.contains(row.time))
                    .map(|l| l.class_name.as_str())
                    .unwrap_or("");

                out.push_str(&row.fields.join("\t"));
                out.push('\t');
                out.push_str(class);
                out.push('\n');
            }

            let stem = series
                .source
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("series");
            let out_path = out_dir.join(format!("{stem}-{}.labels.tsv", series.id));
            std::fs::write(&out_path, out.as_bytes())?;

            info!(
                series = %series.id,
                rows = data.rows.len(),
                path = %out_path.display(),
                "Exported label file"
            );
            written.push(out_path);
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::model::{AlignedTimeSeries, Track};
    use al_common::Label;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("al_export_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn sensor_series(id: &str, source: PathBuf, reference_start: f64, reference_end: f64) -> AlignedTimeSeries {
        AlignedTimeSeries {
            id: id.to_string(),
            track_id: "track-0".to_string(),
            reference_start,
            reference_end,
            source,
            aligned: true,
            time_series: Vec::new(),
        }
    }

    fn model_with(series: Vec<AlignedTimeSeries>) -> ProjectModel {
        let mut model = ProjectModel::default();
        model.tracks.push(Track {
            id: "track-0".to_string(),
            series,
            minimized: false,
        });
        model
    }

    fn labeling_with(labels: &[(&str, f64, f64)]) -> LabelingState {
        let mut state = LabelingState::default();
        for (class, start, end) in labels {
            state.add_label(Label::new(*class, *start, *end));
        }
        state
    }

    fn annotations(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .expect("read exported file")
            .lines()
            .map(|l| l.rsplit('\t').next().unwrap_or("").to_string())
            .collect()
    }

    #[test]
    fn identity_alignment_stamps_matching_rows() {
        let dir = temp_dir("identity");
        let src = dir.join("walk.tsv");
        std::fs::write(&src, "0.0\t1.0\n1.0\t2.0\n2.0\t3.0\n3.0\t4.0\n").unwrap();

        // Local bounds 0..3, reference 0..3: the map is the identity.
        let model = model_with(vec![sensor_series("series-0", src, 0.0, 3.0)]);
        let labeling = labeling_with(&[("walk", 1.0, 3.0)]);

        let files = export_label_files(&model, &labeling, &dir).unwrap();
        assert_eq!(files.len(), 1);

        // Open start: the row at exactly 1.0 is not labeled. Closed end: the
        // row at exactly 3.0 is.
        assert_eq!(annotations(&files[0]), vec!["", "", "walk", "walk"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn scaled_alignment_projects_labels_into_local_time() {
        let dir = temp_dir("scaled");
        let src = dir.join("sensor.tsv");
        std::fs::write(&src, "0.0\t1\n2.5\t2\n5.0\t3\n7.5\t4\n10.0\t5\n").unwrap();

        // Local 0..10 mapped to reference 0..20 (scale 2). A reference label
        // (5, 10] lands on local (2.5, 5].
        let model = model_with(vec![sensor_series("series-0", src, 0.0, 20.0)]);
        let labeling = labeling_with(&[("run", 5.0, 10.0)]);

        let files = export_label_files(&model, &labeling, &dir).unwrap();
        assert_eq!(annotations(&files[0]), vec!["", "", "run", "", ""]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn consecutive_labels_advance_in_one_pass() {
        let dir = temp_dir("multi");
        let src = dir.join("session.tsv");
        std::fs::write(&src, "0.0\ta\n1.0\tb\n2.0\tc\n3.0\td\n4.0\te\n5.0\tf\n").unwrap();

        let model = model_with(vec![sensor_series("series-0", src, 0.0, 5.0)]);
        let labeling = labeling_with(&[("walk", 0.0, 2.0), ("run", 3.0, 5.0)]);

        let files = export_label_files(&model, &labeling, &dir).unwrap();
        // Row 3.0 is exactly the open start of "run": unlabeled.
        assert_eq!(
            annotations(&files[0]),
            vec!["", "walk", "walk", "", "run", "run"]
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn no_labels_still_writes_every_row() {
        let dir = temp_dir("nolabels");
        let src = dir.join("quiet.tsv");
        std::fs::write(&src, "0.0\t1\n1.0\t2\n2.0\t3\n").unwrap();

        let model = model_with(vec![sensor_series("series-0", src, 0.0, 2.0)]);
        let files = export_label_files(&model, &LabelingState::default(), &dir).unwrap();

        assert_eq!(annotations(&files[0]), vec!["", "", ""]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn video_series_are_skipped() {
        let dir = temp_dir("video");
        let model = model_with(vec![AlignedTimeSeries {
            id: "series-0".into(),
            track_id: "track-0".into(),
            reference_start: 0.0,
            reference_end: 30.0,
            source: PathBuf::from("clip.webm"),
            aligned: false,
            time_series: Vec::new(),
        }]);

        let files = export_label_files(&model, &LabelingState::default(), &dir).unwrap();
        assert!(files.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_model_exports_nothing() {
        let dir = temp_dir("empty");
        let files =
            export_label_files(&ProjectModel::default(), &LabelingState::default(), &dir).unwrap();
        assert!(files.is_empty());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn single_row_source_is_unmappable() {
        let dir = temp_dir("degenerate");
        let src = dir.join("point.tsv");
        std::fs::write(&src, "1.0\t2.0\n").unwrap();

        let model = model_with(vec![sensor_series("series-0", src, 0.0, 10.0)]);
        let err = export_label_files(&model, &LabelingState::default(), &dir).unwrap_err();
        assert!(matches!(err, StoreError::TimeMap(_)));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn output_name_carries_series_id() {
        let dir = temp_dir("naming");
        let src = dir.join("walk.tsv");
        std::fs::write(&src, "0.0\t1\n1.0\t2\n").unwrap();

        let model = model_with(vec![sensor_series("series-3", src, 0.0, 1.0)]);
        let files = export_label_files(&model, &LabelingState::default(), &dir).unwrap();
        assert_eq!(
            files[0].file_name().and_then(|n| n.to_str()),
            Some("walk-series-3.labels.tsv")
        );

        let _ = std::fs::remove_dir_all(&dir);
    }
}
