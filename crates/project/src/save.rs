//! Project serialization — writing `SavedProject` to JSON files.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{ProjectError, ProjectResult};
use crate::types::SavedProject;

/// Serialize a project to a pretty-printed JSON string.
pub fn to_json_string(project: &SavedProject) -> ProjectResult<String> {
    let json = serde_json::to_string_pretty(project)?;
    debug!(
        project_name = %project.metadata.name,
        json_len = json.len(),
        "Serialized project to JSON"
    );
    Ok(json)
}

/// Save a project to a file at the given path.
///
/// The file is written atomically: data is first written to a temporary file
/// in the same directory, then renamed to the target path, so an interrupted
/// save never leaves a truncated project behind.
pub fn save_project(project: &SavedProject, path: &Path) -> ProjectResult<()> {
    let json = to_json_string(project)?;

    let temp_path = path.with_extension("alp.tmp");

    std::fs::write(&temp_path, json.as_bytes()).map_err(|e| {
        tracing::error!(path = %temp_path.display(), error = %e, "Failed to write temp file");
        ProjectError::Io(e)
    })?;

    std::fs::rename(&temp_path, path).map_err(|e| {
        // If rename fails, try to clean up the temp file (best effort).
        let _ = std::fs::remove_file(&temp_path);
        tracing::error!(
            from = %temp_path.display(),
            to = %path.display(),
            error = %e,
            "Failed to rename temp file to target"
        );
        ProjectError::Io(e)
    })?;

    info!(
        project_name = %project.metadata.name,
        tracks = project.tracks.len(),
        series = project.series_count(),
        path = %path.display(),
        "Project saved"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SavedSeries, SavedTrack};

    fn sample_project() -> SavedProject {
        let mut p = SavedProject::new("Save Test");
        p.tracks.push(SavedTrack {
            id: "track-1".into(),
            minimized: false,
            time_series: vec![SavedSeries {
                id: "series-1".into(),
                track_id: "track-1".into(),
                reference_start: 0.0,
                reference_end: 10.0,
                source: "data/walk.tsv".into(),
                aligned: false,
            }],
        });
        p
    }

    #[test]
    fn to_json_string_produces_valid_json() {
        let json = to_json_string(&sample_project()).expect("serialize");
        let _: serde_json::Value = serde_json::from_str(&json).expect("parse as Value");
        assert!(json.contains("Save Test"));
        assert!(json.contains("referenceTrack"));
    }

    #[test]
    fn save_project_creates_file() {
        let dir = std::env::temp_dir().join("al_project_save_test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("test_project.alp");

        save_project(&sample_project(), &path).expect("save");

        assert!(path.exists());
        let contents = std::fs::read_to_string(&path).expect("read");
        assert!(contents.contains("Save Test"));

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn save_project_atomic_no_temp_residue() {
        let dir = std::env::temp_dir().join("al_project_atomic_test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("atomic.alp");
        let temp_path = path.with_extension("alp.tmp");

        save_project(&sample_project(), &path).expect("save");

        assert!(!temp_path.exists());
        assert!(path.exists());

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn save_project_roundtrip() {
        let dir = std::env::temp_dir().join("al_project_roundtrip_test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("roundtrip.alp");

        save_project(&sample_project(), &path).expect("save");

        let contents = std::fs::read_to_string(&path).expect("read");
        let loaded: SavedProject = serde_json::from_str(&contents).expect("deserialize");
        assert_eq!(loaded.metadata.name, "Save Test");
        assert_eq!(loaded.tracks.len(), 1);
        assert_eq!(loaded.tracks[0].time_series[0].source, "data/walk.tsv");

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir(&dir);
    }
}
