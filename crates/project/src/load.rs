//! Project deserialization — loading `SavedProject` from JSON files.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{ProjectError, ProjectResult};
use crate::types::SavedProject;

/// Deserialize a project from a JSON string and validate its structure.
pub fn from_json_string(json: &str) -> ProjectResult<SavedProject> {
    let project: SavedProject = serde_json::from_str(json)?;

    debug!(
        project_name = %project.metadata.name,
        tracks = project.tracks.len(),
        series = project.series_count(),
        "Deserialized project from JSON"
    );

    validate_project(&project)?;
    Ok(project)
}

/// Load a project from a file at the given path.
pub fn load_project(path: &Path) -> ProjectResult<SavedProject> {
    if !path.exists() {
        return Err(ProjectError::NotFound {
            path: path.display().to_string(),
        });
    }

    let json = std::fs::read_to_string(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to read project file");
        ProjectError::Io(e)
    })?;

    let project = from_json_string(&json)?;

    info!(
        project_name = %project.metadata.name,
        path = %path.display(),
        tracks = project.tracks.len(),
        series = project.series_count(),
        "Project loaded"
    );

    Ok(project)
}

/// Validate structural requirements of a loaded project:
/// ids unique, back-references consistent, reference bounds ordered.
fn validate_project(project: &SavedProject) -> ProjectResult<()> {
    let mut track_ids = std::collections::HashSet::new();
    let mut series_ids = std::collections::HashSet::new();

    for track in project.all_tracks() {
        if !track_ids.insert(track.id.as_str()) {
            return Err(ProjectError::InvalidProject {
                reason: format!("duplicate track id {:?}", track.id),
            });
        }
        for series in &track.time_series {
            if !series_ids.insert(series.id.as_str()) {
                return Err(ProjectError::InvalidProject {
                    reason: format!("duplicate series id {:?}", series.id),
                });
            }
            if series.track_id != track.id {
                return Err(ProjectError::InvalidProject {
                    reason: format!(
                        "series {:?} back-references track {:?} but belongs to {:?}",
                        series.id, series.track_id, track.id
                    ),
                });
            }
            if series.reference_end < series.reference_start {
                return Err(ProjectError::InvalidProject {
                    reason: format!(
                        "series {:?} has inverted reference bounds ({} > {})",
                        series.id, series.reference_start, series.reference_end
                    ),
                });
            }
            if series.source.is_empty() {
                return Err(ProjectError::InvalidProject {
                    reason: format!("series {:?} has an empty source path", series.id),
                });
            }
        }
    }

    Ok(())
}
