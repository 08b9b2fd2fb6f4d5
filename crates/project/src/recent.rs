//! Recent projects list — tracks recently opened project files.
//!
//! The list is an MRU ordering persisted as JSON under a fixed file name in a
//! platform-appropriate data directory. Opening or saving a project
//! de-duplicates its path and moves it to the front.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::ProjectResult;
use crate::types::{epoch_seconds_now, RecentEntry};

/// Maximum number of recent project entries to keep.
const MAX_RECENT_ENTRIES: usize = 10;

/// Fixed key (file name) for the persisted recent projects list.
const RECENT_PROJECTS_FILE: &str = "recent_projects.json";

/// Manages a list of recently opened projects, most recent first.
#[derive(Clone, Debug)]
pub struct RecentProjects {
    entries: Vec<RecentEntry>,
    storage_path: PathBuf,
}

impl RecentProjects {
    /// Load recent projects from the default storage location.
    ///
    /// If the file does not exist or is invalid, returns an empty list.
    pub fn load() -> Self {
        Self::load_from(&default_storage_path())
    }

    /// Load recent projects from a specific file path.
    pub fn load_from(path: &Path) -> Self {
        let entries = match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Vec<RecentEntry>>(&json) {
                Ok(entries) => {
                    debug!(count = entries.len(), "Loaded recent projects");
                    entries
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse recent projects file, starting fresh");
                    Vec::new()
                }
            },
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(error = %e, "Failed to read recent projects file");
                }
                Vec::new()
            }
        };

        Self {
            entries,
            storage_path: path.to_path_buf(),
        }
    }

    /// Add or update a project entry, moving it to the front.
    ///
    /// De-duplicates by path; the list is capped at `MAX_RECENT_ENTRIES`.
    pub fn touch(&mut self, path: &Path, name: &str) {
        let path_str = path.display().to_string();

        self.entries.retain(|e| e.path != path_str);
        self.entries.insert(
            0,
            RecentEntry {
                path: path_str,
                name: name.to_string(),
                last_opened: epoch_seconds_now(),
            },
        );
        self.entries.truncate(MAX_RECENT_ENTRIES);

        debug!(name, count = self.entries.len(), "Touched recent project");
    }

    /// Remove an entry by its file path.
    pub fn remove(&mut self, path: &Path) {
        let path_str = path.display().to_string();
        self.entries.retain(|e| e.path != path_str);
    }

    /// The entries, most recent first.
    pub fn entries(&self) -> &[RecentEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Save the recent projects list to disk.
    pub fn save(&self) -> ProjectResult<()> {
        if let Some(parent) = self.storage_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.storage_path, json.as_bytes())?;

        info!(
            count = self.entries.len(),
            path = %self.storage_path.display(),
            "Saved recent projects list"
        );
        Ok(())
    }

    /// Remove entries whose files no longer exist on disk.
    pub fn prune_missing(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| {
            let exists = Path::new(&e.path).exists();
            if !exists {
                debug!(path = %e.path, "Pruning missing recent project");
            }
            exists
        });
        before - self.entries.len()
    }
}

/// Default file path for persisting the recent projects list.
fn default_storage_path() -> PathBuf {
    let base = if cfg!(target_os = "windows") {
        std::env::var("APPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."))
    } else if cfg!(target_os = "macos") {
        home_relative("Library/Application Support")
    } else {
        std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home_relative(".local/share"))
    };

    base.join("alignlab").join(RECENT_PROJECTS_FILE)
}

fn home_relative(subpath: &str) -> PathBuf {
    std::env::var("HOME")
        .map(|h| PathBuf::from(h).join(subpath))
        .unwrap_or_else(|_| PathBuf::from(".").join(subpath))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_recent_projects() {
        let path = std::env::temp_dir().join("al_recent_empty_test.json");
        let _ = std::fs::remove_file(&path);
        let recent = RecentProjects::load_from(&path);
        assert!(recent.is_empty());
        assert_eq!(recent.len(), 0);
    }

    #[test]
    fn touch_and_retrieve() {
        let path = std::env::temp_dir().join("al_recent_touch_test.json");
        let _ = std::fs::remove_file(&path);
        let mut recent = RecentProjects::load_from(&path);

        recent.touch(Path::new("/projects/a.alp"), "Project A");
        recent.touch(Path::new("/projects/b.alp"), "Project B");

        assert_eq!(recent.len(), 2);
        assert_eq!(recent.entries()[0].name, "Project B");
        assert_eq!(recent.entries()[1].name, "Project A");
    }

    #[test]
    fn touch_duplicate_moves_to_front() {
        let path = std::env::temp_dir().join("al_recent_dedup_test.json");
        let _ = std::fs::remove_file(&path);
        let mut recent = RecentProjects::load_from(&path);

        recent.touch(Path::new("/a.alp"), "A");
        recent.touch(Path::new("/b.alp"), "B");
        recent.touch(Path::new("/c.alp"), "C");
        recent.touch(Path::new("/a.alp"), "A Updated");

        assert_eq!(recent.len(), 3);
        assert_eq!(recent.entries()[0].name, "A Updated");
        assert_eq!(recent.entries()[0].path, "/a.alp");
    }

    #[test]
    fn max_entries_enforced() {
        let path = std::env::temp_dir().join("al_recent_max_test.json");
        let _ = std::fs::remove_file(&path);
        let mut recent = RecentProjects::load_from(&path);

        for i in 0..25 {
            recent.touch(
                Path::new(&format!("/projects/{i}.alp")),
                &format!("Project {i}"),
            );
        }

        assert_eq!(recent.len(), MAX_RECENT_ENTRIES);
        assert_eq!(recent.entries()[0].name, "Project 24");
    }

    #[test]
    fn save_and_reload() {
        let path = std::env::temp_dir().join("al_recent_save_test.json");
        let _ = std::fs::remove_file(&path);

        {
            let mut recent = RecentProjects::load_from(&path);
            recent.touch(Path::new("/test/project.alp"), "Test Project");
            recent.save().expect("save");
        }

        {
            let recent = RecentProjects::load_from(&path);
            assert_eq!(recent.len(), 1);
            assert_eq!(recent.entries()[0].name, "Test Project");
        }

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn remove_entry() {
        let path = std::env::temp_dir().join("al_recent_remove_test.json");
        let _ = std::fs::remove_file(&path);
        let mut recent = RecentProjects::load_from(&path);

        recent.touch(Path::new("/a.alp"), "A");
        recent.touch(Path::new("/b.alp"), "B");
        recent.remove(Path::new("/a.alp"));

        assert_eq!(recent.len(), 1);
        assert_eq!(recent.entries()[0].name, "B");
    }

    #[test]
    fn corrupted_file_loads_empty() {
        let path = std::env::temp_dir().join("al_recent_corrupt_test.json");
        std::fs::write(&path, "not valid json!!!").expect("write");

        let recent = RecentProjects::load_from(&path);
        assert!(recent.is_empty());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn prune_missing_removes_nonexistent() {
        let path = std::env::temp_dir().join("al_recent_prune_test.json");
        let _ = std::fs::remove_file(&path);
        let mut recent = RecentProjects::load_from(&path);

        recent.touch(Path::new("/definitely/not/a/real/project.alp"), "Ghost");
        let existing = std::env::temp_dir().join("al_prune_marker.txt");
        std::fs::write(&existing, "marker").expect("write marker");
        recent.touch(&existing, "Real");

        let removed = recent.prune_missing();
        assert_eq!(removed, 1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent.entries()[0].name, "Real");

        let _ = std::fs::remove_file(&existing);
    }
}
