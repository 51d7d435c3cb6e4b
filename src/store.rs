// 🗄️ Project Store
// The single in-memory collection of projects for a session. Created once at
// startup and passed explicitly to whoever needs it.
//
// Load operations replace the contents (never merge). Persistence failures are
// logged here and surface to callers as `false`, never as a panic.

use crate::codec::{json, text};
use crate::entities::Project;
use std::path::Path;
use tracing::{error, info, warn};

/// Where the startup contents came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupSource {
    Json,
    Text,
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
}

impl ProjectStore {
    pub fn new() -> Self {
        ProjectStore {
            projects: Vec::new(),
        }
    }

    pub fn from_projects(projects: Vec<Project>) -> Self {
        ProjectStore { projects }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Append at the end; duplicate names are allowed
    pub fn add(&mut self, project: Project) {
        self.projects.push(project);
    }

    /// First project with exactly this name, in insertion order
    pub fn find_by_name(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name() == name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.name() == name)
    }

    /// Replace the contents with a JSON snapshot
    ///
    /// Returns false (store untouched) when the file is missing or unreadable.
    pub fn load_json(&mut self, path: &Path) -> bool {
        match json::read_projects(path) {
            Ok(projects) => {
                info!(path = %path.display(), count = projects.len(), "projects loaded from JSON");
                self.projects = projects;
                true
            }
            Err(e) if e.is_not_found() => {
                warn!(path = %path.display(), "JSON snapshot not found");
                false
            }
            Err(e) => {
                error!(error = %e, "error loading from JSON");
                false
            }
        }
    }

    /// Overwrite `path` with a JSON snapshot of the current contents
    pub fn save_json(&self, path: &Path) -> bool {
        match json::write_projects(path, &self.projects) {
            Ok(()) => {
                info!(path = %path.display(), count = self.projects.len(), "projects saved to JSON");
                true
            }
            Err(e) => {
                error!(error = %e, "error saving to JSON");
                false
            }
        }
    }

    /// Overwrite `path` with the text rendering of the current contents
    pub fn write_text(&self, path: &Path) -> bool {
        match text::write_projects(path, &self.projects) {
            Ok(()) => {
                info!(path = %path.display(), count = self.projects.len(), "projects written to text file");
                true
            }
            Err(e) => {
                error!(error = %e, "error writing text file");
                false
            }
        }
    }

    /// Replace the contents with a text snapshot, upgraded to enhanced projects
    ///
    /// Missing or unopenable file: store untouched. Failure part-way through:
    /// the store holds the records read before the failure.
    pub fn import_text(&mut self, path: &Path) -> bool {
        let import = match text::read_projects(path) {
            Ok(import) => import,
            Err(e) if e.is_not_found() => {
                warn!(path = %path.display(), "text file not found");
                return false;
            }
            Err(e) => {
                error!(error = %e, "error loading projects from text file");
                return false;
            }
        };

        self.projects = import
            .projects
            .into_iter()
            .map(Project::into_enhanced)
            .collect();

        match import.interrupted {
            None => {
                info!(path = %path.display(), count = self.projects.len(), "projects imported from text file");
                true
            }
            Some(e) => {
                error!(error = %e, kept = self.projects.len(), "text import stopped part-way");
                false
            }
        }
    }

    /// Startup: JSON snapshot first, text snapshot as fallback
    pub fn load_or_import(&mut self, json_path: &Path, text_path: &Path) -> StartupSource {
        if self.load_json(json_path) {
            StartupSource::Json
        } else if self.import_text(text_path) {
            StartupSource::Text
        } else {
            StartupSource::Empty
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
