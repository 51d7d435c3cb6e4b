// 🗂️ JSON Codec - authoritative, lossless snapshot format
//
// One object per project:
//   name, category, year_started, location ("{city}, {state}"),
//   total_cost, funding, budget, project_period, type
// `type` selects the status axis on the way back in. Every record loads as an
// enhanced project.

use crate::entities::{Enrichment, Location, Project, ProjectKind, ProjectStatus};
use crate::error::PersistenceError;
use crate::validators::{validate_budget, validate_date_range};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub const TYPE_ENHANCED: &str = "EnhancedProject";
pub const TYPE_ENHANCED_CURRENT: &str = "EnhancedCurrentProject";
pub const TYPE_ENHANCED_PAST: &str = "EnhancedPastProject";

/// Flat persisted shape of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    pub category: String,
    pub year_started: String,
    pub location: String,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub funding: f64,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub project_period: String,
    #[serde(rename = "type", default = "default_record_type")]
    pub record_type: String,
}

fn default_record_type() -> String {
    TYPE_ENHANCED.to_string()
}

/// Discriminator written for a project
///
/// Non-enhanced projects are saved as their enhanced counterpart with an empty
/// budget and period.
pub fn record_type(kind: ProjectKind) -> &'static str {
    match kind.status() {
        Some(ProjectStatus::Current) => TYPE_ENHANCED_CURRENT,
        Some(ProjectStatus::Past) => TYPE_ENHANCED_PAST,
        None => TYPE_ENHANCED,
    }
}

impl From<&Project> for ProjectRecord {
    fn from(project: &Project) -> Self {
        ProjectRecord {
            name: project.name().to_string(),
            category: project.category().to_string(),
            year_started: project.year_started().to_string(),
            location: project.location().to_string(),
            total_cost: project.total_cost(),
            funding: project.funding(),
            budget: project.budget().unwrap_or_default().to_string(),
            project_period: project.project_period().unwrap_or_default().to_string(),
            record_type: record_type(project.kind()).to_string(),
        }
    }
}

impl From<ProjectRecord> for Project {
    /// Rebuild a project without re-running the budget/period validators
    ///
    /// Values that would fail validation are loaded as-is and logged.
    fn from(record: ProjectRecord) -> Self {
        let status = match record.record_type.as_str() {
            TYPE_ENHANCED_CURRENT => Some(ProjectStatus::Current),
            TYPE_ENHANCED_PAST => Some(ProjectStatus::Past),
            TYPE_ENHANCED => None,
            other => {
                warn!(name = %record.name, record_type = other, "unknown record type, loading as EnhancedProject");
                None
            }
        };

        if !record.budget.is_empty() && validate_budget(&record.budget).is_err() {
            warn!(name = %record.name, budget = %record.budget, "loaded budget does not match the budget format");
        }
        if !record.project_period.is_empty() && validate_date_range(&record.project_period).is_err() {
            warn!(name = %record.name, period = %record.project_period, "loaded project period is not a valid date range");
        }

        let mut project = Project::new(
            record.name,
            record.category,
            record.year_started,
            Location::parse(&record.location),
        )
        .with_enrichment(Enrichment::trusted(record.budget, record.project_period));

        if let Some(status) = status {
            project = project.with_status(status);
        }

        if let Err(e) = project.set_total_cost(record.total_cost) {
            warn!(name = %project.name(), error = %e, "total cost reset to 0");
        }
        if let Err(e) = project.set_funding(record.funding) {
            warn!(name = %project.name(), error = %e, "funding reset to 0");
        }

        project
    }
}

// ============================================================================
// STRING CODEC
// ============================================================================

/// Pretty-printed JSON array (two-space indent)
pub fn to_json_string(projects: &[Project]) -> serde_json::Result<String> {
    let records: Vec<ProjectRecord> = projects.iter().map(ProjectRecord::from).collect();
    serde_json::to_string_pretty(&records)
}

pub fn from_json_str(content: &str) -> serde_json::Result<Vec<Project>> {
    let records: Vec<ProjectRecord> = serde_json::from_str(content)?;
    Ok(records.into_iter().map(Project::from).collect())
}

// ============================================================================
// FILE CODEC
// ============================================================================

/// Overwrite `path` with the JSON snapshot of `projects`
pub fn write_projects(path: &Path, projects: &[Project]) -> Result<(), PersistenceError> {
    let content = to_json_string(projects).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, content).map_err(|e| PersistenceError::from_io(path, e))?;
    debug!(path = %path.display(), count = projects.len(), "wrote JSON snapshot");
    Ok(())
}

/// Read every record of a JSON snapshot; any malformed record fails the whole read
pub fn read_projects(path: &Path) -> Result<Vec<Project>, PersistenceError> {
    let content = fs::read_to_string(path).map_err(|e| PersistenceError::from_io(path, e))?;
    from_json_str(&content).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn current_project() -> Project {
        let mut project = Project::new(
            "Current Test",
            "Bioenergy",
            "2023",
            Location::new("Tasmania", "Hobart"),
        )
        .with_status(ProjectStatus::Current)
        .with_enrichment(Enrichment::new("$1.50m", "01/01/2023 – 31/12/2028").unwrap());
        project.set_total_cost(800000.0).unwrap();
        project.set_funding(600000.0).unwrap();
        project
    }

    #[test]
    fn test_address_derived_location_round_trips() {
        let location = Location::from_address("Alice Springs, Northern Territory").unwrap();
        let project = Project::new("Desert Solar", "Solar energy", "2020", location.clone())
            .into_enhanced();

        let loaded = from_json_str(&to_json_string(&[project]).unwrap()).unwrap();
        assert_eq!(loaded[0].location(), &location);
    }

    #[test]
    fn test_record_has_all_fields() {
        let value = serde_json::to_value(ProjectRecord::from(&current_project())).unwrap();
        for key in [
            "name",
            "category",
            "year_started",
            "location",
            "total_cost",
            "funding",
            "budget",
            "project_period",
            "type",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["location"], "Hobart, Tasmania");
        assert_eq!(value["type"], "EnhancedCurrentProject");
        assert_eq!(value["budget"], "$1.50m");
    }

    #[test]
    fn test_round_trip_keeps_variant_and_fields() {
        let source = current_project();
        let json = to_json_string(&[source.clone()]).unwrap();
        let restored = from_json_str(&json).unwrap();

        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0], source);
        assert_eq!(restored[0].kind(), ProjectKind::EnhancedCurrentProject);
    }

    #[test]
    fn test_past_round_trip() {
        let past = Project::new(
            "Past Test",
            "Electric vehicles",
            "2019",
            Location::new("Western Australia", "Perth"),
        )
        .with_status(ProjectStatus::Past)
        .into_enhanced();

        let restored = from_json_str(&to_json_string(&[past]).unwrap()).unwrap();
        assert_eq!(restored[0].kind(), ProjectKind::EnhancedPastProject);
        assert_eq!(restored[0].name(), "Past Test");
        assert_eq!(restored[0].budget(), Some(""));
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let json = r#"[{
            "name": "Dict Test",
            "category": "Battery storage",
            "year_started": "2022",
            "location": "Adelaide, South Australia"
        }]"#;
        let projects = from_json_str(json).unwrap();
        let project = &projects[0];

        assert_eq!(project.kind(), ProjectKind::EnhancedProject);
        assert_eq!(project.total_cost(), 0.0);
        assert_eq!(project.funding(), 0.0);
        assert_eq!(project.budget(), Some(""));
        assert_eq!(project.project_period(), Some(""));
        assert_eq!(project.location(), &Location::new("South Australia", "Adelaide"));
    }

    #[test]
    fn test_malformed_budget_is_trusted() {
        let json = r#"[{
            "name": "Hand edited",
            "category": "Education",
            "year_started": "2018",
            "location": "Darwin, Northern Territory",
            "total_cost": 10,
            "funding": 5,
            "budget": "lots",
            "project_period": "soon",
            "type": "EnhancedPastProject"
        }]"#;
        let projects = from_json_str(json).unwrap();
        assert_eq!(projects[0].budget(), Some("lots"));
        assert_eq!(projects[0].project_period(), Some("soon"));
        assert_eq!(projects[0].kind(), ProjectKind::EnhancedPastProject);
    }

    #[test]
    fn test_unknown_type_loads_as_enhanced() {
        let json = r#"[{"name": "X", "category": "Education", "year_started": "2018",
                        "location": "Cairns, Queensland", "type": "Mystery"}]"#;
        let projects = from_json_str(json).unwrap();
        assert_eq!(projects[0].kind(), ProjectKind::EnhancedProject);
    }

    #[test]
    fn test_plain_project_saved_as_enhanced() {
        let plain = Project::new("Plain", "Education", "2012", Location::new("Victoria", "Bendigo"));
        let record = ProjectRecord::from(&plain);
        assert_eq!(record.record_type, "EnhancedProject");
        assert_eq!(record.budget, "");
    }

    #[test]
    fn test_missing_name_fails() {
        let json = r#"[{"category": "Education", "year_started": "2018", "location": "Cairns, Queensland"}]"#;
        assert!(from_json_str(json).is_err());
    }
}
