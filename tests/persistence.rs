// Store + codec behaviour against real files

use arena_projects::codec::{json, text};
use arena_projects::{
    Enrichment, Location, Project, ProjectKind, ProjectStatus, ProjectStore, StartupSource,
};
use std::fs;
use tempfile::TempDir;

fn enhanced_current() -> Project {
    let mut project = Project::new(
        "Hornsdale",
        "Battery storage",
        "2017",
        Location::new("South Australia", "Jamestown"),
    )
    .with_status(ProjectStatus::Current)
    .with_enrichment(Enrichment::new("$4.81m", "01/12/2017 – 31/03/2028").unwrap());
    project.set_total_cost(90_000_000.0).unwrap();
    project.set_funding(50_000_000.0).unwrap();
    project
}

fn enhanced_past() -> Project {
    Project::new(
        "Old Solar",
        "Solar energy",
        "2010",
        Location::new("Queensland", "Townsville"),
    )
    .with_status(ProjectStatus::Past)
    .with_enrichment(Enrichment::new("$500k", "").unwrap())
}

#[test]
fn test_json_save_then_load_is_lossless() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ARENA_projects.JSON");

    let source = ProjectStore::from_projects(vec![enhanced_current(), enhanced_past()]);
    assert!(source.save_json(&path));

    let mut loaded = ProjectStore::new();
    assert!(loaded.load_json(&path));
    assert_eq!(loaded.projects(), source.projects());
    assert_eq!(loaded.projects()[0].kind(), ProjectKind::EnhancedCurrentProject);
    assert_eq!(loaded.projects()[1].kind(), ProjectKind::EnhancedPastProject);
}

#[test]
fn test_json_file_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("projects.json");
    json::write_projects(&path, &[enhanced_current()]).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let record = &value.as_array().unwrap()[0];
    assert_eq!(record["name"], "Hornsdale");
    assert_eq!(record["location"], "Jamestown, South Australia");
    assert_eq!(record["total_cost"], 90_000_000.0);
    assert_eq!(record["project_period"], "01/12/2017 – 31/03/2028");
    assert_eq!(record["type"], "EnhancedCurrentProject");
}

#[test]
fn test_load_replaces_instead_of_merging() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("projects.json");
    ProjectStore::from_projects(vec![enhanced_past()]).save_json(&path);

    let mut store = ProjectStore::from_projects(vec![enhanced_current(), enhanced_current()]);
    assert!(store.load_json(&path));
    assert_eq!(store.len(), 1);
    assert_eq!(store.projects()[0].name(), "Old Solar");
}

#[test]
fn test_malformed_json_leaves_store_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "[{\"name\": \"half\"").unwrap();

    let mut store = ProjectStore::from_projects(vec![enhanced_current()]);
    assert!(!store.load_json(&path));
    assert_eq!(store.len(), 1);
    assert_eq!(store.projects()[0].name(), "Hornsdale");
}

#[test]
fn test_save_into_missing_directory_reports_failure() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no_such_dir").join("projects.json");
    let store = ProjectStore::from_projects(vec![enhanced_current()]);
    assert!(!store.save_json(&path));
    assert!(!store.write_text(&path));
}

#[test]
fn test_text_round_trip_through_store_upgrades_to_enhanced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ARENA_projects.txt");

    let source = ProjectStore::from_projects(vec![enhanced_current(), enhanced_past()]);
    assert!(source.write_text(&path));

    let raw = text::read_projects(&path).unwrap();
    assert!(raw.interrupted.is_none());
    assert!(raw.projects.iter().all(|p| p.kind() == ProjectKind::Project));

    let mut store = ProjectStore::new();
    assert!(store.import_text(&path));
    assert_eq!(store.len(), 2);

    let first = &store.projects()[0];
    assert_eq!(first.kind(), ProjectKind::EnhancedProject);
    assert_eq!(first.budget(), Some(""));
    assert_eq!(first.project_period(), Some(""));
    assert_eq!(first.name(), "Hornsdale");
    assert_eq!(first.location(), &Location::new("South Australia", "Jamestown"));
    assert_eq!(first.total_cost(), 90_000_000.0);
    assert_eq!(first.funding(), 50_000_000.0);
}

#[test]
fn test_text_file_shape() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("projects.txt");
    text::write_projects(&path, &[enhanced_past()]).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "\n    Project info: \n    Name: Old Solar,\n    Category: Solar energy,\n    Year Started: 2010,\n    Location: Townsville, Queensland,\n    Funding: 0,\n    Total Cost: 0\n\n"
    );
}

#[test]
fn test_startup_prefers_json_then_text() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("projects.json");
    let text_path = dir.path().join("projects.txt");

    let mut store = ProjectStore::new();
    assert_eq!(store.load_or_import(&json_path, &text_path), StartupSource::Empty);
    assert!(store.is_empty());

    ProjectStore::from_projects(vec![enhanced_past()]).write_text(&text_path);
    assert_eq!(store.load_or_import(&json_path, &text_path), StartupSource::Text);
    assert_eq!(store.projects()[0].kind(), ProjectKind::EnhancedProject);

    ProjectStore::from_projects(vec![enhanced_current()]).save_json(&json_path);
    assert_eq!(store.load_or_import(&json_path, &text_path), StartupSource::Json);
    assert_eq!(store.projects()[0].kind(), ProjectKind::EnhancedCurrentProject);
}

#[test]
fn test_partial_text_import_keeps_completed_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("damaged.txt");

    let mut bytes = b"Name: Complete\nCategory: Education\nYear Started: 2014\nLocation: Perth, Western Australia\n\n".to_vec();
    bytes.extend_from_slice(b"Name: Damaged\n\xff\xfe\n");
    fs::write(&path, bytes).unwrap();

    let mut store = ProjectStore::from_projects(vec![enhanced_current()]);
    assert!(!store.import_text(&path));
    assert_eq!(store.len(), 1);
    assert_eq!(store.projects()[0].name(), "Complete");
    assert_eq!(store.projects()[0].kind(), ProjectKind::EnhancedProject);
}
