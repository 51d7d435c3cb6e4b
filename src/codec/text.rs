// 📝 Text Codec - human-readable "Project info" blocks
//
// Lossy by construction: budget, project period, status and enrichment are not
// written, so every record read back is a plain Project.
//
// Reader rules:
// - "Project info" header lines are skipped
// - "Key: value" split on the first ": ", trailing commas trimmed from both
// - blank line or end of input flushes the record
// - unparseable or negative Funding / Total Cost stay at 0

use crate::entities::{Location, Project};
use crate::error::PersistenceError;
use crate::validators::validate_amount;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

const HEADER: &str = "Project info";

/// Outcome of reading a text snapshot
///
/// `interrupted` is set when reading failed part-way; `projects` then holds
/// the records completed before the failure.
#[derive(Debug)]
pub struct TextImport {
    pub projects: Vec<Project>,
    pub interrupted: Option<PersistenceError>,
}

// ============================================================================
// WRITER
// ============================================================================

/// Render every project as a block followed by a blank line
pub fn render_projects(projects: &[Project]) -> String {
    let mut out = String::new();
    for project in projects {
        out.push_str(&project.to_string());
        out.push('\n');
    }
    out
}

/// Overwrite `path` with the text rendering of `projects` (no temp file, no backup)
pub fn write_projects(path: &Path, projects: &[Project]) -> Result<(), PersistenceError> {
    fs::write(path, render_projects(projects))
        .map_err(|e| PersistenceError::from_io(path, e))?;
    debug!(path = %path.display(), count = projects.len(), "wrote text snapshot");
    Ok(())
}

// ============================================================================
// READER
// ============================================================================

/// Parse blocks from any line source
///
/// Returns the projects completed so far plus the I/O error that stopped the
/// read, if any. A record still being accumulated at the failure is dropped.
pub fn parse_projects<R: BufRead>(reader: R) -> (Vec<Project>, Option<io::Error>) {
    let mut projects = Vec::new();
    let mut fields: HashMap<String, String> = HashMap::new();

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => return (projects, Some(e)),
        };
        let line = line.trim();

        if line.is_empty() {
            if !fields.is_empty() {
                projects.push(build_project(&fields));
                fields.clear();
            }
            continue;
        }

        if line.starts_with(HEADER) {
            continue;
        }

        if let Some((key, value)) = line.split_once(": ") {
            fields.insert(
                key.trim().trim_end_matches(',').to_string(),
                value.trim().trim_end_matches(',').to_string(),
            );
        }
    }

    // Input without a trailing blank line
    if !fields.is_empty() {
        projects.push(build_project(&fields));
    }

    (projects, None)
}

/// Parse blocks from a string
pub fn parse_str(content: &str) -> Vec<Project> {
    parse_projects(content.as_bytes()).0
}

/// Read a text snapshot from disk
///
/// Failing to open the file is an error (`NotFound` kept distinct); failing
/// mid-read yields a partial `TextImport`.
pub fn read_projects(path: &Path) -> Result<TextImport, PersistenceError> {
    let file = File::open(path).map_err(|e| PersistenceError::from_io(path, e))?;
    let (projects, error) = parse_projects(BufReader::new(file));

    let interrupted = error.map(|e| {
        warn!(path = %path.display(), loaded = projects.len(), error = %e, "text snapshot read interrupted");
        PersistenceError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    });

    Ok(TextImport {
        projects,
        interrupted,
    })
}

fn build_project(fields: &HashMap<String, String>) -> Project {
    let field = |key: &str| fields.get(key).map(String::as_str).unwrap_or("");

    let mut project = Project::new(
        field("Name"),
        field("Category"),
        field("Year Started"),
        Location::parse(field("Location")),
    );

    if let Some(funding) = fields.get("Funding").and_then(|v| coerce_amount(v)) {
        if let Err(e) = project.set_funding(funding) {
            debug!(error = %e, "funding left at 0");
        }
    }
    if let Some(total_cost) = fields.get("Total Cost").and_then(|v| coerce_amount(v)) {
        if let Err(e) = project.set_total_cost(total_cost) {
            debug!(error = %e, "total cost left at 0");
        }
    }

    project
}

/// Parsed amount, or `None` when it is not a usable non-negative number
fn coerce_amount(raw: &str) -> Option<f64> {
    let value = raw.parse::<f64>().ok()?;
    match validate_amount(value) {
        Ok(()) => Some(value),
        Err(e) => {
            debug!(error = %e, "ignoring unusable amount in text snapshot");
            None
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Enrichment, ProjectKind, ProjectStatus};

    const SAMPLE: &str = "
    Project info:
    Name: Hornsdale Power Reserve,
    Category: Battery storage,
    Year Started: 2017,
    Location: Jamestown, South Australia,
    Funding: 50000000,
    Total Cost: 90000000.5

    Project info:
    Name: Kidston,
    Category: Solar energy,
    Year Started: 2016,
    Location: Kidston,
    Funding: unknown,
    Total Cost: -4
";

    #[test]
    fn test_parse_sample() {
        let projects = parse_str(SAMPLE);
        assert_eq!(projects.len(), 2);

        let first = &projects[0];
        assert_eq!(first.name(), "Hornsdale Power Reserve");
        assert_eq!(first.category(), "Battery storage");
        assert_eq!(first.year_started(), "2017");
        assert_eq!(first.location(), &Location::new("South Australia", "Jamestown"));
        assert_eq!(first.funding(), 50000000.0);
        assert_eq!(first.total_cost(), 90000000.5);

        let second = &projects[1];
        assert_eq!(second.location(), &Location::new("Unknown", "Kidston"));
        assert_eq!(second.funding(), 0.0);
        assert_eq!(second.total_cost(), 0.0);
    }

    #[test]
    fn test_missing_trailing_blank_line() {
        let content = "Name: Solo,\nCategory: Education,\nYear Started: 2019,\nLocation: Hobart, Tasmania,\nFunding: 10,\nTotal Cost: 20";
        let projects = parse_str(content);
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name(), "Solo");
        assert_eq!(projects[0].total_cost(), 20.0);
    }

    #[test]
    fn test_fields_are_order_insensitive() {
        let content = "Total Cost: 7\nLocation: Perth, Western Australia\nName: Reordered\n";
        let projects = parse_str(content);
        assert_eq!(projects[0].name(), "Reordered");
        assert_eq!(projects[0].total_cost(), 7.0);
        assert_eq!(projects[0].category(), "");
    }

    #[test]
    fn test_round_trip_degrades_to_plain_project() {
        let mut source = Project::new(
            "Enhanced",
            "Wind energy",
            "2021",
            Location::new("Victoria", "Ballarat"),
        )
        .with_status(ProjectStatus::Current)
        .with_enrichment(Enrichment::new("$4.81m", "01/01/2021 – 31/12/2025").unwrap());
        source.set_funding(1200.0).unwrap();
        source.set_total_cost(3400.25).unwrap();

        let restored = parse_str(&render_projects(&[source.clone()]));
        assert_eq!(restored.len(), 1);
        let restored = &restored[0];

        assert_eq!(restored.kind(), ProjectKind::Project);
        assert!(restored.budget().is_none());
        assert!(restored.project_period().is_none());
        assert_eq!(restored, &source.to_base());
    }

    #[test]
    fn test_unusable_amounts_default_to_zero() {
        assert_eq!(coerce_amount("1250.5"), Some(1250.5));
        for raw in ["-4", "NaN", "inf", "", "12k"] {
            assert_eq!(coerce_amount(raw), None, "{raw} should be ignored");
        }

        let projects = parse_str("Name: Odd\nFunding: NaN\nTotal Cost: inf\n");
        assert_eq!(projects[0].funding(), 0.0);
        assert_eq!(projects[0].total_cost(), 0.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_str("").is_empty());
        assert!(parse_str("\n\n   \n").is_empty());
    }

    #[test]
    fn test_invalid_utf8_stops_with_partial_result() {
        let mut bytes = b"Name: First\nCategory: Education\n\n".to_vec();
        bytes.extend_from_slice(b"Name: Second\n");
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        bytes.extend_from_slice(b"Name: Third\n");

        let (projects, error) = parse_projects(bytes.as_slice());
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name(), "First");
        assert!(error.is_some());
    }
}
