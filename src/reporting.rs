// 📊 Summary Reports
// Filter the store by category or state, write a text report plus a CSV table,
// and hand the filtered set to the chart aggregations.

use crate::entities::Project;
use crate::error::ValidationError;
use crate::validators::validate_report_type;
use crate::visualization::ChartSet;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// ============================================================================
// SEARCH TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    Category,
    State,
}

impl SearchType {
    /// Accepts "1"/"category" or "2"/"state"
    pub fn parse(choice: &str) -> Result<Self, ValidationError> {
        validate_report_type(choice)?;
        Ok(match choice {
            "1" | "category" => SearchType::Category,
            _ => SearchType::State,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Category => "category",
            SearchType::State => "state",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SearchType::Category => "Category",
            SearchType::State => "State",
        }
    }

    /// Category: exact match. State: substring of "{city}, {state}".
    pub fn matches(&self, project: &Project, value: &str) -> bool {
        match self {
            SearchType::Category => project.category() == value,
            SearchType::State => project.location().to_string().contains(value),
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// A generated report and the files written for it
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub search_type: SearchType,
    pub search_value: String,
    pub projects: Vec<Project>,
    /// Directory + base name shared by the report and chart files
    pub base_path: PathBuf,
    pub text_path: PathBuf,
    pub csv_path: PathBuf,
    pub charts: ChartSet,
}

impl SummaryReport {
    pub fn chart_title(&self) -> String {
        format!("{} {} Analysis", self.search_value, self.search_type.title())
    }
}

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    name: &'a str,
    category: &'a str,
    year_started: &'a str,
    location: String,
    funding: f64,
    total_cost: f64,
    budget: &'a str,
    project_period: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

impl<'a> From<&'a Project> for ReportRow<'a> {
    fn from(project: &'a Project) -> Self {
        ReportRow {
            name: project.name(),
            category: project.category(),
            year_started: project.year_started(),
            location: project.location().to_string(),
            funding: project.funding(),
            total_cost: project.total_cost(),
            budget: project.budget().unwrap_or_default(),
            project_period: project.project_period().unwrap_or_default(),
            kind: project.kind().as_str(),
        }
    }
}

pub fn filter_projects<'a>(
    projects: &'a [Project],
    search_type: SearchType,
    value: &str,
) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|p| search_type.matches(p, value))
        .collect()
}

/// "ARENA_report_{value}" with spaces and path separators replaced by underscores
///
/// The result is always a single file name inside the report directory.
pub fn report_basename(value: &str) -> String {
    let name: String = value
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect();
    format!("ARENA_report_{}", name)
}

pub fn render_report(search_type: SearchType, value: &str, projects: &[&Project]) -> String {
    let mut out = format!(
        "ARENA Project Summary Report\n\
         Search Type: {}\n\
         Search Value: {}\n\
         Total Projects Found: {}\n\
         {}\n\n",
        search_type.title(),
        value,
        projects.len(),
        "=".repeat(50)
    );

    for project in projects {
        out.push_str(&project.to_string());
        if let Some(budget) = project.budget().filter(|b| !b.is_empty()) {
            out.push_str(&format!("    Budget: {}\n", budget));
        }
        if let Some(period) = project.project_period().filter(|p| !p.is_empty()) {
            out.push_str(&format!("    Project Period: {}\n", period));
        }
        out.push('\n');
    }

    out
}

pub fn write_csv(path: &Path, projects: &[&Project]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV report: {}", path.display()))?;
    for project in projects {
        writer
            .serialize(ReportRow::from(*project))
            .context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV report")?;
    Ok(())
}

/// Filter, then write `{base}.txt` and `{base}.csv` into `dir`
///
/// Returns `Ok(None)` and writes nothing when no project matches.
pub fn generate_summary_report(
    dir: &Path,
    projects: &[Project],
    search_type: SearchType,
    value: &str,
) -> Result<Option<SummaryReport>> {
    let filtered = filter_projects(projects, search_type, value);
    if filtered.is_empty() {
        info!(search_type = search_type.as_str(), value, "no projects matched report filter");
        return Ok(None);
    }

    let basename = report_basename(value);
    let base_path = dir.join(&basename);
    let text_path = dir.join(format!("{}.txt", basename));
    let csv_path = dir.join(format!("{}.csv", basename));

    fs::write(&text_path, render_report(search_type, value, &filtered))
        .with_context(|| format!("Failed to write report: {}", text_path.display()))?;
    write_csv(&csv_path, &filtered)?;

    info!(path = %text_path.display(), count = filtered.len(), "summary report written");

    Ok(Some(SummaryReport {
        search_type,
        search_value: value.to_string(),
        charts: ChartSet::from_projects(filtered.iter().copied()),
        projects: filtered.into_iter().cloned().collect(),
        base_path,
        text_path,
        csv_path,
    }))
}

// ============================================================================
// TESTS
// ============================================================================
