// 🌱 Project Entity
// One record per renewable-energy project.
//
// Two independent axes replace a class lattice:
// - status: None | Current | Past
// - enrichment: None | { budget, project_period }
// Every "variant" question is answered by inspecting these fields (see ProjectKind).

use crate::entities::{Location, Organization};
use crate::error::ValidationError;
use crate::validators::{
    validate_amount, validate_budget, validate_category, validate_date_range, validate_status,
    validate_year,
};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Current,
    Past,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Current => "Current",
            ProjectStatus::Past => "Past",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_status(s)?;
        Ok(if s == "Current" {
            ProjectStatus::Current
        } else {
            ProjectStatus::Past
        })
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ENRICHMENT
// ============================================================================

/// Budget and project period carried by enhanced projects
///
/// Either field may be empty ("not known yet"). A non-empty value set through
/// `new` or the setters has passed its validator; `trusted` skips validation
/// for snapshots that were validated when first written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    budget: String,
    project_period: String,
}

impl Enrichment {
    pub fn new(budget: &str, project_period: &str) -> Result<Self, ValidationError> {
        if !budget.is_empty() {
            validate_budget(budget)?;
        }
        if !project_period.is_empty() {
            validate_date_range(project_period)?;
        }
        Ok(Self::trusted(budget, project_period))
    }

    pub fn trusted(budget: impl Into<String>, project_period: impl Into<String>) -> Self {
        Enrichment {
            budget: budget.into(),
            project_period: project_period.into(),
        }
    }

    pub fn budget(&self) -> &str {
        &self.budget
    }

    pub fn project_period(&self) -> &str {
        &self.project_period
    }

    /// Replace the budget; on failure the previous value is kept
    pub fn set_budget(&mut self, budget: &str) -> Result<(), ValidationError> {
        validate_budget(budget)?;
        self.budget = budget.to_string();
        Ok(())
    }

    /// Replace the project period; on failure the previous value is kept
    pub fn set_project_period(&mut self, period: &str) -> Result<(), ValidationError> {
        validate_date_range(period)?;
        self.project_period = period.to_string();
        Ok(())
    }
}

// ============================================================================
// KIND
// ============================================================================

/// The concrete shape of a project, derived from status x enrichment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectKind {
    Project,
    CurrentProject,
    PastProject,
    EnhancedProject,
    EnhancedCurrentProject,
    EnhancedPastProject,
}

impl ProjectKind {
    pub fn from_parts(status: Option<ProjectStatus>, enhanced: bool) -> Self {
        match (status, enhanced) {
            (None, false) => ProjectKind::Project,
            (Some(ProjectStatus::Current), false) => ProjectKind::CurrentProject,
            (Some(ProjectStatus::Past), false) => ProjectKind::PastProject,
            (None, true) => ProjectKind::EnhancedProject,
            (Some(ProjectStatus::Current), true) => ProjectKind::EnhancedCurrentProject,
            (Some(ProjectStatus::Past), true) => ProjectKind::EnhancedPastProject,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::Project => "Project",
            ProjectKind::CurrentProject => "CurrentProject",
            ProjectKind::PastProject => "PastProject",
            ProjectKind::EnhancedProject => "EnhancedProject",
            ProjectKind::EnhancedCurrentProject => "EnhancedCurrentProject",
            ProjectKind::EnhancedPastProject => "EnhancedPastProject",
        }
    }

    pub fn status(&self) -> Option<ProjectStatus> {
        match self {
            ProjectKind::CurrentProject | ProjectKind::EnhancedCurrentProject => {
                Some(ProjectStatus::Current)
            }
            ProjectKind::PastProject | ProjectKind::EnhancedPastProject => Some(ProjectStatus::Past),
            ProjectKind::Project | ProjectKind::EnhancedProject => None,
        }
    }

    pub fn is_enhanced(&self) -> bool {
        matches!(
            self,
            ProjectKind::EnhancedProject
                | ProjectKind::EnhancedCurrentProject
                | ProjectKind::EnhancedPastProject
        )
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PROJECT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Lookup key within the store; uniqueness is not enforced
    name: String,
    category: String,
    year_started: String,
    location: Location,
    total_cost: f64,
    funding: f64,
    organizations: Vec<Organization>,
    status: Option<ProjectStatus>,
    enrichment: Option<Enrichment>,
}

impl Project {
    /// Plain, status-less project with zero cost and funding
    ///
    /// Fields are taken as given; codecs use this for already-persisted data.
    /// Interactive creation goes through `validated`.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        year_started: impl Into<String>,
        location: Location,
    ) -> Self {
        Project {
            name: name.into(),
            category: category.into(),
            year_started: year_started.into(),
            location,
            total_cost: 0.0,
            funding: 0.0,
            organizations: Vec::new(),
            status: None,
            enrichment: None,
        }
    }

    /// Construct after checking category and start year
    pub fn validated(
        name: impl Into<String>,
        category: &str,
        year_started: &str,
        location: Location,
    ) -> Result<Self, ValidationError> {
        validate_category(category)?;
        validate_year(year_started)?;
        Ok(Self::new(name, category, year_started, location))
    }

    /// Builder pattern: tag with a temporal status
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Builder pattern: attach budget and project period
    pub fn with_enrichment(mut self, enrichment: Enrichment) -> Self {
        self.enrichment = Some(enrichment);
        self
    }

    /// Upgrade to the enhanced shape, keeping any existing enrichment
    pub fn into_enhanced(mut self) -> Self {
        if self.enrichment.is_none() {
            self.enrichment = Some(Enrichment::default());
        }
        self
    }

    /// Drop status and enrichment, keeping the base fields
    pub fn to_base(&self) -> Project {
        Project {
            status: None,
            enrichment: None,
            ..self.clone()
        }
    }

    pub fn kind(&self) -> ProjectKind {
        ProjectKind::from_parts(self.status, self.enrichment.is_some())
    }

    // ------------------------------------------------------------------------
    // Accessors (raw values; labels belong to the formatting layers)
    // ------------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn year_started(&self) -> &str {
        &self.year_started
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn funding(&self) -> f64 {
        self.funding
    }

    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    pub fn status(&self) -> Option<ProjectStatus> {
        self.status
    }

    pub fn enrichment(&self) -> Option<&Enrichment> {
        self.enrichment.as_ref()
    }

    /// Mutable enrichment; `None` for projects that are not enhanced
    pub fn enrichment_mut(&mut self) -> Option<&mut Enrichment> {
        self.enrichment.as_mut()
    }

    pub fn budget(&self) -> Option<&str> {
        self.enrichment.as_ref().map(Enrichment::budget)
    }

    pub fn project_period(&self) -> Option<&str> {
        self.enrichment.as_ref().map(Enrichment::project_period)
    }

    // ------------------------------------------------------------------------
    // Mutators (each re-runs its validator; the old value survives a failure)
    // ------------------------------------------------------------------------

    pub fn set_category(&mut self, category: &str) -> Result<(), ValidationError> {
        validate_category(category)?;
        self.category = category.to_string();
        Ok(())
    }

    pub fn set_year_started(&mut self, year: &str) -> Result<(), ValidationError> {
        validate_year(year)?;
        self.year_started = year.to_string();
        Ok(())
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    pub fn set_total_cost(&mut self, total_cost: f64) -> Result<(), ValidationError> {
        validate_amount(total_cost)?;
        self.total_cost = total_cost;
        Ok(())
    }

    pub fn set_funding(&mut self, funding: f64) -> Result<(), ValidationError> {
        validate_amount(funding)?;
        self.funding = funding;
        Ok(())
    }

    pub fn add_organization(&mut self, organization: Organization) {
        self.organizations.push(organization);
    }
}

/// The "Project info" block, shared by console output, text snapshots and reports
impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "    Project info: ")?;
        writeln!(f, "    Name: {},", self.name)?;
        writeln!(f, "    Category: {},", self.category)?;
        writeln!(f, "    Year Started: {},", self.year_started)?;
        writeln!(f, "    Location: {},", self.location)?;
        writeln!(f, "    Funding: {},", self.funding)?;
        writeln!(f, "    Total Cost: {}", self.total_cost)
    }
}

// ============================================================================
// TESTS
// ============================================================================
