// Entity Models
// Location and Organization are owned by their Project; the Project carries the
// status and enrichment axes as plain fields.

pub mod location;
pub mod organization;
pub mod project;

pub use location::Location;
pub use organization::Organization;
pub use project::{Enrichment, Project, ProjectKind, ProjectStatus};
