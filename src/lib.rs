// ARENA Project Manager - Core Library
// Validators, entity model and the two persistence codecs, plus the store,
// reporting and interactive session built on them.

pub mod error;
pub mod validators;
pub mod entities;
pub mod codec;
pub mod store;
pub mod reporting;
pub mod visualization;
pub mod config;
pub mod cli;

// Re-export commonly used types
pub use error::{PersistenceError, ValidationError};
pub use entities::{Enrichment, Location, Organization, Project, ProjectKind, ProjectStatus};
pub use codec::{ProjectRecord, TextImport};
pub use store::{ProjectStore, StartupSource};
pub use reporting::{generate_summary_report, SearchType, SummaryReport};
pub use visualization::ChartSet;
pub use config::Config;
pub use cli::{ChartRenderer, NoCharts, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
