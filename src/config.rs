// ⚙️ Configuration
// Command-line arguments, each overridable through the environment.

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_JSON_FILE: &str = "ARENA_projects.JSON";
pub const DEFAULT_TEXT_FILE: &str = "ARENA_projects.txt";
pub const DEFAULT_REPORT_DIR: &str = ".";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "arena-projects",
    version,
    about = "Track renewable-energy infrastructure projects"
)]
pub struct Config {
    /// JSON snapshot loaded at startup and saved on exit
    #[arg(long, env = "ARENA_JSON_FILE", default_value = DEFAULT_JSON_FILE)]
    pub json_file: PathBuf,

    /// Text snapshot used when no JSON snapshot exists, also saved on exit
    #[arg(long, env = "ARENA_TEXT_FILE", default_value = DEFAULT_TEXT_FILE)]
    pub text_file: PathBuf,

    /// Directory receiving summary reports and chart files
    #[arg(long, env = "ARENA_REPORT_DIR", default_value = DEFAULT_REPORT_DIR)]
    pub report_dir: PathBuf,

    /// Write chart files without opening the interactive chart viewer
    #[arg(long)]
    pub no_charts: bool,

    /// Log filter used when RUST_LOG is not set (e.g. "info", "arena_projects=debug")
    #[arg(long, env = "ARENA_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            json_file: PathBuf::from(DEFAULT_JSON_FILE),
            text_file: PathBuf::from(DEFAULT_TEXT_FILE),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            no_charts: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
