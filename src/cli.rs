// 🖥️ Interactive Session
// Menu loop over any line source and sink, so the whole flow can be scripted.
// Every prompt that has a validator re-asks until the value is accepted.
// End of input ends the session without saving.

use crate::config::Config;
use crate::entities::{Enrichment, Location, Project, ProjectStatus};
use crate::error::ValidationError;
use crate::reporting::{generate_summary_report, SearchType, SummaryReport};
use crate::store::ProjectStore;
use crate::validators::{
    parse_amount, validate_budget, validate_category, validate_choice, validate_date_range,
    validate_year,
};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Renders the charts of a finished report
///
/// Returns the files written so the session can tell the user where they went.
pub trait ChartRenderer {
    fn render(&mut self, report: &SummaryReport) -> Result<Vec<PathBuf>>;
}

/// Renderer that draws nothing
pub struct NoCharts;

impl ChartRenderer for NoCharts {
    fn render(&mut self, _report: &SummaryReport) -> Result<Vec<PathBuf>> {
        Ok(Vec::new())
    }
}

const RULE_WIDTH: usize = 60;

pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Session { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    // ========================================================================
    // MENU LOOP
    // ========================================================================

    pub fn run(
        &mut self,
        store: &mut ProjectStore,
        config: &Config,
        charts: &mut dyn ChartRenderer,
    ) -> Result<()> {
        loop {
            self.print_menu()?;

            let Some(choice) = self.prompt("Please enter your choice: ")? else {
                debug!("input closed at main menu");
                return Ok(());
            };
            let choice = choice.trim();

            if let Err(e) = validate_choice(choice) {
                writeln!(self.output, "{}", e)?;
                continue;
            }

            let finished = match choice {
                "1" => {
                    self.print_all(store)?;
                    true
                }
                "2" => match self.create_project()? {
                    Some(project) => {
                        store.add(project);
                        writeln!(self.output, "Project created successfully!")?;
                        true
                    }
                    None => false,
                },
                "3" => self.search_and_edit(store)?,
                "4" => self.summary_report(store, config, charts)?,
                "5" => self.import_text(store, config)?,
                _ => {
                    self.save_all(store, config)?;
                    return Ok(());
                }
            };

            if !finished {
                debug!("input closed mid-operation");
                return Ok(());
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.output)?;
        writeln!(self.output, "{}", rule)?;
        writeln!(self.output, "ARENA Project Management System - Enhanced Version")?;
        writeln!(self.output, "{}", rule)?;
        writeln!(self.output, "1. View all projects")?;
        writeln!(self.output, "2. Create new project")?;
        writeln!(self.output, "3. Search and modify projects")?;
        writeln!(self.output, "4. Generate summary report with visualizations")?;
        writeln!(self.output, "5. Import projects from text file")?;
        writeln!(self.output, "X/x. Exit program")?;
        writeln!(self.output, "{}", rule)?;
        Ok(())
    }

    // ========================================================================
    // PROMPTS
    // ========================================================================

    /// Ask once; `None` when the input is exhausted
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Ask until `accept` succeeds, printing each rejection
    fn prompt_until<T, F>(&mut self, message: &str, accept: F) -> Result<Option<T>>
    where
        F: Fn(&str) -> Result<T, ValidationError>,
    {
        loop {
            let Some(raw) = self.prompt(message)? else {
                return Ok(None);
            };
            match accept(&raw) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    /// Like `prompt_until`, but a blank answer means "not known" (`Some(None)`)
    fn prompt_optional<T, F>(&mut self, message: &str, accept: F) -> Result<Option<Option<T>>>
    where
        F: Fn(&str) -> Result<T, ValidationError>,
    {
        self.prompt_until(message, |raw| {
            if raw.is_empty() {
                Ok(None)
            } else {
                accept(raw).map(Some)
            }
        })
    }

    // ========================================================================
    // 1. VIEW
    // ========================================================================

    fn print_all(&mut self, store: &ProjectStore) -> Result<()> {
        if store.is_empty() {
            writeln!(self.output, "No projects available.")?;
        } else {
            for project in store.projects() {
                writeln!(self.output, "{}", project)?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // 2. CREATE
    // ========================================================================

    /// Walk through every field of a new enhanced project
    ///
    /// Returns `None` if input ran out before the project was complete.
    pub fn create_project(&mut self) -> Result<Option<Project>> {
        let Some(name) = self.prompt("Please enter the new project name: ")? else {
            return Ok(None);
        };

        let Some(category) = self.prompt_until("Please enter the category: ", |raw| {
            validate_category(raw).map(|_| raw.to_string())
        })?
        else {
            return Ok(None);
        };

        let Some(year_started) = self.prompt_until("Please enter the start year: ", |raw| {
            validate_year(raw).map(|_| raw.to_string())
        })?
        else {
            return Ok(None);
        };

        let Some(location) = self.prompt_until(
            "Please enter the full address (including state): ",
            Location::from_address,
        )?
        else {
            return Ok(None);
        };

        let Some(status) = self.prompt_until(
            "Please enter the project status (Current or Past): ",
            |raw| raw.parse::<ProjectStatus>(),
        )?
        else {
            return Ok(None);
        };

        let Some(budget) = self.prompt_optional(
            "Please enter the budget (e.g., $4.81m, $500k) or leave blank: ",
            |raw| validate_budget(raw).map(|_| raw.to_string()),
        )?
        else {
            return Ok(None);
        };

        let Some(project_period) = self.prompt_optional(
            "Please enter project period (DD/MM/YYYY – DD/MM/YYYY) or leave blank: ",
            |raw| validate_date_range(raw).map(|_| raw.to_string()),
        )?
        else {
            return Ok(None);
        };

        let enrichment = Enrichment::new(
            budget.as_deref().unwrap_or_default(),
            project_period.as_deref().unwrap_or_default(),
        )?;
        let mut project = Project::validated(name, &category, &year_started, location)?
            .with_status(status)
            .with_enrichment(enrichment);

        let Some(total_cost) = self.prompt_amount(
            "Do you know the total cost of this project (leave blank if you don't know): ",
            "cost",
        )?
        else {
            return Ok(None);
        };
        if let Some(total_cost) = total_cost {
            project.set_total_cost(total_cost)?;
        }

        let Some(funding) = self.prompt_amount(
            "Do you know the total funding of this project (leave blank if you don't know): ",
            "funding",
        )?
        else {
            return Ok(None);
        };
        if let Some(funding) = funding {
            project.set_funding(funding)?;
        }

        Ok(Some(project))
    }

    fn prompt_amount(&mut self, message: &str, what: &str) -> Result<Option<Option<f64>>> {
        loop {
            let Some(raw) = self.prompt(message)? else {
                return Ok(None);
            };
            if raw.is_empty() {
                return Ok(Some(None));
            }
            match parse_amount(&raw) {
                Ok(value) => return Ok(Some(Some(value))),
                Err(_) => writeln!(
                    self.output,
                    "Invalid input. Please enter a valid number for the {}.",
                    what
                )?,
            }
        }
    }

    // ========================================================================
    // 3. SEARCH / EDIT
    // ========================================================================

    fn search_and_edit(&mut self, store: &mut ProjectStore) -> Result<bool> {
        let Some(name) = self.prompt("Please enter the project name you want to search/edit: ")?
        else {
            return Ok(false);
        };

        let Some(project) = store.find_by_name_mut(&name) else {
            writeln!(self.output, "Project not found.")?;
            return Ok(true);
        };

        writeln!(self.output, "\nProject found:")?;
        writeln!(self.output, "{}", project)?;

        let Some(answer) = self.prompt("Do you want to edit this project? (y/n): ")? else {
            return Ok(false);
        };
        if answer.to_lowercase() != "y" {
            return Ok(true);
        }

        let Some(attribute) = self.prompt(
            "Which attribute to edit? (1: category, 2: year, 3: budget, 4: period): ",
        )?
        else {
            return Ok(false);
        };

        match attribute.as_str() {
            "1" => loop {
                let Some(raw) = self.prompt("Please enter the new category: ")? else {
                    return Ok(false);
                };
                match project.set_category(&raw) {
                    Ok(()) => {
                        writeln!(self.output, "Category updated successfully!")?;
                        break;
                    }
                    Err(e) => writeln!(self.output, "{}", e)?,
                }
            },
            "2" => loop {
                let Some(raw) = self.prompt("Please enter the new start year: ")? else {
                    return Ok(false);
                };
                match project.set_year_started(&raw) {
                    Ok(()) => {
                        writeln!(self.output, "Year updated successfully!")?;
                        break;
                    }
                    Err(e) => writeln!(self.output, "{}", e)?,
                }
            },
            "3" => {
                let Some(enrichment) = project.enrichment_mut() else {
                    writeln!(self.output, "This project has no budget to edit.")?;
                    return Ok(true);
                };
                loop {
                    let Some(raw) = self.prompt("Please enter the new budget (e.g., $4.81m): ")?
                    else {
                        return Ok(false);
                    };
                    match enrichment.set_budget(&raw) {
                        Ok(()) => {
                            writeln!(self.output, "Budget updated successfully!")?;
                            break;
                        }
                        Err(e) => writeln!(self.output, "{}", e)?,
                    }
                }
            }
            "4" => {
                let Some(enrichment) = project.enrichment_mut() else {
                    writeln!(self.output, "This project has no project period to edit.")?;
                    return Ok(true);
                };
                loop {
                    let Some(raw) = self.prompt(
                        "Please enter the new project period (DD/MM/YYYY – DD/MM/YYYY): ",
                    )?
                    else {
                        return Ok(false);
                    };
                    match enrichment.set_project_period(&raw) {
                        Ok(()) => {
                            writeln!(self.output, "Project period updated successfully!")?;
                            break;
                        }
                        Err(e) => writeln!(self.output, "{}", e)?,
                    }
                }
            }
            other => writeln!(self.output, "Invalid attribute choice: {}", other)?,
        }

        Ok(true)
    }

    // ========================================================================
    // 4. REPORT
    // ========================================================================

    fn summary_report(
        &mut self,
        store: &ProjectStore,
        config: &Config,
        charts: &mut dyn ChartRenderer,
    ) -> Result<bool> {
        let Some(choice) = self.prompt("Generate report by (1) category or (2) state: ")? else {
            return Ok(false);
        };

        let search_type = match SearchType::parse(&choice) {
            Ok(search_type) => search_type,
            Err(_) => {
                writeln!(
                    self.output,
                    "Invalid choice. Please enter 1, 2, 'category', or 'state'."
                )?;
                return Ok(true);
            }
        };

        let message = match search_type {
            SearchType::Category => "Please enter the category: ",
            SearchType::State => "Please enter the state name: ",
        };
        let Some(value) = self.prompt(message)? else {
            return Ok(false);
        };

        let report =
            match generate_summary_report(&config.report_dir, store.projects(), search_type, &value)
            {
                Ok(Some(report)) => report,
                Ok(None) => {
                    writeln!(
                        self.output,
                        "No projects found for {}: {}",
                        search_type.as_str(),
                        value
                    )?;
                    return Ok(true);
                }
                Err(e) => {
                    warn!(error = %e, "report generation failed");
                    writeln!(self.output, "Error writing report: {:#}", e)?;
                    return Ok(true);
                }
            };

        writeln!(self.output, "Text report saved as {}", report.text_path.display())?;
        writeln!(self.output, "CSV table saved as {}", report.csv_path.display())?;

        match charts.render(&report) {
            Ok(paths) => {
                for path in paths {
                    writeln!(self.output, "Chart saved as {}", path.display())?;
                }
            }
            Err(e) => {
                warn!(error = %e, "chart rendering failed");
                writeln!(self.output, "Error rendering charts: {:#}", e)?;
            }
        }

        Ok(true)
    }

    // ========================================================================
    // 5. IMPORT / EXIT
    // ========================================================================

    fn import_text(&mut self, store: &mut ProjectStore, config: &Config) -> Result<bool> {
        let Some(raw) = self.prompt(&format!(
            "Please enter the text file name (default: {}): ",
            config.text_file.display()
        ))?
        else {
            return Ok(false);
        };

        let raw = raw.trim();
        let path = if raw.is_empty() {
            config.text_file.clone()
        } else {
            PathBuf::from(raw)
        };

        if store.import_text(&path) {
            writeln!(self.output, "Projects successfully loaded from {}", path.display())?;
        } else {
            writeln!(self.output, "Could not import projects from {}", path.display())?;
        }
        Ok(true)
    }

    fn save_all(&mut self, store: &ProjectStore, config: &Config) -> Result<()> {
        let text_saved = store.write_text(&config.text_file);
        let json_saved = store.save_json(&config.json_file);

        if text_saved && json_saved {
            writeln!(self.output, "Data saved successfully. Goodbye!")?;
        } else {
            writeln!(self.output, "Some data could not be saved. Goodbye!")?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
