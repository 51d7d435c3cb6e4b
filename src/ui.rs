// Chart rendering for summary reports
// Each chart is drawn with ratatui into an off-screen buffer and saved as text.
// With the `tui` feature the same charts can be browsed in the terminal.

use anyhow::{Context, Result};
use arena_projects::cli::ChartRenderer;
use arena_projects::reporting::SummaryReport;
use ratatui::{
    backend::TestBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType,
    },
    Frame, Terminal,
};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[cfg(feature = "tui")]
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
#[cfg(feature = "tui")]
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    widgets::Paragraph,
};
#[cfg(feature = "tui")]
use std::io;

const EXPORT_WIDTH: u16 = 100;
const EXPORT_HEIGHT: u16 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPage {
    Bar,
    Pie,
    Line,
}

impl ChartPage {
    pub const ALL: [ChartPage; 3] = [ChartPage::Bar, ChartPage::Pie, ChartPage::Line];

    pub fn next(&self) -> Self {
        match self {
            ChartPage::Bar => ChartPage::Pie,
            ChartPage::Pie => ChartPage::Line,
            ChartPage::Line => ChartPage::Bar,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            ChartPage::Bar => ChartPage::Line,
            ChartPage::Pie => ChartPage::Bar,
            ChartPage::Line => ChartPage::Pie,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ChartPage::Bar => "Projects by Category",
            ChartPage::Pie => "Funding Distribution by Category",
            ChartPage::Line => "Projects Started by Year",
        }
    }

    /// Suffix of the exported file: "{base}_{suffix}.txt"
    pub fn file_suffix(&self) -> &str {
        match self {
            ChartPage::Bar => "bar_chart",
            ChartPage::Pie => "pie_chart",
            ChartPage::Line => "line_chart",
        }
    }
}

// ============================================================================
// RENDERER
// ============================================================================

/// Writes every chart to disk, then optionally opens the interactive viewer
pub struct TerminalCharts {
    interactive: bool,
}

impl TerminalCharts {
    pub fn new(interactive: bool) -> Self {
        TerminalCharts { interactive }
    }
}

impl ChartRenderer for TerminalCharts {
    fn render(&mut self, report: &SummaryReport) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for page in ChartPage::ALL {
            let text = render_to_text(report, page, EXPORT_WIDTH, EXPORT_HEIGHT)?;
            let mut file_name = report.base_path.as_os_str().to_owned();
            file_name.push(format!("_{}.txt", page.file_suffix()));
            let path = PathBuf::from(file_name);

            fs::write(&path, text)
                .with_context(|| format!("Failed to write chart: {}", path.display()))?;
            info!(path = %path.display(), chart = page.title(), "chart written");
            written.push(path);
        }

        if self.interactive {
            show_interactive(report)?;
        }

        Ok(written)
    }
}

/// Draw one chart off-screen and return the buffer as plain text lines
pub fn render_to_text(report: &SummaryReport, page: ChartPage, width: u16, height: u16) -> Result<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))
        .context("Failed to create off-screen terminal")?;
    terminal
        .draw(|f| {
            let area = f.size();
            draw_chart(f, area, report, page)
        })
        .context("Failed to draw chart")?;
    Ok(buffer_to_text(terminal.backend().buffer()))
}

fn buffer_to_text(buffer: &Buffer) -> String {
    let width = buffer.area.width.max(1) as usize;
    let mut out = String::new();
    for row in buffer.content.chunks(width) {
        let line: String = row.iter().map(|cell| cell.symbol()).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

// ============================================================================
// DRAWING
// ============================================================================

fn chart_block(report: &SummaryReport, page: ChartPage) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!("{} - {}", report.chart_title(), page.title()))
}

pub fn draw_chart(f: &mut Frame, area: Rect, report: &SummaryReport, page: ChartPage) {
    match page {
        ChartPage::Bar => draw_category_bars(f, area, report),
        ChartPage::Pie => draw_funding_shares(f, area, report),
        ChartPage::Line => draw_year_line(f, area, report),
    }
}

fn draw_category_bars(f: &mut Frame, area: Rect, report: &SummaryReport) {
    let bars: Vec<Bar> = report
        .charts
        .projects_by_category
        .iter()
        .map(|(category, count)| {
            Bar::default()
                .label(Line::from(category.clone()))
                .value(*count)
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(report, ChartPage::Bar))
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(2)
        .value_style(Style::default().add_modifier(Modifier::BOLD));

    f.render_widget(chart, area);
}

fn draw_funding_shares(f: &mut Frame, area: Rect, report: &SummaryReport) {
    let bars: Vec<Bar> = report
        .charts
        .funding_percentages()
        .into_iter()
        .map(|(category, share)| {
            Bar::default()
                .label(Line::from(category))
                .value((share * 10.0).round() as u64)
                .text_value(format!("{:.1}%", share))
                .style(Style::default().fg(Color::Green))
        })
        .collect();

    let mut block = chart_block(report, ChartPage::Pie);
    if report.charts.funding_is_count {
        block = block.title(
            Title::from("no funding recorded: shares by project count").position(Position::Bottom),
        );
    }

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(2);

    f.render_widget(chart, area);
}

fn draw_year_line(f: &mut Frame, area: Rect, report: &SummaryReport) {
    let by_year = &report.charts.projects_by_year;
    let points: Vec<(f64, f64)> = by_year
        .iter()
        .enumerate()
        .map(|(i, (_, count))| (i as f64, *count as f64))
        .collect();

    let max_count = by_year.iter().map(|(_, c)| *c).max().unwrap_or(0) as f64;
    let x_max = (by_year.len().saturating_sub(1)).max(1) as f64;

    let x_labels: Vec<Span> = by_year
        .iter()
        .map(|(year, _)| Span::raw(year.clone()))
        .collect();
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format!("{}", max_count.ceil() as u64)),
    ];

    let dataset = Dataset::default()
        .name("Projects")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Yellow))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(chart_block(report, ChartPage::Line))
        .x_axis(
            Axis::default()
                .title("Year")
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Number of Projects")
                .bounds([0.0, max_count.max(1.0)])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

// ============================================================================
// INTERACTIVE VIEWER
// ============================================================================

#[cfg(feature = "tui")]
fn show_interactive(report: &SummaryReport) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_viewer(&mut terminal, report);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("Chart viewer failed")
}

#[cfg(feature = "tui")]
fn run_viewer<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    report: &SummaryReport,
) -> io::Result<()> {
    let mut page = ChartPage::Bar;
    loop {
        terminal.draw(|f| {
            let area = f.size();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(5), Constraint::Length(1)])
                .split(area);
            draw_chart(f, chunks[0], report, page);
            f.render_widget(
                Paragraph::new("Tab/Shift+Tab: switch chart | q/Esc: back to menu"),
                chunks[1],
            );
        })?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                    page = page.previous()
                }
                KeyCode::Tab | KeyCode::Right => page = page.next(),
                KeyCode::BackTab | KeyCode::Left => page = page.previous(),
                _ => {}
            }
        }
    }
}

#[cfg(not(feature = "tui"))]
fn show_interactive(_report: &SummaryReport) -> Result<()> {
    tracing::warn!("interactive chart viewer not available; rebuild with --features tui");
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use arena_projects::entities::{Location, Project};
    use arena_projects::reporting::{generate_summary_report, SearchType};

    fn sample_report(dir: &std::path::Path) -> SummaryReport {
        let mut wind = Project::new("Wind", "Wind energy", "2019", Location::new("Victoria", "Geelong"));
        wind.set_funding(300.0).unwrap();
        let mut solar = Project::new("Solar", "Solar energy", "2021", Location::new("Victoria", "Bendigo"));
        solar.set_funding(100.0).unwrap();

        generate_summary_report(dir, &[wind, solar], SearchType::State, "Victoria")
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_page_cycle() {
        assert_eq!(ChartPage::Bar.next(), ChartPage::Pie);
        assert_eq!(ChartPage::Line.next(), ChartPage::Bar);
        assert_eq!(ChartPage::Bar.previous(), ChartPage::Line);
    }

    #[test]
    fn test_render_to_text_contains_title() {
        let dir = tempfile::tempdir().unwrap();
        let report = sample_report(dir.path());

        let text = render_to_text(&report, ChartPage::Bar, 100, 30).unwrap();
        assert_eq!(text.lines().count(), 30);
        assert!(text.contains("Victoria State Analysis - Projects by Category"));

        let pie = render_to_text(&report, ChartPage::Pie, 100, 30).unwrap();
        assert!(pie.contains("75.0%"));
        assert!(pie.contains("25.0%"));
    }

    #[test]
    fn test_renderer_writes_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let report = sample_report(dir.path());

        let written = TerminalCharts::new(false).render(&report).unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("ARENA_report_Victoria_bar_chart.txt"),
                dir.path().join("ARENA_report_Victoria_pie_chart.txt"),
                dir.path().join("ARENA_report_Victoria_line_chart.txt"),
            ]
        );
        for path in written {
            assert!(path.exists());
        }
    }
}
