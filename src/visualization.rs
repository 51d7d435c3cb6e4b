// 📈 Chart Aggregations
// Counts and sums behind the three report charts. Rendering lives in the binary.

use crate::entities::Project;

/// Aggregated series for one filtered project set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSet {
    /// Project count per category, in first-appearance order (bar chart)
    pub projects_by_category: Vec<(String, u64)>,
    /// Funding per category with zero-funded categories dropped (pie chart)
    pub funding_by_category: Vec<(String, f64)>,
    /// True when no category had funding and the pie falls back to counts
    pub funding_is_count: bool,
    /// Project count per start year, sorted by year (line chart)
    pub projects_by_year: Vec<(String, u64)>,
}

impl ChartSet {
    pub fn from_projects<'a>(projects: impl IntoIterator<Item = &'a Project>) -> Self {
        let projects: Vec<&Project> = projects.into_iter().collect();

        let projects_by_category = count_by(&projects, |p| p.category());

        let mut funding_by_category: Vec<(String, f64)> = Vec::new();
        for project in &projects {
            add_to(&mut funding_by_category, project.category(), project.funding());
        }
        funding_by_category.retain(|(_, total)| *total > 0.0);

        let funding_is_count = funding_by_category.is_empty();
        if funding_is_count {
            funding_by_category = projects_by_category
                .iter()
                .map(|(category, count)| (category.clone(), *count as f64))
                .collect();
        }

        let mut projects_by_year = count_by(&projects, |p| p.year_started());
        projects_by_year.sort_by(|a, b| a.0.cmp(&b.0));

        ChartSet {
            projects_by_category,
            funding_by_category,
            funding_is_count,
            projects_by_year,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.projects_by_category.is_empty()
    }

    /// Share of each pie slice in percent
    pub fn funding_percentages(&self) -> Vec<(String, f64)> {
        let total: f64 = self.funding_by_category.iter().map(|(_, v)| v).sum();
        if total <= 0.0 {
            return Vec::new();
        }
        self.funding_by_category
            .iter()
            .map(|(category, value)| (category.clone(), value / total * 100.0))
            .collect()
    }
}

fn count_by<F>(projects: &[&Project], key: F) -> Vec<(String, u64)>
where
    F: Fn(&Project) -> &str,
{
    let mut counts: Vec<(String, u64)> = Vec::new();
    for project in projects {
        let k = key(*project);
        match counts.iter_mut().find(|(existing, _)| existing.as_str() == k) {
            Some((_, count)) => *count += 1,
            None => counts.push((k.to_string(), 1)),
        }
    }
    counts
}

fn add_to(totals: &mut Vec<(String, f64)>, key: &str, amount: f64) {
    match totals.iter_mut().find(|(existing, _)| existing.as_str() == key) {
        Some((_, total)) => *total += amount,
        None => totals.push((key.to_string(), amount)),
    }
}
