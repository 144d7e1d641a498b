use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::assessment::AssessmentState;
use crate::config::Config;
use crate::error::Result;
use crate::scoring::{self, Verdict};

/// A fully computed assessment, ready for rendering or JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub organization: String,
    pub categories: Vec<CategoryReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effectiveness: Option<f64>,
    pub overall: f64,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub name: String,
    pub score: f64,
    pub subcategories: Vec<SubcategoryReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubcategoryReport {
    pub name: String,
    pub weight: f64,
    pub score: f64,
    pub implemented: usize,
    pub metrics: usize,
}

impl Report {
    /// Compute every score once, from the session's current state.
    pub fn build(
        organization: &str,
        state: &AssessmentState,
        ratings: Option<&[u8]>,
    ) -> Result<Report> {
        let mut categories = Vec::new();
        for category in state.categories() {
            let mut subcategories = Vec::new();
            for sub in &category.subcategories {
                subcategories.push(SubcategoryReport {
                    name: sub.name.clone(),
                    weight: sub.weight,
                    score: scoring::metric_score(sub)?,
                    implemented: sub.implemented.len(),
                    metrics: sub.metrics.len(),
                });
            }
            categories.push(CategoryReport {
                name: category.name.clone(),
                score: scoring::category_score(category)?,
                subcategories,
            });
        }

        let effectiveness = match ratings {
            Some(ratings) => Some(scoring::effectiveness_score(ratings)?),
            None => None,
        };

        let overall = state.overall_score()?;
        Ok(Report {
            organization: organization.to_string(),
            categories,
            effectiveness,
            overall,
            verdict: Verdict::for_score(overall),
        })
    }
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a percentage with one decimal, e.g. "82.5%"
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Width of the name column: longest subcategory name, clamped so narrow
/// terminals still fit the numeric columns.
fn name_column_width(report: &Report) -> usize {
    let longest = report
        .categories
        .iter()
        .flat_map(|c| c.subcategories.iter())
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0);

    let cap = match get_terminal_width() {
        // Name + 2 indent + weight (7) + score (8) + implemented note (~20)
        Some(width) if width > 40 => width - 40,
        Some(_) => 20,
        None => 40,
    };
    longest.min(cap).max(10)
}

/// Format the full assessment report, one category block per category.
pub fn format_report(report: &Report, use_colors: bool) -> String {
    let name_width = name_column_width(report);
    let mut lines = Vec::new();

    if use_colors {
        lines.push(format!("{}", report.organization.bold()));
    } else {
        lines.push(report.organization.clone());
    }
    lines.push(String::new());

    for category in &report.categories {
        let score = format_percent(category.score);
        if use_colors {
            lines.push(format!(
                "{}  {}",
                format!("{:<width$}", category.name, width = name_width + 2).cyan(),
                format!("{:>7}", score).bold()
            ));
        } else {
            lines.push(format!(
                "{:<width$}  {:>7}",
                category.name,
                score,
                width = name_width + 2
            ));
        }

        for sub in &category.subcategories {
            let name = truncate_name(&sub.name, name_width);
            let row = format!(
                "  {:<width$} {:>6.1} {:>7}  ({}/{} implemented)",
                name,
                sub.weight,
                format_percent(sub.score),
                sub.implemented,
                sub.metrics,
                width = name_width
            );
            if use_colors {
                lines.push(format!("{}", row.dimmed()));
            } else {
                lines.push(row);
            }
        }
        lines.push(String::new());
    }

    if let Some(effectiveness) = report.effectiveness {
        lines.push(format!("Effectiveness: {}", format_percent(effectiveness)));
    }

    let overall = format_percent(report.overall);
    if use_colors {
        lines.push(format!("Overall efficiency: {}", overall.bold()));
    } else {
        lines.push(format!("Overall efficiency: {}", overall));
    }
    lines.push(report.verdict.message().to_string());

    lines.join("\n")
}

/// Format the configured hierarchy with default weights (for `show`).
pub fn format_hierarchy(config: &Config, use_colors: bool) -> String {
    let mut lines = Vec::new();
    for category in &config.categories {
        if use_colors {
            lines.push(format!("{}", category.name.bold()));
        } else {
            lines.push(category.name.clone());
        }
        for sub in &category.subcategories {
            lines.push(format!("  {} (weight {})", sub.name, sub.weight));
            for metric in &sub.metrics {
                let row = format!("    - {} ({})", metric.name, metric.weight);
                if use_colors {
                    lines.push(format!("{}", row.dimmed()));
                } else {
                    lines.push(row);
                }
            }
        }
        lines.push(String::new());
    }
    // Drop the trailing blank line.
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Format category scores as tab-separated values for scripting
/// Columns: name, score (no headers, no colors)
pub fn format_tsv(report: &Report) -> String {
    let mut lines: Vec<String> = report
        .categories
        .iter()
        .map(|c| format!("{}\t{:.1}", c.name, c.score))
        .collect();
    if let Some(effectiveness) = report.effectiveness {
        lines.push(format!("Effectiveness\t{:.1}", effectiveness));
    }
    lines.push(format!("Overall\t{:.1}", report.overall));
    lines.join("\n")
}
