//! Mapping service payloads to renderable results.
//!
//! [`present`] preserves every ordering the service chose: comparison
//! rows, per-rule results, and schedule rows inside each result. Nothing
//! is re-sorted, filtered, or recomputed.
//!
//! The text renderers lay results out as aligned plain-text tables, with
//! the comparison (if any) first and one section per rule after it.

use std::fmt::Write as _;

use tracing::debug;

use crate::models::{ComparisonRow, ResultSet, RuleResult, ServiceResponse};

/// Column headers of a per-rule schedule table.
pub const SCHEDULE_HEADERS: [&str; 7] = [
    "Job",
    "Release Time",
    "Processing Time",
    "Start Time",
    "Completion Time",
    "Flow Time",
    "Late Time",
];

/// Column headers of the comparison table.
pub const COMPARISON_HEADERS: [&str; 5] = [
    "Rule",
    "Average Completion Time",
    "Average Flow Time",
    "Average Late Time",
    "Utilization (%)",
];

/// Turns a successful response into a [`ResultSet`].
pub fn present(payload: ServiceResponse) -> ResultSet {
    debug!(
        results = payload.results.len(),
        comparison = payload.compare_data.as_ref().map(Vec::len),
        "presenting response"
    );
    ResultSet {
        comparison: payload.compare_data,
        results: payload.results,
    }
}

/// Renders a whole result set: comparison first, then each rule.
pub fn render_text(results: &ResultSet) -> String {
    let mut out = String::new();
    if let Some(rows) = &results.comparison {
        out.push_str("== Compare result ==\n");
        out.push_str(&render_comparison(rows));
        out.push('\n');
    }
    for result in &results.results {
        out.push_str(&render_rule(result));
        out.push('\n');
    }
    out
}

/// Renders the comparison table.
pub fn render_comparison(rows: &[ComparisonRow]) -> String {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            std::iter::once(row.rule.to_string())
                .chain(row.cells().iter().map(|c| c.to_string()))
                .collect()
        })
        .collect();
    render_table(&COMPARISON_HEADERS, &body)
}

/// Renders one rule's section: title, chart size, schedule table.
pub fn render_rule(result: &RuleResult) -> String {
    let mut out = format!("== {} ({}) ==\n", result.rule, result.rule.description());
    match result.chart.decode() {
        Ok(bytes) => {
            let _ = writeln!(out, "Gantt chart: {} bytes PNG", bytes.len());
        }
        Err(_) => out.push_str("Gantt chart: unreadable\n"),
    }
    let body: Vec<Vec<String>> = result
        .schedule
        .iter()
        .map(|row| row.cells().iter().map(|c| c.to_string()).collect())
        .collect();
    out.push_str(&render_table(&SCHEDULE_HEADERS, &body));
    out
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}
