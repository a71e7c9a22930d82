//! Result shapes returned by the scheduling service.
//!
//! Field names follow the service's JSON contract verbatim (it mixes
//! `rj` with `"Start time"`). Values are passed through without
//! interpretation: the service may send numbers, pre-formatted strings
//! such as `"12.50"`, or `"N/A"`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::RuleId;

/// A table cell as sent by the service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// A JSON number, kept in its original representation.
    Number(serde_json::Number),
    /// A string, e.g. a job name or `"N/A"`.
    Text(String),
    /// `null` or a missing column.
    #[default]
    Empty,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => f.write_str(s),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value.into())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// One job's computed metrics under a rule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Job identifier.
    #[serde(default)]
    pub job: Cell,
    /// Release time (r_j).
    #[serde(rename = "rj", default)]
    pub release_time: Cell,
    /// Processing time (p_j).
    #[serde(rename = "pj", default)]
    pub processing_time: Cell,
    #[serde(rename = "Start time", default)]
    pub start_time: Cell,
    #[serde(rename = "Completion time", default)]
    pub completion_time: Cell,
    #[serde(rename = "Flow time", default)]
    pub flow_time: Cell,
    /// Lateness, clipped at zero by the service.
    #[serde(rename = "Late time", default)]
    pub late_time: Cell,
}

impl ScheduleRow {
    /// Cells in display column order.
    pub fn cells(&self) -> [&Cell; 7] {
        [
            &self.job,
            &self.release_time,
            &self.processing_time,
            &self.start_time,
            &self.completion_time,
            &self.flow_time,
            &self.late_time,
        ]
    }
}

/// Gantt chart image, base64-encoded PNG without a data-URI prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GanttChart(String);

impl GanttChart {
    /// Wraps an encoded payload.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded payload as received.
    pub fn encoded(&self) -> &str {
        &self.0
    }

    /// Decodes the image bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.0.trim())
    }

    /// `data:` URI suitable for embedding in HTML.
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.0)
    }
}

/// Schedule and chart for one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    pub rule: RuleId,
    /// Rows in service order (e.g., by start or completion time).
    pub schedule: Vec<ScheduleRow>,
    #[serde(rename = "gantt_chart")]
    pub chart: GanttChart,
}

/// Summary statistics for one rule in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    #[serde(rename = "Rule")]
    pub rule: RuleId,
    #[serde(rename = "Average Completion Time", default)]
    pub avg_completion_time: Cell,
    #[serde(rename = "Average Flow Time", default)]
    pub avg_flow_time: Cell,
    #[serde(rename = "Average Late Time", default)]
    pub avg_lateness: Cell,
    #[serde(rename = "Utilization (%)", default)]
    pub utilization_pct: Cell,
}

impl ComparisonRow {
    /// Metric cells in display column order (rule name excluded).
    pub fn cells(&self) -> [&Cell; 4] {
        [
            &self.avg_completion_time,
            &self.avg_flow_time,
            &self.avg_lateness,
            &self.utilization_pct,
        ]
    }
}

/// Body of a successful `POST /process` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub results: Vec<RuleResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_data: Option<Vec<ComparisonRow>>,
}

/// Body of a failed `POST /process` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Everything one successful submission produced.
///
/// Built atomically from a single response; never merged with an
/// earlier result set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    /// Cross-rule comparison, in service order. Present for compare runs.
    pub comparison: Option<Vec<ComparisonRow>>,
    /// Per-rule results, in service order.
    pub results: Vec<RuleResult>,
}

impl ResultSet {
    /// Result for a specific rule.
    pub fn result_for(&self, rule: RuleId) -> Option<&RuleResult> {
        self.results.iter().find(|r| r.rule == rule)
    }

    /// Rules covered, in result order.
    pub fn rules(&self) -> Vec<RuleId> {
        self.results.iter().map(|r| r.rule).collect()
    }
}
