//! Client-side domain models.
//!
//! Inputs (what the user picks) and outputs (what the service returns)
//! of one scheduling run. No scheduling arithmetic happens here; every
//! metric comes from the service.
//!
//! # Domain Mappings
//!
//! | u-dispatch | Service contract | View |
//! |------------|------------------|------|
//! | Dataset | `file` part | "File uploaded: ..." |
//! | RuleId | `rules` field / `rule` key | rule checkbox |
//! | RuleResult | `results[]` | per-rule card |
//! | ComparisonRow | `compare_data[]` | compare table |

mod dataset;
mod mode;
mod result;
mod rule;
mod selection;

pub use dataset::{Dataset, FileCandidate, FileIntake, SPREADSHEET_MIME};
pub use mode::Mode;
pub use result::{
    Cell, ComparisonRow, ErrorBody, GanttChart, ResultSet, RuleResult, ScheduleRow,
    ServiceResponse,
};
pub use rule::{RuleCatalog, RuleId};
pub use selection::RuleSelection;
