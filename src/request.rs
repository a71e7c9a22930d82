//! Request construction.
//!
//! A [`Request`] is the immutable, transport-ready form of one submission:
//! the dataset snapshot, the mode, and the selected rules in catalog
//! order. Building one is pure; the controller performs the I/O.
//!
//! # Wire form
//!
//! `POST /process` as `multipart/form-data`:
//!
//! | Field | Value |
//! |-------|-------|
//! | `file` | dataset bytes, spreadsheet media type |
//! | `mode` | `execute` or `compare` |
//! | `rules` | repeated, one per rule, catalog order |

use tracing::debug;

use crate::models::{Dataset, Mode, RuleId, RuleSelection};
use crate::validation::{ValidationErrorKind, ValidationResult};

/// Multipart field carrying the spreadsheet.
pub const FILE_FIELD: &str = "file";
/// Multipart field carrying the mode tag.
pub const MODE_FIELD: &str = "mode";
/// Multipart field repeated once per rule.
pub const RULES_FIELD: &str = "rules";

/// One submission to the scheduling service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    dataset: Dataset,
    mode: Mode,
    rules: Vec<RuleId>,
}

impl Request {
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Rules in catalog order.
    pub fn rules(&self) -> &[RuleId] {
        &self.rules
    }

    /// Text form fields in send order: `mode`, then each `rules` entry.
    ///
    /// The file part is sent separately; see [`FILE_FIELD`].
    pub fn form_fields(&self) -> Vec<(&'static str, &'static str)> {
        std::iter::once((MODE_FIELD, self.mode.as_str()))
            .chain(self.rules.iter().map(|rule| (RULES_FIELD, rule.name())))
            .collect()
    }
}

/// Validates inputs and assembles a [`Request`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestBuilder;

impl RequestBuilder {
    /// Builds a request.
    ///
    /// Preconditions are checked in order:
    /// 1. a dataset is present, else `MissingFile`
    /// 2. at least one rule is selected, else `NoRulesSelected`
    /// 3. for `Compare`, at least two rules, else `InsufficientRulesForComparison`
    pub fn build(
        dataset: Option<&Dataset>,
        selection: &RuleSelection,
        mode: Mode,
    ) -> ValidationResult<Request> {
        let dataset = dataset.ok_or(ValidationErrorKind::MissingFile)?;

        let rules = selection.as_ordered();
        if rules.is_empty() {
            return Err(ValidationErrorKind::NoRulesSelected.into());
        }
        if rules.len() < mode.min_rules() {
            return Err(ValidationErrorKind::InsufficientRulesForComparison.into());
        }

        debug!(%mode, ?rules, file = dataset.name(), "request built");
        Ok(Request {
            dataset: dataset.clone(),
            mode,
            rules,
        })
    }
}
