//! Dispatching rule identifiers and their canonical order.
//!
//! The service understands a fixed set of single-machine dispatching
//! rules. `RuleCatalog` fixes their precedence; every ordered view of a
//! rule set in this crate (request serialization, display) sorts by
//! [`RuleCatalog::rank`].
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::validation::{ValidationError, ValidationErrorKind};

/// A dispatching rule understood by the scheduling service.
///
/// Only catalog members are representable. Strings from the outside world
/// enter through [`FromStr`] or serde, both of which reject unknown names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleId {
    /// Shortest Processing Time.
    Spt,
    /// Longest Processing Time.
    Lpt,
    /// Weighted Shortest Processing Time.
    Wspt,
    /// Earliest Due Date.
    Edd,
    /// Shortest Remaining Processing Time (preemptive).
    Srpt,
    /// Least Slack Time (preemptive).
    Lst,
    /// Longest Remaining Processing Time (preemptive).
    Lrpt,
}

impl RuleId {
    /// Wire name (e.g., "SPT", "EDD").
    pub fn name(&self) -> &'static str {
        match self {
            RuleId::Spt => "SPT",
            RuleId::Lpt => "LPT",
            RuleId::Wspt => "WSPT",
            RuleId::Edd => "EDD",
            RuleId::Srpt => "SRPT",
            RuleId::Lst => "LST",
            RuleId::Lrpt => "LRPT",
        }
    }

    /// Rule description.
    pub fn description(&self) -> &'static str {
        match self {
            RuleId::Spt => "Shortest Processing Time",
            RuleId::Lpt => "Longest Processing Time",
            RuleId::Wspt => "Weighted Shortest Processing Time",
            RuleId::Edd => "Earliest Due Date",
            RuleId::Srpt => "Shortest Remaining Processing Time",
            RuleId::Lst => "Least Slack Time",
            RuleId::Lrpt => "Longest Remaining Processing Time",
        }
    }

    /// Whether the service evaluates this rule with preemption.
    ///
    /// Preemptive rules may split a job across several bars in the
    /// returned Gantt chart.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, RuleId::Srpt | RuleId::Lst | RuleId::Lrpt)
    }

    /// Position in [`RuleCatalog::order`].
    #[inline]
    pub fn rank(&self) -> usize {
        RuleCatalog::rank(*self)
    }
}

impl Ord for RuleId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for RuleId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleCatalog::order()
            .iter()
            .copied()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| {
                ValidationError::new(
                    ValidationErrorKind::UnknownRule,
                    format!("Unknown dispatching rule: {s}"),
                )
            })
    }
}

/// The fixed, ordered universe of rule identifiers.
#[derive(Debug, Clone, Copy)]
pub struct RuleCatalog;

const ORDER: [RuleId; 7] = [
    RuleId::Spt,
    RuleId::Lpt,
    RuleId::Wspt,
    RuleId::Edd,
    RuleId::Srpt,
    RuleId::Lst,
    RuleId::Lrpt,
];

impl RuleCatalog {
    /// All rules in canonical precedence order.
    pub fn order() -> &'static [RuleId] {
        &ORDER
    }

    /// Position of `id` in the canonical order.
    pub fn rank(id: RuleId) -> usize {
        match id {
            RuleId::Spt => 0,
            RuleId::Lpt => 1,
            RuleId::Wspt => 2,
            RuleId::Edd => 3,
            RuleId::Srpt => 4,
            RuleId::Lst => 5,
            RuleId::Lrpt => 6,
        }
    }
}
