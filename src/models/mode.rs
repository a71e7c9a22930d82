use serde::{Deserialize, Serialize};
use std::fmt;

/// What a submission asks the service for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Per-rule schedules only.
    Execute,
    /// Per-rule schedules plus a cross-rule comparison table.
    Compare,
}

impl Mode {
    /// Value of the `mode` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Execute => "execute",
            Mode::Compare => "compare",
        }
    }

    /// Fewest selected rules a request in this mode may carry.
    pub fn min_rules(&self) -> usize {
        match self {
            Mode::Execute => 1,
            Mode::Compare => 2,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
