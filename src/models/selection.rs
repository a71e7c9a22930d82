//! User-chosen set of dispatching rules.

use std::collections::BTreeSet;

use super::RuleId;

/// A set of selected rules, mutated only by toggling.
///
/// Membership is a set: click order is not remembered. [`as_ordered`]
/// always yields catalog order, so two sessions that end with the same
/// selected set serialize identically.
///
/// [`as_ordered`]: RuleSelection::as_ordered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSelection {
    rules: BTreeSet<RuleId>,
}

impl RuleSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `id` if absent, removes it if present.
    ///
    /// Returns `true` if the rule is selected afterwards.
    pub fn toggle(&mut self, id: RuleId) -> bool {
        if self.rules.remove(&id) {
            false
        } else {
            self.rules.insert(id);
            true
        }
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Selected rules in catalog order.
    pub fn as_ordered(&self) -> Vec<RuleId> {
        // BTreeSet iterates by `Ord`, which is catalog rank.
        self.rules.iter().copied().collect()
    }

    /// Whether `id` is selected.
    pub fn contains(&self, id: RuleId) -> bool {
        self.rules.contains(&id)
    }

    /// Number of selected rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<RuleId> for RuleSelection {
    /// Toggles each item in turn; a rule listed twice ends up deselected.
    fn from_iter<I: IntoIterator<Item = RuleId>>(iter: I) -> Self {
        let mut selection = Self::new();
        for id in iter {
            selection.toggle(id);
        }
        selection
    }
}
