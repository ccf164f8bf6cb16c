//! Exclusion ledger
//!
//! Combinations the operator removed from the matrix. The visible set is
//! the full set minus every ledger entry. Entries are never purged when the
//! option set changes shape; an entry that no longer matches any
//! combination is simply inert.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use variant_model::Combination;

/// Deduplicated, insertion-ordered set of excluded combinations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionLedger {
    entries: IndexSet<Combination>,
}

impl ExclusionLedger {
    /// Create empty ledger
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an exclusion; returns `false` if it was already recorded
    pub fn exclude(&mut self, combination: Combination) -> bool {
        self.entries.insert(combination)
    }

    /// Membership by positional equality
    #[inline]
    #[must_use]
    pub fn contains(&self, combination: &Combination) -> bool {
        self.entries.contains(combination)
    }

    /// Number of entries, stale ones included
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was excluded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in exclusion order
    pub fn iter(&self) -> impl Iterator<Item = &Combination> {
        self.entries.iter()
    }

    /// Filter a full set down to the visible set
    #[must_use]
    pub fn visible(&self, full_set: &[Combination]) -> Vec<Combination> {
        visible(full_set, self)
    }

    /// Drop entries holding `value` at `position`
    ///
    /// Used when a value is added back to an option so that it is visible
    /// again instead of being pruned straight away.
    pub fn forget_value(&mut self, position: usize, value: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|c| c.get(position) != Some(value));
        before - self.entries.len()
    }

    /// Remove every entry
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Full set minus exclusions, keeping full-set order
#[must_use]
pub fn visible(full_set: &[Combination], exclusions: &ExclusionLedger) -> Vec<Combination> {
    if exclusions.is_empty() {
        return full_set.to_vec();
    }
    full_set
        .iter()
        .filter(|c| !exclusions.contains(c))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> Vec<Combination> {
        vec![
            Combination::from(["Red", "S"]),
            Combination::from(["Red", "M"]),
            Combination::from(["Blue", "S"]),
            Combination::from(["Blue", "M"]),
        ]
    }

    #[test]
    fn exclude_is_idempotent() {
        let mut ledger = ExclusionLedger::new();
        assert!(ledger.exclude(Combination::from(["Blue", "M"])));
        let once = ledger.visible(&full());

        assert!(!ledger.exclude(Combination::from(["Blue", "M"])));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.visible(&full()), once);
    }

    #[test]
    fn visible_keeps_full_set_order() {
        let mut ledger = ExclusionLedger::new();
        ledger.exclude(Combination::from(["Red", "M"]));
        assert_eq!(
            ledger.visible(&full()),
            vec![
                Combination::from(["Red", "S"]),
                Combination::from(["Blue", "S"]),
                Combination::from(["Blue", "M"]),
            ]
        );
    }

    #[test]
    fn stale_entries_match_nothing() {
        let mut ledger = ExclusionLedger::new();
        ledger.exclude(Combination::from(["Blue"]));
        assert_eq!(ledger.visible(&full()), full());
    }

    #[test]
    fn forget_value_drops_matching_position_only() {
        let mut ledger = ExclusionLedger::new();
        ledger.exclude(Combination::from(["Blue", "S"]));
        ledger.exclude(Combination::from(["Blue", "M"]));
        ledger.exclude(Combination::from(["S", "Blue"]));

        assert_eq!(ledger.forget_value(0, "Blue"), 2);
        assert_eq!(ledger.len(), 1);
        assert!(ledger.contains(&Combination::from(["S", "Blue"])));
    }
}
