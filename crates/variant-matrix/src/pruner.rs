//! Value pruner
//!
//! Trims every option down to the values still referenced by the visible
//! set. Relative order of the surviving values is preserved. An option that
//! loses all its values stays in place with an empty list.

use serde::Serialize;
use std::collections::HashSet;
use variant_model::{Combination, ProductOption};

/// Value removed by a pruning pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrunedValue {
    /// Position of the option in the option set
    pub position: usize,
    /// Option name at the time of pruning
    pub option: String,
    /// The value that was dropped
    pub value: String,
}

/// Outcome of a pruning pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PruneReport {
    /// Removed values, option by option
    pub removed: Vec<PrunedValue>,
    /// Names of options left with no values by this pass
    pub emptied: Vec<String>,
}

impl PruneReport {
    /// True when nothing was removed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Remove values that appear in no visible combination
pub fn prune(options: &mut [ProductOption], visible: &[Combination]) -> PruneReport {
    let mut observed: Vec<HashSet<&str>> = vec![HashSet::new(); options.len()];
    for combination in visible {
        for (seen, value) in observed.iter_mut().zip(combination.iter()) {
            seen.insert(value);
        }
    }

    let mut report = PruneReport::default();
    for (position, (option, seen)) in options.iter_mut().zip(&observed).enumerate() {
        let was_empty = option.is_empty();
        for value in option.retain_values(|v| seen.contains(v)) {
            report.removed.push(PrunedValue {
                position,
                option: option.name.clone(),
                value,
            });
        }
        if !was_empty && option.is_empty() {
            report.emptied.push(option.name.clone());
        }
    }
    report
}
