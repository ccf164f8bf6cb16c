//! Variant reconciler
//!
//! Matches freshly generated combinations against the variant records held
//! before an edit. A record whose combination is positionally equal is
//! carried over unchanged; everything else gets a default stub. Records with
//! no counterpart are dropped.
//!
//! Prior records are indexed by combination, so reconciliation is linear in
//! `|new| + |prior|` rather than their product.

use std::collections::HashMap;
use variant_model::{Combination, VariantRecord};

/// Result of one reconciliation
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// One record per new combination, in the same order
    pub variants: Vec<VariantRecord>,
    /// Records carried over from the prior set
    pub carried: usize,
    /// Stubs synthesized for unmatched combinations
    pub stubbed: usize,
    /// Prior records with no matching combination
    pub dropped: usize,
}

/// Align variant records with a new list of combinations
#[must_use]
pub fn reconcile(new: &[Combination], prior: Vec<VariantRecord>) -> Reconciliation {
    let prior_len = prior.len();
    let mut index: HashMap<Combination, VariantRecord> = HashMap::with_capacity(prior_len);
    for record in prior {
        // First record wins when the prior set holds duplicates.
        index.entry(record.combination.clone()).or_insert(record);
    }

    let mut out = Reconciliation {
        variants: Vec::with_capacity(new.len()),
        ..Reconciliation::default()
    };
    for combination in new {
        match index.remove(combination) {
            Some(record) => {
                out.carried += 1;
                out.variants.push(record);
            }
            None => {
                out.stubbed += 1;
                out.variants.push(VariantRecord::stub(combination.clone()));
            }
        }
    }
    out.dropped = prior_len - out.carried;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use variant_model::VariantPatch;

    fn record(values: [&str; 2], sku: &str) -> VariantRecord {
        let mut r = VariantRecord::stub(Combination::from(values));
        r.apply(&VariantPatch::new().with_sku(sku).with_price(10.0));
        r
    }

    #[test]
    fn carries_matches_and_stubs_the_rest() {
        let prior = vec![record(["Red", "S"], "RS"), record(["Blue", "S"], "BS")];
        let new = vec![
            Combination::from(["Red", "S"]),
            Combination::from(["Red", "M"]),
        ];

        let out = reconcile(&new, prior.clone());

        assert_eq!(out.variants.len(), 2);
        assert_eq!(out.variants[0], prior[0]);
        assert_eq!(out.variants[1].combination, new[1]);
        assert!(out.variants[1].sku.is_empty());
        assert_eq!((out.carried, out.stubbed, out.dropped), (1, 1, 1));
    }

    #[test]
    fn output_follows_new_order() {
        let prior = vec![record(["Blue", "M"], "BM"), record(["Red", "S"], "RS")];
        let new = vec![
            Combination::from(["Red", "S"]),
            Combination::from(["Blue", "M"]),
        ];

        let out = reconcile(&new, prior);
        let skus: Vec<_> = out.variants.iter().map(|v| v.sku.as_str()).collect();
        assert_eq!(skus, ["RS", "BM"]);
    }

    #[test]
    fn shape_change_stubs_everything() {
        let prior = vec![record(["Red", "S"], "RS")];
        let new = vec![Combination::from(["Red"])];

        let out = reconcile(&new, prior);
        assert_eq!((out.carried, out.stubbed, out.dropped), (0, 1, 1));
    }

    #[test]
    fn duplicate_prior_records_keep_the_first() {
        let prior = vec![record(["Red", "S"], "first"), record(["Red", "S"], "second")];
        let out = reconcile(&[Combination::from(["Red", "S"])], prior);
        assert_eq!(out.variants[0].sku, "first");
        assert_eq!(out.dropped, 1);
    }
}
