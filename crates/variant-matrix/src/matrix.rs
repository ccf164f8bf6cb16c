//! Variant matrix state
//!
//! [`VariantMatrix`] owns the option set, the exclusion ledger, the variant
//! records and the dimension assets of one editing session, and applies
//! every operator action to them as a single step.
//!
//! # Settling
//!
//! After each accepted mutation the matrix settles:
//! 1. Regenerate the full set and filter it through the ledger
//! 2. Prune option values the visible set no longer references
//! 3. Clear assets whose value left the distinguished option
//! 4. Reconcile variant records against the visible set
//! 5. Point each record at its value's resolved asset, or at nothing
//!
//! Pruning always runs after an exclusion. After a structural edit it runs
//! only while the full set is non-empty; with a zero-value option in place
//! there is nothing to observe and the other options are left alone.
//!
//! # Atomicity
//!
//! Structural edits are applied to a copy of the option set, checked
//! against the combination bound, and only then committed. A rejected edit
//! leaves the matrix untouched.

use crate::assets::DimensionAssetStore;
use crate::dimension::DimensionKey;
use crate::error::{InvariantViolation, MatrixError};
use crate::exclusion::ExclusionLedger;
use crate::generator::{full_set_size, generate};
use crate::merge::{merge_option, MergeOutcome};
use crate::page::{paginate, Page};
use crate::pruner::{prune, PruneReport, PrunedValue};
use crate::reconcile::reconcile;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use variant_model::{
    normalize_value, Combination, DimensionAsset, LocalFile, ProductOption, VariantPatch,
    VariantRecord,
};

/// Default bound on the full set size
pub const DEFAULT_MAX_COMBINATIONS: usize = 2500;

/// What a settle pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettleReport {
    /// Values removed by pruning
    pub pruned: Vec<PrunedValue>,
    /// Options left with no values
    pub emptied: Vec<String>,
    /// Dimension values whose asset was cleared
    pub cleared_assets: Vec<String>,
    /// Size of the visible set after settling
    pub visible: usize,
}

impl SettleReport {
    fn new(prune: PruneReport, cleared_assets: Vec<String>, visible: usize) -> Self {
        Self {
            pruned: prune.removed,
            emptied: prune.emptied,
            cleared_assets,
            visible,
        }
    }
}

/// Result of [`VariantMatrix::exclude`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExclusionReport {
    /// False when the combination was already excluded
    pub newly_excluded: bool,
    /// Effects of the settle pass
    pub settled: SettleReport,
}

/// Option/variant matrix of one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantMatrix {
    options: Vec<ProductOption>,
    ledger: ExclusionLedger,
    variants: Vec<VariantRecord>,
    assets: DimensionAssetStore,
    dimension: DimensionKey,
    max_combinations: usize,
}

impl Default for VariantMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl VariantMatrix {
    /// Create empty matrix keyed on the default dimension
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            ledger: ExclusionLedger::new(),
            variants: Vec::new(),
            assets: DimensionAssetStore::new(),
            dimension: DimensionKey::default(),
            max_combinations: DEFAULT_MAX_COMBINATIONS,
        }
    }

    /// With a different distinguished option
    #[inline]
    #[must_use]
    pub fn with_dimension(mut self, dimension: DimensionKey) -> Self {
        self.dimension = dimension;
        self
    }

    /// With a different combination bound
    #[inline]
    #[must_use]
    pub fn with_max_combinations(mut self, max: usize) -> Self {
        self.max_combinations = max;
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Options in tuple-position order
    #[inline]
    #[must_use]
    pub fn options(&self) -> &[ProductOption] {
        &self.options
    }

    /// Option at position
    #[inline]
    #[must_use]
    pub fn option(&self, position: usize) -> Option<&ProductOption> {
        self.options.get(position)
    }

    /// Position of an option by case-insensitive name
    #[must_use]
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.options.iter().position(|o| o.name_matches(name))
    }

    /// Exclusion ledger
    #[inline]
    #[must_use]
    pub fn ledger(&self) -> &ExclusionLedger {
        &self.ledger
    }

    /// Variant records, one per visible combination in visible order
    #[inline]
    #[must_use]
    pub fn variants(&self) -> &[VariantRecord] {
        &self.variants
    }

    /// Dimension assets
    #[inline]
    #[must_use]
    pub fn assets(&self) -> &DimensionAssetStore {
        &self.assets
    }

    /// Distinguished dimension key
    #[inline]
    #[must_use]
    pub fn dimension(&self) -> &DimensionKey {
        &self.dimension
    }

    /// Position of the distinguished option
    #[inline]
    #[must_use]
    pub fn dimension_position(&self) -> Option<usize> {
        self.dimension.position(&self.options)
    }

    /// Configured combination bound
    #[inline]
    #[must_use]
    pub fn max_combinations(&self) -> usize {
        self.max_combinations
    }

    /// Options that currently have no values
    #[must_use]
    pub fn empty_options(&self) -> Vec<&ProductOption> {
        self.options.iter().filter(|o| o.is_empty()).collect()
    }

    /// Cartesian product of all option values
    #[must_use]
    pub fn full_set(&self) -> Vec<Combination> {
        generate(&self.options)
    }

    /// Full set minus exclusions
    #[must_use]
    pub fn visible_set(&self) -> Vec<Combination> {
        self.ledger.visible(&self.full_set())
    }

    /// Page through the visible variants
    #[must_use]
    pub fn page(&self, page: usize, per_page: usize) -> Page<'_, VariantRecord> {
        paginate(&self.variants, page, per_page)
    }

    /// Variant record for a combination
    #[must_use]
    pub fn variant(&self, combination: &Combination) -> Option<&VariantRecord> {
        self.variants.iter().find(|v| &v.combination == combination)
    }

    /// Asset attached to a dimension value
    #[inline]
    #[must_use]
    pub fn asset(&self, value: &str) -> Option<&DimensionAsset> {
        self.assets.get(value)
    }

    // ------------------------------------------------------------------
    // Structural edits
    // ------------------------------------------------------------------

    /// Replace the whole state with a previously saved product
    ///
    /// Options with the same name are merged; prior variant records are
    /// reconciled against the new visible set, and their saved asset
    /// references seed the dimension asset store.
    pub fn restore(
        &mut self,
        options: Vec<ProductOption>,
        prior: Vec<VariantRecord>,
    ) -> Result<SettleReport, MatrixError> {
        let mut next: Vec<ProductOption> = Vec::with_capacity(options.len());
        for option in options {
            if option.name.trim().is_empty() {
                return Err(MatrixError::BlankOptionName);
            }
            if option.is_empty() {
                return Err(MatrixError::EmptyOption { name: option.name });
            }
            if let Some(existing) = next.iter_mut().find(|o| o.name_matches(&option.name)) {
                existing.merge_values(option.values());
            } else {
                next.push(option);
            }
        }
        self.check_bound(&next)?;

        self.options = next;
        self.ledger.clear();
        self.assets.clear_all();
        if let Some(position) = self.dimension_position() {
            for record in &prior {
                if let (Some(value), Some(reference)) =
                    (record.combination.get(position), &record.dimension_asset)
                {
                    self.assets.resolve(value, reference.as_str());
                }
            }
        }
        self.variants = prior;
        Ok(self.settle(true))
    }

    /// Add an option, merging into an existing one with the same name
    pub fn add_option<I, S>(&mut self, name: &str, values: I) -> Result<MergeOutcome, MatrixError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(MatrixError::BlankOptionName);
        }
        let values: Vec<String> = values
            .into_iter()
            .filter_map(|v| normalize_value(v.as_ref()))
            .collect();
        if values.is_empty() {
            return Err(MatrixError::EmptyOption {
                name: name.to_string(),
            });
        }

        let mut next = self.options.clone();
        let outcome = merge_option(&mut next, name, &values);
        let forget: Vec<(usize, String)> = match &outcome {
            MergeOutcome::Merged { position, appended } => {
                appended.iter().map(|v| (*position, v.clone())).collect()
            }
            MergeOutcome::Created { .. } => Vec::new(),
        };
        self.commit(next, &forget)?;

        tracing::info!("Option '{}' now has {} values", name, self.options[outcome.position()].len());
        Ok(outcome)
    }

    /// Append a value to an option; `Ok(false)` if already present
    pub fn add_value(&mut self, position: usize, raw: &str) -> Result<bool, MatrixError> {
        let value = normalize_value(raw).ok_or(MatrixError::BlankValue)?;
        let option = self
            .options
            .get(position)
            .ok_or(MatrixError::UnknownOption(position))?;
        if option.contains(&value) {
            return Ok(false);
        }

        let mut next = self.options.clone();
        next[position].push_value(&value);
        self.commit(next, &[(position, value)])?;
        Ok(true)
    }

    /// Remove a value from an option
    ///
    /// The last value cannot be removed; remove the option instead.
    pub fn remove_value(&mut self, position: usize, value: &str) -> Result<(), MatrixError> {
        let option = self
            .options
            .get(position)
            .ok_or(MatrixError::UnknownOption(position))?;
        if !option.contains(value) {
            return Err(MatrixError::UnknownValue {
                option: option.name.clone(),
                value: value.to_string(),
            });
        }
        if option.len() == 1 {
            return Err(MatrixError::LastValue(option.name.clone()));
        }

        let mut next = self.options.clone();
        next[position].remove_value(value);
        self.commit(next, &[])?;
        Ok(())
    }

    /// Rename an option
    pub fn rename_option(&mut self, position: usize, name: &str) -> Result<(), MatrixError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MatrixError::BlankOptionName);
        }
        if position >= self.options.len() {
            return Err(MatrixError::UnknownOption(position));
        }
        if self
            .options
            .iter()
            .enumerate()
            .any(|(i, o)| i != position && o.name_matches(name))
        {
            return Err(MatrixError::DuplicateOptionName(name.to_string()));
        }

        self.options[position].name = name.to_string();
        // Renaming may move the distinguished dimension.
        self.settle_structural();
        Ok(())
    }

    /// Remove an option and return it
    pub fn remove_option(&mut self, position: usize) -> Result<ProductOption, MatrixError> {
        if position >= self.options.len() {
            return Err(MatrixError::UnknownOption(position));
        }

        let mut next = self.options.clone();
        let removed = next.remove(position);
        self.commit(next, &[])?;
        tracing::info!("Removed option '{}'", removed.name);
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Exclusions
    // ------------------------------------------------------------------

    /// Exclude a combination from the visible set
    ///
    /// Excluding an already-excluded combination changes nothing.
    pub fn exclude(&mut self, combination: &Combination) -> Result<ExclusionReport, MatrixError> {
        if combination.len() != self.options.len() {
            return Err(MatrixError::CombinationShape {
                expected: self.options.len(),
                actual: combination.len(),
            });
        }
        if self.ledger.contains(combination) {
            return Ok(ExclusionReport {
                newly_excluded: false,
                settled: SettleReport {
                    visible: self.variants.len(),
                    ..SettleReport::default()
                },
            });
        }
        let in_matrix = combination
            .iter()
            .zip(&self.options)
            .all(|(value, option)| option.contains(value));
        if !in_matrix {
            return Err(MatrixError::NotInMatrix(combination.clone()));
        }

        self.ledger.exclude(combination.clone());
        let settled = self.settle(true);
        tracing::info!(
            "Excluded {}; {} visible, pruned {:?}",
            combination,
            settled.visible,
            settled.pruned.iter().map(|p| p.value.as_str()).collect::<Vec<_>>()
        );
        if !settled.emptied.is_empty() {
            tracing::warn!("Options left without values: {:?}", settled.emptied);
        }

        Ok(ExclusionReport {
            newly_excluded: true,
            settled,
        })
    }

    // ------------------------------------------------------------------
    // Dimension assets
    // ------------------------------------------------------------------

    /// Attach a local file to a value of the distinguished option
    pub fn set_asset(
        &mut self,
        value: &str,
        file: LocalFile,
    ) -> Result<Option<DimensionAsset>, MatrixError> {
        let option = self
            .dimension
            .find(&self.options)
            .ok_or_else(|| MatrixError::NoDimension(self.dimension.to_string()))?;
        if !option.contains(value) {
            return Err(MatrixError::UnknownValue {
                option: option.name.clone(),
                value: value.to_string(),
            });
        }

        let previous = self.assets.set(value, file);
        self.fan_out(value, None);
        Ok(previous)
    }

    /// Remove the asset of a dimension value
    pub fn clear_asset(&mut self, value: &str) -> Option<DimensionAsset> {
        let removed = self.assets.clear(value);
        if removed.is_some() {
            self.fan_out(value, None);
        }
        removed
    }

    /// Record an uploaded reference and attach it to every variant sharing
    /// the value
    pub fn resolve_asset(&mut self, value: &str, reference: &str) -> Result<usize, MatrixError> {
        let option = self
            .dimension
            .find(&self.options)
            .ok_or_else(|| MatrixError::NoDimension(self.dimension.to_string()))?;
        if !option.contains(value) {
            return Err(MatrixError::UnknownValue {
                option: option.name.clone(),
                value: value.to_string(),
            });
        }

        self.assets.resolve(value, reference);
        Ok(self.fan_out(value, Some(reference)))
    }

    fn fan_out(&mut self, value: &str, reference: Option<&str>) -> usize {
        let Some(position) = self.dimension_position() else {
            return 0;
        };
        let mut touched = 0;
        for variant in &mut self.variants {
            if variant.combination.get(position) == Some(value) {
                variant.dimension_asset = reference.map(str::to_string);
                touched += 1;
            }
        }
        touched
    }

    // ------------------------------------------------------------------
    // Variant edits
    // ------------------------------------------------------------------

    /// Edit the variant record of a visible combination
    pub fn update_variant(
        &mut self,
        combination: &Combination,
        patch: &VariantPatch,
    ) -> Result<(), MatrixError> {
        let record = self
            .variants
            .iter_mut()
            .find(|v| &v.combination == combination)
            .ok_or_else(|| MatrixError::UnknownVariant(combination.clone()))?;
        record.apply(patch);
        Ok(())
    }

    /// Apply the same edit to every visible variant
    pub fn apply_to_all(&mut self, patch: &VariantPatch) -> usize {
        for record in &mut self.variants {
            record.apply(patch);
        }
        self.variants.len()
    }

    /// Drop all state, keeping configuration
    pub fn clear(&mut self) {
        self.options.clear();
        self.ledger.clear();
        self.variants.clear();
        self.assets.clear_all();
    }

    // ------------------------------------------------------------------
    // Settling
    // ------------------------------------------------------------------

    fn check_bound(&self, options: &[ProductOption]) -> Result<usize, MatrixError> {
        let size = full_set_size(options).unwrap_or(usize::MAX);
        if size > self.max_combinations {
            return Err(MatrixError::TooManyCombinations {
                count: size,
                limit: self.max_combinations,
            });
        }
        Ok(size)
    }

    fn commit(
        &mut self,
        next: Vec<ProductOption>,
        forget: &[(usize, String)],
    ) -> Result<SettleReport, MatrixError> {
        self.check_bound(&next)?;

        self.options = next;
        for (position, value) in forget {
            let dropped = self.ledger.forget_value(*position, value);
            if dropped > 0 {
                tracing::debug!("Re-added '{}' restores {} excluded combinations", value, dropped);
            }
        }
        Ok(self.settle_structural())
    }

    fn settle_structural(&mut self) -> SettleReport {
        let non_empty = full_set_size(&self.options).is_some_and(|n| n > 0);
        self.settle(non_empty)
    }

    fn settle(&mut self, run_prune: bool) -> SettleReport {
        let visible = self.visible_set();

        let pruned = if run_prune {
            prune(&mut self.options, &visible)
        } else {
            PruneReport::default()
        };

        let cleared = self
            .assets
            .retain_present(self.dimension.find(&self.options));
        for value in &cleared {
            tracing::debug!("Cleared asset for pruned value '{}'", value);
        }

        let reconciled = reconcile(&visible, std::mem::take(&mut self.variants));
        self.variants = reconciled.variants;
        tracing::debug!(
            "Settled matrix: {} visible, {} carried, {} stubbed, {} dropped",
            visible.len(),
            reconciled.carried,
            reconciled.stubbed,
            reconciled.dropped
        );

        // Keep variant asset references in step with the store.
        let position = self.dimension_position();
        for variant in &mut self.variants {
            variant.dimension_asset = position
                .and_then(|p| variant.combination.get(p))
                .and_then(|v| self.assets.reference(v))
                .map(str::to_string);
        }

        SettleReport::new(pruned, cleared, visible.len())
    }

    // ------------------------------------------------------------------
    // Invariants
    // ------------------------------------------------------------------

    /// Verify the matrix invariants
    ///
    /// Value reachability is only checked while the full set is non-empty.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let full = self.full_set();
        let expected = full_set_size(&self.options).unwrap_or(usize::MAX);
        if full.len() != expected {
            return Err(InvariantViolation::FullSetSize {
                expected,
                actual: full.len(),
            });
        }

        let visible: Vec<&Combination> = self.variants.iter().map(|v| &v.combination).collect();
        let mut expected_visible = full.iter().filter(|c| !self.ledger.contains(c));
        for combination in &visible {
            if self.ledger.contains(combination) {
                return Err(InvariantViolation::ExcludedVisible((*combination).clone()));
            }
        }
        for record in &visible {
            match expected_visible.next() {
                Some(c) if c == *record => {}
                Some(c) => return Err(InvariantViolation::MissingVariant(c.clone())),
                None => return Err(InvariantViolation::StrayVariant((*record).clone())),
            }
        }
        if let Some(c) = expected_visible.next() {
            return Err(InvariantViolation::MissingVariant(c.clone()));
        }

        if !full.is_empty() {
            for (position, option) in self.options.iter().enumerate() {
                let used: HashSet<&str> =
                    visible.iter().filter_map(|c| c.get(position)).collect();
                if let Some(value) = option.values().iter().find(|v| !used.contains(v.as_str())) {
                    return Err(InvariantViolation::UnreferencedValue {
                        option: option.name.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        let position = self.dimension_position();
        if let Some(record) = self.variants.iter().find(|v| {
            let expected = position
                .and_then(|p| v.combination.get(p))
                .and_then(|value| self.assets.reference(value));
            v.dimension_asset.as_deref() != expected
        }) {
            return Err(InvariantViolation::StaleAssetReference(record.combination.clone()));
        }

        let dimension = self.dimension.find(&self.options);
        if let Some(value) = self
            .assets
            .values()
            .find(|v| !dimension.is_some_and(|o| o.contains(v)))
        {
            return Err(InvariantViolation::OrphanAsset(value.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn color_size() -> VariantMatrix {
        let mut matrix = VariantMatrix::new();
        matrix.add_option("Color", ["Red", "Blue"]).unwrap();
        matrix.add_option("Size", ["S", "M"]).unwrap();
        matrix
    }

    fn combos(list: &[[&str; 2]]) -> Vec<Combination> {
        list.iter().map(|c| Combination::from(*c)).collect()
    }

    fn png(name: &str) -> LocalFile {
        LocalFile::new(name, vec![0x89, 0x50]).with_content_type("image/png")
    }

    #[test]
    fn two_options_produce_four_visible_variants() {
        let matrix = color_size();
        let expected = combos(&[["Red", "S"], ["Red", "M"], ["Blue", "S"], ["Blue", "M"]]);

        assert_eq!(matrix.full_set(), expected);
        assert_eq!(matrix.visible_set(), expected);
        assert_eq!(matrix.variants().len(), 4);
        matrix.check_invariants().unwrap();
    }

    #[test]
    fn single_exclusion_keeps_partially_used_values() {
        let mut matrix = color_size();
        let report = matrix.exclude(&Combination::from(["Blue", "M"])).unwrap();

        assert!(report.newly_excluded);
        assert!(report.settled.pruned.is_empty());
        assert_eq!(
            matrix.visible_set(),
            combos(&[["Red", "S"], ["Red", "M"], ["Blue", "S"]])
        );
        assert_eq!(matrix.options()[0].values(), ["Red", "Blue"]);
        assert_eq!(matrix.options()[1].values(), ["S", "M"]);
        matrix.check_invariants().unwrap();
    }

    #[test]
    fn second_exclusion_prunes_value_and_clears_its_asset() {
        let mut matrix = color_size();
        matrix.set_asset("Blue", png("blue.png")).unwrap();
        matrix.set_asset("Red", png("red.png")).unwrap();

        matrix.exclude(&Combination::from(["Blue", "M"])).unwrap();
        let report = matrix.exclude(&Combination::from(["Blue", "S"])).unwrap();

        assert_eq!(matrix.visible_set(), combos(&[["Red", "S"], ["Red", "M"]]));
        assert_eq!(matrix.options()[0].values(), ["Red"]);
        assert_eq!(report.settled.cleared_assets, ["Blue"]);
        assert!(matrix.asset("Blue").is_none());
        assert!(matrix.asset("Red").is_some());
        matrix.check_invariants().unwrap();
    }

    #[test]
    fn exclude_twice_is_a_no_op() {
        let mut matrix = color_size();
        let target = Combination::from(["Red", "S"]);
        matrix.exclude(&target).unwrap();
        let snapshot = matrix.clone();

        let report = matrix.exclude(&target).unwrap();
        assert!(!report.newly_excluded);
        assert_eq!(matrix, snapshot);
    }

    #[test]
    fn exclude_rejects_foreign_combinations_without_mutation() {
        let mut matrix = color_size();
        let snapshot = matrix.clone();

        assert!(matches!(
            matrix.exclude(&Combination::from(["Red"])),
            Err(MatrixError::CombinationShape { expected: 2, actual: 1 })
        ));
        assert!(matches!(
            matrix.exclude(&Combination::from(["Green", "S"])),
            Err(MatrixError::NotInMatrix(_))
        ));
        assert_eq!(matrix, snapshot);
    }

    #[test]
    fn excluding_everything_empties_all_options() {
        let mut matrix = VariantMatrix::new();
        matrix.add_option("Color", ["Red"]).unwrap();
        let report = matrix.exclude(&Combination::from(["Red"])).unwrap();

        assert_eq!(report.settled.emptied, ["Color"]);
        assert_eq!(matrix.options().len(), 1);
        assert_eq!(matrix.empty_options().len(), 1);
        assert!(matrix.variants().is_empty());
        matrix.check_invariants().unwrap();
    }

    #[test]
    fn adding_existing_name_merges_values() {
        let mut matrix = color_size();
        let outcome = matrix.add_option("COLOR", ["Blue", "Green"]).unwrap();

        assert_eq!(
            outcome,
            MergeOutcome::Merged {
                position: 0,
                appended: vec!["Green".to_string()],
            }
        );
        assert_eq!(matrix.options().len(), 2);
        assert_eq!(matrix.variants().len(), 6);
    }

    #[test]
    fn editing_one_option_keeps_unrelated_variants() {
        let mut matrix = color_size();
        matrix
            .update_variant(
                &Combination::from(["Red", "S"]),
                &VariantPatch::new().with_sku("RED-S").with_price(12.0),
            )
            .unwrap();

        matrix.add_value(1, "L").unwrap();

        let kept = matrix.variant(&Combination::from(["Red", "S"])).unwrap();
        assert_eq!(kept.sku, "RED-S");
        assert_eq!(kept.price, Some(12.0));
        assert!(matrix.variant(&Combination::from(["Blue", "L"])).is_some());
        matrix.check_invariants().unwrap();
    }

    #[test]
    fn re_added_value_is_visible_again() {
        let mut matrix = color_size();
        matrix.exclude(&Combination::from(["Blue", "M"])).unwrap();
        matrix.exclude(&Combination::from(["Blue", "S"])).unwrap();
        assert_eq!(matrix.options()[0].values(), ["Red"]);

        assert!(matrix.add_value(0, "Blue").unwrap());
        assert_eq!(matrix.options()[0].values(), ["Red", "Blue"]);
        assert_eq!(matrix.variants().len(), 4);
        assert!(matrix.ledger().is_empty());
        matrix.check_invariants().unwrap();
    }

    #[test]
    fn removing_an_option_stubs_new_shape() {
        let mut matrix = color_size();
        matrix.exclude(&Combination::from(["Blue", "M"])).unwrap();

        let removed = matrix.remove_option(1).unwrap();
        assert_eq!(removed.name, "Size");
        assert_eq!(matrix.visible_set(), vec![Combination::from(["Red"]), Combination::from(["Blue"])]);
        assert_eq!(matrix.ledger().len(), 1);
        matrix.check_invariants().unwrap();
    }

    #[test]
    fn removing_last_value_is_rejected() {
        let mut matrix = VariantMatrix::new();
        matrix.add_option("Color", ["Red"]).unwrap();
        assert_eq!(
            matrix.remove_value(0, "Red"),
            Err(MatrixError::LastValue("Color".to_string()))
        );
    }

    #[test]
    fn combination_bound_rejects_edit_atomically() {
        let mut matrix = VariantMatrix::new().with_max_combinations(4);
        matrix.add_option("Color", ["Red", "Blue"]).unwrap();
        matrix.add_option("Size", ["S", "M"]).unwrap();
        let snapshot = matrix.clone();

        let err = matrix.add_value(1, "L").unwrap_err();
        assert_eq!(err, MatrixError::TooManyCombinations { count: 6, limit: 4 });
        assert_eq!(matrix, snapshot);
    }

    #[test]
    fn blank_values_are_rejected() {
        let mut matrix = VariantMatrix::new();
        assert_eq!(
            matrix.add_option("Size", ["", "  "]),
            Err(MatrixError::EmptyOption {
                name: "Size".to_string()
            })
        );
        assert_eq!(matrix.add_option(" ", ["S"]), Err(MatrixError::BlankOptionName));
    }

    #[test]
    fn rename_into_dimension_keeps_assets_consistent() {
        let mut matrix = VariantMatrix::new();
        matrix.add_option("Colour", ["Red"]).unwrap();
        assert!(matches!(matrix.set_asset("Red", png("red.png")), Err(MatrixError::NoDimension(_))));

        matrix.rename_option(0, "Color").unwrap();
        matrix.set_asset("Red", png("red.png")).unwrap();
        matrix.rename_option(0, "Shade").unwrap();

        assert!(matrix.assets().is_empty());
        matrix.check_invariants().unwrap();
    }

    #[test]
    fn losing_the_dimension_clears_variant_references() {
        let mut matrix = color_size();
        matrix.resolve_asset("Red", "https://cdn/red.png").unwrap();

        matrix.rename_option(0, "Shade").unwrap();

        assert!(matrix.assets().is_empty());
        assert!(matrix.variants().iter().all(|v| v.dimension_asset.is_none()));
        matrix.check_invariants().unwrap();
    }

    #[test]
    fn restore_without_dimension_drops_saved_references() {
        let mut prior = VariantRecord::stub(Combination::from(["S"]));
        prior.dimension_asset = Some("https://cdn/red.png".to_string());

        let mut matrix = VariantMatrix::new();
        matrix
            .restore(vec![ProductOption::new("Size", ["S", "M"])], vec![prior])
            .unwrap();

        assert!(matrix.variants().iter().all(|v| v.dimension_asset.is_none()));
        matrix.check_invariants().unwrap();
    }

    #[test]
    fn invariant_check_flags_stale_reference() {
        let mut matrix = color_size();
        matrix.variants[0].dimension_asset = Some("https://cdn/gone.png".to_string());

        assert_eq!(
            matrix.check_invariants(),
            Err(InvariantViolation::StaleAssetReference(Combination::from(["Red", "S"])))
        );
    }

    #[test]
    fn non_ascii_names_merge() {
        let mut matrix = VariantMatrix::new();
        matrix.add_option("Ärmel", ["Kurz"]).unwrap();
        let outcome = matrix.add_option("ärmel", ["Lang"]).unwrap();

        assert_eq!(
            outcome,
            MergeOutcome::Merged {
                position: 0,
                appended: vec!["Lang".to_string()],
            }
        );
        assert_eq!(matrix.options().len(), 1);
        assert_eq!(matrix.options()[0].values(), ["Kurz", "Lang"]);
    }

    #[test]
    fn non_ascii_dimension_owns_assets() {
        let mut matrix = VariantMatrix::new().with_dimension(DimensionKey::new("färg"));
        matrix.add_option("FÄRG", ["Röd", "Blå"]).unwrap();

        assert_eq!(matrix.dimension_position(), Some(0));
        assert_eq!(matrix.resolve_asset("Röd", "https://cdn/rod.png").unwrap(), 1);
    }

    #[test]
    fn resolved_asset_fans_out_to_sharing_variants() {
        let mut matrix = color_size();
        let touched = matrix.resolve_asset("Red", "https://cdn/red.png").unwrap();

        assert_eq!(touched, 2);
        for variant in matrix.variants() {
            let expected = (variant.combination.get(0) == Some("Red")).then_some("https://cdn/red.png");
            assert_eq!(variant.dimension_asset.as_deref(), expected);
        }
    }

    #[test]
    fn restore_reconciles_prior_records() {
        let mut prior = VariantRecord::stub(Combination::from(["Red", "S"]));
        prior.id = None;
        prior.sku = "SAVED".to_string();
        prior.dimension_asset = Some("https://cdn/red.png".to_string());

        let mut matrix = VariantMatrix::new();
        matrix
            .restore(
                vec![
                    ProductOption::new("Color", ["Red"]),
                    ProductOption::new("Size", ["S", "M"]),
                    ProductOption::new("color", ["Blue"]),
                ],
                vec![prior],
            )
            .unwrap();

        assert_eq!(matrix.options().len(), 2);
        assert_eq!(matrix.variants().len(), 4);
        assert_eq!(matrix.variant(&Combination::from(["Red", "S"])).unwrap().sku, "SAVED");
        assert_eq!(matrix.assets().reference("Red"), Some("https://cdn/red.png"));
        assert_eq!(
            matrix
                .variant(&Combination::from(["Red", "M"]))
                .and_then(|v| v.dimension_asset.as_deref()),
            Some("https://cdn/red.png")
        );
        matrix.check_invariants().unwrap();
    }

    #[test]
    fn apply_to_all_and_paging() {
        let mut matrix = color_size();
        assert_eq!(matrix.apply_to_all(&VariantPatch::new().with_inventory(5)), 4);
        assert!(matrix.variants().iter().all(|v| v.inventory == Some(5)));

        let page = matrix.page(1, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].combination, Combination::from(["Blue", "M"]));
    }
}
