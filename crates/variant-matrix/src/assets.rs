//! Dimension asset store
//!
//! One asset per value of the distinguished option. Entries are either a
//! local file awaiting upload or a resolved resource reference; only the
//! submission step turns the former into the latter.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use variant_model::{DimensionAsset, LocalFile, ProductOption};

/// Assets keyed by dimension value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionAssetStore {
    assets: IndexMap<String, DimensionAsset>,
}

impl DimensionAssetStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a local file, replacing whatever was there
    pub fn set(&mut self, value: impl Into<String>, file: LocalFile) -> Option<DimensionAsset> {
        self.assets
            .insert(value.into(), DimensionAsset::Pending(file))
    }

    /// Record an uploaded (or previously saved) reference
    pub fn resolve(&mut self, value: impl Into<String>, reference: impl Into<String>) {
        self.assets
            .insert(value.into(), DimensionAsset::Resolved(reference.into()));
    }

    /// Drop the asset for a value
    pub fn clear(&mut self, value: &str) -> Option<DimensionAsset> {
        self.assets.shift_remove(value)
    }

    /// Asset for a value
    #[inline]
    #[must_use]
    pub fn get(&self, value: &str) -> Option<&DimensionAsset> {
        self.assets.get(value)
    }

    /// Resolved reference for a value, if uploaded
    #[inline]
    #[must_use]
    pub fn reference(&self, value: &str) -> Option<&str> {
        self.get(value).and_then(DimensionAsset::resolved)
    }

    /// Number of stored assets
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// True when empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Stored values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.assets.keys().map(String::as_str)
    }

    /// Clear every asset whose value the distinguished option no longer lists
    ///
    /// Without a distinguished option nothing can own an asset, so the store
    /// is emptied. Returns the cleared values.
    pub fn retain_present(&mut self, dimension: Option<&ProductOption>) -> Vec<String> {
        let mut cleared = Vec::new();
        self.assets.retain(|value, _| {
            let keep = dimension.is_some_and(|option| option.contains(value));
            if !keep {
                cleared.push(value.clone());
            }
            keep
        });
        cleared
    }

    /// Remove everything
    #[inline]
    pub fn clear_all(&mut self) {
        self.assets.clear();
    }
}
