//! Variant records
//!
//! A variant record holds what the operator entered for one sellable
//! combination. It is keyed logically by its combination.

use crate::combination::Combination;
use crate::ids::VariantId;
use serde::{Deserialize, Serialize};

/// Operator-entered data for one combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRecord {
    /// Assigned only to stubs; carried-over records keep their prior id
    pub id: Option<VariantId>,
    /// Combination this record describes
    pub combination: Combination,
    /// Unit price
    pub price: Option<f64>,
    /// Stock keeping unit
    pub sku: String,
    /// Units in stock
    pub inventory: Option<u32>,
    /// Barcode (EAN/UPC)
    pub barcode: String,
    /// Whether the variant can be sold
    pub available: bool,
    /// Resolved dimension asset reference, filled at submission
    pub dimension_asset: Option<String>,
}

impl VariantRecord {
    /// Default record for a combination with no prior match
    #[must_use]
    pub fn stub(combination: Combination) -> Self {
        Self {
            id: Some(VariantId::new()),
            combination,
            price: None,
            sku: String::new(),
            inventory: None,
            barcode: String::new(),
            available: true,
            dimension_asset: None,
        }
    }

    /// Apply a partial edit
    pub fn apply(&mut self, patch: &VariantPatch) {
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(sku) = &patch.sku {
            self.sku.clone_from(sku);
        }
        if let Some(inventory) = patch.inventory {
            self.inventory = inventory;
        }
        if let Some(barcode) = &patch.barcode {
            self.barcode.clone_from(barcode);
        }
        if let Some(available) = patch.available {
            self.available = available;
        }
    }
}

/// Partial edit of a variant record
///
/// `None` leaves a field untouched. For `price` and `inventory`,
/// `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantPatch {
    pub price: Option<Option<f64>>,
    pub sku: Option<String>,
    pub inventory: Option<Option<u32>>,
    pub barcode: Option<String>,
    pub available: Option<bool>,
}

impl VariantPatch {
    /// Empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set price
    #[inline]
    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(Some(price));
        self
    }

    /// Set SKU
    #[inline]
    #[must_use]
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Set inventory
    #[inline]
    #[must_use]
    pub fn with_inventory(mut self, inventory: u32) -> Self {
        self.inventory = Some(Some(inventory));
        self
    }

    /// Set barcode
    #[inline]
    #[must_use]
    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    /// Set availability
    #[inline]
    #[must_use]
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    /// True when the patch changes nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
