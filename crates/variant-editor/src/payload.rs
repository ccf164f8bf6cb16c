//! Product draft and the compiled persistence payload

use serde::{Deserialize, Serialize};
use variant_model::{Combination, VariantId, VariantRecord};

/// Non-variant product fields edited alongside the matrix
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDraft {
    /// Product title, required
    pub title: String,
    /// Free-text description
    pub description: String,
    /// Brand id from the brand lookup
    pub brand_id: Option<String>,
    /// Taxonomy node id
    pub category_id: Option<String>,
}

impl ProductDraft {
    /// Draft with a title
    #[inline]
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Payload handed to the persistence service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    /// Non-variant fields
    pub product: ProductDraft,
    /// One entry per visible combination, in matrix order
    pub variants: Vec<VariantPayload>,
    /// Attribute/value id pairs for every option value with a directory match
    pub attributes: Vec<AttributePayload>,
}

/// One variant in the payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantPayload {
    /// Record id, if already assigned
    pub id: Option<VariantId>,
    /// One value per option
    pub combination: Combination,
    /// Price, if entered
    pub price: Option<f64>,
    /// Stock keeping unit
    pub sku: String,
    /// Units on hand
    pub inventory: Option<u32>,
    /// Barcode text
    pub barcode: String,
    /// Listed for sale
    pub available: bool,
    /// Resolved dimension asset reference, empty when none
    pub image_url: String,
}

impl VariantPayload {
    pub(crate) fn from_record(record: &VariantRecord, image_url: String) -> Self {
        Self {
            id: record.id,
            combination: record.combination.clone(),
            price: record.price,
            sku: record.sku.clone(),
            inventory: record.inventory,
            barcode: record.barcode.clone(),
            available: record.available,
            image_url,
        }
    }
}

/// Attribute assignment in the payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributePayload {
    /// Directory attribute id
    pub attribute_id: String,
    /// Directory value id
    pub attribute_value_id: String,
}

/// Non-fatal issue found while compiling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmissionWarning {
    /// Option value with no directory record; left out of the payload
    UnmatchedAttribute {
        /// Option name
        option: String,
        /// Value with no directory record
        value: String,
    },
}

impl std::fmt::Display for SubmissionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnmatchedAttribute { option, value } => {
                write!(f, "{option}: '{value}' has no attribute record and was not saved")
            }
        }
    }
}
