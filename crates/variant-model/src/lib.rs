//! Variant Model
//!
//! Plain, serializable records shared by the variant matrix engine and the
//! product editing session.
//!
//! # Core Concepts
//!
//! - [`ProductOption`]: A named, ordered list of distinct values (Color → Red, Blue)
//! - [`Combination`]: One value per option, compared positionally
//! - [`VariantRecord`]: Operator-entered data for one sellable combination
//! - [`DimensionAsset`]: Image attached to one value of the distinguished option
//! - [`Attribute`]: Directory record used to translate options into persistence ids
//!
//! # Example
//!
//! ```rust,ignore
//! use variant_model::{Combination, ProductOption, VariantRecord};
//!
//! let color = ProductOption::new("Color", ["Red", "Blue"]);
//! let combo = Combination::from(["Red", "S"]);
//! let stub = VariantRecord::stub(combo);
//! assert!(stub.available);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod asset;
mod attribute;
mod combination;
mod ids;
mod option;
mod variant;

pub use asset::{DimensionAsset, LocalFile};
pub use attribute::{Attribute, AttributeValue};
pub use combination::Combination;
pub use ids::{OptionId, VariantId};
pub use option::{names_match, normalize_value, ProductOption};
pub use variant::{VariantPatch, VariantRecord};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
