//! Variant Matrix Engine
//!
//! Turns a small set of named options into the sellable variant
//! combinations of a product and keeps everything derived from them
//! consistent while the operator edits.
//!
//! # Core Concepts
//!
//! - [`generate`]: Cartesian product of option values, in stable order
//! - [`ExclusionLedger`]: Combinations removed by the operator
//! - [`prune`]: Drop option values no visible combination uses
//! - [`DimensionAssetStore`]: One asset per value of the distinguished option
//! - [`reconcile`]: Carry variant records across structural edits
//! - [`VariantMatrix`]: Session state applying all of the above atomically
//!
//! # Example
//!
//! ```rust,ignore
//! use variant_matrix::VariantMatrix;
//! use variant_model::Combination;
//!
//! let mut matrix = VariantMatrix::new();
//! matrix.add_option("Color", ["Red", "Blue"])?;
//! matrix.add_option("Size", ["S", "M"])?;
//!
//! matrix.exclude(&Combination::from(["Blue", "M"]))?;
//! matrix.exclude(&Combination::from(["Blue", "S"]))?;
//!
//! // Blue no longer appears anywhere, so it was pruned
//! assert_eq!(matrix.options()[0].values(), ["Red"]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod assets;
mod dimension;
mod error;
mod exclusion;
mod generator;
mod matrix;
mod merge;
mod page;
mod pruner;
mod reconcile;

// Re-exports
pub use assets::DimensionAssetStore;
pub use dimension::{DimensionKey, DEFAULT_DIMENSION};
pub use error::{InvariantViolation, MatrixError};
pub use exclusion::{visible, ExclusionLedger};
pub use generator::{full_set_size, generate};
pub use matrix::{ExclusionReport, SettleReport, VariantMatrix, DEFAULT_MAX_COMBINATIONS};
pub use merge::{merge_option, MergeOutcome};
pub use page::{paginate, Page};
pub use pruner::{prune, PruneReport, PrunedValue};
pub use reconcile::{reconcile, Reconciliation};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
