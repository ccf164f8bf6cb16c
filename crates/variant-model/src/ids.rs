//! Identifiers for options and variant records

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique option identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OptionId(pub Ulid);

impl OptionId {
    /// Generate new option ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for OptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Variant identifier
///
/// Only stub records synthesized by reconciliation get one; records carried
/// over from a previous matrix keep whatever id they had.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VariantId(pub Ulid);

impl VariantId {
    /// Generate new variant ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for VariantId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VariantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
