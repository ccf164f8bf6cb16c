//! Distinguished dimension
//!
//! One option carries per-value assets (an image per color). It is found by
//! name, compared case-insensitively against the configured key. This is
//! the only place that comparison happens.

use serde::{Deserialize, Serialize};
use variant_model::ProductOption;

/// Default name of the distinguished option
pub const DEFAULT_DIMENSION: &str = "color";

/// Name of the option whose values own dimension assets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionKey(String);

impl DimensionKey {
    /// Create key from an option name
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_string())
    }

    /// Key text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `option` is the distinguished one
    #[inline]
    #[must_use]
    pub fn matches(&self, option: &ProductOption) -> bool {
        option.name_matches(&self.0)
    }

    /// Position of the distinguished option, if present
    #[must_use]
    pub fn position(&self, options: &[ProductOption]) -> Option<usize> {
        options.iter().position(|o| self.matches(o))
    }

    /// The distinguished option, if present
    #[must_use]
    pub fn find<'a>(&self, options: &'a [ProductOption]) -> Option<&'a ProductOption> {
        options.iter().find(|o| self.matches(o))
    }
}

impl Default for DimensionKey {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl std::fmt::Display for DimensionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_color_regardless_of_case() {
        let options = vec![
            ProductOption::new("Size", ["S"]),
            ProductOption::new("COLOR", ["Red"]),
        ];
        let key = DimensionKey::default();
        assert_eq!(key.position(&options), Some(1));
        assert_eq!(key.find(&options).map(|o| o.name.as_str()), Some("COLOR"));
    }

    #[test]
    fn absent_dimension() {
        let options = vec![ProductOption::new("Size", ["S"])];
        assert_eq!(DimensionKey::default().position(&options), None);
    }

    #[test]
    fn custom_key() {
        let options = vec![ProductOption::new("Finish", ["Matte"])];
        assert_eq!(DimensionKey::new("finish").position(&options), Some(0));
    }

    #[test]
    fn non_ascii_key_ignores_case() {
        let options = vec![
            ProductOption::new("Storlek", ["S"]),
            ProductOption::new("FÄRG", ["Röd"]),
        ];
        assert_eq!(DimensionKey::new("färg").position(&options), Some(1));
    }
}
