//! Combinations
//!
//! A [`Combination`] is an ordered tuple with one value per option. Two
//! combinations are equal iff they have the same length and every position
//! holds an equal value.

use serde::{Deserialize, Serialize};

/// Ordered tuple of option values
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Combination(Vec<String>);

impl Combination {
    /// Create combination from owned values
    #[inline]
    #[must_use]
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    /// Number of positions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the zero-length tuple
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value at position
    #[inline]
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&str> {
        self.0.get(position).map(String::as_str)
    }

    /// All values in position order
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.0
    }

    /// Iterate values in position order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Consume into the underlying values
    #[inline]
    #[must_use]
    pub fn into_values(self) -> Vec<String> {
        self.0
    }
}

impl std::fmt::Display for Combination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

impl From<Vec<String>> for Combination {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[&str; N]> for Combination {
    fn from(values: [&str; N]) -> Self {
        Self(values.iter().map(|v| (*v).to_string()).collect())
    }
}

impl<S: Into<String>> FromIterator<S> for Combination {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_equality() {
        assert_eq!(Combination::from(["Red", "S"]), Combination::from(["Red", "S"]));
        assert_ne!(Combination::from(["Red", "S"]), Combination::from(["S", "Red"]));
        assert_ne!(Combination::from(["Red"]), Combination::from(["Red", "S"]));
    }

    #[test]
    fn values_containing_separator_text_stay_distinct() {
        let a = Combination::from(["a/b", "c"]);
        let b = Combination::from(["a", "b/c"]);
        assert_ne!(a, b);
    }

    #[test]
    fn display_is_tuple_like() {
        assert_eq!(Combination::from(["Red", "S"]).to_string(), "(Red, S)");
    }

    #[test]
    fn serializes_as_plain_array() {
        let json = serde_json::to_string(&Combination::from(["Red", "S"])).unwrap();
        assert_eq!(json, r#"["Red","S"]"#);
    }
}
