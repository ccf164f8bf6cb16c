//! Product options
//!
//! An option is a named, ordered list of distinct values. Value order is
//! display order only; combination identity is positional over options.

use crate::ids::OptionId;
use serde::{Deserialize, Serialize};

/// Trim a raw operator-entered value, rejecting blanks
#[inline]
#[must_use]
pub fn normalize_value(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Compare two operator-entered names, ignoring surrounding whitespace and
/// case (full Unicode lowercase, so "Ärmel" matches "ärmel")
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Named option with ordered, unique values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option identifier
    pub id: OptionId,
    /// Free-text name, compared case-insensitively
    pub name: String,
    /// Values in insertion order
    values: Vec<String>,
}

impl ProductOption {
    /// Create an option, dropping blank and duplicate values
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut option = Self {
            id: OptionId::new(),
            name: name.into().trim().to_string(),
            values: Vec::new(),
        };
        option.merge_values(values);
        option
    }

    /// Option values in display order
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Number of values
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the option has no values left
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Case-insensitive name comparison
    #[inline]
    #[must_use]
    pub fn name_matches(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }

    /// Check value membership
    #[inline]
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Position of a value
    #[inline]
    #[must_use]
    pub fn position(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    /// Append a value if it is non-blank and not already present
    ///
    /// Returns the normalized value when it was appended.
    pub fn push_value(&mut self, raw: &str) -> Option<String> {
        let value = normalize_value(raw)?;
        if self.contains(&value) {
            return None;
        }
        self.values.push(value.clone());
        Some(value)
    }

    /// Union values into this option, keeping existing order
    ///
    /// Returns the values that were actually appended.
    pub fn merge_values<I, S>(&mut self, values: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .filter_map(|v| self.push_value(v.as_ref()))
            .collect()
    }

    /// Remove a value, returning whether it was present
    pub fn remove_value(&mut self, value: &str) -> bool {
        match self.position(value) {
            Some(pos) => {
                self.values.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Keep only values accepted by `keep`, preserving relative order
    ///
    /// Returns the removed values in their original order.
    pub fn retain_values<F>(&mut self, mut keep: F) -> Vec<String>
    where
        F: FnMut(&str) -> bool,
    {
        let mut removed = Vec::new();
        self.values.retain(|v| {
            if keep(v) {
                true
            } else {
                removed.push(v.clone());
                false
            }
        });
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_filters_blank_and_duplicate_values() {
        let option = ProductOption::new("Size", ["S", " ", "M", "S", " L "]);
        assert_eq!(option.values(), ["S", "M", "L"]);
    }

    #[test]
    fn name_matches_ignores_case_and_padding() {
        let option = ProductOption::new("Color", ["Red"]);
        assert!(option.name_matches("color"));
        assert!(option.name_matches(" COLOR "));
        assert!(!option.name_matches("colour"));
    }

    #[test]
    fn name_matches_non_ascii_case() {
        let option = ProductOption::new("Ärmel", ["Kurz"]);
        assert!(option.name_matches("ärmel"));
        assert!(option.name_matches("ÄRMEL"));
        assert!(names_match("Größe", "GRÖßE"));
    }

    #[test]
    fn merge_appends_only_new_values() {
        let mut option = ProductOption::new("Color", ["Red", "Blue"]);
        let appended = option.merge_values(["Blue", "Green", "Red", "Black"]);
        assert_eq!(appended, ["Green", "Black"]);
        assert_eq!(option.values(), ["Red", "Blue", "Green", "Black"]);
    }

    #[test]
    fn retain_preserves_order_and_reports_removed() {
        let mut option = ProductOption::new("Size", ["S", "M", "L", "XL"]);
        let removed = option.retain_values(|v| v != "M" && v != "XL");
        assert_eq!(removed, ["M", "XL"]);
        assert_eq!(option.values(), ["S", "L"]);
    }

    #[test]
    fn remove_value_reports_presence() {
        let mut option = ProductOption::new("Size", ["S"]);
        assert!(option.remove_value("S"));
        assert!(!option.remove_value("S"));
        assert!(option.is_empty());
    }
}
