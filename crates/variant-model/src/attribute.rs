//! Attribute directory records

use crate::option::names_match;
use serde::{Deserialize, Serialize};

/// Attribute known to the catalog (e.g. "color")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: String,
    /// Machine name
    pub name: String,
    /// Operator-facing label
    pub display: String,
    pub values: Vec<AttributeValue>,
}

/// One value of an attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: String,
    pub value: String,
}

impl Attribute {
    /// Matches either the machine name or the display label, ignoring case
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        names_match(&self.name, name) || names_match(&self.display, name)
    }

    /// Look up a value record, ignoring case
    #[must_use]
    pub fn find_value(&self, value: &str) -> Option<&AttributeValue> {
        self.values
            .iter()
            .find(|v| names_match(&v.value, value))
    }

    /// Value strings in directory order
    pub fn value_names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|v| v.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color() -> Attribute {
        Attribute {
            id: "attr-1".to_string(),
            name: "color".to_string(),
            display: "Colour".to_string(),
            values: vec![AttributeValue {
                id: "val-1".to_string(),
                value: "Red".to_string(),
            }],
        }
    }

    #[test]
    fn matches_name_or_display() {
        let attr = color();
        assert!(attr.matches_name("Color"));
        assert!(attr.matches_name("colour"));
        assert!(!attr.matches_name("size"));
    }

    #[test]
    fn finds_value_case_insensitively() {
        let attr = color();
        assert_eq!(attr.find_value("red").map(|v| v.id.as_str()), Some("val-1"));
        assert!(attr.find_value("blue").is_none());
    }

    #[test]
    fn non_ascii_lookup_ignores_case() {
        let attr = Attribute {
            id: "attr-2".to_string(),
            name: "färg".to_string(),
            display: "Färg".to_string(),
            values: vec![AttributeValue {
                id: "val-2".to_string(),
                value: "Grön".to_string(),
            }],
        };
        assert!(attr.matches_name("FÄRG"));
        assert_eq!(attr.find_value("GRÖN").map(|v| v.id.as_str()), Some("val-2"));
    }
}
