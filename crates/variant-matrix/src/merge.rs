//! Option merge policy
//!
//! Selecting an option name that already exists (case-insensitively) unions
//! the new values into the existing option instead of adding a second one.
//! Existing values keep their order and the option keeps its position.

use variant_model::ProductOption;

/// What [`merge_option`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// New option appended at `position`
    Created {
        /// Position of the new option
        position: usize,
    },
    /// Values unioned into an existing option
    Merged {
        /// Position of the existing option
        position: usize,
        /// Values that were not already present
        appended: Vec<String>,
    },
}

impl MergeOutcome {
    /// Position of the affected option
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Self::Created { position } | Self::Merged { position, .. } => *position,
        }
    }
}

/// Add an option or merge it into an existing one of the same name
pub fn merge_option<I, S>(options: &mut Vec<ProductOption>, name: &str, values: I) -> MergeOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    match options.iter().position(|o| o.name_matches(name)) {
        Some(position) => {
            let appended = options[position].merge_values(values);
            MergeOutcome::Merged { position, appended }
        }
        None => {
            options.push(ProductOption::new(name, values));
            MergeOutcome::Created {
                position: options.len() - 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_name_creates_option() {
        let mut options = vec![ProductOption::new("Color", ["Red"])];
        let outcome = merge_option(&mut options, "Size", ["S", "M"]);

        assert_eq!(outcome, MergeOutcome::Created { position: 1 });
        assert_eq!(options[1].values(), ["S", "M"]);
    }

    #[test]
    fn existing_name_unions_values() {
        let mut options = vec![
            ProductOption::new("Color", ["Red", "Blue"]),
            ProductOption::new("Size", ["S"]),
        ];
        let id = options[0].id;
        let outcome = merge_option(&mut options, "color", ["Blue", "Green"]);

        assert_eq!(
            outcome,
            MergeOutcome::Merged {
                position: 0,
                appended: vec!["Green".to_string()],
            }
        );
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].id, id);
        assert_eq!(options[0].name, "Color");
        assert_eq!(options[0].values(), ["Red", "Blue", "Green"]);
    }
}
