//! Error types for the variant matrix
//!
//! Every mutation on [`VariantMatrix`](crate::VariantMatrix) checks its
//! preconditions first; an `Err` means the matrix was left untouched.

use variant_model::Combination;

/// Rejected matrix mutation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// Option index out of range
    #[error("unknown option at position {0}")]
    UnknownOption(usize),

    /// Option name blank after trimming
    #[error("option name must not be blank")]
    BlankOptionName,

    /// Value blank after trimming
    #[error("option value must not be blank")]
    BlankValue,

    /// No usable values after filtering blanks
    #[error("option '{name}' has no values")]
    EmptyOption {
        /// Option name as entered
        name: String,
    },

    /// Rename collides with another option
    #[error("an option named '{0}' already exists")]
    DuplicateOptionName(String),

    /// Value not listed in the option
    #[error("option '{option}' has no value '{value}'")]
    UnknownValue {
        /// Option name
        option: String,
        /// Missing value
        value: String,
    },

    /// Removing the value would leave the option empty
    #[error("cannot remove the last value of option '{0}'; remove the option instead")]
    LastValue(String),

    /// Combination length differs from the option count
    #[error("combination has {actual} positions, expected {expected}")]
    CombinationShape {
        /// Number of options
        expected: usize,
        /// Positions in the offending combination
        actual: usize,
    },

    /// Combination is not part of the current full set
    #[error("combination {0} is not part of the matrix")]
    NotInMatrix(Combination),

    /// No variant record for the combination
    #[error("no variant for combination {0}")]
    UnknownVariant(Combination),

    /// Distinguished option missing from the option set
    #[error("no '{0}' option to attach assets to")]
    NoDimension(String),

    /// Full set would exceed the configured bound
    #[error("{count} combinations exceeds the limit of {limit}")]
    TooManyCombinations {
        /// Size the edit would produce (saturated on overflow)
        count: usize,
        /// Configured bound
        limit: usize,
    },
}

/// Broken matrix invariant, reported by
/// [`VariantMatrix::check_invariants`](crate::VariantMatrix::check_invariants)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// Generated full set does not match the product of option sizes
    #[error("full set has {actual} combinations, expected {expected}")]
    FullSetSize {
        /// Product of option value counts
        expected: usize,
        /// Combinations actually generated
        actual: usize,
    },

    /// A ledger entry still has a variant record
    #[error("excluded combination {0} is visible")]
    ExcludedVisible(Combination),

    /// Option value no visible combination uses
    #[error("value '{value}' of option '{option}' is not used by any visible combination")]
    UnreferencedValue {
        /// Option name
        option: String,
        /// Unused value
        value: String,
    },

    /// Stored asset keyed by a value the distinguished option lacks
    #[error("asset for '{0}' has no matching dimension value")]
    OrphanAsset(String),

    /// Variant record points at a different asset than the store holds
    #[error("variant {0} carries an asset reference the store does not hold")]
    StaleAssetReference(Combination),

    /// Visible combination without a record, or records out of order
    #[error("visible combination {0} has no variant record")]
    MissingVariant(Combination),

    /// Record for a combination outside the visible set
    #[error("variant record for {0} is outside the visible set")]
    StrayVariant(Combination),
}
