//! Error types for the variant editor
//!
//! Provides error handling for:
//! - Rejected matrix edits
//! - Draft validation before submission
//! - Attribute directory, upload and persistence collaborator failures
//! - Configuration loading

use std::path::PathBuf;
use variant_matrix::MatrixError;

/// Main editor error type
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Operator edit rejected by the matrix
    #[error("invalid edit: {0}")]
    Matrix(#[from] MatrixError),

    /// Submission blocked by validation
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Attribute directory could not be loaded
    #[error("attribute directory unavailable: {0}")]
    Directory(#[source] CollaboratorError),

    /// Upload of one dimension asset failed; earlier uploads stay resolved
    #[error("upload failed for '{value}': {source}")]
    Upload {
        /// Dimension value whose asset failed
        value: String,
        /// Underlying storage error
        #[source]
        source: CollaboratorError,
    },

    /// Persistence call failed; session state is kept for retry
    #[error("save failed: {0}")]
    Persistence(#[source] CollaboratorError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl EditorError {
    /// Check if retrying the same action can succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Directory(e) | Self::Upload { source: e, .. } | Self::Persistence(e) => {
                e.is_transient()
            }
            Self::Matrix(_) | Self::Validation(_) | Self::Config(_) => false,
        }
    }
}

/// Draft validation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Title blank
    #[error("product title is required")]
    MissingTitle,

    /// Option pruned down to zero values
    #[error("option '{0}' has no values left")]
    EmptyOption(String),

    /// Nothing to sell
    #[error("product has no visible variants")]
    NoVariants,

    /// Price negative or not a number
    #[error("variant {0} has an invalid price")]
    InvalidPrice(String),
}

/// Failure reported by an external collaborator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    /// Service unreachable or timed out
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Service answered with an error; message is passed through verbatim
    #[error("{0}")]
    Rejected(String),
}

impl CollaboratorError {
    /// Whether the failure is worth retrying as-is
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// YAML did not parse
    #[error("invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Value out of range
    #[error("invalid setting: {0}")]
    Invalid(String),
}
