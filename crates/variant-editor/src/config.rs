//! Editor configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use variant_matrix::{DimensionKey, VariantMatrix, DEFAULT_DIMENSION, DEFAULT_MAX_COMBINATIONS};

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Name of the option that owns per-value assets (case-insensitive)
    pub dimension_option: String,
    /// Upper bound on the full set size
    pub max_combinations: usize,
    /// Default page size when listing variants
    pub page_size: usize,
    /// Seed a new option from the attribute directory when no values are given
    pub seed_from_directory: bool,
}

impl EditorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With distinguished option name
    #[inline]
    #[must_use]
    pub fn with_dimension_option(mut self, name: impl Into<String>) -> Self {
        self.dimension_option = name.into();
        self
    }

    /// With combination bound
    #[inline]
    #[must_use]
    pub fn with_max_combinations(mut self, max: usize) -> Self {
        self.max_combinations = max;
        self
    }

    /// With page size
    #[inline]
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// With directory seeding on or off
    #[inline]
    #[must_use]
    pub fn with_seed_from_directory(mut self, seed: bool) -> Self {
        self.seed_from_directory = seed;
        self
    }

    /// Parse configuration from YAML
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Check ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimension_option.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "dimension_option must not be blank".to_string(),
            ));
        }
        if self.max_combinations == 0 {
            return Err(ConfigError::Invalid(
                "max_combinations must be at least 1".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Empty matrix configured from these settings
    #[must_use]
    pub fn new_matrix(&self) -> VariantMatrix {
        VariantMatrix::new()
            .with_dimension(DimensionKey::new(&self.dimension_option))
            .with_max_combinations(self.max_combinations)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            dimension_option: DEFAULT_DIMENSION.to_string(),
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            page_size: 25,
            seed_from_directory: true,
        }
    }
}
