//! Matrix manifests
//!
//! A YAML description of a product's options and exclusions, used by the
//! command-line tool to inspect a matrix without the editor front end.
//!
//! ```yaml
//! title: Classic Tee
//! config:
//!   dimension_option: Color
//! options:
//!   - name: Color
//!     values: [Red, Blue]
//!   - name: Size
//!     values: [S, M]
//! exclusions:
//!   - [Blue, M]
//! ```

use crate::config::EditorConfig;
use crate::error::{ConfigError, EditorError};
use crate::session::EditorSession;
use serde::{Deserialize, Serialize};
use std::path::Path;
use variant_model::Combination;

/// Option entry in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestOption {
    /// Option name
    pub name: String,
    /// Values in display order
    #[serde(default)]
    pub values: Vec<String>,
}

/// Product options and exclusions loaded from YAML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixManifest {
    /// Product title
    pub title: String,
    /// Editor settings for the replay
    pub config: EditorConfig,
    /// Options added in order
    pub options: Vec<ManifestOption>,
    /// Combinations excluded after the options are in place
    pub exclusions: Vec<Combination>,
}

impl MatrixManifest {
    /// Parse a manifest
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let manifest: Self = serde_yaml::from_str(text)?;
        manifest.config.validate()?;
        Ok(manifest)
    }

    /// Load a manifest file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Replay the manifest into a fresh session
    ///
    /// Options are added in order, then exclusions are applied in order,
    /// exactly as an operator would enter them.
    pub fn into_session(self) -> Result<EditorSession, EditorError> {
        let mut session = EditorSession::with_attributes(self.config, Vec::new());
        session.set_title(self.title);
        for option in &self.options {
            session.add_option(&option.name, &option.values)?;
        }
        for combination in &self.exclusions {
            session.exclude(combination)?;
        }
        Ok(session)
    }
}
