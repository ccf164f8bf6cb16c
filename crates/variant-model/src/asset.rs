//! Dimension assets

use serde::{Deserialize, Serialize};

/// Local file chosen by the operator, not yet uploaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFile {
    /// Original file name
    pub file_name: String,
    /// MIME type if known
    pub content_type: Option<String>,
    /// File contents
    #[serde(with = "bytes_len", default)]
    pub bytes: Vec<u8>,
}

impl LocalFile {
    /// Create local file
    #[inline]
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    /// With MIME type
    #[inline]
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Asset attached to one value of the distinguished option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "asset", rename_all = "snake_case")]
pub enum DimensionAsset {
    /// Not yet uploaded
    Pending(LocalFile),
    /// Uploaded; holds the resource reference
    Resolved(String),
}

impl DimensionAsset {
    /// Resolved reference, if uploaded
    #[inline]
    #[must_use]
    pub fn resolved(&self) -> Option<&str> {
        match self {
            Self::Resolved(url) => Some(url),
            Self::Pending(_) => None,
        }
    }

    /// True when an upload is still owed
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

/// Serialize file contents by length only; the bytes never leave the session
mod bytes_len {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(bytes.len() as u64)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let _len = u64::deserialize(d)?;
        Ok(Vec::new())
    }
}
