//! External collaborators
//!
//! The editor talks to three services through narrow async interfaces:
//! the attribute directory, the asset storage service and the product
//! persistence service. Their internals are not the editor's concern.

use crate::error::CollaboratorError;
use crate::payload::ProductPayload;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use variant_model::{Attribute, LocalFile};

/// Keys sent alongside an upload so storage can file the asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadContext {
    /// Title of the product being saved
    pub product_title: String,
    /// Distinguished option name as entered
    pub option: String,
    /// Dimension value the file belongs to
    pub value: String,
}

/// Storage response for a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAsset {
    /// Reference to store on the variants
    pub resource_url: String,
}

/// Persistence response for a created product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductReceipt {
    /// Identifier assigned by the service
    pub product_id: String,
}

/// Catalog attribute directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttributeDirectory: Send + Sync {
    /// List every attribute with its values
    async fn list(&self) -> Result<Vec<Attribute>, CollaboratorError>;
}

/// Asset storage service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetStorage: Send + Sync {
    /// Upload one file and return its resource reference
    async fn upload(
        &self,
        file: &LocalFile,
        context: &UploadContext,
    ) -> Result<UploadedAsset, CollaboratorError>;
}

/// Product persistence service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Create a product with its variants in one request
    async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<ProductReceipt, CollaboratorError>;
}
