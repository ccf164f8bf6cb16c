//! Testing utilities for the variant matrix workspace
//!
//! In-memory collaborators, catalog fixtures and session builders.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use variant_editor::{
    AssetStorage, AttributeDirectory, CollaboratorError, EditorConfig, EditorSession,
    ProductPayload, ProductReceipt, ProductStore, UploadContext, UploadedAsset,
};
use variant_model::{Attribute, AttributeValue, LocalFile};

fn attribute(id: &str, name: &str, display: &str, values: &[&str]) -> Attribute {
    Attribute {
        id: id.to_string(),
        name: name.to_string(),
        display: display.to_string(),
        values: values
            .iter()
            .map(|v| AttributeValue {
                id: format!("{}-{}", id, v.to_lowercase()),
                value: (*v).to_string(),
            })
            .collect(),
    }
}

/// Color and size attributes as the catalog directory returns them
pub fn catalog_attributes() -> Vec<Attribute> {
    vec![
        attribute("color", "color", "Color", &["Red", "Blue", "Green"]),
        attribute("size", "size", "Size", &["S", "M", "L"]),
    ]
}

pub fn png(name: &str) -> LocalFile {
    LocalFile::new(name, vec![0x89, b'P', b'N', b'G']).with_content_type("image/png")
}

/// Session titled "Classic Tee" with Color {Red, Blue} and Size {S, M}
pub fn color_size_session() -> EditorSession {
    let mut session = EditorSession::with_attributes(EditorConfig::default(), catalog_attributes());
    session.set_title("Classic Tee");
    session.add_option("Color", &["Red", "Blue"]).unwrap();
    session.add_option("Size", &["S", "M"]).unwrap();
    session
}

/// Directory returning a fixed attribute list
#[derive(Debug, Default)]
pub struct StaticDirectory {
    attributes: Vec<Attribute>,
    unavailable: bool,
}

impl StaticDirectory {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self {
            attributes,
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            attributes: Vec::new(),
            unavailable: true,
        }
    }
}

#[async_trait]
impl AttributeDirectory for StaticDirectory {
    async fn list(&self) -> Result<Vec<Attribute>, CollaboratorError> {
        if self.unavailable {
            return Err(CollaboratorError::Unavailable("directory offline".to_string()));
        }
        Ok(self.attributes.clone())
    }
}

/// Storage that records every upload and can be told to fail for values
#[derive(Debug, Default)]
pub struct RecordingStorage {
    uploads: Mutex<Vec<UploadContext>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail uploads for `value` until [`RecordingStorage::recover`] is called
    pub fn fail_on(&self, value: &str) {
        self.failing.lock().insert(value.to_string());
    }

    pub fn recover(&self) {
        self.failing.lock().clear();
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().len()
    }

    /// Values uploaded so far, in order
    pub fn uploaded_values(&self) -> Vec<String> {
        self.uploads.lock().iter().map(|c| c.value.clone()).collect()
    }

    pub fn url_for(value: &str, file_name: &str) -> String {
        format!("https://assets.test/{value}/{file_name}")
    }
}

#[async_trait]
impl AssetStorage for RecordingStorage {
    async fn upload(
        &self,
        file: &LocalFile,
        context: &UploadContext,
    ) -> Result<UploadedAsset, CollaboratorError> {
        if self.failing.lock().contains(&context.value) {
            return Err(CollaboratorError::Unavailable(format!(
                "upload of {} timed out",
                file.file_name
            )));
        }
        self.uploads.lock().push(context.clone());
        Ok(UploadedAsset {
            resource_url: Self::url_for(&context.value, &file.file_name),
        })
    }
}

/// Product store that keeps every payload it accepts
#[derive(Debug, Default)]
pub struct RecordingStore {
    payloads: Mutex<Vec<ProductPayload>>,
    rejection: Option<String>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects every request with `message`
    pub fn rejecting(message: &str) -> Self {
        Self {
            payloads: Mutex::new(Vec::new()),
            rejection: Some(message.to_string()),
        }
    }

    pub fn payloads(&self) -> Vec<ProductPayload> {
        self.payloads.lock().clone()
    }

    pub fn last_payload(&self) -> Option<ProductPayload> {
        self.payloads.lock().last().cloned()
    }
}

#[async_trait]
impl ProductStore for RecordingStore {
    async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<ProductReceipt, CollaboratorError> {
        if let Some(message) = &self.rejection {
            return Err(CollaboratorError::Rejected(message.clone()));
        }
        let mut payloads = self.payloads.lock();
        payloads.push(payload.clone());
        Ok(ProductReceipt {
            product_id: format!("product-{}", payloads.len()),
        })
    }
}
