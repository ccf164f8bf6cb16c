//! Variant Editor
//!
//! Session layer over the variant matrix: the operator-facing edits, the
//! attribute directory, and the submission pipeline that uploads dimension
//! assets and persists the product.
//!
//! # Core Concepts
//!
//! - **EditorSession**: One product being created or edited
//! - **SubmissionCompiler**: Validates, uploads once per dimension value and
//!   builds the persistence payload
//! - **Collaborators**: Attribute directory, asset storage and product store
//!   behind async traits
//! - **EditorConfig**: YAML-loadable settings (distinguished option, bounds,
//!   paging)
//!
//! # Example
//!
//! ```rust,ignore
//! use variant_editor::prelude::*;
//!
//! let mut session = EditorSession::open(EditorConfig::default(), &directory).await?;
//! session.set_title("Classic Tee");
//! session.add_option("Color", &["Red", "Blue"])?;
//! session.add_option("Size", &["S", "M"])?;
//! session.exclude(&Combination::from(["Blue", "M"]))?;
//! session.set_asset("Red", LocalFile::new("red.png", bytes))?;
//!
//! let receipt = session.submit(&storage, &store).await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod collaborators;
pub mod compiler;
pub mod config;
pub mod error;
pub mod manifest;
pub mod payload;
pub mod session;

pub use collaborators::{
    AssetStorage, AttributeDirectory, ProductReceipt, ProductStore, UploadContext, UploadedAsset,
};
pub use compiler::{validate, CompiledSubmission, SubmissionCompiler};
pub use config::EditorConfig;
pub use error::{CollaboratorError, ConfigError, EditorError, ValidationError};
pub use manifest::{MatrixManifest, ManifestOption};
pub use payload::{
    AttributePayload, ProductDraft, ProductPayload, SubmissionWarning, VariantPayload,
};
pub use session::{EditorSession, SubmissionReceipt};

/// Commonly used types
pub mod prelude {
    pub use crate::{
        AssetStorage, AttributeDirectory, EditorConfig, EditorError, EditorSession,
        ProductDraft, ProductStore, SubmissionReceipt,
    };
    pub use variant_matrix::VariantMatrix;
    pub use variant_model::{Combination, LocalFile, VariantPatch};
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
