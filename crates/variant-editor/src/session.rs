//! Editor session
//!
//! One product being created or edited: the draft fields, the variant
//! matrix and the attribute directory loaded when the session opened.
//! Every operator action goes through here.

use crate::collaborators::{AssetStorage, AttributeDirectory, ProductReceipt, ProductStore};
use crate::compiler::{validate, SubmissionCompiler};
use crate::config::EditorConfig;
use crate::error::{EditorError, ValidationError};
use crate::payload::{ProductDraft, SubmissionWarning};
use variant_matrix::{ExclusionReport, MergeOutcome, Page, SettleReport, VariantMatrix};
use variant_model::{
    Attribute, Combination, DimensionAsset, LocalFile, ProductOption, VariantPatch, VariantRecord,
};

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Persistence service response
    pub product: ProductReceipt,
    /// Non-fatal issues found while compiling
    pub warnings: Vec<SubmissionWarning>,
    /// Uploads performed during this submission
    pub uploads: usize,
}

/// Editing session for one product
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    draft: ProductDraft,
    matrix: VariantMatrix,
    attributes: Vec<Attribute>,
}

impl EditorSession {
    /// Open a session, loading the attribute directory once
    ///
    /// # Errors
    /// `Directory` when the directory cannot be listed
    pub async fn open(
        config: EditorConfig,
        directory: &dyn AttributeDirectory,
    ) -> Result<Self, EditorError> {
        config.validate()?;
        let attributes = directory.list().await.map_err(|e| {
            tracing::error!("Attribute directory failed: {}", e);
            EditorError::Directory(e)
        })?;
        tracing::info!("Loaded {} attributes", attributes.len());
        Ok(Self::with_attributes(config, attributes))
    }

    /// Session over an already-loaded attribute list
    #[must_use]
    pub fn with_attributes(config: EditorConfig, attributes: Vec<Attribute>) -> Self {
        let matrix = config.new_matrix();
        Self {
            config,
            draft: ProductDraft::default(),
            matrix,
            attributes,
        }
    }

    /// Load a saved product for editing
    pub fn load_product(
        &mut self,
        draft: ProductDraft,
        options: Vec<ProductOption>,
        variants: Vec<VariantRecord>,
    ) -> Result<SettleReport, EditorError> {
        let report = self.matrix.restore(options, variants)?;
        self.draft = draft;
        tracing::info!(
            "Loaded '{}' with {} options and {} variants",
            self.draft.title,
            self.matrix.options().len(),
            report.visible
        );
        Ok(report)
    }

    /// Settings the session was opened with
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Non-variant product fields
    #[inline]
    #[must_use]
    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    /// Mutable access to the non-variant fields
    #[inline]
    pub fn draft_mut(&mut self) -> &mut ProductDraft {
        &mut self.draft
    }

    /// Set the product title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    /// Options, exclusions, variants and assets
    #[inline]
    #[must_use]
    pub fn matrix(&self) -> &VariantMatrix {
        &self.matrix
    }

    /// Attribute directory loaded at open
    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Directory values for an option name, if the directory knows it
    #[must_use]
    pub fn suggested_values(&self, option: &str) -> Vec<String> {
        self.attributes
            .iter()
            .find(|a| a.matches_name(option))
            .map(|a| a.value_names().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Add an option
    ///
    /// With no non-blank values and seeding enabled, the values come from
    /// the directory attribute of the same name.
    pub fn add_option<S: AsRef<str>>(
        &mut self,
        name: &str,
        values: &[S],
    ) -> Result<MergeOutcome, EditorError> {
        let given = values.iter().any(|v| !v.as_ref().trim().is_empty());
        if !given && self.config.seed_from_directory {
            let seeded = self.suggested_values(name);
            if !seeded.is_empty() {
                tracing::debug!("Seeding '{}' with {} directory values", name, seeded.len());
                return Ok(self.matrix.add_option(name, &seeded)?);
            }
        }
        Ok(self.matrix.add_option(name, values)?)
    }

    /// Append a value to an option
    pub fn add_value(&mut self, position: usize, value: &str) -> Result<bool, EditorError> {
        Ok(self.matrix.add_value(position, value)?)
    }

    /// Remove a value from an option
    pub fn remove_value(&mut self, position: usize, value: &str) -> Result<(), EditorError> {
        Ok(self.matrix.remove_value(position, value)?)
    }

    /// Rename an option
    pub fn rename_option(&mut self, position: usize, name: &str) -> Result<(), EditorError> {
        Ok(self.matrix.rename_option(position, name)?)
    }

    /// Remove an option
    pub fn remove_option(&mut self, position: usize) -> Result<ProductOption, EditorError> {
        Ok(self.matrix.remove_option(position)?)
    }

    /// Exclude a combination
    pub fn exclude(&mut self, combination: &Combination) -> Result<ExclusionReport, EditorError> {
        Ok(self.matrix.exclude(combination)?)
    }

    /// Attach a local file to a dimension value
    pub fn set_asset(
        &mut self,
        value: &str,
        file: LocalFile,
    ) -> Result<Option<DimensionAsset>, EditorError> {
        Ok(self.matrix.set_asset(value, file)?)
    }

    /// Remove the asset of a dimension value
    pub fn clear_asset(&mut self, value: &str) -> Option<DimensionAsset> {
        self.matrix.clear_asset(value)
    }

    /// Edit one variant
    pub fn update_variant(
        &mut self,
        combination: &Combination,
        patch: &VariantPatch,
    ) -> Result<(), EditorError> {
        Ok(self.matrix.update_variant(combination, patch)?)
    }

    /// Apply an edit to every visible variant
    pub fn apply_to_all(&mut self, patch: &VariantPatch) -> usize {
        self.matrix.apply_to_all(patch)
    }

    /// One page of the variant table using the configured page size
    #[must_use]
    pub fn page(&self, page: usize) -> Page<'_, VariantRecord> {
        self.matrix.page(page, self.config.page_size)
    }

    /// Check the draft without submitting
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(&self.draft, &self.matrix)
    }

    /// Upload pending assets and persist the product
    ///
    /// On success the session is reset. On failure the state is kept:
    /// resolved uploads stay resolved and the operator can retry.
    pub async fn submit(
        &mut self,
        storage: &dyn AssetStorage,
        store: &dyn ProductStore,
    ) -> Result<SubmissionReceipt, EditorError> {
        let compiled = SubmissionCompiler::new(&self.attributes, storage)
            .compile(&self.draft, &mut self.matrix)
            .await?;
        for warning in &compiled.warnings {
            tracing::warn!("{}", warning);
        }

        let product = store.create_product(&compiled.payload).await.map_err(|e| {
            tracing::error!("Saving '{}' failed: {}", self.draft.title, e);
            EditorError::Persistence(e)
        })?;

        tracing::info!(
            "Saved '{}' as {} with {} variants",
            self.draft.title,
            product.product_id,
            compiled.payload.variants.len()
        );
        self.reset();

        Ok(SubmissionReceipt {
            product,
            warnings: compiled.warnings,
            uploads: compiled.uploaded,
        })
    }

    /// Clear the draft and the matrix, keeping configuration and directory
    pub fn reset(&mut self) {
        self.draft = ProductDraft::default();
        self.matrix.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{MockAssetStorage, MockAttributeDirectory, MockProductStore};
    use crate::error::CollaboratorError;
    use variant_model::AttributeValue;

    fn size_attribute() -> Attribute {
        Attribute {
            id: "attr-size".to_string(),
            name: "size".to_string(),
            display: "Size".to_string(),
            values: ["S", "M", "L"]
                .iter()
                .map(|v| AttributeValue {
                    id: format!("size-{}", v.to_lowercase()),
                    value: (*v).to_string(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn open_loads_directory() {
        let mut directory = MockAttributeDirectory::new();
        directory
            .expect_list()
            .times(1)
            .returning(|| Ok(vec![size_attribute()]));

        let session = EditorSession::open(EditorConfig::default(), &directory)
            .await
            .unwrap();
        assert_eq!(session.attributes().len(), 1);
        assert!(session.matrix().options().is_empty());
    }

    #[tokio::test]
    async fn open_surfaces_directory_failure() {
        let mut directory = MockAttributeDirectory::new();
        directory
            .expect_list()
            .returning(|| Err(CollaboratorError::Unavailable("timeout".to_string())));

        let err = EditorSession::open(EditorConfig::default(), &directory)
            .await
            .unwrap_err();
        assert!(matches!(err, EditorError::Directory(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn blank_values_seed_from_directory() {
        let mut session =
            EditorSession::with_attributes(EditorConfig::default(), vec![size_attribute()]);
        session.add_option("Size", &[" "]).unwrap();

        assert_eq!(session.matrix().options()[0].values(), ["S", "M", "L"]);
    }

    #[test]
    fn seeding_can_be_disabled() {
        let config = EditorConfig::default().with_seed_from_directory(false);
        let mut session = EditorSession::with_attributes(config, vec![size_attribute()]);

        let err = session.add_option::<&str>("Size", &[]).unwrap_err();
        assert!(matches!(err, EditorError::Matrix(_)));
    }

    #[test]
    fn page_uses_configured_size() {
        let config = EditorConfig::default().with_page_size(3);
        let mut session = EditorSession::with_attributes(config, Vec::new());
        session.add_option("Color", &["Red", "Blue"]).unwrap();
        session.add_option("Size", &["S", "M"]).unwrap();

        let page = session.page(1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn persistence_failure_keeps_state() {
        let mut session = EditorSession::with_attributes(EditorConfig::default(), Vec::new());
        session.set_title("Tee");
        session.add_option("Color", &["Red"]).unwrap();

        let storage = MockAssetStorage::new();
        let mut store = MockProductStore::new();
        store
            .expect_create_product()
            .returning(|_| Err(CollaboratorError::Rejected("SKU already exists".to_string())));

        let err = session.submit(&storage, &store).await.unwrap_err();
        assert_eq!(err.to_string(), "save failed: SKU already exists");
        assert_eq!(session.draft().title, "Tee");
        assert_eq!(session.matrix().variants().len(), 1);
    }

    #[tokio::test]
    async fn success_resets_session() {
        let mut session = EditorSession::with_attributes(EditorConfig::default(), Vec::new());
        session.set_title("Tee");
        session.add_option("Color", &["Red", "Blue"]).unwrap();

        let storage = MockAssetStorage::new();
        let mut store = MockProductStore::new();
        store
            .expect_create_product()
            .withf(|payload| payload.variants.len() == 2)
            .times(1)
            .returning(|_| {
                Ok(ProductReceipt {
                    product_id: "p-1".to_string(),
                })
            });

        let receipt = session.submit(&storage, &store).await.unwrap();
        assert_eq!(receipt.product.product_id, "p-1");
        assert_eq!(receipt.warnings.len(), 2);
        assert!(session.draft().title.is_empty());
        assert!(session.matrix().options().is_empty());
    }
}
