//! Submission compiler
//!
//! Turns the session state into the persistence payload:
//! 1. Validate the draft (no state is touched on failure)
//! 2. Recompute the visible set; excluded combinations are never submitted
//! 3. Collect the distinct values of the distinguished option across the
//!    visible set
//! 4. Upload each pending asset once per value, sequentially, and fan the
//!    resulting reference out to every variant sharing the value
//! 5. Build variant entries from the records
//! 6. Map option values to attribute ids, reporting pairs with no match
//!
//! An upload failure stops the compile. Values uploaded before the failure
//! keep their resolved reference, so the next attempt skips them.

use crate::collaborators::{AssetStorage, UploadContext};
use crate::error::{EditorError, ValidationError};
use crate::payload::{
    AttributePayload, ProductDraft, ProductPayload, SubmissionWarning, VariantPayload,
};
use indexmap::IndexSet;
use variant_matrix::VariantMatrix;
use variant_model::{Attribute, DimensionAsset, VariantRecord};

/// Compiled payload plus what it took to build it
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSubmission {
    /// Payload ready for the persistence service
    pub payload: ProductPayload,
    /// Option/value pairs left out of the attribute list
    pub warnings: Vec<SubmissionWarning>,
    /// Uploads performed by this compile
    pub uploaded: usize,
    /// Dimension values whose reference was already resolved
    pub reused: usize,
}

/// Check that a draft can be submitted
pub fn validate(draft: &ProductDraft, matrix: &VariantMatrix) -> Result<(), ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if let Some(option) = matrix.empty_options().first() {
        return Err(ValidationError::EmptyOption(option.name.clone()));
    }
    if matrix.variants().is_empty() {
        return Err(ValidationError::NoVariants);
    }
    if let Some(bad) = matrix
        .variants()
        .iter()
        .find(|v| v.price.is_some_and(|p| !p.is_finite() || p < 0.0))
    {
        return Err(ValidationError::InvalidPrice(bad.combination.to_string()));
    }
    Ok(())
}

/// Builds the persistence payload for one session
pub struct SubmissionCompiler<'a> {
    attributes: &'a [Attribute],
    storage: &'a dyn AssetStorage,
}

impl<'a> SubmissionCompiler<'a> {
    /// Create compiler over a loaded attribute directory and a storage service
    #[inline]
    #[must_use]
    pub fn new(attributes: &'a [Attribute], storage: &'a dyn AssetStorage) -> Self {
        Self {
            attributes,
            storage,
        }
    }

    /// Compile the session state into a payload
    ///
    /// # Errors
    /// - `Validation` before anything is uploaded
    /// - `Upload` for the first failing value; earlier values stay resolved
    pub async fn compile(
        &self,
        draft: &ProductDraft,
        matrix: &mut VariantMatrix,
    ) -> Result<CompiledSubmission, EditorError> {
        validate(draft, matrix)?;

        let visible = matrix.visible_set();
        let position = matrix.dimension_position();

        let (uploaded, reused) = match position {
            Some(position) => {
                let distinct: IndexSet<String> = visible
                    .iter()
                    .filter_map(|c| c.get(position))
                    .map(str::to_string)
                    .collect();
                self.upload_pending(draft, matrix, position, &distinct).await?
            }
            None => (0, 0),
        };

        let variants = visible
            .iter()
            .map(|combination| {
                let image_url = position
                    .and_then(|p| combination.get(p))
                    .and_then(|value| matrix.assets().reference(value))
                    .unwrap_or_default()
                    .to_string();
                match matrix.variant(combination) {
                    Some(record) => VariantPayload::from_record(record, image_url),
                    None => VariantPayload::from_record(
                        &VariantRecord::stub(combination.clone()),
                        image_url,
                    ),
                }
            })
            .collect();

        let (attributes, warnings) = self.map_attributes(matrix);

        tracing::info!(
            "Compiled '{}': {} variants, {} attributes, {} uploads",
            draft.title,
            visible.len(),
            attributes.len(),
            uploaded
        );

        Ok(CompiledSubmission {
            payload: ProductPayload {
                product: draft.clone(),
                variants,
                attributes,
            },
            warnings,
            uploaded,
            reused,
        })
    }

    async fn upload_pending(
        &self,
        draft: &ProductDraft,
        matrix: &mut VariantMatrix,
        position: usize,
        distinct: &IndexSet<String>,
    ) -> Result<(usize, usize), EditorError> {
        let option_name = matrix
            .option(position)
            .map(|o| o.name.clone())
            .unwrap_or_default();
        let mut uploaded = 0;
        let mut reused = 0;

        for value in distinct {
            let file = match matrix.asset(value) {
                Some(DimensionAsset::Pending(file)) => file.clone(),
                Some(DimensionAsset::Resolved(_)) => {
                    reused += 1;
                    continue;
                }
                None => continue,
            };

            let context = UploadContext {
                product_title: draft.title.clone(),
                option: option_name.clone(),
                value: value.clone(),
            };
            tracing::debug!("Uploading {} for '{}'", file.file_name, value);
            let asset = self
                .storage
                .upload(&file, &context)
                .await
                .map_err(|source| {
                    tracing::error!("Upload for '{}' failed: {}", value, source);
                    EditorError::Upload {
                        value: value.clone(),
                        source,
                    }
                })?;

            let shared = matrix.resolve_asset(value, &asset.resource_url)?;
            tracing::info!("Uploaded '{}' -> {} ({} variants)", value, asset.resource_url, shared);
            uploaded += 1;
        }

        Ok((uploaded, reused))
    }

    fn map_attributes(
        &self,
        matrix: &VariantMatrix,
    ) -> (Vec<AttributePayload>, Vec<SubmissionWarning>) {
        let mut pairs = Vec::new();
        let mut warnings = Vec::new();

        for option in matrix.options() {
            let attribute = self.attributes.iter().find(|a| a.matches_name(&option.name));
            for value in option.values() {
                match attribute.and_then(|a| a.find_value(value).map(|v| (a, v))) {
                    Some((attribute, attribute_value)) => pairs.push(AttributePayload {
                        attribute_id: attribute.id.clone(),
                        attribute_value_id: attribute_value.id.clone(),
                    }),
                    None => {
                        tracing::warn!(
                            "No attribute record for {} = '{}'; left out of the payload",
                            option.name,
                            value
                        );
                        warnings.push(SubmissionWarning::UnmatchedAttribute {
                            option: option.name.clone(),
                            value: value.clone(),
                        });
                    }
                }
            }
        }

        (pairs, warnings)
    }
}

impl std::fmt::Debug for SubmissionCompiler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionCompiler")
            .field("attributes", &self.attributes.len())
            .finish_non_exhaustive()
    }
}
