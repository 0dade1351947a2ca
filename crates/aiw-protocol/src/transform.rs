//! Transform results

use std::collections::BTreeMap;

use crate::warning::{ValidationWarning, WarningCategory};

/// Why a transform produced no files
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// Required metadata fields are absent or blank
    #[error("Template is missing required fields: {}", .0.join(", "))]
    MissingRequiredFields(Vec<String>),

    /// Target platform has no adapter yet
    #[error("{0} output is not yet supported")]
    UnsupportedPlatform(String),

    /// Output could not be rendered
    #[error("Failed to render {path}: {reason}")]
    Render {
        /// Output path being rendered
        path: String,
        /// Underlying cause
        reason: String,
    },
}

impl TransformError {
    /// Create a `MissingRequiredFields` error
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingRequiredFields(fields.into_iter().map(Into::into).collect())
    }
}

/// Outcome of converting one template for one platform
///
/// `files` maps a relative output path to the full file contents. On failure `files` is
/// empty and `error` says why; callers must not write anything in that case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformResult {
    /// Whether files were produced
    pub success: bool,

    /// Relative path → contents
    pub files: BTreeMap<String, String>,

    /// Validation and transform-time warnings
    pub warnings: Vec<ValidationWarning>,

    /// Failure reason when `success` is false
    pub error: Option<TransformError>,
}

impl TransformResult {
    /// Successful result
    #[must_use]
    pub fn success(files: BTreeMap<String, String>, warnings: Vec<ValidationWarning>) -> Self {
        Self {
            success: true,
            files,
            warnings,
            error: None,
        }
    }

    /// Failed result with no files
    #[must_use]
    pub fn failure(error: TransformError, warnings: Vec<ValidationWarning>) -> Self {
        Self {
            success: false,
            files: BTreeMap::new(),
            warnings,
            error: Some(error),
        }
    }

    /// Warnings of one category
    pub fn warnings_in(&self, category: WarningCategory) -> impl Iterator<Item = &ValidationWarning> {
        self.warnings.iter().filter(move |w| w.category == category)
    }

    /// Whether any warning concerns `field`
    #[must_use]
    pub fn has_warning_for(&self, field: &str) -> bool {
        self.warnings.iter().any(|w| w.field == field)
    }

    /// Convert into a `Result`, keeping warnings on success
    pub fn into_result(
        self,
    ) -> Result<(BTreeMap<String, String>, Vec<ValidationWarning>), TransformError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok((self.files, self.warnings)),
        }
    }
}
