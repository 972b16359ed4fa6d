/// Convenience result type used across Pagecraft.
pub type PagecraftResult<T> = Result<T, PagecraftError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Batch operations report per-item failures inside their [`crate::BatchSummary`]; only
/// whole-batch-fatal conditions are returned as an `Err`.
#[derive(thiserror::Error, Debug)]
pub enum PagecraftError {
    /// Degenerate aspect ratio or frame size handed to the geometry calculators.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Non-positive or non-finite page/box dimensions.
    #[error("invalid dimensions: {width}x{height} (width and height must be positive)")]
    InvalidDimensions {
        /// Rejected width.
        width: f64,
        /// Rejected height.
        height: f64,
    },

    /// Malformed page range.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// A single asset could not be decoded or measured.
    #[error("asset decode failed for '{name}': {reason}")]
    AssetDecodeFailed {
        /// Caller-facing asset name.
        name: String,
        /// Underlying decoder message.
        reason: String,
    },

    /// A single container could not be mutated, even through the fallback path.
    #[error("container {container} mutation failed: {reason}")]
    ContainerMutationFailed {
        /// Raw container id.
        container: u64,
        /// What went wrong.
        reason: String,
    },

    /// The atomic commit of a batch failed; no partial state should be trusted.
    #[error("transaction failed: {0}")]
    TransactionFailed(Box<PagecraftError>),

    /// Invalid user-provided data or runtime misuse.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PagecraftError {
    /// Build a [`PagecraftError::InvalidGeometry`] value.
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Build a [`PagecraftError::InvalidDimensions`] value.
    pub fn invalid_dimensions(width: f64, height: f64) -> Self {
        Self::InvalidDimensions { width, height }
    }

    /// Build a [`PagecraftError::InvalidRange`] value.
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    /// Build a [`PagecraftError::AssetDecodeFailed`] value.
    pub fn asset_decode(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::AssetDecodeFailed {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`PagecraftError::ContainerMutationFailed`] value.
    pub fn container_mutation(container: u64, reason: impl std::fmt::Display) -> Self {
        Self::ContainerMutationFailed {
            container,
            reason: reason.to_string(),
        }
    }

    /// Wrap `self` as the cause of a failed commit.
    pub fn into_transaction_failure(self) -> Self {
        match self {
            already @ Self::TransactionFailed(_) => already,
            other => Self::TransactionFailed(Box::new(other)),
        }
    }

    /// Build a [`PagecraftError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether this error only concerns one item of a batch.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::AssetDecodeFailed { .. }
                | Self::ContainerMutationFailed { .. }
                | Self::InvalidGeometry(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
