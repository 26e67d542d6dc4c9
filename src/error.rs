//! Error types for transform and rig operations.

use thiserror::Error;

/// Result type used throughout the crate.
pub type XformResult<T> = Result<T, XformError>;

#[derive(Debug, Error)]
pub enum XformError {
    /// `inverse` was asked of a matrix whose determinant magnitude is below
    /// [`SINGULAR_EPSILON`](crate::mat3::SINGULAR_EPSILON).
    #[error("matrix is non-invertible (determinant {determinant})")]
    NonInvertible { determinant: f32 },

    /// A row, column or component index outside `0..len`.
    #[error("index {index} out of range (valid range: 0-{max})", max = .len - 1)]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no limb with index {index}")]
    LimbNotFound { index: usize },

    /// Scaling a limb by zero (or to a ratio that is not finite) cannot be undone.
    #[error("limb {limb} cannot be scaled to {scale}")]
    DegenerateScale { limb: usize, scale: f32 },

    /// A NaN or infinite angle would leave every vertex of the subtree NaN.
    #[error("limb {limb} cannot be rotated to {angle}")]
    DegenerateAngle { limb: usize, angle: f32 },

    /// Flat vertex lists are `[x0, y0, x1, y1, ...]` and must have even length.
    #[error("limb '{limb}' has a vertex list of odd length {len}")]
    BadVertexList { limb: String, len: usize },

    #[cfg(feature = "rig-json")]
    #[error("invalid rig JSON: {0}")]
    RigJson(#[from] serde_json::Error),
}

impl XformError {
    pub(crate) fn index(index: usize) -> Self {
        Self::IndexOutOfRange { index, len: 3 }
    }
}
