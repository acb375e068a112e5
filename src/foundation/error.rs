use crate::raster::image::PixelFormat;

/// Convenience result type used across texpand.
pub type TexpandResult<T> = Result<T, TexpandError>;

/// Top-level error taxonomy used by the expansion APIs.
///
/// An empty mask and a cancelled run are not errors: both surface through
/// [`crate::ExpandReport`].
#[derive(thiserror::Error, Debug)]
pub enum TexpandError {
    /// Two buffers that must share `width x height` do not.
    #[error(
        "dimension mismatch: {what} ({}x{} vs {}x{})",
        .expected.0,
        .expected.1,
        .found.0,
        .found.1
    )]
    DimensionMismatch {
        /// Names the two inputs that were compared, e.g. `"image vs mask"`.
        what: String,
        /// Size of the reference input.
        expected: (u32, u32),
        /// Size of the offending input.
        found: (u32, u32),
    },

    /// A buffer does not carry the channel layout the operation needs.
    #[error("format mismatch: {what} must be {expected}, found {found}")]
    FormatMismatch {
        /// Names the offending input.
        what: String,
        /// Required layout.
        expected: PixelFormat,
        /// Description of the layout that was provided.
        found: String,
    },

    /// Invalid caller-provided data or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TexpandError {
    /// Build a [`TexpandError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TexpandError::DimensionMismatch`] value.
    pub fn dimension_mismatch(
        what: impl Into<String>,
        expected: (u32, u32),
        found: (u32, u32),
    ) -> Self {
        Self::DimensionMismatch {
            what: what.into(),
            expected,
            found,
        }
    }

    /// Build a [`TexpandError::FormatMismatch`] value.
    pub fn format_mismatch(
        what: impl Into<String>,
        expected: PixelFormat,
        found: impl Into<String>,
    ) -> Self {
        Self::FormatMismatch {
            what: what.into(),
            expected,
            found: found.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
