//! Producers of usage masks.
//!
//! A mask can come from a separate file or from the texture's own alpha channel. Other
//! producers, such as a UV rasterizer, plug in by implementing [`MaskSource`].

use std::path::{Path, PathBuf};

use crate::codec::decode::load_mask;
use crate::foundation::error::{TexpandError, TexpandResult};
use crate::raster::image::ImageF32;
use crate::raster::mask::Mask;

/// Produces a usage mask for a texture of a given size.
pub trait MaskSource {
    /// Human-readable origin, used in error messages and logs.
    fn describe(&self) -> String;

    /// Build a `width x height` mask, failing when the source has another size.
    fn produce(&self, width: u32, height: u32) -> TexpandResult<Mask>;
}

/// Mask stored in an image file; 255 marks used texels.
#[derive(Clone, Debug)]
pub struct MaskFile {
    /// File to decode.
    pub path: PathBuf,
}

impl MaskFile {
    /// Mask read from `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl MaskSource for MaskFile {
    fn describe(&self) -> String {
        format!("mask file '{}'", self.path.display())
    }

    fn produce(&self, width: u32, height: u32) -> TexpandResult<Mask> {
        let mask = load_mask(&self.path)?;
        if mask.dimensions() != (width, height) {
            return Err(TexpandError::dimension_mismatch(
                format!("texture vs {}", self.describe()),
                (width, height),
                mask.dimensions(),
            ));
        }
        Ok(mask)
    }
}

/// Mask derived from the texture's alpha channel; fully opaque texels are used.
#[derive(Clone, Copy, Debug)]
pub struct AlphaMask<'a> {
    /// RGBA texture whose alpha is read.
    pub image: &'a ImageF32,
}

impl MaskSource for AlphaMask<'_> {
    fn describe(&self) -> String {
        "texture alpha channel".to_owned()
    }

    fn produce(&self, width: u32, height: u32) -> TexpandResult<Mask> {
        if self.image.dimensions() != (width, height) {
            return Err(TexpandError::dimension_mismatch(
                "texture vs alpha source",
                (width, height),
                self.image.dimensions(),
            ));
        }
        Mask::from_alpha(self.image)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/mask_source.rs"]
mod tests;
