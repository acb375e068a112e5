use std::path::Path;

use anyhow::Context;

use crate::foundation::error::TexpandResult;
use crate::raster::image::{ImageF32, PixelFormat};
use crate::raster::mask::{Mask, unit_to_u8};

/// Decode an encoded image held in memory.
pub fn decode_image(bytes: &[u8]) -> TexpandResult<ImageF32> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    from_dynamic(dyn_img)
}

/// Load an image file. Sources with alpha become [`PixelFormat::RgbaF32`], others
/// [`PixelFormat::RgbF32`].
pub fn load_image(path: impl AsRef<Path>) -> TexpandResult<ImageF32> {
    let path = path.as_ref();
    let dyn_img = image::ImageReader::open(path)
        .with_context(|| format!("open image '{}'", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("probe image format '{}'", path.display()))?
        .decode()
        .with_context(|| format!("decode image '{}'", path.display()))?;
    from_dynamic(dyn_img)
}

/// Save an image as 8-bit per channel. Formats without alpha support drop the channel.
pub fn save_image(path: impl AsRef<Path>, img: &ImageF32) -> TexpandResult<()> {
    let path = path.as_ref();
    let (w, h) = img.dimensions();
    let bytes: Vec<u8> = img.as_raw().iter().map(|&v| unit_to_u8(v)).collect();

    let dyn_img = match img.format() {
        PixelFormat::RgbaF32 => {
            let rgba = image::RgbaImage::from_raw(w, h, bytes)
                .context("wrap RGBA buffer for encoding")?;
            let rgba = image::DynamicImage::ImageRgba8(rgba);
            if matches!(image::ImageFormat::from_path(path), Ok(image::ImageFormat::Jpeg)) {
                image::DynamicImage::ImageRgb8(rgba.to_rgb8())
            } else {
                rgba
            }
        }
        _ => image::DynamicImage::ImageRgb8(
            image::RgbImage::from_raw(w, h, bytes).context("wrap RGB buffer for encoding")?,
        ),
    };

    ensure_parent_dir(path)?;
    dyn_img
        .save(path)
        .with_context(|| format!("write image '{}'", path.display()))?;
    Ok(())
}

/// Load a usage mask. Color sources are converted to 8-bit grey first.
pub fn load_mask(path: impl AsRef<Path>) -> TexpandResult<Mask> {
    let path = path.as_ref();
    let dyn_img = image::ImageReader::open(path)
        .with_context(|| format!("open mask '{}'", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("probe mask format '{}'", path.display()))?
        .decode()
        .with_context(|| format!("decode mask '{}'", path.display()))?;
    Mask::from_luma8(dyn_img.to_luma8())
}

/// Save a usage mask as an 8-bit grey image.
pub fn save_mask(path: impl AsRef<Path>, mask: &Mask) -> TexpandResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    mask.to_luma8()
        .save(path)
        .with_context(|| format!("write mask '{}'", path.display()))?;
    Ok(())
}

fn from_dynamic(dyn_img: image::DynamicImage) -> TexpandResult<ImageF32> {
    let (w, h) = (dyn_img.width(), dyn_img.height());
    if dyn_img.color().has_alpha() {
        ImageF32::from_raw(w, h, PixelFormat::RgbaF32, dyn_img.to_rgba32f().into_raw())
    } else {
        ImageF32::from_raw(w, h, PixelFormat::RgbF32, dyn_img.to_rgb32f().into_raw())
    }
}

fn ensure_parent_dir(path: &Path) -> TexpandResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/codec/decode.rs"]
mod tests;
