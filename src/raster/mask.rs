use crate::foundation::error::{TexpandError, TexpandResult};
use crate::raster::image::{ImageF32, PixelFormat};

/// Mask value marking a texel as used. Every other value is unused.
pub const MASK_VALID: u8 = 0xff;

/// Per-texel usage mask, one byte per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Mask {
    /// Wrap `width * height` bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> TexpandResult<Self> {
        if width == 0 || height == 0 {
            return Err(TexpandError::validation(format!(
                "mask dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| TexpandError::validation("mask buffer size overflow"))?;
        if data.len() != expected_len {
            return Err(TexpandError::validation(format!(
                "mask buffer holds {} bytes, expected {expected_len} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A mask with every byte set to `value`.
    pub fn new_filled(width: u32, height: u32, value: u8) -> TexpandResult<Self> {
        Self::from_raw(width, height, vec![value; width as usize * height as usize])
    }

    /// Take ownership of a decoded 8-bit grey image.
    pub fn from_luma8(img: image::GrayImage) -> TexpandResult<Self> {
        let (w, h) = img.dimensions();
        Self::from_raw(w, h, img.into_raw())
    }

    /// Derive a mask from the alpha channel: texels whose alpha quantizes to 255 are used.
    pub fn from_alpha(img: &ImageF32) -> TexpandResult<Self> {
        if !img.has_alpha() {
            return Err(TexpandError::format_mismatch(
                "alpha mask source",
                PixelFormat::RgbaF32,
                img.format().to_string(),
            ));
        }
        let data = img
            .as_raw()
            .chunks_exact(4)
            .map(|px| unit_to_u8(px[3]))
            .collect();
        Self::from_raw(img.width(), img.height(), data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw mask bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Mask byte at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Set the byte at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx] = value;
    }

    /// `true` when the texel at `(x, y)` is used.
    #[inline]
    pub fn is_valid(&self, x: u32, y: u32) -> bool {
        self.get(x, y) == MASK_VALID
    }

    /// Row `y` of the mask.
    pub fn row(&self, y: u32) -> &[u8] {
        let off = y as usize * self.width as usize;
        &self.data[off..off + self.width as usize]
    }

    /// Number of used texels.
    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == MASK_VALID).count()
    }

    /// Copy into an `image` buffer for saving.
    pub fn to_luma8(&self) -> image::GrayImage {
        image::GrayImage::from_raw(self.width, self.height, self.data.clone())
            .unwrap_or_else(|| image::GrayImage::new(self.width, self.height))
    }
}

/// Fraction of used texels in `[0, 1]`.
pub fn coverage_ratio(mask: &Mask) -> f64 {
    if mask.data.is_empty() {
        return 0.0;
    }
    mask.valid_count() as f64 / mask.data.len() as f64
}

pub(crate) fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/mask.rs"]
mod tests;
