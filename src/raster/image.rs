use crate::foundation::error::{TexpandError, TexpandResult};

/// Channel layout of a raster buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PixelFormat {
    /// Three interleaved `f32` channels.
    RgbF32,
    /// Four interleaved `f32` channels, straight alpha.
    RgbaF32,
    /// One `u8` channel (usage masks).
    Grey8,
}

impl PixelFormat {
    /// Number of interleaved channels per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::RgbF32 => 3,
            Self::RgbaF32 => 4,
            Self::Grey8 => 1,
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::RgbF32 => "RGB f32",
            Self::RgbaF32 => "RGBA f32",
            Self::Grey8 => "grey u8",
        })
    }
}

/// Floating-point RGB(A) image, unpremultiplied, row-major and tightly packed.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<f32>,
}

impl ImageF32 {
    /// Wrap an interleaved buffer of `width * height * format.channels()` floats.
    pub fn from_raw(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<f32>,
    ) -> TexpandResult<Self> {
        if format == PixelFormat::Grey8 {
            return Err(TexpandError::format_mismatch(
                "image",
                PixelFormat::RgbaF32,
                format.to_string(),
            ));
        }
        if width == 0 || height == 0 {
            return Err(TexpandError::validation(format!(
                "image dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(format.channels()))
            .ok_or_else(|| TexpandError::validation("image buffer size overflow"))?;
        if data.len() != expected_len {
            return Err(TexpandError::validation(format!(
                "image buffer holds {} floats, expected {expected_len} for {width}x{height} {format}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// An image with every pixel set to `px` (only the first `channels` values are used).
    pub fn filled(
        width: u32,
        height: u32,
        format: PixelFormat,
        px: [f32; 4],
    ) -> TexpandResult<Self> {
        let n = format.channels().min(4);
        let count = (width as usize) * (height as usize);
        Self::from_raw(width, height, format, px[..n].repeat(count))
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

    /// Channel layout.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// `true` when the image carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.format == PixelFormat::RgbaF32
    }

    /// Floats per row.
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.channels()
    }

    /// Whole interleaved buffer.
    pub fn as_raw(&self) -> &[f32] {
        &self.data
    }

    /// Whole interleaved buffer, mutable.
    pub fn as_raw_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consume the image and return its buffer.
    pub fn into_raw(self) -> Vec<f32> {
        self.data
    }

    /// Channels of the pixel at `(x, y)`.
    ///
    /// Panics when the coordinate is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> &[f32] {
        let n = self.channels();
        let off = (y as usize * self.width as usize + x as usize) * n;
        &self.data[off..off + n]
    }

    /// Mutable channels of the pixel at `(x, y)`.
    ///
    /// Panics when the coordinate is out of bounds.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [f32] {
        let n = self.channels();
        let off = (y as usize * self.width as usize + x as usize) * n;
        &mut self.data[off..off + n]
    }

    /// Row `y` as an interleaved slice.
    pub fn row(&self, y: u32) -> &[f32] {
        let stride = self.row_stride();
        let off = y as usize * stride;
        &self.data[off..off + stride]
    }

    /// Rows `[start, end)` as one mutable slice.
    pub fn rows_mut(&mut self, start: u32, end: u32) -> &mut [f32] {
        let stride = self.row_stride();
        &mut self.data[start as usize * stride..end as usize * stride]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/image.rs"]
mod tests;
