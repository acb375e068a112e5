//! Texel expansion for textures.
//!
//! Unused texels (as marked by a usage mask) take the color of the nearest used texel, so
//! bilinear filtering and mipmapping near UV seams do not bleed in unrelated colors.
//!
//! ```no_run
//! use texpand::{ExpandOpts, MaskFile, MaskSource, expand, load_image, save_image};
//!
//! # fn main() -> texpand::TexpandResult<()> {
//! let image = load_image("albedo.png")?;
//! let mask = MaskFile::new("albedo_mask.png").produce(image.width(), image.height())?;
//! let mut out = image.clone();
//! let report = expand(&mut out, &image, &mask, &ExpandOpts::default())?;
//! save_image("albedo_expanded.png", &out)?;
//! println!("filled {} texels", report.pixels_filled);
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

mod codec;
mod expand;
mod foundation;
mod raster;
mod search;

pub use codec::decode::{decode_image, load_image, load_mask, save_image, save_mask};
pub use codec::mask_source::{AlphaMask, MaskFile, MaskSource};
pub use expand::job::{ExpandEvent, ExpandJob};
pub use expand::opts::{DEFAULT_BLOCK_ROWS, ExpandOpts, MissPolicy};
pub use expand::scanline::{ScanStats, expand_scanlines};
pub use expand::scheduler::{
    CancelToken, ExpandControl, ExpandReport, ExpandStatus, expand, expand_with,
};
pub use foundation::core::{RowRange, SearchRadius};
pub use foundation::error::{TexpandError, TexpandResult};
pub use raster::image::{ImageF32, PixelFormat};
pub use raster::mask::{MASK_VALID, Mask, coverage_ratio};
pub use search::nearest::find_nearest;
