use anyhow::Context;

use crate::foundation::core::Size;
use crate::foundation::error::{PagecraftError, PagecraftResult};

/// Decoded raster image reduced to what layout needs: its pixel dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeasuredImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl MeasuredImage {
    /// Natural size in device-independent pixels.
    pub fn natural_size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Width over height.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Decode encoded image bytes and measure them.
///
/// The format is sniffed from the bytes; zero-area images are rejected.
pub fn decode_image(bytes: &[u8]) -> PagecraftResult<MeasuredImage> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(PagecraftError::invalid_dimensions(
            f64::from(width),
            f64::from(height),
        ));
    }
    Ok(MeasuredImage { width, height })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
