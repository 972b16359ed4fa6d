use std::str::FromStr;

use crate::foundation::core::{Size, ensure_positive_size};
use crate::foundation::error::{PagecraftError, PagecraftResult};

/// Named social-media page formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPreset {
    /// 1080 x 1080 square post.
    Instagram,
    /// 1200 x 630 link preview.
    Facebook,
}

impl LayoutPreset {
    /// Page size in pixels.
    pub fn size(self) -> Size {
        match self {
            LayoutPreset::Instagram => Size::new(1080.0, 1080.0),
            LayoutPreset::Facebook => Size::new(1200.0, 630.0),
        }
    }
}

impl FromStr for LayoutPreset {
    type Err = PagecraftError;

    fn from_str(s: &str) -> PagecraftResult<Self> {
        match s {
            "instagram" => Ok(Self::Instagram),
            "facebook" => Ok(Self::Facebook),
            other => Err(PagecraftError::validation(format!(
                "unknown layout preset '{other}'"
            ))),
        }
    }
}

/// Common page aspect ratios.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AspectRatio {
    /// 1:1
    #[serde(rename = "1:1")]
    Square,
    /// 9:16
    #[serde(rename = "9:16")]
    Portrait,
    /// 16:9
    #[serde(rename = "16:9")]
    Landscape,
}

impl AspectRatio {
    /// Width over height.
    pub fn ratio(self) -> f64 {
        match self {
            AspectRatio::Square => 1.0,
            AspectRatio::Portrait => 9.0 / 16.0,
            AspectRatio::Landscape => 16.0 / 9.0,
        }
    }

    /// Page size with the given width and this ratio.
    pub fn size_for_width(self, width: f64) -> PagecraftResult<Size> {
        ensure_positive_size(width, width / self.ratio())
    }
}

impl FromStr for AspectRatio {
    type Err = PagecraftError;

    fn from_str(s: &str) -> PagecraftResult<Self> {
        match s {
            "1:1" => Ok(Self::Square),
            "9:16" => Ok(Self::Portrait),
            "16:9" => Ok(Self::Landscape),
            other => Err(PagecraftError::validation(format!(
                "unknown aspect ratio '{other}'"
            ))),
        }
    }
}

/// Target page dimensions for a layout change. Validated when the operation runs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageLayoutSettings {
    /// New page width.
    pub width: f64,
    /// New page height.
    pub height: f64,
}

impl PageLayoutSettings {
    /// Explicit dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Dimensions of a named preset.
    pub fn from_preset(preset: LayoutPreset) -> Self {
        let size = preset.size();
        Self::new(size.width, size.height)
    }

    /// Dimensions for `ratio` at `width`.
    pub fn from_aspect(ratio: AspectRatio, width: f64) -> PagecraftResult<Self> {
        let size = ratio.size_for_width(width)?;
        Ok(Self::new(size.width, size.height))
    }

    /// Checked size.
    pub fn size(&self) -> PagecraftResult<Size> {
        ensure_positive_size(self.width, self.height)
    }
}

impl From<LayoutPreset> for PageLayoutSettings {
    fn from(preset: LayoutPreset) -> Self {
        Self::from_preset(preset)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/preset.rs"]
mod tests;
