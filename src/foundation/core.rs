use std::str::FromStr;

use crate::foundation::error::{PagecraftError, PagecraftResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Inclusive, 1-indexed page range.
///
/// Ends past the document are clamped when the range is resolved, never rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawPageRange")]
pub struct PageRange {
    start: usize,
    end: usize,
}

#[derive(serde::Deserialize)]
struct RawPageRange {
    start: usize,
    end: usize,
}

impl TryFrom<RawPageRange> for PageRange {
    type Error = PagecraftError;

    fn try_from(raw: RawPageRange) -> PagecraftResult<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl PageRange {
    /// Build a range covering pages `start..=end` (1-indexed).
    pub fn new(start: usize, end: usize) -> PagecraftResult<Self> {
        if start == 0 {
            return Err(PagecraftError::invalid_range("start must be >= 1"));
        }
        if end < start {
            return Err(PagecraftError::invalid_range(format!(
                "end ({end}) must be >= start ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Single-page range.
    pub fn single(page: usize) -> PagecraftResult<Self> {
        Self::new(page, page)
    }

    /// First page, 1-indexed.
    pub fn start(self) -> usize {
        self.start
    }

    /// Last page, 1-indexed and inclusive.
    pub fn end(self) -> usize {
        self.end
    }

    /// Number of pages the range names before clamping.
    pub fn len_pages(self) -> usize {
        self.end - self.start + 1
    }

    /// Zero-based half-open bounds clamped to a sequence of `len` items.
    pub fn clamped_bounds(self, len: usize) -> (usize, usize) {
        let lo = (self.start - 1).min(len);
        let hi = self.end.min(len).max(lo);
        (lo, hi)
    }
}

impl std::fmt::Display for PageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for PageRange {
    type Err = PagecraftError;

    /// Accepts `"3"` or `"2-5"`.
    fn from_str(s: &str) -> PagecraftResult<Self> {
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|e| PagecraftError::invalid_range(format!("'{s}': {e}")))
        };
        match s.split_once('-') {
            Some((a, b)) => Self::new(parse(a)?, parse(b)?),
            None => Self::single(parse(s)?),
        }
    }
}

/// How content is fitted into a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitMode {
    /// Fully visible, never cropped.
    #[default]
    Contain,
    /// Covers the frame; overflow is cropped by a clip region.
    Fill,
}

impl FromStr for FitMode {
    type Err = PagecraftError;

    fn from_str(s: &str) -> PagecraftResult<Self> {
        match s {
            "contain" => Ok(Self::Contain),
            "fill" => Ok(Self::Fill),
            other => Err(PagecraftError::validation(format!(
                "unknown fit mode '{other}' (expected 'contain' or 'fill')"
            ))),
        }
    }
}

/// Fixed placement points used to position a box within a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    /// Top-left corner, inset by the margin.
    TopLeft,
    /// Top-right corner, inset by the margin.
    TopRight,
    /// Bottom-left corner, inset by the margin.
    BottomLeft,
    /// Bottom-right corner, inset by the margin.
    BottomRight,
    /// Centered; the margin is ignored.
    Center,
}

impl Anchor {
    /// Every anchor, in a stable order.
    pub const ALL: [Anchor; 5] = [
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
        Anchor::Center,
    ];
}

impl FromStr for Anchor {
    type Err = PagecraftError;

    fn from_str(s: &str) -> PagecraftResult<Self> {
        match s {
            "top-left" => Ok(Self::TopLeft),
            "top-right" => Ok(Self::TopRight),
            "bottom-left" => Ok(Self::BottomLeft),
            "bottom-right" => Ok(Self::BottomRight),
            "center" => Ok(Self::Center),
            other => Err(PagecraftError::validation(format!(
                "unknown anchor '{other}'"
            ))),
        }
    }
}

/// Width/height check shared by every operation that accepts raw dimensions.
pub(crate) fn ensure_positive_size(width: f64, height: f64) -> PagecraftResult<Size> {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(PagecraftError::invalid_dimensions(width, height));
    }
    Ok(Size::new(width, height))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
