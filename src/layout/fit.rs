use crate::foundation::core::{FitMode, Size};
use crate::foundation::error::{PagecraftError, PagecraftResult};

/// Target box for content of aspect `content_aspect` fitted into a `frame` sized box.
///
/// `Contain` pins the relatively wider side to the frame so nothing is cropped. `Fill` pins
/// the frame's longer side (height for portrait frames, width otherwise) and leaves any
/// overflow to the container's clip region. The result always has `content_aspect`.
pub fn compute_fit_size(content_aspect: f64, frame: Size, mode: FitMode) -> PagecraftResult<Size> {
    if !content_aspect.is_finite() || content_aspect <= 0.0 {
        return Err(PagecraftError::invalid_geometry(format!(
            "content aspect must be finite and > 0, got {content_aspect}"
        )));
    }
    if !(frame.width.is_finite() && frame.height.is_finite())
        || frame.width <= 0.0
        || frame.height <= 0.0
    {
        return Err(PagecraftError::invalid_geometry(format!(
            "frame must be positive, got {}x{}",
            frame.width, frame.height
        )));
    }

    let pin_width = match mode {
        FitMode::Contain => content_aspect > frame.width / frame.height,
        FitMode::Fill => frame.height <= frame.width,
    };

    let size = if pin_width {
        Size::new(frame.width, frame.width / content_aspect)
    } else {
        Size::new(frame.height * content_aspect, frame.height)
    };

    if size.width <= 0.0 || size.height <= 0.0 || !size.is_finite() {
        return Err(PagecraftError::invalid_geometry(format!(
            "fit produced a degenerate box {}x{}",
            size.width, size.height
        )));
    }
    Ok(size)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
