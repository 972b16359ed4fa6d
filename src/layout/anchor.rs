use crate::foundation::core::{Anchor, Size, Vec2};

/// Top-left offset that places a `content` sized box at `anchor` within `frame`.
///
/// Corner anchors are inset by `margin` on both axes; `Center` ignores the margin. Boxes
/// larger than the frame get negative offsets, which is what centering cropped content
/// needs.
pub fn compute_position(frame: Size, content: Size, anchor: Anchor, margin: f64) -> Vec2 {
    let far_x = frame.width - content.width - margin;
    let far_y = frame.height - content.height - margin;
    match anchor {
        Anchor::TopLeft => Vec2::new(margin, margin),
        Anchor::TopRight => Vec2::new(far_x, margin),
        Anchor::BottomLeft => Vec2::new(margin, far_y),
        Anchor::BottomRight => Vec2::new(far_x, far_y),
        Anchor::Center => Vec2::new(
            (frame.width - content.width) / 2.0,
            (frame.height - content.height) / 2.0,
        ),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/anchor.rs"]
mod tests;
