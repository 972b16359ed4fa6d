use super::*;

#[test]
fn bottom_right_watermark_position() {
    let pos = compute_position(
        Size::new(1000.0, 1000.0),
        Size::new(150.0, 150.0),
        Anchor::BottomRight,
        20.0,
    );
    assert_eq!(pos, Vec2::new(830.0, 830.0));
}

#[test]
fn corners_are_inset_by_margin() {
    let frame = Size::new(400.0, 300.0);
    let content = Size::new(100.0, 50.0);
    assert_eq!(
        compute_position(frame, content, Anchor::TopLeft, 10.0),
        Vec2::new(10.0, 10.0)
    );
    assert_eq!(
        compute_position(frame, content, Anchor::TopRight, 10.0),
        Vec2::new(290.0, 10.0)
    );
    assert_eq!(
        compute_position(frame, content, Anchor::BottomLeft, 10.0),
        Vec2::new(10.0, 240.0)
    );
}

#[test]
fn center_ignores_margin_and_handles_equal_or_larger_boxes() {
    let frame = Size::new(500.0, 250.0);
    assert_eq!(
        compute_position(frame, frame, Anchor::Center, 20.0),
        Vec2::ZERO
    );
    assert_eq!(
        compute_position(frame, Size::new(700.0, 250.0), Anchor::Center, 0.0),
        Vec2::new(-100.0, 0.0)
    );
}

#[test]
fn position_is_deterministic() {
    let frame = Size::new(123.0, 456.0);
    let content = Size::new(7.5, 9.25);
    for anchor in Anchor::ALL {
        assert_eq!(
            compute_position(frame, content, anchor, 3.0),
            compute_position(frame, content, anchor, 3.0)
        );
    }
}
