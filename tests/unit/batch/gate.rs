use super::*;
use crate::document::model::WATERMARK_TAG;
use crate::foundation::core::Size;

fn media() -> Container {
    Container::with_media(Size::new(10.0, 10.0)).unwrap()
}

#[test]
fn untagged_container_is_not_processed() {
    assert!(!is_previously_processed(&media(), WATERMARK_TAG));
}

#[test]
fn marked_container_is_processed_for_that_purpose_only() {
    let mut c = media();
    mark_processed(&mut c, WATERMARK_TAG);
    assert!(is_previously_processed(&c, WATERMARK_TAG));
    assert!(!is_previously_processed(&c, "isImported"));
}

#[test]
fn only_exact_true_value_counts() {
    let mut c = media();
    for value in ["TRUE", "1", "yes", ""] {
        c.tag(WATERMARK_TAG, value);
        assert!(!is_previously_processed(&c, WATERMARK_TAG), "{value}");
    }
}
