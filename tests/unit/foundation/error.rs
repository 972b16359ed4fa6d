use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PagecraftError::invalid_geometry("x")
            .to_string()
            .contains("invalid geometry:")
    );
    assert!(
        PagecraftError::invalid_range("x")
            .to_string()
            .contains("invalid range:")
    );
    assert!(
        PagecraftError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert_eq!(
        PagecraftError::invalid_dimensions(0.0, 10.0).to_string(),
        "invalid dimensions: 0x10 (width and height must be positive)"
    );
}

#[test]
fn transaction_failure_wraps_once() {
    let err = PagecraftError::validation("boom").into_transaction_failure();
    let err = err.into_transaction_failure();
    let PagecraftError::TransactionFailed(inner) = &err else {
        panic!("expected transaction failure");
    };
    assert!(matches!(**inner, PagecraftError::Validation(_)));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn per_item_errors_are_recoverable() {
    assert!(PagecraftError::asset_decode("a.png", "bad header").is_recoverable());
    assert!(PagecraftError::container_mutation(7, "gone").is_recoverable());
    assert!(!PagecraftError::validation("x").is_recoverable());
    assert!(
        !PagecraftError::validation("x")
            .into_transaction_failure()
            .is_recoverable()
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PagecraftError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
