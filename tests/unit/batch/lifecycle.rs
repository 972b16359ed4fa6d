use super::*;

#[test]
fn happy_path_walks_every_phase() {
    let mut batch = BatchLifecycle::new(BatchKind::Watermark);
    assert_eq!(batch.phase(), BatchPhase::Idle);
    batch.advance(BatchPhase::Preparing).unwrap();
    batch.advance(BatchPhase::Mutating).unwrap();
    let ledger = Ledger {
        processed: 3,
        skipped: 1,
        failures: vec![],
    };
    let summary = batch.settle(Ok(ledger), vec![]).unwrap();
    assert_eq!(batch.phase(), BatchPhase::Completed);
    assert_eq!(summary.kind, BatchKind::Watermark);
    assert_eq!(summary.processed_count, 3);
    assert_eq!(summary.skipped_count, 1);
}

#[test]
fn illegal_transitions_are_rejected() {
    let mut batch = BatchLifecycle::new(BatchKind::Reset);
    assert!(batch.advance(BatchPhase::Mutating).is_err());
    assert!(batch.advance(BatchPhase::Completed).is_err());
    batch.advance(BatchPhase::Preparing).unwrap();
    batch.advance(BatchPhase::Completed).unwrap();
    assert!(batch.advance(BatchPhase::Preparing).is_err());
    assert!(!BatchPhase::Failed.can_advance_to(BatchPhase::Completed));
}

#[test]
fn failed_preparation_lands_in_failed() {
    let mut batch = BatchLifecycle::new(BatchKind::PageLayout);
    let res: PagecraftResult<()> =
        batch.prepare(|| Err(PagecraftError::invalid_dimensions(0.0, 1.0)));
    assert!(res.is_err());
    assert_eq!(batch.phase(), BatchPhase::Failed);
}

#[test]
fn settle_error_fails_batch_and_merges_nothing() {
    let mut batch = BatchLifecycle::new(BatchKind::Import);
    batch.advance(BatchPhase::Preparing).unwrap();
    batch.advance(BatchPhase::Mutating).unwrap();
    let err = batch
        .settle(
            Err(PagecraftError::validation("commit").into_transaction_failure()),
            vec![],
        )
        .unwrap_err();
    assert!(matches!(err, PagecraftError::TransactionFailed(_)));
    assert_eq!(batch.phase(), BatchPhase::Failed);
}

#[test]
fn pre_mutation_failures_come_first() {
    let mut batch = BatchLifecycle::new(BatchKind::Import);
    batch.advance(BatchPhase::Preparing).unwrap();
    batch.advance(BatchPhase::Mutating).unwrap();
    let ledger = Ledger {
        processed: 1,
        skipped: 0,
        failures: vec![ItemFailure {
            index: 5,
            page: None,
            error: PagecraftError::container_mutation(9, "gone"),
        }],
    };
    let pre = vec![ItemFailure {
        index: 1,
        page: None,
        error: PagecraftError::asset_decode("b.png", "truncated"),
    }];
    let summary = batch.settle(Ok(ledger), pre).unwrap();
    let indices: Vec<_> = summary.failures.iter().map(|f| f.index).collect();
    assert_eq!(indices, vec![1, 5]);
    assert!(summary.has_failures());
}

#[test]
fn summary_serializes_failure_messages() {
    let summary = BatchSummary {
        kind: BatchKind::Import,
        processed_count: 2,
        skipped_count: 0,
        failures: vec![ItemFailure {
            index: 1,
            page: None,
            error: PagecraftError::asset_decode("b.png", "truncated"),
        }],
    };
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["kind"], "import");
    assert_eq!(json["failures"][0]["index"], 1);
    assert!(
        json["failures"][0]["error"]
            .as_str()
            .unwrap()
            .contains("b.png")
    );
}
