use serde::ser::SerializeStruct;

use crate::{
    document::model::PageId,
    foundation::error::{PagecraftError, PagecraftResult},
};

/// Which batch operation produced a summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchKind {
    /// Fit-to-frame.
    FitToFrame,
    /// Watermark injection.
    Watermark,
    /// Page layout resize.
    PageLayout,
    /// Document reset.
    Reset,
    /// Bulk import.
    Import,
}

/// Phase of a running batch operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchPhase {
    /// Not started.
    Idle,
    /// Validating input, resolving pages, decoding assets.
    Preparing,
    /// Inside the single atomic edit.
    Mutating,
    /// Finished; the summary is trustworthy.
    Completed,
    /// Aborted; no partial state should be trusted.
    Failed,
}

impl BatchPhase {
    /// Whether `self -> next` is a legal step.
    pub fn can_advance_to(self, next: BatchPhase) -> bool {
        use BatchPhase::*;
        matches!(
            (self, next),
            (Idle, Preparing)
                | (Preparing, Mutating)
                | (Preparing, Completed)
                | (Preparing, Failed)
                | (Mutating, Completed)
                | (Mutating, Failed)
        )
    }

    /// `Completed` or `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, BatchPhase::Completed | BatchPhase::Failed)
    }
}

/// A recoverable failure of one item of a batch.
#[derive(Debug)]
pub struct ItemFailure {
    /// Position of the item: input index for imports, processing order for containers.
    pub index: usize,
    /// Page the item belonged to, if it got that far.
    pub page: Option<PageId>,
    /// What went wrong.
    pub error: PagecraftError,
}

impl serde::Serialize for ItemFailure {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ItemFailure", 3)?;
        s.serialize_field("index", &self.index)?;
        s.serialize_field("page", &self.page)?;
        s.serialize_field("error", &self.error.to_string())?;
        s.end()
    }
}

/// Outcome of a batch operation that did not fail as a whole.
#[derive(Debug, serde::Serialize)]
pub struct BatchSummary {
    /// Operation that ran.
    pub kind: BatchKind,
    /// Items mutated.
    pub processed_count: usize,
    /// Items deliberately left alone (e.g. watermarks during a fit).
    pub skipped_count: usize,
    /// Items that failed without aborting the batch.
    pub failures: Vec<ItemFailure>,
}

impl BatchSummary {
    /// Zero-count summary.
    pub fn empty(kind: BatchKind) -> Self {
        Self {
            kind,
            processed_count: 0,
            skipped_count: 0,
            failures: Vec::new(),
        }
    }

    /// Whether any item failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Counters accumulated while a batch mutates.
#[derive(Debug, Default)]
pub(crate) struct Ledger {
    pub(crate) processed: usize,
    pub(crate) skipped: usize,
    pub(crate) failures: Vec<ItemFailure>,
}

impl Ledger {
    pub(crate) fn into_summary(self, kind: BatchKind) -> BatchSummary {
        BatchSummary {
            kind,
            processed_count: self.processed,
            skipped_count: self.skipped,
            failures: self.failures,
        }
    }
}

/// Tracks one operation through `Idle -> Preparing -> Mutating -> {Completed | Failed}`.
#[derive(Debug)]
pub struct BatchLifecycle {
    kind: BatchKind,
    phase: BatchPhase,
}

impl BatchLifecycle {
    /// Fresh lifecycle in `Idle`.
    pub fn new(kind: BatchKind) -> Self {
        Self {
            kind,
            phase: BatchPhase::Idle,
        }
    }

    /// Operation being tracked.
    pub fn kind(&self) -> BatchKind {
        self.kind
    }

    /// Current phase.
    pub fn phase(&self) -> BatchPhase {
        self.phase
    }

    /// Move to `next`, rejecting illegal steps.
    pub fn advance(&mut self, next: BatchPhase) -> PagecraftResult<()> {
        if !self.phase.can_advance_to(next) {
            return Err(PagecraftError::validation(format!(
                "{:?}: illegal phase transition {:?} -> {:?}",
                self.kind, self.phase, next
            )));
        }
        tracing::debug!(kind = ?self.kind, from = ?self.phase, to = ?next, "batch phase");
        self.phase = next;
        Ok(())
    }

    /// Run a fallible preparation step, moving to `Failed` if it errors.
    pub(crate) fn prepare<T>(
        &mut self,
        step: impl FnOnce() -> PagecraftResult<T>,
    ) -> PagecraftResult<T> {
        if self.phase == BatchPhase::Idle {
            self.advance(BatchPhase::Preparing)?;
        }
        step().inspect_err(|e| self.fail(e))
    }

    /// Nothing to mutate: complete from `Preparing` with `summary`.
    pub(crate) fn finish_without_mutation(
        &mut self,
        summary: BatchSummary,
    ) -> PagecraftResult<BatchSummary> {
        self.advance(BatchPhase::Completed)?;
        tracing::info!(
            kind = ?self.kind,
            failed = summary.failures.len(),
            "batch had nothing to mutate"
        );
        Ok(summary)
    }

    /// Close the mutation phase with the transaction result.
    pub(crate) fn settle(
        &mut self,
        result: PagecraftResult<Ledger>,
        mut pre_failures: Vec<ItemFailure>,
    ) -> PagecraftResult<BatchSummary> {
        match result {
            Ok(ledger) => {
                self.advance(BatchPhase::Completed)?;
                let mut summary = ledger.into_summary(self.kind);
                pre_failures.append(&mut summary.failures);
                summary.failures = pre_failures;
                tracing::info!(
                    kind = ?self.kind,
                    processed = summary.processed_count,
                    skipped = summary.skipped_count,
                    failed = summary.failures.len(),
                    "batch completed"
                );
                Ok(summary)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    fn fail(&mut self, error: &PagecraftError) {
        if !self.phase.is_terminal() {
            self.phase = BatchPhase::Failed;
        }
        tracing::error!(kind = ?self.kind, %error, "batch failed");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/lifecycle.rs"]
mod tests;
