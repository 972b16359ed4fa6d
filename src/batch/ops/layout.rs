use crate::{
    batch::lifecycle::{BatchKind, BatchLifecycle, BatchPhase, BatchSummary},
    batch::transaction::run_transaction,
    document::runtime::DocumentRuntime,
    foundation::core::PageRange,
    foundation::error::PagecraftResult,
    layout::preset::PageLayoutSettings,
    layout::range::resolve_range,
};

/// Resize the selected pages. Frames follow their pages; containers are not re-fitted.
#[tracing::instrument(skip(runtime))]
pub fn resize_page_layout<R: DocumentRuntime>(
    runtime: &mut R,
    settings: PageLayoutSettings,
    range: Option<PageRange>,
) -> PagecraftResult<BatchSummary> {
    let mut batch = BatchLifecycle::new(BatchKind::PageLayout);
    let (pages, size) = batch.prepare(|| {
        let size = settings.size()?;
        let all = runtime.list_pages();
        Ok((resolve_range(&all, range).to_vec(), size))
    })?;
    if pages.is_empty() {
        return batch.finish_without_mutation(BatchSummary::empty(BatchKind::PageLayout));
    }

    batch.advance(BatchPhase::Mutating)?;
    let result = run_transaction(runtime, |scope| {
        for &page in &pages {
            scope.runtime().set_page_size(page, size)?;
            scope.processed();
        }
        Ok(())
    });
    batch.settle(result, Vec::new())
}

#[cfg(test)]
#[path = "../../../tests/unit/batch/ops/layout.rs"]
mod tests;
