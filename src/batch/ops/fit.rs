use crate::{
    batch::gate::is_previously_processed,
    batch::lifecycle::{BatchKind, BatchLifecycle, BatchPhase, BatchSummary},
    batch::transaction::{ResizeOutcome, run_transaction},
    document::model::{ContainerId, WATERMARK_TAG},
    document::runtime::{ContainerHandle, DocumentRuntime},
    foundation::core::{FitMode, PageRange},
    foundation::error::PagecraftResult,
    layout::fit::compute_fit_size,
    layout::range::resolve_range,
};

/// Fit every non-watermark container on the selected pages to its frame, then center it.
///
/// Target sizes come from each container's natural media aspect, so re-running a fit after
/// an earlier one (or after a layout change) converges on the same geometry. Containers
/// tagged as watermarks are counted as skipped.
#[tracing::instrument(skip(runtime))]
pub fn fit_to_frame<R: DocumentRuntime>(
    runtime: &mut R,
    mode: FitMode,
    range: Option<PageRange>,
) -> PagecraftResult<BatchSummary> {
    let mut batch = BatchLifecycle::new(BatchKind::FitToFrame);
    let pages = batch.prepare(|| {
        let all = runtime.list_pages();
        Ok(resolve_range(&all, range).to_vec())
    })?;
    if pages.is_empty() {
        return batch.finish_without_mutation(BatchSummary::empty(BatchKind::FitToFrame));
    }

    batch.advance(BatchPhase::Mutating)?;
    let result = run_transaction(runtime, |scope| {
        let mut index = 0usize;
        for &page_id in &pages {
            let page = scope.read().page(page_id)?;
            let frame = page.size;
            let items: Vec<(ContainerId, bool, f64)> = page
                .frame
                .containers
                .iter()
                .map(|c| {
                    (
                        c.id,
                        is_previously_processed(c, WATERMARK_TAG),
                        c.media.natural_aspect(),
                    )
                })
                .collect();
            tracing::debug!(page = page_id.0, containers = items.len(), "fitting page");

            for (container, is_watermark, aspect) in items {
                let item = index;
                index += 1;
                if is_watermark {
                    scope.skipped();
                    continue;
                }
                let target = match compute_fit_size(aspect, frame, mode) {
                    Ok(target) => target,
                    Err(e) => {
                        scope.record_failure(item, Some(page_id), e);
                        continue;
                    }
                };
                let handle = ContainerHandle {
                    page: page_id,
                    container,
                };
                match scope.resize_with_fallback(item, handle, frame, target, mode.into()) {
                    ResizeOutcome::Preferred | ResizeOutcome::Fallback => scope.processed(),
                    ResizeOutcome::Skipped => {}
                }
            }
        }
        Ok(())
    });
    batch.settle(result, Vec::new())
}

#[cfg(test)]
#[path = "../../../tests/unit/batch/ops/fit.rs"]
mod tests;
