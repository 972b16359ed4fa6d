use crate::{
    batch::lifecycle::{BatchKind, BatchLifecycle, BatchPhase, BatchSummary},
    batch::transaction::{MutationOp, MutationScope, run_ops},
    document::model::ContainerId,
    document::runtime::DocumentRuntime,
    foundation::error::{PagecraftError, PagecraftResult},
};

/// Bring the document back to a single empty page.
///
/// Every page after the first is deleted and the first page's frame is cleared. A
/// single-page document is only cleared. `processed_count` is the number of pages touched.
#[tracing::instrument(skip(runtime))]
pub fn reset_document<R: DocumentRuntime>(runtime: &mut R) -> PagecraftResult<BatchSummary> {
    let mut batch = BatchLifecycle::new(BatchKind::Reset);
    let (first, rest) = batch.prepare(|| {
        let all = runtime.list_pages();
        match all.split_first() {
            Some((first, rest)) => Ok((*first, rest.to_vec())),
            None => Err(PagecraftError::validation("document has no pages")),
        }
    })?;

    batch.advance(BatchPhase::Mutating)?;
    let mut ops: Vec<MutationOp<'_, R>> = Vec::with_capacity(2);
    if !rest.is_empty() {
        ops.push(Box::new(|scope: &mut MutationScope<'_, R>| {
            tracing::debug!(count = rest.len(), "deleting pages");
            scope.runtime().delete_pages(&rest)?;
            for _ in &rest {
                scope.processed();
            }
            Ok(())
        }));
    }
    ops.push(Box::new(move |scope: &mut MutationScope<'_, R>| {
        let children: Vec<ContainerId> = scope
            .read()
            .page(first)?
            .frame
            .containers
            .iter()
            .map(|c| c.id)
            .collect();
        tracing::debug!(page = first.0, count = children.len(), "clearing frame");
        if !children.is_empty() {
            scope.runtime().remove_containers(first, &children)?;
        }
        scope.processed();
        Ok(())
    }));
    let result = run_ops(runtime, ops);
    batch.settle(result, Vec::new())
}

#[cfg(test)]
#[path = "../../../tests/unit/batch/ops/reset.rs"]
mod tests;
