use crate::{
    batch::lifecycle::{ItemFailure, Ledger},
    document::model::PageId,
    document::runtime::{ContainerHandle, DocumentRuntime, ResizeBehavior, ResizeRequest},
    foundation::core::{Anchor, Rect, Size},
    foundation::error::{PagecraftError, PagecraftResult},
    layout::anchor::compute_position,
};

/// One step of a transaction built from separate closures.
pub type MutationOp<'a, R> =
    Box<dyn FnOnce(&mut MutationScope<'_, R>) -> PagecraftResult<()> + 'a>;

/// Writable view of the runtime handed to the body of a transaction.
///
/// Besides the runtime itself it carries the batch counters, so per-item failures are
/// recorded instead of aborting the whole edit.
pub struct MutationScope<'a, R> {
    runtime: &'a mut R,
    ledger: &'a mut Ledger,
}

/// Which strategy ended up sizing a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// The host's preferred sizing primitive.
    Preferred,
    /// Manual clip/media adjustment after the preferred primitive failed.
    Fallback,
    /// Both strategies failed; the container was left as is and a failure recorded.
    Skipped,
}

/// Run `edit` as exactly one atomic edit on `runtime`.
///
/// Any error escaping `edit`, or raised by the commit itself, is fatal and comes back as
/// [`PagecraftError::TransactionFailed`]. Per-item failures recorded through the scope are
/// returned in the ledger.
pub(crate) fn run_transaction<R, F>(runtime: &mut R, edit: F) -> PagecraftResult<Ledger>
where
    R: DocumentRuntime,
    F: FnOnce(&mut MutationScope<'_, R>) -> PagecraftResult<()>,
{
    let mut ledger = Ledger::default();
    runtime
        .run_atomic(|rt| {
            let mut scope = MutationScope {
                runtime: rt,
                ledger: &mut ledger,
            };
            edit(&mut scope)
        })
        .map_err(PagecraftError::into_transaction_failure)?;
    Ok(ledger)
}

/// Run a sequence of closures, in order, inside one atomic edit.
pub(crate) fn run_ops<R: DocumentRuntime>(
    runtime: &mut R,
    ops: Vec<MutationOp<'_, R>>,
) -> PagecraftResult<Ledger> {
    run_transaction(runtime, |scope| {
        for op in ops {
            op(scope)?;
        }
        Ok(())
    })
}

impl<R: DocumentRuntime> MutationScope<'_, R> {
    /// The runtime being edited.
    pub fn runtime(&mut self) -> &mut R {
        &mut *self.runtime
    }

    /// Read-only view of the runtime.
    pub fn read(&self) -> &R {
        &*self.runtime
    }

    /// Count one item as mutated.
    pub fn processed(&mut self) {
        self.ledger.processed += 1;
    }

    /// Count one item as deliberately skipped.
    pub fn skipped(&mut self) {
        self.ledger.skipped += 1;
    }

    /// Record a recoverable per-item failure.
    pub fn record_failure(&mut self, index: usize, page: Option<PageId>, error: PagecraftError) {
        tracing::warn!(index, page = ?page.map(|p| p.0), %error, "batch item failed");
        self.ledger.failures.push(ItemFailure { index, page, error });
    }

    /// Size `handle` to `target` and center it in `frame`.
    ///
    /// Tries the preferred primitive first; if it is unavailable or fails, adjusts the clip
    /// region and media offset by hand. The fallback runs at most once. If it fails too the
    /// container is skipped and the failure recorded under `index`.
    pub fn resize_with_fallback(
        &mut self,
        index: usize,
        handle: ContainerHandle,
        frame: Size,
        target: Size,
        behavior: ResizeBehavior,
    ) -> ResizeOutcome {
        let attempt = try_preferred(&mut *self.runtime, handle, frame, target, behavior);
        let preferred = match attempt {
            Ok(()) => return ResizeOutcome::Preferred,
            Err(e) => e,
        };
        tracing::warn!(
            container = handle.container.0,
            error = %preferred,
            "preferred resize failed, using manual fallback"
        );

        match fallback_manual(&mut *self.runtime, handle, frame, target) {
            Ok(()) => ResizeOutcome::Fallback,
            Err(fallback) => {
                let error = PagecraftError::container_mutation(
                    handle.container.0,
                    format!("preferred resize: {preferred}; fallback: {fallback}"),
                );
                self.record_failure(index, Some(handle.page), error);
                ResizeOutcome::Skipped
            }
        }
    }
}

fn try_preferred<R: DocumentRuntime>(
    runtime: &mut R,
    handle: ContainerHandle,
    frame: Size,
    target: Size,
    behavior: ResizeBehavior,
) -> PagecraftResult<()> {
    runtime.resize_container(handle, ResizeRequest::boxed(target, behavior))?;
    let resized = runtime.container(handle)?.size;
    runtime.set_translation(handle, compute_position(frame, resized, Anchor::Center, 0.0))
}

/// Clip to the frame and center the media inside the clip.
fn fallback_manual<R: DocumentRuntime>(
    runtime: &mut R,
    handle: ContainerHandle,
    frame: Size,
    target: Size,
) -> PagecraftResult<()> {
    let media_origin = compute_position(frame, target, Anchor::Center, 0.0);
    let media = Rect::from_origin_size(media_origin.to_point(), target);
    runtime.set_clip_and_media(handle, frame, media)?;
    runtime.set_translation(handle, compute_position(frame, frame, Anchor::Center, 0.0))
}

#[cfg(test)]
#[path = "../../tests/unit/batch/transaction.rs"]
mod tests;
