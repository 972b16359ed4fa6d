use crate::{
    batch::gate::mark_processed,
    batch::lifecycle::{BatchKind, BatchLifecycle, BatchPhase, BatchSummary},
    batch::transaction::run_transaction,
    config::DEFAULT_WATERMARK_MARGIN,
    document::model::{Container, WATERMARK_TAG},
    document::runtime::DocumentRuntime,
    foundation::core::{Anchor, PageRange, ensure_positive_size},
    foundation::error::{PagecraftError, PagecraftResult},
    layout::anchor::compute_position,
    layout::range::resolve_range,
};

/// What to stamp and where.
#[derive(Clone, Debug)]
pub struct WatermarkSettings {
    /// Encoded watermark image.
    pub image: Vec<u8>,
    /// Opacity; clamped into `[0, 1]`.
    pub opacity: f64,
    /// Multiplier applied to the image's natural size.
    pub scale: f64,
    /// Placement within each frame.
    pub anchor: Anchor,
    /// Inset from the frame edges for corner anchors.
    pub margin: f64,
}

impl WatermarkSettings {
    /// Half-opaque, 30% scale, bottom-right, default margin.
    pub fn new(image: Vec<u8>) -> Self {
        Self {
            image,
            opacity: 0.5,
            scale: 0.3,
            anchor: Anchor::BottomRight,
            margin: DEFAULT_WATERMARK_MARGIN,
        }
    }

    fn validate(&self) -> PagecraftResult<()> {
        if self.opacity.is_nan() {
            return Err(PagecraftError::validation("watermark opacity must be a number"));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(PagecraftError::validation(format!(
                "watermark scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(PagecraftError::validation(format!(
                "watermark margin must be finite and >= 0, got {}",
                self.margin
            )));
        }
        Ok(())
    }
}

/// Stamp one watermark container onto every selected page.
///
/// The image is decoded once and shared by all pages. Every call adds a new watermark;
/// existing ones are not deduplicated. Each stamp is tagged so later fits leave it alone.
#[tracing::instrument(
    skip(runtime, settings),
    fields(anchor = ?settings.anchor, scale = settings.scale)
)]
pub fn inject_watermark<R: DocumentRuntime>(
    runtime: &mut R,
    settings: &WatermarkSettings,
    range: Option<PageRange>,
) -> PagecraftResult<BatchSummary> {
    let mut batch = BatchLifecycle::new(BatchKind::Watermark);
    let (pages, size, natural) = batch.prepare(|| {
        settings.validate()?;
        let measured = runtime
            .decode_image(&settings.image)
            .map_err(|e| PagecraftError::asset_decode("watermark", e))?;
        let natural = measured.natural_size();
        let size = ensure_positive_size(
            natural.width * settings.scale,
            natural.height * settings.scale,
        )?;
        let all = runtime.list_pages();
        Ok((resolve_range(&all, range).to_vec(), size, natural))
    })?;
    if pages.is_empty() {
        return batch.finish_without_mutation(BatchSummary::empty(BatchKind::Watermark));
    }

    let opacity = settings.opacity.clamp(0.0, 1.0);
    batch.advance(BatchPhase::Mutating)?;
    let result = run_transaction(runtime, |scope| {
        for &page_id in &pages {
            let frame = scope.read().page(page_id)?.size;
            let mut stamp = Container::with_media(natural)?;
            stamp.scale_to(size);
            stamp.translation = compute_position(frame, size, settings.anchor, settings.margin);
            stamp.opacity = opacity;
            mark_processed(&mut stamp, WATERMARK_TAG);
            tracing::debug!(
                page = page_id.0,
                x = stamp.translation.x,
                y = stamp.translation.y,
                "stamping watermark"
            );
            scope.runtime().append_container(page_id, stamp)?;
            scope.processed();
        }
        Ok(())
    });
    batch.settle(result, Vec::new())
}

#[cfg(test)]
#[path = "../../../tests/unit/batch/ops/watermark.rs"]
mod tests;
