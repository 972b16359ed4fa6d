use rayon::prelude::*;

use crate::{
    assets::decode::MeasuredImage,
    batch::lifecycle::{BatchKind, BatchLifecycle, BatchPhase, BatchSummary, ItemFailure},
    batch::transaction::run_transaction,
    config::EngineConfig,
    document::model::Container,
    document::runtime::DocumentRuntime,
    foundation::core::{Anchor, Size},
    foundation::error::{PagecraftError, PagecraftResult},
    layout::anchor::compute_position,
};

/// One encoded asset to import.
#[derive(Clone, Debug)]
pub struct ImportAsset {
    /// Display name; becomes the new page's name.
    pub name: String,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

impl ImportAsset {
    /// Named asset.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Add one page per asset, each holding the asset centered on it.
///
/// Assets are decoded in parallel on a rayon pool sized by `config`; every decode finishes
/// before anything is mutated. Assets that fail to decode are reported under their input
/// index and left out. New pages take the size of the current page and are appended in
/// input order inside a single atomic edit.
#[tracing::instrument(skip(runtime, assets, config), fields(assets = assets.len()))]
pub fn bulk_import<R: DocumentRuntime + Sync>(
    runtime: &mut R,
    assets: &[ImportAsset],
    config: &EngineConfig,
) -> PagecraftResult<BatchSummary> {
    let mut batch = BatchLifecycle::new(BatchKind::Import);
    let (decoded, page_size) = batch.prepare(|| {
        let page_size = runtime.current_page_dimensions()?;
        let pool = config.build_import_pool()?;
        let rt: &R = &*runtime;
        let measured: Vec<PagecraftResult<MeasuredImage>> = pool.install(|| {
            assets
                .par_iter()
                .map(|asset| {
                    rt.decode_image(&asset.bytes)
                        .map_err(|e| PagecraftError::asset_decode(&asset.name, e))
                })
                .collect()
        });
        Ok((measured, page_size))
    })?;

    let mut failures = Vec::new();
    let mut ready: Vec<(&ImportAsset, Size)> = Vec::with_capacity(assets.len());
    for (index, (asset, result)) in assets.iter().zip(decoded).enumerate() {
        match result {
            Ok(measured) => ready.push((asset, measured.natural_size())),
            Err(error) => {
                tracing::warn!(index, name = %asset.name, %error, "asset skipped");
                failures.push(ItemFailure {
                    index,
                    page: None,
                    error,
                });
            }
        }
    }
    if ready.is_empty() {
        let mut summary = BatchSummary::empty(BatchKind::Import);
        summary.failures = failures;
        return batch.finish_without_mutation(summary);
    }

    batch.advance(BatchPhase::Mutating)?;
    let result = run_transaction(runtime, |scope| {
        for &(asset, natural) in &ready {
            let page = scope.runtime().create_page(page_size, &asset.name)?;
            let mut container = Container::with_media(natural)?;
            container.translation = compute_position(page_size, natural, Anchor::Center, 0.0);
            tracing::debug!(page = page.0, name = %asset.name, "importing asset");
            scope.runtime().append_container(page, container)?;
            scope.processed();
        }
        Ok(())
    });
    batch.settle(result, failures)
}

#[cfg(test)]
#[path = "../../../tests/unit/batch/ops/import.rs"]
mod tests;
