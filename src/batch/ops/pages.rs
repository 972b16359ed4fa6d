use crate::{
    document::model::PageId,
    document::runtime::DocumentRuntime,
    foundation::core::PageRange,
    foundation::error::PagecraftResult,
    layout::range::resolve_range,
};

/// Read-only description of one page, as handed to exporters.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageInfo {
    /// Page handle.
    pub id: PageId,
    /// 1-based position in the document.
    pub index: usize,
    /// Page name.
    pub name: String,
    /// Page width.
    pub width: f64,
    /// Page height.
    pub height: f64,
    /// Number of containers in the page's frame.
    pub container_count: usize,
}

/// Describe the pages selected by `range`, in document order.
pub fn list_pages<R: DocumentRuntime>(
    runtime: &R,
    range: Option<PageRange>,
) -> PagecraftResult<Vec<PageInfo>> {
    let all = runtime.list_pages();
    let offset = range.map_or(0, |r| r.clamped_bounds(all.len()).0);
    resolve_range(&all, range)
        .iter()
        .enumerate()
        .map(|(i, &id)| {
            let page = runtime.page(id)?;
            Ok(PageInfo {
                id,
                index: offset + i + 1,
                name: page.name.clone(),
                width: page.size.width,
                height: page.size.height,
                container_count: page.frame.containers.len(),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../../tests/unit/batch/ops/pages.rs"]
mod tests;
