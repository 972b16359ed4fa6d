use crate::foundation::core::PageRange;

/// Select the pages named by `range` from `all`, in document order.
///
/// `None` selects everything. Bounds past the end are truncated, so a range starting past
/// the last page yields an empty slice rather than an error.
pub fn resolve_range<T>(all: &[T], range: Option<PageRange>) -> &[T] {
    match range {
        None => all,
        Some(r) => {
            let (lo, hi) = r.clamped_bounds(all.len());
            &all[lo..hi]
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/range.rs"]
mod tests;
